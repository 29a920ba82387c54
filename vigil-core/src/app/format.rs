//! Fixed-width text for the 16-column display

use core::fmt::Write;

use heapless::String;

use crate::traits::display::LINE_WIDTH;
use crate::traits::AdcSample;

/// One display line
pub type Line = String<LINE_WIDTH>;

/// `"1.65"` style voltage with two decimals
pub fn volts(centivolts: u16) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{}.{:02}", centivolts / 100, centivolts % 100);
    line
}

/// `"Val:2048  1.65V"`: raw reading and voltage side by side
pub fn sample_line(sample: AdcSample) -> Line {
    let cv = sample.centivolts();
    let mut line = Line::new();
    let _ = write!(line, "Val:{:4}  {}.{:02}V", sample.raw(), cv / 100, cv % 100);
    line
}

/// `|a - b|` in hundredths of a volt
///
/// Computed on the raw readings so the result is rounded once.
pub fn difference_centivolts(a: AdcSample, b: AdcSample) -> u16 {
    AdcSample::new(a.raw().abs_diff(b.raw())).centivolts()
}

/// `"COUNTER: 7"`
pub fn counter_line(count: u8) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "COUNTER: {}", count % 10);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volts() {
        assert_eq!(volts(0).as_str(), "0.00");
        assert_eq!(volts(165).as_str(), "1.65");
        assert_eq!(volts(330).as_str(), "3.30");
        assert_eq!(volts(7).as_str(), "0.07");
    }

    #[test]
    fn test_sample_line_fits() {
        let line = sample_line(AdcSample::new(4095));
        assert_eq!(line.as_str(), "Val:4095  3.30V");

        let line = sample_line(AdcSample::new(12));
        assert_eq!(line.as_str(), "Val:  12  0.01V");
    }

    #[test]
    fn test_difference_is_symmetric() {
        let a = AdcSample::new(4095);
        let b = AdcSample::new(2048);
        assert_eq!(difference_centivolts(a, b), 165);
        assert_eq!(difference_centivolts(b, a), 165);
        assert_eq!(difference_centivolts(a, a), 0);
    }

    #[test]
    fn test_counter_line() {
        assert_eq!(counter_line(3).as_str(), "COUNTER: 3");
        assert_eq!(counter_line(12).as_str(), "COUNTER: 2");
    }
}
