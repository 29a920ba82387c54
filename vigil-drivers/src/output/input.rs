//! Level-sensed digital inputs (PIR output, push switches)
//!
//! Sampled once per loop pass; no edge detection and no debouncing here.
//! Filtering is the alert machine's job.

use vigil_core::config::PinConfig;
use vigil_hal::InputPin;

/// Digital input with configurable polarity
pub struct LevelInput<P> {
    pin: P,
    /// Active when the pin reads low
    active_low: bool,
}

impl<P: InputPin> LevelInput<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Create an input with the polarity from its pin config (`!P2.12`)
    pub fn from_config(pin: P, config: &PinConfig) -> Self {
        Self::new(pin, config.inverted)
    }

    /// Whether the input is asserted right now
    pub fn is_active(&self) -> bool {
        self.pin.is_high() != self.active_low
    }

    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Level<'a>(&'a Cell<bool>);

    impl InputPin for Level<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_active_high_input() {
        let level = Cell::new(false);
        let pir = LevelInput::from_config(Level(&level), &PinConfig::new(0, 10));
        assert!(!pir.is_active());
        level.set(true);
        assert!(pir.is_active());
    }

    #[test]
    fn test_active_low_switch() {
        // Pull-up idles high, pressing pulls to ground
        let level = Cell::new(true);
        let sw = LevelInput::from_config(Level(&level), &PinConfig::inverted(2, 12));
        assert!(!sw.is_active());
        level.set(false);
        assert!(sw.is_active());
    }
}
