//! Differential voltmeter
//!
//! Shows `|V(a) - V(b)|` for two potentiometer channels. The two readings
//! are taken back to back, so the difference carries one conversion time
//! of skew; that is accepted.

use crate::app::{format, SENSOR_FAULT_MSG};
use crate::traits::{AnalogSampler, CharacterDisplay, DisplayExt, SamplerError};

pub const TITLE_MSG: &str = "ADC Diff (V):";

/// Voltmeter program
pub struct DiffVoltmeter<D, S> {
    display: D,
    sampler: S,
    channels: (u8, u8),
}

impl<D: CharacterDisplay, S: AnalogSampler> DiffVoltmeter<D, S> {
    pub fn new(display: D, sampler: S, channels: (u8, u8)) -> Self {
        Self {
            display,
            sampler,
            channels,
        }
    }

    /// Bring up the display and show the title
    pub fn start(&mut self) {
        self.display.initialize();
        self.display.print_line(0, TITLE_MSG);
    }

    /// One pass: read both channels and show the difference
    ///
    /// Returns the difference in hundredths of a volt.
    pub fn step(&mut self) -> Result<u16, SamplerError> {
        match self.measure() {
            Ok(cv) => {
                self.display.print_line(1, &format::volts(cv));
                Ok(cv)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("voltmeter: sampler error {}", e);
                self.display.print_line(1, SENSOR_FAULT_MSG);
                Err(e)
            }
        }
    }

    fn measure(&mut self) -> Result<u16, SamplerError> {
        let (a, b) = self.channels;
        let va = self.sampler.read_channel(a)?;
        let vb = self.sampler.read_channel(b)?;
        Ok(format::difference_centivolts(va, vb))
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}
