//! Analog sampler trait and sample scaling

use crate::config::{ADC_FULL_SCALE, REFERENCE_VOLTS};

/// Errors that can occur while sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerError {
    /// Conversion-done flag never came up
    Timeout {
        /// Channel being converted
        channel: u8,
        /// Polls spent waiting
        polls: u32,
    },
    /// Channel number does not exist on the converter
    InvalidChannel(u8),
    /// Channel exists but was not routed at configure time
    ChannelNotConfigured(u8),
    /// Configure was called with an empty channel set
    NoChannels,
}

/// One 12-bit conversion result
///
/// Ratiometric to the reference voltage: 0 is ground, 4095 is full scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcSample(u16);

impl AdcSample {
    /// Wrap a raw reading, keeping the low 12 bits
    pub const fn new(raw: u16) -> Self {
        Self(raw & ADC_FULL_SCALE)
    }

    /// Raw reading
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Voltage at the pin
    pub fn volts(&self) -> f32 {
        self.0 as f32 * REFERENCE_VOLTS / ADC_FULL_SCALE as f32
    }

    /// Voltage in hundredths of a volt, rounded half up
    ///
    /// Integer-only, so it formats identically on every target.
    pub const fn centivolts(&self) -> u16 {
        let scaled = self.0 as u32 * 330;
        ((scaled + ADC_FULL_SCALE as u32 / 2) / ADC_FULL_SCALE as u32) as u16
    }
}

impl From<AdcSample> for u16 {
    fn from(sample: AdcSample) -> Self {
        sample.0
    }
}

/// Trait for polling analog samplers
///
/// Each call is a complete, blocking conversion: select, start, wait, read.
/// Reads of different channels are sequential, never simultaneous.
pub trait AnalogSampler {
    /// Convert `channel` once
    fn read_channel(&mut self, channel: u8) -> Result<AdcSample, SamplerError>;
}

impl<S: AnalogSampler + ?Sized> AnalogSampler for &mut S {
    fn read_channel(&mut self, channel: u8) -> Result<AdcSample, SamplerError> {
        (**self).read_channel(channel)
    }
}
