//! Configuration type definitions
//!
//! Timing, sampling and alert tuning. None of these are derived from clock
//! frequencies: they are fixed configuration, checked against controller
//! minimums by `validate()`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Command execution time of an HD44780 for ordinary commands (µs)
pub const MIN_COMMAND_SETTLE_US: u32 = 37;

/// Execution time of clear display / return home (µs)
pub const MIN_CLEAR_SETTLE_US: u32 = 1520;

/// Minimum wait after power reaches 4.5 V before the first command (ms)
pub const MIN_POWER_UP_MS: u32 = 15;

/// Full-scale ADC reading (12-bit)
pub const ADC_FULL_SCALE: u16 = 4095;

/// ADC reference voltage
pub const REFERENCE_VOLTS: f32 = 3.3;

/// Display controller timing
///
/// All durations are busy-waits. `enable_pulse_us` is the EN high time,
/// `transfer_settle_us` the EN low hold after every nibble. The three
/// `*_settle_us` values are waited once per byte, after both nibbles.
///
/// With [`InitStyle::Paired`] the two halves of the `0x33` handshake are
/// only `transfer_settle_us` apart, well short of the 4.1 ms the datasheet
/// asks for after the first 8-bit function set. Controllers that miss it
/// need [`InitStyle::Nibbles`], which waits `clear_settle_us` after each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayTiming {
    /// Wait before the first initialization command (ms)
    pub power_up_ms: u32,
    /// Enable line high time (µs)
    pub enable_pulse_us: u32,
    /// Enable line low hold after each nibble (µs)
    pub transfer_settle_us: u32,
    /// Wait after an ordinary command (µs)
    pub command_settle_us: u32,
    /// Wait after a character write (µs)
    pub data_settle_us: u32,
    /// Wait after clear display / return home (µs)
    pub clear_settle_us: u32,
}

impl Default for DisplayTiming {
    fn default() -> Self {
        Self {
            power_up_ms: 50,
            enable_pulse_us: 2,
            transfer_settle_us: 100,
            command_settle_us: 100,
            data_settle_us: 50,
            clear_settle_us: 2000,
        }
    }
}

impl DisplayTiming {
    /// Check the timing against controller minimums
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enable_pulse_us == 0 || self.transfer_settle_us == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        if self.power_up_ms < MIN_POWER_UP_MS {
            return Err(ConfigError::InvalidTiming);
        }
        let command = self.command_settle_us.saturating_add(self.transfer_settle_us);
        let data = self.data_settle_us.saturating_add(self.transfer_settle_us);
        if command < MIN_COMMAND_SETTLE_US || data < MIN_COMMAND_SETTLE_US {
            return Err(ConfigError::InvalidTiming);
        }
        if self.clear_settle_us < MIN_CLEAR_SETTLE_US
            || self.clear_settle_us <= self.command_settle_us
        {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }
}

/// How the 4-bit bus width handshake is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitStyle {
    /// `0x33, 0x32` as ordinary two-nibble commands
    #[default]
    Paired,
    /// `0x30, 0x30, 0x30, 0x20` as single-nibble writes, cursor homed at the end
    Nibbles,
}

/// Analog sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// ADC clock = PCLK / (clock_divider + 1)
    pub clock_divider: u8,
    /// Done-flag polls before a conversion is declared lost
    pub max_polls: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            clock_divider: 4,
            max_polls: 10_000,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_polls == 0 {
            return Err(ConfigError::InvalidSampler);
        }
        Ok(())
    }
}

/// Debounced alert tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertConfig {
    /// Consecutive quiet observations needed to leave the alert state
    pub persistence: u16,
    /// Samples strictly below this value count as a trigger
    pub trigger_below: u16,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            persistence: 50,
            trigger_below: 3650,
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.persistence == 0 || self.trigger_below > ADC_FULL_SCALE {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }
}
