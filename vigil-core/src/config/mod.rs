//! Configuration types
//!
//! Board-agnostic configuration records. The firmware fills them from
//! `vigil.toml` at build time; tests use the `Default` values, which carry
//! the constants the panel programs have always used.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

/// Configuration validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin specification could not be parsed or is out of range
    InvalidPin,
    /// Two functions were assigned to the same pin
    PinConflict,
    /// Display control and data lines must share one port
    SplitDisplayPort,
    /// A timing value is below the controller minimum
    InvalidTiming,
    /// Alert threshold or persistence count out of range
    InvalidThreshold,
    /// ADC clock divider or channel out of range
    InvalidSampler,
}
