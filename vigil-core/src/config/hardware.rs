//! Hardware configuration types
//!
//! Pin assignments for the panel. Pins are written the way the board
//! silkscreen names them: `P0.27`, with a leading `!` for active-low inputs
//! (`!P2.12`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{AlertConfig, ConfigError, DisplayTiming, InitStyle, SamplerConfig};

/// Highest GPIO port number on the part
pub const MAX_PORT: u8 = 4;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO port (0-4)
    pub port: u8,
    /// Bit within the port (0-31)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(port: u8, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(port: u8, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: true,
        }
    }

    /// Bit mask of this pin on its port
    pub const fn mask(&self) -> u32 {
        1 << (self.pin & 0x1F)
    }

    /// Parse a pin string
    ///
    /// Supports formats:
    /// - "P0.27" -> port 0, pin 27
    /// - "!P2.12" -> port 2, pin 12, inverted
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (s, inverted) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let s = s
            .strip_prefix('P')
            .or_else(|| s.strip_prefix('p'))
            .ok_or(ConfigError::InvalidPin)?;
        let (port, pin) = s.split_once('.').ok_or(ConfigError::InvalidPin)?;
        let port: u8 = port.parse().map_err(|_| ConfigError::InvalidPin)?;
        let pin: u8 = pin.parse().map_err(|_| ConfigError::InvalidPin)?;

        if port > MAX_PORT || pin > 31 {
            return Err(ConfigError::InvalidPin);
        }

        Ok(Self {
            port,
            pin,
            inverted,
        })
    }
}

/// Character display wiring (4-bit bus)
///
/// D4..D7 occupy four consecutive bits starting at `d4`; RS and EN must be
/// on the same port so one port handle drives the whole bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// Lowest data line (D4)
    pub d4: PinConfig,
    /// Register select
    pub rs: PinConfig,
    /// Enable strobe
    pub en: PinConfig,
    pub timing: DisplayTiming,
    pub init_style: InitStyle,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            d4: PinConfig::new(0, 4),
            rs: PinConfig::new(0, 8),
            en: PinConfig::new(0, 9),
            timing: DisplayTiming::default(),
            init_style: InitStyle::default(),
        }
    }
}

impl DisplayHwConfig {
    /// Mask of the four data lines
    pub const fn data_mask(&self) -> u32 {
        0x0F << (self.d4.pin & 0x1F)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.d4.pin > 28 {
            return Err(ConfigError::InvalidPin);
        }
        if self.rs.port != self.d4.port || self.en.port != self.d4.port {
            return Err(ConfigError::SplitDisplayPort);
        }
        let data = self.data_mask();
        if data & self.rs.mask() != 0
            || data & self.en.mask() != 0
            || self.rs.mask() == self.en.mask()
        {
            return Err(ConfigError::PinConflict);
        }
        self.timing.validate()
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub display: DisplayHwConfig,
    /// Buzzer output
    pub buzzer: PinConfig,
    /// PIR motion sensor input
    pub pir: PinConfig,
    /// Operator acknowledge switch
    pub reset_switch: PinConfig,
    /// ADC channel watched by the intruder alarm
    pub alarm_channel: u8,
    /// Channel pair compared by the voltmeter
    pub diff_channels: (u8, u8),
    pub sampler: SamplerConfig,
    pub alert: AlertConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            display: DisplayHwConfig::default(),
            buzzer: PinConfig::new(0, 22),
            pir: PinConfig::new(0, 10),
            reset_switch: PinConfig::inverted(2, 12),
            alarm_channel: 2,
            diff_channels: (4, 5),
            sampler: SamplerConfig::default(),
            alert: AlertConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Validate every section and check for pins assigned twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        self.sampler.validate()?;
        self.alert.validate()?;

        let pins = [
            self.buzzer,
            self.pir,
            self.reset_switch,
            self.display.rs,
            self.display.en,
        ];
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..]
                .iter()
                .any(|b| a.port == b.port && a.pin == b.pin)
            {
                return Err(ConfigError::PinConflict);
            }
        }

        let bus_port = self.display.d4.port;
        let bus_mask = self.display.data_mask();
        for pin in [self.buzzer, self.pir, self.reset_switch] {
            if pin.port == bus_port && pin.mask() & bus_mask != 0 {
                return Err(ConfigError::PinConflict);
            }
        }

        let (a, b) = self.diff_channels;
        for channel in [self.alarm_channel, a, b] {
            if channel >= 8 {
                return Err(ConfigError::InvalidSampler);
            }
        }
        Ok(())
    }
}
