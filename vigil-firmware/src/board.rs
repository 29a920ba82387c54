//! LPC1768 board bring-up
//!
//! Hands out drivers for the configured pins. Every pin goes through one
//! [`PinClaims`], so a display line that doubles as an ADC input is caught
//! here rather than showing up as garbage on the screen.

use vigil_core::config::{DisplayHwConfig, PinConfig, SamplerConfig};
use vigil_core::traits::SamplerError;
use vigil_drivers::display::Hd44780;
use vigil_drivers::output::{Buzzer, LevelInput};
use vigil_drivers::sampler::PollingAdc;
use vigil_hal::{DigitalPort, PortPin};
use vigil_hal_lpc17xx::adc::CHANNEL_PINS;
use vigil_hal_lpc17xx::{LpcAdc, Peripherals, PinClaims, PinError, Port, Timer0Delay};

use crate::config::PCLK_HZ;

pub type Display = Hd44780<Port, Timer0Delay>;
pub type PanelBuzzer = Buzzer<PortPin<Port>>;
pub type PanelInput = LevelInput<PortPin<Port>>;
pub type Sampler = PollingAdc<LpcAdc>;

/// Board setup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    Pin(PinError),
    Sampler(SamplerError),
    /// The converter was already handed out
    AdcInUse,
}

impl From<PinError> for BoardError {
    fn from(e: PinError) -> Self {
        BoardError::Pin(e)
    }
}

impl From<SamplerError> for BoardError {
    fn from(e: SamplerError) -> Self {
        BoardError::Sampler(e)
    }
}

/// Board resources not yet handed to a driver
pub struct Board {
    ports: [Port; 5],
    claims: PinClaims,
    adc: Option<LpcAdc>,
    delay: Timer0Delay,
}

impl Board {
    /// Start the delay timer and take ownership of the ports
    pub fn new(p: Peripherals) -> Self {
        Self {
            ports: p.ports,
            claims: PinClaims::new(),
            adc: Some(p.adc),
            delay: p.timer0.into_delay(PCLK_HZ),
        }
    }

    /// Delay handle for the main loop
    pub fn delay(&self) -> Timer0Delay {
        self.delay
    }

    /// HD44780 on D4..D7, RS and EN, all outputs, all low
    pub fn display(&mut self, config: &DisplayHwConfig) -> Result<Display, BoardError> {
        let port = config.d4.port;
        for bit in config.d4.pin..config.d4.pin + 4 {
            self.claims.output(&mut self.ports, &PinConfig::new(port, bit))?;
        }
        self.claims.output(&mut self.ports, &config.rs)?;
        let mut bus = self.claims.output(&mut self.ports, &config.en)?;
        bus.clear_bits(config.data_mask() | config.rs.mask() | config.en.mask());

        #[cfg(feature = "defmt")]
        defmt::debug!("board: display on port {}", port);

        Ok(Hd44780::new(bus, self.delay, config))
    }

    /// Buzzer output, silent
    pub fn buzzer(&mut self, pin: &PinConfig) -> Result<PanelBuzzer, BoardError> {
        let port = self.claims.output(&mut self.ports, pin)?;
        Ok(Buzzer::from_config(PortPin::new(port, pin.pin), pin))
    }

    /// Level input; active-low pins get the pull-up
    pub fn input(&mut self, pin: &PinConfig) -> Result<PanelInput, BoardError> {
        let port = self.claims.input(&mut self.ports, pin)?;
        Ok(LevelInput::from_config(PortPin::new(port, pin.pin), pin))
    }

    /// Polling sampler on `channels`
    ///
    /// Claims each channel's analog pin before the converter routes it.
    pub fn sampler(
        &mut self,
        channels: &[u8],
        config: &SamplerConfig,
    ) -> Result<Sampler, BoardError> {
        for &channel in channels {
            let &(port, pin, _) = CHANNEL_PINS
                .get(channel as usize)
                .ok_or(SamplerError::InvalidChannel(channel))?;
            self.claims.claim(&PinConfig::new(port, pin))?;
        }
        let adc = self.adc.take().ok_or(BoardError::AdcInUse)?;
        Ok(PollingAdc::configure(adc, channels, config)?)
    }
}
