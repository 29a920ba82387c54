//! Pin claims for config-driven hardware setup
//!
//! Pin assignments come from `vigil.toml`, so the compiler cannot stop two
//! functions landing on one pin. Board setup claims every pin through
//! [`PinClaims`] and fails on the second claim instead.

use vigil_core::config::{PinConfig, MAX_PORT};

use crate::gpio::Port;
use crate::pincon::{self, Function, Pull};

/// Error when claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Port number out of range (0-4 valid)
    InvalidPin,
    /// Pin already claimed
    AlreadyTaken,
}

/// Record of claimed pins, one bitmask per port
#[derive(Debug, Default)]
pub struct PinClaims {
    taken: [u32; MAX_PORT as usize + 1],
}

impl PinClaims {
    pub const fn new() -> Self {
        Self {
            taken: [0; MAX_PORT as usize + 1],
        }
    }

    /// Claim every bit of `mask` on `port`
    pub fn claim_mask(&mut self, port: u8, mask: u32) -> Result<(), PinError> {
        let taken = self
            .taken
            .get_mut(port as usize)
            .ok_or(PinError::InvalidPin)?;
        if *taken & mask != 0 {
            return Err(PinError::AlreadyTaken);
        }
        *taken |= mask;
        Ok(())
    }

    /// Claim one pin
    pub fn claim(&mut self, pin: &PinConfig) -> Result<(), PinError> {
        self.claim_mask(pin.port, pin.mask())
    }

    pub fn is_taken(&self, pin: &PinConfig) -> bool {
        self.taken
            .get(pin.port as usize)
            .is_some_and(|t| t & pin.mask() != 0)
    }

    /// Claim a pin, switch it to GPIO and make it an output
    pub fn output(&mut self, ports: &mut [Port; 5], pin: &PinConfig) -> Result<Port, PinError> {
        self.claim(pin)?;
        pincon::set_function(pin.port, pin.pin, Function::Gpio);
        let mut port = ports[pin.port as usize];
        port.set_output(pin.mask());
        Ok(port)
    }

    /// Claim a pin, switch it to GPIO and make it an input
    ///
    /// Active-low inputs get the on-chip pull-up so an open switch reads
    /// inactive.
    pub fn input(&mut self, ports: &mut [Port; 5], pin: &PinConfig) -> Result<Port, PinError> {
        self.claim(pin)?;
        pincon::set_function(pin.port, pin.pin, Function::Gpio);
        let pull = if pin.inverted { Pull::Up } else { Pull::None };
        pincon::set_pull(pin.port, pin.pin, pull);
        let mut port = ports[pin.port as usize];
        port.set_input(pin.mask());
        Ok(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_claim_rejected() {
        let mut claims = PinClaims::new();
        let rs = PinConfig::new(0, 27);
        claims.claim(&rs).unwrap();
        assert!(claims.is_taken(&rs));
        assert_eq!(claims.claim(&rs), Err(PinError::AlreadyTaken));
        assert_eq!(claims.claim_mask(0, 0xF << 25), Err(PinError::AlreadyTaken));
        assert!(claims.claim(&PinConfig::new(1, 27)).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut claims = PinClaims::new();
        assert_eq!(claims.claim_mask(5, 1), Err(PinError::InvalidPin));
    }
}
