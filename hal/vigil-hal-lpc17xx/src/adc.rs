//! AD0 register access
//!
//! Only the register plumbing lives here; the conversion protocol is the
//! sampler driver's.

use vigil_hal::adc::CHANNEL_COUNT;
use vigil_hal::AdcRegisters;

use crate::pincon::{self, Function, Pull};
use crate::reg::{sc, Reg};

const ADC_BASE: usize = 0x4003_4000;
const ADCR: Reg = Reg::at(ADC_BASE);
const ADGDR: Reg = Reg::at(ADC_BASE + 0x04);

/// Pin and function carrying each AD0 channel
pub const CHANNEL_PINS: [(u8, u8, Function); CHANNEL_COUNT as usize] = [
    (0, 23, Function::Alt1),
    (0, 24, Function::Alt1),
    (0, 25, Function::Alt1),
    (0, 26, Function::Alt1),
    (1, 30, Function::Alt3),
    (1, 31, Function::Alt3),
    (0, 3, Function::Alt2),
    (0, 2, Function::Alt2),
];

/// AD0 register block
pub struct LpcAdc {
    _private: (),
}

impl LpcAdc {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

impl AdcRegisters for LpcAdc {
    fn power_up(&mut self) {
        sc::PCONP.modify(|p| p | sc::PCONP_PCADC);
    }

    fn route_channel(&mut self, channel: u8) -> bool {
        let Some(&(port, pin, function)) = CHANNEL_PINS.get(channel as usize) else {
            return false;
        };
        pincon::set_function(port, pin, function);
        // Analog inputs want neither pull resistor
        pincon::set_pull(port, pin, Pull::None);
        true
    }

    fn control(&self) -> u32 {
        ADCR.read()
    }

    fn set_control(&mut self, value: u32) {
        ADCR.write(value);
    }

    fn global_data(&mut self) -> u32 {
        ADGDR.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_pins_unique() {
        for (i, a) in CHANNEL_PINS.iter().enumerate() {
            for b in &CHANNEL_PINS[i + 1..] {
                assert!((a.0, a.1) != (b.0, b.1));
            }
        }
    }

    #[test]
    fn test_differential_pair_on_port1() {
        assert_eq!(CHANNEL_PINS[4], (1, 30, Function::Alt3));
        assert_eq!(CHANNEL_PINS[5], (1, 31, Function::Alt3));
    }
}
