//! Fast GPIO ports
//!
//! `FIOSET` and `FIOCLR` only act on the bits written as one, so several
//! drivers can share a port without read-modify-write races. Direction
//! (`FIODIR`) is changed with a read-modify-write and belongs in board
//! setup, before the port is shared.

use vigil_hal::DigitalPort;

use crate::reg::Reg;

const GPIO_BASE: usize = 0x2009_C000;
const PORT_STRIDE: usize = 0x20;

const FIODIR: usize = 0x00;
const FIOPIN: usize = 0x14;
const FIOSET: usize = 0x18;
const FIOCLR: usize = 0x1C;

/// Handle to one GPIO port (0-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Port {
    number: u8,
}

impl Port {
    pub(crate) const fn new(number: u8) -> Self {
        Self { number }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    fn reg(&self, offset: usize) -> Reg {
        Reg::at(GPIO_BASE + self.number as usize * PORT_STRIDE + offset)
    }

    /// Make the pins in `mask` outputs
    pub fn set_output(&mut self, mask: u32) {
        self.reg(FIODIR).modify(|dir| dir | mask);
    }

    /// Make the pins in `mask` inputs
    pub fn set_input(&mut self, mask: u32) {
        self.reg(FIODIR).modify(|dir| dir & !mask);
    }
}

impl DigitalPort for Port {
    fn set_bits(&mut self, mask: u32) {
        self.reg(FIOSET).write(mask);
    }

    fn clear_bits(&mut self, mask: u32) {
        self.reg(FIOCLR).write(mask);
    }

    fn read_bits(&self, mask: u32) -> u32 {
        self.reg(FIOPIN).read() & mask
    }
}
