//! Pin connect block: function and pull-mode selection
//!
//! Every pin has a two-bit field in `PINSELn` and in `PINMODEn`. Sixteen
//! pins share one register, two registers per port.

use crate::reg::Reg;

const PINCON_BASE: usize = 0x4002_C000;
const PINSEL0: usize = PINCON_BASE;
const PINMODE0: usize = PINCON_BASE + 0x40;

/// Pin function (`PINSEL` field value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Function {
    Gpio = 0b00,
    Alt1 = 0b01,
    Alt2 = 0b10,
    Alt3 = 0b11,
}

/// On-chip resistor mode (`PINMODE` field value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pull {
    Up = 0b00,
    Repeater = 0b01,
    None = 0b10,
    Down = 0b11,
}

/// Register index and bit shift of the field for `port.pin`
pub const fn field(port: u8, pin: u8) -> (usize, u32) {
    let index = port as usize * 2 + (pin as usize & 0x1F) / 16;
    let shift = ((pin as u32) % 16) * 2;
    (index, shift)
}

fn update(base: usize, port: u8, pin: u8, value: u8) {
    let (index, shift) = field(port, pin);
    Reg::at(base + index * 4)
        .modify(|r| (r & !(0b11 << shift)) | (((value & 0b11) as u32) << shift));
}

/// Select the function of `port.pin`
pub fn set_function(port: u8, pin: u8, function: Function) {
    update(PINSEL0, port, pin, function as u8);
}

/// Select the resistor mode of `port.pin`
pub fn set_pull(port: u8, pin: u8, pull: Pull) {
    update(PINMODE0, port, pin, pull as u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_positions() {
        // P0.2 -> PINSEL0[5:4]
        assert_eq!(field(0, 2), (0, 4));
        // P0.23 -> PINSEL1[15:14]
        assert_eq!(field(0, 23), (1, 14));
        // P1.30 -> PINSEL3[29:28]
        assert_eq!(field(1, 30), (3, 28));
        // P2.12 -> PINSEL4[25:24]
        assert_eq!(field(2, 12), (4, 24));
    }
}
