//! Character display drivers

pub mod hd44780;

#[cfg(test)]
pub(crate) mod sim;

pub use hd44780::{Hd44780, LcdBus, NibbleTransfer, Phase, Register};
