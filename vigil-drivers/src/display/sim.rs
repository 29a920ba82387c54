//! Reference HD44780 model for the driver tests
//!
//! Replays a recorded port trace, latching a nibble on every falling edge
//! of EN the way the controller does, and tracks the instruction state the
//! panel programs rely on.

use std::string::String;
use std::vec::Vec;

use super::LcdBus;
use crate::testing::{Step, Trace};

/// One latched nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strobe {
    pub nibble: u8,
    pub rs: bool,
}

#[derive(Debug)]
pub struct Hd44780Sim {
    pub strobes: Vec<Strobe>,
    pub four_bit: bool,
    pub two_lines: bool,
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink: bool,
    pub increment: bool,
    pub cleared: bool,
    /// RS never changed while EN was high
    pub rs_stable: bool,
    pub min_enable_high_ns: u64,
    ddram: [u8; 0x80],
    address: u8,
    pending: Option<Strobe>,
}

impl Hd44780Sim {
    fn power_on() -> Self {
        Self {
            strobes: Vec::new(),
            four_bit: false,
            two_lines: false,
            display_on: false,
            cursor_on: false,
            blink: false,
            increment: true,
            cleared: false,
            rs_stable: true,
            min_enable_high_ns: u64::MAX,
            ddram: [b' '; 0x80],
            address: 0,
            pending: None,
        }
    }

    pub fn replay(trace: &Trace, bus: &LcdBus) -> Self {
        let mut sim = Self::power_on();
        let mut latch = 0u32;
        let mut high_since: Option<(u64, bool)> = None;
        let mut elapsed = 0u64;

        for step in &trace.steps {
            let before = latch;
            match *step {
                Step::Set(mask) => latch |= mask,
                Step::Clear(mask) => latch &= !mask,
                Step::WaitNs(ns) => elapsed += ns,
            }
            let rs = latch & bus.rs_mask != 0;
            let en_was = before & bus.en_mask != 0;
            let en_now = latch & bus.en_mask != 0;

            if let Some((_, rs_at_rise)) = high_since {
                if en_now && rs != rs_at_rise {
                    sim.rs_stable = false;
                }
            }
            if !en_was && en_now {
                high_since = Some((elapsed, rs));
            } else if en_was && !en_now {
                if let Some((rose, rs_at_rise)) = high_since.take() {
                    sim.min_enable_high_ns = sim.min_enable_high_ns.min(elapsed - rose);
                    if rs != rs_at_rise {
                        sim.rs_stable = false;
                    }
                }
                let nibble = ((before & bus.data_mask()) >> bus.data_shift) as u8;
                sim.latch(Strobe { nibble, rs });
            }
        }
        sim
    }

    /// Visible text of `row`, trailing blanks trimmed
    pub fn line(&self, row: usize) -> String {
        let start = row * 0x40;
        let text: String = self.ddram[start..start + 16]
            .iter()
            .map(|&b| b as char)
            .collect();
        String::from(text.trim_end())
    }

    fn latch(&mut self, strobe: Strobe) {
        self.strobes.push(strobe);
        if !self.four_bit {
            // D0..D3 are tied low in 8-bit mode
            self.execute(strobe.nibble << 4, strobe.rs);
            return;
        }
        match self.pending.take() {
            None => self.pending = Some(strobe),
            Some(upper) => self.execute(upper.nibble << 4 | strobe.nibble, upper.rs),
        }
    }

    fn execute(&mut self, byte: u8, rs: bool) {
        if rs {
            self.ddram[self.address as usize] = byte;
            self.address = if self.increment {
                (self.address + 1) & 0x7F
            } else {
                self.address.wrapping_sub(1) & 0x7F
            };
            return;
        }

        if byte & 0x80 != 0 {
            self.address = byte & 0x7F;
        } else if byte & 0x40 != 0 {
            // CGRAM address, unused
        } else if byte & 0x20 != 0 {
            self.four_bit = byte & 0x10 == 0;
            self.two_lines = byte & 0x08 != 0;
        } else if byte & 0x10 != 0 {
            // cursor/display shift, unused
        } else if byte & 0x08 != 0 {
            self.display_on = byte & 0x04 != 0;
            self.cursor_on = byte & 0x02 != 0;
            self.blink = byte & 0x01 != 0;
        } else if byte & 0x04 != 0 {
            self.increment = byte & 0x02 != 0;
        } else if byte & 0x02 != 0 {
            self.address = 0;
        } else if byte & 0x01 != 0 {
            self.ddram = [b' '; 0x80];
            self.address = 0;
            self.increment = true;
            self.cleared = true;
        }
    }
}
