//! HD44780 character display on a bit-banged 4-bit bus
//!
//! Every byte is moved as nibbles on D4..D7, upper nibble first. A nibble
//! transfer is:
//!
//! ```text
//! RS  ──<  mode (held)                          >──
//! D   ──<  nibble                               >──
//! EN  ____/‾‾‾‾ pulse ‾‾‾‾\________ settle _________
//! ```
//!
//! The bus is write-only. R/W is strapped low and the busy flag is never
//! read, so correctness rests on the waits in [`DisplayTiming`].

use embedded_hal::delay::DelayNs;
use vigil_core::config::{DisplayHwConfig, DisplayTiming, InitStyle};
use vigil_core::traits::display::command;
use vigil_core::traits::CharacterDisplay;
use vigil_hal::DigitalPort;

/// Power-on sequence, handshake sent as full bytes
///
/// The nibbles of `0x33` are one transfer settle apart, not 4.1 ms.
const PAIRED_INIT: [u8; 6] = [
    0x33,
    0x32,
    command::FUNCTION_4BIT_2LINE,
    command::DISPLAY_ON,
    command::ENTRY_INCREMENT,
    command::CLEAR,
];

/// Power-on sequence, handshake sent as lone upper nibbles
const NIBBLE_INIT: [u8; 9] = [
    command::INIT_8BIT,
    command::INIT_8BIT,
    command::INIT_8BIT,
    command::INIT_4BIT,
    command::FUNCTION_4BIT_2LINE,
    command::DISPLAY_ON,
    command::ENTRY_INCREMENT,
    command::CLEAR,
    command::SET_DDRAM,
];

/// Level of the register-select line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// RS low: instruction register
    Command,
    /// RS high: data register
    Data,
}

/// Whether the bus-width handshake is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on sequence; the controller may still be in 8-bit mode
    Handshake,
    /// Controller is in 4-bit mode
    Normal,
}

/// Nibbles making up one byte write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NibbleTransfer {
    /// Upper nibble only (8-bit function set during the handshake)
    Single(u8),
    /// Upper nibble, then lower nibble
    Pair(u8, u8),
}

impl NibbleTransfer {
    /// Split `byte` for the given register and phase
    ///
    /// Only the handshake function-sets `0x30` and `0x20`, sent to the
    /// instruction register during [`Phase::Handshake`], go out as a single
    /// nibble. Everything else is a pair.
    pub const fn plan(byte: u8, register: Register, phase: Phase) -> Self {
        let handshake = matches!(phase, Phase::Handshake)
            && matches!(register, Register::Command)
            && (byte == command::INIT_8BIT || byte == command::INIT_4BIT);
        if handshake {
            NibbleTransfer::Single(byte >> 4)
        } else {
            NibbleTransfer::Pair(byte >> 4, byte & 0x0F)
        }
    }

    /// Number of enable strobes this write takes
    pub const fn strobes(&self) -> usize {
        match self {
            NibbleTransfer::Single(_) => 1,
            NibbleTransfer::Pair(_, _) => 2,
        }
    }
}

/// Line assignment on the display port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdBus {
    /// Bit of D4; D5..D7 follow
    pub data_shift: u8,
    pub rs_mask: u32,
    pub en_mask: u32,
}

impl LcdBus {
    pub const fn data_mask(&self) -> u32 {
        0x0F << self.data_shift
    }
}

impl From<&DisplayHwConfig> for LcdBus {
    fn from(config: &DisplayHwConfig) -> Self {
        Self {
            data_shift: config.d4.pin,
            rs_mask: config.rs.mask(),
            en_mask: config.en.mask(),
        }
    }
}

/// HD44780 driver over a [`DigitalPort`]
pub struct Hd44780<P, D> {
    port: P,
    delay: D,
    bus: LcdBus,
    timing: DisplayTiming,
    init_style: InitStyle,
}

impl<P: DigitalPort, D: DelayNs> Hd44780<P, D> {
    /// Create a driver from the board configuration
    ///
    /// The port must already have the bus lines set as outputs.
    pub fn new(port: P, delay: D, config: &DisplayHwConfig) -> Self {
        Self {
            port,
            delay,
            bus: LcdBus::from(config),
            timing: config.timing,
            init_style: config.init_style,
        }
    }

    /// Write one byte and wait the settle time for it
    pub fn write(&mut self, byte: u8, register: Register, phase: Phase) {
        let transfer = NibbleTransfer::plan(byte, register, phase);
        match transfer {
            NibbleTransfer::Single(upper) => {
                debug_assert_eq!(byte & 0x0F, 0, "lone nibble would drop low bits");
                self.strobe(upper, register);
            }
            NibbleTransfer::Pair(upper, lower) => {
                self.strobe(upper, register);
                self.strobe(lower, register);
            }
        }

        let settle = match register {
            Register::Data => self.timing.data_settle_us,
            Register::Command if command::is_slow(byte) => self.timing.clear_settle_us,
            // The 8-bit mode handshake needs the long wait between strobes
            Register::Command if matches!(transfer, NibbleTransfer::Single(_)) => {
                self.timing.clear_settle_us
            }
            Register::Command => self.timing.command_settle_us,
        };
        self.delay.delay_us(settle);
    }

    /// Put one nibble on the bus and latch it
    fn strobe(&mut self, nibble: u8, register: Register) {
        // RS is driven from the caller's mode on every strobe, before EN rises
        match register {
            Register::Command => self.port.clear_bits(self.bus.rs_mask),
            Register::Data => self.port.set_bits(self.bus.rs_mask),
        }
        self.port.clear_bits(self.bus.data_mask());
        self.port
            .set_bits(((nibble & 0x0F) as u32) << self.bus.data_shift);

        self.port.set_bits(self.bus.en_mask);
        self.delay.delay_us(self.timing.enable_pulse_us);
        self.port.clear_bits(self.bus.en_mask);
        self.delay.delay_us(self.timing.transfer_settle_us);
    }
}

impl<P: DigitalPort, D: DelayNs> CharacterDisplay for Hd44780<P, D> {
    fn initialize(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("hd44780: init ({})", self.init_style);

        // EN idles low before the first strobe
        self.port.clear_bits(self.bus.en_mask);
        self.delay.delay_ms(self.timing.power_up_ms);

        let sequence: &[u8] = match self.init_style {
            InitStyle::Paired => &PAIRED_INIT,
            InitStyle::Nibbles => &NIBBLE_INIT,
        };
        for &cmd in sequence {
            self.write(cmd, Register::Command, Phase::Handshake);
        }
    }

    fn write_command(&mut self, command: u8) {
        self.write(command, Register::Command, Phase::Normal);
    }

    fn write_data(&mut self, data: u8) {
        self.write(data, Register::Data, Phase::Normal);
    }
}
