//! Character display trait
//!
//! The display is write-only: nothing is read back from the controller, so
//! none of these calls can report a failure. A disconnected panel looks
//! exactly like a working one to the caller.

/// HD44780 instruction bytes used by the panel programs
pub mod command {
    /// Clear display, cursor home
    pub const CLEAR: u8 = 0x01;
    /// Cursor home, display shift reset
    pub const RETURN_HOME: u8 = 0x02;
    /// Entry mode: increment, no shift
    pub const ENTRY_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, 2 lines, 5x7 font
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR in the address)
    pub const SET_DDRAM: u8 = 0x80;

    /// Function set 8-bit, sent as a lone upper nibble during the handshake
    pub const INIT_8BIT: u8 = 0x30;
    /// Function set 4-bit, sent as a lone upper nibble during the handshake
    pub const INIT_4BIT: u8 = 0x20;

    /// Whether `cmd` needs the long clear/home execution time
    pub const fn is_slow(cmd: u8) -> bool {
        cmd == CLEAR || cmd & 0xFE == RETURN_HOME
    }
}

/// Visible columns per line
pub const LINE_WIDTH: usize = 16;

/// Number of lines
pub const LINE_COUNT: u8 = 2;

/// DDRAM address of the first column of each line
const LINE_OFFSETS: [u8; LINE_COUNT as usize] = [0x00, 0x40];

/// Trait for character displays
pub trait CharacterDisplay {
    /// Run the power-up initialization sequence
    fn initialize(&mut self);

    /// Send an instruction byte
    fn write_command(&mut self, command: u8);

    /// Send a character byte
    fn write_data(&mut self, data: u8);

    /// Send each byte as a character, in order
    fn write_string(&mut self, text: &[u8]) {
        for &byte in text {
            self.write_data(byte);
        }
    }
}

impl<D: CharacterDisplay + ?Sized> CharacterDisplay for &mut D {
    fn initialize(&mut self) {
        (**self).initialize();
    }

    fn write_command(&mut self, command: u8) {
        (**self).write_command(command);
    }

    fn write_data(&mut self, data: u8) {
        (**self).write_data(data);
    }

    fn write_string(&mut self, text: &[u8]) {
        (**self).write_string(text);
    }
}

/// Helper trait for cursor addressing and line output
pub trait DisplayExt: CharacterDisplay {
    /// Clear the screen and home the cursor
    fn clear(&mut self) {
        self.write_command(command::CLEAR);
    }

    /// Move the cursor to `(row, col)`, both zero based
    ///
    /// Out-of-range rows wrap onto the available lines.
    fn set_cursor(&mut self, row: u8, col: u8) {
        let offset = LINE_OFFSETS[(row % LINE_COUNT) as usize];
        self.write_command(command::SET_DDRAM | (offset + (col & 0x3F)));
    }

    /// Write text at the cursor
    fn write_str(&mut self, text: &str) {
        self.write_string(text.as_bytes());
    }

    /// Write text starting at `(row, col)`
    fn print_at(&mut self, row: u8, col: u8, text: &str) {
        self.set_cursor(row, col);
        self.write_str(text);
    }

    /// Replace a whole line
    ///
    /// The text is cut at [`LINE_WIDTH`] and padded with spaces so that
    /// nothing from the previous contents survives.
    fn print_line(&mut self, row: u8, text: &str) {
        self.set_cursor(row, 0);
        let bytes = text.as_bytes();
        let len = bytes.len().min(LINE_WIDTH);
        self.write_string(&bytes[..len]);
        for _ in len..LINE_WIDTH {
            self.write_data(b' ');
        }
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay + ?Sized> DisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Cmd(u8),
        Data(u8),
    }

    #[derive(Default)]
    struct Log(Vec<Op, 64>);

    impl CharacterDisplay for Log {
        fn initialize(&mut self) {}

        fn write_command(&mut self, command: u8) {
            self.0.push(Op::Cmd(command)).unwrap();
        }

        fn write_data(&mut self, data: u8) {
            self.0.push(Op::Data(data)).unwrap();
        }
    }

    #[test]
    fn test_set_cursor_addresses() {
        let mut log = Log::default();
        log.set_cursor(0, 0);
        log.set_cursor(1, 0);
        log.set_cursor(1, 5);
        assert_eq!(log.0.as_slice(), &[Op::Cmd(0x80), Op::Cmd(0xC0), Op::Cmd(0xC5)]);
    }

    #[test]
    fn test_print_line_pads_to_width() {
        let mut log = Log::default();
        log.print_line(1, "1.65");
        assert_eq!(log.0[0], Op::Cmd(0xC0));
        assert_eq!(log.0.len(), 1 + LINE_WIDTH);
        assert_eq!(log.0[1], Op::Data(b'1'));
        assert_eq!(log.0[4], Op::Data(b'5'));
        assert!(log.0[5..].iter().all(|op| *op == Op::Data(b' ')));
    }

    #[test]
    fn test_print_line_truncates() {
        let mut log = Log::default();
        log.print_line(0, "0123456789ABCDEFGHIJ");
        assert_eq!(log.0.len(), 1 + LINE_WIDTH);
        assert_eq!(log.0[LINE_WIDTH], Op::Data(b'F'));
    }

    #[test]
    fn test_slow_commands() {
        assert!(command::is_slow(0x01));
        assert!(command::is_slow(0x02));
        assert!(command::is_slow(0x03));
        assert!(!command::is_slow(0x06));
        assert!(!command::is_slow(0x80));
    }
}
