//! GPIO port and pin abstractions
//!
//! The panel hardware is driven through whole-port registers: a write to the
//! set register raises every bit in the mask, a write to the clear register
//! lowers them, and both leave the other bits alone. [`DigitalPort`] mirrors
//! that model. Single-bit pins are layered on top with [`PortPin`].

/// A fixed-width digital I/O port
///
/// Each call must be atomic with respect to the port: bits outside `mask`
/// are never disturbed. Direction (input/output) is fixed by board setup
/// before the port is handed to a driver.
pub trait DigitalPort {
    /// Drive every bit in `mask` high
    fn set_bits(&mut self, mask: u32);

    /// Drive every bit in `mask` low
    fn clear_bits(&mut self, mask: u32);

    /// Read the current level of the bits in `mask`
    ///
    /// Bits outside `mask` are returned as zero.
    fn read_bits(&self, mask: u32) -> u32;
}

impl<P: DigitalPort + ?Sized> DigitalPort for &mut P {
    fn set_bits(&mut self, mask: u32) {
        (**self).set_bits(mask);
    }

    fn clear_bits(&mut self, mask: u32) {
        (**self).clear_bits(mask);
    }

    fn read_bits(&self, mask: u32) -> u32 {
        (**self).read_bits(mask)
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// One bit of a [`DigitalPort`] used as a pin
#[derive(Debug)]
pub struct PortPin<P> {
    port: P,
    mask: u32,
}

impl<P: DigitalPort> PortPin<P> {
    /// Wrap bit `bit` (0-31) of `port`
    pub fn new(port: P, bit: u8) -> Self {
        Self {
            port,
            mask: 1 << (bit & 0x1F),
        }
    }

    /// Bit mask this pin occupies on its port
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Give the port back
    pub fn release(self) -> P {
        self.port
    }
}

impl<P: DigitalPort> OutputPin for PortPin<P> {
    fn set_high(&mut self) {
        self.port.set_bits(self.mask);
    }

    fn set_low(&mut self) {
        self.port.clear_bits(self.mask);
    }

    fn is_set_high(&self) -> bool {
        self.port.read_bits(self.mask) != 0
    }
}

impl<P: DigitalPort> InputPin for PortPin<P> {
    fn is_high(&self) -> bool {
        self.port.read_bits(self.mask) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(u32);

    impl DigitalPort for Latch {
        fn set_bits(&mut self, mask: u32) {
            self.0 |= mask;
        }

        fn clear_bits(&mut self, mask: u32) {
            self.0 &= !mask;
        }

        fn read_bits(&self, mask: u32) -> u32 {
            self.0 & mask
        }
    }

    #[test]
    fn test_port_pin_only_touches_its_bit() {
        let mut port = Latch(0b1000_0001);
        let mut pin = PortPin::new(&mut port, 4);

        pin.set_high();
        assert!(pin.is_set_high());
        pin.set_low();
        assert!(pin.is_set_low());

        assert_eq!(port.0, 0b1000_0001);
    }

    #[test]
    fn test_toggle_and_set_state() {
        let mut pin = PortPin::new(Latch(0), 17);
        assert_eq!(pin.mask(), 1 << 17);

        pin.toggle();
        assert!(pin.is_high());
        pin.toggle();
        assert!(pin.is_low());

        pin.set_state(true);
        assert_eq!(pin.release().0, 1 << 17);
    }
}
