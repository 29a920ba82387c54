//! Raw 32-bit register access

/// Address of one memory-mapped 32-bit register
#[derive(Clone, Copy)]
pub(crate) struct Reg(usize);

impl Reg {
    pub(crate) const fn at(address: usize) -> Self {
        Self(address)
    }

    pub(crate) fn read(self) -> u32 {
        // SAFETY: only constructed with peripheral addresses from the LPC176x map
        unsafe { core::ptr::read_volatile(self.0 as *const u32) }
    }

    pub(crate) fn write(self, value: u32) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(self.0 as *mut u32, value) }
    }

    /// Read-modify-write with interrupts masked
    ///
    /// PINCON, FIODIR and PCONP fields are shared between drivers, so the
    /// read and the write must not be split by a handler touching the same word.
    pub(crate) fn modify(self, f: impl FnOnce(u32) -> u32) {
        cortex_m::interrupt::free(|_| self.write(f(self.read())));
    }
}

/// System control block
pub(crate) mod sc {
    use super::Reg;

    const BASE: usize = 0x400F_C000;

    /// Power control for peripherals
    pub(crate) const PCONP: Reg = Reg::at(BASE + 0xC4);

    pub(crate) const PCONP_PCTIM0: u32 = 1 << 1;
    pub(crate) const PCONP_PCADC: u32 = 1 << 12;
}
