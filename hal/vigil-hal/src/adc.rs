//! Successive-approximation ADC register block
//!
//! The layout follows the LPC17xx `AD0` peripheral: one control register
//! (`ADCR`) and one global data register (`ADGDR`).
//!
//! ```text
//! ADCR   31..27  26..24  21   15..8    7..0
//!        -       START   PDN  CLKDIV   SEL (one bit per channel)
//!
//! ADGDR  31    30       26..24  15..4
//!        DONE  OVERRUN  CHN     RESULT
//! ```

/// Number of analog input channels on the converter
pub const CHANNEL_COUNT: u8 = 8;

/// Channel-select field of `ADCR`
pub const CR_SEL_MASK: u32 = 0xFF;
/// Clock divider field of `ADCR`
pub const CR_CLKDIV_SHIFT: u32 = 8;
pub const CR_CLKDIV_MASK: u32 = 0xFF << CR_CLKDIV_SHIFT;
/// Converter operational (power-down bit cleared means powered down)
pub const CR_PDN: u32 = 1 << 21;
/// Start field of `ADCR`
pub const CR_START_SHIFT: u32 = 24;
pub const CR_START_MASK: u32 = 0x7 << CR_START_SHIFT;
/// Start value: convert now
pub const CR_START_NOW: u32 = 0x1 << CR_START_SHIFT;

/// Conversion-done flag of `ADGDR`
pub const GDR_DONE: u32 = 1 << 31;
/// Channel the result belongs to
pub const GDR_CHN_SHIFT: u32 = 24;
pub const GDR_CHN_MASK: u32 = 0x7 << GDR_CHN_SHIFT;
/// 12-bit result field of `ADGDR`
pub const GDR_RESULT_SHIFT: u32 = 4;
pub const GDR_RESULT_MASK: u32 = 0xFFF;

/// Register-level access to the ADC
///
/// Implementations do nothing beyond moving bits to and from hardware; the
/// conversion protocol lives in the sampler driver.
pub trait AdcRegisters {
    /// Power the ADC block (peripheral clock gate)
    fn power_up(&mut self);

    /// Route the pin carrying `channel` to its analog function
    ///
    /// Returns `false` if the channel has no pin on this board.
    fn route_channel(&mut self, channel: u8) -> bool;

    /// Read the control register
    fn control(&self) -> u32;

    /// Write the control register
    fn set_control(&mut self, value: u32);

    /// Read the global data register
    fn global_data(&mut self) -> u32;
}

impl<R: AdcRegisters + ?Sized> AdcRegisters for &mut R {
    fn power_up(&mut self) {
        (**self).power_up();
    }

    fn route_channel(&mut self, channel: u8) -> bool {
        (**self).route_channel(channel)
    }

    fn control(&self) -> u32 {
        (**self).control()
    }

    fn set_control(&mut self, value: u32) {
        (**self).set_control(value);
    }

    fn global_data(&mut self) -> u32 {
        (**self).global_data()
    }
}

/// Extract the 12-bit result from a global data register value
pub const fn result_field(gdr: u32) -> u16 {
    ((gdr >> GDR_RESULT_SHIFT) & GDR_RESULT_MASK) as u16
}

/// Extract the channel number from a global data register value
pub const fn channel_field(gdr: u32) -> u8 {
    ((gdr & GDR_CHN_MASK) >> GDR_CHN_SHIFT) as u8
}
