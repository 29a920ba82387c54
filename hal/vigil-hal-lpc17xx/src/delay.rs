//! Blocking delay on TIMER0
//!
//! The prescaler is set so the timer counter ticks once per microsecond;
//! waits are measured with wrapping subtraction so counter rollover is
//! harmless. The counter is only ever read after start, so delay handles
//! are `Copy` and any number of drivers can hold one.

use embedded_hal::delay::DelayNs;

use crate::reg::{sc, Reg};

const TIMER0_BASE: usize = 0x4000_4000;
const TCR: Reg = Reg::at(TIMER0_BASE + 0x04);
const TC: Reg = Reg::at(TIMER0_BASE + 0x08);
const PR: Reg = Reg::at(TIMER0_BASE + 0x0C);

const TCR_ENABLE: u32 = 1 << 0;
const TCR_RESET: u32 = 1 << 1;

/// Unconfigured TIMER0
pub struct Timer0 {
    _private: (),
}

impl Timer0 {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }

    /// Start the timer as a microsecond delay source
    pub fn into_delay(self, pclk_hz: u32) -> Timer0Delay {
        Timer0Delay::new(self, pclk_hz)
    }
}

/// Microsecond delay provider on a running TIMER0
#[derive(Clone, Copy)]
pub struct Timer0Delay {
    _private: (),
}

/// Prescale register value for a 1 MHz tick
pub const fn prescaler(pclk_hz: u32) -> u32 {
    let ticks_per_us = pclk_hz / 1_000_000;
    if ticks_per_us == 0 {
        0
    } else {
        ticks_per_us - 1
    }
}

impl Timer0Delay {
    /// Power, prescale and start the timer
    pub fn new(timer: Timer0, pclk_hz: u32) -> Self {
        let Timer0 { _private } = timer;
        sc::PCONP.modify(|p| p | sc::PCONP_PCTIM0);
        TCR.write(TCR_RESET);
        PR.write(prescaler(pclk_hz));
        TCR.write(TCR_ENABLE);
        Self { _private }
    }

    fn now(&self) -> u32 {
        TC.read()
    }
}

impl DelayNs for Timer0Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        let start = self.now();
        while self.now().wrapping_sub(start) < us {}
    }
}
