//! Recording doubles shared by the driver tests
//!
//! Port writes and delays go into one [`Trace`] so tests can check the
//! order of line changes against the waits between them.

use std::cell::RefCell;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use vigil_hal::DigitalPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Set(u32),
    Clear(u32),
    WaitNs(u64),
}

#[derive(Debug, Default)]
pub struct Trace {
    /// Current output latch
    pub latch: u32,
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn shared() -> RefCell<Trace> {
        RefCell::new(Trace::default())
    }
}

/// Port half of a shared trace
pub struct TracePort<'a>(pub &'a RefCell<Trace>);

impl DigitalPort for TracePort<'_> {
    fn set_bits(&mut self, mask: u32) {
        let mut t = self.0.borrow_mut();
        t.latch |= mask;
        t.steps.push(Step::Set(mask));
    }

    fn clear_bits(&mut self, mask: u32) {
        let mut t = self.0.borrow_mut();
        t.latch &= !mask;
        t.steps.push(Step::Clear(mask));
    }

    fn read_bits(&self, mask: u32) -> u32 {
        self.0.borrow().latch & mask
    }
}

/// Delay half of a shared trace
pub struct TraceDelay<'a>(pub &'a RefCell<Trace>);

impl DelayNs for TraceDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().steps.push(Step::WaitNs(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.0
            .borrow_mut()
            .steps
            .push(Step::WaitNs(us as u64 * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0
            .borrow_mut()
            .steps
            .push(Step::WaitNs(ms as u64 * 1_000_000));
    }
}
