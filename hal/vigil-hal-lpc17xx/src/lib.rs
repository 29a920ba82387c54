//! LPC17xx-specific HAL for the sensor panel firmware
//!
//! This crate provides LPC176x implementations of the shared `vigil-hal`
//! traits, written directly against the memory-mapped registers:
//!
//! - GPIO ports (`FIOSET`/`FIOCLR`/`FIOPIN`, implements `DigitalPort`)
//! - Pin function and pull-mode selection (`PINCON`)
//! - AD0 converter access (implements `AdcRegisters`)
//! - TIMER0 based blocking delay (implements `embedded_hal::delay::DelayNs`)
//! - Pin claims for config-driven setup

#![no_std]

use core::sync::atomic::{AtomicBool, Ordering};

pub mod adc;
pub mod delay;
pub mod gpio;
pub mod pincon;
pub mod pins;
mod reg;

pub use adc::LpcAdc;
pub use delay::Timer0Delay;
pub use gpio::Port;
pub use pins::{PinClaims, PinError};

/// Peripheral handles used by the panel firmware
pub struct Peripherals {
    pub ports: [Port; 5],
    pub adc: LpcAdc,
    pub timer0: delay::Timer0,
}

static TAKEN: AtomicBool = AtomicBool::new(false);

impl Peripherals {
    /// Take the peripherals; returns `None` on every call after the first
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self {
            ports: [Port::new(0), Port::new(1), Port::new(2), Port::new(3), Port::new(4)],
            adc: LpcAdc::new(),
            timer0: delay::Timer0::new(),
        })
    }
}
