//! Board-agnostic core logic for the sensor panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Service traits (character display, analog sampler, actuator)
//! - Debounced alert state machine
//! - Panel programs (motion monitor, intruder alarm, voltmeter)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

// proptest expands to paths under `::std`
#[cfg(test)]
extern crate std;

pub mod app;
pub mod config;
pub mod state;
pub mod traits;
