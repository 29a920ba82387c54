//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vigil-core on top of the register-level traits in vigil-hal:
//!
//! - HD44780 character display on a bit-banged 4-bit bus
//! - Polling ADC sampler with a bounded done-flag wait
//! - Buzzer output and level-sensed inputs (PIR, push switch)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod output;
pub mod sampler;

#[cfg(test)]
mod testing;
