//! Vigil Hardware Abstraction Layer
//!
//! This crate defines the register-level hardware traits that the drivers are
//! written against. Chip-specific crates implement them on top of real MMIO,
//! tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Programs (vigil-core::app)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Drivers (vigil-drivers)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vigil-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vigil-hal-lpc17xx                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalPort`] - Whole-port set/clear/read by bit mask
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Single-bit digital I/O
//! - [`adc::AdcRegisters`] - Successive-approximation ADC register block

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::AdcRegisters;
pub use gpio::{DigitalPort, InputPin, OutputPin, PortPin};
