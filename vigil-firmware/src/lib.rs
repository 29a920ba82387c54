//! Vigil - sensor panel firmware
//!
//! Shared bring-up for the panel binaries. Each binary in `src/bin` runs one
//! program from `vigil_core::app` in a blocking loop:
//!
//! - `motion-alert`: PIR sensor, debounced alert, buzzer
//! - `intruder-alert`: light-beam level on one ADC channel, latched alarm
//!   acknowledged with SW1
//! - `voltmeter`: difference between two ADC channels
//!
//! Pin assignments and timing come from `vigil.toml`, checked by `build.rs`.

#![no_std]

pub mod board;
pub mod config;
