//! Panel programs
//!
//! Each program owns its drivers and exposes `start()` plus a `step()` that
//! performs one pass of the polling loop. The firmware supplies the loop and
//! the delay between passes; tests call `step()` directly.

pub mod format;
pub mod intruder;
pub mod motion;
pub mod voltmeter;

pub use intruder::{IntruderAlarm, IntruderStatus};
pub use motion::MotionMonitor;
pub use voltmeter::DiffVoltmeter;

/// Shown on the reading line when a conversion fails
pub const SENSOR_FAULT_MSG: &str = "Sensor fault";

#[cfg(test)]
pub(crate) mod testing;
