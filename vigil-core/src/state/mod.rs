//! Debounced alert state machine
//!
//! Turns a noisy binary sensor level into a two-state signal. Arming is
//! immediate; disarming needs a run of consecutive quiet observations.

pub mod events;
pub mod machine;

pub use events::{Event, Observation, Transition};
pub use machine::{AlertHooks, AlertMachine, AlertState};
