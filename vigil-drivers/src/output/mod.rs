//! Discrete I/O: buzzer output and level-sensed inputs

pub mod buzzer;
pub mod input;

pub use buzzer::Buzzer;
pub use input::LevelInput;
