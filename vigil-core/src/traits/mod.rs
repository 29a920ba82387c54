//! Hardware abstraction traits
//!
//! These traits define the interface between the panel programs and the
//! concrete drivers in `vigil-drivers`.

pub mod actuator;
pub mod display;
pub mod sampler;

pub use actuator::Actuator;
pub use display::{CharacterDisplay, DisplayExt};
pub use sampler::{AdcSample, AnalogSampler, SamplerError};
