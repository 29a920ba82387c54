//! Analog sampler drivers

pub mod polling_adc;

pub use polling_adc::PollingAdc;
