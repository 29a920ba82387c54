//! GPIO buzzer output
//!
//! A piezo buzzer (or alarm LED) switched by one pin, directly or through a
//! transistor.

use vigil_core::config::PinConfig;
use vigil_core::traits::Actuator;
use vigil_hal::OutputPin;

/// GPIO buzzer
///
/// The pin can be active-high (default) or active-low.
pub struct Buzzer<P> {
    pin: P,
    /// If true, buzzer ON = pin LOW
    inverted: bool,
    /// Current logical state (true = sounding)
    on: bool,
}

impl<P: OutputPin> Buzzer<P> {
    /// Create a buzzer; it starts silent
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut buzzer = Self {
            pin,
            inverted,
            on: false,
        };
        buzzer.set_active(false);
        buzzer
    }

    /// Create a buzzer with the polarity from its pin config
    pub fn from_config(pin: P, config: &PinConfig) -> Self {
        Self::new(pin, config.inverted)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Actuator for Buzzer<P> {
    fn set_active(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }

    fn is_active(&self) -> bool {
        self.on
    }
}
