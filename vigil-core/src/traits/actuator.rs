//! Binary actuator trait (buzzer, alarm LED)

/// Trait for on/off outputs
pub trait Actuator {
    /// Turn the output on or off
    fn set_active(&mut self, on: bool);

    /// Check if the output is currently on
    fn is_active(&self) -> bool;
}
