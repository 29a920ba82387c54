//! Events fed to the alert machine and what it reports back

use super::machine::AlertState;

/// Inputs to the alert machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Raw sensor reported a trigger this cycle
    Triggered,
    /// Raw sensor was quiet this cycle
    Quiet,
    /// Operator acknowledged the alert
    Acknowledge,
}

impl From<bool> for Event {
    fn from(triggered: bool) -> Self {
        if triggered {
            Event::Triggered
        } else {
            Event::Quiet
        }
    }
}

/// State change produced by one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// No state change
    None,
    /// Quiescent -> Alert
    Entered,
    /// Alert -> Quiescent after the persistence run
    Cleared,
    /// Alert -> Quiescent forced by the operator
    Acknowledged,
}

/// Result of feeding one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    /// State after the event
    pub state: AlertState,
    pub transition: Transition,
}

impl Observation {
    /// Whether the event changed the state
    pub fn transitioned(&self) -> bool {
        self.transition != Transition::None
    }
}
