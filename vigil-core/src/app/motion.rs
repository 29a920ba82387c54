//! PIR motion monitor
//!
//! A PIR output is high while it sees movement and chatters around the
//! edges. The monitor arms on the first high reading and only stands down
//! after a full quiet run, so the buzzer does not flicker.

use crate::config::AlertConfig;
use crate::state::{AlertHooks, AlertMachine, AlertState, Observation};
use crate::traits::{Actuator, CharacterDisplay, DisplayExt};

pub const MOTION_MSG: &str = "Motion Detected!";
pub const IDLE_MSG: &str = "Monitoring...";

/// Display and buzzer, driven by the alert transitions
struct Outputs<D, B> {
    display: D,
    buzzer: B,
}

impl<D: CharacterDisplay, B: Actuator> AlertHooks for Outputs<D, B> {
    fn on_alert_entered(&mut self) {
        self.display.clear();
        self.display.write_str(MOTION_MSG);
        self.buzzer.set_active(true);
    }

    fn on_alert_cleared(&mut self) {
        self.display.clear();
        self.display.write_str(IDLE_MSG);
        self.buzzer.set_active(false);
    }
}

/// Motion monitor program
pub struct MotionMonitor<D, B> {
    outputs: Outputs<D, B>,
    machine: AlertMachine,
}

impl<D: CharacterDisplay, B: Actuator> MotionMonitor<D, B> {
    pub fn new(display: D, buzzer: B, config: &AlertConfig) -> Self {
        Self {
            outputs: Outputs { display, buzzer },
            machine: AlertMachine::from_config(config),
        }
    }

    /// Bring up the display and show the idle message
    pub fn start(&mut self) {
        self.outputs.buzzer.set_active(false);
        self.outputs.display.initialize();
        self.outputs.on_alert_cleared();
    }

    /// One pass: feed the PIR level through the debouncer
    pub fn step(&mut self, motion: bool) -> Observation {
        self.machine.observe_with(motion, &mut self.outputs)
    }

    pub fn state(&self) -> AlertState {
        self.machine.state()
    }

    pub fn display(&self) -> &D {
        &self.outputs.display
    }

    pub fn buzzer(&self) -> &B {
        &self.outputs.buzzer
    }
}
