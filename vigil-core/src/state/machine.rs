//! State machine definition
//!
//! Quiescent -> Alert on a single trigger. Alert -> Quiescent only after
//! `persistence` consecutive quiet observations; any trigger in between
//! restarts the run. An operator acknowledgement bypasses the run.

use super::events::{Event, Observation, Transition};
use crate::config::AlertConfig;

/// Alert states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertState {
    /// Nothing detected (initial)
    #[default]
    Quiescent,
    /// Trigger seen; waiting for the quiet run
    Alert,
}

impl AlertState {
    /// Check if this is the alert state
    pub fn is_alert(&self) -> bool {
        matches!(self, AlertState::Alert)
    }
}

/// Entry actions run by [`AlertMachine::observe_with`]
pub trait AlertHooks {
    /// Quiescent -> Alert
    fn on_alert_entered(&mut self);

    /// Alert -> Quiescent after the persistence run
    fn on_alert_cleared(&mut self);

    /// Alert -> Quiescent on operator acknowledgement
    fn on_acknowledged(&mut self) {
        self.on_alert_cleared();
    }
}

/// Debounced two-state alert signal
#[derive(Debug, Clone)]
pub struct AlertMachine {
    state: AlertState,
    /// Consecutive quiet observations while in Alert
    quiet_run: u16,
    /// Quiet observations needed to clear
    persistence: u16,
}

impl AlertMachine {
    /// Create a machine in the quiescent state
    ///
    /// A `persistence` of zero is treated as one.
    pub fn new(persistence: u16) -> Self {
        Self {
            state: AlertState::Quiescent,
            quiet_run: 0,
            persistence: persistence.max(1),
        }
    }

    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(config.persistence)
    }

    /// Current state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Current quiet run length
    pub fn quiet_run(&self) -> u16 {
        self.quiet_run
    }

    /// Configured persistence count
    pub fn persistence(&self) -> u16 {
        self.persistence
    }

    /// Feed one raw sensor level
    pub fn observe(&mut self, triggered: bool) -> Observation {
        self.handle(Event::from(triggered))
    }

    /// Force the machine back to quiescent
    pub fn acknowledge(&mut self) -> Observation {
        self.handle(Event::Acknowledge)
    }

    /// Feed one raw sensor level and run the matching entry action
    pub fn observe_with<H: AlertHooks>(&mut self, triggered: bool, hooks: &mut H) -> Observation {
        let observation = self.observe(triggered);
        Self::dispatch(observation.transition, hooks);
        observation
    }

    /// Acknowledge and run the matching entry action
    pub fn acknowledge_with<H: AlertHooks>(&mut self, hooks: &mut H) -> Observation {
        let observation = self.acknowledge();
        Self::dispatch(observation.transition, hooks);
        observation
    }

    /// Process an event and return the resulting observation
    ///
    /// This is the core transition logic.
    pub fn handle(&mut self, event: Event) -> Observation {
        use AlertState::*;
        use Event::*;

        let transition = match (self.state, event) {
            (Quiescent, Triggered) => {
                self.state = Alert;
                self.quiet_run = 0;
                Transition::Entered
            }
            (Quiescent, Quiet) | (Quiescent, Acknowledge) => Transition::None,

            (Alert, Triggered) => {
                self.quiet_run = 0;
                Transition::None
            }
            (Alert, Quiet) => {
                self.quiet_run = self.quiet_run.saturating_add(1);
                if self.quiet_run >= self.persistence {
                    self.state = Quiescent;
                    self.quiet_run = 0;
                    Transition::Cleared
                } else {
                    Transition::None
                }
            }
            (Alert, Acknowledge) => {
                self.state = Quiescent;
                self.quiet_run = 0;
                Transition::Acknowledged
            }
        };

        #[cfg(feature = "defmt")]
        if transition != Transition::None {
            defmt::debug!("alert {} -> {}", transition, self.state);
        }

        Observation {
            state: self.state,
            transition,
        }
    }

    fn dispatch<H: AlertHooks>(transition: Transition, hooks: &mut H) {
        match transition {
            Transition::Entered => hooks.on_alert_entered(),
            Transition::Cleared => hooks.on_alert_cleared(),
            Transition::Acknowledged => hooks.on_acknowledged(),
            Transition::None => {}
        }
    }
}

impl Default for AlertMachine {
    fn default() -> Self {
        Self::from_config(&AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(machine: &mut AlertMachine, levels: &[bool]) -> Observation {
        let mut last = Observation {
            state: machine.state(),
            transition: Transition::None,
        };
        for &level in levels {
            last = machine.observe(level);
        }
        last
    }

    #[test]
    fn test_single_trigger_arms() {
        let mut machine = AlertMachine::new(50);
        let obs = machine.observe(true);
        assert_eq!(obs.state, AlertState::Alert);
        assert_eq!(obs.transition, Transition::Entered);
        assert!(obs.transitioned());
    }

    #[test]
    fn test_quiet_while_quiescent_is_noop() {
        let mut machine = AlertMachine::new(50);
        for _ in 0..100 {
            let obs = machine.observe(false);
            assert_eq!(obs.state, AlertState::Quiescent);
            assert!(!obs.transitioned());
        }
        assert_eq!(machine.quiet_run(), 0);
    }

    #[test]
    fn test_forty_nine_quiet_stays_armed() {
        let mut machine = AlertMachine::new(50);
        machine.observe(true);
        let obs = run(&mut machine, &[false; 49]);
        assert_eq!(obs.state, AlertState::Alert);
        assert_eq!(machine.quiet_run(), 49);
    }

    #[test]
    fn test_clears_exactly_on_fiftieth_quiet() {
        let mut machine = AlertMachine::new(50);
        machine.observe(true);
        run(&mut machine, &[false; 49]);

        let obs = machine.observe(false);
        assert_eq!(obs.state, AlertState::Quiescent);
        assert_eq!(obs.transition, Transition::Cleared);
        assert_eq!(machine.quiet_run(), 0);
    }

    #[test]
    fn test_trigger_restarts_quiet_run() {
        let mut machine = AlertMachine::new(50);
        machine.observe(true);
        machine.observe(false);
        let obs = machine.observe(true);
        assert_eq!(obs.state, AlertState::Alert);
        assert!(!obs.transitioned());
        assert_eq!(machine.quiet_run(), 0);

        let obs = run(&mut machine, &[false; 49]);
        assert_eq!(obs.state, AlertState::Alert);
        assert_eq!(machine.observe(false).transition, Transition::Cleared);
    }

    #[test]
    fn test_acknowledge_bypasses_persistence() {
        let mut machine = AlertMachine::new(50);
        machine.observe(true);
        machine.observe(false);

        let obs = machine.acknowledge();
        assert_eq!(obs.state, AlertState::Quiescent);
        assert_eq!(obs.transition, Transition::Acknowledged);
        assert_eq!(machine.quiet_run(), 0);

        // Nothing to acknowledge when quiescent
        assert_eq!(machine.acknowledge().transition, Transition::None);
    }

    #[test]
    fn test_zero_persistence_clamped() {
        let mut machine = AlertMachine::new(0);
        assert_eq!(machine.persistence(), 1);
        machine.observe(true);
        assert_eq!(machine.observe(false).transition, Transition::Cleared);
    }

    #[derive(Default)]
    struct Recorder {
        entered: u8,
        cleared: u8,
        acked: u8,
    }

    impl AlertHooks for Recorder {
        fn on_alert_entered(&mut self) {
            self.entered += 1;
        }

        fn on_alert_cleared(&mut self) {
            self.cleared += 1;
        }

        fn on_acknowledged(&mut self) {
            self.acked += 1;
        }
    }

    #[test]
    fn test_hooks_run_once_per_transition() {
        let mut machine = AlertMachine::new(2);
        let mut hooks = Recorder::default();

        for level in [true, true, false, true, false, false, false] {
            machine.observe_with(level, &mut hooks);
        }
        assert_eq!(hooks.entered, 1);
        assert_eq!(hooks.cleared, 1);

        machine.observe_with(true, &mut hooks);
        machine.acknowledge_with(&mut hooks);
        assert_eq!(hooks.entered, 2);
        assert_eq!(hooks.acked, 1);
        assert_eq!(hooks.cleared, 1);
    }

    proptest! {
        #[test]
        fn prop_clears_only_after_full_quiet_run(
            persistence in 1u16..80,
            levels in proptest::collection::vec(any::<bool>(), 0..400),
        ) {
            let mut machine = AlertMachine::new(persistence);
            let mut quiet_run: u16 = 0;
            let mut armed = false;

            for level in levels {
                let obs = machine.observe(level);
                if level {
                    prop_assert_eq!(obs.state, AlertState::Alert);
                    prop_assert_eq!(obs.transition == Transition::Entered, !armed);
                    armed = true;
                    quiet_run = 0;
                } else if armed {
                    quiet_run += 1;
                    if quiet_run == persistence {
                        prop_assert_eq!(obs.transition, Transition::Cleared);
                        armed = false;
                        quiet_run = 0;
                    } else {
                        prop_assert_eq!(obs.state, AlertState::Alert);
                    }
                } else {
                    prop_assert!(!obs.transitioned());
                }
                prop_assert!(machine.quiet_run() < persistence);
            }
        }
    }
}
