//! Silent intruder alarm
//!
//! Watches one analog channel (a light barrier or pressure pad divider) and
//! latches an alarm the first time the reading drops below the trigger
//! level. Only the operator switch clears it.

use crate::app::{format, SENSOR_FAULT_MSG};
use crate::config::AlertConfig;
use crate::state::{AlertMachine, AlertState, Event, Transition};
use crate::traits::{Actuator, AdcSample, AnalogSampler, CharacterDisplay, DisplayExt, SamplerError};

pub const TITLE_MSG: &str = "Silent Intruder";
pub const ALARM_MSG: &str = "INTRUDER ALERT!!";
pub const RESET_MSG: &str = "SYSTEM RESET OK";

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntruderStatus {
    /// Watching; reading above the trigger level
    Armed(AdcSample),
    /// Alarm latched, waiting for the operator
    Alarm(AdcSample),
    /// Operator cleared the alarm this pass
    Reset,
    /// Conversion failed; alarm state unchanged
    SensorFault(SamplerError),
}

/// Intruder alarm program
pub struct IntruderAlarm<D, S, B> {
    display: D,
    sampler: S,
    buzzer: B,
    machine: AlertMachine,
    channel: u8,
    trigger_below: u16,
    counter: u8,
}

impl<D, S, B> IntruderAlarm<D, S, B>
where
    D: CharacterDisplay,
    S: AnalogSampler,
    B: Actuator,
{
    pub fn new(display: D, sampler: S, buzzer: B, channel: u8, config: &AlertConfig) -> Self {
        Self {
            display,
            sampler,
            buzzer,
            // The alarm latches: only the operator clears it
            machine: AlertMachine::new(u16::MAX),
            channel,
            trigger_below: config.trigger_below,
            counter: 0,
        }
    }

    /// Bring up the display and show the title
    pub fn start(&mut self) {
        self.buzzer.set_active(false);
        self.display.initialize();
        self.display.print_line(0, TITLE_MSG);
    }

    /// One pass: sample, report, latch or clear
    ///
    /// `reset_pressed` is the operator switch level for this pass.
    pub fn step(&mut self, reset_pressed: bool) -> IntruderStatus {
        let sample = match self.sampler.read_channel(self.channel) {
            Ok(sample) => sample,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("intruder: sampler error {}", e);
                self.display.print_line(1, SENSOR_FAULT_MSG);
                return IntruderStatus::SensorFault(e);
            }
        };
        self.display.print_line(1, &format::sample_line(sample));

        if sample.raw() < self.trigger_below
            && self.machine.handle(Event::Triggered).transition == Transition::Entered
        {
            self.buzzer.set_active(true);
            self.display.clear();
            self.display.print_line(0, ALARM_MSG);
        }

        if self.machine.state() == AlertState::Alert {
            if !reset_pressed {
                return IntruderStatus::Alarm(sample);
            }
            self.machine.acknowledge();
            self.buzzer.set_active(false);
            self.display.clear();
            self.display.print_line(0, RESET_MSG);
            return IntruderStatus::Reset;
        }

        self.display.print_line(0, &format::counter_line(self.counter));
        self.counter = (self.counter + 1) % 10;
        IntruderStatus::Armed(sample)
    }

    pub fn state(&self) -> AlertState {
        self.machine.state()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{Buzzer, Screen, Script};

    fn alarm(script: Script) -> IntruderAlarm<Screen, Script, Buzzer> {
        let mut a = IntruderAlarm::new(
            Screen::default(),
            script,
            Buzzer::default(),
            2,
            &AlertConfig::default(),
        );
        a.start();
        a
    }

    #[test]
    fn test_counter_rolls_while_armed() {
        let mut script = Script::default();
        for _ in 0..11 {
            script.push(Ok(4000));
        }
        let mut a = alarm(script);

        assert_eq!(a.display().line(0), TITLE_MSG);
        for _ in 0..10 {
            assert!(matches!(a.step(false), IntruderStatus::Armed(_)));
        }
        assert_eq!(a.display().line(0), "COUNTER: 9");
        a.step(false);
        assert_eq!(a.display().line(0), "COUNTER: 0");
        assert_eq!(a.display().line(1), "Val:4000  3.22V");
        assert!(a.sampler().reads.iter().all(|&c| c == 2));
    }

    #[test]
    fn test_low_reading_latches_alarm() {
        let mut script = Script::default();
        script.push(Ok(3649));
        script.push(Ok(4095));
        script.push(Ok(4095));
        let mut a = alarm(script);

        assert!(matches!(a.step(false), IntruderStatus::Alarm(_)));
        assert_eq!(a.display().line(0), ALARM_MSG);
        assert!(a.buzzer().on);

        // Reading recovers but the alarm stays latched
        assert!(matches!(a.step(false), IntruderStatus::Alarm(_)));
        assert!(matches!(a.step(false), IntruderStatus::Alarm(_)));
        assert!(a.buzzer().on);
        assert_eq!(a.state(), AlertState::Alert);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut script = Script::default();
        script.push(Ok(3650));
        let mut a = alarm(script);
        assert!(matches!(a.step(false), IntruderStatus::Armed(_)));
    }

    #[test]
    fn test_switch_resets_alarm() {
        let mut script = Script::default();
        script.push(Ok(100));
        script.push(Ok(4095));
        script.push(Ok(4095));
        let mut a = alarm(script);

        a.step(false);
        assert_eq!(a.step(true), IntruderStatus::Reset);
        assert_eq!(a.display().line(0), RESET_MSG);
        assert!(!a.buzzer().on);
        assert_eq!(a.state(), AlertState::Quiescent);

        assert!(matches!(a.step(false), IntruderStatus::Armed(_)));
        assert_eq!(a.display().line(0), "COUNTER: 0");
    }

    #[test]
    fn test_switch_ignored_while_armed() {
        let mut script = Script::default();
        script.push(Ok(4095));
        let mut a = alarm(script);
        assert!(matches!(a.step(true), IntruderStatus::Armed(_)));
    }

    #[test]
    fn test_sensor_fault_shows_fallback() {
        let fault = SamplerError::Timeout {
            channel: 2,
            polls: 10_000,
        };
        let mut script = Script::default();
        script.push(Ok(100));
        script.push(Err(fault));
        let mut a = alarm(script);

        a.step(false);
        assert_eq!(a.step(true), IntruderStatus::SensorFault(fault));
        assert_eq!(a.display().line(1), SENSOR_FAULT_MSG);
        // A failed pass does not clear the alarm
        assert_eq!(a.state(), AlertState::Alert);
        assert!(a.buzzer().on);
    }
}
