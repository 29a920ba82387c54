//! Silent intruder alert panel
//!
//! Watches one analog channel (a light beam across a doorway). A reading
//! below the trigger level latches the alarm until SW1 is pressed.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use vigil_core::app::{IntruderAlarm, IntruderStatus};
use vigil_firmware::board::Board;
use vigil_firmware::config::{INTRUDER_PERIOD_MS, PANEL, RESET_HOLD_MS};
use vigil_hal_lpc17xx::Peripherals;

#[entry]
fn main() -> ! {
    info!("Vigil intruder alert starting...");

    let mut board = Board::new(unwrap!(Peripherals::take()));
    let display = unwrap!(board.display(&PANEL.display));
    let sampler = unwrap!(board.sampler(&[PANEL.alarm_channel], &PANEL.sampler));
    let buzzer = unwrap!(board.buzzer(&PANEL.buzzer));
    let reset = unwrap!(board.input(&PANEL.reset_switch));
    let mut delay = board.delay();

    let mut alarm = IntruderAlarm::new(
        display,
        sampler,
        buzzer,
        PANEL.alarm_channel,
        &PANEL.alert,
    );
    alarm.start();
    info!(
        "Armed on AD0.{}, trips below {}",
        PANEL.alarm_channel, PANEL.alert.trigger_below
    );

    let mut was_alarm = false;
    loop {
        match alarm.step(reset.is_active()) {
            IntruderStatus::Alarm(sample) => {
                if !was_alarm {
                    warn!("Intruder! sample {}", sample.raw());
                }
                was_alarm = true;
            }
            IntruderStatus::Reset => {
                info!("Alarm acknowledged");
                was_alarm = false;
                delay.delay_ms(RESET_HOLD_MS);
            }
            IntruderStatus::SensorFault(e) => {
                warn!("Sensor fault: {}", e);
            }
            IntruderStatus::Armed(_) => {}
        }
        delay.delay_ms(INTRUDER_PERIOD_MS);
    }
}
