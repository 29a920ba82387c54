//! Motion alert panel
//!
//! PIR level in, "Motion Detected!" and the buzzer out. The alert clears
//! after a run of quiet passes so a twitchy sensor cannot chatter the
//! buzzer.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use vigil_core::app::MotionMonitor;
use vigil_core::state::Transition;
use vigil_firmware::board::Board;
use vigil_firmware::config::{MOTION_PERIOD_MS, PANEL};
use vigil_hal_lpc17xx::Peripherals;

#[entry]
fn main() -> ! {
    info!("Vigil motion alert starting...");

    let mut board = Board::new(unwrap!(Peripherals::take()));
    let display = unwrap!(board.display(&PANEL.display));
    let buzzer = unwrap!(board.buzzer(&PANEL.buzzer));
    let pir = unwrap!(board.input(&PANEL.pir));
    let mut delay = board.delay();

    let mut monitor = MotionMonitor::new(display, buzzer, &PANEL.alert);
    monitor.start();
    info!(
        "Monitoring, clears after {} quiet passes",
        PANEL.alert.persistence
    );

    loop {
        match monitor.step(pir.is_active()).transition {
            Transition::Entered => warn!("Motion detected"),
            Transition::Cleared => info!("Quiet, alert cleared"),
            _ => {}
        }
        delay.delay_ms(MOTION_PERIOD_MS);
    }
}
