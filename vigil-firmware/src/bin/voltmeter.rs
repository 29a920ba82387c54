//! Differential voltmeter panel
//!
//! Shows |V(a) - V(b)| for the configured channel pair, refreshed a couple
//! of times a second.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use vigil_core::app::DiffVoltmeter;
use vigil_firmware::board::Board;
use vigil_firmware::config::{PANEL, VOLTMETER_PERIOD_MS};
use vigil_hal_lpc17xx::Peripherals;

#[entry]
fn main() -> ! {
    info!("Vigil voltmeter starting...");

    let (a, b) = PANEL.diff_channels;
    let mut board = Board::new(unwrap!(Peripherals::take()));
    let display = unwrap!(board.display(&PANEL.display));
    let sampler = unwrap!(board.sampler(&[a, b], &PANEL.sampler));
    let mut delay = board.delay();

    let mut meter = DiffVoltmeter::new(display, sampler, PANEL.diff_channels);
    meter.start();
    info!("Measuring AD0.{} - AD0.{}", a, b);

    loop {
        match meter.step() {
            Ok(cv) => debug!("diff {} cV", cv),
            Err(e) => warn!("Sensor fault: {}", e),
        }
        delay.delay_ms(VOLTMETER_PERIOD_MS);
    }
}
