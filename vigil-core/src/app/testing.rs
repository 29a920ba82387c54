//! Test doubles for the panel programs

use heapless::{Deque, Vec};

use crate::traits::display::{command, LINE_WIDTH};
use crate::traits::{Actuator, AdcSample, AnalogSampler, CharacterDisplay, SamplerError};

/// Two-line screen model that understands the instructions the programs use
pub struct Screen {
    lines: [[u8; LINE_WIDTH]; 2],
    row: usize,
    col: usize,
    pub initialized: bool,
    pub clears: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            lines: [[b' '; LINE_WIDTH]; 2],
            row: 0,
            col: 0,
            initialized: false,
            clears: 0,
        }
    }
}

impl Screen {
    pub fn line(&self, row: usize) -> &str {
        core::str::from_utf8(&self.lines[row]).unwrap().trim_end()
    }
}

impl CharacterDisplay for Screen {
    fn initialize(&mut self) {
        self.initialized = true;
        self.write_command(command::CLEAR);
    }

    fn write_command(&mut self, cmd: u8) {
        if cmd == command::CLEAR {
            self.lines = [[b' '; LINE_WIDTH]; 2];
            self.row = 0;
            self.col = 0;
            self.clears += 1;
        } else if cmd & command::SET_DDRAM != 0 {
            let addr = cmd & 0x7F;
            self.row = usize::from(addr >= 0x40);
            self.col = usize::from(addr & 0x3F);
        }
    }

    fn write_data(&mut self, data: u8) {
        if self.col < LINE_WIDTH {
            self.lines[self.row][self.col] = data;
        }
        self.col += 1;
    }
}

#[derive(Default)]
pub struct Buzzer {
    pub on: bool,
}

impl Actuator for Buzzer {
    fn set_active(&mut self, on: bool) {
        self.on = on;
    }

    fn is_active(&self) -> bool {
        self.on
    }
}

/// Sampler replaying a script of results; records which channels were read
#[derive(Default)]
pub struct Script {
    pub results: Deque<Result<u16, SamplerError>, 64>,
    pub reads: Vec<u8, 64>,
}

impl Script {
    pub fn push(&mut self, result: Result<u16, SamplerError>) {
        self.results.push_back(result).unwrap();
    }
}

impl AnalogSampler for Script {
    fn read_channel(&mut self, channel: u8) -> Result<AdcSample, SamplerError> {
        self.reads.push(channel).unwrap();
        self.results
            .pop_front()
            .expect("script exhausted")
            .map(AdcSample::new)
    }
}
