//! Analog joystick card with push switch.
//!
//! Sampling is rate limited to one real conversion per
//! [`MIN_INTERVAL_MS`]. Polls inside the window hand the previous report
//! straight back without converting or waiting, so the scan loop never
//! stalls on the joystick.

use super::{CardDevice, RowLatch, RowSample, press_word};
use crate::filter::{self, MIN_INTERVAL_MS};
use crate::port::{AnalogChannel, CardPort, Line};
use crate::report::MotionReport;

#[derive(Debug, Clone, Copy, Default)]
pub struct Joystick {
    row: RowLatch,
    last_sample_ms: u32,
}

impl Joystick {
    pub const fn new() -> Self {
        Self {
            row: RowLatch::new(),
            last_sample_ms: 0,
        }
    }

    pub fn last_sample_ms(&self) -> u32 {
        self.last_sample_ms
    }
}

impl CardDevice for Joystick {
    fn init<P: CardPort>(&mut self, port: &mut P, now_ms: u32) -> Result<(), P::Error> {
        port.set_input_pullup(Line::Gpio1)?; // press
        port.set_analog_input(AnalogChannel::Adc1)?; // Y
        port.set_analog_input(AnalogChannel::Adc2)?; // X
        self.last_sample_ms = now_ms;
        Ok(())
    }

    fn scan<P: CardPort>(&mut self, port: &mut P) -> Result<Option<RowSample>, P::Error> {
        let word = press_word(port)?;
        Ok(Some(self.row.update(word)))
    }

    fn motion<P: CardPort>(
        &mut self,
        port: &mut P,
        previous: MotionReport,
        now_ms: u32,
    ) -> Result<Option<MotionReport>, P::Error> {
        if now_ms.wrapping_sub(self.last_sample_ms) < MIN_INTERVAL_MS {
            return Ok(Some(previous));
        }
        self.last_sample_ms = now_ms;

        // Y is mounted upside down
        let y = filter::axis(port.read_analog(AnalogChannel::Adc1)?, true);
        let x = filter::axis(port.read_analog(AnalogChannel::Adc2)?, false);

        Ok(Some(MotionReport { x, y, ..previous }))
    }
}
