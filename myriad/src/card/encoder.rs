//! Rotary encoder card with push switch.
//!
//! The phases feed the host's encoder pad array; the host does the
//! quadrature decoding. The push switch lands in the card matrix row.

use super::{CardDevice, RowLatch, RowSample, press_word};
use crate::port::{CardPort, Line};

#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    row: RowLatch,
}

impl Encoder {
    pub const fn new() -> Self {
        Self {
            row: RowLatch::new(),
        }
    }
}

impl CardDevice for Encoder {
    fn init<P: CardPort>(&mut self, port: &mut P, _now_ms: u32) -> Result<(), P::Error> {
        port.set_input_pullup(Line::Gpio1)?; // press
        port.set_input_pullup(Line::Gpio2)?; // A
        port.set_input_pullup(Line::Gpio3)?; // B
        Ok(())
    }

    fn scan<P: CardPort>(&mut self, port: &mut P) -> Result<Option<RowSample>, P::Error> {
        let word = press_word(port)?;
        Ok(Some(self.row.update(word)))
    }

    fn pads<P: CardPort>(&mut self, port: &mut P) -> Result<Option<(bool, bool)>, P::Error> {
        let a = port.is_low(Line::Gpio2)?;
        let b = port.is_low(Line::Gpio3)?;
        Ok(Some((a, b)))
    }
}
