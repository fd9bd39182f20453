//! Four-switch card.
//!
//! Switches pull their line to ground, so a pressed key reads low. The
//! row word is packed in the order the keys sit on the card (S1..S4),
//! which is not the order of the connector lines.

use super::{CardDevice, MatrixRow, RowLatch, RowSample};
use crate::port::{CardPort, Line};

// (line, bit in the card row)
const SWITCH_BITS: [(Line, u8); 4] = [
    (Line::Gpio3, 0), // S1
    (Line::Gpio2, 1), // S2
    (Line::Gpio4, 2), // S3
    (Line::Gpio1, 3), // S4
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchArray {
    row: RowLatch,
}

impl SwitchArray {
    pub const fn new() -> Self {
        Self {
            row: RowLatch::new(),
        }
    }
}

impl CardDevice for SwitchArray {
    fn init<P: CardPort>(&mut self, port: &mut P, _now_ms: u32) -> Result<(), P::Error> {
        for line in Line::ALL {
            port.set_input_pullup(line)?;
        }
        Ok(())
    }

    fn scan<P: CardPort>(&mut self, port: &mut P) -> Result<Option<RowSample>, P::Error> {
        let mut word: MatrixRow = 0;
        for (line, bit) in SWITCH_BITS {
            word |= (port.is_low(line)? as MatrixRow) << bit;
        }
        Ok(Some(self.row.update(word)))
    }
}
