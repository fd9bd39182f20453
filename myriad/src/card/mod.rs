// Card drivers and dispatch
//
// One type per card implements CardDevice; CardDriver is the tagged union
// the firmware holds once the card is known. Dispatch goes through the
// with_card! macro (no dyn), so a new card type is one new module, one
// variant and one match arm here.
//
// Every method has a no-op default: a card only implements the hooks it
// actually feeds.

pub mod encoder;
pub mod joystick;
pub mod switches;

pub use encoder::Encoder;
pub use joystick::Joystick;
pub use switches::SwitchArray;

use crate::identity::CardIdentity;
use crate::port::{CardPort, Line};
use crate::report::MotionReport;

/// One row of the host's key matrix.
pub type MatrixRow = u16;

/// Where the card's inputs land in the host's arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Row slot appended after the keyboard's own matrix rows.
    pub matrix_row: usize,
    /// Encoder pad slots (A, B) after the onboard encoders.
    pub pad_a: usize,
    pub pad_b: usize,
}

impl Layout {
    /// Elora: 5 native matrix rows, 3 onboard encoders (pads 0..6).
    pub const ELORA: Self = Self {
        matrix_row: 5,
        pad_a: 6,
        pad_b: 7,
    };
}

impl Default for Layout {
    fn default() -> Self {
        Self::ELORA
    }
}

/// A freshly sampled card row and whether it differs from the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSample {
    pub word: MatrixRow,
    pub changed: bool,
}

/// Last sampled row bits, for edge detection between polls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowLatch {
    last: MatrixRow,
}

impl RowLatch {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    pub fn update(&mut self, word: MatrixRow) -> RowSample {
        let changed = (self.last ^ word) != 0;
        self.last = word;
        RowSample { word, changed }
    }

    pub fn last(&self) -> MatrixRow {
        self.last
    }
}

/// Push switch shared by the encoder and joystick cards (GPIO1, active low).
pub(crate) const PRESS_BIT: u8 = 4;

pub(crate) fn press_word<P: CardPort>(port: &mut P) -> Result<MatrixRow, P::Error> {
    Ok((port.is_low(Line::Gpio1)? as MatrixRow) << PRESS_BIT)
}

pub trait CardDevice {
    /// Configure the connector for this card. Runs once per boot.
    fn init<P: CardPort>(&mut self, _port: &mut P, _now_ms: u32) -> Result<(), P::Error> {
        Ok(())
    }

    /// Sample the card's contribution to the key matrix.
    fn scan<P: CardPort>(&mut self, _port: &mut P) -> Result<Option<RowSample>, P::Error> {
        Ok(None)
    }

    /// Sample the encoder phases as (A, B), true = line pulled low.
    fn pads<P: CardPort>(&mut self, _port: &mut P) -> Result<Option<(bool, bool)>, P::Error> {
        Ok(None)
    }

    /// Produce the pointing report for this tick from the previous one.
    fn motion<P: CardPort>(
        &mut self,
        _port: &mut P,
        _previous: MotionReport,
        _now_ms: u32,
    ) -> Result<Option<MotionReport>, P::Error> {
        Ok(None)
    }
}

/// No card, an unknown card, or one that failed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl CardDevice for Inert {}

#[derive(Debug, Clone, Copy)]
pub enum CardDriver {
    Inert(Inert),
    Switches(SwitchArray),
    Encoder(Encoder),
    Joystick(Joystick),
}

macro_rules! with_card {
    ($driver:expr, |$card:ident| $body:expr) => {
        match $driver {
            CardDriver::Inert($card) => $body,
            CardDriver::Switches($card) => $body,
            CardDriver::Encoder($card) => $body,
            CardDriver::Joystick($card) => $body,
        }
    };
}

impl CardDriver {
    pub fn for_identity(identity: CardIdentity) -> Self {
        match identity {
            CardIdentity::Switches => CardDriver::Switches(SwitchArray::new()),
            CardIdentity::Encoder => CardDriver::Encoder(Encoder::new()),
            CardIdentity::Joystick => CardDriver::Joystick(Joystick::new()),
            CardIdentity::Absent
            | CardIdentity::Malformed(_)
            | CardIdentity::Unrecognized { .. } => CardDriver::Inert(Inert),
        }
    }

    pub fn is_inert(&self) -> bool {
        matches!(self, CardDriver::Inert(_))
    }
}

impl CardDevice for CardDriver {
    fn init<P: CardPort>(&mut self, port: &mut P, now_ms: u32) -> Result<(), P::Error> {
        with_card!(self, |card| card.init(port, now_ms))
    }

    fn scan<P: CardPort>(&mut self, port: &mut P) -> Result<Option<RowSample>, P::Error> {
        with_card!(self, |card| card.scan(port))
    }

    fn pads<P: CardPort>(&mut self, port: &mut P) -> Result<Option<(bool, bool)>, P::Error> {
        with_card!(self, |card| card.pads(port))
    }

    fn motion<P: CardPort>(
        &mut self,
        port: &mut P,
        previous: MotionReport,
        now_ms: u32,
    ) -> Result<Option<MotionReport>, P::Error> {
        with_card!(self, |card| card.motion(port, previous, now_ms))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    extern crate std;

    use std::vec::Vec;

    use crate::port::{AnalogChannel, CardPort, Line};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Mode {
        Unset,
        Input,
        PullUp,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Call {
        SetInput(Line),
        SetPullUp(Line),
        SetAnalog(AnalogChannel),
        ReadAnalog(AnalogChannel),
    }

    /// Connector with settable line levels. `low[i]` = Gpio(i+1) pulled low.
    pub struct FakePort {
        pub low: [bool; 4],
        pub modes: [Mode; 4],
        pub adc: [u16; 2],
        pub calls: Vec<Call>,
        pub fail_reads: bool,
    }

    impl FakePort {
        pub fn new() -> Self {
            Self {
                low: [false; 4],
                modes: [Mode::Unset; 4],
                adc: [512, 512],
                calls: Vec::new(),
                fail_reads: false,
            }
        }

        pub fn mode(&self, line: Line) -> Mode {
            self.modes[index(line)]
        }

        pub fn analog_reads(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::ReadAnalog(_)))
                .count()
        }
    }

    fn index(line: Line) -> usize {
        match line {
            Line::Gpio1 => 0,
            Line::Gpio2 => 1,
            Line::Gpio3 => 2,
            Line::Gpio4 => 3,
        }
    }

    impl CardPort for FakePort {
        type Error = &'static str;

        fn set_input(&mut self, line: Line) -> Result<(), Self::Error> {
            self.modes[index(line)] = Mode::Input;
            self.calls.push(Call::SetInput(line));
            Ok(())
        }

        fn set_input_pullup(&mut self, line: Line) -> Result<(), Self::Error> {
            self.modes[index(line)] = Mode::PullUp;
            self.calls.push(Call::SetPullUp(line));
            Ok(())
        }

        fn is_low(&mut self, line: Line) -> Result<bool, Self::Error> {
            if self.fail_reads {
                return Err("pin read failed");
            }
            Ok(self.low[index(line)])
        }

        fn set_analog_input(&mut self, channel: AnalogChannel) -> Result<(), Self::Error> {
            self.calls.push(Call::SetAnalog(channel));
            Ok(())
        }

        fn read_analog(&mut self, channel: AnalogChannel) -> Result<u16, Self::Error> {
            if self.fail_reads {
                return Err("adc read failed");
            }
            self.calls.push(Call::ReadAnalog(channel));
            Ok(match channel {
                AnalogChannel::Adc1 => self.adc[0],
                AnalogChannel::Adc2 => self.adc[1],
            })
        }
    }
}
