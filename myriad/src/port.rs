//! Card connector pins as seen by the card drivers.
//!
//! The connector carries four general purpose lines and two analog lines.
//! The board implements [`CardPort`] for whatever HAL it runs on; pin
//! direction is decided at runtime because it depends on which card is
//! seated.

/// Digital lines on the card connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Gpio1,
    Gpio2,
    Gpio3,
    Gpio4,
}

impl Line {
    pub const ALL: [Line; 4] = [Line::Gpio1, Line::Gpio2, Line::Gpio3, Line::Gpio4];
}

/// Analog lines on the card connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    Adc1,
    Adc2,
}

/// Full scale of [`CardPort::read_analog`].
pub const ADC_MAX: u16 = 1023;

pub trait CardPort {
    type Error: core::fmt::Debug;

    /// Floating input, for lines the card drives itself (push-pull
    /// outputs on a card with its own controller). The switch, encoder and
    /// joystick cards all read switches to ground and use the pull-up.
    fn set_input(&mut self, line: Line) -> Result<(), Self::Error>;

    /// Input with the pull-up enabled, for switches to ground.
    fn set_input_pullup(&mut self, line: Line) -> Result<(), Self::Error>;

    fn is_low(&mut self, line: Line) -> Result<bool, Self::Error>;

    fn set_analog_input(&mut self, channel: AnalogChannel) -> Result<(), Self::Error>;

    /// One conversion, scaled to `0..=ADC_MAX`.
    fn read_analog(&mut self, channel: AnalogChannel) -> Result<u16, Self::Error>;
}
