// Myriad connector on esp-hal GPIO and ADC1
//
// Digital lines are Flex pins so each card can pick pull-up or floating
// input after detection. The C3's ADC is 12-bit; readings are shifted
// down to the 10-bit scale the card drivers expect.

use esp_hal::gpio::{InputConfig, Pull};
use myriad::port::ADC_MAX;
use myriad::{AnalogChannel, CardPort, Line};

use crate::board::ConnectorHw;

const ADC_SHIFT: u32 = 2; // 12-bit -> 10-bit

pub struct EspCardPort {
    hw: ConnectorHw,
}

impl EspCardPort {
    pub fn new(hw: ConnectorHw) -> Self {
        Self { hw }
    }

    fn configure(&mut self, line: Line, pull: Pull) {
        let pin = &mut self.hw.gpio[index(line)];
        pin.set_output_enable(false);
        pin.apply_input_config(&InputConfig::default().with_pull(pull));
        pin.set_input_enable(true);
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

impl CardPort for EspCardPort {
    type Error = &'static str;

    fn set_input(&mut self, line: Line) -> Result<(), Self::Error> {
        self.configure(line, Pull::None);
        Ok(())
    }

    fn set_input_pullup(&mut self, line: Line) -> Result<(), Self::Error> {
        self.configure(line, Pull::Up);
        Ok(())
    }

    fn is_low(&mut self, line: Line) -> Result<bool, Self::Error> {
        Ok(self.hw.gpio[index(line)].is_low())
    }

    // Analog pins are claimed by ADC1 at board init and are inputs already
    fn set_analog_input(&mut self, _channel: AnalogChannel) -> Result<(), Self::Error> {
        Ok(())
    }

    fn read_analog(&mut self, channel: AnalogChannel) -> Result<u16, Self::Error> {
        let hw = &mut self.hw;
        let raw = match channel {
            AnalogChannel::Adc1 => nb::block!(hw.adc.read_oneshot(&mut hw.adc1)),
            AnalogChannel::Adc2 => nb::block!(hw.adc.read_oneshot(&mut hw.adc2)),
        }
        .map_err(|_| "adc conversion failed")?;
        Ok((raw >> ADC_SHIFT).min(ADC_MAX))
    }
}
