//! Elora half with a Myriad card slot: Board Support Package (BSP)
//!
//! Maps the card connector to named subsystems so the card logic never
//! sees GPIO numbers or peripheral details. The connector pins are handed
//! over unconfigured; the card drivers pick their direction at runtime.

pub mod pins;

use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    gpio::{Flex, Input, InputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c},
    peripherals::{ADC1, GPIO0, GPIO1, Peripherals, TIMG0},
    time::Rate,
};

use crate::drivers::card_port::EspCardPort;

// Type Aliases
pub type CardBus = I2c<'static, Blocking>;
pub type AxisPin<PIN> = AdcPin<PIN, ADC1<'static>>;

// Hardware Bundles
/// Card connector: digital lines, analog lines and the shared ADC.
pub struct ConnectorHw {
    pub gpio: [Flex<'static>; 4],
    pub adc: Adc<'static, ADC1<'static>, Blocking>,
    pub adc1: AxisPin<GPIO0<'static>>,
    pub adc2: AxisPin<GPIO1<'static>>,
}

/// Card identification: descriptor EEPROM bus and the presence line.
pub struct DetectHw {
    pub i2c: CardBus,
    pub present: Input<'static>,
}

/// Complete board hardware, ready for driver initialization.
pub struct Board {
    pub detect: DetectHw,
    pub port: EspCardPort,
    pub timg0: TIMG0<'static>,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let connector = Self::init_connector(&p);

        // Plain input: the card shorts it to ground, the board pulls it up
        let present = Input::new(p.GPIO10, InputConfig::default().with_pull(Pull::None));

        let i2c_cfg = I2cConfig::default().with_frequency(Rate::from_khz(pins::I2C_FREQ_KHZ));
        let i2c = I2c::new(p.I2C0, i2c_cfg)
            .unwrap()
            .with_sda(p.GPIO8)
            .with_scl(p.GPIO9);

        Board {
            detect: DetectHw { i2c, present },
            port: EspCardPort::new(connector),
            timg0: p.TIMG0,
        }
    }

    fn init_connector(p: &Peripherals) -> ConnectorHw {
        let mut adc_cfg = AdcConfig::new();

        // 11dB attenuation: full 0-3.3V swing of the joystick pots
        let adc1 = adc_cfg.enable_pin(unsafe { p.GPIO0.clone_unchecked() }, Attenuation::_11dB);
        let adc2 = adc_cfg.enable_pin(unsafe { p.GPIO1.clone_unchecked() }, Attenuation::_11dB);
        let adc = Adc::new(unsafe { p.ADC1.clone_unchecked() }, adc_cfg);

        let gpio = unsafe {
            [
                Flex::new(p.GPIO4.clone_unchecked()),
                Flex::new(p.GPIO5.clone_unchecked()),
                Flex::new(p.GPIO6.clone_unchecked()),
                Flex::new(p.GPIO7.clone_unchecked()),
            ]
        };

        ConnectorHw {
            gpio,
            adc,
            adc1,
            adc2,
        }
    }
}
