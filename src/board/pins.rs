//! GPIO |     Function      |      Notes
//! -----+-------------------+----------------------------------------
//!  0   | ADC1 - card ADC1  | Joystick Y axis (inverted)
//!  1   | ADC1 - card ADC2  | Joystick X axis
//!  4   | Card GPIO1        | Push switch on encoder/joystick cards
//!  5   | Card GPIO2        | Encoder phase A / switch 2
//!  6   | Card GPIO3        | Encoder phase B / switch 1
//!  7   | Card GPIO4        | Switch 3
//!  8   | I2C0 SDA          | Card EEPROM, 4.7K external pullup
//!  9   | I2C0 SCL          | Card EEPROM
//! 10   | Card present      | Shorted to GND by a seated card

// ----- Card analog lines -----
pub const CARD_ADC1: u8 = 0;
pub const CARD_ADC2: u8 = 1;

// ----- Card digital lines -----
pub const CARD_GPIO1: u8 = 4;
pub const CARD_GPIO2: u8 = 5;
pub const CARD_GPIO3: u8 = 6;
pub const CARD_GPIO4: u8 = 7;

// ----- Card EEPROM bus -----
pub const I2C_SDA: u8 = 8;
pub const I2C_SCL: u8 = 9;
pub const I2C_FREQ_KHZ: u32 = 100;

// ----- Presence -----
pub const CARD_PRESENT: u8 = 10; // Digital, active LOW
