// Card EEPROM reader
//
// 24Cxx-style EEPROMs expose 256-byte blocks at consecutive 7-bit
// addresses (0x50, 0x51, ...). A read always starts at a block boundary,
// so each block is a write of register 0 followed by a read of up to 256
// bytes from the next device address.

use embedded_hal::i2c::I2c;

/// 7-bit address of the first EEPROM block (1010 000).
pub const EEPROM_ADDRESS: u8 = 0x50;
pub const PAGE_SIZE: usize = 256;

/// Reads the card descriptor from its start.
///
/// `buf.len()` bytes are read beginning at offset 0 of the device.
pub trait CardReader {
    type Error: core::fmt::Debug;

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

pub struct Eeprom<I2C> {
    i2c: I2C,
    base: u8,
}

impl<I2C: I2c> Eeprom<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, EEPROM_ADDRESS)
    }

    pub fn with_address(i2c: I2C, base: u8) -> Self {
        Self { i2c, base }
    }

    /// Give the bus back, e.g. to share it with other peripherals after boot.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> CardReader for Eeprom<I2C> {
    type Error = I2C::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for (page, chunk) in buf.chunks_mut(PAGE_SIZE).enumerate() {
            let address = self.base.wrapping_add(page as u8);
            self.i2c.write_read(address, &[0], chunk)?;
        }
        Ok(())
    }
}
