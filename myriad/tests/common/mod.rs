//! Fakes and card image builders shared by the integration tests.

#![allow(dead_code)]

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use myriad::CardReader;
use myriad::checksum::rolling_checksum;
use myriad::header::{HEADER_SIZE, Header};
use myriad::identity::{IDENTITY_TYPE, IdentityRecord};

/// EEPROM contents served from memory, counting reads.
pub struct MemoryCard {
    pub image: Vec<u8>,
    pub reads: usize,
    pub fail_on_read: Option<usize>,
}

impl MemoryCard {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            reads: 0,
            fail_on_read: None,
        }
    }
}

#[derive(Debug)]
pub struct Nack;

impl CardReader for MemoryCard {
    type Error = Nack;

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Nack> {
        let n = self.reads;
        self.reads += 1;
        if self.fail_on_read == Some(n) {
            return Err(Nack);
        }
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.image.get(i).copied().unwrap_or(0xff);
        }
        Ok(())
    }
}

/// Presence pin; `seated` pulls it low.
pub struct PresencePin {
    pub seated: bool,
    pub reads: usize,
}

impl PresencePin {
    pub fn seated() -> Self {
        Self { seated: true, reads: 0 }
    }

    pub fn empty() -> Self {
        Self { seated: false, reads: 0 }
    }
}

impl ErrorType for PresencePin {
    type Error = Infallible;
}

impl InputPin for PresencePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(!self.seated)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.seated)
    }
}

#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// A TLV stream holding one identity record.
pub fn identity_payload(vendor_id: u16, product_id: u16, revision: u8) -> Vec<u8> {
    let record = IdentityRecord {
        vendor_id,
        product_id,
        revision,
    };
    let mut payload = vec![IDENTITY_TYPE, 5];
    payload.extend_from_slice(&record.to_bytes());
    payload
}

/// Header with a correct checksum followed by `payload`.
pub fn card_image(payload: &[u8]) -> Vec<u8> {
    let header = Header {
        patch: 3,
        ..Header::new(rolling_checksum(payload), payload.len() as u16)
    };
    let mut image = header.to_bytes().to_vec();
    image.extend_from_slice(payload);
    image
}

pub fn with_header(image: &mut [u8], edit: impl FnOnce(&mut Header)) {
    let mut header = Header::parse(image).unwrap();
    edit(&mut header);
    image[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
}
