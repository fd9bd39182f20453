// Myriad card header
//
// The first 12 bytes of the card EEPROM, little-endian, no padding:
//
//   0..3    magic "MYR"
//   3       version major
//   4       version minor
//   5       version patch
//   6..10   checksum over the payload (header excluded)
//   10..12  payload length in bytes
//
// The payload (a TLV record stream) follows immediately.

use crate::error::Fault;

pub const MAGIC: [u8; 3] = *b"MYR";

/// A card with a different major version is a breaking change.
pub const SUPPORTED_MAJOR: u8 = 1;
/// Cards may declare an older minor version, never a newer one.
pub const SUPPORTED_MINOR: u8 = 0;

pub const HEADER_SIZE: usize = 12;

/// The largest EEPROM fitted to a card (16 kbit).
pub const EEPROM_CAPACITY: usize = 2048;
pub const MAX_PAYLOAD: usize = EEPROM_CAPACITY - HEADER_SIZE;

// ── Little-endian helpers ───────────────────────────────────────

#[inline]
fn le_u16(d: &[u8], o: usize) -> u16 {
    u16::from_le_bytes([d[o], d[o + 1]])
}

#[inline]
fn le_u32(d: &[u8], o: usize) -> u32 {
    u32::from_le_bytes([d[o], d[o + 1], d[o + 2], d[o + 3]])
}

// ── Header ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 3],
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub checksum: u32,
    pub payload_length: u16,
}

impl Header {
    /// Build a header for a payload this firmware accepts.
    pub const fn new(checksum: u32, payload_length: u16) -> Self {
        Self {
            magic: MAGIC,
            major: SUPPORTED_MAJOR,
            minor: SUPPORTED_MINOR,
            patch: 0,
            checksum,
            payload_length,
        }
    }

    /// Decode the header from the start of `bytes`.
    /// Returns `None` if fewer than [`HEADER_SIZE`] bytes are given.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2]],
            major: bytes[3],
            minor: bytes[4],
            patch: bytes[5],
            checksum: le_u32(bytes, 6),
            payload_length: le_u16(bytes, 10),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..3].copy_from_slice(&self.magic);
        out[3] = self.major;
        out[4] = self.minor;
        out[5] = self.patch;
        out[6..10].copy_from_slice(&self.checksum.to_le_bytes());
        out[10..12].copy_from_slice(&self.payload_length.to_le_bytes());
        out
    }

    /// Magic, then version, then size. The first failure wins.
    pub fn validate(&self) -> Result<(), Fault> {
        if self.magic != MAGIC {
            return Err(Fault::BadMagic(self.magic));
        }

        if self.major != SUPPORTED_MAJOR || self.minor > SUPPORTED_MINOR {
            return Err(Fault::UnsupportedVersion {
                major: self.major,
                minor: self.minor,
            });
        }

        if self.payload_length as usize > MAX_PAYLOAD {
            return Err(Fault::PayloadTooLarge(self.payload_length));
        }

        Ok(())
    }

    /// Header plus payload, i.e. how much of the EEPROM to read.
    pub fn image_len(&self) -> usize {
        HEADER_SIZE + self.payload_length as usize
    }
}
