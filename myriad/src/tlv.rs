//! Tag-length-value record scanning.
//!
//! The payload is a run of entries with no padding or alignment:
//! `[type: u8][length: u8][length bytes of data]`. Unknown entries are
//! skipped using their own length byte, so a single corrupt length throws
//! the rest of the scan off; that is the format's only framing.
//!
//! Offsets are absolute into the whole EEPROM image (header included).

use crate::header::HEADER_SIZE;

/// Type byte plus length byte.
pub const ENTRY_OVERHEAD: usize = 2;

/// Outcome of [`locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locate {
    /// Offset of the entry's data (just past its length byte).
    Found(usize),
    /// The type matched but the declared length did not.
    WrongLength { declared: u8 },
    /// No entry of that type before the end of the scanned range.
    NotFound,
}

/// Find the first entry of `entry_type` between `min` and `max`.
///
/// `min` is clamped up to [`HEADER_SIZE`], so `0` means "first record".
/// `max` is clamped to `data.len()`. An entry whose header or data would
/// run past `max` ends the scan with [`Locate::NotFound`].
pub fn locate(entry_type: u8, expected_len: u8, data: &[u8], min: usize, max: usize) -> Locate {
    let end = max.min(data.len());
    let stream = &data[..end];
    let mut offset = min.max(HEADER_SIZE);

    while offset < end {
        let Some(&[tag, len]) = stream.get(offset..offset + ENTRY_OVERHEAD) else {
            return Locate::NotFound;
        };
        let data_start = offset + ENTRY_OVERHEAD;
        let next = data_start + len as usize;

        if tag == entry_type {
            if len != expected_len {
                return Locate::WrongLength { declared: len };
            }
            if next > end {
                return Locate::NotFound;
            }
            return Locate::Found(data_start);
        }

        offset = next;
    }

    Locate::NotFound
}

/// Iterator over complete entries, yielding `(type, data)`.
/// Stops at the first entry that does not fit.
pub struct Entries<'a> {
    stream: &'a [u8],
    offset: usize,
}

/// Walk every entry of an EEPROM image after the header.
pub fn entries(image: &[u8]) -> Entries<'_> {
    Entries {
        stream: image,
        offset: HEADER_SIZE,
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let &[tag, len] = self.stream.get(self.offset..self.offset + ENTRY_OVERHEAD)? else {
            return None;
        };
        let start = self.offset + ENTRY_OVERHEAD;
        let data = self.stream.get(start..start + len as usize)?;
        self.offset = start + len as usize;
        Some((tag, data))
    }
}
