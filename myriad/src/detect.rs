// Card detection
//
// The presence pin has an external pull-up; a seated card shorts it to
// ground. With a card present the EEPROM image is read and validated in
// order, the first failure deciding the outcome:
//
//   1. header magic, version, payload size
//   2. full image read, checksum over the payload
//   3. identity record located in the TLV stream
//   4. vendor/product looked up in KNOWN_CARDS
//
// Bus errors abort on the spot. Nothing is retried: one attempt per boot.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{debug, info, warn};

use crate::bus::CardReader;
use crate::checksum::rolling_checksum;
use crate::error::Fault;
use crate::header::{EEPROM_CAPACITY, HEADER_SIZE, Header};
use crate::identity::{self, CardIdentity, IDENTITY_SIZE, IDENTITY_TYPE, IdentityRecord};
use crate::tlv::{self, Locate};

/// Time for the presence line to settle after configuring it.
pub const PRESENCE_SETTLE_MS: u32 = 100;

/// Check the slot and decode whatever is in it.
pub fn probe<P, R, D>(present: &mut P, reader: &mut R, delay: &mut D) -> CardIdentity
where
    P: InputPin,
    R: CardReader,
    D: DelayNs,
{
    delay.delay_ms(PRESENCE_SETTLE_MS);

    if !cfg!(feature = "override-presence") {
        match present.is_high() {
            Ok(true) => {
                info!("myriad: slot empty");
                return CardIdentity::Absent;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("myriad: presence pin unreadable: {:?}", e);
                return CardIdentity::Absent;
            }
        }
    }

    let identity = match decode(reader) {
        Ok(identity) => identity,
        Err(fault) => {
            warn!("myriad: card rejected: {}", fault);
            CardIdentity::Malformed(fault)
        }
    };
    info!("myriad: card {}", identity);
    identity
}

/// Read and validate the card image, then resolve its identity.
pub fn decode<R: CardReader>(reader: &mut R) -> Result<CardIdentity, Fault> {
    let mut image = [0u8; EEPROM_CAPACITY];

    read(reader, &mut image[..HEADER_SIZE])?;
    let header = Header::parse(&image).ok_or(Fault::Bus)?;
    header.validate()?;
    debug!(
        "myriad: header v{}.{}.{}, {} byte payload",
        header.major, header.minor, header.patch, header.payload_length
    );

    let image = &mut image[..header.image_len()];
    read(reader, image)?;
    verify_checksum(image, header.checksum)?;

    for (tag, data) in tlv::entries(image) {
        debug!("myriad: record {:#04x}, {} bytes", tag, data.len());
    }

    let record = read_identity(image)?;
    debug!(
        "myriad: vendor {:#06x} product {:#06x} rev {}",
        record.vendor_id, record.product_id, record.revision
    );
    Ok(identity::resolve(&record))
}

fn read<R: CardReader>(reader: &mut R, buf: &mut [u8]) -> Result<(), Fault> {
    reader.read(buf).map_err(|e| {
        warn!("myriad: eeprom read of {} bytes failed: {:?}", buf.len(), e);
        Fault::Bus
    })
}

/// `image` is header + payload; only the payload is summed.
pub fn verify_checksum(image: &[u8], stored: u32) -> Result<(), Fault> {
    let computed = rolling_checksum(image.get(HEADER_SIZE..).unwrap_or(&[]));
    if computed != stored {
        return Err(Fault::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

pub fn read_identity(image: &[u8]) -> Result<IdentityRecord, Fault> {
    match tlv::locate(IDENTITY_TYPE, IDENTITY_SIZE as u8, image, 0, image.len()) {
        Locate::Found(at) => IdentityRecord::parse(&image[at..]).ok_or(Fault::IdentityMissing),
        Locate::WrongLength { declared } => Err(Fault::IdentityWrongLength(declared)),
        Locate::NotFound => Err(Fault::IdentityMissing),
    }
}
