//! Card identity: the identity record stored on the card and the
//! resolved card the rest of the firmware dispatches on.

use core::fmt;

use crate::error::Fault;

/// TLV type of the identity record.
pub const IDENTITY_TYPE: u8 = 0x01;
/// vendor (u16) + product (u16) + revision (u8)
pub const IDENTITY_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRecord {
    pub vendor_id: u16,
    pub product_id: u16,
    pub revision: u8,
}

impl IdentityRecord {
    pub fn parse(data: &[u8]) -> Option<Self> {
        let raw = data.get(..IDENTITY_SIZE)?;
        Some(Self {
            vendor_id: u16::from_le_bytes([raw[0], raw[1]]),
            product_id: u16::from_le_bytes([raw[2], raw[3]]),
            revision: raw[4],
        })
    }

    pub fn to_bytes(&self) -> [u8; IDENTITY_SIZE] {
        let v = self.vendor_id.to_le_bytes();
        let p = self.product_id.to_le_bytes();
        [v[0], v[1], p[0], p[1], self.revision]
    }
}

/// The card types this firmware knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Switches,
    Encoder,
    Joystick,
}

// (vendor, product, card)
pub const KNOWN_CARDS: &[(u16, u16, CardKind)] = &[
    (0x0001, 0x0001, CardKind::Joystick),
    (0x0001, 0x0002, CardKind::Joystick),
    (0x0001, 0x0003, CardKind::Switches),
];

/// What is (or is not) seated in the card slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIdentity {
    /// Presence pin says the slot is empty.
    Absent,
    /// Something is seated but its descriptor could not be trusted.
    Malformed(Fault),
    /// A valid descriptor for a card this firmware has no driver for.
    Unrecognized { vendor_id: u16, product_id: u16 },
    Switches,
    Encoder,
    Joystick,
}

impl CardIdentity {
    pub const fn kind(self) -> Option<CardKind> {
        match self {
            CardIdentity::Switches => Some(CardKind::Switches),
            CardIdentity::Encoder => Some(CardKind::Encoder),
            CardIdentity::Joystick => Some(CardKind::Joystick),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CardIdentity::Absent => "absent",
            CardIdentity::Malformed(_) => "malformed",
            CardIdentity::Unrecognized { .. } => "unrecognized",
            CardIdentity::Switches => "switches",
            CardIdentity::Encoder => "encoder",
            CardIdentity::Joystick => "joystick",
        }
    }
}

impl From<CardKind> for CardIdentity {
    fn from(kind: CardKind) -> Self {
        match kind {
            CardKind::Switches => CardIdentity::Switches,
            CardKind::Encoder => CardIdentity::Encoder,
            CardKind::Joystick => CardIdentity::Joystick,
        }
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardIdentity::Malformed(fault) => write!(f, "malformed ({})", fault),
            CardIdentity::Unrecognized {
                vendor_id,
                product_id,
            } => write!(f, "unrecognized ({:04x}:{:04x})", vendor_id, product_id),
            other => f.write_str(other.name()),
        }
    }
}

/// Map an identity record through [`KNOWN_CARDS`].
pub fn resolve(record: &IdentityRecord) -> CardIdentity {
    KNOWN_CARDS
        .iter()
        .find(|&&(vendor, product, _)| vendor == record.vendor_id && product == record.product_id)
        .map(|&(_, _, kind)| kind.into())
        .unwrap_or(CardIdentity::Unrecognized {
            vendor_id: record.vendor_id,
            product_id: record.product_id,
        })
}
