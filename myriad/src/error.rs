//! Reasons a seated card is rejected.
//!
//! Every variant collapses to [`CardIdentity::Malformed`] for dispatch
//! purposes; the reason is kept so it can be logged or shown to the user.
//!
//! [`CardIdentity::Malformed`]: crate::identity::CardIdentity::Malformed

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// The EEPROM did not acknowledge or a transfer failed part way.
    #[error("bus read failed")]
    Bus,

    #[error("bad magic {0:02x?}")]
    BadMagic([u8; 3]),

    /// Major differs, or minor is newer than what this firmware knows.
    #[error("unsupported version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("payload length {0} exceeds EEPROM capacity")]
    PayloadTooLarge(u16),

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// No identity entry in the record stream.
    #[error("identity record missing")]
    IdentityMissing,

    /// An identity entry exists but declares the wrong size: either a
    /// corrupt card or a record layout this firmware does not support.
    #[error("identity record declares {0} bytes")]
    IdentityWrongLength(u8),
}
