// myriad: no_std support for Myriad expansion cards on split keyboards.
//
// header:   fixed 12-byte EEPROM header, version and size validation
// checksum: Adler-style rolling checksum over the payload
// tlv:      bounds-checked tag-length-value record scanning
// identity: identity record and vendor/product -> card resolution
// bus:      paged EEPROM reader over embedded-hal I2C
// detect:   presence check + full descriptor decode
// port:     pin/ADC contract the host board implements
// card:     per-card drivers (switches, encoder, joystick) and dispatch
// filter:   joystick dead zone, scaling and clamping
// report:   pointing-device motion reports and combining
// scroll:   scroll mode, rate-adaptive scroll pulses per half
// state:    the owned, memoized card state the host drives each tick
// scan:     one firmware tick: hooks, scroll mode, half merge, publish

#![no_std]

pub mod bus;
pub mod card;
pub mod checksum;
pub mod detect;
pub mod error;
pub mod filter;
pub mod header;
pub mod identity;
pub mod port;
pub mod report;
pub mod scan;
pub mod scroll;
pub mod state;
pub mod tlv;

pub use bus::{CardReader, Eeprom};
pub use card::{CardDevice, CardDriver, Layout, MatrixRow, RowSample};
pub use error::Fault;
pub use header::Header;
pub use identity::{CardIdentity, CardKind, IdentityRecord};
pub use port::{AnalogChannel, CardPort, Line};
pub use report::MotionReport;
pub use scan::{Link, Scanner};
pub use scroll::{Half, ScrollMode};
pub use state::{Detection, Myriad};
pub use tlv::Locate;
