// Cross-context mailboxes between the scan loop and the host transports
//
// The split transport fills REMOTE_REPORT and SCROLL_KEY; the scan loop
// drains them with try_take() once per tick. Merged pointer reports go
// out through POINTER_REPORTS to the USB side, card row changes through
// MATRIX_ROW and encoder pad levels through ENCODER_PADS.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use myriad::{MatrixRow, MotionReport};

/// Capacity of the outgoing pointer report channel.
///
/// The USB side polls at 1 ms like the scan, so a handful of slots
/// covers a missed frame or two; reports beyond that are dropped.
pub const POINTER_CHANNEL_CAP: usize = 8;

/// Latest motion report from the other half. `Signal` overwrites: only
/// the newest report matters and each is combined once.
pub static REMOTE_REPORT: Signal<CriticalSectionRawMutex, MotionReport> = Signal::new();

/// Scroll-mode key state (true = pressed) from the keymap.
pub static SCROLL_KEY: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Card matrix row, published whenever it changes.
pub static MATRIX_ROW: Signal<CriticalSectionRawMutex, MatrixRow> = Signal::new();

/// Encoder (phase A, phase B) levels, published whenever they change.
pub static ENCODER_PADS: Signal<CriticalSectionRawMutex, (bool, bool)> = Signal::new();

/// Merged pointer reports for the USB transport.
pub static POINTER_REPORTS: Channel<CriticalSectionRawMutex, MotionReport, POINTER_CHANNEL_CAP> =
    Channel::new();
