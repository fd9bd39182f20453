// Scan timing and cross-context plumbing
// Single core, no preemption. WFI idles the CPU between scan ticks.
//
// wake: timer ISR -> main loop flag, millisecond uptime
// link: embassy-sync mailboxes to and from the host transports
// scan: Link implementation over those mailboxes

pub mod link;
pub mod scan;
pub mod wake;

pub use scan::Mailboxes;
pub use wake::{try_wake, uptime_ms, wait_for_interrupt};
