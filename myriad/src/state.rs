//! Card state owned by the firmware for the whole power cycle.
//!
//! Two independent pieces:
//!
//! - [`Detection`]: `Unknown` until [`Myriad::detect`] runs, then the
//!   resolved identity forever. Never re-read.
//! - the init latch: `Pending` until the first hook call after detection,
//!   then `Ready` with the card's driver. Connector setup happens exactly
//!   once, on that transition.
//!
//! The host calls the hooks from its single scan loop; nothing here is
//! shared across tasks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{debug, warn};

use crate::bus::CardReader;
use crate::card::{CardDevice, CardDriver, Layout, MatrixRow};
use crate::detect;
use crate::identity::CardIdentity;
use crate::port::{AnalogChannel, CardPort};
use crate::report::MotionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Unknown,
    Resolved(CardIdentity),
}

#[derive(Debug, Clone, Copy)]
enum Latch {
    Pending,
    Ready(CardDriver),
}

pub struct Myriad {
    detection: Detection,
    latch: Latch,
    layout: Layout,
}

impl Myriad {
    pub const fn new(layout: Layout) -> Self {
        Self {
            detection: Detection::Unknown,
            latch: Latch::Pending,
            layout,
        }
    }

    /// Skip detection, e.g. for boards with a soldered-down card.
    pub const fn with_identity(identity: CardIdentity, layout: Layout) -> Self {
        Self {
            detection: Detection::Resolved(identity),
            latch: Latch::Pending,
            layout,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn detection(&self) -> Detection {
        self.detection
    }

    pub fn identity(&self) -> Option<CardIdentity> {
        match self.detection {
            Detection::Resolved(identity) => Some(identity),
            Detection::Unknown => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.latch, Latch::Ready(_))
    }

    /// Determine card presence and identity. The first call does the
    /// work; later calls return the cached result without touching the
    /// pin or the bus. Does not configure the card.
    pub fn detect<P, R, D>(&mut self, present: &mut P, reader: &mut R, delay: &mut D) -> CardIdentity
    where
        P: InputPin,
        R: CardReader,
        D: DelayNs,
    {
        if let Detection::Resolved(identity) = self.detection {
            return identity;
        }
        let identity = detect::probe(present, reader, delay);
        self.detection = Detection::Resolved(identity);
        identity
    }

    /// Configure the connector for the detected card, once.
    ///
    /// Returns the driver, or `None` while detection has not run yet (the
    /// latch stays open so a later call can still initialize).
    pub fn ensure_initialized<P: CardPort>(
        &mut self,
        port: &mut P,
        now_ms: u32,
    ) -> Option<&mut CardDriver> {
        if let Latch::Pending = self.latch {
            let Detection::Resolved(identity) = self.detection else {
                debug!("myriad: hook called before detection");
                return None;
            };

            let mut driver = CardDriver::for_identity(identity);
            if let Err(e) = driver.init(port, now_ms) {
                // Latched regardless: setup is attempted once per boot
                warn!("myriad: {} init failed: {:?}", identity, e);
            }
            self.latch = Latch::Ready(driver);
        }

        match &mut self.latch {
            Latch::Ready(driver) => Some(driver),
            Latch::Pending => None,
        }
    }

    /// Matrix scan hook. Writes the card row into `rows` and returns
    /// whether it changed since the previous scan.
    pub fn matrix_hook<P: CardPort>(
        &mut self,
        port: &mut P,
        rows: &mut [MatrixRow],
        now_ms: u32,
    ) -> bool {
        let slot = self.layout.matrix_row;
        let Some(driver) = self.ensure_initialized(port, now_ms) else {
            return false;
        };

        let sample = match driver.scan(port) {
            Ok(Some(sample)) => sample,
            Ok(None) => return false,
            Err(e) => {
                warn!("myriad: matrix scan failed: {:?}", e);
                return false;
            }
        };

        let Some(row) = rows.get_mut(slot) else {
            warn!("myriad: matrix has no row {}", slot);
            return false;
        };
        *row = sample.word;
        sample.changed
    }

    /// Encoder hook. Writes the phase levels into the card's pad slots;
    /// leaves `pads` alone for every other card.
    ///
    /// Takes no encoder count: the host's count is `pads.len()`.
    pub fn encoder_hook<P: CardPort>(&mut self, port: &mut P, pads: &mut [bool], now_ms: u32) {
        let layout = self.layout;
        let Some(driver) = self.ensure_initialized(port, now_ms) else {
            return;
        };

        let (a, b) = match driver.pads(port) {
            Ok(Some(levels)) => levels,
            Ok(None) => return,
            Err(e) => {
                warn!("myriad: encoder read failed: {:?}", e);
                return;
            }
        };

        if layout.pad_a.max(layout.pad_b) >= pads.len() {
            warn!("myriad: pad array too short ({})", pads.len());
            return;
        }
        pads[layout.pad_a] = a;
        pads[layout.pad_b] = b;
    }

    /// Pointing driver init: put both analog lines in input mode.
    pub fn pointing_init<P: CardPort>(&mut self, port: &mut P) {
        for channel in [AnalogChannel::Adc1, AnalogChannel::Adc2] {
            if let Err(e) = port.set_analog_input(channel) {
                warn!("myriad: analog setup failed: {:?}", e);
            }
        }
    }

    /// Pointing driver report. Non-joystick cards hand `report` back
    /// unchanged.
    pub fn pointing_get_report<P: CardPort>(
        &mut self,
        port: &mut P,
        report: MotionReport,
        now_ms: u32,
    ) -> MotionReport {
        let Some(driver) = self.ensure_initialized(port, now_ms) else {
            return report;
        };

        match driver.motion(port, report, now_ms) {
            Ok(Some(next)) => next,
            Ok(None) => report,
            Err(e) => {
                warn!("myriad: joystick read failed: {:?}", e);
                report
            }
        }
    }
}

impl Default for Myriad {
    fn default() -> Self {
        Self::new(Layout::ELORA)
    }
}
