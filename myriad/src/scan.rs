// One scan tick: card hooks, pointer report, scroll mode, merge
//
// The firmware runs tick() every time its scan timer fires. It drives the
// same three hooks the keyboard host would call (matrix, encoder,
// pointing) and merges this half's report with the other half's. The
// transports on either side sit behind the Link trait.
//
// Motion is relative: a report's x/y/h/v are sent once, then cleared.
// Only the button bits carry over to the next tick.

use log::{debug, info};

use crate::card::MatrixRow;
use crate::port::CardPort;
use crate::report::MotionReport;
use crate::scroll::{Half, ScrollMode};
use crate::state::Myriad;

/// Elora: native rows plus the card row.
pub const MATRIX_ROWS: usize = 6;
/// Elora: onboard encoders' pads plus the card's two.
pub const ENCODER_PADS_LEN: usize = 8;

/// Mailboxes between the scan loop and the host transports.
pub trait Link {
    /// Scroll key state change since the last tick (true = pressed).
    fn scroll_key(&mut self) -> Option<bool>;

    /// The other half's report, if one arrived since the last tick.
    fn remote_report(&mut self) -> Option<MotionReport>;

    fn card_row(&mut self, row: MatrixRow);

    fn encoder_pads(&mut self, levels: (bool, bool));

    /// Hand a merged report to the USB side. `false` when its queue is full.
    fn send_report(&mut self, report: MotionReport) -> bool;
}

pub struct Scanner<P> {
    myriad: Myriad,
    port: P,
    half: Half,
    scroll: ScrollMode,
    rows: [MatrixRow; MATRIX_ROWS],
    pads: [bool; ENCODER_PADS_LEN],
    // joystick "previous": buttons only, motion already sent
    local: MotionReport,
    last_sent: MotionReport,
    dropped: u32,
}

impl<P: CardPort> Scanner<P> {
    /// `myriad` should already have run detection; `half` is the side
    /// the card slot is on.
    pub fn new(mut myriad: Myriad, mut port: P, half: Half) -> Self {
        myriad.pointing_init(&mut port);
        Self {
            myriad,
            port,
            half,
            scroll: ScrollMode::new(),
            rows: [0; MATRIX_ROWS],
            pads: [false; ENCODER_PADS_LEN],
            local: MotionReport::default(),
            last_sent: MotionReport::default(),
            dropped: 0,
        }
    }

    pub fn tick<L: Link>(&mut self, link: &mut L, now_ms: u32) {
        if let Some(pressed) = link.scroll_key() {
            self.scroll.on_key(pressed);
        }

        if self.myriad.matrix_hook(&mut self.port, &mut self.rows, now_ms) {
            if let Some(&row) = self.rows.get(self.myriad.layout().matrix_row) {
                debug!("scan: card row {:#07b}", row);
                link.card_row(row);
            }
        }

        let before = self.card_pads();
        self.myriad.encoder_hook(&mut self.port, &mut self.pads, now_ms);
        let after = self.card_pads();
        if let (Some(levels), true) = (after, after != before) {
            link.encoder_pads(levels);
        }

        let local = self
            .myriad
            .pointing_get_report(&mut self.port, self.local, now_ms);
        self.local = MotionReport {
            buttons: local.buttons,
            ..Default::default()
        };
        let remote = link.remote_report().unwrap_or_default();

        let (left, right) = match self.half {
            Half::Left => (local, remote),
            Half::Right => (remote, local),
        };
        let merged = self.scroll.combine(left, right, now_ms);
        self.publish(link, merged);
    }

    pub fn scroll(&self) -> &ScrollMode {
        &self.scroll
    }

    pub fn myriad(&self) -> &Myriad {
        &self.myriad
    }

    /// Reports the USB side had no room for.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    fn card_pads(&self) -> Option<(bool, bool)> {
        let layout = self.myriad.layout();
        Some((*self.pads.get(layout.pad_a)?, *self.pads.get(layout.pad_b)?))
    }

    // Idle reports are sent once, so the host sees motion and buttons stop
    fn publish<L: Link>(&mut self, link: &mut L, report: MotionReport) {
        if !report.has_motion() && report == self.last_sent {
            return;
        }
        if !link.send_report(report) {
            self.dropped += 1;
            if self.dropped.is_power_of_two() {
                info!("scan: pointer queue full, {} reports dropped", self.dropped);
            }
            return;
        }
        self.last_sent = report;
    }
}
