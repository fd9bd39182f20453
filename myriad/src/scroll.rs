// Scroll mode
//
// While the scroll key is held, pointer motion from either half is turned
// into single-step scroll pulses instead of cursor movement. Each half
// keeps its own pulse timer and fires when
//
//     max(|x|, |y|) * ms_since_last_pulse > SCROLL_BASE_DELAY
//
// so a brisk push repeats quickly and a gentle one slowly, independent of
// the poll rate. Cursor motion is suppressed on every tick in scroll mode,
// pulse or not.

use crate::report::{self, MotionReport};

/// magnitude x milliseconds needed for one scroll pulse
pub const SCROLL_BASE_DELAY: u32 = 32 * 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Left,
    Right,
}

impl Half {
    const fn index(self) -> usize {
        match self {
            Half::Left => 0,
            Half::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMode {
    active: bool,
    last_pulse_ms: [u32; 2],
}

impl ScrollMode {
    pub const fn new() -> Self {
        Self {
            active: false,
            last_pulse_ms: [0; 2],
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Scroll key press/release. Returns `false`: the key itself never
    /// produces a keycode.
    pub fn on_key(&mut self, pressed: bool) -> bool {
        if pressed != self.active {
            log::debug!("scroll: {}", if pressed { "on" } else { "off" });
        }
        self.active = pressed;
        false
    }

    pub fn last_pulse_ms(&self, half: Half) -> u32 {
        self.last_pulse_ms[half.index()]
    }

    /// Rewrite one half's report for scroll mode. Returns whether a pulse
    /// fired. Does nothing while scroll mode is off.
    pub fn apply(&mut self, half: Half, report: &mut MotionReport, now_ms: u32) -> bool {
        if !self.active {
            return false;
        }

        let last = &mut self.last_pulse_ms[half.index()];
        let magnitude = report.x.unsigned_abs().max(report.y.unsigned_abs()) as u64;
        let elapsed = now_ms.wrapping_sub(*last) as u64;

        let fired = magnitude * elapsed > SCROLL_BASE_DELAY as u64;
        if fired {
            report.v = -report.y.signum();
            report.h = report.x.signum();
            *last = now_ms;
        }

        report.x = 0;
        report.y = 0;
        fired
    }

    /// Scroll-process both halves (when active) and merge them.
    pub fn combine(
        &mut self,
        mut left: MotionReport,
        mut right: MotionReport,
        now_ms: u32,
    ) -> MotionReport {
        self.apply(Half::Left, &mut left, now_ms);
        self.apply(Half::Right, &mut right, now_ms);
        report::combine(left, right)
    }
}
