//! Pointing-device motion reports.

/// Largest magnitude of a relative axis in a boot-protocol mouse report.
pub const REPORT_LIMIT: i16 = 127;

/// One poll's worth of pointer motion from one half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    /// Horizontal scroll
    pub h: i8,
    /// Vertical scroll
    pub v: i8,
}

impl MotionReport {
    pub fn has_motion(&self) -> bool {
        self.x != 0 || self.y != 0 || self.h != 0 || self.v != 0
    }
}

#[inline]
fn clamp_sum(a: i8, b: i8) -> i8 {
    (a as i16 + b as i16).clamp(-REPORT_LIMIT, REPORT_LIMIT) as i8
}

/// Merge the two halves' reports into the one sent to the host.
///
/// Buttons are OR-ed, every axis is summed and clamped. With only one half
/// moving this is simply that half's motion.
pub fn combine(left: MotionReport, right: MotionReport) -> MotionReport {
    MotionReport {
        buttons: left.buttons | right.buttons,
        x: clamp_sum(left.x, right.x),
        y: clamp_sum(left.y, right.y),
        h: clamp_sum(left.h, right.h),
        v: clamp_sum(left.v, right.v),
    }
}
