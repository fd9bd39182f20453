// Joystick axis filter
//
// Raw ADC sample (0..=1023)
//   -> recenter around 0 (-512..=511, one axis flipped for mounting)
//   -> dead zone: |v| < 10 becomes 0, |v| >= 10 passes
//   -> integer divide by 16
//   -> clamp to -127..=127 (a HID relative axis)
//
// Each axis is filtered on its own; there is no radial dead zone.

use crate::port::ADC_MAX;

pub const CENTER: i16 = 512;
pub const DEAD_ZONE: i16 = 10;
pub const SCALE_DIVISOR: i16 = 16;
pub const AXIS_LIMIT: i16 = 127;

/// Minimum time between two real samples.
pub const MIN_INTERVAL_MS: u32 = 10;

pub fn recenter(raw: u16, inverted: bool) -> i16 {
    let centered = raw.min(ADC_MAX) as i16 - CENTER;
    if inverted { -centered } else { centered }
}

pub fn dead_zone(value: i16) -> i16 {
    if value.unsigned_abs() < DEAD_ZONE as u16 { 0 } else { value }
}

pub fn scale(value: i16) -> i8 {
    (value / SCALE_DIVISOR).clamp(-AXIS_LIMIT, AXIS_LIMIT) as i8
}

pub fn axis(raw: u16, inverted: bool) -> i8 {
    scale(dead_zone(recenter(raw, inverted)))
}
