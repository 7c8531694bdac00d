//! Floating point HSV to RGB conversion for pad indicators.

use libm::floorf;

use crate::color::Rgb;

/// Convert a hue/saturation/value triple (all `0.0..=1.0`) to RGB.
///
/// Hue wraps with period `1.0`, so `1.25` renders the same as `0.25`.
/// Hues that are not exact in binary may differ by one step per channel
/// between periods, since `h + 1.0` rounds.
/// A saturation of zero yields grey at the given value regardless of hue.
/// Channels are truncated, not rounded, when scaled to `0..=255`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    if s == 0.0 {
        return channels(v, v, v);
    }

    let scaled = (hue - floorf(hue)) * 6.0;
    let sector = floorf(scaled);
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i32).rem_euclid(6) {
        0 => channels(v, t, p),
        1 => channels(q, v, p),
        2 => channels(p, v, t),
        3 => channels(p, q, v),
        4 => channels(t, p, v),
        _ => channels(v, p, q),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channels(r: f32, g: f32, b: f32) -> Rgb {
    Rgb {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}
