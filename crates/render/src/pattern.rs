//! Procedural XOR colors.
//!
//! Coordinates are scaled, truncated toward zero, XORed, then reduced with a
//! non-negative remainder. The exact scales and moduli are part of the look;
//! the near-constant red (cubes) and green (loading) channels are kept as is.

use bealtmian_common::Rgb;
use glam::DVec3;

/// Inclusive range of the per-band sky brightness.
pub const SKY_NOISE_RANGE: (i64, i64) = (20, 60);

fn quantize(v: f64) -> i64 {
    v as i64
}

fn channel(v: i64, modulus: i64) -> u8 {
    v.rem_euclid(modulus) as u8
}

/// Magenta floor tile color keyed on the tile's (x, z) corner.
pub fn floor_color(x: f64, z: f64) -> Rgb {
    let v = channel(quantize(x * 5.0) ^ quantize(z * 5.0), 246);
    Rgb::new(v, 0, v)
}

/// Face color of a cube centered at `position`.
pub fn cube_color(position: DVec3) -> Rgb {
    let x = quantize(position.x * 50.0);
    let y = quantize(position.y * 50.0);
    let z = quantize(position.z * 50.0);
    Rgb::new(channel(x ^ z, 2), channel(y ^ z, 255), channel(x ^ y, 255))
}

/// Loading-screen tile color for the tile at pixel `(x, y)`, scrolled by
/// `offset` pixels.
pub fn loading_color(x: i64, y: i64, offset: i64) -> Rgb {
    let q = |v: i64| quantize(v as f64 * 0.1);
    Rgb::new(
        channel(q(x + offset) ^ q(y), 255),
        channel(q(x) ^ q(y + offset), 2),
        channel(q(x + offset) ^ q(y + offset), 255),
    )
}

/// Sky band color for a brightness drawn from `SKY_NOISE_RANGE`.
pub fn sky_color(noise: u8) -> Rgb {
    Rgb::new(noise, noise, noise.saturating_add(20))
}
