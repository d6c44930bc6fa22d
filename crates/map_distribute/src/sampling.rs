//! Random draws shared by the placement strategies.
//!
//! Every helper consumes the injected [`RngCore`] in a fixed order so a seeded
//! generator reproduces the same candidate sequence.
use std::f64::consts::TAU;

use glam::DVec2;
use rand::RngCore;

const F64_UNIT: f64 = 1.0 / ((1u64 << 53) as f64);

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    ((rng.next_u64() >> 11) as f64) * F64_UNIT
}

/// Uniform point in the normalized unit square. Draws `x` first, then `y`.
#[inline]
pub(crate) fn unit_point(rng: &mut dyn RngCore) -> DVec2 {
    let x = rand01(rng);
    let y = rand01(rng);
    DVec2::new(x, y)
}

/// Uniform offset inside a disk of `radius`.
///
/// Draws the angle first, then the radial fraction; the square root keeps the
/// area density uniform instead of bunching samples at the center.
#[inline]
pub(crate) fn disk_offset(radius: f64, rng: &mut dyn RngCore) -> DVec2 {
    let angle = rand01(rng) * TAU;
    let distance = rand01(rng).sqrt() * radius.max(0.0);
    DVec2::new(angle.cos() * distance, angle.sin() * distance)
}

/// Clamp a point into the closed unit square.
#[inline]
pub(crate) fn clamp_unit(p: DVec2) -> DVec2 {
    p.clamp(DVec2::ZERO, DVec2::ONE)
}
