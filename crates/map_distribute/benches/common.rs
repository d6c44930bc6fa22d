//! Shared criterion setup and placement fixtures for the benches.
#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::DVec2;
use map_distribute::prelude::{AlphaMask, Footprint};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Marker diameter used by every bench, in meters.
pub const MARKER_SIZE_M: f64 = 25.0;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in placed (or checked) markers.
pub fn markers_throughput(markers: usize) -> Throughput {
    Throughput::Elements(markers.max(1) as u64)
}

/// Opaque disk covering the inner 80% of a square mask, transparent around it.
pub fn disk_mask(size: u32) -> AlphaMask {
    let half = size as f64 / 2.0;
    let r2 = (half * 0.8) * (half * 0.8);
    AlphaMask::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - half;
        let dy = y as f64 + 0.5 - half;
        if dx * dx + dy * dy < r2 {
            255
        } else {
            0
        }
    })
}

/// Uniform normalized position.
pub fn random_position(rng: &mut StdRng) -> DVec2 {
    let x = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
    let y = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
    DVec2::new(x, y)
}

/// `n` already placed markers of [`MARKER_SIZE_M`] at seeded random positions.
pub fn placed_footprints(n: usize, seed: u64) -> Vec<Footprint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Footprint::new(random_position(&mut rng), MARKER_SIZE_M))
        .collect()
}
