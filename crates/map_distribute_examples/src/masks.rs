use std::path::Path;

use anyhow::Context;
use map_distribute::prelude::AlphaMask;

/// Loads a PNG and keeps its RGBA pixels as a placement mask.
pub fn load_png_mask(path: impl AsRef<Path>) -> anyhow::Result<AlphaMask> {
    let path = path.as_ref();
    let rgba = image::open(path)
        .with_context(|| format!("failed to open mask '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    AlphaMask::from_rgba8(width, height, rgba.into_raw())
        .with_context(|| format!("mask '{}' has an unexpected pixel layout", path.display()))
}

/// A procedural island: opaque inside a wobbly circle, transparent water outside.
pub fn island_mask(size: u32) -> AlphaMask {
    let half = size as f64 / 2.0;
    AlphaMask::from_fn(size, size, |x, y| {
        let dx = (x as f64 + 0.5 - half) / half;
        let dy = (y as f64 + 0.5 - half) / half;
        let angle = dy.atan2(dx);
        let shore = 0.75 + 0.08 * (angle * 5.0).sin() + 0.04 * (angle * 11.0).cos();
        let d = (dx * dx + dy * dy).sqrt();
        if d < shore - 0.05 {
            255
        } else if d < shore {
            // Beach fades out; only part of it clears the default threshold.
            (255.0 * (shore - d) / 0.05) as u8
        } else {
            0
        }
    })
}
