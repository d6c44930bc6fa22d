use std::path::Path;

use anyhow::Context;
use glam::DVec2;
use image::{Rgb, RgbImage};
use map_distribute::prelude::{MaskSource, PlacementResult};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Output settings for [`render_result_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub land: [u8; 3],
    pub marker: [u8; 3],
    pub marker_radius: i32,
    pub cluster_center: [u8; 3],
    pub alpha_threshold: u8,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [200, 220, 240],
            land: [236, 232, 214],
            marker: [200, 60, 40],
            marker_radius: 3,
            cluster_center: [30, 30, 30],
            alpha_threshold: map_distribute::prelude::DEFAULT_ALPHA_THRESHOLD,
        }
    }

    pub fn with_marker(mut self, color: [u8; 3], radius: i32) -> Self {
        self.marker = color;
        self.marker_radius = radius;
        self
    }
}

/// Draws the mask's valid area, every placed instance and any cluster centers.
pub fn render_result_to_png(
    result: &PlacementResult,
    mask: &dyn MaskSource,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    if let Some(raster) = mask.rasterize() {
        for (x, y, px) in img.enumerate_pixels_mut() {
            let p = DVec2::new((x as f64 + 0.5) / w as f64, (y as f64 + 0.5) / h as f64);
            if raster.alpha_at_normalized(p) > rc.alpha_threshold {
                *px = Rgb(rc.land);
            }
        }
    }

    for instance in &result.instances {
        let (cx, cy) = to_pixel(instance.position, w, h);
        fill_disk(&mut img, cx, cy, rc.marker_radius, rc.marker);
    }

    for center in result.cluster_centers.iter().flatten() {
        let (cx, cy) = to_pixel(*center, w, h);
        for d in -6..=6 {
            put(&mut img, cx + d, cy, rc.cluster_center);
            put(&mut img, cx, cy + d, rc.cluster_center);
        }
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Prints the headline numbers of a placement.
pub fn print_summary(label: &str, result: &PlacementResult) {
    println!(
        "{label}: placed {}/{} in {}/{} attempts, capacity ~{}, efficiency {:.2}",
        result.actual,
        result.requested,
        result.attempts,
        result.max_attempts,
        result.estimated_capacity,
        result.placement_efficiency,
    );
    if let Some(message) = &result.message {
        println!("  warning: {message}");
    }
}

fn to_pixel(p: DVec2, w: u32, h: u32) -> (i32, i32) {
    ((p.x * w as f64) as i32, (p.y * h as f64) as i32)
}

fn fill_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}
