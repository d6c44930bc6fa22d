//! Mask images and alpha validation for candidate positions.
//!
//! A mask marks which regions of the map may receive content:
//! - Provide pixels by implementing [`MaskSource`] or by building an [`AlphaMask`].
//! - Check single points with [`is_valid`], which redraws the mask on every call.
//! - Use a [`MaskSnapshot`] to draw once and answer many checks within one distribution call.
use std::fmt;
use std::sync::Arc;

use glam::DVec2;
use tracing::warn;

/// Alpha a pixel must exceed to accept content, out of 255.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 200;

/// Alpha a pixel must exceed to count toward the valid-area estimate.
pub const AREA_ALPHA_THRESHOLD: u8 = 128;

const BYTES_PER_PIXEL: usize = 4;
const ALPHA_OFFSET: usize = 3;

/// Source of mask pixels.
///
/// `rasterize` draws the mask into a fresh RGBA8 surface. Returning `None` means no
/// surface could be acquired; callers treat that as "nothing is valid".
pub trait MaskSource: Send + Sync {
    /// Pixel dimensions `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    fn rasterize(&self) -> Option<MaskRaster>;
}

/// An RGBA8 surface the mask has been drawn into.
#[derive(Clone, PartialEq, Eq)]
pub struct MaskRaster {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl fmt::Debug for MaskRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskRaster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl MaskRaster {
    /// Wraps an RGBA8 buffer. Returns `None` if the length does not match the dimensions.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        (rgba.len() == expected).then_some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at pixel `(x, y)`; reads outside the surface return 0 (transparent).
    #[inline]
    pub fn alpha_at(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.rgba
            .get(idx * BYTES_PER_PIXEL + ALPHA_OFFSET)
            .copied()
            .unwrap_or(0)
    }

    /// Alpha of the pixel under a normalized position.
    #[inline]
    pub fn alpha_at_normalized(&self, p: DVec2) -> u8 {
        let x = (p.x * self.width as f64).floor();
        let y = (p.y * self.height as f64).floor();
        if !x.is_finite() || !y.is_finite() {
            return 0;
        }
        self.alpha_at(x as i64, y as i64)
    }

    /// One alpha sample per pixel: every fourth byte starting at the alpha channel.
    pub fn alpha_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.rgba
            .iter()
            .skip(ALPHA_OFFSET)
            .step_by(BYTES_PER_PIXEL)
            .copied()
    }

    /// Fraction of alpha samples strictly above `threshold`; 0.0 for an empty surface.
    pub fn fraction_above(&self, threshold: u8) -> f64 {
        let mut total = 0usize;
        let mut valid = 0usize;
        for a in self.alpha_bytes() {
            total += 1;
            if a > threshold {
                valid += 1;
            }
        }
        if total == 0 {
            return 0.0;
        }
        valid as f64 / total as f64
    }
}

/// In-memory RGBA8 mask image.
///
/// The pixel buffer is shared, so cloning is cheap. Each [`MaskSource::rasterize`]
/// copies it into a new [`MaskRaster`].
#[derive(Clone)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl fmt::Debug for AlphaMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl AlphaMask {
    /// Creates a mask from tightly packed RGBA8 bytes.
    /// Returns `None` if the buffer length does not match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    /// A mask with the same alpha everywhere (white RGB).
    pub fn filled(width: u32, height: u32, alpha: u8) -> Self {
        Self::from_fn(width, height, |_, _| alpha)
    }

    /// A mask whose alpha at `(x, y)` is produced by `f`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[255, 255, 255, f(x, y)]);
            }
        }
        Self {
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl MaskSource for AlphaMask {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rasterize(&self) -> Option<MaskRaster> {
        MaskRaster::new(self.width, self.height, self.pixels.as_ref().clone())
    }
}

/// Returns `true` if the pixel under `point` has alpha strictly above `alpha_threshold`.
///
/// Redraws the whole mask on every call. Prefer [`MaskSnapshot`] inside loops.
pub fn is_valid(point: DVec2, mask: &dyn MaskSource, alpha_threshold: u8) -> bool {
    match mask.rasterize() {
        Some(raster) => raster.alpha_at_normalized(point) > alpha_threshold,
        None => false,
    }
}

/// Estimated fraction of the mask that is opaque enough to hold content.
pub fn estimate_valid_area_ratio(mask: &dyn MaskSource) -> f64 {
    mask.rasterize()
        .map(|raster| raster.fraction_above(AREA_ALPHA_THRESHOLD))
        .unwrap_or(0.0)
}

/// A mask drawn once and reused for the rest of a distribution call.
///
/// The mask cannot change during a call, so answers match [`is_valid`] exactly.
#[derive(Debug, Clone)]
pub struct MaskSnapshot {
    raster: Option<MaskRaster>,
}

impl MaskSnapshot {
    pub fn capture(mask: &dyn MaskSource) -> Self {
        let raster = mask.rasterize();
        if raster.is_none() {
            let (w, h) = mask.dimensions();
            warn!(
                "Mask surface unavailable ({}x{}); every candidate will be rejected.",
                w, h
            );
        }
        Self { raster }
    }

    /// `false` if the mask surface could not be acquired.
    pub fn is_available(&self) -> bool {
        self.raster.is_some()
    }

    #[inline]
    pub fn is_valid(&self, point: DVec2, alpha_threshold: u8) -> bool {
        self.raster
            .as_ref()
            .is_some_and(|r| r.alpha_at_normalized(point) > alpha_threshold)
    }

    pub fn valid_area_ratio(&self) -> f64 {
        self.raster
            .as_ref()
            .map(|r| r.fraction_above(AREA_ALPHA_THRESHOLD))
            .unwrap_or(0.0)
    }
}
