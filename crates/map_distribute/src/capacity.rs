//! Advisory estimate of how many markers a map can hold.
//!
//! The estimate feeds diagnostic messages only and never caps a placement loop.
use std::f64::consts::PI;

use crate::map::MapExtent;
use crate::mask::{estimate_valid_area_ratio, MaskSource};

/// Fraction of the ideal area that random placement actually fills.
pub const PACKING_EFFICIENCY: f64 = 0.7;

/// Estimates the maximum marker count for `mask` at the given size and spacing.
pub fn estimate_max_capacity(
    mask: &dyn MaskSource,
    min_spacing_meters: f64,
    marker_size_meters: f64,
    extent: MapExtent,
) -> usize {
    estimate_from_ratio(
        estimate_valid_area_ratio(mask),
        min_spacing_meters,
        marker_size_meters,
        extent,
    )
}

/// Capacity arithmetic for an already known valid-area ratio.
///
/// Each marker claims a disk whose diameter is `r + min_spacing + r`. The float-to-integer
/// conversion saturates: zero per-marker area gives `usize::MAX`, NaN gives 0.
pub fn estimate_from_ratio(
    valid_area_ratio: f64,
    min_spacing_meters: f64,
    marker_size_meters: f64,
    extent: MapExtent,
) -> usize {
    let usable_area = extent.area_m2() * valid_area_ratio;
    let radius = marker_size_meters / 2.0;
    let claim_radius = (radius + min_spacing_meters + radius) / 2.0;
    let area_per_marker = PI * claim_radius * claim_radius;
    ((usable_area / area_per_marker) * PACKING_EFFICIENCY).floor() as usize
}
