//! Minimum-distance checks between a candidate and already placed markers.
//!
//! Two rules exist side by side:
//! - [`is_spacing_satisfied`] measures edge to edge, subtracting a size-derived radius
//!   from both markers. Clustered placement uses it.
//! - [`is_center_spacing_satisfied`] compares raw center distance. Random placement uses it.
use std::f64::consts::SQRT_2;

use glam::DVec2;

use crate::instance::PlacedInstance;
use crate::map::MapExtent;

/// Radius used for spacing: half the diagonal of a square with side `size_meters`.
///
/// Applied to every marker shape, so round markers get a slightly larger buffer than they need.
#[inline]
pub fn effective_radius(size_meters: f64) -> f64 {
    (size_meters * SQRT_2) / 2.0
}

/// An already placed marker as seen by the spacing checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Normalized position.
    pub position: DVec2,
    /// Marker diameter in meters; `None` falls back to the candidate's size.
    pub size_meters: Option<f64>,
}

impl Footprint {
    pub fn new(position: DVec2, size_meters: f64) -> Self {
        Self {
            position,
            size_meters: Some(size_meters),
        }
    }

    pub fn without_size(position: DVec2) -> Self {
        Self {
            position,
            size_meters: None,
        }
    }
}

impl From<&PlacedInstance> for Footprint {
    fn from(instance: &PlacedInstance) -> Self {
        Self {
            position: instance.position,
            size_meters: instance.size_meters(),
        }
    }
}

/// Edge-to-edge rule: every placed marker must satisfy
/// `distance - r_candidate - r_existing >= min_spacing_meters`.
pub fn is_spacing_satisfied(
    candidate: DVec2,
    placed: &[Footprint],
    min_spacing_meters: f64,
    extent: MapExtent,
    candidate_size_meters: f64,
) -> bool {
    let r_candidate = effective_radius(candidate_size_meters);
    placed.iter().all(|existing| {
        let center = extent.distance_meters(candidate, existing.position);
        let r_existing = effective_radius(existing.size_meters.unwrap_or(candidate_size_meters));
        center - r_candidate - r_existing >= min_spacing_meters
    })
}

/// Center rule: every placed marker must be at least `min_spacing_meters` away, center to center.
pub fn is_center_spacing_satisfied(
    candidate: DVec2,
    placed: &[Footprint],
    min_spacing_meters: f64,
    extent: MapExtent,
) -> bool {
    placed
        .iter()
        .all(|existing| extent.distance_meters(candidate, existing.position) >= min_spacing_meters)
}

/// Edge-to-edge distance between two markers, in meters.
pub fn edge_distance_meters(
    a: DVec2,
    a_size_meters: f64,
    b: DVec2,
    b_size_meters: f64,
    extent: MapExtent,
) -> f64 {
    extent.distance_meters(a, b) - effective_radius(a_size_meters) - effective_radius(b_size_meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km1() -> MapExtent {
        MapExtent::new(1.0, 1.0)
    }

    #[test]
    fn effective_radius_is_half_diagonal() {
        assert!((effective_radius(10.0) - 7.0710678118654755).abs() < 1e-12);
        assert_eq!(effective_radius(0.0), 0.0);
    }

    #[test]
    fn empty_placed_set_always_passes() {
        assert!(is_spacing_satisfied(DVec2::splat(0.5), &[], 1e9, km1(), 10.0));
        assert!(is_center_spacing_satisfied(DVec2::splat(0.5), &[], 1e9, km1()));
    }

    #[test]
    fn radius_correction_rejects_what_center_rule_accepts() {
        // 100 m apart on a 1 km map, markers 20 m wide.
        let placed = [Footprint::new(DVec2::new(0.1, 0.5), 20.0)];
        let candidate = DVec2::new(0.2, 0.5);

        assert!(is_center_spacing_satisfied(candidate, &placed, 90.0, km1()));
        // 100 - 2 * 14.142 = 71.7 < 90
        assert!(!is_spacing_satisfied(candidate, &placed, 90.0, km1(), 20.0));
        assert!(is_spacing_satisfied(candidate, &placed, 70.0, km1(), 20.0));
    }

    #[test]
    fn boundary_distance_is_accepted() {
        let placed = [Footprint::without_size(DVec2::new(0.0, 0.0))];
        let candidate = DVec2::new(0.5, 0.0);
        assert!(is_center_spacing_satisfied(candidate, &placed, 500.0, km1()));
        assert!(!is_center_spacing_satisfied(candidate, &placed, 500.001, km1()));
    }

    #[test]
    fn missing_existing_size_uses_candidate_size() {
        let candidate = DVec2::new(0.2, 0.5);
        let no_size = [Footprint::without_size(DVec2::new(0.1, 0.5))];
        let sized = [Footprint::new(DVec2::new(0.1, 0.5), 20.0)];
        for spacing in [60.0, 71.0, 72.0, 90.0] {
            assert_eq!(
                is_spacing_satisfied(candidate, &no_size, spacing, km1(), 20.0),
                is_spacing_satisfied(candidate, &sized, spacing, km1(), 20.0),
            );
        }
    }

    #[test]
    fn footprint_without_size_comes_from_instances_lacking_size() {
        use crate::instance::Properties;

        let p = DVec2::new(0.3, 0.7);
        assert_eq!(
            Footprint::without_size(p),
            Footprint {
                position: p,
                size_meters: None
            }
        );
        let bare = PlacedInstance::new("a".into(), "camp", p, Properties::new());
        assert_eq!(Footprint::from(&bare), Footprint::without_size(p));
    }

    #[test]
    fn existing_size_changes_the_buffer() {
        let candidate = DVec2::new(0.2, 0.5);
        let small = [Footprint::new(DVec2::new(0.1, 0.5), 0.0)];
        // 100 - 14.142 - 0 = 85.9
        assert!(is_spacing_satisfied(candidate, &small, 85.0, km1(), 20.0));
        assert!(!is_spacing_satisfied(candidate, &small, 86.0, km1(), 20.0));
    }

    #[test]
    fn edge_distance_matches_manual_formula() {
        let d = edge_distance_meters(
            DVec2::new(0.0, 0.0),
            10.0,
            DVec2::new(0.3, 0.4),
            10.0,
            km1(),
        );
        assert!((d - (500.0 - 2.0 * effective_radius(10.0))).abs() < 1e-9);
    }
}
