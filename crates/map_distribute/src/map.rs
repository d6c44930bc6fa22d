//! Physical map dimensions and conversions from normalized coordinates.
use glam::DVec2;
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAP_EXTENT_KM: f64 = 10.0;

/// Physical size of the map surface in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapExtent {
    pub width_km: f64,
    pub height_km: f64,
}

impl Default for MapExtent {
    fn default() -> Self {
        Self {
            width_km: DEFAULT_MAP_EXTENT_KM,
            height_km: DEFAULT_MAP_EXTENT_KM,
        }
    }
}

impl From<Vector2<f64>> for MapExtent {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl MapExtent {
    pub fn new(width_km: f64, height_km: f64) -> Self {
        Self {
            width_km,
            height_km,
        }
    }

    #[inline]
    pub fn width_m(&self) -> f64 {
        self.width_km * 1000.0
    }

    #[inline]
    pub fn height_m(&self) -> f64 {
        self.height_km * 1000.0
    }

    /// Total surface in square meters.
    #[inline]
    pub fn area_m2(&self) -> f64 {
        self.width_km * self.height_km * 1_000_000.0
    }

    /// Converts a normalized position to meters from the top-left corner.
    #[inline]
    pub fn to_meters(&self, p: DVec2) -> DVec2 {
        DVec2::new(p.x * self.width_m(), p.y * self.height_m())
    }

    /// Euclidean center-to-center distance in meters between two normalized positions.
    #[inline]
    pub fn distance_meters(&self, a: DVec2, b: DVec2) -> f64 {
        self.to_meters(a).distance(self.to_meters(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_by_ten() {
        let extent = MapExtent::default();
        assert_eq!(extent.width_km, 10.0);
        assert_eq!(extent.height_km, 10.0);
        assert_eq!(extent.area_m2(), 100_000_000.0);
    }

    #[test]
    fn distance_scales_axes_independently() {
        let extent = MapExtent::new(2.0, 1.0);
        let d = extent.distance_meters(DVec2::new(0.0, 0.0), DVec2::new(0.5, 0.0));
        assert!((d - 1000.0).abs() < 1e-9);
        let d = extent.distance_meters(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.5));
        assert!((d - 500.0).abs() < 1e-9);
    }

    #[test]
    fn converts_from_mint() {
        let extent: MapExtent = Vector2 { x: 4.0, y: 3.0 }.into();
        assert_eq!(extent, MapExtent::new(4.0, 3.0));
    }
}
