//! Content type descriptors: what is being placed and how large it is.
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instance::{Properties, PropertyValue};
use crate::map::MapExtent;

pub type ContentTypeId = String;

/// Describes one kind of map content (camps, shrines, fast travel points...).
///
/// Supplied fresh for each distribution call; strategies only read it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentType {
    /// Identifier copied into every placed instance.
    pub id: ContentTypeId,
    /// Marker diameter in meters.
    pub size: f64,
    /// Minimum spacing to same-type neighbors in meters.
    pub min_spacing: f64,
    /// Whether markers of this type may overlap.
    pub can_overlap: bool,
    /// Physical map size the normalized positions refer to.
    pub map_extent: MapExtent,
    /// Properties copied into every placed instance before placement provenance.
    pub default_properties: Properties,
}

impl ContentType {
    pub fn new(id: impl Into<ContentTypeId>, size: f64) -> Self {
        Self {
            id: id.into(),
            size,
            min_spacing: 0.0,
            can_overlap: false,
            map_extent: MapExtent::default(),
            default_properties: Properties::new(),
        }
    }

    pub fn with_min_spacing(mut self, min_spacing: f64) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn with_can_overlap(mut self, can_overlap: bool) -> Self {
        self.can_overlap = can_overlap;
        self
    }

    /// Sets the map size in kilometers, e.g. `[20.0, 10.0]` or a `DVec2`.
    pub fn with_map_extent_km(mut self, extent: impl Into<Vector2<f64>>) -> Self {
        self.map_extent = MapExtent::from(extent.into());
        self
    }

    pub fn with_default_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.default_properties.insert(key.into(), value.into());
        self
    }

    /// Checks the numeric fields before handing the descriptor to a strategy.
    ///
    /// Strategies assume validated input and never call this themselves.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidConfig("content type id must not be empty".into()));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "content type '{}': size must be a positive number of meters",
                self.id
            )));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "content type '{}': min_spacing must be >= 0",
                self.id
            )));
        }
        let MapExtent {
            width_km,
            height_km,
        } = self.map_extent;
        if !(width_km.is_finite() && height_km.is_finite()) || width_km <= 0.0 || height_km <= 0.0
        {
            return Err(Error::InvalidConfig(format!(
                "content type '{}': map extent must be > 0 in both components",
                self.id
            )));
        }
        Ok(())
    }
}
