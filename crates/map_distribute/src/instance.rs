//! Placed instances and their property bags.
use std::collections::BTreeMap;
use std::fmt;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::ContentTypeId;

/// Property keys written by the strategies.
pub mod keys {
    pub const DISTRIBUTION_STRATEGY: &str = "distributionStrategy";
    pub const ATTEMPTS: &str = "attempts";
    pub const MIN_SPACING: &str = "minSpacing";
    pub const SIZE_METERS: &str = "sizeMeters";
    pub const CLUSTER_CENTER: &str = "clusterCenter";
    pub const CLUSTER_RADIUS: &str = "clusterRadius";
}

/// A single value in an instance property bag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Point(DVec2),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<DVec2> {
        match self {
            PropertyValue::Point(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<DVec2> for PropertyValue {
    fn from(value: DVec2) -> Self {
        PropertyValue::Point(value)
    }
}

/// Free-form property bag, ordered by key.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Identifier of a placed instance. Unique within one distribution call only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstanceId(pub String);

impl InstanceId {
    /// Builds the `n`-th identifier handed out by `strategy` during one call.
    pub fn sequential(strategy: &str, n: usize) -> Self {
        Self(format!("{strategy}-{n:05}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// An accepted placement. Created once per successful candidate and never mutated by the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedInstance {
    pub id: InstanceId,
    pub type_id: ContentTypeId,
    /// Normalized position, fraction of map width/height.
    pub position: DVec2,
    pub properties: Properties,
}

impl PlacedInstance {
    pub fn new(
        id: InstanceId,
        type_id: impl Into<ContentTypeId>,
        position: DVec2,
        properties: Properties,
    ) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            position,
            properties,
        }
    }

    /// Marker diameter recorded at placement time, if any.
    pub fn size_meters(&self) -> Option<f64> {
        self.properties
            .get(keys::SIZE_METERS)
            .and_then(PropertyValue::as_number)
    }

    /// Name of the strategy that produced this instance, if recorded.
    pub fn strategy(&self) -> Option<&str> {
        self.properties
            .get(keys::DISTRIBUTION_STRATEGY)
            .and_then(PropertyValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_distinct_and_prefixed() {
        let a = InstanceId::sequential("random", 0);
        let b = InstanceId::sequential("random", 1);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "random-00000");
        assert_eq!(b.to_string(), "random-00001");
    }

    #[test]
    fn provenance_accessors_read_properties() {
        let mut props = Properties::new();
        props.insert(keys::SIZE_METERS.into(), 15.0.into());
        props.insert(keys::DISTRIBUTION_STRATEGY.into(), "clustered".into());
        let instance = PlacedInstance::new("x".into(), "enemies", DVec2::splat(0.5), props);

        assert_eq!(instance.size_meters(), Some(15.0));
        assert_eq!(instance.strategy(), Some("clustered"));
    }

    #[test]
    fn accessors_return_none_for_mismatched_variants() {
        let v = PropertyValue::Bool(true);
        assert!(v.as_number().is_none());
        assert!(v.as_text().is_none());
        assert!(v.as_point().is_none());
    }
}
