#![forbid(unsafe_code)]
//! map_distribute: Mask-aware content distribution on 2D maps.
//!
//! Modules:
//! - mask, spacing, capacity: the checks and estimates every strategy relies on
//! - strategy: random and clustered placement plus the strategy registry
//! - store, validation: caller-side storage and audit of placed instances
//! - events: observe a distribution call as it runs
//!
//! Positions are normalized to [0, 1] on both axes; distances and sizes are in meters.
pub mod capacity;
pub mod constraints;
pub mod content;
pub mod error;
pub mod events;
pub mod instance;
pub mod map;
pub mod mask;
pub mod result;
pub(crate) mod sampling;
pub mod spacing;
pub mod store;
pub mod strategy;
pub mod validation;

/// Convenient re-exports for common types. Import with `use map_distribute::prelude::*;`.
pub mod prelude {
    pub use crate::capacity::{estimate_from_ratio, estimate_max_capacity, PACKING_EFFICIENCY};
    pub use crate::constraints::PlacementConstraints;
    pub use crate::content::{ContentType, ContentTypeId};
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        DistributionSummary, EventSink, FnSink, MultiSink, PlacementEvent, PlacementEventKind,
        RejectionReason, VecSink,
    };
    pub use crate::instance::{keys, InstanceId, PlacedInstance, Properties, PropertyValue};
    pub use crate::map::MapExtent;
    pub use crate::mask::{
        estimate_valid_area_ratio, is_valid, AlphaMask, MaskRaster, MaskSnapshot, MaskSource,
        DEFAULT_ALPHA_THRESHOLD,
    };
    pub use crate::result::PlacementResult;
    pub use crate::spacing::{
        effective_radius, is_center_spacing_satisfied, is_spacing_satisfied, Footprint,
    };
    pub use crate::store::{validate_instance, InstanceStore};
    pub use crate::strategy::{
        distribute_with_system_rng, ClusteredPlacement, PlacementStrategy, RandomPlacement,
        StrategyRegistry,
    };
    pub use crate::validation::{
        PositionValidator, ValidationKind, ValidationResult, ValidationStats,
    };
}
