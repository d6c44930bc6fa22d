//! Placement strategies that turn a content type, a count and constraints into positions.
//!
//! Strategies are stateless and draw every random number from the injected
//! [`RngCore`], so a seeded generator reproduces a placement exactly.
use rand::RngCore;
use tracing::{info, warn};

use crate::constraints::PlacementConstraints;
use crate::content::ContentType;
use crate::events::{DistributionSummary, EventSink, PlacementEvent, PlacementEventKind};
use crate::instance::{keys, Properties};
use crate::result::PlacementResult;

pub mod clustered;
pub mod random;
pub mod registry;

pub use clustered::ClusteredPlacement;
pub use random::RandomPlacement;
pub use registry::StrategyRegistry;

/// Trait for placement strategies.
pub trait PlacementStrategy: Send + Sync {
    /// Identifier recorded in instance provenance and used by the registry defaults.
    fn id(&self) -> &str;

    fn distribute_with_events(
        &self,
        content: &ContentType,
        count: usize,
        constraints: &PlacementConstraints,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> PlacementResult;

    fn distribute(
        &self,
        content: &ContentType,
        count: usize,
        constraints: &PlacementConstraints,
        rng: &mut dyn RngCore,
    ) -> PlacementResult {
        self.distribute_with_events(content, count, constraints, rng, &mut ())
    }
}

/// Runs `strategy` with the thread-local system RNG.
pub fn distribute_with_system_rng(
    strategy: &dyn PlacementStrategy,
    content: &ContentType,
    count: usize,
    constraints: &PlacementConstraints,
) -> PlacementResult {
    let mut rng = rand::rng();
    strategy.distribute(content, count, constraints, &mut rng)
}

/// Content defaults first, then placement provenance on top.
pub(crate) fn provenance(
    content: &ContentType,
    strategy: &str,
    attempts: usize,
    effective_spacing: f64,
) -> Properties {
    let mut props = content.default_properties.clone();
    props.insert(keys::DISTRIBUTION_STRATEGY.into(), strategy.into());
    props.insert(keys::ATTEMPTS.into(), attempts.into());
    props.insert(keys::MIN_SPACING.into(), effective_spacing.into());
    props.insert(keys::SIZE_METERS.into(), content.size.into());
    props
}

pub(crate) fn emit_started(
    sink: &mut dyn EventSink,
    strategy: &str,
    content: &ContentType,
    requested: usize,
    max_attempts: usize,
    effective_spacing: f64,
) {
    if sink.wants(PlacementEventKind::DistributionStarted) {
        sink.send(PlacementEvent::DistributionStarted {
            strategy: strategy.to_owned(),
            type_id: content.id.clone(),
            requested,
            max_attempts,
            effective_spacing,
        });
    }
}

/// Logs the outcome and emits the closing events.
pub(crate) fn finish(
    sink: &mut dyn EventSink,
    strategy: &str,
    content: &ContentType,
    result: &PlacementResult,
) {
    info!(
        "{} placement of '{}': {}/{} in {} attempts (capacity ~{}).",
        strategy,
        content.id,
        result.actual,
        result.requested,
        result.attempts,
        result.estimated_capacity,
    );

    if let Some(message) = &result.message {
        warn!("{} placement of '{}': {}.", strategy, content.id, message);
        if sink.wants(PlacementEventKind::Warning) {
            sink.send(PlacementEvent::Warning {
                context: format!("strategy:{} type:{}", strategy, content.id),
                message: message.clone(),
            });
        }
    }

    if sink.wants(PlacementEventKind::DistributionFinished) {
        sink.send(PlacementEvent::DistributionFinished {
            summary: DistributionSummary {
                strategy: strategy.to_owned(),
                requested: result.requested,
                actual: result.actual,
                attempts: result.attempts,
                estimated_capacity: result.estimated_capacity,
                message: result.message.clone(),
            },
        });
    }
}
