//! Uniform random placement by rejection sampling.
use rand::RngCore;
use tracing::debug;

use crate::capacity::estimate_from_ratio;
use crate::constraints::PlacementConstraints;
use crate::content::ContentType;
use crate::events::{EventSink, PlacementEvent, PlacementEventKind, RejectionReason};
use crate::instance::{InstanceId, PlacedInstance};
use crate::mask::MaskSnapshot;
use crate::result::PlacementResult;
use crate::sampling::unit_point;
use crate::spacing::{is_center_spacing_satisfied, Footprint};
use crate::strategy::{emit_started, finish, provenance, PlacementStrategy};

pub const RANDOM_STRATEGY_ID: &str = "random";

/// Draws uniform candidates over the whole map and keeps those on the mask
/// that are far enough (center to center) from everything accepted so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlacement;

impl RandomPlacement {
    pub fn new() -> Self {
        Self
    }
}

impl PlacementStrategy for RandomPlacement {
    fn id(&self) -> &str {
        RANDOM_STRATEGY_ID
    }

    fn distribute_with_events(
        &self,
        content: &ContentType,
        count: usize,
        constraints: &PlacementConstraints,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> PlacementResult {
        let extent = content.map_extent;
        let spacing = constraints.effective_spacing(content);
        let max_attempts = constraints.max_attempts_for(count);
        let mask = MaskSnapshot::capture(constraints.mask.as_ref());
        let estimated_capacity =
            estimate_from_ratio(mask.valid_area_ratio(), spacing, content.size, extent);

        debug!(
            "Random placement of '{}': count {}, spacing {} m, budget {}.",
            content.id, count, spacing, max_attempts
        );
        emit_started(sink, RANDOM_STRATEGY_ID, content, count, max_attempts, spacing);

        let mut instances: Vec<PlacedInstance> = Vec::with_capacity(count);
        let mut footprints: Vec<Footprint> = Vec::with_capacity(count);
        let mut attempts = 0;

        while instances.len() < count && attempts < max_attempts {
            attempts += 1;
            let position = unit_point(rng);

            let rejected = if !mask.is_valid(position, constraints.alpha_threshold) {
                Some(RejectionReason::Mask)
            } else if spacing > 0.0
                && !is_center_spacing_satisfied(position, &footprints, spacing, extent)
            {
                Some(RejectionReason::Spacing)
            } else {
                None
            };

            if let Some(reason) = rejected {
                if sink.wants(PlacementEventKind::CandidateRejected) {
                    sink.send(PlacementEvent::CandidateRejected {
                        attempt: attempts,
                        position,
                        reason,
                    });
                }
                continue;
            }

            let instance = PlacedInstance::new(
                InstanceId::sequential(RANDOM_STRATEGY_ID, instances.len()),
                content.id.clone(),
                position,
                provenance(content, RANDOM_STRATEGY_ID, attempts, spacing),
            );
            if sink.wants(PlacementEventKind::InstancePlaced) {
                sink.send(PlacementEvent::InstancePlaced {
                    instance: instance.clone(),
                });
            }
            footprints.push(Footprint::new(position, content.size));
            instances.push(instance);
        }

        let result = PlacementResult::from_instances(
            instances,
            count,
            attempts,
            max_attempts,
            estimated_capacity,
        );
        finish(sink, RANDOM_STRATEGY_ID, content, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;
    use crate::instance::{keys, PropertyValue};
    use crate::mask::tests::{left_half_mask, UnavailableMask};
    use crate::mask::AlphaMask;
    use crate::sampling::tests::FixedRng;

    fn opaque() -> PlacementConstraints {
        PlacementConstraints::new(AlphaMask::filled(32, 32, 255))
    }

    #[test]
    fn places_everything_on_permissive_input() {
        let content = ContentType::new("debug", 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        let result = RandomPlacement.distribute(&content, 20, &opaque(), &mut rng);

        assert_eq!(result.actual, 20);
        assert!(result.success);
        assert!(result.message.is_none());
        assert!(result.attempts <= 200);
        assert_eq!(result.attempts, 20);
        assert_eq!(result.max_attempts, 200);
        assert_eq!(result.placement_efficiency, 1.0);
        assert!(result.cluster_centers.is_none());
    }

    #[test]
    fn transparent_mask_consumes_whole_budget() {
        let content = ContentType::new("debug", 10.0);
        let constraints = PlacementConstraints::new(AlphaMask::filled(32, 32, 0));
        let mut rng = StdRng::seed_from_u64(2);
        let result = RandomPlacement.distribute(&content, 15, &constraints, &mut rng);

        assert_eq!(result.actual, 0);
        assert_eq!(result.attempts, 150);
        assert!(!result.success);
        assert_eq!(result.estimated_capacity, 0);
        assert_eq!(
            result.message.as_deref(),
            Some("Reached capacity limit. Max ~0 with current spacing")
        );
    }

    #[test]
    fn unavailable_mask_rejects_everything() {
        let content = ContentType::new("debug", 10.0);
        let constraints = PlacementConstraints::new(UnavailableMask);
        let mut rng = StdRng::seed_from_u64(3);
        let result = RandomPlacement.distribute(&content, 5, &constraints, &mut rng);
        assert_eq!(result.actual, 0);
        assert_eq!(result.attempts, 50);
    }

    #[test]
    fn accepted_points_respect_center_spacing() {
        let content = ContentType::new("poi", 50.0).with_min_spacing(400.0);
        let constraints = opaque()
            .with_respect_type_spacing(true)
            .with_max_attempts(5_000);
        let mut rng = StdRng::seed_from_u64(4);
        let result = RandomPlacement.distribute(&content, 100, &constraints, &mut rng);

        assert!(result.actual > 1);
        assert!(result.actual <= 100);
        assert!(result.attempts <= 5_000);
        for (i, a) in result.instances.iter().enumerate() {
            for b in &result.instances[i + 1..] {
                let d = content.map_extent.distance_meters(a.position, b.position);
                assert!(d >= 400.0 - 1e-9, "pair closer than spacing: {d}");
            }
        }
    }

    #[test]
    fn only_opaque_region_receives_instances() {
        let content = ContentType::new("camp", 15.0);
        let constraints = PlacementConstraints::new(left_half_mask());
        let mut rng = StdRng::seed_from_u64(5);
        let result = RandomPlacement.distribute(&content, 40, &constraints, &mut rng);

        assert!(result.actual > 0);
        for instance in &result.instances {
            assert!(instance.position.x < 0.5);
            assert!((0.0..=1.0).contains(&instance.position.y));
        }
    }

    #[test]
    fn instances_carry_provenance_and_unique_ids() {
        let content = ContentType::new("camp", 15.0).with_default_property("enemyCount", 3.0);
        let constraints = opaque().with_min_spacing(10.0);
        let mut rng = StdRng::seed_from_u64(6);
        let result = RandomPlacement.distribute(&content, 10, &constraints, &mut rng);

        let mut ids: Vec<_> = result.instances.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), result.instances.len());

        for instance in &result.instances {
            assert_eq!(instance.type_id, "camp");
            assert_eq!(instance.strategy(), Some("random"));
            assert_eq!(
                instance.properties.get(keys::MIN_SPACING),
                Some(&PropertyValue::Number(10.0))
            );
            assert_eq!(
                instance.properties.get("enemyCount"),
                Some(&PropertyValue::Number(3.0))
            );
            assert!(instance.properties.contains_key(keys::ATTEMPTS));
        }
    }

    #[test]
    fn same_seed_reproduces_placement() {
        let content = ContentType::new("camp", 15.0);
        let constraints = opaque().with_min_spacing(300.0);
        let a = RandomPlacement.distribute(
            &content,
            30,
            &constraints,
            &mut StdRng::seed_from_u64(99),
        );
        let b = RandomPlacement.distribute(
            &content,
            30,
            &constraints,
            &mut StdRng::seed_from_u64(99),
        );
        assert_eq!(a.instances, b.instances);
        assert_eq!(a.attempts, b.attempts);
    }

    #[test]
    fn constant_rng_collides_with_itself() {
        // Every candidate lands on the same spot; only the first survives spacing.
        let content = ContentType::new("camp", 15.0);
        let constraints = opaque().with_min_spacing(1.0);
        let mut rng = FixedRng { value: 1u64 << 62 };
        let result = RandomPlacement.distribute(&content, 3, &constraints, &mut rng);

        assert_eq!(result.actual, 1);
        assert_eq!(result.attempts, 30);
        assert_eq!(result.instances[0].position.x, 0.25);
        assert_eq!(result.instances[0].position.y, 0.25);
    }

    #[test]
    fn zero_spacing_allows_coincident_points() {
        let content = ContentType::new("camp", 15.0);
        let mut rng = FixedRng { value: 1u64 << 62 };
        let result = RandomPlacement.distribute(&content, 3, &opaque(), &mut rng);
        assert_eq!(result.actual, 3);
        assert_eq!(result.attempts, 3);
    }

    #[test]
    fn zero_request_makes_no_attempts() {
        let content = ContentType::new("camp", 15.0);
        let mut rng = StdRng::seed_from_u64(7);
        let result = RandomPlacement.distribute(&content, 0, &opaque(), &mut rng);
        assert!(result.success);
        assert_eq!(result.attempts, 0);
        assert!(result.instances.is_empty());
    }

    #[test]
    fn events_report_rejections_and_placements() {
        let content = ContentType::new("camp", 15.0);
        let constraints = PlacementConstraints::new(left_half_mask());
        let mut rng = StdRng::seed_from_u64(8);
        let mut sink = VecSink::new();
        let result =
            RandomPlacement.distribute_with_events(&content, 10, &constraints, &mut rng, &mut sink);

        assert_eq!(sink.count(PlacementEventKind::DistributionStarted), 1);
        assert_eq!(sink.count(PlacementEventKind::DistributionFinished), 1);
        assert_eq!(sink.count(PlacementEventKind::InstancePlaced), result.actual);
        assert_eq!(
            sink.count(PlacementEventKind::CandidateRejected),
            result.attempts - result.actual
        );
    }
}
