//! Two-phase clustered placement.
//!
//! Phase one scatters mutually spaced cluster centers over the mask. Phase two fills
//! each cluster by sampling uniformly inside a disk around its center, checking the
//! edge-to-edge spacing rule against every instance accepted so far.
use glam::DVec2;
use rand::RngCore;
use tracing::debug;

use crate::capacity::estimate_from_ratio;
use crate::constraints::PlacementConstraints;
use crate::content::ContentType;
use crate::events::{EventSink, PlacementEvent, PlacementEventKind, RejectionReason};
use crate::instance::{keys, InstanceId, PlacedInstance};
use crate::map::MapExtent;
use crate::mask::MaskSnapshot;
use crate::result::PlacementResult;
use crate::sampling::{clamp_unit, disk_offset, unit_point};
use crate::spacing::{is_spacing_satisfied, Footprint};
use crate::strategy::{emit_started, finish, provenance, PlacementStrategy};

pub const CLUSTERED_STRATEGY_ID: &str = "clustered";

/// Requested instances per cluster when no cluster count is given.
pub const INSTANCES_PER_CLUSTER: usize = 10;

/// Candidate draws granted per requested cluster center in phase one.
pub const CENTER_ATTEMPTS_PER_CLUSTER: usize = 10;

/// Default cluster radius in meters per kilometer of map width (5% of the width).
pub const DEFAULT_CLUSTER_RADIUS_M_PER_KM: f64 = 50.0;

/// Groups instances around randomly scattered centers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusteredPlacement;

impl ClusteredPlacement {
    pub fn new() -> Self {
        Self
    }
}

/// Minimum distance between cluster centers in kilometers: half the side of the
/// square each cluster would own if the map were split evenly.
pub fn min_cluster_spacing_km(extent: MapExtent, cluster_count: usize) -> f64 {
    ((extent.width_km * extent.height_km) / cluster_count as f64).sqrt() * 0.5
}

/// Number of cluster centers to look for.
pub fn cluster_count_for(count: usize, constraints: &PlacementConstraints) -> usize {
    constraints
        .cluster_count
        .unwrap_or_else(|| count.div_ceil(INSTANCES_PER_CLUSTER))
}

/// Cluster radius in meters.
pub fn cluster_radius_for(extent: MapExtent, constraints: &PlacementConstraints) -> f64 {
    constraints
        .cluster_radius
        .unwrap_or(extent.width_km * DEFAULT_CLUSTER_RADIUS_M_PER_KM)
}

fn find_cluster_centers(
    cluster_count: usize,
    extent: MapExtent,
    mask: &MaskSnapshot,
    alpha_threshold: u8,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Vec<DVec2> {
    let mut centers: Vec<DVec2> = Vec::with_capacity(cluster_count);
    if cluster_count == 0 {
        return centers;
    }

    let max_attempts = cluster_count.saturating_mul(CENTER_ATTEMPTS_PER_CLUSTER);
    let min_spacing_m = min_cluster_spacing_km(extent, cluster_count) * 1000.0;
    let mut attempts = 0;

    while centers.len() < cluster_count && attempts < max_attempts {
        attempts += 1;
        let position = unit_point(rng);

        if !mask.is_valid(position, alpha_threshold) {
            continue;
        }
        if !centers
            .iter()
            .all(|c| extent.distance_meters(position, *c) >= min_spacing_m)
        {
            continue;
        }

        if sink.wants(PlacementEventKind::ClusterCenterAccepted) {
            sink.send(PlacementEvent::ClusterCenterAccepted {
                index: centers.len(),
                position,
            });
        }
        centers.push(position);
    }

    debug!(
        "Found {}/{} cluster centers in {} attempts (min spacing {:.1} m).",
        centers.len(),
        cluster_count,
        attempts,
        min_spacing_m
    );
    centers
}

impl PlacementStrategy for ClusteredPlacement {
    fn id(&self) -> &str {
        CLUSTERED_STRATEGY_ID
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
        let radius_m = cluster_radius_for(extent, constraints);
        let mask = MaskSnapshot::capture(constraints.mask.as_ref());

        debug!(
            "Clustered placement of '{}': count {}, spacing {} m, radius {} m, budget {}.",
            content.id, count, spacing, radius_m, max_attempts
        );
        emit_started(
            sink,
            CLUSTERED_STRATEGY_ID,
            content,
            count,
            max_attempts,
            spacing,
        );

        let centers = find_cluster_centers(
            cluster_count_for(count, constraints),
            extent,
            &mask,
            constraints.alpha_threshold,
            rng,
            sink,
        );

        let estimated_capacity =
            estimate_from_ratio(mask.valid_area_ratio(), spacing, content.size, extent);

        // Radius is normalized by the map width on both axes.
        let normalized_radius = radius_m / extent.width_m();
        let per_cluster = if centers.is_empty() {
            0
        } else {
            count.div_ceil(centers.len())
        };

        let mut instances: Vec<PlacedInstance> = Vec::with_capacity(count);
        let mut footprints: Vec<Footprint> = Vec::with_capacity(count);
        let mut attempts = 0;

        for &center in &centers {
            let mut in_cluster = 0;

            while in_cluster < per_cluster && instances.len() < count && attempts < max_attempts {
                attempts += 1;
                let position = clamp_unit(center + disk_offset(normalized_radius, rng));

                let rejected = if !mask.is_valid(position, constraints.alpha_threshold) {
                    Some(RejectionReason::Mask)
                } else if spacing > 0.0
                    && !is_spacing_satisfied(position, &footprints, spacing, extent, content.size)
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

                let mut properties = provenance(content, CLUSTERED_STRATEGY_ID, attempts, spacing);
                properties.insert(keys::CLUSTER_CENTER.into(), center.into());
                properties.insert(keys::CLUSTER_RADIUS.into(), radius_m.into());

                let instance = PlacedInstance::new(
                    InstanceId::sequential(CLUSTERED_STRATEGY_ID, instances.len()),
                    content.id.clone(),
                    position,
                    properties,
                );
                if sink.wants(PlacementEventKind::InstancePlaced) {
                    sink.send(PlacementEvent::InstancePlaced {
                        instance: instance.clone(),
                    });
                }
                footprints.push(Footprint::new(position, content.size));
                instances.push(instance);
                in_cluster += 1;
            }
        }

        let result = PlacementResult::from_instances(
            instances,
            count,
            attempts,
            max_attempts,
            estimated_capacity,
        )
        .with_cluster_centers(centers);
        finish(sink, CLUSTERED_STRATEGY_ID, content, &result);
        result
    }
}
