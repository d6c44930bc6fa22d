//! Outcome of a distribution call.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::instance::PlacedInstance;

/// Placed fraction of the estimate below which a shortfall is blamed on the mask.
const LIMITED_AREA_FRACTION: f64 = 0.9;

/// Result of one `distribute` call. A shortfall is reported here, never as an error.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementResult {
    /// Accepted instances in acceptance order.
    pub instances: Vec<PlacedInstance>,
    /// `true` iff every requested instance was placed.
    pub success: bool,
    /// Human-readable diagnostic when the request was not met.
    pub message: Option<String>,
    /// Candidate positions consumed.
    pub attempts: usize,
    /// Candidate budget that applied to this call.
    pub max_attempts: usize,
    pub requested: usize,
    pub actual: usize,
    /// Advisory capacity estimate for the mask, size and spacing used.
    pub estimated_capacity: usize,
    /// `actual / attempts`, or 0.0 when no attempts were made.
    pub placement_efficiency: f64,
    /// Cluster centers used by clustered placement.
    pub cluster_centers: Option<Vec<DVec2>>,
}

impl PlacementResult {
    /// Assembles a result and derives the success flag, efficiency and message.
    pub fn from_instances(
        instances: Vec<PlacedInstance>,
        requested: usize,
        attempts: usize,
        max_attempts: usize,
        estimated_capacity: usize,
    ) -> Self {
        let actual = instances.len();
        let placement_efficiency = if attempts == 0 {
            0.0
        } else {
            actual as f64 / attempts as f64
        };
        Self {
            instances,
            success: actual == requested,
            message: shortfall_message(actual, requested, estimated_capacity),
            attempts,
            max_attempts,
            requested,
            actual,
            estimated_capacity,
            placement_efficiency,
            cluster_centers: None,
        }
    }

    pub fn with_cluster_centers(mut self, centers: Vec<DVec2>) -> Self {
        self.cluster_centers = Some(centers);
        self
    }

    /// Count still missing from the request.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.actual)
    }
}

/// Explains a shortfall: limited valid area when well below the estimate, capacity otherwise.
pub fn shortfall_message(actual: usize, requested: usize, estimated_capacity: usize) -> Option<String> {
    if actual >= requested {
        return None;
    }
    if (actual as f64) < (estimated_capacity as f64) * LIMITED_AREA_FRACTION {
        Some(format!(
            "Limited valid area for placement. Placed {actual}/{requested}"
        ))
    } else {
        Some(format!(
            "Reached capacity limit. Max ~{estimated_capacity} with current spacing"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_placement_has_no_message() {
        let r = PlacementResult::from_instances(Vec::new(), 0, 0, 0, 10);
        assert!(r.success);
        assert!(r.message.is_none());
        assert_eq!(r.placement_efficiency, 0.0);
        assert_eq!(r.shortfall(), 0);
    }

    #[test]
    fn shortfall_well_below_estimate_blames_area() {
        let msg = shortfall_message(10, 50, 100).expect("message");
        assert_eq!(msg, "Limited valid area for placement. Placed 10/50");
    }

    #[test]
    fn shortfall_near_estimate_reports_capacity() {
        let msg = shortfall_message(95, 200, 100).expect("message");
        assert_eq!(msg, "Reached capacity limit. Max ~100 with current spacing");
        // exactly 90% of the estimate is not "below" it
        let msg = shortfall_message(90, 200, 100).expect("message");
        assert!(msg.starts_with("Reached capacity limit"));
    }

    #[test]
    fn partial_result_is_not_success() {
        let r = PlacementResult::from_instances(Vec::new(), 5, 50, 50, 0);
        assert!(!r.success);
        assert_eq!(r.actual, 0);
        assert_eq!(r.shortfall(), 5);
        assert!(r.message.is_some());
    }
}
