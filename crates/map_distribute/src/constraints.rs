//! Per-call placement configuration.
use std::fmt;
use std::sync::Arc;

use crate::content::ContentType;
use crate::error::{Error, Result};
use crate::mask::{MaskSource, DEFAULT_ALPHA_THRESHOLD};

/// Attempts granted per requested instance when no explicit budget is set.
pub const DEFAULT_ATTEMPTS_PER_INSTANCE: usize = 10;

/// Configuration for one distribution call.
#[non_exhaustive]
#[derive(Clone)]
pub struct PlacementConstraints {
    /// Mask marking where content may go.
    pub mask: Arc<dyn MaskSource>,
    /// Alpha a pixel must exceed to accept content.
    pub alpha_threshold: u8,
    /// Explicit minimum spacing in meters; treated as 0 when absent.
    pub min_spacing: Option<f64>,
    /// Use the content type's own spacing instead of `min_spacing`.
    pub respect_type_spacing: bool,
    /// Candidate budget; defaults to `count * 10`.
    pub max_attempts: Option<usize>,
    /// Number of cluster centers for clustered placement; defaults to `ceil(count / 10)`.
    pub cluster_count: Option<usize>,
    /// Cluster radius in meters for clustered placement; defaults to 5% of the map width.
    pub cluster_radius: Option<f64>,
}

impl fmt::Debug for PlacementConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementConstraints")
            .field("mask", &self.mask.dimensions())
            .field("alpha_threshold", &self.alpha_threshold)
            .field("min_spacing", &self.min_spacing)
            .field("respect_type_spacing", &self.respect_type_spacing)
            .field("max_attempts", &self.max_attempts)
            .field("cluster_count", &self.cluster_count)
            .field("cluster_radius", &self.cluster_radius)
            .finish()
    }
}

impl PlacementConstraints {
    pub fn new<M: MaskSource + 'static>(mask: M) -> Self {
        Self::with_mask_arc(Arc::new(mask))
    }

    pub fn with_mask_arc(mask: Arc<dyn MaskSource>) -> Self {
        Self {
            mask,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            min_spacing: None,
            respect_type_spacing: false,
            max_attempts: None,
            cluster_count: None,
            cluster_radius: None,
        }
    }

    pub fn with_alpha_threshold(mut self, alpha_threshold: u8) -> Self {
        self.alpha_threshold = alpha_threshold;
        self
    }

    pub fn with_min_spacing(mut self, min_spacing: f64) -> Self {
        self.min_spacing = Some(min_spacing);
        self
    }

    pub fn with_respect_type_spacing(mut self, respect: bool) -> Self {
        self.respect_type_spacing = respect;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = Some(cluster_count);
        self
    }

    pub fn with_cluster_radius(mut self, cluster_radius: f64) -> Self {
        self.cluster_radius = Some(cluster_radius);
        self
    }

    /// Spacing actually enforced for `content`.
    pub fn effective_spacing(&self, content: &ContentType) -> f64 {
        if self.respect_type_spacing {
            content.min_spacing
        } else {
            self.min_spacing.unwrap_or(0.0)
        }
    }

    /// Candidate budget for a request of `count` instances.
    pub fn max_attempts_for(&self, count: usize) -> usize {
        self.max_attempts
            .unwrap_or_else(|| count.saturating_mul(DEFAULT_ATTEMPTS_PER_INSTANCE))
    }

    /// Caller-side sanity check; strategies assume this already passed.
    pub fn validate(&self) -> Result<()> {
        if let Some(s) = self.min_spacing {
            if !s.is_finite() || s < 0.0 {
                return Err(Error::InvalidConfig("min_spacing must be >= 0".into()));
            }
        }
        if let Some(r) = self.cluster_radius {
            if !r.is_finite() || r <= 0.0 {
                return Err(Error::InvalidConfig("cluster_radius must be > 0".into()));
            }
        }
        if self.cluster_count == Some(0) {
            return Err(Error::InvalidConfig("cluster_count must be > 0".into()));
        }
        let (w, h) = self.mask.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::InvalidConfig(
                "mask must be non-empty in both dimensions".into(),
            ));
        }
        Ok(())
    }
}
