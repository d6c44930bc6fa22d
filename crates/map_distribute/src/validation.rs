//! Per-check validation reports for positions and already placed instances.
//!
//! Where the strategies only need a yes/no answer, this module reports which check
//! failed and which instances conflict, e.g. to audit a stored placement after the
//! mask or spacing changed.
use std::collections::HashMap;

use glam::DVec2;

use crate::constraints::PlacementConstraints;
use crate::content::ContentType;
use crate::instance::{InstanceId, PlacedInstance};
use crate::mask::MaskSnapshot;

/// Kinds of validation a [`PositionValidator`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    Transparency,
    Spacing,
}

/// Outcome of one validation check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub kind: ValidationKind,
    pub valid: bool,
    pub message: Option<String>,
    /// Instances closer than the spacing, for failed spacing checks.
    pub conflicts: Vec<InstanceId>,
}

impl ValidationResult {
    fn pass(kind: ValidationKind) -> Self {
        Self {
            kind,
            valid: true,
            message: None,
            conflicts: Vec::new(),
        }
    }
}

/// Aggregate counts over a set of instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    pub total: usize,
    pub valid: usize,
    pub invalid_by_kind: HashMap<ValidationKind, usize>,
}

/// Validates positions against one mask and spacing configuration.
///
/// Spacing here is center to center, in meters, using the constraints' effective spacing.
#[derive(Debug, Clone)]
pub struct PositionValidator {
    mask: MaskSnapshot,
    alpha_threshold: u8,
    spacing: f64,
    content: ContentType,
    kinds: Vec<ValidationKind>,
}

impl PositionValidator {
    pub fn new(content: &ContentType, constraints: &PlacementConstraints) -> Self {
        Self {
            mask: MaskSnapshot::capture(constraints.mask.as_ref()),
            alpha_threshold: constraints.alpha_threshold,
            spacing: constraints.effective_spacing(content),
            content: content.clone(),
            kinds: vec![ValidationKind::Transparency, ValidationKind::Spacing],
        }
    }

    /// Restricts which checks run, in the given order.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ValidationKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Runs every enabled check for a candidate position.
    pub fn validate_position(
        &self,
        position: DVec2,
        existing: &[PlacedInstance],
    ) -> Vec<ValidationResult> {
        self.kinds
            .iter()
            .map(|kind| match kind {
                ValidationKind::Transparency => self.check_transparency(position),
                ValidationKind::Spacing => self.check_spacing(position, existing, None),
            })
            .collect()
    }

    /// Validates each instance against all the others.
    pub fn validate_instances(
        &self,
        instances: &[PlacedInstance],
    ) -> Vec<(InstanceId, Vec<ValidationResult>)> {
        instances
            .iter()
            .map(|instance| {
                let results = self
                    .kinds
                    .iter()
                    .map(|kind| match kind {
                        ValidationKind::Transparency => {
                            self.check_transparency(instance.position)
                        }
                        ValidationKind::Spacing => {
                            self.check_spacing(instance.position, instances, Some(&instance.id))
                        }
                    })
                    .collect();
                (instance.id.clone(), results)
            })
            .collect()
    }

    pub fn stats(&self, instances: &[PlacedInstance]) -> ValidationStats {
        let mut stats = ValidationStats {
            total: instances.len(),
            ..Default::default()
        };
        for (_, results) in self.validate_instances(instances) {
            if results.iter().all(|r| r.valid) {
                stats.valid += 1;
                continue;
            }
            for r in results.iter().filter(|r| !r.valid) {
                *stats.invalid_by_kind.entry(r.kind).or_default() += 1;
            }
        }
        stats
    }

    fn check_transparency(&self, position: DVec2) -> ValidationResult {
        if self.mask.is_valid(position, self.alpha_threshold) {
            return ValidationResult::pass(ValidationKind::Transparency);
        }
        ValidationResult {
            kind: ValidationKind::Transparency,
            valid: false,
            message: Some("Position is in a transparent area of the map".into()),
            conflicts: Vec::new(),
        }
    }

    fn check_spacing(
        &self,
        position: DVec2,
        existing: &[PlacedInstance],
        skip: Option<&InstanceId>,
    ) -> ValidationResult {
        if self.spacing <= 0.0 {
            return ValidationResult::pass(ValidationKind::Spacing);
        }
        let extent = self.content.map_extent;
        let conflicts: Vec<InstanceId> = existing
            .iter()
            .filter(|other| skip != Some(&other.id))
            .filter(|other| extent.distance_meters(position, other.position) < self.spacing)
            .map(|other| other.id.clone())
            .collect();

        if conflicts.is_empty() {
            return ValidationResult::pass(ValidationKind::Spacing);
        }
        ValidationResult {
            kind: ValidationKind::Spacing,
            valid: false,
            message: Some(format!("Violates minimum spacing of {}m", self.spacing)),
            conflicts,
        }
    }
}
