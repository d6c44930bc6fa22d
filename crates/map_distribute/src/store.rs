//! In-memory store of placed instances, keyed by content type.
//!
//! This is the caller side of a distribution: it checks each instance's structure
//! before storing it, independently of the mask and spacing checks the strategies ran.
use std::collections::HashMap;

use tracing::warn;

use crate::content::ContentTypeId;
use crate::error::{Error, Result};
use crate::instance::{InstanceId, PlacedInstance};
use crate::result::PlacementResult;

/// Structural check: non-empty ids and a finite position inside the unit square.
pub fn validate_instance(instance: &PlacedInstance) -> Result<()> {
    let fail = |reason: &str| Error::InvalidInstance {
        id: instance.id.to_string(),
        reason: reason.to_owned(),
    };
    if instance.id.is_empty() {
        return Err(fail("empty id"));
    }
    if instance.type_id.is_empty() {
        return Err(fail("empty type id"));
    }
    let p = instance.position;
    if !p.is_finite() || !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
        return Err(fail("position outside [0, 1]"));
    }
    Ok(())
}

#[derive(Debug, Default, Clone)]
pub struct InstanceStore {
    by_type: HashMap<ContentTypeId, Vec<PlacedInstance>>,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one instance under its own type id.
    pub fn add(&mut self, instance: PlacedInstance) -> Result<()> {
        validate_instance(&instance)?;
        self.by_type
            .entry(instance.type_id.clone())
            .or_default()
            .push(instance);
        Ok(())
    }

    /// Removes an instance by id. Returns `true` if something was removed.
    pub fn remove(&mut self, type_id: &str, instance_id: &InstanceId) -> bool {
        let Some(list) = self.by_type.get_mut(type_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|i| &i.id != instance_id);
        before != list.len()
    }

    pub fn instances(&self, type_id: &str) -> &[PlacedInstance] {
        self.by_type.get(type_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_instances(&self) -> impl Iterator<Item = &PlacedInstance> + '_ {
        self.by_type.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every instance of `type_id`, returning how many were removed.
    pub fn clear_type(&mut self, type_id: &str) -> usize {
        self.by_type.remove(type_id).map(|v| v.len()).unwrap_or(0)
    }

    /// Replaces the instances of `type_id` with a fresh placement.
    ///
    /// Placement has no incremental mode, so a parameter change means a new call and a
    /// full replacement. Structurally invalid entries are skipped. Returns the stored count.
    pub fn replace_with_result(&mut self, type_id: &str, result: &PlacementResult) -> usize {
        self.clear_type(type_id);
        let mut stored = 0;
        for instance in &result.instances {
            if instance.type_id != type_id {
                warn!(
                    "Skipping instance '{}' of type '{}' while replacing '{}'.",
                    instance.id, instance.type_id, type_id
                );
                continue;
            }
            match self.add(instance.clone()) {
                Ok(()) => stored += 1,
                Err(e) => warn!("Skipping instance: {}.", e),
            }
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::constraints::PlacementConstraints;
    use crate::content::ContentType;
    use crate::instance::Properties;
    use crate::mask::AlphaMask;
    use crate::strategy::{PlacementStrategy, RandomPlacement};

    fn instance(id: &str, type_id: &str, x: f64, y: f64) -> PlacedInstance {
        PlacedInstance::new(id.into(), type_id, DVec2::new(x, y), Properties::new())
    }

    #[test]
    fn validate_instance_checks_structure() {
        assert!(validate_instance(&instance("a", "t", 0.0, 1.0)).is_ok());
        assert!(validate_instance(&instance("", "t", 0.5, 0.5)).is_err());
        assert!(validate_instance(&instance("a", "", 0.5, 0.5)).is_err());
        assert!(validate_instance(&instance("a", "t", 1.01, 0.5)).is_err());
        assert!(validate_instance(&instance("a", "t", 0.5, -0.1)).is_err());
        assert!(validate_instance(&instance("a", "t", f64::NAN, 0.5)).is_err());
    }

    #[test]
    fn add_groups_by_type_and_rejects_invalid() {
        let mut store = InstanceStore::new();
        store.add(instance("a", "camp", 0.1, 0.1)).expect("valid");
        store.add(instance("b", "camp", 0.2, 0.2)).expect("valid");
        store.add(instance("c", "shrine", 0.3, 0.3)).expect("valid");
        assert!(matches!(
            store.add(instance("d", "camp", 2.0, 0.3)),
            Err(Error::InvalidInstance { .. })
        ));

        assert_eq!(store.instances("camp").len(), 2);
        assert_eq!(store.instances("shrine").len(), 1);
        assert!(store.instances("missing").is_empty());
        assert_eq!(store.len(), 3);
        assert_eq!(store.all_instances().count(), 3);
    }

    #[test]
    fn remove_by_id() {
        let mut store = InstanceStore::new();
        store.add(instance("a", "camp", 0.1, 0.1)).expect("valid");
        assert!(store.remove("camp", &"a".into()));
        assert!(!store.remove("camp", &"a".into()));
        assert!(!store.remove("shrine", &"a".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_with_result_swaps_previous_placement() {
        let content = ContentType::new("camp", 15.0);
        let constraints = PlacementConstraints::new(AlphaMask::filled(16, 16, 255));
        let mut store = InstanceStore::new();
        store.add(instance("old", "camp", 0.5, 0.5)).expect("valid");
        store.add(instance("keep", "shrine", 0.5, 0.5)).expect("valid");

        let mut rng = StdRng::seed_from_u64(3);
        let result = RandomPlacement.distribute(&content, 8, &constraints, &mut rng);
        let stored = store.replace_with_result("camp", &result);

        assert_eq!(stored, 8);
        assert_eq!(store.instances("camp").len(), 8);
        assert!(store.instances("camp").iter().all(|i| i.id.as_str() != "old"));
        assert_eq!(store.instances("shrine").len(), 1);
    }

    #[test]
    fn replace_skips_foreign_types() {
        let mut store = InstanceStore::new();
        let result = PlacementResult::from_instances(
            vec![instance("x", "shrine", 0.5, 0.5), instance("y", "camp", 0.5, 0.5)],
            2,
            2,
            20,
            10,
        );
        assert_eq!(store.replace_with_result("camp", &result), 1);
        assert!(store.instances("shrine").is_empty());
    }
}
