//! Sets and set types: coherent bundles of assignment lists.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ParameterAssignment, ParameterInstanceId, SetId, SetTypeId};

/// A probability-weighted bundle pairing every instance of a set type with
/// its list of eligible assignments.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    id: SetId,
    name: String,
    probability: f64,
    assignments: BTreeMap<ParameterInstanceId, Vec<Arc<ParameterAssignment>>>,
}

impl ParameterSet {
    pub fn new(
        id: SetId,
        name: impl Into<String>,
        probability: f64,
        assignments: BTreeMap<ParameterInstanceId, Vec<Arc<ParameterAssignment>>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            probability,
            assignments,
        }
    }

    pub fn id(&self) -> SetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Occurrence probability among the sibling sets.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn set_probability(&mut self, probability: f64) {
        self.probability = probability;
    }

    /// The eligible assignments of `instance` in this set, if mapped.
    pub fn assignments_for(&self, instance: ParameterInstanceId) -> Option<&[Arc<ParameterAssignment>]> {
        self.assignments.get(&instance).map(Vec::as_slice)
    }

    pub fn assignments(&self) -> &BTreeMap<ParameterInstanceId, Vec<Arc<ParameterAssignment>>> {
        &self.assignments
    }

    pub(crate) fn assignments_mut(
        &mut self,
    ) -> &mut BTreeMap<ParameterInstanceId, Vec<Arc<ParameterAssignment>>> {
        &mut self.assignments
    }
}

/// A disjoint group of parameter instances owning its sibling sets.
#[derive(Debug, Clone)]
pub struct SetType {
    id: SetTypeId,
    name: String,
    instances: Vec<ParameterInstanceId>,
    sets: Vec<ParameterSet>,
}

impl SetType {
    pub fn new(id: SetTypeId, name: impl Into<String>, instances: Vec<ParameterInstanceId>) -> Self {
        Self {
            id,
            name: name.into(),
            instances,
            sets: Vec::new(),
        }
    }

    pub fn id(&self) -> SetTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The governed instances, in declaration order.
    pub fn instances(&self) -> &[ParameterInstanceId] {
        &self.instances
    }

    pub fn governs(&self, instance: ParameterInstanceId) -> bool {
        self.instances.contains(&instance)
    }

    pub fn sets(&self) -> &[ParameterSet] {
        &self.sets
    }

    pub fn set(&self, id: SetId) -> Option<&ParameterSet> {
        self.sets.iter().find(|s| s.id() == id)
    }

    pub(crate) fn push_set(&mut self, set: ParameterSet) {
        self.sets.push(set);
    }

    pub(crate) fn sets_mut(&mut self) -> &mut Vec<ParameterSet> {
        &mut self.sets
    }
}
