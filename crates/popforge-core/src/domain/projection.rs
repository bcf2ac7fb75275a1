//! The projection: instances and their partition into set types.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::{
    ParameterAssignment, ParameterInstance, ParameterInstanceId, ParameterSet, SetId, SetType,
    SetTypeId,
};
use crate::error::{PopForgeError, Result};

/// A population projection's input topology.
///
/// Instances not claimed by any user set type belong to the implicit
/// default set type, see [`Projection::default_set_type`].
///
/// # Example
///
/// ```
/// use popforge_core::domain::{ParameterAssignment, Projection};
///
/// let mut projection = Projection::new("baseline");
/// let fertility = projection.add_instance("fertility", vec![
///     ParameterAssignment::new("high", 0.7),
///     ParameterAssignment::new("low", 0.3),
/// ]);
/// let mortality = projection.add_instance("mortality", vec![
///     ParameterAssignment::new("constant", 1.0),
/// ]);
///
/// let scenario = projection.add_set_type("scenario", vec![fertility]).unwrap();
/// let shared = projection.instance(fertility).unwrap().assignments().to_vec();
/// projection.add_set(scenario, "all", 1.0, vec![(fertility, shared)]).unwrap();
///
/// assert_eq!(projection.set_types().len(), 2);
/// assert_eq!(projection.default_set_type().unwrap().instances(), &[mortality]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Projection {
    name: String,
    instances: Vec<ParameterInstance>,
    set_types: Vec<SetType>,
    next_set_id: usize,
}

impl Projection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a parameter instance with its own candidate assignments.
    pub fn add_instance(
        &mut self,
        name: impl Into<String>,
        assignments: Vec<ParameterAssignment>,
    ) -> ParameterInstanceId {
        let id = ParameterInstanceId(self.instances.len());
        let assignments = assignments.into_iter().map(Arc::new).collect();
        self.instances.push(ParameterInstance::new(id, name, assignments));
        id
    }

    /// Declares a set type governing `instances`.
    ///
    /// # Errors
    ///
    /// Fails when an instance is unknown, listed twice, or already governed
    /// by another set type.
    pub fn add_set_type(
        &mut self,
        name: impl Into<String>,
        instances: Vec<ParameterInstanceId>,
    ) -> Result<SetTypeId> {
        let mut distinct = HashSet::with_capacity(instances.len());
        for &instance in &instances {
            if self.instance(instance).is_none() {
                return Err(PopForgeError::DomainModel(format!(
                    "unknown parameter instance {instance}"
                )));
            }
            if !distinct.insert(instance) {
                return Err(PopForgeError::DomainModel(format!(
                    "parameter instance {instance} listed twice"
                )));
            }
            if let Some(owner) = self.set_types.iter().find(|st| st.governs(instance)) {
                return Err(PopForgeError::DomainModel(format!(
                    "parameter instance {instance} already belongs to set type '{}'",
                    owner.name()
                )));
            }
        }

        let id = SetTypeId(self.set_types.len());
        self.set_types.push(SetType::new(id, name, instances));
        Ok(id)
    }

    /// Adds a set to `set_type`, mapping governed instances to assignments.
    ///
    /// Missing or empty lists are accepted here and rejected when the set
    /// is enumerated.
    ///
    /// # Errors
    ///
    /// Fails when the set type is unknown or the mapping names an instance
    /// the set type does not govern.
    pub fn add_set(
        &mut self,
        set_type: SetTypeId,
        name: impl Into<String>,
        probability: f64,
        mapping: impl IntoIterator<Item = (ParameterInstanceId, Vec<Arc<ParameterAssignment>>)>,
    ) -> Result<SetId> {
        let id = SetId(self.next_set_id);
        let owner = self
            .set_types
            .get_mut(set_type.index())
            .ok_or_else(|| PopForgeError::DomainModel(format!("unknown {set_type}")))?;

        let mut assignments = BTreeMap::new();
        for (instance, list) in mapping {
            if !owner.governs(instance) {
                return Err(PopForgeError::DomainModel(format!(
                    "{instance} is not governed by set type '{}'",
                    owner.name()
                )));
            }
            assignments.insert(instance, list);
        }

        owner.push_set(ParameterSet::new(id, name, probability, assignments));
        self.next_set_id += 1;
        Ok(id)
    }

    pub fn instance(&self, id: ParameterInstanceId) -> Option<&ParameterInstance> {
        self.instances.get(id.index())
    }

    pub fn instances(&self) -> &[ParameterInstance] {
        &self.instances
    }

    /// User-defined set types, in declaration order.
    pub fn user_set_types(&self) -> &[SetType] {
        &self.set_types
    }

    /// Returns the set type governing `instance`; [`SetTypeId::DEFAULT`]
    /// for ungrouped instances.
    pub fn set_type_of(&self, instance: ParameterInstanceId) -> SetTypeId {
        self.set_types
            .iter()
            .find(|st| st.governs(instance))
            .map_or(SetTypeId::DEFAULT, SetType::id)
    }

    /// The implicit set type holding every ungrouped instance.
    ///
    /// It owns a single set of probability 1 mapping each ungrouped
    /// instance to its own assignment list. `None` when every instance
    /// belongs to a user set type.
    pub fn default_set_type(&self) -> Option<SetType> {
        let ungrouped: Vec<ParameterInstanceId> = self
            .instances
            .iter()
            .map(ParameterInstance::id)
            .filter(|&id| self.set_type_of(id).is_default())
            .collect();
        if ungrouped.is_empty() {
            return None;
        }

        let mapping = ungrouped
            .iter()
            .map(|&id| (id, self.instances[id.index()].assignments().to_vec()))
            .collect();
        let mut set_type = SetType::new(SetTypeId::DEFAULT, "default", ungrouped);
        set_type.push_set(ParameterSet::new(SetId::DEFAULT, "default", 1.0, mapping));
        Some(set_type)
    }

    /// Every set type to enumerate: user set types, then the default one.
    pub fn set_types(&self) -> Vec<Cow<'_, SetType>> {
        let mut all: Vec<Cow<'_, SetType>> = self.set_types.iter().map(Cow::Borrowed).collect();
        if let Some(default) = self.default_set_type() {
            all.push(Cow::Owned(default));
        }
        all
    }

    pub(crate) fn instances_mut(&mut self) -> &mut [ParameterInstance] {
        &mut self.instances
    }

    pub(crate) fn set_types_mut(&mut self) -> &mut [SetType] {
        &mut self.set_types
    }
}
