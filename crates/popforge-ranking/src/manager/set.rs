//! Ranked cursor over the assignment combinations of one set.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::debug;

use popforge_core::probability::sort_descending;
use popforge_core::{
    AssignmentMap, CombinationCount, ParameterAssignment, ParameterInstanceId, ParameterSet,
    PopForgeError, Result, SetId, SetType, WeightedCandidate,
};

use crate::ranked::{CombinationState, FlatDimension, RankedFrontierEnumerator, RankedSource};

type AssignmentDimension = FlatDimension<Arc<ParameterAssignment>>;

/// Walks the combinations of one set, most probable first.
///
/// One dimension per instance of the owning set type, each holding that
/// instance's assignments as restricted by the set. The manager is created
/// positioned at the best combination; [`advance`](Self::advance) moves to
/// the next one.
pub struct SetManager {
    set: SetId,
    instances: Vec<ParameterInstanceId>,
    enumerator: RankedFrontierEnumerator<AssignmentDimension>,
    current: Option<CombinationState>,
}

impl SetManager {
    /// Creates a manager for `set`, owned by `set_type`.
    ///
    /// Each instance's list is stably sorted by non-increasing probability.
    ///
    /// # Errors
    ///
    /// [`PopForgeError::InvalidSet`] if the set does not map an instance of
    /// the set type, [`PopForgeError::EmptyDimension`] if it maps one to an
    /// empty list.
    pub fn new(set_type: &SetType, set: &ParameterSet) -> Result<Self> {
        let instances = set_type.instances().to_vec();
        let mut dimensions = Vec::with_capacity(instances.len());

        for &instance in &instances {
            let list = set
                .assignments_for(instance)
                .ok_or_else(|| PopForgeError::InvalidSet {
                    set: set.name().to_string(),
                    instance: instance.to_string(),
                })?;
            let mut candidates: Vec<_> = list
                .iter()
                .map(|a| WeightedCandidate::new(Arc::clone(a), a.probability()))
                .collect();
            sort_descending(&mut candidates);
            dimensions.push(FlatDimension::new(candidates));
        }

        let mut enumerator = RankedFrontierEnumerator::new(dimensions)?;
        let current = enumerator.pop();

        debug!(
            event = "set_manager_created",
            set = %set.id(),
            instances = instances.len(),
        );
        Ok(Self {
            set: set.id(),
            instances,
            enumerator,
            current,
        })
    }

    pub fn set_id(&self) -> SetId {
        self.set
    }

    pub fn instances(&self) -> &[ParameterInstanceId] {
        &self.instances
    }

    /// The current combination resolved to concrete assignments, or `None`
    /// once exhausted.
    pub fn current_mapping(&self) -> Option<AssignmentMap> {
        let state = self.current.as_ref()?;
        let candidates = self.enumerator.resolve(state)?;
        Some(
            self.instances
                .iter()
                .zip(candidates)
                .map(|(&instance, assignment)| (instance, Arc::clone(assignment)))
                .collect(),
        )
    }

    /// Joint probability of the current combination; 0 once exhausted.
    pub fn current_probability(&self) -> f64 {
        self.current.as_ref().map_or(0.0, CombinationState::probability)
    }

    pub fn current_state(&self) -> Option<&CombinationState> {
        self.current.as_ref()
    }

    /// Moves to the next combination. Returns false, now and on every later
    /// call, when there is none.
    pub fn advance(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.current = self.enumerator.pop();
        self.current.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Product of the candidate counts of every instance.
    pub fn num_of_combinations(&self) -> CombinationCount {
        self.enumerator
            .dimensions()
            .iter()
            .map(|d| {
                u64::try_from(d.len()).map_or(CombinationCount::TooLarge, CombinationCount::Exact)
            })
            .fold(CombinationCount::ONE, CombinationCount::checked_mul)
    }
}

/// Yields the current combination, then advances.
impl RankedSource for SetManager {
    type Item = AssignmentMap;

    fn pull(&mut self) -> Option<(AssignmentMap, f64)> {
        let mapping = self.current_mapping()?;
        let probability = self.current_probability();
        self.advance();
        Some((mapping, probability))
    }
}

impl Debug for SetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetManager")
            .field("set", &self.set)
            .field("instances", &self.instances)
            .field("current", &self.current)
            .field("enumerator", &self.enumerator)
            .finish()
    }
}
