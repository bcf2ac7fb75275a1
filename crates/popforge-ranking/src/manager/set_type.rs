//! Ranked combinations of one set type, with random access.

use std::fmt::Debug;

use tracing::debug;

use popforge_core::count::set_type_combinations;
use popforge_core::{
    AssignmentMap, CombinationCount, PopForgeError, Result, SetId, SetType, SetTypeId,
};

use super::SetManager;
use crate::ranked::{Dimension, LazyDimension, RankedMerge, RankedSource};

/// One ranked combination of a set type: the chosen set and the
/// assignments it picked for every governed instance.
#[derive(Debug, Clone)]
pub struct SetCombination {
    pub set: SetId,
    pub assignments: AssignmentMap,
}

/// Sibling sets merged by `P(set) * P(combination | set)`.
struct SetCombinations {
    merge: RankedMerge<SetManager>,
    set_ids: Vec<SetId>,
}

impl RankedSource for SetCombinations {
    type Item = SetCombination;

    fn pull(&mut self) -> Option<(SetCombination, f64)> {
        let ((index, assignments), probability) = self.merge.pull()?;
        let combination = SetCombination {
            set: self.set_ids[index],
            assignments,
        };
        Some((combination, probability))
    }
}

impl Debug for SetCombinations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetCombinations")
            .field("merge", &self.merge)
            .field("set_ids", &self.set_ids)
            .finish()
    }
}

/// Ranks the combinations of a set type across all of its sets.
///
/// Each set unfolds lazily through its own [`SetManager`]; the merge pulls
/// a set one step further only when its previous combination is consumed.
/// Produced combinations are cached, so they can be read back by rank with
/// [`get_assignment`](Self::get_assignment) and
/// [`get_probability`](Self::get_probability).
///
/// A `SetTypeManager` is itself a [`Dimension`]: the top-level generator
/// uses it as the lazily-unfolding axis of its set type.
#[derive(Debug)]
pub struct SetTypeManager {
    id: SetTypeId,
    name: String,
    combinations: CombinationCount,
    ranked: LazyDimension<SetCombinations>,
}

impl SetTypeManager {
    /// # Errors
    ///
    /// [`PopForgeError::EmptyDimension`] if the set type has no sets or a
    /// set maps an instance to an empty list, [`PopForgeError::InvalidSet`]
    /// if a set misses an instance.
    pub fn new(set_type: &SetType) -> Result<Self> {
        let managers = set_type
            .sets()
            .iter()
            .map(|set| Ok((set.probability(), SetManager::new(set_type, set)?)))
            .collect::<Result<Vec<_>>>()?;
        let set_ids = set_type.sets().iter().map(|s| s.id()).collect();
        let merge = RankedMerge::new(managers)?;
        let combinations = set_type_combinations(set_type);

        debug!(
            event = "set_type_manager_created",
            set_type = set_type.name(),
            sets = set_type.sets().len(),
            combinations = %combinations,
        );
        Ok(Self {
            id: set_type.id(),
            name: set_type.name().to_string(),
            combinations,
            ranked: LazyDimension::new(SetCombinations { merge, set_ids }),
        })
    }

    pub fn id(&self) -> SetTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materializes at least `n` ranked combinations.
    ///
    /// Returns true iff `n` combinations exist. When fewer exist all of
    /// them are cached and false is returned.
    pub fn create_assignments(&mut self, n: usize) -> bool {
        let before = self.ranked.len();
        let complete = self.ranked.materialize(n);
        if self.ranked.len() > before {
            debug!(
                event = "set_type_materialized",
                set_type = %self.name,
                requested = n,
                materialized = self.ranked.len(),
                complete,
            );
        }
        complete
    }

    /// Assignments of the `index`-th ranked combination.
    ///
    /// # Errors
    ///
    /// [`PopForgeError::IndexOutOfRange`] if `index` is not materialized.
    pub fn get_assignment(&self, index: usize) -> Result<&AssignmentMap> {
        self.get_combination(index).map(|c| &c.assignments)
    }

    /// Joint probability of the `index`-th ranked combination.
    pub fn get_probability(&self, index: usize) -> Result<f64> {
        self.ranked
            .get(index)
            .map(|c| c.probability)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Set chosen by the `index`-th ranked combination.
    pub fn get_set(&self, index: usize) -> Result<SetId> {
        self.get_combination(index).map(|c| c.set)
    }

    pub fn get_combination(&self, index: usize) -> Result<&SetCombination> {
        self.ranked
            .get(index)
            .map(|c| &c.item)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Number of combinations cached so far.
    pub fn materialized(&self) -> usize {
        self.ranked.len()
    }

    /// True once the ranking reported that nothing is left.
    ///
    /// Materialization stops as soon as enough combinations are cached, so
    /// after `create_assignments(total)` this stays false until a request
    /// for more finds the source empty.
    pub fn is_complete(&self) -> bool {
        self.ranked.is_exhausted()
    }

    /// Total combinations, computed without enumerating.
    pub fn num_of_combinations(&self) -> CombinationCount {
        self.combinations
    }

    fn out_of_range(&self, index: usize) -> PopForgeError {
        PopForgeError::IndexOutOfRange {
            index,
            len: self.ranked.len(),
        }
    }
}

impl Dimension for SetTypeManager {
    type Candidate = SetCombination;

    fn probability(&mut self, index: usize) -> Option<f64> {
        self.ranked.probability(index)
    }

    fn candidate(&self, index: usize) -> Option<&SetCombination> {
        self.ranked.candidate(index)
    }
}
