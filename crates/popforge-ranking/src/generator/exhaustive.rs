//! Exhaustive ranked generation over every set type of a projection.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, info};

use popforge_core::{
    calculate_num_of_combinations, AssignmentMap, CombinationCount, Projection, Result, SetId,
    SetTypeId,
};

use super::AssignmentGenerator;
use crate::manager::SetTypeManager;
use crate::ranked::{CombinationKey, CombinationState, RankedFrontierEnumerator};
use crate::statistics::EnumerationStats;

/// Construction options for [`ExhaustiveAssignmentGenerator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Stop after this many assignments (None = until exhausted).
    pub limit: Option<u64>,
    /// Ranked combinations each set type materializes up front.
    pub prefetch: usize,
}

/// A complete assignment with the ranked choices that produced it.
#[derive(Debug, Clone)]
pub struct RankedAssignment {
    /// Rank index per set type, in set type order.
    pub key: CombinationKey,
    pub probability: f64,
    /// The set chosen in every set type.
    pub sets: Vec<(SetTypeId, SetId)>,
    pub assignments: AssignmentMap,
}

/// Produces the complete assignments of a projection, most probable first.
///
/// One dimension per set type (the implicit default set type included),
/// each unfolding lazily through its [`SetTypeManager`]. Nothing beyond the
/// frontier and the per-set-type caches is ever computed.
///
/// # Example
///
/// ```
/// use popforge_core::{ParameterAssignment, Projection};
/// use popforge_ranking::ExhaustiveAssignmentGenerator;
///
/// let mut projection = Projection::new("p");
/// projection.add_instance("fertility", vec![
///     ParameterAssignment::new("high", 0.8),
///     ParameterAssignment::new("low", 0.2),
/// ]);
/// projection.add_instance("migration", vec![
///     ParameterAssignment::new("net-positive", 0.5),
///     ParameterAssignment::new("net-negative", 0.5),
/// ]);
///
/// let mut generator = ExhaustiveAssignmentGenerator::new(&projection).unwrap();
/// assert_eq!(generator.total_combinations().exact(), Some(4));
///
/// let (best, probability) = generator.next_assignment().unwrap();
/// assert_eq!(best.len(), 2);
/// assert!((probability - 0.4).abs() < 1e-12);
/// ```
pub struct ExhaustiveAssignmentGenerator {
    enumerator: RankedFrontierEnumerator<SetTypeManager>,
    total: CombinationCount,
    emitted: u64,
    limit: Option<u64>,
    finished: bool,
}

impl ExhaustiveAssignmentGenerator {
    /// Creates a generator over every combination of `projection`.
    ///
    /// # Errors
    ///
    /// Propagates the construction errors of the set type managers: empty
    /// dimensions and invalid sets are rejected before any pull.
    pub fn new(projection: &Projection) -> Result<Self> {
        Self::with_options(projection, GeneratorOptions::default())
    }

    /// Creates a generator that stops after `limit` assignments.
    pub fn with_limit(projection: &Projection, limit: u64) -> Result<Self> {
        Self::with_options(
            projection,
            GeneratorOptions {
                limit: Some(limit),
                ..GeneratorOptions::default()
            },
        )
    }

    pub fn with_options(projection: &Projection, options: GeneratorOptions) -> Result<Self> {
        let mut managers = projection
            .set_types()
            .iter()
            .map(|set_type| SetTypeManager::new(set_type))
            .collect::<Result<Vec<_>>>()?;

        if options.prefetch > 0 {
            for manager in &mut managers {
                manager.create_assignments(options.prefetch);
            }
        }

        let set_types = managers.len();
        let enumerator = RankedFrontierEnumerator::new(managers)?;
        let total = Self::calculate_num_of_combinations(projection);

        info!(
            event = "generator_created",
            projection = projection.name(),
            set_types,
            combinations = %total,
            limit = ?options.limit,
        );
        Ok(Self {
            enumerator,
            total,
            emitted: 0,
            limit: options.limit,
            finished: false,
        })
    }

    /// Number of complete assignments of `projection`, without enumerating.
    pub fn calculate_num_of_combinations(projection: &Projection) -> CombinationCount {
        calculate_num_of_combinations(projection)
    }

    /// The next combination, without consuming it.
    pub fn peek(&self) -> Option<&CombinationState> {
        if self.limit_reached() {
            return None;
        }
        self.enumerator.peek()
    }

    /// Pulls the next complete assignment with its joint probability.
    pub fn next_assignment(&mut self) -> Option<(AssignmentMap, f64)> {
        self.next_ranked()
            .map(|ranked| (ranked.assignments, ranked.probability))
    }

    /// Pulls the next complete assignment with the choices behind it.
    pub fn next_ranked(&mut self) -> Option<RankedAssignment> {
        if self.limit_reached() {
            self.finish("limit_reached");
            return None;
        }
        let Some(state) = self.enumerator.pop() else {
            self.finish("exhausted");
            return None;
        };

        let parts = self.enumerator.resolve(&state)?;
        let mut assignments = AssignmentMap::new();
        let mut sets = Vec::with_capacity(parts.len());
        for (manager, part) in self.enumerator.dimensions().iter().zip(parts) {
            sets.push((manager.id(), part.set));
            assignments.extend(
                part.assignments
                    .iter()
                    .map(|(&instance, assignment)| (instance, Arc::clone(assignment))),
            );
        }

        self.emitted += 1;
        debug!(
            event = "assignment_generated",
            rank = self.emitted,
            key = %state.key(),
            probability = state.probability(),
        );
        Some(RankedAssignment {
            probability: state.probability(),
            key: state.into_key(),
            sets,
            assignments,
        })
    }

    /// Assignments returned so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn total_combinations(&self) -> CombinationCount {
        self.total
    }

    /// Combinations not yet returned, capped by the limit if one is set.
    pub fn remaining_combinations(&self) -> CombinationCount {
        let remaining = self.total.saturating_sub(self.emitted);
        match self.limit {
            Some(limit) => {
                let allowed = limit.saturating_sub(self.emitted);
                match remaining {
                    CombinationCount::Exact(n) => CombinationCount::Exact(n.min(allowed)),
                    CombinationCount::TooLarge => CombinationCount::Exact(allowed),
                }
            }
            None => remaining,
        }
    }

    pub fn set_type_managers(&self) -> &[SetTypeManager] {
        self.enumerator.dimensions()
    }

    pub fn stats(&self) -> EnumerationStats {
        self.enumerator.stats()
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit)
    }

    fn finish(&mut self, reason: &'static str) {
        if !self.finished {
            self.finished = true;
            info!(
                event = "generation_finished",
                reason,
                emitted = self.emitted,
                stats = %self.enumerator.stats(),
            );
        }
    }
}

impl AssignmentGenerator for ExhaustiveAssignmentGenerator {
    fn next_assignment(&mut self) -> Option<(AssignmentMap, f64)> {
        Self::next_assignment(self)
    }

    fn total_combinations(&self) -> CombinationCount {
        Self::total_combinations(self)
    }

    fn remaining_combinations(&self) -> CombinationCount {
        Self::remaining_combinations(self)
    }
}

impl Debug for ExhaustiveAssignmentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExhaustiveAssignmentGenerator")
            .field("set_types", &self.enumerator.dimensions().len())
            .field("total", &self.total)
            .field("emitted", &self.emitted)
            .field("limit", &self.limit)
            .finish()
    }
}
