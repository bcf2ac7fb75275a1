//! Best-first enumeration of a product of independent sorted dimensions.

use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;

use tracing::{debug, trace};

use popforge_core::probability::is_probability;
use popforge_core::{PopForgeError, Result};

use super::state::FrontierEntry;
use super::{CombinationKey, CombinationState, Dimension, RankedSource};
use crate::statistics::EnumerationStats;

/// Lazily yields the combinations of independent dimensions in
/// non-increasing joint probability.
///
/// The frontier is a max-heap seeded with the all-zero index vector. Popping
/// a state pushes its single-coordinate successors: every dimension's
/// candidates are sorted descending, so a successor is never more probable
/// than its parent, and every index vector other than the seed has a
/// predecessor one decrement away. Each key is pushed at most once, tracked
/// in `seen`. Every successor's probability is the full product over its
/// `n` factors, in dimension order, so producing the first `K`
/// combinations costs `O(K * n * (n + log K))`, independent of the size of
/// the product space.
///
/// Ties are broken towards the lexicographically smaller index vector.
///
/// # Example
///
/// ```
/// use popforge_ranking::ranked::{FlatDimension, RankedFrontierEnumerator};
///
/// let mut enumerator = RankedFrontierEnumerator::new(vec![
///     FlatDimension::from_probabilities([0.8, 0.2]),
///     FlatDimension::from_probabilities([0.5, 0.5]),
/// ]).unwrap();
///
/// let keys: Vec<String> = enumerator.by_ref().map(|s| s.key().to_string()).collect();
/// assert_eq!(keys, ["0-0", "0-1", "1-0", "1-1"]);
/// assert!(enumerator.pop().is_none());
/// ```
pub struct RankedFrontierEnumerator<D: Dimension> {
    dimensions: Vec<D>,
    frontier: BinaryHeap<FrontierEntry>,
    seen: HashSet<CombinationKey>,
    stats: EnumerationStats,
}

impl<D: Dimension> RankedFrontierEnumerator<D> {
    /// Creates an enumerator positioned before the most probable combination.
    ///
    /// With no dimensions the space holds exactly one, empty, combination of
    /// probability 1.
    ///
    /// # Errors
    ///
    /// [`PopForgeError::EmptyDimension`] if any dimension has no candidate,
    /// [`PopForgeError::InvalidProbability`] if a flat dimension holds a
    /// value that is not a finite probability in `[0, 1]`,
    /// [`PopForgeError::UnsortedCandidates`] if its probabilities increase
    /// anywhere.
    pub fn new(mut dimensions: Vec<D>) -> Result<Self> {
        let mut probability = 1.0;
        for (dimension, dim) in dimensions.iter_mut().enumerate() {
            let best = dim
                .probability(0)
                .ok_or(PopForgeError::EmptyDimension { dimension })?;
            if let Some(position) = dim.first_unranked() {
                return Err(match dim.probability(position) {
                    Some(value) if !is_probability(value) => PopForgeError::InvalidProbability {
                        dimension,
                        position,
                        value,
                    },
                    _ => PopForgeError::UnsortedCandidates {
                        dimension,
                        position,
                    },
                });
            }
            probability *= best;
        }

        let seed = CombinationState::new(CombinationKey::zero(dimensions.len()), probability);
        let mut enumerator = Self {
            dimensions,
            frontier: BinaryHeap::new(),
            seen: HashSet::new(),
            stats: EnumerationStats::default(),
        };
        enumerator.push(seed);

        debug!(
            event = "enumerator_created",
            dimensions = enumerator.dimensions.len(),
            best_probability = probability,
        );
        Ok(enumerator)
    }

    /// The next combination, without consuming it. `None` once exhausted.
    pub fn peek(&self) -> Option<&CombinationState> {
        self.frontier.peek().map(|entry| &entry.0)
    }

    /// Removes and returns the next combination in non-increasing
    /// probability order. `None` once the whole space was produced, and on
    /// every call after that.
    pub fn pop(&mut self) -> Option<CombinationState> {
        let FrontierEntry(state) = self.frontier.pop()?;
        self.stats.record_pop(self.frontier.len());

        for dimension in 0..self.dimensions.len() {
            let key = state.key().successor(dimension);
            if self.seen.contains(&key) {
                continue;
            }
            if let Some(probability) = self.joint_probability(&key) {
                self.push(CombinationState::new(key, probability));
            }
        }

        trace!(
            event = "combination_emitted",
            key = %state.key(),
            probability = state.probability(),
            frontier = self.frontier.len(),
        );
        Some(state)
    }

    /// True once every combination has been popped.
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn dimensions(&self) -> &[D] {
        &self.dimensions
    }

    pub fn dimension(&self, index: usize) -> Option<&D> {
        self.dimensions.get(index)
    }

    /// Resolves every index of `state` to its candidate.
    ///
    /// Returns `None` if the state does not belong to this enumerator.
    pub fn resolve(&self, state: &CombinationState) -> Option<Vec<&D::Candidate>> {
        if state.indices().len() != self.dimensions.len() {
            return None;
        }
        state
            .indices()
            .iter()
            .zip(&self.dimensions)
            .map(|(&index, dim)| dim.candidate(index))
            .collect()
    }

    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    fn push(&mut self, state: CombinationState) {
        self.seen.insert(state.key().clone());
        self.frontier.push(FrontierEntry(state));
        self.stats.record_push(self.frontier.len());
    }

    /// Product of the candidate probabilities at `key`, in dimension order.
    /// `None` if any index is past its dimension's end.
    fn joint_probability(&mut self, key: &CombinationKey) -> Option<f64> {
        let mut probability = 1.0;
        for (dim, &index) in self.dimensions.iter_mut().zip(key.indices()) {
            probability *= dim.probability(index)?;
        }
        Some(probability)
    }
}

impl<D: Dimension> Iterator for RankedFrontierEnumerator<D> {
    type Item = CombinationState;

    fn next(&mut self) -> Option<CombinationState> {
        self.pop()
    }
}

impl<D: Dimension> RankedSource for RankedFrontierEnumerator<D> {
    type Item = CombinationState;

    fn pull(&mut self) -> Option<(CombinationState, f64)> {
        self.pop().map(|state| {
            let probability = state.probability();
            (state, probability)
        })
    }
}

impl<D: Dimension> Debug for RankedFrontierEnumerator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankedFrontierEnumerator")
            .field("dimensions", &self.dimensions.len())
            .field("frontier", &self.frontier.len())
            .field("seen", &self.seen.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
#[path = "enumerator_tests.rs"]
mod tests;
