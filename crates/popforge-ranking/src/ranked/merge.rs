//! Best-first merge of weighted sibling sources.
//!
//! Where [`RankedFrontierEnumerator`](super::RankedFrontierEnumerator)
//! combines independent dimensions, a merge picks exactly one sibling and
//! then one of that sibling's own items: the joint probability of the
//! `r`-th item of source `s` is `weight(s) * p(s, r)`. The frontier holds
//! at most one position `[s, r]` per source; popping it pulls source `s`
//! one step further.

use std::collections::BinaryHeap;
use std::fmt::Debug;

use tracing::{debug, trace};

use popforge_core::probability::is_probability;
use popforge_core::{PopForgeError, Result};

use super::state::FrontierEntry;
use super::{CombinationKey, CombinationState, RankedSource};
use crate::statistics::EnumerationStats;

struct Sibling<S: RankedSource> {
    weight: f64,
    source: S,
    head: Option<S::Item>,
}

/// Merges weighted ranked sources into one ranked sequence.
///
/// Yields `(source index, item)` pairs. Ties go to the smaller
/// `[source, rank]` key, i.e. to the earlier source.
pub struct RankedMerge<S: RankedSource> {
    siblings: Vec<Sibling<S>>,
    frontier: BinaryHeap<FrontierEntry>,
    stats: EnumerationStats,
}

impl<S: RankedSource> RankedMerge<S> {
    /// Creates a merge over `(weight, source)` pairs and pulls the head of
    /// every source.
    ///
    /// # Errors
    ///
    /// [`PopForgeError::EmptyDimension`] when there are no sources, or when
    /// a source yields nothing; the error names the offending position.
    /// [`PopForgeError::InvalidWeight`] when a weight is not a finite
    /// probability in `[0, 1]`.
    pub fn new(sources: Vec<(f64, S)>) -> Result<Self> {
        if sources.is_empty() {
            return Err(PopForgeError::EmptyDimension { dimension: 0 });
        }

        let mut merge = Self {
            siblings: Vec::with_capacity(sources.len()),
            frontier: BinaryHeap::with_capacity(sources.len()),
            stats: EnumerationStats::default(),
        };

        for (index, (weight, mut source)) in sources.into_iter().enumerate() {
            if !is_probability(weight) {
                return Err(PopForgeError::InvalidWeight {
                    sibling: index,
                    weight,
                });
            }
            let (item, probability) = source
                .pull()
                .ok_or(PopForgeError::EmptyDimension { dimension: index })?;
            merge.siblings.push(Sibling {
                weight,
                source,
                head: Some(item),
            });
            merge.push(index, 0, weight * probability);
        }

        debug!(event = "merge_created", sources = merge.siblings.len());
        Ok(merge)
    }

    /// The next `[source, rank]` position, without consuming it.
    pub fn peek(&self) -> Option<&CombinationState> {
        self.frontier.peek().map(|entry| &entry.0)
    }

    /// Removes and returns the next item with its source index and joint
    /// probability.
    pub fn pop(&mut self) -> Option<(CombinationState, usize, S::Item)> {
        let FrontierEntry(state) = self.frontier.pop()?;
        self.stats.record_pop(self.frontier.len());

        let (index, rank) = (state.indices()[0], state.indices()[1]);
        let sibling = &mut self.siblings[index];
        let item = sibling.head.take()?;

        if let Some((next, probability)) = sibling.source.pull() {
            sibling.head = Some(next);
            let joint = sibling.weight * probability;
            self.push(index, rank + 1, joint);
        }

        trace!(
            event = "merge_emitted",
            source = index,
            rank,
            probability = state.probability(),
        );
        Some((state, index, item))
    }

    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn len_sources(&self) -> usize {
        self.siblings.len()
    }

    pub fn weight(&self, index: usize) -> Option<f64> {
        self.siblings.get(index).map(|s| s.weight)
    }

    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    fn push(&mut self, index: usize, rank: usize, probability: f64) {
        let key = CombinationKey::from_indices([index, rank]);
        self.frontier
            .push(FrontierEntry(CombinationState::new(key, probability)));
        self.stats.record_push(self.frontier.len());
    }
}

impl<S: RankedSource> RankedSource for RankedMerge<S> {
    type Item = (usize, S::Item);

    fn pull(&mut self) -> Option<((usize, S::Item), f64)> {
        self.pop()
            .map(|(state, index, item)| ((index, item), state.probability()))
    }
}

impl<S: RankedSource> Debug for RankedMerge<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankedMerge")
            .field("sources", &self.siblings.len())
            .field("frontier", &self.frontier.len())
            .field("stats", &self.stats)
            .finish()
    }
}
