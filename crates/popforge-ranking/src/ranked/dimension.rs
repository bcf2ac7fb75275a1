//! Dimensions: the axes of choice of one enumeration level.
//!
//! A dimension exposes candidate probabilities by index, sorted by
//! non-increasing probability. [`FlatDimension`] holds a literal list;
//! [`LazyDimension`] unfolds a nested [`RankedSource`] on demand, so the
//! candidates of one level can be the ranked combinations of the level
//! below.

use std::fmt::Debug;

use popforge_core::probability::first_unranked;
use popforge_core::WeightedCandidate;

use super::RankedSource;

/// One axis of choice, with candidates ordered by non-increasing probability.
pub trait Dimension {
    /// The concrete value a candidate index resolves to.
    type Candidate;

    /// Probability of the candidate at `index`, or `None` past the end.
    ///
    /// Takes `&mut self` so nested dimensions can unfold lazily.
    fn probability(&mut self, index: usize) -> Option<f64>;

    /// Resolves an index whose probability has already been requested.
    fn candidate(&self, index: usize) -> Option<&Self::Candidate>;

    /// Position of the first known candidate whose probability is outside
    /// `[0, 1]` or above its predecessor's, if any.
    ///
    /// Nested dimensions are ranked by construction and keep the default.
    fn first_unranked(&self) -> Option<usize> {
        None
    }
}

/// A dimension backed by a literal, pre-sorted candidate list.
#[derive(Debug, Clone)]
pub struct FlatDimension<T> {
    candidates: Vec<WeightedCandidate<T>>,
}

impl<T> FlatDimension<T> {
    /// Creates a dimension over `candidates`, which must already be sorted.
    ///
    /// Emptiness and order are checked by the enumerator that receives it.
    pub fn new(candidates: Vec<WeightedCandidate<T>>) -> Self {
        Self { candidates }
    }

    /// Creates a dimension from `(item, probability)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (T, f64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(item, probability)| WeightedCandidate::new(item, probability))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[WeightedCandidate<T>] {
        &self.candidates
    }
}

impl FlatDimension<usize> {
    /// Candidates are their own indices; handy for probability-only spaces.
    pub fn from_probabilities(probabilities: impl IntoIterator<Item = f64>) -> Self {
        Self::from_pairs(probabilities.into_iter().enumerate())
    }
}

impl<T> Dimension for FlatDimension<T> {
    type Candidate = T;

    fn probability(&mut self, index: usize) -> Option<f64> {
        self.candidates.get(index).map(|c| c.probability)
    }

    fn candidate(&self, index: usize) -> Option<&T> {
        self.candidates.get(index).map(|c| &c.item)
    }

    fn first_unranked(&self) -> Option<usize> {
        first_unranked(self.candidates.iter().map(|c| c.probability))
    }
}

/// A dimension whose candidates are pulled from a nested ranked source and
/// cached as they are reached.
pub struct LazyDimension<S: RankedSource> {
    source: S,
    cache: Vec<WeightedCandidate<S::Item>>,
    exhausted: bool,
}

impl<S: RankedSource> LazyDimension<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Vec::new(),
            exhausted: false,
        }
    }

    /// Pulls until at least `n` candidates are cached.
    ///
    /// Returns false if the source ran out first; everything it produced
    /// stays cached.
    pub fn materialize(&mut self, n: usize) -> bool {
        while self.cache.len() < n && !self.exhausted {
            match self.source.pull() {
                Some((item, probability)) => {
                    self.cache.push(WeightedCandidate::new(item, probability))
                }
                None => self.exhausted = true,
            }
        }
        self.cache.len() >= n
    }

    /// Number of cached candidates.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// True once the nested source has reported exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn get(&self, index: usize) -> Option<&WeightedCandidate<S::Item>> {
        self.cache.get(index)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: RankedSource + Debug> Debug for LazyDimension<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyDimension")
            .field("source", &self.source)
            .field("cached", &self.cache.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl<S: RankedSource> Dimension for LazyDimension<S> {
    type Candidate = S::Item;

    fn probability(&mut self, index: usize) -> Option<f64> {
        if self.materialize(index + 1) {
            Some(self.cache[index].probability)
        } else {
            None
        }
    }

    fn candidate(&self, index: usize) -> Option<&S::Item> {
        self.cache.get(index).map(|c| &c.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown {
        remaining: Vec<f64>,
        pulls: usize,
    }

    impl RankedSource for Countdown {
        type Item = usize;

        fn pull(&mut self) -> Option<(usize, f64)> {
            if self.remaining.is_empty() {
                return None;
            }
            self.pulls += 1;
            Some((self.pulls, self.remaining.remove(0)))
        }
    }

    #[test]
    fn test_flat_dimension_bounds() {
        let mut dim = FlatDimension::from_probabilities([0.7, 0.3]);
        assert_eq!(dim.probability(1), Some(0.3));
        assert_eq!(dim.probability(2), None);
        assert_eq!(dim.candidate(1), Some(&1));
        assert_eq!(dim.first_unranked(), None);
    }

    #[test]
    fn test_flat_dimension_detects_unsorted() {
        let dim = FlatDimension::from_probabilities([0.2, 0.5, 0.3]);
        assert_eq!(dim.first_unranked(), Some(1));
    }

    #[test]
    fn test_lazy_dimension_pulls_on_demand() {
        let mut dim = LazyDimension::new(Countdown {
            remaining: vec![0.5, 0.3, 0.2],
            pulls: 0,
        });
        assert!(dim.is_empty());
        assert_eq!(dim.probability(1), Some(0.3));
        assert_eq!(dim.source().pulls, 2);
        assert_eq!(dim.candidate(1), Some(&2));
        assert_eq!(dim.candidate(2), None);
        assert!(!dim.is_exhausted());
    }

    #[test]
    fn test_lazy_dimension_materialize_reports_shortfall() {
        let mut dim = LazyDimension::new(Countdown {
            remaining: vec![0.6, 0.4],
            pulls: 0,
        });
        assert!(dim.materialize(2));
        assert!(!dim.is_exhausted());
        assert!(!dim.materialize(3));
        assert!(dim.is_exhausted());
        assert_eq!(dim.len(), 2);
        assert_eq!(dim.get(1).map(|c| c.probability), Some(0.4));
        assert_eq!(dim.probability(5), None);
    }
}
