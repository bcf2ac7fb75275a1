//! Combination states: one index per dimension plus the joint probability.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// The index vector of a combination.
///
/// Identifies a *position* in the product space. Two states at the same
/// position share a key even if their recorded probabilities differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CombinationKey(SmallVec<[usize; 4]>);

impl CombinationKey {
    /// The all-zero key of `dimensions` length.
    pub fn zero(dimensions: usize) -> Self {
        Self(SmallVec::from_elem(0, dimensions))
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The key with `dimension` incremented by one.
    pub fn successor(&self, dimension: usize) -> Self {
        let mut next = self.clone();
        next.0[dimension] += 1;
        next
    }
}

impl fmt::Display for CombinationKey {
    /// Renders the indices joined by `-`, e.g. `0-2-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// One fully-resolved choice per dimension and its joint probability.
///
/// Deliberately not `PartialEq`: use [`same_position`](Self::same_position)
/// for key identity and [`value_eq`](Self::value_eq) for value equality.
#[derive(Debug, Clone)]
pub struct CombinationState {
    key: CombinationKey,
    probability: f64,
}

impl CombinationState {
    pub fn new(key: CombinationKey, probability: f64) -> Self {
        Self { key, probability }
    }

    pub fn key(&self) -> &CombinationKey {
        &self.key
    }

    pub fn indices(&self) -> &[usize] {
        self.key.indices()
    }

    /// Joint probability recorded when the state was created.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// True if both states denote the same index vector.
    pub fn same_position(&self, other: &CombinationState) -> bool {
        self.key == other.key
    }

    /// True if key and recorded probability both match exactly.
    pub fn value_eq(&self, other: &CombinationState) -> bool {
        self.key == other.key && self.probability.to_bits() == other.probability.to_bits()
    }

    pub fn into_key(self) -> CombinationKey {
        self.key
    }

    /// Frontier priority: higher probability first, then the
    /// lexicographically smaller index vector.
    pub(crate) fn priority_cmp(&self, other: &CombinationState) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl fmt::Display for CombinationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] p={}", self.key, self.probability)
    }
}

/// Heap entry ordering states by [`CombinationState::priority_cmp`].
#[derive(Debug)]
pub(crate) struct FrontierEntry(pub(crate) CombinationState);

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.priority_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.priority_cmp(&other.0)
    }
}
