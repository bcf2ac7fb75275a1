//! Weighted candidates for one discrete slot.

/// An option for one discrete slot together with its occurrence probability.
///
/// Lists of candidates handed to the ranking engine are sorted by
/// non-increasing probability; see [`crate::probability::sort_descending`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCandidate<T> {
    pub item: T,
    pub probability: f64,
}

impl<T> WeightedCandidate<T> {
    pub fn new(item: T, probability: f64) -> Self {
        Self { item, probability }
    }

    /// Maps the item, keeping the probability.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WeightedCandidate<U> {
        WeightedCandidate {
            item: f(self.item),
            probability: self.probability,
        }
    }
}
