//! Probability normalization for candidate lists.
//!
//! Candidate lists enter the ranking engine normalized and sorted by
//! non-increasing probability. This module establishes that precondition:
//! a zero (or otherwise unusable) sum falls back to a uniform distribution
//! with a warning, any other sum is rescaled to 1.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{ParameterAssignment, Projection, WeightedCandidate};

/// Default tolerance for treating a sum as 1.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Outcome of normalizing one probability list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Already summed to 1 within tolerance.
    Unchanged,
    /// Divided by the original positive sum.
    Rescaled { sum: f64 },
    /// Replaced by `1 / len` each.
    UniformFallback,
}

/// Normalizes `weights` in place so they sum to 1.
///
/// # Example
///
/// ```
/// use popforge_core::probability::{normalize, Normalization, DEFAULT_TOLERANCE};
///
/// let mut weights = [2.0, 6.0];
/// assert_eq!(normalize(&mut weights, DEFAULT_TOLERANCE), Normalization::Rescaled { sum: 8.0 });
/// assert_eq!(weights, [0.25, 0.75]);
///
/// let mut zeros = [0.0, 0.0, 0.0, 0.0];
/// assert_eq!(normalize(&mut zeros, DEFAULT_TOLERANCE), Normalization::UniformFallback);
/// assert_eq!(zeros, [0.25; 4]);
/// ```
pub fn normalize(weights: &mut [f64], tolerance: f64) -> Normalization {
    if weights.is_empty() {
        return Normalization::Unchanged;
    }

    let sum: f64 = weights.iter().sum();
    let usable = sum.is_finite() && sum > 0.0 && weights.iter().all(|w| *w >= 0.0);

    if !usable {
        warn!(
            event = "unnormalized_probabilities",
            sum,
            len = weights.len(),
            "Probabilities unusable, substituting a uniform distribution"
        );
        let uniform = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = uniform);
        return Normalization::UniformFallback;
    }

    if (sum - 1.0).abs() <= tolerance {
        return Normalization::Unchanged;
    }

    weights.iter_mut().for_each(|w| *w /= sum);
    Normalization::Rescaled { sum }
}

/// Stable sort by non-increasing probability.
pub fn sort_descending<T>(candidates: &mut [WeightedCandidate<T>]) {
    candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));
}

/// Returns true for a finite probability in `[0, 1]`.
pub fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Returns the first position that breaks a ranked list: a value that is not
/// a probability, or one that exceeds its predecessor.
pub fn first_unranked(probabilities: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut previous = 1.0;
    for (position, p) in probabilities.into_iter().enumerate() {
        if !is_probability(p) || p > previous {
            return Some(position);
        }
        previous = p;
    }
    None
}

/// Returns true if every value is a probability and none increases.
pub fn is_ranked(probabilities: impl IntoIterator<Item = f64>) -> bool {
    first_unranked(probabilities).is_none()
}

/// Counts of what [`Projection::normalize`] had to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Lists inspected.
    pub lists: usize,
    /// Lists rescaled to sum to 1.
    pub rescaled: usize,
    /// Lists replaced by a uniform distribution.
    pub uniform_fallbacks: usize,
}

impl NormalizationReport {
    fn record(&mut self, outcome: Normalization) {
        self.lists += 1;
        match outcome {
            Normalization::Unchanged => {}
            Normalization::Rescaled { .. } => self.rescaled += 1,
            Normalization::UniformFallback => self.uniform_fallbacks += 1,
        }
    }

    /// Returns true if no list needed any change.
    pub fn is_clean(&self) -> bool {
        self.rescaled == 0 && self.uniform_fallbacks == 0
    }
}

fn normalize_assignments(
    assignments: &mut Vec<Arc<ParameterAssignment>>,
    tolerance: f64,
    sort: bool,
) -> Normalization {
    let mut weights: Vec<f64> = assignments.iter().map(|a| a.probability()).collect();
    let outcome = normalize(&mut weights, tolerance);
    if outcome != Normalization::Unchanged {
        for (assignment, weight) in assignments.iter_mut().zip(weights) {
            Arc::make_mut(assignment).set_probability(weight);
        }
    }
    if sort {
        assignments.sort_by(|a, b| b.probability().total_cmp(&a.probability()));
    }
    outcome
}

impl Projection {
    /// Normalizes every candidate list of the projection.
    ///
    /// Covers each instance's own assignments, each set's per-instance
    /// lists and each set type's set probabilities. With `sort`, lists and
    /// sets are also reordered by non-increasing probability.
    pub fn normalize(&mut self, tolerance: f64, sort: bool) -> NormalizationReport {
        let mut report = NormalizationReport::default();

        for instance in self.instances_mut() {
            report.record(normalize_assignments(instance.assignments_mut(), tolerance, sort));
        }

        for set_type in self.set_types_mut() {
            let sets = set_type.sets_mut();
            let mut weights: Vec<f64> = sets.iter().map(|s| s.probability()).collect();
            report.record(normalize(&mut weights, tolerance));
            for (set, weight) in sets.iter_mut().zip(weights) {
                set.set_probability(weight);
            }
            if sort {
                sets.sort_by(|a, b| b.probability().total_cmp(&a.probability()));
            }

            for set in sets.iter_mut() {
                for list in set.assignments_mut().values_mut() {
                    report.record(normalize_assignments(list, tolerance, sort));
                }
            }
        }

        report
    }
}

#[cfg(test)]
#[path = "probability_tests.rs"]
mod tests;
