//! Candidate list helpers.
//!
//! # Example
//!
//! ```
//! use popforge_test::assignment::assignments;
//!
//! let list = assignments("fertility", &[0.7, 0.3]);
//! assert_eq!(list[1].name(), "fertility-1");
//! assert_eq!(list[1].probability(), 0.3);
//! ```

use std::sync::Arc;

use popforge_core::ParameterAssignment;

/// One assignment per probability, named `{prefix}-{index}`.
pub fn assignments(prefix: &str, probabilities: &[f64]) -> Vec<ParameterAssignment> {
    probabilities
        .iter()
        .enumerate()
        .map(|(i, &p)| ParameterAssignment::new(format!("{prefix}-{i}"), p))
        .collect()
}

/// Like [`assignments`], wrapped for use in set mappings.
pub fn shared(prefix: &str, probabilities: &[f64]) -> Vec<Arc<ParameterAssignment>> {
    assignments(prefix, probabilities)
        .into_iter()
        .map(Arc::new)
        .collect()
}

/// `n` equally likely assignments.
pub fn uniform(prefix: &str, n: usize) -> Vec<ParameterAssignment> {
    assignments(prefix, &vec![1.0 / n as f64; n])
}
