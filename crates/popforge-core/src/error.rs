//! Error types for PopForge

use thiserror::Error;

/// Main error type for PopForge operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopForgeError {
    /// A dimension (slot, set or set type) has no candidates at all.
    #[error("Dimension {dimension} has no candidates")]
    EmptyDimension { dimension: usize },

    /// A flat candidate list is not sorted by non-increasing probability.
    #[error("Candidates of dimension {dimension} increase in probability at position {position}")]
    UnsortedCandidates { dimension: usize, position: usize },

    /// A candidate probability is not a finite value in `[0, 1]`.
    #[error("Candidate {position} of dimension {dimension} has invalid probability {value}")]
    InvalidProbability {
        dimension: usize,
        position: usize,
        value: f64,
    },

    /// A merged sibling carries a weight that is not a finite value in `[0, 1]`.
    #[error("Sibling {sibling} has invalid weight {weight}")]
    InvalidWeight { sibling: usize, weight: f64 },

    /// Random access beyond the materialized range.
    #[error("Index {index} out of range (materialized: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A set does not map an instance governed by its set type.
    #[error("Set {set} has no assignments for parameter instance {instance}")]
    InvalidSet { set: String, instance: String },

    /// Error in projection model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Error in configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for PopForge operations
pub type Result<T> = std::result::Result<T, PopForgeError>;
