//! PopForge Core - Domain model and probability utilities
//!
//! This crate provides the fundamental abstractions for PopForge:
//! - Domain types for parameter instances, assignments, sets and set types
//! - Probability normalization establishing the ranking precondition
//! - Overflow-aware combination counting
//! - The error taxonomy shared by all crates

pub mod count;
pub mod domain;
pub mod error;
pub mod probability;

pub use count::{calculate_num_of_combinations, CombinationCount};
pub use domain::{
    AssignmentMap, ParameterAssignment, ParameterInstance, ParameterInstanceId, ParameterSet,
    Projection, SetId, SetType, SetTypeId, WeightedCandidate,
};
pub use error::{PopForgeError, Result};
pub use probability::{Normalization, NormalizationReport};
