//! PopForge Ranking Engine
//!
//! Deterministic, most-probable-first enumeration of projection inputs,
//! without materializing the combinatorial product:
//! - The generic ranked engine (frontier enumerator, weighted merge)
//! - SetManager: assignments within one set
//! - SetTypeManager: sets and their combinations within one set type
//! - ExhaustiveAssignmentGenerator: set types across the whole projection
//!
//! Everything is single-threaded and pull-based. Share a generator across
//! workers only behind external synchronization, or build one per worker.

pub mod generator;
pub mod manager;
pub mod ranked;
pub mod statistics;

pub use generator::{
    AssignmentGenerator, AssignmentIter, ExhaustiveAssignmentGenerator, GeneratorOptions,
    RankedAssignment,
};
pub use manager::{SetCombination, SetManager, SetTypeManager};
pub use ranked::{
    CombinationKey, CombinationState, Dimension, FlatDimension, LazyDimension,
    RankedFrontierEnumerator, RankedMerge, RankedSource,
};
pub use statistics::EnumerationStats;
