//! Top-level assignment generation.
//!
//! [`AssignmentGenerator`] is the contract an execution driver pulls
//! from, one complete assignment per trial, regardless of strategy.

mod exhaustive;


pub use exhaustive::{ExhaustiveAssignmentGenerator, GeneratorOptions, RankedAssignment};

use popforge_core::{AssignmentMap, CombinationCount};

/// Source of complete per-instance assignments for projection trials.
pub trait AssignmentGenerator {
    /// Pulls the next complete assignment and its probability. `None` once
    /// nothing is left, and on every call after that.
    fn next_assignment(&mut self) -> Option<(AssignmentMap, f64)>;

    /// Number of assignments this generator can produce in total.
    fn total_combinations(&self) -> CombinationCount;

    /// Number of assignments not yet produced.
    fn remaining_combinations(&self) -> CombinationCount;

    /// Borrows the generator as an iterator of assignments.
    fn assignments(&mut self) -> AssignmentIter<'_, Self>
    where
        Self: Sized,
    {
        AssignmentIter { generator: self }
    }
}

/// Iterator returned by [`AssignmentGenerator::assignments`].
#[derive(Debug)]
pub struct AssignmentIter<'a, G: ?Sized> {
    generator: &'a mut G,
}

impl<G: AssignmentGenerator + ?Sized> Iterator for AssignmentIter<'_, G> {
    type Item = (AssignmentMap, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.generator.next_assignment()
    }
}
