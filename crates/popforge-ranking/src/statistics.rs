//! Enumeration statistics.
//!
//! Tracks how much of the product space a ranked enumerator has touched,
//! which is the measure of how well it avoided materializing it.

use std::fmt;

/// Counters of a single ranked enumerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Combinations returned to the caller.
    pub emitted: u64,
    /// Combinations ever inserted into the frontier, seed included.
    pub pushed: u64,
    /// Combinations currently waiting in the frontier.
    pub frontier_len: usize,
    /// Largest frontier size observed.
    pub peak_frontier_len: usize,
}

impl EnumerationStats {
    pub(crate) fn record_push(&mut self, frontier_len: usize) {
        self.pushed += 1;
        self.frontier_len = frontier_len;
        self.peak_frontier_len = self.peak_frontier_len.max(frontier_len);
    }

    pub(crate) fn record_pop(&mut self, frontier_len: usize) {
        self.emitted += 1;
        self.frontier_len = frontier_len;
    }

    /// Pushed combinations per emitted one; 0 before the first emission.
    pub fn expansion_ratio(&self) -> f64 {
        if self.emitted == 0 {
            0.0
        } else {
            self.pushed as f64 / self.emitted as f64
        }
    }
}

impl fmt::Display for EnumerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "emitted={} pushed={} frontier={} peak={}",
            self.emitted, self.pushed, self.frontier_len, self.peak_frontier_len
        )
    }
}
