//! Combination counting without enumeration.
//!
//! Assignment counts are practically unlimited, so products across set
//! types overflow quickly. Counts use checked arithmetic and report
//! [`CombinationCount::TooLarge`] instead of wrapping.

use std::fmt;

use crate::domain::{Projection, SetType};

/// Number of combinations of a ranked space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombinationCount {
    /// The exact count.
    Exact(u64),
    /// The count does not fit in a `u64`.
    TooLarge,
}

impl CombinationCount {
    pub const ZERO: CombinationCount = CombinationCount::Exact(0);
    pub const ONE: CombinationCount = CombinationCount::Exact(1);

    /// Returns the exact count, if known.
    pub fn exact(self) -> Option<u64> {
        match self {
            CombinationCount::Exact(n) => Some(n),
            CombinationCount::TooLarge => None,
        }
    }

    pub fn is_too_large(self) -> bool {
        matches!(self, CombinationCount::TooLarge)
    }

    pub fn checked_add(self, other: CombinationCount) -> CombinationCount {
        match (self, other) {
            (CombinationCount::Exact(a), CombinationCount::Exact(b)) => {
                a.checked_add(b).map_or(CombinationCount::TooLarge, CombinationCount::Exact)
            }
            _ => CombinationCount::TooLarge,
        }
    }

    pub fn checked_mul(self, other: CombinationCount) -> CombinationCount {
        match (self, other) {
            // Zero annihilates even an unknown count.
            (CombinationCount::Exact(0), _) | (_, CombinationCount::Exact(0)) => {
                CombinationCount::ZERO
            }
            (CombinationCount::Exact(a), CombinationCount::Exact(b)) => {
                a.checked_mul(b).map_or(CombinationCount::TooLarge, CombinationCount::Exact)
            }
            _ => CombinationCount::TooLarge,
        }
    }

    /// Subtracts `consumed`, clamping at zero. Unknown counts stay unknown.
    pub fn saturating_sub(self, consumed: u64) -> CombinationCount {
        match self {
            CombinationCount::Exact(n) => CombinationCount::Exact(n.saturating_sub(consumed)),
            CombinationCount::TooLarge => CombinationCount::TooLarge,
        }
    }
}

impl From<u64> for CombinationCount {
    fn from(n: u64) -> Self {
        CombinationCount::Exact(n)
    }
}

impl fmt::Display for CombinationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinationCount::Exact(n) => write!(f, "{n}"),
            CombinationCount::TooLarge => write!(f, "too large"),
        }
    }
}

fn count_of_len(len: usize) -> CombinationCount {
    u64::try_from(len).map_or(CombinationCount::TooLarge, CombinationCount::Exact)
}

/// Combinations of one set type: sum over its sets of the product of the
/// candidate counts of its instances.
///
/// An instance missing from a set contributes zero.
pub fn set_type_combinations(set_type: &SetType) -> CombinationCount {
    set_type
        .sets()
        .iter()
        .map(|set| {
            set_type
                .instances()
                .iter()
                .map(|&instance| count_of_len(set.assignments_for(instance).map_or(0, <[_]>::len)))
                .fold(CombinationCount::ONE, CombinationCount::checked_mul)
        })
        .fold(CombinationCount::ZERO, CombinationCount::checked_add)
}

/// Total number of complete assignments of `projection`, default set type
/// included.
///
/// # Example
///
/// ```
/// use popforge_core::count::{calculate_num_of_combinations, CombinationCount};
/// use popforge_core::domain::{ParameterAssignment, Projection};
///
/// let mut projection = Projection::new("p");
/// projection.add_instance("a", vec![
///     ParameterAssignment::new("x", 0.5),
///     ParameterAssignment::new("y", 0.5),
/// ]);
/// projection.add_instance("b", vec![
///     ParameterAssignment::new("x", 0.2),
///     ParameterAssignment::new("y", 0.3),
///     ParameterAssignment::new("z", 0.5),
/// ]);
///
/// assert_eq!(calculate_num_of_combinations(&projection), CombinationCount::Exact(6));
/// ```
pub fn calculate_num_of_combinations(projection: &Projection) -> CombinationCount {
    projection
        .set_types()
        .iter()
        .map(|set_type| set_type_combinations(set_type))
        .fold(CombinationCount::ONE, CombinationCount::checked_mul)
}

#[cfg(test)]
#[path = "count_tests.rs"]
mod tests;
