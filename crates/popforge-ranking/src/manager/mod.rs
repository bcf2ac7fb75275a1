//! Managers for the two lower enumeration levels.
//!
//! - [`SetManager`] - assignments within one set
//! - [`SetTypeManager`] - sets and their combinations within one set type

mod set;
mod set_type;

#[cfg(test)]
mod tests;

pub use set::SetManager;
pub use set_type::{SetCombination, SetTypeManager};
