//! Projection domain model.
//!
//! The hierarchy is owned by the projection model; the ranking engine only
//! reads it:
//!
//! - [`ParameterInstance`] - one demographic input slot
//! - [`ParameterAssignment`] - one candidate value matrix with a probability
//! - [`ParameterSet`] - a weighted bundle of assignment lists
//! - [`SetType`] - a disjoint group of instances owning sibling sets
//! - [`Projection`] - all of the above, plus the implicit default set type

mod assignment;
mod candidate;
mod ids;
mod projection;
mod set;


pub use assignment::{AssignmentMap, ParameterAssignment, ParameterInstance};
pub use candidate::WeightedCandidate;
pub use ids::{ParameterInstanceId, SetId, SetTypeId};
pub use projection::Projection;
pub use set::{ParameterSet, SetType};
