//! The ranked enumeration engine.
//!
//! Generic best-first search over nested, independent, discrete probability
//! spaces:
//!
//! - [`RankedFrontierEnumerator`] - product of independent sorted dimensions
//! - [`RankedMerge`] - union of weighted sibling sources
//! - [`FlatDimension`] / [`LazyDimension`] - literal candidate lists and
//!   candidates unfolded from a nested [`RankedSource`]
//!
//! The managers in this crate instantiate these for each level of a
//! projection.

mod dimension;
mod enumerator;
mod merge;
mod source;
mod state;

pub use dimension::{Dimension, FlatDimension, LazyDimension};
pub use enumerator::RankedFrontierEnumerator;
pub use merge::RankedMerge;
pub use source::RankedSource;
pub use state::{CombinationKey, CombinationState};
