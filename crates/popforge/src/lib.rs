//! PopForge - Ranked enumeration of probabilistic projection inputs
//!
//! Build a [`Projection`], hand it to a generator and pull complete
//! assignments, most probable first.
//!
//! # Example
//!
//! ```rust
//! use popforge::prelude::*;
//!
//! let mut projection = Projection::new("baseline");
//! projection.add_instance(
//!     "fertility",
//!     vec![
//!         ParameterAssignment::new("low", 0.3),
//!         ParameterAssignment::new("high", 0.7),
//!     ],
//! );
//!
//! let config = PopForgeConfig::new().with_trial_limit(1);
//! let mut generator = build_generator(&projection, &config).unwrap();
//!
//! let (assignment, probability) = generator.next_assignment().unwrap();
//! assert_eq!(probability, 0.7);
//! assert_eq!(assignment.values().next().unwrap().name(), "high");
//! assert!(generator.next_assignment().is_none());
//! ```

pub mod logging;

mod builder;
pub use builder::build_generator;

pub use popforge_config::{ConfigError, ExhaustiveConfig, NormalizationConfig, PopForgeConfig};
pub use popforge_core::{
    calculate_num_of_combinations, AssignmentMap, CombinationCount, Normalization,
    NormalizationReport, ParameterAssignment, ParameterInstance, ParameterInstanceId,
    ParameterSet, PopForgeError, Projection, Result, SetId, SetType, SetTypeId,
};
pub use popforge_ranking::{
    AssignmentGenerator, AssignmentIter, CombinationKey, CombinationState, EnumerationStats,
    ExhaustiveAssignmentGenerator, GeneratorOptions, RankedAssignment, SetManager,
    SetTypeManager,
};

/// Lower-level engine types for custom enumeration.
pub mod ranked {
    pub use popforge_ranking::ranked::*;
}

pub mod prelude {
    pub use crate::build_generator;
    pub use popforge_config::PopForgeConfig;
    pub use popforge_core::{
        CombinationCount, ParameterAssignment, ParameterInstanceId, PopForgeError, Projection,
        SetId, SetTypeId,
    };
    pub use popforge_ranking::{
        AssignmentGenerator, ExhaustiveAssignmentGenerator, GeneratorOptions, RankedAssignment,
    };
}
