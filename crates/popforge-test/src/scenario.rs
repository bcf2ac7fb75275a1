//! Ready-made projections.
//!
//! # Example
//!
//! ```
//! use popforge_core::calculate_num_of_combinations;
//! use popforge_test::scenario::{three_set_types, SCENARIO_B_COMBINATIONS};
//!
//! let projection = three_set_types();
//! assert_eq!(calculate_num_of_combinations(&projection).exact(), Some(SCENARIO_B_COMBINATIONS));
//! ```

use popforge_core::{ParameterInstanceId, Projection, SetTypeId};

use crate::assignment::{assignments, shared, uniform};

/// Combinations of [`three_set_types`].
pub const SCENARIO_B_COMBINATIONS: u64 = 64;

/// Combinations of [`five_combination_set_type`].
pub const SCENARIO_C_COMBINATIONS: usize = 5;

/// A projection with one set type of two instances and one set of
/// probability 1 mapping them to `first` and `second`.
pub fn single_set(first: &[f64], second: &[f64]) -> (Projection, SetTypeId) {
    let mut projection = Projection::new("single-set");
    let x = projection.add_instance("x", assignments("x", first));
    let y = projection.add_instance("y", assignments("y", second));
    let group = projection
        .add_set_type("group", vec![x, y])
        .expect("fresh instances");
    projection
        .add_set(group, "only", 1.0, vec![(x, shared("x", first)), (y, shared("y", second))])
        .expect("governed instances");
    (projection, group)
}

/// Three set types with 2, 2 and 1 sets; 8 * 8 * 1 combinations.
pub fn three_set_types() -> Projection {
    let mut projection = Projection::new("three-set-types");
    let f1 = projection.add_instance("fertility-urban", uniform("f1", 2));
    let f2 = projection.add_instance("fertility-rural", uniform("f2", 2));
    let m1 = projection.add_instance("mortality-male", uniform("m1", 2));
    let m2 = projection.add_instance("mortality-female", uniform("m2", 2));
    let g1 = projection.add_instance("migration", uniform("g1", 1));

    let fertility = projection
        .add_set_type("fertility", vec![f1, f2])
        .expect("fresh instances");
    projection
        .add_set(
            fertility,
            "high",
            0.6,
            vec![(f1, shared("f1-high", &[0.7, 0.3])), (f2, shared("f2-high", &[0.5, 0.5]))],
        )
        .expect("governed instances");
    projection
        .add_set(
            fertility,
            "low",
            0.4,
            vec![(f1, shared("f1-low", &[0.9, 0.1])), (f2, shared("f2-low", &[0.6, 0.4]))],
        )
        .expect("governed instances");

    let mortality = projection
        .add_set_type("mortality", vec![m1, m2])
        .expect("fresh instances");
    projection
        .add_set(
            mortality,
            "improving",
            0.5,
            vec![(m1, shared("m1-imp", &[0.8, 0.2])), (m2, shared("m2-imp", &[0.55, 0.45]))],
        )
        .expect("governed instances");
    projection
        .add_set(
            mortality,
            "stable",
            0.5,
            vec![(m1, shared("m1-stable", &[0.5, 0.5])), (m2, shared("m2-stable", &[0.7, 0.3]))],
        )
        .expect("governed instances");

    let migration = projection
        .add_set_type("migration", vec![g1])
        .expect("fresh instances");
    projection
        .add_set(migration, "baseline", 1.0, vec![(g1, shared("g1", &[1.0]))])
        .expect("governed instances");

    projection
}

/// One set type over two instances whose sets yield 2 and 3 combinations.
///
/// Ranked probabilities: 0.42, 0.28, 0.15, 0.09, 0.06.
pub fn five_combination_set_type() -> (Projection, SetTypeId) {
    let mut projection = Projection::new("five-combinations");
    let x = projection.add_instance("x", uniform("x", 3));
    let y = projection.add_instance("y", uniform("y", 1));
    let group = projection
        .add_set_type("group", vec![x, y])
        .expect("fresh instances");
    projection
        .add_set(
            group,
            "likely",
            0.7,
            vec![(x, shared("x-likely", &[0.6, 0.4])), (y, shared("y", &[1.0]))],
        )
        .expect("governed instances");
    projection
        .add_set(
            group,
            "unlikely",
            0.3,
            vec![(x, shared("x-unlikely", &[0.5, 0.3, 0.2])), (y, shared("y", &[1.0]))],
        )
        .expect("governed instances");
    (projection, group)
}

/// One grouped set type plus two ungrouped instances for the default set
/// type.
///
/// Returns the projection and the ids of the grouped and ungrouped
/// instances.
pub fn mixed() -> (Projection, Vec<ParameterInstanceId>, Vec<ParameterInstanceId>) {
    let mut projection = Projection::new("mixed");
    let a = projection.add_instance("a", assignments("a", &[0.5, 0.5]));
    let b = projection.add_instance("b", assignments("b", &[0.9, 0.1]));
    let c = projection.add_instance("c", assignments("c", &[0.6, 0.3, 0.1]));
    let d = projection.add_instance("d", assignments("d", &[1.0]));

    let group = projection
        .add_set_type("group", vec![a, b])
        .expect("fresh instances");
    projection
        .add_set(
            group,
            "first",
            0.75,
            vec![(a, shared("a1", &[0.8, 0.2])), (b, shared("b1", &[1.0]))],
        )
        .expect("governed instances");
    projection
        .add_set(
            group,
            "second",
            0.25,
            vec![(a, shared("a2", &[1.0])), (b, shared("b2", &[0.5, 0.5]))],
        )
        .expect("governed instances");

    (projection, vec![a, b], vec![c, d])
}
