//! Tests for SetManager and SetTypeManager.

use std::collections::HashSet;

use popforge_core::{PopForgeError, Projection};
use popforge_test::scenario::{five_combination_set_type, single_set, SCENARIO_C_COMBINATIONS};
use popforge_test::shared;

use super::*;
use crate::ranked::{Dimension, RankedSource};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{a} != {b}");
}

fn set_manager(first: &[f64], second: &[f64]) -> SetManager {
    let (projection, group) = single_set(first, second);
    let set_type = &projection.user_set_types()[group.index()];
    SetManager::new(set_type, &set_type.sets()[0]).unwrap()
}

fn drain(manager: &mut SetManager) -> Vec<f64> {
    let mut probabilities = vec![manager.current_probability()];
    while manager.advance() {
        probabilities.push(manager.current_probability());
    }
    probabilities
}

// ============================================================================
// SetManager
// ============================================================================

#[test]
fn test_set_manager_ranks_with_tie() {
    let mut manager = set_manager(&[0.8, 0.2], &[0.8, 0.2]);
    let probabilities = drain(&mut manager);
    for (p, e) in probabilities.iter().zip([0.64, 0.16, 0.16, 0.04]) {
        assert_close(*p, e);
    }
    assert_eq!(probabilities.len(), 4);
    assert!(!manager.advance());
}

#[test]
fn test_set_manager_uniform_second_instance() {
    let mut manager = set_manager(&[0.8, 0.2], &[0.5, 0.5]);
    let probabilities = drain(&mut manager);
    for (p, e) in probabilities.iter().zip([0.4, 0.4, 0.1, 0.1]) {
        assert_close(*p, e);
    }
    assert_eq!(probabilities.len(), 4);
    assert!(!manager.advance());
}

#[test]
fn test_set_manager_starts_at_best_combination() {
    let manager = set_manager(&[0.8, 0.2], &[0.3, 0.7]);
    let mapping = manager.current_mapping().unwrap();
    let names: Vec<&str> = mapping.values().map(|a| a.name()).collect();
    // The second list is sorted on construction.
    assert_eq!(names, ["x-0", "y-1"]);
    assert_close(manager.current_probability(), 0.56);
    assert_eq!(manager.current_state().unwrap().key().to_string(), "0-0");
}

#[test]
fn test_set_manager_exhaustion_is_permanent() {
    let mut manager = set_manager(&[1.0], &[1.0]);
    assert!(!manager.is_exhausted());
    assert!(!manager.advance());
    assert!(manager.is_exhausted());
    assert!(!manager.advance());
    assert!(manager.current_mapping().is_none());
    assert_eq!(manager.current_probability(), 0.0);
}

#[test]
fn test_set_manager_mappings_are_distinct() {
    let mut manager = set_manager(&[0.5, 0.3, 0.2], &[0.6, 0.4]);
    assert_eq!(manager.num_of_combinations().exact(), Some(6));

    let mut seen = HashSet::new();
    while let Some((mapping, _)) = manager.pull() {
        let names: Vec<String> = mapping.values().map(|a| a.name().to_string()).collect();
        assert!(seen.insert(names));
    }
    assert_eq!(seen.len(), 6);
    assert!(manager.pull().is_none());
}

#[test]
fn test_set_manager_rejects_missing_instance() {
    let mut projection = Projection::new("p");
    let x = projection.add_instance("x", Vec::new());
    let y = projection.add_instance("y", Vec::new());
    let group = projection.add_set_type("group", vec![x, y]).unwrap();
    projection
        .add_set(group, "partial", 1.0, vec![(x, shared("x", &[1.0]))])
        .unwrap();

    let set_type = &projection.user_set_types()[0];
    let err = SetManager::new(set_type, &set_type.sets()[0]).unwrap_err();
    assert_eq!(
        err,
        PopForgeError::InvalidSet {
            set: "partial".to_string(),
            instance: y.to_string(),
        }
    );
}

#[test]
fn test_set_manager_rejects_empty_list() {
    let mut projection = Projection::new("p");
    let x = projection.add_instance("x", Vec::new());
    let y = projection.add_instance("y", Vec::new());
    let group = projection.add_set_type("group", vec![x, y]).unwrap();
    projection
        .add_set(group, "hollow", 1.0, vec![(x, shared("x", &[1.0])), (y, Vec::new())])
        .unwrap();

    let set_type = &projection.user_set_types()[0];
    let err = SetManager::new(set_type, &set_type.sets()[0]).unwrap_err();
    assert_eq!(err, PopForgeError::EmptyDimension { dimension: 1 });
}

// ============================================================================
// SetTypeManager
// ============================================================================

fn five_combinations() -> SetTypeManager {
    let (projection, group) = five_combination_set_type();
    SetTypeManager::new(&projection.user_set_types()[group.index()]).unwrap()
}

#[test]
fn test_create_assignments_reports_availability() {
    let mut manager = five_combinations();
    assert_eq!(manager.num_of_combinations().exact(), Some(5));

    assert!(manager.create_assignments(SCENARIO_C_COMBINATIONS));
    // Every combination is cached, but the source was not asked past them.
    assert!(!manager.is_complete());
    let assignment = manager.get_assignment(4).unwrap().clone();
    let probability = manager.get_probability(4).unwrap();

    assert!(!manager.create_assignments(SCENARIO_C_COMBINATIONS + 1));
    assert_eq!(manager.materialized(), 5);
    assert!(manager.is_complete());

    assert_eq!(manager.get_assignment(4).unwrap(), &assignment);
    assert_eq!(manager.get_probability(4).unwrap(), probability);
}

#[test]
fn test_ranked_across_sets() {
    let mut manager = five_combinations();
    manager.create_assignments(10);
    let probabilities: Vec<f64> = (0..5).map(|i| manager.get_probability(i).unwrap()).collect();
    for (p, e) in probabilities.iter().zip([0.42, 0.28, 0.15, 0.09, 0.06]) {
        assert_close(*p, e);
    }

    let likely = manager.get_set(0).unwrap();
    let unlikely = manager.get_set(2).unwrap();
    assert_ne!(likely, unlikely);
    assert_eq!(manager.get_set(1).unwrap(), likely);
    assert_eq!(manager.get_set(4).unwrap(), unlikely);

    let best = manager.get_assignment(0).unwrap();
    let names: Vec<&str> = best.values().map(|a| a.name()).collect();
    assert_eq!(names, ["x-likely-0", "y-0"]);
}

#[test]
fn test_get_beyond_materialized_is_out_of_range() {
    let mut manager = five_combinations();
    assert!(matches!(
        manager.get_assignment(0),
        Err(PopForgeError::IndexOutOfRange { index: 0, len: 0 })
    ));
    manager.create_assignments(2);
    assert!(manager.get_probability(1).is_ok());
    assert_eq!(
        manager.get_probability(2).unwrap_err(),
        PopForgeError::IndexOutOfRange { index: 2, len: 2 }
    );
    assert!(!manager.is_complete());
}

#[test]
fn test_create_assignments_is_incremental() {
    let mut manager = five_combinations();
    assert!(manager.create_assignments(1));
    assert_eq!(manager.materialized(), 1);
    assert!(manager.create_assignments(3));
    assert_eq!(manager.materialized(), 3);
    assert!(manager.create_assignments(2));
    assert_eq!(manager.materialized(), 3);
    assert!(manager.create_assignments(0));
}

#[test]
fn test_set_type_manager_as_dimension() {
    let mut manager = five_combinations();
    assert_eq!(manager.materialized(), 0);
    assert_close(manager.probability(2).unwrap(), 0.15);
    assert_eq!(manager.materialized(), 3);
    assert!(manager.candidate(2).is_some());
    assert!(manager.candidate(3).is_none());
    assert_eq!(manager.probability(5), None);
}

#[test]
fn test_set_type_without_sets_is_rejected() {
    let mut projection = Projection::new("p");
    let x = projection.add_instance("x", Vec::new());
    projection.add_set_type("barren", vec![x]).unwrap();
    let err = SetTypeManager::new(&projection.user_set_types()[0]).unwrap_err();
    assert_eq!(err, PopForgeError::EmptyDimension { dimension: 0 });
}

#[test]
fn test_set_manager_rejects_nan_probability() {
    let (projection, group) = single_set(&[0.5, f64::NAN], &[1.0]);
    let set_type = &projection.user_set_types()[group.index()];
    let err = SetManager::new(set_type, &set_type.sets()[0]).unwrap_err();
    assert!(matches!(
        err,
        PopForgeError::InvalidProbability { dimension: 0, .. }
    ));
}

#[test]
fn test_set_type_with_invalid_set_weight_is_rejected() {
    let mut projection = Projection::new("p");
    let x = projection.add_instance("x", Vec::new());
    let group = projection.add_set_type("group", vec![x]).unwrap();
    projection
        .add_set(group, "good", 0.5, vec![(x, shared("x", &[1.0]))])
        .unwrap();
    projection
        .add_set(group, "negative", -0.5, vec![(x, shared("x", &[1.0]))])
        .unwrap();
    let err = SetTypeManager::new(&projection.user_set_types()[0]).unwrap_err();
    assert_eq!(
        err,
        PopForgeError::InvalidWeight {
            sibling: 1,
            weight: -0.5
        }
    );
}

#[test]
fn test_set_type_with_invalid_set_is_rejected() {
    let mut projection = Projection::new("p");
    let x = projection.add_instance("x", Vec::new());
    let group = projection.add_set_type("group", vec![x]).unwrap();
    projection
        .add_set(group, "good", 0.5, vec![(x, shared("x", &[1.0]))])
        .unwrap();
    projection.add_set(group, "bad", 0.5, Vec::new()).unwrap();
    let err = SetTypeManager::new(&projection.user_set_types()[0]).unwrap_err();
    assert!(matches!(err, PopForgeError::InvalidSet { .. }));
}
