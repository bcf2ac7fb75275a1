//! Tests for the ranked frontier enumerator.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::ranked::{FlatDimension, LazyDimension};

fn flat(probabilities: &[f64]) -> FlatDimension<usize> {
    FlatDimension::from_probabilities(probabilities.iter().copied())
}

fn probabilities<D: Dimension>(enumerator: &mut RankedFrontierEnumerator<D>) -> Vec<f64> {
    enumerator.by_ref().map(|s| s.probability()).collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "{actual:?} vs {expected:?}");
    }
}

/// Random descending dimension with 1..=max_len candidates.
fn random_dimension(rng: &mut StdRng, max_len: usize) -> Vec<f64> {
    let len = rng.random_range(1..=max_len);
    let mut weights: Vec<f64> = (0..len).map(|_| rng.random::<f64>()).collect();
    let sum: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);
    weights.sort_by(|a, b| b.total_cmp(a));
    weights
}

#[test]
fn test_two_by_two_with_tie() {
    let mut enumerator =
        RankedFrontierEnumerator::new(vec![flat(&[0.8, 0.2]), flat(&[0.8, 0.2])]).unwrap();
    assert_close(&probabilities(&mut enumerator), &[0.64, 0.16, 0.16, 0.04]);
}

#[test]
fn test_uniform_second_dimension() {
    let mut enumerator =
        RankedFrontierEnumerator::new(vec![flat(&[0.8, 0.2]), flat(&[0.5, 0.5])]).unwrap();
    assert_close(&probabilities(&mut enumerator), &[0.4, 0.4, 0.1, 0.1]);
}

#[test]
fn test_ties_emit_smaller_key_first() {
    let mut enumerator =
        RankedFrontierEnumerator::new(vec![flat(&[0.8, 0.2]), flat(&[0.8, 0.2])]).unwrap();
    let keys: Vec<String> = enumerator.by_ref().map(|s| s.key().to_string()).collect();
    assert_eq!(keys, ["0-0", "0-1", "1-0", "1-1"]);
}

#[test]
fn test_exhaustion_is_idempotent() {
    let mut enumerator = RankedFrontierEnumerator::new(vec![flat(&[1.0])]).unwrap();
    assert!(enumerator.pop().is_some());
    assert!(enumerator.is_exhausted());
    for _ in 0..3 {
        assert!(enumerator.pop().is_none());
        assert!(enumerator.peek().is_none());
    }
}

#[test]
fn test_peek_matches_pop() {
    let mut enumerator =
        RankedFrontierEnumerator::new(vec![flat(&[0.6, 0.3, 0.1]), flat(&[0.7, 0.3])]).unwrap();
    while let Some(peeked) = enumerator.peek().cloned() {
        let popped = enumerator.pop().unwrap();
        assert!(peeked.value_eq(&popped));
    }
}

#[test]
fn test_empty_dimension_rejected() {
    let err = RankedFrontierEnumerator::new(vec![flat(&[0.5, 0.5]), flat(&[])]).unwrap_err();
    assert_eq!(err, PopForgeError::EmptyDimension { dimension: 1 });
}

#[test]
fn test_unsorted_dimension_rejected() {
    let err = RankedFrontierEnumerator::new(vec![flat(&[0.2, 0.8])]).unwrap_err();
    assert_eq!(
        err,
        PopForgeError::UnsortedCandidates {
            dimension: 0,
            position: 1
        }
    );
}

#[test]
fn test_nan_probability_rejected() {
    let err = RankedFrontierEnumerator::new(vec![flat(&[0.5, f64::NAN, 0.9])]).unwrap_err();
    assert!(matches!(
        err,
        PopForgeError::InvalidProbability {
            dimension: 0,
            position: 1,
            value,
        } if value.is_nan()
    ));
}

#[test]
fn test_negative_probability_rejected() {
    let err = RankedFrontierEnumerator::new(vec![flat(&[0.5, 0.5]), flat(&[0.5, -0.5])])
        .unwrap_err();
    assert_eq!(
        err,
        PopForgeError::InvalidProbability {
            dimension: 1,
            position: 1,
            value: -0.5
        }
    );
}

#[test]
fn test_probability_above_one_rejected() {
    let err = RankedFrontierEnumerator::new(vec![flat(&[1.5, 0.5])]).unwrap_err();
    assert_eq!(
        err,
        PopForgeError::InvalidProbability {
            dimension: 0,
            position: 0,
            value: 1.5
        }
    );
}

#[test]
fn test_no_dimensions_yield_single_empty_combination() {
    let mut enumerator = RankedFrontierEnumerator::<FlatDimension<usize>>::new(Vec::new()).unwrap();
    let state = enumerator.pop().unwrap();
    assert!(state.key().is_empty());
    assert_eq!(state.probability(), 1.0);
    assert!(enumerator.pop().is_none());
}

#[test]
fn test_singleton_dimensions_contribute_no_successors() {
    let mut enumerator = RankedFrontierEnumerator::new(vec![
        flat(&[1.0]),
        flat(&[0.5, 0.3, 0.2]),
        flat(&[1.0]),
    ])
    .unwrap();
    let keys: Vec<String> = enumerator.by_ref().map(|s| s.key().to_string()).collect();
    assert_eq!(keys, ["0-0-0", "0-1-0", "0-2-0"]);
}

#[test]
fn test_zero_probability_candidates_are_still_emitted() {
    let mut enumerator =
        RankedFrontierEnumerator::new(vec![flat(&[1.0, 0.0]), flat(&[0.5, 0.5])]).unwrap();
    assert_close(&probabilities(&mut enumerator), &[0.5, 0.5, 0.0, 0.0]);
}

#[test]
fn test_resolve_candidates() {
    let mut enumerator = RankedFrontierEnumerator::new(vec![
        FlatDimension::from_pairs([("young", 0.7), ("old", 0.3)]),
        FlatDimension::from_pairs([("urban", 0.9), ("rural", 0.1)]),
    ])
    .unwrap();
    let first = enumerator.pop().unwrap();
    assert_eq!(enumerator.resolve(&first).unwrap(), vec![&"young", &"urban"]);
    let second = enumerator.pop().unwrap();
    assert_eq!(enumerator.resolve(&second).unwrap(), vec![&"old", &"urban"]);

    let foreign = CombinationState::new(CombinationKey::zero(3), 1.0);
    assert!(enumerator.resolve(&foreign).is_none());
}

#[test]
fn test_random_spaces_are_ranked_complete_and_reconstructible() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..25 {
        let n = rng.random_range(1..=4);
        let dims: Vec<Vec<f64>> = (0..n).map(|_| random_dimension(&mut rng, 5)).collect();
        let total: usize = dims.iter().map(Vec::len).product();

        let mut enumerator =
            RankedFrontierEnumerator::new(dims.iter().map(|d| flat(d)).collect()).unwrap();

        let mut previous = f64::INFINITY;
        let mut keys = HashSet::new();
        while let Some(state) = enumerator.pop() {
            assert!(state.probability() <= previous, "not monotone");
            previous = state.probability();

            let expected: f64 = state
                .indices()
                .iter()
                .zip(&dims)
                .map(|(&i, d)| d[i])
                .product();
            assert!((state.probability() - expected).abs() < 1e-12);

            assert!(keys.insert(state.into_key()), "duplicate key");
        }
        assert_eq!(keys.len(), total);

        let stats = enumerator.stats();
        assert_eq!(stats.emitted, total as u64);
        assert_eq!(stats.pushed, total as u64);
        assert_eq!(stats.frontier_len, 0);
    }
}

#[test]
fn test_frontier_stays_small_for_top_k() {
    let dims: Vec<FlatDimension<usize>> = (0..6)
        .map(|_| FlatDimension::from_probabilities((0..10).map(|i| 0.5f64.powi(i + 1))))
        .collect();
    let mut enumerator = RankedFrontierEnumerator::new(dims).unwrap();
    for _ in 0..20 {
        enumerator.pop().unwrap();
    }
    // Each pop pushes at most one successor per dimension.
    assert!(enumerator.stats().pushed <= 1 + 20 * 6);
    assert!(!enumerator.is_exhausted());
}

#[test]
fn test_nested_enumerator_as_lazy_dimension() {
    fn inner(a: &[f64], b: &[f64]) -> LazyDimension<RankedFrontierEnumerator<FlatDimension<usize>>> {
        LazyDimension::new(RankedFrontierEnumerator::new(vec![flat(a), flat(b)]).unwrap())
    }

    let mut outer = RankedFrontierEnumerator::new(vec![
        inner(&[0.9, 0.1], &[0.6, 0.4]),
        inner(&[0.5, 0.5], &[1.0]),
    ])
    .unwrap();

    let emitted: Vec<CombinationState> = outer.by_ref().collect();
    assert_eq!(emitted.len(), 8);
    for pair in emitted.windows(2) {
        assert!(pair[0].probability() >= pair[1].probability());
    }
    assert!((emitted[0].probability() - 0.54 * 0.5).abs() < 1e-12);
    assert!((emitted.iter().map(|s| s.probability()).sum::<f64>() - 1.0).abs() < 1e-12);

    let inner_best = outer.dimension(0).unwrap().candidate(0).unwrap();
    assert_eq!(inner_best.key().to_string(), "0-0");
}
