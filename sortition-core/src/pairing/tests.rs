//! Tests for balanced pairing and distinct-pair drawing.

use std::collections::HashSet;

use rstest::rstest;

use super::*;
use crate::sample_distinct_pairs;

fn assert_simple(graph: &PairGraph<u32>) {
    let mut seen = HashSet::new();
    for &(a, b) in graph.edges() {
        assert_ne!(a, b, "self-loop {a}-{b}");
        assert!(seen.insert((a.min(b), a.max(b))), "parallel edge {a}-{b}");
    }
}

fn degree_spread(graph: &PairGraph<u32>, vertices: &[u32]) -> usize {
    let degrees: Vec<usize> = vertices.iter().map(|v| graph.degree(v)).collect();
    let max = degrees.iter().copied().max().unwrap_or_default();
    let min = degrees.iter().copied().min().unwrap_or_default();
    max - min
}

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(2, 1)]
#[case(5, 10)]
#[case(10, 45)]
fn max_pairs_counts_unordered_pairs(#[case] vertices: usize, #[case] expected: usize) {
    assert_eq!(max_pairs(vertices), expected);
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(2024)]
fn ten_edges_over_ten_vertices_stay_balanced(#[case] seed: u64) {
    let mut source = UniformSource::from_seed(seed);
    let vertices: Vec<u32> = (0..10).collect();
    let graph = build_balanced_pairing(&mut source, &vertices, 10).expect("target is reachable");
    assert_eq!(graph.edge_count(), 10);
    assert_simple(&graph);
    assert!(degree_spread(&graph, &vertices) <= 2);
}

#[test]
fn complete_graph_on_four_vertices_is_reachable() {
    let mut source = UniformSource::from_seed(5);
    let vertices: Vec<u32> = (0..4).collect();
    let graph = build_balanced_pairing(&mut source, &vertices, 6).expect("K4 is reachable");
    assert_simple(&graph);
    assert_eq!(graph.edge_count(), 6);
    assert!(vertices.iter().all(|v| graph.degree(v) == 3));
}

#[test]
fn usage_tracks_degree_after_every_step() {
    let mut source = UniformSource::from_seed(99);
    let vertices: Vec<u32> = (0..12).collect();
    let mut pairer = BalancedPairer::new(&vertices).expect("vertices are distinct");
    for step in 1..=18 {
        pairer.step(&mut source).expect("partners remain");
        let usages: Vec<(u32, usize)> = pairer.usages().map(|(&v, usage)| (v, usage)).collect();
        assert_eq!(usages.len(), vertices.len(), "heap lost or duplicated a vertex");
        let distinct: HashSet<u32> = usages.iter().map(|&(v, _)| v).collect();
        assert_eq!(distinct.len(), vertices.len());
        for &(vertex, usage) in &usages {
            assert_eq!(usage, pairer.graph().degree(&vertex));
        }
        let total: usize = usages.iter().map(|&(_, usage)| usage).sum();
        assert_eq!(total, 2 * step);
    }
}

#[test]
fn oversized_target_fails_fast() {
    let mut source = UniformSource::from_seed(1);
    let err =
        build_balanced_pairing(&mut source, &[1_u32, 2, 3], 4).expect_err("only 3 edges exist");
    assert_eq!(
        err,
        SamplingError::TargetUnreachable {
            requested: 4,
            maximum: 3,
        }
    );
}

#[test]
fn duplicate_vertices_are_rejected() {
    let mut source = UniformSource::from_seed(1);
    let err = build_balanced_pairing(&mut source, &[1_u32, 2, 1], 1).expect_err("vertex repeats");
    assert_eq!(err, SamplingError::DuplicateVertex { position: 2 });
}

#[test]
fn saturated_vertex_surfaces_no_valid_partner() {
    let mut source = UniformSource::from_seed(3);
    let mut pairer = BalancedPairer::new(&[1_u32, 2]).expect("vertices are distinct");
    pairer.step(&mut source).expect("first edge fits");
    let err = pairer.step(&mut source).expect_err("the only pair is used");
    assert_eq!(
        err,
        SamplingError::NoValidPartner {
            edges_built: 1,
            usage: 1,
        }
    );
    assert_eq!(pairer.usage(&1), Some(1));
    assert_eq!(pairer.usage(&2), Some(1));
}

#[test]
fn zero_target_yields_edgeless_graph() {
    let mut source = UniformSource::from_seed(3);
    let graph = build_balanced_pairing::<u32>(&mut source, &[], 0).expect("nothing to build");
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn distinct_pairs_avoid_exclusions_and_repeats() {
    let mut source = UniformSource::from_seed(17);
    let vertices: Vec<u32> = (0..6).collect();
    let excluded = [(1, 0), (2, 3)];
    let pairs = sample_distinct_pairs(
        &mut source,
        &vertices,
        13,
        &excluded,
        &PairingConfig::default(),
    )
    .expect("13 of the 15 pairs remain");
    assert_eq!(pairs.len(), 13);
    let normalised: HashSet<(u32, u32)> =
        pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
    assert_eq!(normalised.len(), 13);
    assert!(!normalised.contains(&(0, 1)));
    assert!(!normalised.contains(&(2, 3)));
    assert!(pairs.iter().all(|&(a, b)| a < b));
}

#[test]
fn distinct_pairs_exhaust_retries_when_every_pair_is_excluded() {
    let mut source = UniformSource::from_seed(17);
    let config = PairingConfig::builder()
        .with_max_retries(25)
        .build()
        .expect("ceiling is positive");
    let err = sample_distinct_pairs(
        &mut source,
        &[1_u32, 2, 3],
        1,
        &[(1, 2), (2, 3), (1, 3)],
        &config,
    )
    .expect_err("no pair is available");
    assert_eq!(
        err,
        SamplingError::ExhaustedRetries {
            accepted: 0,
            retries: 26,
        }
    );
}

#[test]
fn distinct_pairs_reject_unreachable_counts() {
    let mut source = UniformSource::from_seed(2);
    let err = sample_distinct_pairs(&mut source, &[1_u32, 2], 2, &[], &PairingConfig::default())
        .expect_err("one pair exists");
    assert_eq!(
        err,
        SamplingError::TargetUnreachable {
            requested: 2,
            maximum: 1,
        }
    );
}

#[test]
fn zero_retry_ceiling_is_invalid() {
    let err = PairingConfig::builder()
        .with_max_retries(0)
        .build()
        .expect_err("zero retries is meaningless");
    assert_eq!(err.code(), crate::SamplingErrorCode::InvalidArgument);
}
