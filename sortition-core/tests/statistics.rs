//! Statistical checks on inclusion probabilities and reseed determinism.

use rstest::rstest;
use sortition_core::{
    UniformSource, bernoulli, build_balanced_pairing, sample_with_replacement,
    select_from_stream, select_without_replacement, weighted_coin,
};

const TRIALS: usize = 100_000;

fn inclusion_frequencies<F>(n: usize, trials: usize, mut draw: F) -> Vec<f64>
where
    F: FnMut() -> Vec<usize>,
{
    let mut counts = vec![0_usize; n];
    for _ in 0..trials {
        for item in draw() {
            counts[item] += 1;
        }
    }
    counts
        .into_iter()
        .map(|count| count as f64 / trials as f64)
        .collect()
}

#[test]
fn sequential_inclusion_is_three_tenths() {
    let mut source = UniformSource::from_seed(1);
    let population: Vec<usize> = (0..10).collect();
    let frequencies = inclusion_frequencies(10, TRIALS, || {
        select_without_replacement(&mut source, &population, 3).expect("k <= n")
    });
    for (item, frequency) in frequencies.iter().enumerate() {
        assert!((frequency - 0.3).abs() < 0.02, "item {item}: {frequency}");
    }
}

#[rstest]
#[case(10, 3)]
#[case(25, 5)]
#[case(8, 7)]
fn stream_and_slice_share_marginal_inclusion(#[case] n: usize, #[case] k: usize) {
    let expected = k as f64 / n as f64;
    let population: Vec<usize> = (0..n).collect();

    let mut slice_source = UniformSource::from_seed(100);
    let slice = inclusion_frequencies(n, TRIALS / 2, || {
        select_without_replacement(&mut slice_source, &population, k).expect("k <= n")
    });

    let mut stream_source = UniformSource::from_seed(100);
    let stream = inclusion_frequencies(n, TRIALS / 2, || {
        select_from_stream(&mut stream_source, population.iter().copied(), k).expect("k <= n")
    });

    for item in 0..n {
        assert!((slice[item] - expected).abs() < 0.02, "slice item {item}: {}", slice[item]);
        assert!((stream[item] - expected).abs() < 0.02, "stream item {item}: {}", stream[item]);
        assert!((slice[item] - stream[item]).abs() < 0.03);
    }
}

#[test]
fn replacement_draws_are_uniform() {
    let mut source = UniformSource::from_seed(8);
    let draws =
        sample_with_replacement(&mut source, &[0_usize, 1, 2, 3], 40_000).expect("non-empty");
    let mut counts = [0_usize; 4];
    for draw in draws {
        counts[draw] += 1;
    }
    for count in counts {
        let frequency = count as f64 / 40_000.0;
        assert!((frequency - 0.25).abs() < 0.02, "counts={counts:?}");
    }
}

#[test]
fn reseeded_sources_replay_identically() {
    let run = |seed: u64| {
        let mut source = UniformSource::from_seed(0);
        source.reseed(seed);
        let population: Vec<u16> = (0..100).collect();
        let sample = select_without_replacement(&mut source, &population, 9).expect("k <= n");
        let stream = select_from_stream(&mut source, 0..1_000_u32, 4).expect("k <= n");
        let coin = weighted_coin(&mut source, 1.0, 2.0).expect("weights are valid");
        let flip = bernoulli(&mut source, 0.5).expect("p is valid");
        let graph = build_balanced_pairing(&mut source, &population[..10], 10).expect("reachable");
        (sample, stream, coin, flip, graph.edges().to_vec())
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42).0, run(43).0);
}
