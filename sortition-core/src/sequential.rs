//! Selection sampling over a population of known length.
//!
//! A single left-to-right scan keeps each position with probability
//! `remaining_to_select / remaining_population`. The two counters fall in
//! lockstep and start with `k <= n`, so the ratio reaches `1.0` exactly when
//! every remaining position is needed; the output therefore holds exactly
//! `k` positions, in population order, each chosen with probability `k / n`.

use crate::{
    error::{Result, SamplingError},
    uniform::UniformSource,
};

/// Selects exactly `k` of the positions `0..n` without replacement, in
/// ascending order.
///
/// # Errors
/// Returns [`SamplingError::InsufficientPopulation`] when `k > n`.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, select_indices};
///
/// let mut source = UniformSource::from_seed(9);
/// let picked = select_indices(&mut source, 10, 4)?;
/// assert_eq!(picked.len(), 4);
/// assert!(picked.windows(2).all(|pair| pair[0] < pair[1]));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn select_indices(source: &mut UniformSource, n: usize, k: usize) -> Result<Vec<usize>> {
    if k > n {
        return Err(SamplingError::InsufficientPopulation {
            requested: k,
            available: n,
        });
    }

    let mut selected = Vec::with_capacity(k);
    let mut remaining_to_select = k;
    let mut remaining_population = n;
    for position in 0..n {
        if remaining_to_select == 0 {
            break;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "inclusion ratio only needs f64 precision"
        )]
        let ratio = remaining_to_select as f64 / remaining_population as f64;
        if source.next_uniform() < ratio {
            selected.push(position);
            remaining_to_select -= 1;
        }
        remaining_population -= 1;
    }
    Ok(selected)
}

/// Selects exactly `k` elements of `population` without replacement,
/// preserving their relative order.
///
/// `k == 0` yields an empty sample and `k == population.len()` yields a
/// copy of the whole population.
///
/// # Errors
/// Returns [`SamplingError::InsufficientPopulation`] when `k` exceeds the
/// population length.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, select_without_replacement};
///
/// let mut source = UniformSource::from_seed(1);
/// let letters = ['a', 'b', 'c', 'd'];
/// assert_eq!(select_without_replacement(&mut source, &letters, 4)?, letters);
/// assert!(select_without_replacement(&mut source, &letters, 0)?.is_empty());
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn select_without_replacement<T: Clone>(
    source: &mut UniformSource,
    population: &[T],
    k: usize,
) -> Result<Vec<T>> {
    let positions = select_indices(source, population.len(), k)?;
    Ok(positions
        .into_iter()
        .filter_map(|position| population.get(position).cloned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(5, 0)]
    #[case(5, 1)]
    #[case(5, 5)]
    #[case(100, 37)]
    fn select_indices_returns_exactly_k_ascending(#[case] n: usize, #[case] k: usize) {
        let mut source = UniformSource::from_seed(n as u64 * 31 + k as u64);
        let picked = select_indices(&mut source, n, k).expect("k <= n");
        assert_eq!(picked.len(), k);
        assert!(picked.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(picked.iter().all(|&position| position < n));
    }

    #[test]
    fn full_selection_returns_population_in_order() {
        let mut source = UniformSource::from_seed(4);
        let population: Vec<u32> = (0..20).collect();
        let sample = select_without_replacement(&mut source, &population, 20).expect("k == n");
        assert_eq!(sample, population);
    }

    #[test]
    fn oversized_request_is_rejected() {
        let mut source = UniformSource::from_seed(4);
        let err = select_without_replacement(&mut source, &[1, 2, 3], 4).expect_err("k > n");
        assert_eq!(
            err,
            SamplingError::InsufficientPopulation {
                requested: 4,
                available: 3,
            }
        );
    }

    #[test]
    fn duplicate_values_are_kept_per_position() {
        let mut source = UniformSource::from_seed(8);
        let population = ["x", "x", "x"];
        let sample = select_without_replacement(&mut source, &population, 3).expect("k == n");
        assert_eq!(sample, ["x", "x", "x"]);
    }

    #[test]
    fn inclusion_frequency_is_k_over_n() {
        const TRIALS: usize = 100_000;
        let mut source = UniformSource::from_seed(2024);
        let population: Vec<usize> = (0..10).collect();
        let mut counts = [0_usize; 10];
        for _ in 0..TRIALS {
            for item in select_without_replacement(&mut source, &population, 3).expect("k <= n") {
                counts[item] += 1;
            }
        }
        for (item, &count) in counts.iter().enumerate() {
            let frequency = count as f64 / TRIALS as f64;
            assert!(
                (frequency - 0.3).abs() < 0.02,
                "item {item} appeared with frequency {frequency}",
            );
        }
    }
}
