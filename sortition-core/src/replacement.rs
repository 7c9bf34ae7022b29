//! Independent draws with replacement.

use crate::{
    error::{Result, SamplingError},
    uniform::UniformSource,
};

/// Draws one element uniformly from `population`.
///
/// # Errors
/// Returns [`SamplingError::EmptyPopulation`] when `population` is empty.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, pick_one};
///
/// let mut source = UniformSource::from_seed(2);
/// let colours = ["red", "green", "blue"];
/// assert!(colours.contains(pick_one(&mut source, &colours)?));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn pick_one<'a, T>(source: &mut UniformSource, population: &'a [T]) -> Result<&'a T> {
    if population.is_empty() {
        return Err(SamplingError::EmptyPopulation { requested: 1 });
    }
    population
        .get(source.uniform_index(population.len()))
        .ok_or(SamplingError::EmptyPopulation { requested: 1 })
}

/// Makes `k` independent uniform draws from `population`, in draw order.
/// Repeats are expected.
///
/// # Errors
/// Returns [`SamplingError::EmptyPopulation`] when `population` is empty and
/// `k > 0`.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, sample_with_replacement};
///
/// let mut source = UniformSource::from_seed(2);
/// let rolls = sample_with_replacement(&mut source, &[1, 2, 3, 4, 5, 6], 10)?;
/// assert_eq!(rolls.len(), 10);
/// assert!(sample_with_replacement::<u8>(&mut source, &[], 0)?.is_empty());
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn sample_with_replacement<T: Clone>(
    source: &mut UniformSource,
    population: &[T],
    k: usize,
) -> Result<Vec<T>> {
    if k == 0 {
        return Ok(Vec::new());
    }
    if population.is_empty() {
        return Err(SamplingError::EmptyPopulation { requested: k });
    }
    (0..k)
        .map(|_| pick_one(source, population).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_population_rejects_positive_draws() {
        let mut source = UniformSource::from_seed(6);
        let err = sample_with_replacement::<u8>(&mut source, &[], 3).expect_err("nothing to draw");
        assert_eq!(err, SamplingError::EmptyPopulation { requested: 3 });
        assert!(pick_one::<u8>(&mut source, &[]).is_err());
    }

    #[test]
    fn draws_can_exceed_population_size() {
        let mut source = UniformSource::from_seed(6);
        let draws = sample_with_replacement(&mut source, &['a', 'b'], 50).expect("non-empty");
        assert_eq!(draws.len(), 50);
        assert!(draws.contains(&'a'));
        assert!(draws.contains(&'b'));
    }

    #[test]
    fn singleton_population_repeats_its_only_item() {
        let mut source = UniformSource::from_seed(6);
        let draws = sample_with_replacement(&mut source, &[9], 5).expect("non-empty");
        assert_eq!(draws, [9; 5]);
    }
}
