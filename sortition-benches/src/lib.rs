//! Benchmark support crate for sortition.
//!
//! Provides parameter labels and population builders shared by the Criterion
//! benches for selection and pairing.

pub mod params;

/// Builds a population of `size` consecutive integers.
#[must_use]
pub fn population(size: usize) -> Vec<u32> {
    (0..size)
        .filter_map(|value| u32::try_from(value).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::population;

    #[test]
    fn population_counts_from_zero() {
        assert_eq!(population(4), vec![0, 1, 2, 3]);
        assert!(population(0).is_empty());
    }
}
