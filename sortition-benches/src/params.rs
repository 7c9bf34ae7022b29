//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label for one run.

use std::fmt;

/// Parameters for a selection benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SelectionBenchParams {
    /// Number of items in the population.
    pub population: usize,
    /// Number of items to select.
    pub sample: usize,
}

impl fmt::Display for SelectionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.population, self.sample)
    }
}

/// Parameters for a pairing benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct PairingBenchParams {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges or pairs to produce.
    pub edges: usize,
}

impl fmt::Display for PairingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v={},m={}", self.vertices, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(SelectionBenchParams { population: 1_000, sample: 10 }, "n=1000,k=10")]
    #[case(SelectionBenchParams { population: 5, sample: 0 }, "n=5,k=0")]
    fn selection_labels(#[case] params: SelectionBenchParams, #[case] expected: &str) {
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn pairing_label() {
        let params = PairingBenchParams {
            vertices: 64,
            edges: 96,
        };
        assert_eq!(params.to_string(), "v=64,m=96");
    }
}
