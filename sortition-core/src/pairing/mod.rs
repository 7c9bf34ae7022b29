//! Randomized pairing over a vertex set.
//!
//! [`build_balanced_pairing`] grows a simple graph one edge at a time, always
//! joining two minimum-usage vertices that are not yet adjacent, so vertex
//! degrees stay within a narrow band around `2m / |V|`.
//! [`sample_distinct_pairs`] draws unconstrained distinct pairs by rejection.

mod config;
mod distinct;

use std::hash::Hash;

use tracing::{debug, instrument, warn};

use crate::{
    error::{Result, SamplingError},
    graph::PairGraph,
    heap::UsageHeap,
    uniform::UniformSource,
};

pub use config::{PairingConfig, PairingConfigBuilder};
pub use distinct::sample_distinct_pairs;

/// Number of distinct unordered pairs over `vertices` items.
#[must_use]
pub const fn max_pairs(vertices: usize) -> usize {
    if vertices < 2 {
        return 0;
    }
    // One of two consecutive integers is even, so the halving is exact.
    if vertices % 2 == 0 {
        (vertices / 2).saturating_mul(vertices - 1)
    } else {
        vertices.saturating_mul((vertices - 1) / 2)
    }
}

/// Incremental state of one balanced pairing run.
///
/// The heap holds every vertex exactly once, keyed by its usage count, and
/// that count always equals the vertex's degree in the graph.
///
/// # Examples
/// ```
/// use sortition_core::{BalancedPairer, UniformSource};
///
/// let mut source = UniformSource::from_seed(8);
/// let mut pairer = BalancedPairer::new(&[1, 2, 3, 4])?;
/// pairer.step(&mut source)?;
/// pairer.step(&mut source)?;
/// assert_eq!(pairer.graph().edge_count(), 2);
/// assert_eq!(pairer.usage(&1), Some(1));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BalancedPairer<T> {
    heap: UsageHeap<T>,
    graph: PairGraph<T>,
}

impl<T: Clone + Eq + Hash> BalancedPairer<T> {
    /// Starts a run with every vertex at usage zero and no edges.
    ///
    /// # Errors
    /// Returns [`SamplingError::DuplicateVertex`] when a vertex repeats.
    pub fn new(vertices: &[T]) -> Result<Self> {
        let mut heap = UsageHeap::new();
        for (position, vertex) in vertices.iter().enumerate() {
            heap.push(vertex.clone(), 0)
                .map_err(|_| SamplingError::DuplicateVertex { position })?;
        }
        Ok(Self {
            heap,
            graph: PairGraph::with_vertices(vertices.iter().cloned()),
        })
    }

    /// Adds one edge between two minimum-usage, non-adjacent vertices.
    ///
    /// The first endpoint is drawn uniformly from the minimum-usage bucket;
    /// the second is drawn the same way from the vertices that are neither
    /// the first endpoint nor its neighbours.
    ///
    /// # Errors
    /// Returns [`SamplingError::NoValidPartner`] when the first endpoint is
    /// already adjacent to every other vertex, or the run has fewer than
    /// two vertices. The run's state is left as it was before the call.
    pub fn step(&mut self, source: &mut UniformSource) -> Result<()> {
        let stranded = |graph: &PairGraph<T>, usage| SamplingError::NoValidPartner {
            edges_built: graph.edge_count(),
            usage,
        };

        let (first, first_usage) = self
            .heap
            .pop_uniform_min(source)
            .ok_or_else(|| stranded(&self.graph, 0))?;

        let graph = &self.graph;
        let partner = self
            .heap
            .pop_uniform_min_where(source, |candidate| !graph.contains_edge(&first, candidate));
        let Some((second, second_usage)) = partner else {
            let err = stranded(&self.graph, first_usage);
            self.heap.push(first, first_usage)?;
            warn!(
                edges_built = self.graph.edge_count(),
                usage = first_usage,
                "minimum-usage vertex has no remaining partner"
            );
            return Err(err);
        };

        self.graph.add_edge(first.clone(), second.clone());
        self.heap.push(first, first_usage + 1)?;
        self.heap.push(second, second_usage + 1)?;
        Ok(())
    }

    /// Current usage count of `vertex`.
    #[must_use]
    pub fn usage(&self, vertex: &T) -> Option<usize> {
        self.heap.key_of(vertex)
    }

    /// Usage counts in ascending order of usage.
    pub fn usages(&self) -> impl Iterator<Item = (&T, usize)> {
        self.heap.iter()
    }

    /// Graph built so far.
    #[must_use]
    pub const fn graph(&self) -> &PairGraph<T> {
        &self.graph
    }

    /// Ends the run and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> PairGraph<T> {
        self.graph
    }
}

/// Builds a simple graph with `target_edges` edges over `vertices`, keeping
/// every vertex's degree as close to `2 * target_edges / vertices.len()` as
/// the random pairing allows.
///
/// # Errors
/// - [`SamplingError::DuplicateVertex`] when a vertex repeats.
/// - [`SamplingError::TargetUnreachable`] when `target_edges` exceeds the
///   `|V| * (|V| - 1) / 2` edges a simple graph can hold; checked before any
///   edge is drawn.
/// - [`SamplingError::NoValidPartner`] when the run strands a vertex that is
///   already adjacent to every other vertex.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, build_balanced_pairing};
///
/// let mut source = UniformSource::from_seed(42);
/// let vertices: Vec<u32> = (0..6).collect();
/// let graph = build_balanced_pairing(&mut source, &vertices, 6)?;
/// assert_eq!(graph.edge_count(), 6);
/// assert_eq!(vertices.iter().map(|v| graph.degree(v)).sum::<usize>(), 12);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[instrument(
    name = "sampling.build_balanced_pairing",
    err,
    skip(source, vertices),
    fields(vertices = vertices.len()),
)]
pub fn build_balanced_pairing<T: Clone + Eq + Hash>(
    source: &mut UniformSource,
    vertices: &[T],
    target_edges: usize,
) -> Result<PairGraph<T>> {
    let mut pairer = BalancedPairer::new(vertices)?;
    let maximum = max_pairs(vertices.len());
    if target_edges > maximum {
        return Err(SamplingError::TargetUnreachable {
            requested: target_edges,
            maximum,
        });
    }

    while pairer.graph().edge_count() < target_edges {
        pairer.step(source)?;
    }
    debug!(edges = target_edges, "balanced pairing complete");
    Ok(pairer.into_graph())
}

#[cfg(test)]
mod tests;
