//! Unconstrained distinct-pair drawing by rejection.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use tracing::{debug, instrument};

use super::{PairingConfig, max_pairs};
use crate::{
    error::{Result, SamplingError},
    sequential::select_indices,
    uniform::UniformSource,
};

/// Draws `count` distinct unordered pairs of `vertices`, avoiding every pair
/// listed in `excluded` in either orientation.
///
/// Each candidate is a uniform two-element selection over the vertex
/// positions; candidates that are excluded or already accepted are redrawn.
/// Pairs are returned in acceptance order with their endpoints in vertex
/// order. Excluded pairs naming unknown vertices are ignored.
///
/// # Errors
/// - [`SamplingError::DuplicateVertex`] when a vertex repeats.
/// - [`SamplingError::TargetUnreachable`] when `count` exceeds the number of
///   pairs the vertex set allows.
/// - [`SamplingError::ExhaustedRetries`] when more than
///   [`PairingConfig::max_retries`] consecutive candidates are rejected.
///
/// # Examples
/// ```
/// use sortition_core::{PairingConfig, UniformSource, sample_distinct_pairs};
///
/// let mut source = UniformSource::from_seed(3);
/// let pairs = sample_distinct_pairs(
///     &mut source,
///     &["ann", "bob", "cy"],
///     2,
///     &[("bob", "ann")],
///     &PairingConfig::default(),
/// )?;
/// assert_eq!(pairs.len(), 2);
/// assert!(!pairs.contains(&("ann", "bob")));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[instrument(
    name = "sampling.sample_distinct_pairs",
    err,
    skip(source, vertices, excluded, config),
    fields(
        vertices = vertices.len(),
        excluded = excluded.len(),
        max_retries = config.max_retries()
    ),
)]
pub fn sample_distinct_pairs<T: Clone + Eq + Hash>(
    source: &mut UniformSource,
    vertices: &[T],
    count: usize,
    excluded: &[(T, T)],
    config: &PairingConfig,
) -> Result<Vec<(T, T)>> {
    let mut positions: HashMap<&T, usize> = HashMap::with_capacity(vertices.len());
    for (position, vertex) in vertices.iter().enumerate() {
        if positions.insert(vertex, position).is_some() {
            return Err(SamplingError::DuplicateVertex { position });
        }
    }

    let maximum = max_pairs(vertices.len());
    if count > maximum {
        return Err(SamplingError::TargetUnreachable {
            requested: count,
            maximum,
        });
    }

    let mut taken: HashSet<(usize, usize)> = excluded
        .iter()
        .filter_map(|(a, b)| Some(ordered(*positions.get(a)?, *positions.get(b)?)))
        .collect();

    let mut accepted = Vec::with_capacity(count);
    let mut rejections = 0_usize;
    while accepted.len() < count {
        let candidate = match select_indices(source, vertices.len(), 2)?.as_slice() {
            &[i, j] => (i, j),
            _ => {
                return Err(SamplingError::InsufficientPopulation {
                    requested: 2,
                    available: vertices.len(),
                });
            }
        };

        if taken.insert(candidate) {
            if let (Some(a), Some(b)) = (vertices.get(candidate.0), vertices.get(candidate.1)) {
                accepted.push((a.clone(), b.clone()));
            }
            rejections = 0;
            continue;
        }

        rejections += 1;
        if rejections > config.max_retries() {
            debug!(accepted = accepted.len(), rejections, "retry ceiling reached");
            return Err(SamplingError::ExhaustedRetries {
                accepted: accepted.len(),
                retries: rejections,
            });
        }
    }
    Ok(accepted)
}

const fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}
