//! Process-wide uniform source.
//!
//! The source is seeded from entropy the first time it is touched and lives
//! for the rest of the process. A `Mutex` serializes every draw; a poisoned
//! lock surfaces as [`SamplingError::SourcePoisoned`] rather than a panic
//! until [`reseed`] or [`reseed_from_entropy`] replaces the state.
//!
//! Prefer passing an explicit [`UniformSource`] where tests need isolation:
//! every test in a process shares this one.

use std::{
    hash::Hash,
    sync::{Mutex, OnceLock, PoisonError},
};

use tracing::{instrument, warn};

use crate::{
    coin::{self, CoinFace},
    error::{Result, SamplingError},
    graph::PairGraph,
    pairing, replacement, reservoir, sequential,
    uniform::UniformSource,
};

static SHARED: OnceLock<Mutex<UniformSource>> = OnceLock::new();

fn shared() -> &'static Mutex<UniformSource> {
    SHARED.get_or_init(|| Mutex::new(UniformSource::from_entropy()))
}

/// Runs `f` with exclusive access to the shared source.
///
/// # Errors
/// Returns [`SamplingError::SourcePoisoned`] when a previous holder
/// panicked, otherwise whatever `f` returns.
///
/// # Examples
/// ```
/// use sortition_core::shared;
///
/// let draw = shared::with_shared_source(|source| Ok(source.next_uniform()))?;
/// assert!((0.0..1.0).contains(&draw));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn with_shared_source<R>(f: impl FnOnce(&mut UniformSource) -> Result<R>) -> Result<R> {
    let mut guard = shared().lock().map_err(|_| SamplingError::SourcePoisoned)?;
    f(&mut guard)
}

/// Reseeds the shared source so later draws depend only on `seed`.
///
/// The previous state is discarded, so a lock poisoned by a panicking
/// holder is recovered and cleared.
#[instrument(name = "sampling.shared.reseed")]
pub fn reseed(seed: u64) {
    replace_state(|source| source.reseed(seed));
}

/// Re-randomizes the shared source from entropy, recovering a poisoned lock
/// as [`reseed`] does.
#[instrument(name = "sampling.shared.reseed_from_entropy")]
pub fn reseed_from_entropy() {
    replace_state(UniformSource::reseed_from_entropy);
}

fn replace_state(reset: impl FnOnce(&mut UniformSource)) {
    let lock = shared();
    let mut guard = lock.lock().unwrap_or_else(|poisoned| {
        warn!("recovering shared uniform source from a poisoned lock");
        PoisonError::into_inner(poisoned)
    });
    reset(&mut guard);
    lock.clear_poison();
}

/// [`UniformSource::next_uniform`] on the shared source.
///
/// # Errors
/// Returns [`SamplingError::SourcePoisoned`] when the lock is poisoned.
pub fn next_uniform() -> Result<f64> {
    with_shared_source(|source| Ok(source.next_uniform()))
}

/// [`UniformSource::uniform_int`] on the shared source.
///
/// # Errors
/// See [`UniformSource::uniform_int`].
pub fn uniform_int(min: i64, max: i64) -> Result<i64> {
    with_shared_source(|source| source.uniform_int(min, max))
}

/// [`crate::bernoulli`] on the shared source.
///
/// # Errors
/// See [`crate::bernoulli`].
pub fn bernoulli(p: f64) -> Result<bool> {
    with_shared_source(|source| coin::bernoulli(source, p))
}

/// [`crate::weighted_coin`] on the shared source.
///
/// # Errors
/// See [`crate::weighted_coin`].
pub fn weighted_coin(w0: f64, w1: f64) -> Result<CoinFace> {
    with_shared_source(|source| coin::weighted_coin(source, w0, w1))
}

/// [`crate::select_without_replacement`] on the shared source.
///
/// # Errors
/// See [`crate::select_without_replacement`].
pub fn select_without_replacement<T: Clone>(population: &[T], k: usize) -> Result<Vec<T>> {
    with_shared_source(|source| sequential::select_without_replacement(source, population, k))
}

/// [`crate::select_from_stream`] on the shared source.
///
/// The lock is held while the stream is consumed.
///
/// # Errors
/// See [`crate::select_from_stream`].
pub fn select_from_stream<T, I>(items: I, k: usize) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    with_shared_source(|source| reservoir::select_from_stream(source, items, k))
}

/// [`crate::sample_with_replacement`] on the shared source.
///
/// # Errors
/// See [`crate::sample_with_replacement`].
pub fn sample_with_replacement<T: Clone>(population: &[T], k: usize) -> Result<Vec<T>> {
    with_shared_source(|source| replacement::sample_with_replacement(source, population, k))
}

/// [`crate::build_balanced_pairing`] on the shared source.
///
/// # Errors
/// See [`crate::build_balanced_pairing`].
pub fn build_balanced_pairing<T: Clone + Eq + Hash>(
    vertices: &[T],
    target_edges: usize,
) -> Result<PairGraph<T>> {
    with_shared_source(|source| pairing::build_balanced_pairing(source, vertices, target_edges))
}

#[cfg(test)]
mod tests {
    use std::{panic, sync::MutexGuard};

    use super::*;

    // Tests in this module share one source and must not interleave.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn reseed_makes_shared_runs_repeat() {
        let _serial = serial();
        let run = || -> Result<(Vec<u32>, bool, i64, Vec<(u32, u32)>)> {
            reseed(42);
            let population: Vec<u32> = (0..50).collect();
            let sample = select_without_replacement(&population, 7)?;
            let heads = bernoulli(0.5)?;
            let roll = uniform_int(1, 6)?;
            let graph = build_balanced_pairing(&population[..8], 8)?;
            Ok((sample, heads, roll, graph.edges().to_vec()))
        };
        let first = run().expect("shared source is healthy");
        let second = run().expect("shared source is healthy");
        assert_eq!(first, second);
    }

    #[test]
    fn reseed_recovers_from_a_panicking_stream() {
        let _serial = serial();
        let outcome = panic::catch_unwind(|| {
            let items = (0..10_u32).map(|item| {
                assert_ne!(item, 5, "stream failed part way through");
                item
            });
            select_from_stream(items, 2)
        });
        assert!(outcome.is_err(), "the stream must panic while the lock is held");
        assert_eq!(next_uniform(), Err(SamplingError::SourcePoisoned));

        reseed(7);
        let after_reseed = next_uniform().expect("reseed clears the poison");
        reseed(7);
        assert_eq!(next_uniform(), Ok(after_reseed));

        reseed_from_entropy();
        assert!(next_uniform().is_ok());
    }
}
