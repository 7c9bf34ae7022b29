//! Reservoir sampling over a stream of unknown length.
//!
//! Uses Algorithm R (Vitter, 1985): the first `k` items fill the reservoir,
//! and the item at 1-based position `i > k` replaces slot `j - 1` when
//! `j = uniform_int(1, i)` lands in `1..=k`. Every item therefore survives
//! with probability `k / n` once the stream ends at length `n`.
//!
//! Slots remember the stream position of their item and [`ReservoirSampler::finish`]
//! sorts by it, so the sample comes back in stream order just like
//! [`crate::select_without_replacement`]. Memory stays `O(k)`.

use tracing::{Span, debug, field, instrument};

use crate::{
    error::{Result, SamplingError},
    uniform::UniformSource,
};

#[derive(Clone, Debug)]
struct Slot<T> {
    position: usize,
    item: T,
}

/// Incremental reservoir holding at most `k` items of a stream.
///
/// # Examples
/// ```
/// use sortition_core::{ReservoirSampler, UniformSource};
///
/// let mut source = UniformSource::from_seed(5);
/// let mut reservoir = ReservoirSampler::new(3);
/// for word in ["ant", "bee", "cat", "dog", "eel"] {
///     reservoir.offer(&mut source, word);
/// }
/// assert_eq!(reservoir.seen(), 5);
/// let sample = reservoir.finish()?;
/// assert_eq!(sample.len(), 3);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ReservoirSampler<T> {
    k: usize,
    seen: usize,
    slots: Vec<Slot<T>>,
}

impl<T> ReservoirSampler<T> {
    /// Creates an empty reservoir that keeps `k` items.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seen: 0,
            slots: Vec::with_capacity(k),
        }
    }

    /// Feeds the next stream item to the reservoir.
    pub fn offer(&mut self, source: &mut UniformSource, item: T) {
        let position = self.seen;
        self.seen += 1;

        if self.slots.len() < self.k {
            self.slots.push(Slot { position, item });
            return;
        }
        if self.k == 0 {
            return;
        }

        // 1-based draw in 1..=seen; slot j-1 is replaced when j <= k.
        let j = source.uniform_index(self.seen) + 1;
        if j <= self.k {
            if let Some(slot) = self.slots.get_mut(j - 1) {
                *slot = Slot { position, item };
            }
        }
    }

    /// Number of stream items offered so far.
    #[must_use]
    pub const fn seen(&self) -> usize {
        self.seen
    }

    /// Number of items currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the reservoir holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Requested sample size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.k
    }

    /// Ends the stream and returns the sample in stream order.
    ///
    /// # Errors
    /// Returns [`SamplingError::InsufficientPopulation`] when fewer than `k`
    /// items were offered.
    pub fn finish(self) -> Result<Vec<T>> {
        if self.seen < self.k {
            return Err(SamplingError::InsufficientPopulation {
                requested: self.k,
                available: self.seen,
            });
        }
        let mut slots = self.slots;
        slots.sort_unstable_by_key(|slot| slot.position);
        Ok(slots.into_iter().map(|slot| slot.item).collect())
    }
}

/// Draws `k` items without replacement from `items`, consuming it to
/// exhaustion, and returns them in stream order.
///
/// # Errors
/// Returns [`SamplingError::InsufficientPopulation`] when the stream ends
/// before yielding `k` items.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, select_from_stream};
///
/// let mut source = UniformSource::from_seed(12);
/// let sample = select_from_stream(&mut source, (0..1_000).filter(|n| n % 7 == 0), 5)?;
/// assert_eq!(sample.len(), 5);
/// assert!(sample.windows(2).all(|pair| pair[0] < pair[1]));
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[instrument(
    name = "sampling.select_from_stream",
    err,
    skip(source, items),
    fields(seen = field::Empty),
)]
pub fn select_from_stream<T, I>(source: &mut UniformSource, items: I, k: usize) -> Result<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    let mut reservoir = ReservoirSampler::new(k);
    for item in items {
        reservoir.offer(source, item);
    }
    Span::current().record("seen", reservoir.seen());
    debug!(seen = reservoir.seen(), kept = reservoir.len(), "stream exhausted");
    reservoir.finish()
}
