//! Uniform source shared by every sampler.
//!
//! Wraps a `SmallRng` and derives all integer draws from a single uniform
//! `f64` so a seed fully determines every sampler's output.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};
use tracing::debug;

use crate::error::{Result, SamplingError};

/// Seedable generator of uniform doubles in `[0, 1)` and of uniform integers
/// derived from them.
///
/// # Examples
/// ```
/// use sortition_core::UniformSource;
///
/// let mut left = UniformSource::from_seed(42);
/// let mut right = UniformSource::from_seed(42);
/// assert_eq!(left.next_uniform(), right.next_uniform());
/// ```
#[derive(Clone, Debug)]
pub struct UniformSource {
    rng: SmallRng,
}

impl UniformSource {
    /// Creates a source whose draws are a deterministic function of `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Replaces the generator state; later draws depend only on `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "reseeding uniform source");
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Replaces the generator state with fresh entropy.
    pub fn reseed_from_entropy(&mut self) {
        debug!("reseeding uniform source from entropy");
        self.rng = SmallRng::from_entropy();
    }

    /// Draws a value uniformly distributed in `[0, 1)`.
    ///
    /// Never returns `1.0`, which is what makes `bernoulli(1.0)` certain.
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.sample(Standard)
    }

    /// Draws an integer uniformly from the inclusive range `[min, max]` as
    /// `min + floor(next_uniform() * (max - min + 1))`.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidRange`] when `min > max`.
    ///
    /// # Examples
    /// ```
    /// use sortition_core::UniformSource;
    ///
    /// let mut source = UniformSource::from_seed(7);
    /// let die = source.uniform_int(1, 6)?;
    /// assert!((1..=6).contains(&die));
    /// assert_eq!(source.uniform_int(3, 3)?, 3);
    /// # Ok::<(), sortition_core::SamplingError>(())
    /// ```
    pub fn uniform_int(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(SamplingError::InvalidRange { min, max });
        }
        let span = i128::from(max) - i128::from(min) + 1;
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            reason = "the product lies in [0, span) and is floored before narrowing"
        )]
        let offset = ((self.next_uniform() * span as f64).floor() as i128).min(span - 1);
        Ok(i64::try_from(i128::from(min) + offset).unwrap_or(max))
    }

    /// Draws an index uniformly from `0..len` using the same floor rule as
    /// [`Self::uniform_int`]. `len` must be positive.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        reason = "the product lies in [0, len) and is clamped before use"
    )]
    pub(crate) fn uniform_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "uniform_index requires a non-empty range");
        let scaled = (self.next_uniform() * len as f64).floor() as usize;
        scaled.min(len.saturating_sub(1))
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
