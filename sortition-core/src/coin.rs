//! Single-trial probability tests built on [`UniformSource`].

use crate::{
    error::{Result, SamplingError},
    uniform::UniformSource,
};

/// Outcome of [`weighted_coin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoinFace {
    /// The face weighted by the first argument.
    Zero,
    /// The face weighted by the second argument.
    One,
}

impl CoinFace {
    /// Returns `0` for [`CoinFace::Zero`] and `1` for [`CoinFace::One`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// Returns `true` with probability `p`.
///
/// # Errors
/// Returns [`SamplingError::InvalidProbability`] when `p` is NaN or outside
/// `[0, 1]`.
///
/// # Examples
/// ```
/// use sortition_core::{UniformSource, bernoulli};
///
/// let mut source = UniformSource::from_seed(3);
/// assert!(!bernoulli(&mut source, 0.0)?);
/// assert!(bernoulli(&mut source, 1.0)?);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn bernoulli(source: &mut UniformSource, p: f64) -> Result<bool> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SamplingError::InvalidProbability { got: p });
    }
    Ok(source.next_uniform() < p)
}

/// Picks [`CoinFace::Zero`] with probability `w0 / (w0 + w1)`, otherwise
/// [`CoinFace::One`].
///
/// # Errors
/// Returns [`SamplingError::InvalidWeight`] when either weight is negative
/// or non-finite, or when the weights sum to zero.
///
/// # Examples
/// ```
/// use sortition_core::{CoinFace, UniformSource, weighted_coin};
///
/// let mut source = UniformSource::from_seed(3);
/// assert_eq!(weighted_coin(&mut source, 0.0, 2.5)?, CoinFace::One);
/// assert_eq!(weighted_coin(&mut source, 4.0, 0.0)?, CoinFace::Zero);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
pub fn weighted_coin(source: &mut UniformSource, w0: f64, w1: f64) -> Result<CoinFace> {
    let usable = |w: f64| w.is_finite() && w >= 0.0;
    if !usable(w0) || !usable(w1) || w0 + w1 <= 0.0 {
        return Err(SamplingError::InvalidWeight {
            first: w0,
            second: w1,
        });
    }
    // Two finite weights can still overflow when summed.
    let total = w0 + w1;
    let threshold = if total.is_finite() {
        w0 / total
    } else {
        (w0 / 2.0) / (w0 / 2.0 + w1 / 2.0)
    };
    if source.next_uniform() < threshold {
        Ok(CoinFace::Zero)
    } else {
        Ok(CoinFace::One)
    }
}
