//! Configuration for the rejection-sampling pair drawer.

use std::num::NonZeroUsize;

use crate::error::{Result, SamplingError};

const DEFAULT_MAX_RETRIES: usize = 1_000;

/// Validated settings for [`crate::sample_distinct_pairs`].
///
/// # Examples
/// ```
/// use sortition_core::PairingConfig;
///
/// let config = PairingConfig::builder().with_max_retries(50).build()?;
/// assert_eq!(config.max_retries(), 50);
/// assert_eq!(PairingConfig::default().max_retries(), 1_000);
/// # Ok::<(), sortition_core::SamplingError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingConfig {
    max_retries: NonZeroUsize,
}

impl PairingConfig {
    /// Starts a builder populated with the defaults.
    #[must_use]
    pub fn builder() -> PairingConfigBuilder {
        PairingConfigBuilder::default()
    }

    /// Consecutive rejected draws tolerated before giving up.
    #[must_use]
    pub const fn max_retries(&self) -> usize {
        self.max_retries.get()
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            max_retries: NonZeroUsize::new(DEFAULT_MAX_RETRIES).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Builder for [`PairingConfig`].
#[derive(Clone, Debug)]
pub struct PairingConfigBuilder {
    max_retries: usize,
}

impl Default for PairingConfigBuilder {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl PairingConfigBuilder {
    /// Overrides the retry ceiling.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Returns the configured retry ceiling.
    #[must_use]
    pub const fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// Returns [`SamplingError::InvalidArgument`] when the retry ceiling is
    /// zero.
    pub fn build(self) -> Result<PairingConfig> {
        let max_retries =
            NonZeroUsize::new(self.max_retries).ok_or(SamplingError::InvalidArgument {
                name: "max_retries",
                reason: "must be at least 1",
            })?;
        Ok(PairingConfig { max_retries })
    }
}
