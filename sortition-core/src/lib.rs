//! Sortition core library.
//!
//! Randomized sampling with exact cardinality and inclusion guarantees:
//!
//! - [`select_without_replacement`]: `k` of `n` items from a slice in one
//!   order-preserving pass.
//! - [`select_from_stream`]: the same contract over an iterator of unknown
//!   length, in `O(k)` memory.
//! - [`build_balanced_pairing`]: a random simple graph whose vertex degrees
//!   stay as equal as possible; [`sample_distinct_pairs`] draws
//!   unconstrained distinct pairs by bounded rejection.
//! - [`sample_with_replacement`], [`bernoulli`] and [`weighted_coin`] as
//!   primitives.
//!
//! Every sampler takes an explicit [`UniformSource`]; the [`shared`] module
//! offers the same operations over one process-wide, reseedable source.
//!
//! # Examples
//! ```
//! use sortition_core::{UniformSource, select_without_replacement};
//!
//! let mut source = UniformSource::from_seed(42);
//! let sample = select_without_replacement(&mut source, &["a", "b", "c", "d"], 2)?;
//! assert_eq!(sample.len(), 2);
//! # Ok::<(), sortition_core::SamplingError>(())
//! ```
#![forbid(unsafe_code)]

mod coin;
mod error;
mod graph;
mod heap;
mod pairing;
mod replacement;
mod reservoir;
mod sequential;
pub mod shared;
mod uniform;

pub use crate::{
    coin::{CoinFace, bernoulli, weighted_coin},
    error::{Result, SamplingError, SamplingErrorCode},
    graph::PairGraph,
    heap::UsageHeap,
    pairing::{
        BalancedPairer, PairingConfig, PairingConfigBuilder, build_balanced_pairing, max_pairs,
        sample_distinct_pairs,
    },
    replacement::{pick_one, sample_with_replacement},
    reservoir::{ReservoirSampler, select_from_stream},
    sequential::{select_indices, select_without_replacement},
    uniform::UniformSource,
};
