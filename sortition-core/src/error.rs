//! Error types for the sampling engine.
//!
//! Every failure is a caller-input or structurally unsatisfiable request;
//! none are transient, so nothing here is retried by the library.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by every sampler in this crate.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplingError {
    /// A configuration or call argument was malformed.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// More distinct items were requested than the population holds.
    #[error("requested {requested} distinct items but the population holds {available}")]
    InsufficientPopulation {
        /// Sample size requested by the caller.
        requested: usize,
        /// Number of items actually available.
        available: usize,
    },
    /// A draw was requested from an empty population.
    #[error("cannot draw {requested} items from an empty population")]
    EmptyPopulation {
        /// Number of draws requested.
        requested: usize,
    },
    /// A probability fell outside `[0, 1]` or was NaN.
    #[error("probability must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// The rejected probability.
        got: f64,
    },
    /// Coin weights were negative, non-finite, or summed to zero.
    #[error("coin weights must be finite, non-negative and sum above zero (got {first}, {second})")]
    InvalidWeight {
        /// Weight of the first face.
        first: f64,
        /// Weight of the second face.
        second: f64,
    },
    /// An inclusive integer range had `min > max`.
    #[error("range minimum {min} exceeds maximum {max}")]
    InvalidRange {
        /// Lower bound supplied.
        min: i64,
        /// Upper bound supplied.
        max: i64,
    },
    /// The same vertex was supplied twice to a pairing run.
    #[error("vertex at position {position} duplicates an earlier vertex")]
    DuplicateVertex {
        /// Zero-based position of the repeated vertex.
        position: usize,
    },
    /// An item was pushed onto a usage heap that already holds it.
    #[error("item is already held with key {key}")]
    DuplicateItem {
        /// Key of the entry already in the heap.
        key: usize,
    },
    /// The minimum-usage vertex is already adjacent to every other vertex.
    #[error("no valid partner for a vertex with usage {usage} after {edges_built} edges")]
    NoValidPartner {
        /// Edges successfully added before the failure.
        edges_built: usize,
        /// Usage count of the stranded vertex.
        usage: usize,
    },
    /// The requested number of edges or pairs cannot exist on the vertex set.
    #[error("requested {requested} pairs but at most {maximum} exist")]
    TargetUnreachable {
        /// Pairs requested.
        requested: usize,
        /// Number of distinct pairs the vertex set allows.
        maximum: usize,
    },
    /// Rejection sampling hit its retry ceiling.
    #[error("gave up after {retries} consecutive rejected draws with {accepted} pairs accepted")]
    ExhaustedRetries {
        /// Pairs accepted before giving up.
        accepted: usize,
        /// Consecutive rejections that triggered the failure.
        retries: usize,
    },
    /// The shared uniform source mutex was poisoned by a panicking holder.
    #[error("shared uniform source is poisoned")]
    SourcePoisoned,
}

define_error_codes! {
    /// Stable codes describing [`SamplingError`] variants.
    enum SamplingErrorCode for SamplingError {
        /// A configuration or call argument was malformed.
        InvalidArgument => InvalidArgument { .. } => "SORTITION_INVALID_ARGUMENT",
        /// More distinct items were requested than the population holds.
        InsufficientPopulation => InsufficientPopulation { .. } => "SORTITION_INSUFFICIENT_POPULATION",
        /// A draw was requested from an empty population.
        EmptyPopulation => EmptyPopulation { .. } => "SORTITION_EMPTY_POPULATION",
        /// A probability fell outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "SORTITION_INVALID_PROBABILITY",
        /// Coin weights were unusable.
        InvalidWeight => InvalidWeight { .. } => "SORTITION_INVALID_WEIGHT",
        /// An inclusive range had `min > max`.
        InvalidRange => InvalidRange { .. } => "SORTITION_INVALID_RANGE",
        /// A vertex was supplied twice.
        DuplicateVertex => DuplicateVertex { .. } => "SORTITION_DUPLICATE_VERTEX",
        /// A heap item was pushed twice.
        DuplicateItem => DuplicateItem { .. } => "SORTITION_DUPLICATE_ITEM",
        /// Balanced pairing ran out of partners.
        NoValidPartner => NoValidPartner { .. } => "SORTITION_NO_VALID_PARTNER",
        /// The requested pair count cannot exist.
        TargetUnreachable => TargetUnreachable { .. } => "SORTITION_TARGET_UNREACHABLE",
        /// Rejection sampling hit its retry ceiling.
        ExhaustedRetries => ExhaustedRetries { .. } => "SORTITION_EXHAUSTED_RETRIES",
        /// The shared source mutex was poisoned.
        SourcePoisoned => SourcePoisoned => "SORTITION_SOURCE_POISONED",
    }
}

/// Convenient alias for results returned by the sampling API.
pub type Result<T> = core::result::Result<T, SamplingError>;
