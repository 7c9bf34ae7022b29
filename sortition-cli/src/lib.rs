//! Support library for the `sortition` binary.
//!
//! Exposes the command pipeline and logging setup so integration tests and
//! doctests can drive the sampler without spawning a subprocess.

pub mod cli;
pub mod logging;
