//! Command-line interface orchestration for the sortition samplers.
//!
//! Each subcommand reads a line-based population from a file or stdin, runs
//! one sampler against a uniform source seeded from `--seed` (or entropy), and
//! returns the sampled values for rendering.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, PairArgs, PairsArgs, ReplaceArgs, SampleOutput,
    SelectArgs, render_summary, run_cli,
};
