//! Command implementations and argument parsing for the sortition CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sortition_core::{
    PairingConfig, SamplingError, UniformSource, build_balanced_pairing, sample_distinct_pairs,
    sample_with_replacement, select_from_stream, select_without_replacement,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const STDIN_LABEL: &str = "-";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sortition",
    about = "Draw unbiased random samples and balanced pairings from line-based populations."
)]
pub struct Cli {
    /// Seed for the uniform source; omit to seed from system entropy.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Select distinct items, preserving input order.
    Select(SelectArgs),
    /// Draw items with replacement.
    Replace(ReplaceArgs),
    /// Build a usage-balanced set of distinct pairs.
    Pair(PairArgs),
    /// Draw distinct pairs by rejection, skipping any excluded pairs.
    Pairs(PairsArgs),
}

/// Options accepted by the `select` command.
#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    /// Number of distinct items to select.
    #[arg(long, short = 'k')]
    pub count: usize,

    /// Read the population once without buffering it in memory.
    #[arg(long)]
    pub stream: bool,

    /// Population file with one item per line; reads stdin when omitted.
    pub path: Option<PathBuf>,
}

/// Options accepted by the `replace` command.
#[derive(Debug, Args, Clone)]
pub struct ReplaceArgs {
    /// Number of draws.
    #[arg(long, short = 'k')]
    pub count: usize,

    /// Population file with one item per line; reads stdin when omitted.
    pub path: Option<PathBuf>,
}

/// Options accepted by the `pair` command.
#[derive(Debug, Args, Clone)]
pub struct PairArgs {
    /// Number of edges to build.
    #[arg(long, short = 'm')]
    pub edges: usize,

    /// Vertex file with one vertex per line; reads stdin when omitted.
    pub path: Option<PathBuf>,
}

/// Options accepted by the `pairs` command.
#[derive(Debug, Args, Clone)]
pub struct PairsArgs {
    /// Number of distinct pairs to draw.
    #[arg(long, short = 'c')]
    pub count: usize,

    /// Consecutive rejected candidates tolerated before giving up.
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// File of tab-separated pairs that must not be drawn.
    #[arg(long)]
    pub exclude: Option<PathBuf>,

    /// Vertex file with one vertex per line; reads stdin when omitted.
    pub path: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading an input.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure, or `-` for stdin.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An exclusion line did not hold exactly two tab-separated vertices.
    #[error("line {line} of `{path}` must hold two tab-separated vertices")]
    MalformedPair {
        /// Exclusion file being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },
    /// The sampler rejected the request.
    #[error(transparent)]
    Core(#[from] SamplingError),
}

/// Values produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutput {
    /// Individual population items.
    Items(Vec<String>),
    /// Unordered vertex pairs.
    Pairs(Vec<(String, String)>),
}

impl SampleOutput {
    /// Number of items or pairs produced.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Pairs(pairs) => pairs.len(),
        }
    }

    /// Returns `true` when nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the command that ran.
    pub command: &'static str,
    /// Seed used for the run, if one was supplied.
    pub seed: Option<u64>,
    /// Sampled values.
    pub output: SampleOutput,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or the sampler rejects
/// the request.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sortition_cli::cli::{Cli, Command, SampleOutput, SelectArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "alpha\nbeta\ngamma\n")?;
/// let cli = Cli {
///     seed: Some(7),
///     command: Command::Select(SelectArgs {
///         count: 2,
///         stream: false,
///         path: Some(file.path().to_path_buf()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.output.len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, seed = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    if let Some(seed) = cli.seed {
        span.record("seed", seed);
    }
    let mut source = cli
        .seed
        .map_or_else(UniformSource::from_entropy, UniformSource::from_seed);

    let (command, output) = match cli.command {
        Command::Select(args) => ("select", run_select(&mut source, args)?),
        Command::Replace(args) => ("replace", run_replace(&mut source, args)?),
        Command::Pair(args) => ("pair", run_pair(&mut source, args)?),
        Command::Pairs(args) => ("pairs", run_pairs(&mut source, args)?),
    };
    span.record("command", field::display(command));
    info!(command, produced = output.len(), "command completed");
    Ok(ExecutionSummary {
        command,
        seed: cli.seed,
        output,
    })
}

#[instrument(
    name = "cli.select",
    err,
    skip(source, args),
    fields(count = args.count, stream = args.stream),
)]
pub(super) fn run_select(
    source: &mut UniformSource,
    args: SelectArgs,
) -> Result<SampleOutput, CliError> {
    let SelectArgs {
        count,
        stream,
        path,
    } = args;
    let reader = open_input(path.as_deref())?;
    let items = if stream {
        let mut failure = None;
        let lines = reader
            .lines()
            .map_while(|line| match line {
                Ok(line) => Some(line),
                Err(err) => {
                    failure = Some(err);
                    None
                }
            })
            .filter_map(normalise_line);
        let sample = select_from_stream(source, lines, count);
        if let Some(err) = failure {
            return Err(io_error(path.as_deref(), err));
        }
        sample?
    } else {
        let population = read_lines(reader, path.as_deref())?;
        select_without_replacement(source, &population, count)?
    };
    Ok(SampleOutput::Items(items))
}

#[instrument(name = "cli.replace", err, skip(source, args), fields(count = args.count))]
pub(super) fn run_replace(
    source: &mut UniformSource,
    args: ReplaceArgs,
) -> Result<SampleOutput, CliError> {
    let ReplaceArgs { count, path } = args;
    let population = read_lines(open_input(path.as_deref())?, path.as_deref())?;
    let draws = sample_with_replacement(source, &population, count)?;
    Ok(SampleOutput::Items(draws))
}

#[instrument(name = "cli.pair", err, skip(source, args), fields(edges = args.edges))]
pub(super) fn run_pair(
    source: &mut UniformSource,
    args: PairArgs,
) -> Result<SampleOutput, CliError> {
    let PairArgs { edges, path } = args;
    let vertices = read_lines(open_input(path.as_deref())?, path.as_deref())?;
    let graph = build_balanced_pairing(source, &vertices, edges)?;
    Ok(SampleOutput::Pairs(graph.edges().to_vec()))
}

#[instrument(
    name = "cli.pairs",
    err,
    skip(source, args),
    fields(count = args.count, excluded = field::Empty),
)]
pub(super) fn run_pairs(
    source: &mut UniformSource,
    args: PairsArgs,
) -> Result<SampleOutput, CliError> {
    let PairsArgs {
        count,
        max_retries,
        exclude,
        path,
    } = args;
    let config = match max_retries {
        Some(retries) => PairingConfig::builder().with_max_retries(retries).build()?,
        None => PairingConfig::default(),
    };
    let excluded = match exclude.as_deref() {
        Some(exclude) => read_pairs(open_input(Some(exclude))?, exclude)?,
        None => Vec::new(),
    };
    Span::current().record("excluded", excluded.len());
    let vertices = read_lines(open_input(path.as_deref())?, path.as_deref())?;
    let pairs = sample_distinct_pairs(source, &vertices, count, &excluded, &config)?;
    Ok(SampleOutput::Pairs(pairs))
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    let Some(path) = path else {
        Span::current().record("path", STDIN_LABEL);
        return Ok(Box::new(io::stdin().lock()));
    };
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| io_error(Some(path), source))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads non-blank lines, trimming trailing whitespace.
pub(super) fn read_lines(
    reader: impl BufRead,
    path: Option<&Path>,
) -> Result<Vec<String>, CliError> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|err| io_error(path, err))?;
        items.extend(normalise_line(line));
    }
    Ok(items)
}

pub(super) fn read_pairs(
    reader: impl BufRead,
    path: &Path,
) -> Result<Vec<(String, String)>, CliError> {
    let mut pairs = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| io_error(Some(path), err))?;
        let Some(line) = normalise_line(line) else {
            continue;
        };
        let mut fields = line.split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => {
                pairs.push((a.to_owned(), b.to_owned()));
            }
            _ => {
                return Err(CliError::MalformedPair {
                    path: path.to_path_buf(),
                    line: index + 1,
                });
            }
        }
    }
    Ok(pairs)
}

fn normalise_line(mut line: String) -> Option<String> {
    let kept = line.trim_end().len();
    line.truncate(kept);
    (!line.is_empty()).then_some(line)
}

fn io_error(path: Option<&Path>, source: io::Error) -> CliError {
    CliError::Io {
        path: path.map_or_else(|| PathBuf::from(STDIN_LABEL), Path::to_path_buf),
        source,
    }
}

/// Renders `summary` to `writer`: one item per line, or one tab-separated
/// pair per line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sortition_cli::cli::{ExecutionSummary, SampleOutput, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     command: "pair",
///     seed: None,
///     output: SampleOutput::Pairs(vec![("ana".into(), "bo".into())]),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "ana\tbo\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match &summary.output {
        SampleOutput::Items(items) => {
            for item in items {
                writeln!(writer, "{item}")?;
            }
        }
        SampleOutput::Pairs(pairs) => {
            for (a, b) in pairs {
                writeln!(writer, "{a}\t{b}")?;
            }
        }
    }
    Ok(())
}
