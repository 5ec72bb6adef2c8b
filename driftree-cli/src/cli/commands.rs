//! Command implementations and argument parsing for the driftree CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use driftree_core::{
    ChangePolicy, EdgeId, ExecutionStrategy, Linear, ParameterRange, Sinusoidal, SweepBuilder,
    SweepConfig, SweepError, SweepReport,
};
use driftree_providers_csv::{CsvEdgeSource, CsvEdgeSourceError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "driftree",
    about = "Track how a parametric minimum spanning tree changes across a sweep."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sweep the parameter over a CSV edge list and report tree changes.
    Sweep(SweepCommand),
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Path to a CSV file with one `u,v,a,b` edge record per line.
    pub path: PathBuf,

    /// First parameter value.
    #[arg(
        long,
        default_value_t = ParameterRange::default().start(),
        allow_negative_numbers = true,
    )]
    pub start: f64,

    /// Last parameter value (inclusive).
    #[arg(
        long,
        default_value_t = ParameterRange::default().end(),
        allow_negative_numbers = true,
    )]
    pub end: f64,

    /// Spacing between parameter values.
    #[arg(long, default_value_t = ParameterRange::default().step())]
    pub step: f64,

    /// How consecutive trees are compared.
    #[arg(long, value_enum, default_value_t = PolicyArg::NodePair)]
    pub policy: PolicyArg,

    /// How per-sample trees are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Sequential)]
    pub strategy: StrategyArg,

    /// Weight family applied to each edge's `(a, b)` coefficients.
    #[arg(long, value_enum, default_value_t = WeightArg::Sine)]
    pub weight: WeightArg,

    /// Report layout written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Override name for the edge list (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Change-comparison policies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Compare unordered node pairs.
    NodePair,
    /// Compare edge identifiers.
    EdgeId,
}

impl From<PolicyArg> for ChangePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::NodePair => Self::NodePair,
            PolicyArg::EdgeId => Self::EdgeId,
        }
    }
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Build trees one at a time.
    Sequential,
    /// Build trees on the rayon pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Weight families selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeightArg {
    /// `a + b * sin(t)`.
    Sine,
    /// `a + b * t`.
    Linear,
}

/// Report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per sample with total weight and change count.
    Summary,
    /// One row per sample whose tree differs from its predecessor under the
    /// selected policy; with `node-pair`, swaps between parallel edges are
    /// not listed.
    Transitions,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the edge list.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list could not be parsed.
    #[error(transparent)]
    Csv(#[from] CsvEdgeSourceError),
    /// Sweep configuration or execution failed.
    #[error(transparent)]
    Core(#[from] SweepError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Csv(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
        }
    }

    /// Returns the MST build code when a sweep sample failed.
    #[must_use]
    pub fn mst_code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => err.mst_code().map(|code| code.as_str()),
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the edge list.
    pub data_source: String,
    /// Number of edges loaded.
    pub edges: usize,
    /// Number of nodes referenced by the edges.
    pub nodes: usize,
    /// Layout requested for rendering.
    pub format: OutputFormat,
    /// The completed sweep.
    pub report: SweepReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the edges or running the sweep fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use driftree_cli::cli::{Cli, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "1,2,1.0,0.0\n2,3,1.0,0.0\n1,3,5.0,-5.0\n")?;
/// let path = file.path().to_str().ok_or("path is not UTF-8")?;
/// let cli = Cli::try_parse_from(["driftree", "sweep", path, "--end", "10"])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.len(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Sweep(sweep) => {
            Span::current().record("command", field::display("sweep"));
            run_sweep(sweep)
        }
    }
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(
        path = %command.path.display(),
        policy = ?command.policy,
        strategy = ?command.strategy,
        weight = ?command.weight,
        data_source = field::Empty,
    ),
)]
pub(super) fn run_sweep(command: SweepCommand) -> Result<ExecutionSummary, CliError> {
    let config = build_config(&command)?;
    let name = derive_data_source_name(&command.path, command.name.as_deref());
    Span::current().record("data_source", field::display(&name));

    let reader = open_edges(&command.path)?;
    let source = CsvEdgeSource::try_from_reader(name, reader)?;
    let graph = source.graph();
    let report = match command.weight {
        WeightArg::Sine => config.run(graph, &Sinusoidal)?,
        WeightArg::Linear => config.run(graph, &Linear)?,
    };

    info!(
        data_source = source.name(),
        samples = report.len(),
        transitions = report.transitions().count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: source.name().to_owned(),
        edges: graph.len(),
        nodes: graph.node_count(),
        format: command.format,
        report,
    })
}

fn build_config(command: &SweepCommand) -> Result<SweepConfig, SweepError> {
    SweepBuilder::new()
        .with_range(command.start, command.end, command.step)
        .with_change_policy(command.policy.into())
        .with_execution_strategy(command.strategy.into())
        .build()
}

#[instrument(name = "cli.open_edges", err, fields(path = field::Empty))]
pub(super) fn open_edges(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "edges".to_owned())
}

/// Renders `summary` to `writer` in the layout it requests.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use driftree_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// # use driftree_core::{ParametricGraph, Sinusoidal, SweepBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let graph = ParametricGraph::from_records([(1, 2, 1.0, 0.0)])?;
/// let report = SweepBuilder::new()
///     .with_range(0.0, 5.0, 5.0)
///     .build()?
///     .run(&graph, &Sinusoidal)?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     edges: 1,
///     nodes: 2,
///     format: OutputFormat::Summary,
///     report,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo (edges=1, nodes=2)\n\
///      t=  0.00  total=1.00  changes=0\n\
///      t=  5.00  total=1.00  changes=0\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "data source: {} (edges={}, nodes={})",
        summary.data_source, summary.edges, summary.nodes
    )?;
    match summary.format {
        OutputFormat::Summary => {
            for sample in summary.report.samples() {
                writeln!(
                    writer,
                    "t={:>6.2}  total={:.2}  changes={}",
                    sample.parameter(),
                    sample.mst().total_weight(),
                    sample.instability()
                )?;
            }
        }
        OutputFormat::Transitions => {
            writeln!(writer, "transitions: {}", summary.report.transitions().count())?;
            for transition in summary.report.transitions() {
                writeln!(
                    writer,
                    "t={:>6.2}  removed={}  added={}  old={}  new={}",
                    transition.parameter(),
                    id_list(transition.change().removed()),
                    id_list(transition.change().added()),
                    id_list(&transition.old_edges()),
                    id_list(&transition.new_edges())
                )?;
            }
        }
    }
    Ok(())
}

fn id_list(ids: &[EdgeId]) -> String {
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
