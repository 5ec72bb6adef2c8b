//! Command-line interface orchestration for driftree.
//!
//! The `sweep` command loads a CSV edge list, sweeps the parameter across a
//! range and reports how the minimum spanning tree changes along the way.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, OutputFormat, PolicyArg, StrategyArg,
    SweepCommand, WeightArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
