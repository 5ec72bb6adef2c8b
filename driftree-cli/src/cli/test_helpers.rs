//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary edge lists and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use driftree_core::ParameterRange;
use tempfile::TempDir;

use super::{
    Cli, CliError, Command, OutputFormat, PolicyArg, StrategyArg, SweepCommand, WeightArg,
    run_cli,
};

/// Edge list whose tree changes once as the third edge dips below the others.
pub(super) const TRIANGLE: &str = "1,2,1.0,0.0\n2,3,1.0,0.0\n1,3,5.0,-5.0\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_edge_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// A `sweep` command over `path` with every option at its default.
pub(super) fn sweep_command(path: &Path) -> SweepCommand {
    let range = ParameterRange::default();
    SweepCommand {
        path: path.to_path_buf(),
        start: range.start(),
        end: range.end(),
        step: range.step(),
        policy: PolicyArg::NodePair,
        strategy: StrategyArg::Sequential,
        weight: WeightArg::Sine,
        format: OutputFormat::Summary,
        name: None,
    }
}

pub(super) fn sweep_cli(command: SweepCommand) -> Cli {
    Cli {
        command: Command::Sweep(command),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
