//! Unit tests for the CLI commands and edge-list ingestion.

use super::commands::{derive_data_source_name, open_edges, run_sweep};
use super::test_helpers::{
    TRIANGLE, create_edge_file, run_cli_expecting_error, sweep_cli, sweep_command, temp_dir,
};
use super::{
    Cli, CliError, Command, OutputFormat, PolicyArg, StrategyArg, WeightArg, render_summary,
    run_cli,
};

use std::path::Path;

use clap::Parser;
use driftree_core::{SweepError, SweepErrorCode};
use driftree_providers_csv::CsvEdgeSourceError;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use driftree_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::override_name("/tmp/edges.csv", Some("override"), "override")]
#[case::stem_with_extension("/tmp/network.csv", None, "network")]
#[case::stem_without_extension("/tmp/network", None, "network")]
#[case::missing_stem("", None, "edges")]
fn derive_data_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    let path = Path::new(raw_path);
    let name = derive_data_source_name(path, override_name);
    assert_eq!(name, expected);
}

#[rstest]
fn sweep_uses_default_range() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let summary = run_cli(sweep_cli(sweep_command(&path)))?;

    assert_eq!(summary.data_source, "triangle");
    assert_eq!(summary.edges, 3);
    assert_eq!(summary.nodes, 3);
    assert_eq!(summary.report.len(), 21);
    assert!(
        summary
            .report
            .samples()
            .iter()
            .all(|sample| sample.mst().is_spanning_tree())
    );
    assert_eq!(summary.report.samples()[0].instability(), 0);
    Ok(())
}

#[rstest]
#[case::node_pair(PolicyArg::NodePair)]
#[case::edge_id(PolicyArg::EdgeId)]
fn sweep_reports_single_transition(#[case] policy: PolicyArg) -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let mut command = sweep_command(&path);
    command.end = 2.0;
    command.step = 1.0;
    command.policy = policy;

    let summary = run_cli(sweep_cli(command))?;
    let instabilities: Vec<usize> = summary
        .report
        .samples()
        .iter()
        .map(|sample| sample.instability())
        .collect();
    assert_eq!(instabilities, vec![0, 2, 0]);
    assert_eq!(summary.report.transitions().count(), 1);
    Ok(())
}

#[cfg(feature = "parallel")]
#[rstest]
fn parallel_strategy_matches_sequential() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let sequential = run_cli(sweep_cli(sweep_command(&path)))?;

    let mut command = sweep_command(&path);
    command.strategy = StrategyArg::Parallel;
    let parallel = run_cli(sweep_cli(command))?;

    assert_eq!(parallel.report, sequential.report);
    Ok(())
}

#[rstest]
fn linear_weight_changes_tree_once_slopes_cross() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "slopes.csv", "1,2,0.0,1.0\n2,3,0.0,1.0\n1,3,3.0,0.0\n")?;
    let mut command = sweep_command(&path);
    command.end = 4.0;
    command.step = 1.0;
    command.weight = WeightArg::Linear;

    let summary = run_cli(sweep_cli(command))?;
    let changes: Vec<f64> = summary
        .report
        .transitions()
        .map(|transition| transition.parameter())
        .collect();
    assert_eq!(changes, vec![4.0]);
    Ok(())
}

#[rstest]
fn parses_sweep_flags() -> TestResult {
    let cli = Cli::try_parse_from([
        "driftree",
        "sweep",
        "edges.csv",
        "--start",
        "-3.5",
        "--end",
        "7",
        "--step",
        "0.5",
        "--policy",
        "edge-id",
        "--strategy",
        "parallel",
        "--weight",
        "linear",
        "--format",
        "transitions",
        "--name",
        "demo",
    ])?;
    let Command::Sweep(command) = cli.command;
    assert_eq!(command.path, Path::new("edges.csv"));
    assert_eq!(command.start, -3.5);
    assert_eq!(command.end, 7.0);
    assert_eq!(command.step, 0.5);
    assert_eq!(command.policy, PolicyArg::EdgeId);
    assert_eq!(command.strategy, StrategyArg::Parallel);
    assert_eq!(command.weight, WeightArg::Linear);
    assert_eq!(command.format, OutputFormat::Transitions);
    assert_eq!(command.name.as_deref(), Some("demo"));
    Ok(())
}

#[rstest]
fn parses_sweep_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["driftree", "sweep", "edges.csv"])?;
    let Command::Sweep(command) = cli.command;
    assert_eq!(command.start, 0.0);
    assert_eq!(command.end, 100.0);
    assert_eq!(command.step, 5.0);
    assert_eq!(command.policy, PolicyArg::NodePair);
    assert_eq!(command.strategy, StrategyArg::Sequential);
    assert_eq!(command.weight, WeightArg::Sine);
    assert_eq!(command.format, OutputFormat::Summary);
    assert!(command.name.is_none());
    Ok(())
}

#[rstest]
#[case::unknown_policy(&["driftree", "sweep", "edges.csv", "--policy", "weights"])]
#[case::unknown_weight(&["driftree", "sweep", "edges.csv", "--weight", "cosine"])]
#[case::missing_path(&["driftree", "sweep"])]
fn rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
#[case::summary(
    OutputFormat::Summary,
    "data source: tri (edges=3, nodes=3)\n\
     t=  0.00  total=2.00  changes=0\n\
     t=  1.00  total=1.79  changes=2\n\
     t=  2.00  total=1.45  changes=0\n"
)]
#[case::transitions(
    OutputFormat::Transitions,
    "data source: tri (edges=3, nodes=3)\n\
     transitions: 1\n\
     t=  1.00  removed=[1]  added=[2]  old=[0, 1]  new=[2, 0]\n"
)]
fn render_summary_writes_requested_layout(
    #[case] format: OutputFormat,
    #[case] expected: &str,
) -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let mut command = sweep_command(&path);
    command.end = 2.0;
    command.step = 1.0;
    command.format = format;
    command.name = Some("tri".to_owned());

    let summary = run_cli(sweep_cli(command))?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, expected);
    Ok(())
}

#[rstest]
fn sweep_rejects_missing_files() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.csv");
    let err = run_cli_expecting_error(sweep_cli(sweep_command(&missing)), "missing file must fail");
    match &err {
        CliError::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), None);
}

#[rstest]
fn sweep_rejects_malformed_edges() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "broken.csv", "1,2,1.0,0.0\n2,3,1.0\n")?;
    let err = run_cli_expecting_error(sweep_cli(sweep_command(&path)), "malformed CSV must fail");
    assert!(matches!(
        err,
        CliError::Csv(CsvEdgeSourceError::FieldCount { line: 2, found: 3 })
    ));
    assert_eq!(err.code(), Some("CSV_FIELD_COUNT"));
    assert_eq!(err.mst_code(), None);
    Ok(())
}

#[rstest]
#[case::zero_step(0.0, 10.0, 0.0, SweepErrorCode::InvalidStep)]
#[case::negative_step(0.0, 10.0, -1.0, SweepErrorCode::InvalidStep)]
#[case::reversed(10.0, 0.0, 1.0, SweepErrorCode::InvalidRange)]
#[case::overflowing_span(0.0, 1e300, 1e-300, SweepErrorCode::TooManySamples)]
#[case::huge_span(0.0, 1e20, 1.0, SweepErrorCode::TooManySamples)]
fn sweep_rejects_invalid_ranges(
    #[case] start: f64,
    #[case] end: f64,
    #[case] step: f64,
    #[case] expected: SweepErrorCode,
) -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let mut command = sweep_command(&path);
    command.start = start;
    command.end = end;
    command.step = step;

    let err = run_cli_expecting_error(sweep_cli(command), "invalid range must fail");
    match &err {
        CliError::Core(core) => assert_eq!(core.code(), expected),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), Some(expected.as_str()));
    Ok(())
}

#[rstest]
fn sweep_rejects_oversized_node_ids_at_load() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "huge.csv", "1,2,1,0\n1,18446744073709551615,1,0\n")?;
    let err = run_cli_expecting_error(sweep_cli(sweep_command(&path)), "huge node id must fail");
    assert!(matches!(
        err,
        CliError::Csv(CsvEdgeSourceError::Graph { line: 2, .. })
    ));
    assert_eq!(err.code(), Some("CSV_INVALID_GRAPH"));
    Ok(())
}

#[rstest]
fn sweep_surfaces_sample_failures() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "huge.csv", "1,2,1e308,1e308\n")?;
    let mut command = sweep_command(&path);
    command.end = 5.0;
    command.weight = WeightArg::Linear;

    let err = run_cli_expecting_error(sweep_cli(command), "overflowing weight must fail");
    assert!(matches!(
        err,
        CliError::Core(SweepError::Sample { parameter, .. }) if parameter == 5.0
    ));
    assert_eq!(err.code(), Some("SWEEP_SAMPLE_FAILURE"));
    assert_eq!(err.mst_code(), Some("NON_FINITE_WEIGHT"));
    Ok(())
}

#[rstest]
fn run_sweep_records_spans_and_completion_event() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let mut command = sweep_command(&path);
    command.policy = PolicyArg::EdgeId;
    command.end = 10.0;
    tracing::subscriber::with_default(subscriber, || run_cli(sweep_cli(command)))?;

    let run_span = layer.span("cli.run").expect("cli.run span must exist");
    assert_eq!(run_span.field("command"), Some("sweep"));

    let sweep_span = layer.span("cli.sweep").expect("cli.sweep span must exist");
    assert!(
        sweep_span
            .field("path")
            .is_some_and(|value| value.ends_with("triangle.csv"))
    );
    assert_eq!(sweep_span.field("policy"), Some("EdgeId"));
    assert_eq!(sweep_span.field("strategy"), Some("Sequential"));
    assert_eq!(sweep_span.field("weight"), Some("Sine"));
    assert_eq!(sweep_span.field("data_source"), Some("triangle"));

    assert!(layer.span("core.run").is_some());
    assert!(layer.has_event(Level::INFO, "command completed"));
    let completed = layer
        .events()
        .into_iter()
        .find(|event| event.message() == Some("command completed"))
        .expect("completion event must exist");
    assert_eq!(completed.field("data_source"), Some("triangle"));
    assert_eq!(completed.field("samples"), Some("3"));
    Ok(())
}

#[rstest]
fn open_edges_records_path_on_error() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.csv");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || run_sweep(sweep_command(&missing)))
        .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));

    let reader_span = layer
        .span("cli.open_edges")
        .expect("cli.open_edges span must exist");
    assert!(
        reader_span
            .field("path")
            .is_some_and(|value| value.ends_with("missing.csv"))
    );
    assert!(layer.events().iter().any(|event| {
        event.level == Level::ERROR
            && event
                .field("error")
                .is_some_and(|value| value.starts_with("failed to open"))
    }));
}

#[rstest]
fn open_edges_reads_existing_files() -> TestResult {
    let dir = temp_dir();
    let path = create_edge_file(&dir, "triangle.csv", TRIANGLE)?;
    let reader = open_edges(&path)?;
    let source = driftree_providers_csv::CsvEdgeSource::try_from_reader("triangle", reader)?;
    assert_eq!(source.graph().len(), 3);
    Ok(())
}
