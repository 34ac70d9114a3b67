// tests/cli_run.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::{filter_directive, ids, sorted_nodes};

use std::error::Error;

use tempfile::tempdir;

use calgraph::cli::{CliArgs, PolicyArg};
use calgraph::dag::generate::generate_from_config;
use calgraph::dag::snapshot::load_graph;
use calgraph::types::SchedulingPolicy;
use calgraph::{build_graph, process_sequential, resolve_config, run};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn sequential_processing_reports_every_node() -> TestResult {
    let cfg = ConfigFileBuilder::new().qubits(3).cals_per_qubit(2).seed(4).build();
    let graph = generate_from_config(&cfg)?;
    let expected = sorted_nodes(&graph);

    let mut printed = Vec::new();
    let order = process_sequential(graph, &cfg, |node| printed.push(node.to_string()))?;

    assert_eq!(printed.len(), expected.len());
    let mut seen = ids(&order);
    seen.sort();
    assert_eq!(seen, expected);
    Ok(())
}

#[test]
fn sequential_resolution_uses_live_keys() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .qubits(3)
        .cals_per_qubit(2)
        .seed(4)
        .policy(SchedulingPolicy::Live)
        .resolve_processed(true)
        .build();
    let graph = generate_from_config(&cfg)?;

    let order = process_sequential(graph, &cfg, |_| {})?;
    assert_eq!(order.len(), 9);
    Ok(())
}

#[test]
fn loaded_snapshot_replaces_generation() -> TestResult {
    let dir = tempdir()?;
    let snapshot = dir.path().join("graph.toml");

    let cfg = ConfigFileBuilder::new().qubits(2).cals_per_qubit(1).seed(3).build();
    let generated = generate_from_config(&cfg)?;
    calgraph::dag::snapshot::save_graph(&generated, &snapshot)?;

    // The qubit count here would produce a different graph; --load wins.
    let args = CliArgs {
        qubits: Some(7),
        load: Some(snapshot.display().to_string()),
        ..Default::default()
    };
    let resolved = resolve_config(&args)?;
    let graph = build_graph(&args, &resolved)?;
    assert_eq!(graph.edges(), generated.edges());
    assert_eq!(graph.node_count(), 4);
    Ok(())
}

#[tokio::test]
async fn dry_run_writes_requested_outputs() -> TestResult {
    let dir = tempdir()?;
    let snapshot = dir.path().join("out.toml");
    let dot = dir.path().join("out.dot");

    let args = CliArgs {
        qubits: Some(2),
        cals_per_qubit: Some(2),
        seed: Some(6),
        policy: Some(PolicyArg::Live),
        save: Some(snapshot.display().to_string()),
        dot: Some(dot.display().to_string()),
        dry_run: true,
        ..Default::default()
    };
    run(args).await?;

    let graph = load_graph(&snapshot)?;
    assert_eq!(graph.node_count(), 6);
    let text = std::fs::read_to_string(&dot)?;
    assert!(text.contains("fillcolor=lightblue"));
    Ok(())
}

#[tokio::test]
async fn full_run_with_workers_completes() -> TestResult {
    let args = CliArgs {
        qubits: Some(3),
        cals_per_qubit: Some(2),
        workers: Some(3),
        resolve: true,
        ..Default::default()
    };
    run(args).await?;
    Ok(())
}

#[test]
fn log_level_env_drives_test_filter() {
    assert_eq!(filter_directive(Some("debug")), "calgraph=debug");
    assert_eq!(filter_directive(Some(" Warning ")), "calgraph=warn");
    assert_eq!(filter_directive(Some("loud")), "warn");
    assert_eq!(filter_directive(None), "warn");
}
