// tests/snapshot_and_dot.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, GraphBuilder};
use crate::common::sorted_nodes;

use std::error::Error;

use tempfile::tempdir;

use calgraph::dag::dot::to_dot;
use calgraph::dag::generate::generate_from_config;
use calgraph::dag::snapshot::{GraphSnapshot, load_graph, save_graph};
use calgraph::errors::CalGraphError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn snapshot_file_round_trips_a_generated_graph() -> TestResult {
    let cfg = ConfigFileBuilder::new().qubits(3).cals_per_qubit(2).seed(9).build();
    let graph = generate_from_config(&cfg)?;

    let dir = tempdir()?;
    let path = dir.path().join("graph.toml");
    save_graph(&graph, &path)?;
    let loaded = load_graph(&path)?;

    assert_eq!(loaded.nodes().collect::<Vec<_>>(), graph.nodes().collect::<Vec<_>>());
    for id in graph.nodes() {
        assert_eq!(loaded.kind(id)?, graph.kind(id)?);
    }
    assert_eq!(loaded.edges(), graph.edges());
    Ok(())
}

#[test]
fn snapshot_text_lists_nodes_and_edges() -> TestResult {
    let graph = GraphBuilder::new()
        .qubit("q0")
        .calibration("cal_q0_0")
        .edge("q0", "cal_q0_0")
        .build();

    let text = GraphSnapshot::from_graph(&graph).to_toml()?;
    assert!(text.contains("[[node]]"));
    assert!(text.contains("kind = \"qubit\""));
    assert!(text.contains("kind = \"calibration\""));
    assert!(text.contains("[[edge]]"));
    assert!(text.contains("to = \"cal_q0_0\""));

    let back = GraphSnapshot::from_toml(&text)?.into_graph()?;
    assert_eq!(sorted_nodes(&back), sorted_nodes(&graph));
    assert_eq!(back.edges(), graph.edges());
    Ok(())
}

#[test]
fn malformed_snapshots_fail_with_graph_errors() -> TestResult {
    let dangling = r#"
[[node]]
id = "q0"
kind = "qubit"

[[edge]]
from = "q0"
to = "cal_missing"
"#;
    assert!(matches!(
        GraphSnapshot::from_toml(dangling)?.into_graph(),
        Err(CalGraphError::UnknownNode(id)) if id == "cal_missing"
    ));

    let duplicate = r#"
[[node]]
id = "q0"
kind = "qubit"

[[node]]
id = "q0"
kind = "calibration"
"#;
    assert!(matches!(
        GraphSnapshot::from_toml(duplicate)?.into_graph(),
        Err(CalGraphError::DuplicateNode(_))
    ));

    let self_loop = r#"
[[node]]
id = "cal_a"
kind = "calibration"

[[edge]]
from = "cal_a"
to = "cal_a"
"#;
    assert!(matches!(
        GraphSnapshot::from_toml(self_loop)?.into_graph(),
        Err(CalGraphError::SelfLoop(_))
    ));

    let bad_kind = "[[node]]\nid = \"x\"\nkind = \"coupler\"\n";
    assert!(matches!(
        GraphSnapshot::from_toml(bad_kind),
        Err(CalGraphError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn empty_snapshot_is_an_empty_graph() -> TestResult {
    let graph = GraphSnapshot::from_toml("")?.into_graph()?;
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    Ok(())
}

#[test]
fn dot_export_colours_nodes_by_kind() {
    let graph = GraphBuilder::new()
        .qubit("q0")
        .calibration("cal_q0_0")
        .edge("q0", "cal_q0_0")
        .build();

    let dot = to_dot(&graph);
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("\"q0\""));
    assert!(dot.contains("\"cal_q0_0\""));
    assert!(dot.contains("fillcolor=lightblue"));
    assert!(dot.contains("fillcolor=lightgreen"));
    assert!(dot.contains("->"));
}
