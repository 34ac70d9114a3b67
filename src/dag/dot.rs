// src/dag/dot.rs

//! Graphviz export for external visualization tools.

use petgraph::dot::{Config, Dot};
use petgraph::stable_graph::NodeIndex;

use crate::dag::graph::{DependencyGraph, GraphNode};
use crate::types::NodeKind;

/// Fill colour for a node category.
pub fn node_colour(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Qubit => "lightblue",
        NodeKind::Calibration => "lightgreen",
    }
}

/// Render the graph as DOT text, labelled by id and coloured by kind.
pub fn to_dot(graph: &DependencyGraph) -> String {
    format!(
        "{}",
        Dot::with_attr_getters(
            graph.petgraph(),
            &[Config::EdgeNoLabel],
            &|_, _| String::new(),
            &|_, (_, node): (NodeIndex, &GraphNode)| {
                format!("style=filled, fillcolor={}", node_colour(node.kind))
            },
        )
    )
}
