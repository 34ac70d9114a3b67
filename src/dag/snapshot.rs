// src/dag/snapshot.rs

//! Lossless TOML snapshot of a [`DependencyGraph`].
//!
//! ```toml
//! [[node]]
//! id = "q0"
//! kind = "qubit"
//!
//! [[edge]]
//! from = "q0"
//! to = "cal_q0_0"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dag::graph::DependencyGraph;
use crate::errors::Result;
use crate::types::{NodeId, NodeKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeEntry>,
    #[serde(default, rename = "edge")]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: NodeId,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: NodeId,
    pub to: NodeId,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let nodes = graph
            .nodes()
            .filter_map(|id| {
                graph.kind(id).ok().map(|kind| NodeEntry {
                    id: id.to_string(),
                    kind,
                })
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(from, to)| EdgeEntry {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();

        Self { nodes, edges }
    }

    /// Rebuild a graph. Goes through the normal mutation API, so duplicate
    /// ids, dangling edges and self-loops are rejected with the usual errors.
    pub fn into_graph(self) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        for node in self.nodes {
            graph.add_node(node.id, node.kind)?;
        }
        for edge in &self.edges {
            graph.add_edge(&edge.from, &edge.to)?;
        }
        Ok(graph)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

pub fn save_graph(graph: &DependencyGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contents = GraphSnapshot::from_graph(graph).to_toml()?;
    fs::write(path, contents)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "saved graph snapshot"
    );
    Ok(())
}

pub fn load_graph(path: impl AsRef<Path>) -> Result<DependencyGraph> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let graph = GraphSnapshot::from_toml(&contents)?.into_graph()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph snapshot"
    );
    Ok(graph)
}
