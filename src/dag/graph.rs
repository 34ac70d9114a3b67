// src/dag/graph.rs

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use petgraph::Direction;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use tracing::{debug, trace};

use crate::errors::{CalGraphError, Result};
use crate::types::{EdgeKind, NodeId, NodeKind};

/// Node weight stored inside the petgraph graph.
#[derive(Debug, Clone)]
pub(crate) struct GraphNode {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    /// Graph revision at which this node was inserted. Never changes.
    born: u64,
    /// Graph revision at which this node's degree last changed.
    generation: u64,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Directed calibration dependency graph.
///
/// Nodes are qubits or calibration tasks, keyed by a unique identifier.
/// Edges point from a qubit to the calibrations it affects, or from one
/// calibration to the calibrations sequenced after it.
///
/// The graph may contain cycles. Nothing here checks for them implicitly;
/// [`DependencyGraph::cycles`] is available as a diagnostic.
///
/// Storage is a `StableDiGraph` so that node indices survive removals, plus
/// an id index and an insertion-order list for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    inner: StableDiGraph<GraphNode, EdgeKind>,
    index: HashMap<NodeId, NodeIndex>,
    order: Vec<NodeId>,
    /// Incremented on every successful mutation.
    revision: u64,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Fails with [`CalGraphError::DuplicateNode`] if the id
    /// is already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>, kind: NodeKind) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(CalGraphError::DuplicateNode(id));
        }

        let generation = self.bump_revision();
        let ix = self.inner.add_node(GraphNode {
            id: id.clone(),
            kind,
            born: generation,
            generation,
        });
        trace!(node = %id, %kind, "graph: added node");
        self.index.insert(id.clone(), ix);
        self.order.push(id);
        Ok(())
    }

    /// Insert a directed edge `src -> dst`.
    ///
    /// Returns `Ok(true)` if the edge is new and `Ok(false)` if it already
    /// existed. Unknown endpoints are reported before self-loops, and a
    /// failed call leaves the graph untouched.
    pub fn add_edge(&mut self, src: &str, dst: &str) -> Result<bool> {
        let a = self.lookup(src)?;
        let b = self.lookup(dst)?;
        if a == b {
            return Err(CalGraphError::SelfLoop(src.to_string()));
        }

        if self.inner.find_edge(a, b).is_some() {
            trace!(src, dst, "graph: edge already present");
            return Ok(false);
        }

        let kind = EdgeKind::between(self.inner[a].kind, self.inner[b].kind);
        self.inner.add_edge(a, b, kind);
        let revision = self.bump_revision();
        self.inner[a].generation = revision;
        self.inner[b].generation = revision;
        trace!(src, dst, %kind, "graph: added edge");
        Ok(true)
    }

    /// Remove the edge `src -> dst` if present.
    ///
    /// This is how a consumer marks a dependency as resolved.
    pub fn remove_edge(&mut self, src: &str, dst: &str) -> Result<bool> {
        let a = self.lookup(src)?;
        let b = self.lookup(dst)?;

        let Some(edge) = self.inner.find_edge(a, b) else {
            return Ok(false);
        };
        self.inner.remove_edge(edge);
        let revision = self.bump_revision();
        self.inner[a].generation = revision;
        self.inner[b].generation = revision;
        trace!(src, dst, "graph: removed edge");
        Ok(true)
    }

    /// Remove a node and every edge touching it. Returns the removed node's
    /// kind.
    pub fn remove_node(&mut self, id: &str) -> Result<NodeKind> {
        let ix = self.lookup(id)?;
        let neighbours: Vec<NodeIndex> = self.inner.neighbors_undirected(ix).collect();

        let removed = self
            .inner
            .remove_node(ix)
            .ok_or_else(|| CalGraphError::UnknownNode(id.to_string()))?;

        let revision = self.bump_revision();
        for n in neighbours {
            if let Some(node) = self.inner.node_weight_mut(n) {
                node.generation = revision;
            }
        }

        self.index.remove(id);
        self.order.retain(|n| n != id);
        debug!(node = %id, kind = %removed.kind, "graph: removed node and incident edges");
        Ok(removed.kind)
    }

    /// Identifiers with an edge into `id`.
    pub fn predecessors(&self, id: &str) -> Result<BTreeSet<&str>> {
        let ix = self.lookup(id)?;
        Ok(self.neighbour_ids(ix, Direction::Incoming))
    }

    /// Identifiers with an edge out of `id`.
    pub fn successors(&self, id: &str) -> Result<BTreeSet<&str>> {
        let ix = self.lookup(id)?;
        Ok(self.neighbour_ids(ix, Direction::Outgoing))
    }

    pub fn in_degree(&self, id: &str) -> Result<usize> {
        let ix = self.lookup(id)?;
        Ok(self.inner.neighbors_directed(ix, Direction::Incoming).count())
    }

    pub fn out_degree(&self, id: &str) -> Result<usize> {
        let ix = self.lookup(id)?;
        Ok(self.inner.neighbors_directed(ix, Direction::Outgoing).count())
    }

    /// All node identifiers, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn kind(&self, id: &str) -> Result<NodeKind> {
        let ix = self.lookup(id)?;
        Ok(self.inner[ix].kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// All edges as `(src, dst)` pairs: sources in insertion order, targets
    /// sorted.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for id in &self.order {
            let Some(&ix) = self.index.get(id) else {
                continue;
            };
            for dst in self.neighbour_ids(ix, Direction::Outgoing) {
                out.push((id.as_str(), dst));
            }
        }
        out
    }

    /// Revision at which the degree of `id` last changed.
    pub fn generation(&self, id: &str) -> Result<u64> {
        let ix = self.lookup(id)?;
        Ok(self.inner[ix].generation)
    }

    /// Revision at which `id` was inserted.
    ///
    /// Distinguishes a node from a later node that reuses its id after
    /// removal.
    pub fn birth(&self, id: &str) -> Result<u64> {
        let ix = self.lookup(id)?;
        Ok(self.inner[ix].born)
    }

    /// Monotonic counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.inner)
    }

    /// Strongly connected components with more than one node.
    ///
    /// Purely diagnostic: ids inside a component are sorted, components are
    /// sorted by their first id.
    pub fn cycles(&self) -> Vec<Vec<NodeId>> {
        let mut components: Vec<Vec<NodeId>> = tarjan_scc(&self.inner)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut ids: Vec<NodeId> =
                    scc.into_iter().map(|ix| self.inner[ix].id.clone()).collect();
                ids.sort();
                ids
            })
            .collect();
        components.sort();
        components
    }

    pub(crate) fn petgraph(&self) -> &StableDiGraph<GraphNode, EdgeKind> {
        &self.inner
    }

    fn lookup(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CalGraphError::UnknownNode(id.to_string()))
    }

    fn neighbour_ids(&self, ix: NodeIndex, dir: Direction) -> BTreeSet<&str> {
        self.inner
            .neighbors_directed(ix, dir)
            .map(|n| self.inner[n].id.as_str())
            .collect()
    }

    fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}
