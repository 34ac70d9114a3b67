// src/dag/priority.rs

//! Priority keys for the scheduler.
//!
//! A key is a view over the graph, never a cached field: callers build one
//! from current degrees with [`PriorityKey::for_node`]. The ordering lives in
//! [`compare_priority`] so the tie-break policy can be tested on its own.

use std::cmp::Ordering;
use std::fmt;

use crate::dag::graph::DependencyGraph;
use crate::errors::Result;
use crate::types::NodeId;

/// `(in_degree, -out_degree, id)` for one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriorityKey {
    /// Number of predecessors (blockers).
    pub in_degree: usize,
    /// Number of successors (tasks this node unblocks).
    pub out_degree: usize,
    pub id: NodeId,
}

impl PriorityKey {
    pub fn new(in_degree: usize, out_degree: usize, id: impl Into<NodeId>) -> Self {
        Self {
            in_degree,
            out_degree,
            id: id.into(),
        }
    }

    /// Compute the key for `id` from the graph's current degrees.
    pub fn for_node(graph: &DependencyGraph, id: &str) -> Result<Self> {
        Ok(Self::new(graph.in_degree(id)?, graph.out_degree(id)?, id))
    }
}

/// Scheduling order: fewer predecessors first, then more successors, then
/// ascending identifier.
///
/// `Ordering::Less` means `a` is processed before `b`.
pub fn compare_priority(a: &PriorityKey, b: &PriorityKey) -> Ordering {
    a.in_degree
        .cmp(&b.in_degree)
        .then_with(|| b.out_degree.cmp(&a.out_degree))
        .then_with(|| a.id.cmp(&b.id))
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_priority(self, other)
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PriorityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, '{}')",
            self.in_degree,
            -(self.out_degree as i64),
            self.id
        )
    }
}
