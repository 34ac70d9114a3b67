#![allow(dead_code, unused_imports)]

pub use calgraph_test_utils::{builders, filter_directive, init_tracing, with_timeout};

use calgraph::dag::DependencyGraph;
use calgraph::dag::ScheduledNode;

/// Node ids in the order they were yielded.
pub fn ids(order: &[ScheduledNode]) -> Vec<String> {
    order.iter().map(|n| n.id.clone()).collect()
}

/// All node ids of a graph, sorted.
pub fn sorted_nodes(graph: &DependencyGraph) -> Vec<String> {
    let mut ids: Vec<String> = graph.nodes().map(str::to_string).collect();
    ids.sort();
    ids
}
