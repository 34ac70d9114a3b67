// src/engine/shared.rs

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::dag::{DependencyGraph, ScheduledNode, TaskScheduler};
use crate::errors::Result;
use crate::types::SchedulingPolicy;

/// The graph together with the scheduler seeded from it.
#[derive(Debug)]
pub struct ScheduleState {
    pub graph: DependencyGraph,
    pub scheduler: TaskScheduler,
}

/// Cloneable handle to a schedule guarded by a single coarse lock.
///
/// Every operation takes the lock for its whole duration, so no two callers
/// can receive the same node and a mutation never lands between a degree
/// read and the pop that uses it. None of the operations wait for work:
/// an exhausted schedule yields `None` straight away.
#[derive(Debug, Clone)]
pub struct SharedSchedule {
    inner: Arc<Mutex<ScheduleState>>,
}

impl SharedSchedule {
    pub fn new(graph: DependencyGraph, policy: SchedulingPolicy) -> Self {
        let scheduler = TaskScheduler::new(policy, &graph);
        Self {
            inner: Arc::new(Mutex::new(ScheduleState { graph, scheduler })),
        }
    }

    /// Next node in priority order, or `None` once exhausted.
    pub async fn next(&self) -> Option<ScheduledNode> {
        let mut state = self.inner.lock().await;
        let ScheduleState { graph, scheduler } = &mut *state;
        scheduler.next(graph)
    }

    /// Extract the next node and remove it from the graph in one critical
    /// section.
    pub async fn next_resolved(&self) -> Result<Option<ScheduledNode>> {
        let mut state = self.inner.lock().await;
        let ScheduleState { graph, scheduler } = &mut *state;

        let Some(node) = scheduler.next(graph) else {
            return Ok(None);
        };
        graph.remove_node(&node.id)?;
        debug!(node = %node.id, "resolved node removed from graph");
        Ok(Some(node))
    }

    /// Run a graph mutation under the lock.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut DependencyGraph) -> R) -> R {
        let mut state = self.inner.lock().await;
        f(&mut state.graph)
    }

    /// Reseed the scheduler from the graph's current state.
    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        let ScheduleState { graph, scheduler } = &mut *state;
        scheduler.reset(graph);
    }

    pub async fn remaining(&self) -> usize {
        self.inner.lock().await.scheduler.remaining()
    }

    /// Copy of the graph as it stands now.
    pub async fn graph_snapshot(&self) -> DependencyGraph {
        self.inner.lock().await.graph.clone()
    }
}
