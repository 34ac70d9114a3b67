// src/engine/mod.rs

//! Concurrent consumption of a schedule.
//!
//! This module ties together:
//! - [`shared`]: one lock over the graph and its scheduler, so extraction
//!   and graph mutation never interleave
//! - [`runtime`]: N async consumers pulling nodes from the shared schedule
//!   and reporting [`ConsumerEvent`]s to a collector over a channel

use crate::dag::ScheduledNode;

/// Options for a consumer run.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerOptions {
    /// Number of concurrent consumers (at least 1).
    pub workers: usize,
    /// Remove each node from the graph, under the same lock, once it has
    /// been extracted.
    pub resolve_processed: bool,
}

/// Events flowing from consumers to the collector.
#[derive(Debug, Clone)]
pub enum ConsumerEvent {
    /// A consumer took ownership of a node.
    Processed { worker: usize, node: ScheduledNode },
    /// A consumer saw the schedule exhausted and stopped.
    Finished { worker: usize },
}

pub mod runtime;
pub mod shared;

pub use runtime::run_consumers;
pub use shared::{ScheduleState, SharedSchedule};
