// src/dag/mod.rs

//! Dependency graph representation and scheduling.
//!
//! - [`graph`] holds the qubit/calibration dependency graph.
//! - [`priority`] defines the priority key and its comparator.
//! - [`scheduler`] yields nodes in priority order.
//! - [`generate`] samples random graphs from a config.
//! - [`snapshot`] and [`dot`] serialize graphs for other tools.

pub mod dot;
pub mod generate;
pub mod graph;
pub mod priority;
pub mod scheduler;
pub mod snapshot;

pub use graph::DependencyGraph;
pub use priority::{PriorityKey, compare_priority};
pub use scheduler::{ScheduledNode, TaskScheduler};
pub use snapshot::GraphSnapshot;
