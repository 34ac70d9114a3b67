#![allow(dead_code)]

use calgraph::config::{ConfigFile, RawConfigFile};
use calgraph::dag::DependencyGraph;
use calgraph::types::{NodeKind, SchedulingPolicy};

/// Builder for `DependencyGraph` to simplify test setup.
///
/// Panics on any graph error, so only use it for graphs that are valid by
/// construction.
pub struct GraphBuilder {
    graph: DependencyGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: DependencyGraph::new(),
        }
    }

    pub fn qubit(mut self, id: &str) -> Self {
        self.graph
            .add_node(id, NodeKind::Qubit)
            .expect("Failed to add qubit node");
        self
    }

    pub fn calibration(mut self, id: &str) -> Self {
        self.graph
            .add_node(id, NodeKind::Calibration)
            .expect("Failed to add calibration node");
        self
    }

    pub fn calibrations(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.calibration(id);
        }
        self
    }

    pub fn edge(mut self, src: &str, dst: &str) -> Self {
        self.graph.add_edge(src, dst).expect("Failed to add edge");
        self
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn qubits(mut self, count: usize) -> Self {
        self.config.graph.qubit_count = count;
        self
    }

    pub fn cals_per_qubit(mut self, count: usize) -> Self {
        self.config.graph.cals_per_qubit = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.graph.seed = seed;
        self
    }

    pub fn sampling(mut self, qubit_to_cal: f64, cal_to_cal: f64) -> Self {
        self.config.sampling.qubit_to_cal_fraction = qubit_to_cal;
        self.config.sampling.cal_to_cal_fraction = cal_to_cal;
        self
    }

    pub fn policy(mut self, policy: SchedulingPolicy) -> Self {
        self.config.scheduler.policy = policy;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.scheduler.workers = workers;
        self
    }

    pub fn resolve_processed(mut self, val: bool) -> Self {
        self.config.scheduler.resolve_processed = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
