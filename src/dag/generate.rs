// src/dag/generate.rs

//! Random calibration graphs for demos and tests.
//!
//! The random source is always passed in by the caller; nothing here touches
//! a process-wide generator.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::model::{ConfigFile, GraphConfig, SamplingConfig};
use crate::dag::graph::DependencyGraph;
use crate::errors::Result;
use crate::types::{NodeId, NodeKind};

/// `q0 .. q{count-1}`.
pub fn qubit_names(count: usize) -> Vec<NodeId> {
    (0..count).map(|i| format!("q{i}")).collect()
}

/// `cal_<qubit>_<i>`, calibration index outermost: all `_0` tasks first,
/// then all `_1` tasks, and so on.
pub fn calibration_names(qubits: &[NodeId], cals_per_qubit: usize) -> Vec<NodeId> {
    (0..cals_per_qubit)
        .flat_map(|i| qubits.iter().map(move |q| format!("cal_{q}_{i}")))
        .collect()
}

/// Number of pairs drawn from `len` candidates for a sampling fraction.
pub fn sample_size(len: usize, fraction: f64) -> usize {
    ((len as f64) * fraction).floor().clamp(0.0, len as f64) as usize
}

/// Build a graph with the configured qubits and calibrations and a random
/// sample of qubit→calibration and calibration→calibration edges.
///
/// The sample is drawn without replacement from every candidate pair, so
/// cal→cal cycles are possible.
pub fn generate_graph<R: Rng + ?Sized>(
    graph_cfg: &GraphConfig,
    sampling: &SamplingConfig,
    rng: &mut R,
) -> Result<DependencyGraph> {
    let qubits = qubit_names(graph_cfg.qubit_count);
    let cals = calibration_names(&qubits, graph_cfg.cals_per_qubit);

    let mut graph = DependencyGraph::new();
    for q in &qubits {
        graph.add_node(q.as_str(), NodeKind::Qubit)?;
    }
    for c in &cals {
        graph.add_node(c.as_str(), NodeKind::Calibration)?;
    }

    let qubit_to_cal: Vec<(&str, &str)> = qubits
        .iter()
        .flat_map(|q| cals.iter().map(move |c| (q.as_str(), c.as_str())))
        .collect();
    let q2c_count = sample_size(qubit_to_cal.len(), sampling.qubit_to_cal_fraction);

    let cal_to_cal: Vec<(&str, &str)> = cals
        .iter()
        .flat_map(|x| {
            cals.iter()
                .filter(move |y| *y != x)
                .map(move |y| (x.as_str(), y.as_str()))
        })
        .collect();
    let c2c_count = sample_size(cal_to_cal.len(), sampling.cal_to_cal_fraction);

    debug!(
        candidates_q2c = qubit_to_cal.len(),
        sampled_q2c = q2c_count,
        candidates_c2c = cal_to_cal.len(),
        sampled_c2c = c2c_count,
        "generator: sampling edges"
    );

    for &(src, dst) in qubit_to_cal.choose_multiple(rng, q2c_count) {
        graph.add_edge(src, dst)?;
    }
    for &(src, dst) in cal_to_cal.choose_multiple(rng, c2c_count) {
        graph.add_edge(src, dst)?;
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        cyclic = graph.is_cyclic(),
        "generated calibration graph"
    );
    Ok(graph)
}

/// Generate the graph described by a validated config, seeding a fresh
/// [`StdRng`] from `graph.seed`.
pub fn generate_from_config(cfg: &ConfigFile) -> Result<DependencyGraph> {
    let mut rng = StdRng::seed_from_u64(cfg.graph.seed);
    generate_graph(&cfg.graph, &cfg.sampling, &mut rng)
}
