// tests/generator.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::init_tracing;

use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use calgraph::config::{GraphConfig, SamplingConfig};
use calgraph::dag::generate::{
    calibration_names, generate_from_config, generate_graph, qubit_names, sample_size,
};
use calgraph::types::NodeKind;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn names_follow_the_device_layout() {
    let qubits = qubit_names(2);
    assert_eq!(qubits, vec!["q0", "q1"]);
    assert_eq!(
        calibration_names(&qubits, 2),
        vec!["cal_q0_0", "cal_q1_0", "cal_q0_1", "cal_q1_1"]
    );
    assert!(calibration_names(&qubits, 0).is_empty());
}

#[test]
fn sample_sizes_round_down() {
    assert_eq!(sample_size(8, 0.25), 2);
    assert_eq!(sample_size(12, 0.1), 1);
    assert_eq!(sample_size(10, 0.1), 1);
    assert_eq!(sample_size(7, 0.0), 0);
    assert_eq!(sample_size(7, 1.0), 7);
    assert_eq!(sample_size(0, 0.5), 0);
}

#[test]
fn generated_graph_has_expected_shape() -> TestResult {
    init_tracing();
    let cfg = ConfigFileBuilder::new().qubits(2).cals_per_qubit(2).seed(11).build();
    let graph = generate_from_config(&cfg)?;

    let nodes: Vec<&str> = graph.nodes().collect();
    assert_eq!(
        nodes,
        vec!["q0", "q1", "cal_q0_0", "cal_q1_0", "cal_q0_1", "cal_q1_1"]
    );
    assert_eq!(graph.kind("q1")?, NodeKind::Qubit);
    assert_eq!(graph.kind("cal_q1_1")?, NodeKind::Calibration);

    // 8 qubit->cal candidates at 1/4, 12 cal->cal candidates at 1/10.
    assert_eq!(graph.edge_count(), 2 + 1);
    Ok(())
}

#[test]
fn edges_only_run_from_qubits_or_between_calibrations() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .qubits(5)
        .cals_per_qubit(3)
        .sampling(0.5, 0.3)
        .seed(2)
        .build();
    let graph = generate_from_config(&cfg)?;

    for id in qubit_names(5) {
        assert!(graph.predecessors(&id)?.is_empty(), "{id} has predecessors");
        for succ in graph.successors(&id)? {
            assert_eq!(graph.kind(succ)?, NodeKind::Calibration);
        }
    }
    Ok(())
}

#[test]
fn full_sampling_connects_every_candidate_pair() -> TestResult {
    let graph_cfg = GraphConfig {
        qubit_count: 2,
        cals_per_qubit: 1,
        seed: 0,
    };
    let sampling = SamplingConfig {
        qubit_to_cal_fraction: 1.0,
        cal_to_cal_fraction: 1.0,
    };
    let mut rng = StdRng::seed_from_u64(0);
    let graph = generate_graph(&graph_cfg, &sampling, &mut rng)?;

    // 2 qubits x 2 cals, plus both directions between the 2 cals.
    assert_eq!(graph.edge_count(), 4 + 2);
    assert!(graph.is_cyclic());
    Ok(())
}

#[test]
fn same_seed_same_graph() -> TestResult {
    let cfg = ConfigFileBuilder::new().qubits(6).cals_per_qubit(3).seed(1234).build();
    let a = generate_from_config(&cfg)?;
    let b = generate_from_config(&cfg)?;
    assert_eq!(a.edges(), b.edges());
    Ok(())
}

#[test]
fn different_seeds_draw_different_edges() -> TestResult {
    let first = ConfigFileBuilder::new().qubits(6).cals_per_qubit(3).seed(1).build();
    let second = ConfigFileBuilder::new().qubits(6).cals_per_qubit(3).seed(2).build();
    let a = generate_from_config(&first)?;
    let b = generate_from_config(&second)?;

    assert_eq!(a.edge_count(), b.edge_count());
    assert_ne!(a.edges(), b.edges());
    Ok(())
}

#[test]
fn rng_is_threaded_through_the_caller() -> TestResult {
    let cfg = ConfigFileBuilder::new().qubits(4).cals_per_qubit(2).build();
    let mut rng = StdRng::seed_from_u64(77);

    // Two draws from one stream are independent samples.
    let a = generate_graph(&cfg.graph, &cfg.sampling, &mut rng)?;
    let b = generate_graph(&cfg.graph, &cfg.sampling, &mut rng)?;
    assert_eq!(a.edge_count(), b.edge_count());

    let mut replay = StdRng::seed_from_u64(77);
    let again = generate_graph(&cfg.graph, &cfg.sampling, &mut replay)?;
    assert_eq!(a.edges(), again.edges());
    Ok(())
}
