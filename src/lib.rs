// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod types;

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::load_or_default;
use crate::dag::generate::generate_from_config;
use crate::dag::{DependencyGraph, ScheduledNode, TaskScheduler, dot, snapshot};
use crate::engine::{ConsumerEvent, ConsumerOptions, SharedSchedule, run_consumers};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - graph generation (or loading a snapshot)
/// - optional snapshot / DOT output
/// - sequential or concurrent consumption of the schedule
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    let graph = build_graph(&args, &cfg)?;

    if let Some(ref path) = args.save {
        snapshot::save_graph(&graph, path)?;
    }
    if let Some(ref path) = args.dot {
        fs::write(path, dot::to_dot(&graph))?;
        info!(path = %path, "wrote DOT export");
    }

    if args.dry_run {
        print_dry_run(&cfg, &graph);
        return Ok(());
    }

    let options = ConsumerOptions {
        workers: cfg.scheduler.workers,
        resolve_processed: cfg.scheduler.resolve_processed,
    };

    if options.workers == 1 {
        process_sequential(graph, &cfg, |node| println!("Processing: {node}"))?;
    } else {
        let schedule = SharedSchedule::new(graph, cfg.scheduler.policy);
        run_consumers(schedule, options, |event| {
            if let ConsumerEvent::Processed { worker, node } = event {
                println!("[worker {worker}] Processing: {node}");
            }
        })
        .await?;
    }

    Ok(())
}

/// Load the config (explicit path, `calgraph.toml`, or defaults) and apply
/// CLI overrides. Overrides go through validation again.
pub fn resolve_config(args: &CliArgs) -> errors::Result<ConfigFile> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;

    let mut raw = cfg.into_raw();
    if let Some(qubits) = args.qubits {
        raw.graph.qubit_count = qubits;
    }
    if let Some(cals) = args.cals_per_qubit {
        raw.graph.cals_per_qubit = cals;
    }
    if let Some(seed) = args.seed {
        raw.graph.seed = seed;
    }
    if let Some(policy) = args.policy {
        raw.scheduler.policy = policy.into();
    }
    if let Some(workers) = args.workers {
        raw.scheduler.workers = workers;
    }
    if args.resolve {
        raw.scheduler.resolve_processed = true;
    }

    let cfg = ConfigFile::try_from(raw)?;
    debug!(?cfg, "resolved configuration");
    Ok(cfg)
}

/// Either load the snapshot named by `--load` or generate from the config.
pub fn build_graph(args: &CliArgs, cfg: &ConfigFile) -> errors::Result<DependencyGraph> {
    match args.load {
        Some(ref path) => snapshot::load_graph(path),
        None => generate_from_config(cfg),
    }
}

/// Drain the schedule on the calling thread, calling `on_node` for each node
/// in order. With `resolve_processed` each node is removed from the graph
/// right after it is yielded.
pub fn process_sequential(
    mut graph: DependencyGraph,
    cfg: &ConfigFile,
    mut on_node: impl FnMut(&ScheduledNode),
) -> errors::Result<Vec<ScheduledNode>> {
    let mut scheduler = TaskScheduler::new(cfg.scheduler.policy, &graph);
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(node) = scheduler.next(&graph) {
        on_node(&node);
        if cfg.scheduler.resolve_processed {
            graph.remove_node(&node.id)?;
        }
        order.push(node);
    }

    info!(processed = order.len(), policy = %cfg.scheduler.policy, "schedule exhausted");
    Ok(order)
}

/// Dry-run output: config, nodes with their successors, and any cycles.
fn print_dry_run(cfg: &ConfigFile, graph: &DependencyGraph) {
    println!("calgraph dry-run");
    println!("  qubit_count = {}", cfg.graph.qubit_count);
    println!("  cals_per_qubit = {}", cfg.graph.cals_per_qubit);
    println!("  seed = {}", cfg.graph.seed);
    println!("  scheduler.policy = {}", cfg.scheduler.policy);
    println!("  scheduler.workers = {}", cfg.scheduler.workers);
    println!();

    println!("nodes ({}), edges ({}):", graph.node_count(), graph.edge_count());
    for id in graph.nodes() {
        let kind = graph.kind(id).map(|k| k.to_string()).unwrap_or_default();
        println!("  - {id} ({kind})");
        if let Ok(succs) = graph.successors(id) {
            if !succs.is_empty() {
                println!("      -> {:?}", succs);
            }
        }
    }

    let cycles = graph.cycles();
    if cycles.is_empty() {
        println!("cycles: none");
    } else {
        println!("cycles ({}):", cycles.len());
        for component in cycles {
            println!("  - {:?}", component);
        }
    }

    debug!("dry-run complete (no scheduling)");
}
