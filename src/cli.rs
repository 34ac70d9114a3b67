// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::SchedulingPolicy;

/// Command-line arguments for `calgraph`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "calgraph",
    version,
    about = "Build a qubit calibration dependency graph and print a processing order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `calgraph.toml` in the current working directory if it
    /// exists, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override `qubit_count`.
    #[arg(long, value_name = "N")]
    pub qubits: Option<usize>,

    /// Override `cals_per_qubit`.
    #[arg(long, value_name = "N")]
    pub cals_per_qubit: Option<usize>,

    /// Override the sampling seed.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override `[scheduler].policy`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub policy: Option<PolicyArg>,

    /// Override `[scheduler].workers`.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Remove each node from the graph once processed.
    #[arg(long)]
    pub resolve: bool,

    /// Load the graph from a snapshot file instead of generating one.
    #[arg(long, value_name = "PATH")]
    pub load: Option<String>,

    /// Write the graph to a snapshot file before scheduling.
    #[arg(long, value_name = "PATH")]
    pub save: Option<String>,

    /// Write the graph as Graphviz DOT before scheduling.
    #[arg(long, value_name = "PATH")]
    pub dot: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CALGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Build and print the graph, but don't schedule it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Scheduling policy as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum PolicyArg {
    Static,
    Live,
}

impl From<PolicyArg> for SchedulingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Static => SchedulingPolicy::Static,
            PolicyArg::Live => SchedulingPolicy::Live,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
