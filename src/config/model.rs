// src/config/model.rs

use serde::Deserialize;

use crate::types::SchedulingPolicy;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// qubit_count = 4
/// cals_per_qubit = 2
/// seed = 0
///
/// [sampling]
/// qubit_to_cal_fraction = 0.25
/// cal_to_cal_fraction = 0.1
///
/// [scheduler]
/// policy = "static"
/// workers = 1
/// resolve_processed = false
/// ```
///
/// Every key is optional and has a default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Top-level graph shape keys.
    #[serde(flatten)]
    pub graph: GraphConfig,

    /// Edge sampling fractions from `[sampling]`.
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Scheduling behaviour from `[scheduler]`.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub graph: GraphConfig,
    pub sampling: SamplingConfig,
    pub scheduler: SchedulerConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        graph: GraphConfig,
        sampling: SamplingConfig,
        scheduler: SchedulerConfig,
    ) -> Self {
        Self {
            graph,
            sampling,
            scheduler,
        }
    }

    /// Turn back into a raw config, e.g. to apply overrides and revalidate.
    pub fn into_raw(self) -> RawConfigFile {
        RawConfigFile {
            graph: self.graph,
            sampling: self.sampling,
            scheduler: self.scheduler,
        }
    }
}

/// Size of the generated device graph and the seed driving edge sampling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphConfig {
    /// Number of qubits (`q0`, `q1`, ...). Also accepted as `qubits`.
    #[serde(default = "default_qubit_count", alias = "qubits")]
    pub qubit_count: usize,

    /// Calibration tasks per qubit. Also accepted as `each_qubit_cal`.
    #[serde(default = "default_cals_per_qubit", alias = "each_qubit_cal")]
    pub cals_per_qubit: usize,

    #[serde(default)]
    pub seed: u64,
}

fn default_qubit_count() -> usize {
    4
}

fn default_cals_per_qubit() -> usize {
    2
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            qubit_count: default_qubit_count(),
            cals_per_qubit: default_cals_per_qubit(),
            seed: 0,
        }
    }
}

/// `[sampling]` section: share of all candidate pairs that become edges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SamplingConfig {
    /// Fraction of all (qubit, calibration) pairs.
    #[serde(default = "default_qubit_to_cal_fraction")]
    pub qubit_to_cal_fraction: f64,

    /// Fraction of all ordered pairs of distinct calibrations.
    #[serde(default = "default_cal_to_cal_fraction")]
    pub cal_to_cal_fraction: f64,
}

fn default_qubit_to_cal_fraction() -> f64 {
    0.25
}

fn default_cal_to_cal_fraction() -> f64 {
    0.1
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            qubit_to_cal_fraction: default_qubit_to_cal_fraction(),
            cal_to_cal_fraction: default_cal_to_cal_fraction(),
        }
    }
}

/// `[scheduler]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// `"static"` (default) or `"live"`.
    #[serde(default)]
    pub policy: SchedulingPolicy,

    /// Number of concurrent consumers pulling from the scheduler.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Remove each node from the graph once it has been processed.
    #[serde(default)]
    pub resolve_processed: bool,
}

fn default_workers() -> usize {
    1
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            workers: default_workers(),
            resolve_processed: false,
        }
    }
}
