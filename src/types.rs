use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the dependency graph (`"q0"`, `"cal_q0_1"`, ...).
pub type NodeId = String;

/// The two node categories of a calibration graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A physical qubit; source of qubit→calibration edges.
    Qubit,
    /// A calibration task.
    Calibration,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Qubit => f.write_str("qubit"),
            NodeKind::Calibration => f.write_str("calibration"),
        }
    }
}

/// Label stored on each edge, derived from the endpoint kinds when the edge
/// is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    QubitToCalibration,
    CalibrationToCalibration,
    /// Any other combination. The generator never produces these, but the
    /// graph accepts them.
    Other,
}

impl EdgeKind {
    pub fn between(src: NodeKind, dst: NodeKind) -> Self {
        match (src, dst) {
            (NodeKind::Qubit, NodeKind::Calibration) => EdgeKind::QubitToCalibration,
            (NodeKind::Calibration, NodeKind::Calibration) => EdgeKind::CalibrationToCalibration,
            _ => EdgeKind::Other,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::QubitToCalibration => f.write_str("qubit->cal"),
            EdgeKind::CalibrationToCalibration => f.write_str("cal->cal"),
            EdgeKind::Other => f.write_str("other"),
        }
    }
}

/// How the scheduler treats priority keys once the heap is seeded.
///
/// - `Static`: keys are computed once when the scheduler is seeded and never
///   refreshed (default).
/// - `Live`: keys are recomputed whenever the graph changes underneath the
///   scheduler, so a pop always reflects current degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingPolicy {
    #[default]
    Static,
    Live,
}

impl FromStr for SchedulingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(SchedulingPolicy::Static),
            "live" => Ok(SchedulingPolicy::Live),
            other => Err(format!(
                "invalid scheduler policy: {other} (expected \"static\" or \"live\")"
            )),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingPolicy::Static => f.write_str("static"),
            SchedulingPolicy::Live => f.write_str("live"),
        }
    }
}
