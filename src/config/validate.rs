// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CalGraphError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CalGraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.graph, raw.sampling, raw.scheduler))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_graph(cfg)?;
    validate_sampling(cfg)?;
    validate_scheduler(cfg)?;
    Ok(())
}

fn validate_graph(cfg: &RawConfigFile) -> Result<()> {
    if cfg.graph.qubit_count == 0 {
        return Err(CalGraphError::ConfigError(
            "qubit_count must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_sampling(cfg: &RawConfigFile) -> Result<()> {
    let fractions = [
        ("qubit_to_cal_fraction", cfg.sampling.qubit_to_cal_fraction),
        ("cal_to_cal_fraction", cfg.sampling.cal_to_cal_fraction),
    ];

    for (name, value) in fractions {
        if !(0.0..=1.0).contains(&value) {
            return Err(CalGraphError::ConfigError(format!(
                "[sampling].{name} must be within 0.0..=1.0 (got {value})"
            )));
        }
    }
    Ok(())
}

fn validate_scheduler(cfg: &RawConfigFile) -> Result<()> {
    if cfg.scheduler.workers == 0 {
        return Err(CalGraphError::ConfigError(
            "[scheduler].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
