// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum CalGraphError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Self-loop rejected on node: {0}")]
    SelfLoop(NodeId),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CalGraphError>;
