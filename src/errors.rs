// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcguardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Cycle detected in graph: {0}")]
    Cycle(String),

    #[error("Arc rejected: '{parent}' is in the parent tree of '{child}'")]
    ArcRejected { child: String, parent: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ArcguardError>;
