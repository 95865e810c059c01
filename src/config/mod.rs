// src/config/mod.rs

//! Graph description loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a graph file from disk (`loader.rs`).
//! - Validate structural invariants like parent references and acyclicity
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_graph_path, load_and_validate, load_from_path};
pub use model::{GraphFile, GraphSection, NodeConfig, RawGraphFile};
