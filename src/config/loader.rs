// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{GraphFile, RawGraphFile};
use crate::errors::Result;

/// Load a graph file from a given path and return the raw `RawGraphFile`.
///
/// This only performs TOML deserialization; it does **not** check parent
/// references or cycles. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawGraphFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawGraphFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), nodes = raw.node.len(), "graph file parsed");

    Ok(raw)
}

/// Load a graph file from path and validate it.
///
/// This is the entry point the CLI uses:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - an empty graph,
///   - unknown or self-referencing `parents`,
///   - cycles (unless `[graph].allow_cycles = true`).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GraphFile> {
    let raw = load_from_path(&path)?;
    GraphFile::try_from(raw)
}

/// Default graph file path: `Graph.toml` in the current working directory.
pub fn default_graph_path() -> PathBuf {
    PathBuf::from("Graph.toml")
}
