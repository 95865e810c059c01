// src/lib.rs

pub mod arcs;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod scan;
pub mod types;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::config::model::GraphFile;
use crate::graph::Graph;

pub use crate::arcs::{add_arc, available_arcs, report};
pub use crate::scan::forbidden_ancestors;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the graph file, then runs the selected command with
/// its output on stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let graph_path = PathBuf::from(&args.graph);
    let cfg = load_and_validate(&graph_path)?;
    info!(path = %graph_path.display(), nodes = cfg.node.len(), "graph loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &cfg, &mut out)
}

/// Run one command against a validated graph description, writing results to
/// `out`.
pub fn execute(command: &Command, cfg: &GraphFile, out: &mut impl Write) -> Result<()> {
    if let Command::Check = command {
        print_check(cfg, out)?;
        return Ok(());
    }

    let graph = Graph::from_config(cfg);

    match command {
        Command::Forbidden { node } => {
            for id in forbidden_ancestors(&graph, node)? {
                writeln!(out, "{id}")?;
            }
        }
        Command::Available { node } => {
            for id in available_arcs(&graph, node)? {
                writeln!(out, "{id}")?;
            }
        }
        Command::Report => {
            let summary = report(&graph)?;
            for line in summary.nodes.iter() {
                writeln!(
                    out,
                    "{}\tforbidden={}\tavailable={}",
                    line.id, line.forbidden, line.available
                )?;
            }
            let saturated: Vec<&str> = summary.saturated().map(|id| id.as_str()).collect();
            writeln!(out, "saturated ({}): {}", saturated.len(), saturated.join(", "))?;
        }
        Command::Check => {}
    }

    Ok(())
}

/// Summary output for `check`: nodes, kinds and parents.
fn print_check(cfg: &GraphFile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "arcguard check")?;
    writeln!(out, "  graph.allow_cycles = {}", cfg.graph.allow_cycles)?;
    writeln!(out)?;

    writeln!(out, "nodes ({}):", cfg.node.len())?;
    for (id, node) in cfg.node.iter() {
        writeln!(out, "  - {id}")?;
        writeln!(out, "      kind: {}", node.kind)?;
        if !node.parents.is_empty() {
            let parents: Vec<&str> = node.parents.iter().map(|p| p.as_str()).collect();
            writeln!(out, "      parents: {:?}", parents)?;
        }
    }

    debug!("check complete (no scanning)");
    Ok(())
}
