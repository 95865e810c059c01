// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `arcguard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "arcguard",
    version,
    about = "Find which new parent arcs a node can take without creating a Bad Subgraph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph file (TOML).
    ///
    /// Default: `Graph.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Graph.toml", global = true)]
    pub graph: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ARCGUARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the parent tree of a node: ancestors it must not take as parents.
    Forbidden {
        /// Node id.
        node: String,
    },
    /// Print the nodes that may become a new parent of a node.
    Available {
        /// Node id.
        node: String,
    },
    /// Print forbidden/available counts for every node and list saturated ones.
    Report,
    /// Parse + validate the graph file and print a summary; no scanning.
    Check,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
