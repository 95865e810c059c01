// src/scan/mod.rs

//! Ancestor eligibility scanning.
//!
//! - [`scanner`] walks upward from a node and collects its parent tree.
//! - [`counter`] tracks how often each average node has been reached.

pub mod counter;
pub mod scanner;

pub use counter::{AverageCounter, VisitState};
pub use scanner::forbidden_ancestors;
