// src/graph/mod.rs

//! Arena graph of typed nodes.
//!
//! Nodes are keyed by [`NodeId`](crate::types::NodeId) and refer to their
//! parents by id, so cycles are representable and the scanner can detect
//! them instead of chasing shared pointers.

pub mod arena;

pub use arena::{Graph, Node};
