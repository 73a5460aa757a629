//! Interface layer: CLI wiring.

pub mod cli;
pub mod edge_list;
