//! Kosaraju strongly connected components, exposed as a lazy per-component
//! event sequence.
//!
//! Layers:
//! - domain: graph, errors, events and the detector port
//! - infrastructure: the Kosaraju engine, NDJSON printer, graph files
//! - usecase: push-based driver publishing progress events
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
