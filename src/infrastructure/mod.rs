// Infrastructure layer: Kosaraju engine, file I/O, serde, eventing
pub mod event_ndjson;
pub mod scc_kosaraju;
pub mod serde_json_adapter;
