use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SccError {
    #[error("edge #{edge_index} ({from}, {to}) references vertex {vertex} outside 0..={max_vertex}")]
    InvalidVertex {
        edge_index: usize,
        from: i64,
        to: i64,
        vertex: i64,
        max_vertex: i64,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
