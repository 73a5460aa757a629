use crate::domain::error::SccError;
use crate::domain::graph::Graph;
use crate::domain::model::{Discovery, SccResult};

pub trait SccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult;

    /// Lazy per-component sequence in discovery order, without membership
    /// snapshots. `max_vertex` must agree with the graph's bound.
    fn discoveries<'g>(
        &self,
        graph: &'g Graph,
        max_vertex: i64,
    ) -> Result<Box<dyn Iterator<Item = Discovery> + 'g>, SccError>;
}
