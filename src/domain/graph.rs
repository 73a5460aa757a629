use crate::domain::error::SccError;

/// Directed graph over the dense vertex space `0..=max_vertex`.
///
/// Adjacency lists keep edge insertion order and are not deduplicated, so
/// traversal order (and therefore component discovery order) is fully
/// determined by the input edge sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    max_vertex: usize,
    edges: Vec<(usize, usize)>,
    forward: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
}

impl Graph {
    pub fn build(max_vertex: i64, edges: &[(i64, i64)]) -> Result<Self, SccError> {
        if max_vertex < 0 {
            return Err(SccError::InvalidInput(format!(
                "vertex bound must be non-negative, got {max_vertex}"
            )));
        }
        let bound = usize::try_from(max_vertex).map_err(|_| too_large(max_vertex))?;
        let node_count = bound.checked_add(1).ok_or_else(|| too_large(max_vertex))?;

        let mut forward = adjacency(node_count).ok_or_else(|| too_large(max_vertex))?;
        let mut reverse = adjacency(node_count).ok_or_else(|| too_large(max_vertex))?;
        let mut checked = Vec::with_capacity(edges.len());

        for (edge_index, &(from, to)) in edges.iter().enumerate() {
            for vertex in [from, to] {
                if vertex < 0 || vertex > max_vertex {
                    return Err(SccError::InvalidVertex {
                        edge_index,
                        from,
                        to,
                        vertex,
                        max_vertex,
                    });
                }
            }
            // Both endpoints are within 0..=bound here.
            let (u, v) = (from as usize, to as usize);
            forward[u].push(v);
            reverse[v].push(u);
            checked.push((u, v));
        }

        Ok(Self {
            max_vertex: bound,
            edges: checked,
            forward,
            reverse,
        })
    }

    pub fn max_vertex(&self) -> usize {
        self.max_vertex
    }

    pub fn node_count(&self) -> usize {
        self.forward.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn forward_neighbors(&self, vertex: usize) -> &[usize] {
        self.forward.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn reverse_neighbors(&self, vertex: usize) -> &[usize] {
        self.reverse.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_self_loop(&self, vertex: usize) -> bool {
        self.forward_neighbors(vertex).contains(&vertex)
    }

    /// A component lies on a cycle when it has several vertices or a self-loop.
    pub fn is_cyclic_component(&self, members: &[usize]) -> bool {
        match members {
            [] => false,
            [only] => self.has_self_loop(*only),
            _ => true,
        }
    }
}

fn too_large(max_vertex: i64) -> SccError {
    SccError::InvalidInput(format!("vertex bound {max_vertex} does not fit in memory"))
}

/// `node_count` empty lists, or `None` if the allocation is refused.
fn adjacency(node_count: usize) -> Option<Vec<Vec<usize>>> {
    let mut lists: Vec<Vec<usize>> = Vec::new();
    lists.try_reserve_exact(node_count).ok()?;
    lists.resize_with(node_count, Vec::new);
    Some(lists)
}
