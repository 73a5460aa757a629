use serde::Serialize;
use std::fmt;

/// Sequential component identifier, assigned in discovery order starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SccEvent {
    /// One newly discovered component plus the cumulative assignment state.
    ComponentSnapshot {
        component: ComponentId,
        root: usize,
        /// Vertices of this component in discovery order; `members[0] == root`.
        members: Vec<usize>,
        /// `membership[v]` is `None` while `v` is unassigned.
        membership: Vec<Option<ComponentId>>,
    },
    Done {
        total_components: usize,
    },
}

impl SccEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, SccEvent::Done { .. })
    }
}

/// A component without the cumulative membership snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub component: ComponentId,
    pub root: usize,
    /// Discovery order; `members[0] == root`.
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    pub component_of: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }
}
