use crate::domain::model::ComponentId;
use crate::usecase::stats::ExploreStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    ComponentDiscovered {
        component: ComponentId,
        root: usize,
        members: Vec<usize>,
        membership: Vec<Option<ComponentId>>,
    },

    Done {
        total_components: usize,
    },

    Stopped {
        components_emitted: usize,
    },

    Finished {
        stats: ExploreStats,
    },
}
