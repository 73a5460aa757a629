use crate::domain::graph::Graph;
use crate::domain::model::Discovery;
use crate::domain::traits::SccDetector;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::ExploreStats;
use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};

const PHASE: &str = "kosaraju";

/// Pushes the detector's component sequence into `sink`, one event per step.
///
/// `stop` is checked before every pass-2 step; once it reads `true`, or once
/// the receiving side of `sink` is gone, no further components are computed.
/// Membership snapshots are only built when there is a sink to receive them.
pub async fn explore_components(
    graph: &Graph,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
    stop: Option<watch::Receiver<bool>>,
) -> Result<ExploreStats> {
    let mut stats = ExploreStats {
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        ..ExploreStats::default()
    };

    if sink.is_none() && stop.is_none() {
        // Nobody observes progress: run both passes in one go.
        let res = scc.compute_scc(graph);
        stats.components = res.components.len();
        stats.cyclic_components = res.cyclic_count();
        stats.completed = true;
        log_summary(&stats);
        return Ok(stats);
    }

    let bound = i64::try_from(graph.max_vertex()).context("vertex bound exceeds i64")?;
    let mut found = scc.discoveries(graph, bound)?;
    let mut membership = vec![None; graph.node_count()];

    emit(&sink, AppEvent::PhaseStarted { name: PHASE.into() }).await;

    loop {
        if stop_requested(&stop) {
            log::info!("stop requested after {} components", stats.components);
            emit(
                &sink,
                AppEvent::Stopped {
                    components_emitted: stats.components,
                },
            )
            .await;
            return Ok(stats);
        }

        let Some(Discovery {
            component,
            root,
            members,
        }) = found.next()
        else {
            break;
        };

        stats.components += 1;
        if graph.is_cyclic_component(&members) {
            stats.cyclic_components += 1;
        }
        log::debug!("component {component} discovered from root {root}: {members:?}");

        if sink.is_some() {
            for &v in members.iter() {
                membership[v] = Some(component);
            }
            let delivered = emit(
                &sink,
                AppEvent::ComponentDiscovered {
                    component,
                    root,
                    members,
                    membership: membership.clone(),
                },
            )
            .await;
            if !delivered {
                log::info!("event receiver dropped; abandoning run");
                return Ok(stats);
            }
        }
        tokio::task::yield_now().await;
    }

    stats.completed = true;
    emit(
        &sink,
        AppEvent::Done {
            total_components: stats.components,
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: PHASE.into() }).await;

    log_summary(&stats);

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok(stats)
}

fn log_summary(stats: &ExploreStats) {
    log::info!(
        "found {} components ({} cyclic) over {} vertices and {} edges",
        stats.components,
        stats.cyclic_components,
        stats.vertices,
        stats.edges
    );
}

fn stop_requested(stop: &Option<watch::Receiver<bool>>) -> bool {
    stop.as_ref().map_or(false, |rx| *rx.borrow())
}

/// Returns false only when a sink exists and its receiver is closed.
async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) -> bool {
    match sink {
        Some(tx) => tx.send(ev).await.is_ok(),
        None => true,
    }
}
