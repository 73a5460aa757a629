use crate::domain::error::SccError;
use crate::domain::graph::Graph;
use crate::domain::model::{ComponentId, Discovery, SccEvent, SccResult};
use crate::domain::traits::SccDetector;

pub struct KosarajuSccDetector;

impl KosarajuSccDetector {
    /// Starts a lazy Kosaraju run over `graph`.
    ///
    /// `max_vertex` must agree with the bound the graph was built with. Nothing
    /// is computed until the first event is pulled, and dropping the returned
    /// iterator abandons the run.
    pub fn find_components<'g>(
        &self,
        graph: &'g Graph,
        max_vertex: i64,
    ) -> Result<ComponentSteps<'g>, SccError> {
        if max_vertex < 0 {
            return Err(SccError::InvalidInput(format!(
                "vertex bound must be non-negative, got {max_vertex}"
            )));
        }
        if usize::try_from(max_vertex).ok() != Some(graph.max_vertex()) {
            return Err(SccError::InvalidInput(format!(
                "vertex bound {max_vertex} does not match graph bound {}",
                graph.max_vertex()
            )));
        }
        Ok(ComponentSteps::new(graph))
    }
}

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult {
        kosaraju_scc(graph)
    }

    fn discoveries<'g>(
        &self,
        graph: &'g Graph,
        max_vertex: i64,
    ) -> Result<Box<dyn Iterator<Item = Discovery> + 'g>, SccError> {
        let steps = self.find_components(graph, max_vertex)?;
        Ok(Box::new(steps.into_discoveries()))
    }
}

/// Pull-based Kosaraju run: one `ComponentSnapshot` per component in pass-2
/// discovery order, then a single `Done`, then `None` forever.
#[derive(Debug)]
pub struct ComponentSteps<'g> {
    graph: &'g Graph,
    // Finish stack from pass 1; popping from the back walks it in reverse.
    finish_stack: Option<Vec<usize>>,
    visited: Vec<bool>,
    membership: Vec<Option<ComponentId>>,
    count: usize,
    done: bool,
}

impl<'g> ComponentSteps<'g> {
    /// Unchecked constructor; `KosarajuSccDetector::find_components` validates
    /// the vertex bound first.
    pub(crate) fn new(graph: &'g Graph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            finish_stack: None,
            visited: vec![false; n],
            membership: vec![None; n],
            count: 0,
            done: false,
        }
    }

    /// Components emitted so far.
    pub fn emitted(&self) -> usize {
        self.count
    }

    pub fn membership(&self) -> &[Option<ComponentId>] {
        &self.membership
    }

    /// Same run, yielding components without cloning membership per step.
    pub fn into_discoveries(self) -> Discoveries<'g> {
        Discoveries(self)
    }

    /// Advances pass 2 by one component without snapshotting membership.
    fn next_component(&mut self) -> Option<Discovery> {
        let graph = self.graph;
        let stack = self.finish_stack.get_or_insert_with(|| finish_order(graph));

        while let Some(root) = stack.pop() {
            if self.visited[root] {
                continue;
            }

            let members = collect_component(root, graph, &mut self.visited);
            let component = ComponentId(self.count);
            for &m in members.iter() {
                self.membership[m] = Some(component);
            }
            self.count += 1;

            log::trace!(
                "component {component}: root={root} size={}",
                members.len()
            );
            return Some(Discovery {
                component,
                root,
                members,
            });
        }

        None
    }
}

impl Iterator for ComponentSteps<'_> {
    type Item = SccEvent;

    fn next(&mut self) -> Option<SccEvent> {
        if self.done {
            return None;
        }

        if let Some(Discovery {
            component,
            root,
            members,
        }) = self.next_component()
        {
            return Some(SccEvent::ComponentSnapshot {
                component,
                root,
                members,
                membership: self.membership.clone(),
            });
        }

        self.done = true;
        Some(SccEvent::Done {
            total_components: self.count,
        })
    }
}

impl std::iter::FusedIterator for ComponentSteps<'_> {}

/// Snapshot-free view of a `ComponentSteps` run; ends after the last component.
#[derive(Debug)]
pub struct Discoveries<'g>(ComponentSteps<'g>);

impl Iterator for Discoveries<'_> {
    type Item = Discovery;

    fn next(&mut self) -> Option<Discovery> {
        self.0.next_component()
    }
}

impl std::iter::FusedIterator for Discoveries<'_> {}

fn kosaraju_scc(graph: &Graph) -> SccResult {
    let n = graph.node_count();
    let mut component_of = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();

    let mut steps = ComponentSteps::new(graph);
    while let Some(Discovery {
        component,
        mut members,
        ..
    }) = steps.next_component()
    {
        for &v in members.iter() {
            component_of[v] = component.0;
        }
        members.sort_unstable();
        components.push(members);
    }

    let cyclic_component = components
        .iter()
        .map(|comp| graph.is_cyclic_component(comp))
        .collect();

    SccResult {
        component_of,
        components,
        cyclic_component,
    }
}

/// Pass 1: post-order over forward edges, roots tried in increasing order.
fn finish_order(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut seen = vec![false; n];

    for start in 0..n {
        if seen[start] {
            continue;
        }
        iterative_finish_order(start, graph, &mut seen, &mut order);
    }

    order
}

fn iterative_finish_order(start: usize, graph: &Graph, seen: &mut [bool], order: &mut Vec<usize>) {
    let mut stack: Vec<(usize, usize)> = Vec::new();
    stack.push((start, 0));

    while let Some((v, next_i)) = stack.pop() {
        if !seen[v] {
            seen[v] = true;
        }

        let outs = graph.forward_neighbors(v);
        if next_i < outs.len() {
            let to = outs[next_i];
            stack.push((v, next_i + 1));
            if !seen[to] {
                stack.push((to, 0));
            }
            continue;
        }

        order.push(v);
    }
}

/// Pass 2: pre-order over reverse edges from `root`, skipping assigned vertices.
fn collect_component(root: usize, graph: &Graph, visited: &mut [bool]) -> Vec<usize> {
    let mut members = vec![root];
    visited[root] = true;

    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    while let Some(frame) = stack.last_mut() {
        let (v, next_i) = *frame;
        let preds = graph.reverse_neighbors(v);
        if next_i == preds.len() {
            stack.pop();
            continue;
        }

        frame.1 += 1;
        let p = preds[next_i];
        if !visited[p] {
            visited[p] = true;
            members.push(p);
            stack.push((p, 0));
        }
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components_of(events: &[SccEvent]) -> Vec<Vec<usize>> {
        events
            .iter()
            .filter_map(|ev| match ev {
                SccEvent::ComponentSnapshot { members, .. } => Some(members.clone()),
                SccEvent::Done { .. } => None,
            })
            .collect()
    }

    #[test]
    fn finish_order_matches_recursive_post_order() {
        // 0 -> 1 -> 2, 0 -> 3, 2 -> 0
        let g = Graph::build(3, &[(0, 1), (1, 2), (0, 3), (2, 0)]).expect("build");
        assert_eq!(finish_order(&g), vec![2, 1, 3, 0]);
    }

    #[test]
    fn collect_component_is_pre_order_on_reverse_edges() {
        // reverse adjacency of 0 is [2, 1]; 2's is [1]
        let g = Graph::build(2, &[(2, 0), (1, 0), (1, 2), (0, 1)]).expect("build");
        let mut visited = vec![false; 3];
        assert_eq!(collect_component(0, &g, &mut visited), vec![0, 2, 1]);
        assert!(visited.iter().all(|&b| b));
    }

    #[test]
    fn collect_component_skips_already_assigned() {
        let g = Graph::build(2, &[(1, 0), (2, 1)]).expect("build");
        let mut visited = vec![false, true, false];
        assert_eq!(collect_component(0, &g, &mut visited), vec![0]);
    }

    #[test]
    fn steps_emit_snapshots_then_done_then_end() {
        let g = Graph::build(2, &[(0, 1), (1, 0)]).expect("build");
        let mut steps = KosarajuSccDetector.find_components(&g, 2).expect("find");

        let first = steps.next().expect("first");
        match first {
            SccEvent::ComponentSnapshot {
                component,
                root,
                members,
                membership,
            } => {
                assert_eq!(component, ComponentId(0));
                assert_eq!(root, 2);
                assert_eq!(members, vec![2]);
                assert_eq!(membership, vec![None, None, Some(ComponentId(0))]);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let second = steps.next().expect("second");
        match second {
            SccEvent::ComponentSnapshot { members, membership, .. } => {
                assert_eq!(members, vec![0, 1]);
                assert_eq!(
                    membership,
                    vec![
                        Some(ComponentId(1)),
                        Some(ComponentId(1)),
                        Some(ComponentId(0))
                    ]
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert_eq!(steps.next(), Some(SccEvent::Done { total_components: 2 }));
        assert_eq!(steps.next(), None);
        assert_eq!(steps.next(), None);
        assert_eq!(steps.emitted(), 2);
    }

    #[test]
    fn early_abandonment_leaves_rest_unassigned() {
        let g = Graph::build(3, &[]).expect("build");
        let mut steps = KosarajuSccDetector.find_components(&g, 3).expect("find");
        steps.next().expect("first");

        assert_eq!(steps.emitted(), 1);
        assert_eq!(
            steps.membership().iter().filter(|m| m.is_some()).count(),
            1
        );
    }

    #[test]
    fn discoveries_follow_snapshot_order_without_done() {
        let g = Graph::build(3, &[(0, 1), (1, 0), (2, 3)]).expect("build");
        let det = KosarajuSccDetector;

        let snapshots: Vec<(ComponentId, usize, Vec<usize>)> = det
            .find_components(&g, 3)
            .expect("find")
            .filter_map(|ev| match ev {
                SccEvent::ComponentSnapshot {
                    component,
                    root,
                    members,
                    ..
                } => Some((component, root, members)),
                SccEvent::Done { .. } => None,
            })
            .collect();

        let mut found = det.discoveries(&g, 3).expect("discoveries");
        let discovered: Vec<(ComponentId, usize, Vec<usize>)> = found
            .by_ref()
            .map(|d| (d.component, d.root, d.members))
            .collect();

        assert_eq!(discovered, snapshots);
        assert!(found.next().is_none());
    }

    #[test]
    fn discoveries_validate_the_bound() {
        let g = Graph::build(2, &[]).expect("build");
        let det = KosarajuSccDetector;

        assert!(matches!(det.discoveries(&g, -1), Err(SccError::InvalidInput(_))));
        assert!(matches!(det.discoveries(&g, 4), Err(SccError::InvalidInput(_))));
    }

    #[test]
    fn find_components_rejects_bad_bounds() {
        let g = Graph::build(2, &[]).expect("build");
        let det = KosarajuSccDetector;

        assert!(matches!(
            det.find_components(&g, -1),
            Err(SccError::InvalidInput(_))
        ));
        assert!(matches!(
            det.find_components(&g, 5),
            Err(SccError::InvalidInput(_))
        ));
    }

    #[test]
    fn single_vertex_graph_has_one_component() {
        let g = Graph::build(0, &[]).expect("build");
        let events: Vec<SccEvent> = KosarajuSccDetector.find_components(&g, 0).expect("find").collect();

        assert_eq!(components_of(&events), vec![vec![0]]);
        assert_eq!(events.last(), Some(&SccEvent::Done { total_components: 1 }));
    }

    #[test]
    fn compute_scc_flags_multi_vertex_and_self_loop_components() {
        // 0 <-> 1, 2 -> 2, 3 alone
        let g = Graph::build(3, &[(0, 1), (1, 0), (2, 2)]).expect("build");
        let scc = KosarajuSccDetector.compute_scc(&g);

        assert_eq!(scc.components.len(), 3);
        for (cid, comp) in scc.components.iter().enumerate() {
            let expected = comp.len() > 1 || comp == &vec![2];
            assert_eq!(scc.cyclic_component[cid], expected);
            for &v in comp {
                assert_eq!(scc.component_of[v], cid);
            }
        }
        assert_eq!(scc.cyclic_count(), 2);
    }
}
