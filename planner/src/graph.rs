//! Ordering-constraint graph utilities.
//!
//! The ordering constraints of a plan form a directed graph over its
//! actions that must stay acyclic at every point of the search. The
//! [`OrderingGraph`] is the sole gate through which edges enter the plan:
//! [`OrderingGraph::insert`] rejects structurally impossible pairs and
//! cycle-creating pairs, so acyclicity holds by construction rather than
//! by repair.
//!
//! All walks are iterative; plan graphs can grow past comfortable
//! call-stack depths.

use indexmap::{IndexMap, IndexSet};

use crate::error::PlanningError;
use crate::plan::ActionId;

#[derive(Debug, Clone)]
pub struct OrderingGraph {
    edges: IndexSet<(ActionId, ActionId)>,
    start: ActionId,
    finish: ActionId,
}

impl OrderingGraph {
    pub fn new(start: ActionId, finish: ActionId) -> Self {
        Self {
            edges: IndexSet::new(),
            start,
            finish,
        }
    }

    /// Try to add the constraint `before < after`. The pair is refused
    /// when it is structurally forbidden (nothing orders after `Finish`
    /// or before `Start`) or when it would close a directed cycle; the
    /// edge set is then left unchanged.
    ///
    /// Returns whether the edge is present afterwards, which is the
    /// success signal threat resolution relies on.
    pub fn insert(&mut self, before: ActionId, after: ActionId) -> bool {
        if !self.can_insert(before, after) {
            return false;
        }
        self.edges.insert((before, after));
        true
    }

    /// Whether [`OrderingGraph::insert`] would report the edge present,
    /// without modifying the graph. The engine uses this to rule out
    /// establisher candidates whose ordering edge the gate would refuse.
    pub fn can_insert(&self, before: ActionId, after: ActionId) -> bool {
        if before == self.finish || after == self.start {
            return false;
        }
        if self.edges.contains(&(before, after)) {
            return true;
        }
        // Adding before -> after closes a cycle iff after already
        // reaches before.
        before != after && !self.reaches(after, before)
    }

    pub fn contains(&self, before: ActionId, after: ActionId) -> bool {
        self.edges.contains(&(before, after))
    }

    pub fn edges(&self) -> impl Iterator<Item = (ActionId, ActionId)> + '_ {
        self.edges.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Full-graph cycle check. Always false for graphs built through
    /// [`OrderingGraph::insert`]; exposed for invariant tests.
    pub fn is_cyclic(&self) -> bool {
        let adjacency = self.adjacency();
        let mut visited: IndexSet<ActionId> = IndexSet::new();
        let mut on_path: IndexSet<ActionId> = IndexSet::new();

        for &root in adjacency.keys() {
            if visited.contains(&root) {
                continue;
            }
            let mut stack: Vec<(ActionId, usize)> = vec![(root, 0)];
            on_path.insert(root);
            while let Some(&(node, next_child)) = stack.last() {
                let child = adjacency
                    .get(&node)
                    .and_then(|children| children.get(next_child))
                    .copied();
                match child {
                    Some(child) => {
                        if let Some(frame) = stack.last_mut() {
                            frame.1 += 1;
                        }
                        if on_path.contains(&child) {
                            return true;
                        }
                        if !visited.contains(&child) {
                            on_path.insert(child);
                            stack.push((child, 0));
                        }
                    }
                    None => {
                        visited.insert(node);
                        on_path.shift_remove(&node);
                        stack.pop();
                    }
                }
            }
        }
        false
    }

    /// Kahn layering over this graph's edges; see [`layers`].
    pub fn layers(&self, nodes: &[ActionId]) -> Result<Vec<Vec<ActionId>>, PlanningError> {
        layers(nodes, self.edges())
    }

    fn adjacency(&self) -> IndexMap<ActionId, Vec<ActionId>> {
        let mut adjacency: IndexMap<ActionId, Vec<ActionId>> = IndexMap::new();
        for &(from, to) in &self.edges {
            adjacency.entry(from).or_default().push(to);
        }
        adjacency
    }

    /// Iterative reachability: is there a directed path `from` ->* `to`?
    fn reaches(&self, from: ActionId, to: ActionId) -> bool {
        let adjacency = self.adjacency();
        let mut pending = vec![from];
        let mut seen: IndexSet<ActionId> = IndexSet::new();
        while let Some(node) = pending.pop() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(children) = adjacency.get(&node) {
                pending.extend(children.iter().copied());
            }
        }
        false
    }
}

/// Topological layering (Kahn's algorithm) of `nodes` under the ordering
/// `edges`. Each wave holds the actions with no remaining unsatisfied
/// predecessors, so waves come out in execution order: the wave holding
/// `Start` first, the wave holding `Finish` last. Actions within a wave
/// are mutually unordered and listed in `nodes` order.
///
/// A non-empty residue with no frontier means a cycle slipped past the
/// insertion gate; that is an invariant violation reported as
/// [`PlanningError::MalformedGraph`].
pub fn layers(
    nodes: &[ActionId],
    edges: impl IntoIterator<Item = (ActionId, ActionId)>,
) -> Result<Vec<Vec<ActionId>>, PlanningError> {
    let mut in_degree: IndexMap<ActionId, usize> =
        nodes.iter().map(|&node| (node, 0)).collect();
    let mut adjacency: IndexMap<ActionId, Vec<ActionId>> = IndexMap::new();
    for (from, to) in edges {
        in_degree.entry(from).or_insert(0);
        *in_degree.entry(to).or_insert(0) += 1;
        adjacency.entry(from).or_default().push(to);
    }

    let mut waves = Vec::new();
    let mut remaining = in_degree.len();
    while remaining > 0 {
        let wave: Vec<ActionId> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&node, _)| node)
            .collect();
        if wave.is_empty() {
            return Err(PlanningError::MalformedGraph);
        }
        for &node in &wave {
            in_degree.shift_remove(&node);
            remaining -= 1;
            if let Some(children) = adjacency.get(&node) {
                for child in children {
                    if let Some(degree) = in_degree.get_mut(child) {
                        *degree -= 1;
                    }
                }
            }
        }
        waves.push(wave);
    }
    Ok(waves)
}
