// Copyright (c) 2021 Andrew Gazelka - All Rights Reserved.
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{
    collections::BinaryHeap,
    fmt::Debug,
    hash::Hash,
    time::{Duration, Instant},
};

use float_ord::FloatOrd;
use indexmap::IndexMap;

use crate::{
    client::{
        pathfind::{
            context::SearchBudget,
            traits::{GoalCheck, Heuristic, Progressor},
            MinHeapNode,
        },
        timing::Increment,
    },
    error::{PathError, Res},
};

/// f-score, then the priority of the edge which reached the node, then
/// insertion order
type Score = (FloatOrd<f64>, u8, u64);

struct NodeRecord<E> {
    /// the cheapest known cost from the start
    g: f64,
    parent: Option<(usize, E)>,
    closed: bool,
}

/// The nodes and edges from start to goal
#[derive(Debug)]
pub struct PathResult<T, E> {
    pub nodes: Vec<T>,
    /// `edges[i]` leads from `nodes[i]` to `nodes[i + 1]`
    pub edges: Vec<E>,
    pub cost: f64,
    pub expansions: usize,
}

/// An A* search which can be spread over many calls.
///
/// Nodes live in an arena indexed by insertion order. Once the search has
/// finished (successfully or not) the state is dropped and any further call
/// reports [`PathError::NoRouteFound`].
pub struct AStar<T, E> {
    state: Option<AStarState<T, E>>,
}

struct AStarState<T, E> {
    nodes: IndexMap<T, NodeRecord<E>>,

    /// The **open set**.
    /// a priority queue of node ids sorted by lowest score
    queue: BinaryHeap<MinHeapNode<usize, Score>>,

    pushes: u64,
    expansions: usize,
    /// time spent searching in slices which have ended
    spent: Duration,
    /// start of the slice running now
    slice: Option<Instant>,
    budget: SearchBudget,
}

impl<T: Hash + Eq, E> AStarState<T, E> {
    fn push(&mut self, idx: usize, f: f64, priority: u8) {
        self.pushes += 1;
        self.queue
            .push(MinHeapNode::new(idx, (FloatOrd(f), priority, self.pushes)));
    }

    fn out_of_budget(&self) -> bool {
        if self.expansions >= self.budget.max_expansions {
            return true;
        }

        let spent = self.spent + self.slice.map_or(Duration::ZERO, |slice| slice.elapsed());
        self.budget
            .max_millis
            .is_some_and(|millis| spent >= Duration::from_millis(millis))
    }

    /// Takes ownership of all nodes and walks parent links back from `goal_idx`
    fn reconstruct(self, goal_idx: usize) -> PathResult<T, E> {
        let expansions = self.expansions;
        let mut entries: Vec<_> = self.nodes.into_iter().map(Some).collect();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut cost = 0.0;

        let mut on_idx = Some(goal_idx);
        while let Some((node, record)) = on_idx.and_then(|idx| entries.get_mut(idx)?.take()) {
            if nodes.is_empty() {
                cost = record.g;
            }

            nodes.push(node);
            on_idx = record.parent.map(|(parent, edge)| {
                edges.push(edge);
                parent
            });
        }

        // we did this in reverse order
        nodes.reverse();
        edges.reverse();

        PathResult {
            nodes,
            edges,
            cost,
            expansions,
        }
    }
}

impl<T: Clone + Hash + Eq + Debug, E> AStar<T, E> {
    pub fn new(init_node: T, budget: SearchBudget) -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(
            init_node,
            NodeRecord {
                g: 0.0,
                parent: None,
                closed: false,
            },
        );

        let mut state = AStarState {
            nodes,
            queue: BinaryHeap::new(),
            pushes: 0,
            expansions: 0,
            spent: Duration::ZERO,
            slice: None,
            budget,
        };
        state.push(0, 0.0, 0);

        Self { state: Some(state) }
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_none()
    }

    pub fn expansions(&self) -> usize {
        self.state.as_ref().map_or(0, |state| state.expansions)
    }

    /// Stop the clock of the running slice. Time between slices does not count
    /// against the budget.
    fn end_slice(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.spent += state.slice.take().map_or(Duration::ZERO, |slice| slice.elapsed());
        }
    }

    fn finish(&mut self, error: PathError) -> Increment<Res<PathResult<T, E>>> {
        self.state = None;
        Increment::Finished(Err(error))
    }

    /// Pop and expand a single node
    pub fn iterate(
        &mut self,
        heuristic: &impl Heuristic<T>,
        progressor: &impl Progressor<T, E>,
        goal_check: &impl GoalCheck<T>,
    ) -> Increment<Res<PathResult<T, E>>> {
        let Some(state) = self.state.as_mut() else {
            return Increment::Finished(Err(PathError::NoRouteFound));
        };

        state.slice.get_or_insert_with(Instant::now);

        let Some(MinHeapNode { contents: idx, .. }) = state.queue.pop() else {
            return self.finish(PathError::NoRouteFound);
        };

        let Some((node, record)) = state.nodes.get_index_mut(idx) else {
            return Increment::InProgress;
        };

        // a stale entry of a node which was reached more cheaply later
        if record.closed {
            return Increment::InProgress;
        }
        record.closed = true;

        if goal_check.is_goal(node) {
            let Some(state) = self.state.take() else {
                return Increment::Finished(Err(PathError::NoRouteFound));
            };
            return Increment::Finished(Ok(state.reconstruct(idx)));
        }

        let popped_g_score = record.g;
        let popped = node.clone();

        if state.out_of_budget() {
            return self.finish(PathError::SearchBudgetExceeded);
        }
        state.expansions += 1;

        for neighbor in progressor.progressions(&popped) {
            let tentative_g_score = popped_g_score + neighbor.cost;
            let h_score = heuristic.heuristic(&neighbor.value);

            let value_idx = match state.nodes.get_full_mut(&neighbor.value) {
                Some((value_idx, _, record)) => {
                    if tentative_g_score >= record.g {
                        continue;
                    }
                    record.g = tentative_g_score;
                    record.parent = Some((idx, neighbor.edge));
                    // re-open so inconsistent but admissible heuristics stay optimal
                    record.closed = false;
                    value_idx
                }
                None => {
                    let record = NodeRecord {
                        g: tentative_g_score,
                        parent: Some((idx, neighbor.edge)),
                        closed: false,
                    };
                    state.nodes.insert_full(neighbor.value, record).0
                }
            };

            state.push(value_idx, tentative_g_score + h_score, neighbor.priority);
        }

        Increment::InProgress
    }

    /// Iterate until the search finishes or `end_at` passes. At least one node
    /// is expanded per call.
    pub fn iterate_until(
        &mut self,
        end_at: Instant,
        heuristic: &impl Heuristic<T>,
        progressor: &impl Progressor<T, E>,
        goal_check: &impl GoalCheck<T>,
    ) -> Increment<Res<PathResult<T, E>>> {
        loop {
            if let Increment::Finished(res) = self.iterate(heuristic, progressor, goal_check) {
                return Increment::Finished(res);
            }

            if Instant::now() >= end_at {
                self.end_slice();
                return Increment::InProgress;
            }
        }
    }

    /// Run the search to completion
    pub fn run(
        &mut self,
        heuristic: &impl Heuristic<T>,
        progressor: &impl Progressor<T, E>,
        goal_check: &impl GoalCheck<T>,
    ) -> Res<PathResult<T, E>> {
        loop {
            if let Increment::Finished(res) = self.iterate(heuristic, progressor, goal_check) {
                return res;
            }
        }
    }
}
