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

use interfaces::types::BlockLocation;
use smallvec::SmallVec;

use crate::client::pathfind::{execution::WorldAction, moves::GraphAction};

/// One edge of a route: the graph action taken and the world actions which
/// carry it out
#[derive(Clone, Debug, PartialEq)]
pub struct RouteEdge {
    pub action: GraphAction,
    pub from: BlockLocation,
    pub to: BlockLocation,
    pub cost: f64,
    pub actions: SmallVec<[WorldAction; 4]>,
}

/// A found route. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    start: BlockLocation,
    edges: Vec<RouteEdge>,
    cost: f64,
}

impl Route {
    pub fn new(start: BlockLocation, edges: Vec<RouteEdge>) -> Self {
        let cost = edges.iter().map(|edge| edge.cost).sum();
        Self { start, edges, cost }
    }

    pub const fn start(&self) -> BlockLocation {
        self.start
    }

    /// where the route ends up
    pub fn end(&self) -> BlockLocation {
        self.edges.last().map_or(self.start, |edge| edge.to)
    }

    pub fn edges(&self) -> &[RouteEdge] {
        &self.edges
    }

    pub const fn cost(&self) -> f64 {
        self.cost
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// every world action in order
    pub fn actions(&self) -> impl Iterator<Item = &WorldAction> {
        self.edges.iter().flat_map(|edge| edge.actions.iter())
    }

    pub fn into_actions(self) -> Vec<WorldAction> {
        self.edges
            .into_iter()
            .flat_map(|edge| edge.actions.into_iter())
            .collect()
    }
}
