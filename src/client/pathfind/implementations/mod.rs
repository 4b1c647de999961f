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

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    client::{
        pathfind::{
            context::{GlobalContext, SearchBudget},
            incremental::{AStar, PathResult},
            moves::Movements,
            route::{Route, RouteEdge},
            snapshot::EntityState,
            traits::{GoalCheck, Heuristic, Neighbor, Progressor},
        },
        timing::Increment,
    },
    error::Res,
};

pub mod no_vehicle;

pub trait Problem: Send + Sync {
    fn iterate_until(&mut self, end_at: Instant, ctx: &GlobalContext) -> Increment<Res<Route>>;
    /// start over from a new node
    fn recalc(&mut self, start: EntityState);
}

pub struct PlayerProblem<H, G> {
    bot_id: u32,
    a_star: AStar<EntityState, RouteEdge>,
    heuristic: H,
    goal_checker: G,
    budget: SearchBudget,
}

impl<H: Heuristic + Send + Sync, G: GoalCheck + Send + Sync> PlayerProblem<H, G> {
    pub fn new(bot_id: u32, start: EntityState, heuristic: H, goal_checker: G, budget: SearchBudget) -> Self {
        let a_star = AStar::new(start, budget);
        Self {
            bot_id,
            a_star,
            heuristic,
            goal_checker,
            budget,
        }
    }

    /// Run the whole search now
    pub fn solve(&mut self, ctx: &GlobalContext) -> Res<Route> {
        let progressor = GenericProgressor { ctx: *ctx };
        let res = self
            .a_star
            .run(&self.heuristic, &progressor, &self.goal_checker);
        self.conclude(res)
    }

    fn conclude(&self, res: Res<PathResult<EntityState, RouteEdge>>) -> Res<Route> {
        match res {
            Ok(result) => {
                let start = result
                    .nodes
                    .first()
                    .map(|node| node.location)
                    .unwrap_or_default();
                let route = Route::new(start, result.edges);
                debug!(
                    bot_id = self.bot_id,
                    expansions = result.expansions,
                    cost = route.cost(),
                    edges = route.edges().len(),
                    "found route"
                );
                Ok(route)
            }
            Err(err) => {
                warn!(bot_id = self.bot_id, %err, "search failed");
                Err(err)
            }
        }
    }
}

#[derive(Clone, Copy)]
struct GenericProgressor<'a> {
    ctx: GlobalContext<'a>,
}

impl Progressor<EntityState, RouteEdge> for GenericProgressor<'_> {
    fn progressions(&self, input: &EntityState) -> Vec<Neighbor<EntityState, RouteEdge>> {
        Movements::obtain_all(input, &self.ctx)
    }
}

impl<H: Heuristic + Send + Sync, G: GoalCheck + Send + Sync> Problem for PlayerProblem<H, G> {
    fn iterate_until(&mut self, end_at: Instant, ctx: &GlobalContext) -> Increment<Res<Route>> {
        let progressor = GenericProgressor { ctx: *ctx };
        match self
            .a_star
            .iterate_until(end_at, &self.heuristic, &progressor, &self.goal_checker)
        {
            Increment::Finished(res) => Increment::Finished(self.conclude(res)),
            Increment::InProgress => Increment::InProgress,
        }
    }

    fn recalc(&mut self, start: EntityState) {
        debug!(bot_id = self.bot_id, location = %start.location, "recalculating");
        self.a_star = AStar::new(start, self.budget);
    }
}

/// Everything needed to plan one bot's route
pub struct RouteRequest<H, G> {
    /// opaque id, only used for logging
    pub bot_id: u32,
    pub start: EntityState,
    pub heuristic: H,
    pub goal: G,
    pub budget: SearchBudget,
}

pub fn find_route<H, G>(request: RouteRequest<H, G>, ctx: &GlobalContext) -> Res<Route>
where
    H: Heuristic + Send + Sync,
    G: GoalCheck + Send + Sync,
{
    let RouteRequest {
        bot_id,
        start,
        heuristic,
        goal,
        budget,
    } = request;

    debug!(bot_id, location = %start.location, "searching");
    PlayerProblem::new(bot_id, start, heuristic, goal, budget).solve(ctx)
}

/// Plan independent bots at the same time. Results are in request order.
pub fn find_routes_parallel<H, G>(requests: Vec<RouteRequest<H, G>>, ctx: &GlobalContext) -> Vec<Res<Route>>
where
    H: Heuristic + Send + Sync,
    G: GoalCheck + Send + Sync,
{
    requests
        .into_par_iter()
        .map(|request| find_route(request, ctx))
        .collect()
}
