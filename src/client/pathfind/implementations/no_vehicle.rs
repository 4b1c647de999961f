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

use interfaces::types::{BlockLocation, BlockLocation2D, ChunkLocation};

use crate::client::pathfind::{
    context::{Costs, PathConfig},
    implementations::PlayerProblem,
    snapshot::EntityState,
    traits::{GoalCheck, Heuristic},
};

/// Standing in the goal block, optionally within some blocks above or below it
#[derive(Clone, Copy, Debug)]
pub struct BlockGoalCheck {
    goal: BlockLocation,
    y_tolerance: u16,
}

impl BlockGoalCheck {
    pub const fn new(goal: BlockLocation) -> Self {
        Self {
            goal,
            y_tolerance: 0,
        }
    }

    pub const fn with_y_tolerance(goal: BlockLocation, y_tolerance: u16) -> Self {
        Self { goal, y_tolerance }
    }
}

impl GoalCheck for BlockGoalCheck {
    fn is_goal(&self, input: &EntityState) -> bool {
        let location = input.location;
        let close_y = location.y.abs_diff(self.goal.y) <= self.y_tolerance;
        close_y && location.x == self.goal.x && location.z == self.goal.z
    }
}

/// Horizontally within a radius of the goal at any height
#[derive(Clone, Copy, Debug)]
pub struct BlockNearGoalCheck {
    goal: BlockLocation2D,
    dist2: f64,
    must_not_hit: bool,
}

impl BlockNearGoalCheck {
    pub const fn new(goal: BlockLocation2D, dist2: f64, must_not_hit: bool) -> Self {
        Self {
            goal,
            dist2,
            must_not_hit,
        }
    }
}

impl GoalCheck for BlockNearGoalCheck {
    fn is_goal(&self, input: &EntityState) -> bool {
        let input = BlockLocation2D::from(input.location);
        let dist2 = input.dist2(self.goal) as f64;
        let same = self.must_not_hit && self.goal == input;
        !same && dist2 <= self.dist2
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChunkGoalCheck {
    goal: ChunkLocation,
}

impl ChunkGoalCheck {
    pub const fn new(goal: ChunkLocation) -> Self {
        Self { goal }
    }
}

impl GoalCheck for ChunkGoalCheck {
    fn is_goal(&self, input: &EntityState) -> bool {
        ChunkLocation::from(input.location) == self.goal
    }
}

/// The cheapest each unit of distance can possibly be under a set of costs
#[derive(Clone, Copy, Debug)]
struct MinCosts {
    straight: f64,
    diagonal: f64,
    up: f64,
    down: f64,
}

impl MinCosts {
    fn new(costs: &Costs) -> Self {
        let diagonal = costs.min_diagonal();
        Self {
            // two diagonals can stand in for two straight moves
            straight: costs.min_straight().min(diagonal),
            diagonal,
            up: costs.min_up(),
            down: costs.min_down(),
        }
    }

    fn octile(&self, dx: u32, dz: u32) -> f64 {
        let (min, max) = if dx < dz { (dx, dz) } else { (dz, dx) };
        self.diagonal
            .mul_add(f64::from(min), self.straight * f64::from(max - min))
    }
}

/// Octile distance in x/z or the cost of the height difference, whichever is larger.
/// Never overestimates.
#[derive(Clone, Copy, Debug)]
pub struct BlockHeuristic {
    goal: BlockLocation,
    /// the goal can be this many blocks off on each horizontal axis
    horizontal_tolerance: u32,
    /// `None` if the height does not matter
    y_tolerance: Option<u16>,
    costs: MinCosts,
}

impl BlockHeuristic {
    pub fn new(goal: BlockLocation, costs: &Costs) -> Self {
        Self {
            goal,
            horizontal_tolerance: 0,
            y_tolerance: Some(0),
            costs: MinCosts::new(costs),
        }
    }

    pub fn with_y_tolerance(goal: BlockLocation, y_tolerance: u16, costs: &Costs) -> Self {
        Self {
            y_tolerance: Some(y_tolerance),
            ..Self::new(goal, costs)
        }
    }

    pub fn near(goal: BlockLocation2D, dist2: f64, costs: &Costs) -> Self {
        Self {
            horizontal_tolerance: num::cast(dist2.max(0.0).sqrt().floor()).unwrap_or(u32::MAX),
            y_tolerance: None,
            ..Self::new(BlockLocation::from(goal), costs)
        }
    }
}

impl Heuristic for BlockHeuristic {
    fn heuristic(&self, input: &EntityState) -> f64 {
        let (dx, _, dz) = input.location.abs_dif(self.goal);
        let dx = dx.saturating_sub(self.horizontal_tolerance);
        let dz = dz.saturating_sub(self.horizontal_tolerance);
        let horizontal = self.costs.octile(dx, dz);

        let vertical = self.y_tolerance.map_or(0.0, |tolerance| {
            let dy = i32::from(self.goal.y) - i32::from(input.location.y);
            let blocks = f64::from(dy.unsigned_abs().saturating_sub(u32::from(tolerance)));
            if dy > 0 {
                blocks * self.costs.up
            } else {
                blocks * self.costs.down
            }
        });

        horizontal.max(vertical)
    }
}

/// Octile distance to the nearest column of a chunk
#[derive(Clone, Copy, Debug)]
pub struct ChunkHeuristic {
    min_x: i32,
    min_z: i32,
    costs: MinCosts,
}

impl ChunkHeuristic {
    pub fn new(goal: ChunkLocation, costs: &Costs) -> Self {
        Self {
            min_x: goal.0 << 4,
            min_z: goal.1 << 4,
            costs: MinCosts::new(costs),
        }
    }
}

/// distance from `value` to the 16 wide range starting at `min`
fn range_dist(value: i32, min: i32) -> u32 {
    let max = min + 15;
    if value < min {
        min.abs_diff(value)
    } else if value > max {
        value.abs_diff(max)
    } else {
        0
    }
}

impl Heuristic for ChunkHeuristic {
    fn heuristic(&self, input: &EntityState) -> f64 {
        let dx = range_dist(input.location.x, self.min_x);
        let dz = range_dist(input.location.z, self.min_z);
        self.costs.octile(dx, dz)
    }
}

pub struct TravelProblem;

pub type TravelNearProblem = PlayerProblem<BlockHeuristic, BlockNearGoalCheck>;
pub type TravelBlockProblem = PlayerProblem<BlockHeuristic, BlockGoalCheck>;
pub type TravelChunkProblem = PlayerProblem<ChunkHeuristic, ChunkGoalCheck>;

impl TravelProblem {
    pub fn navigate_block(
        bot_id: u32,
        start: EntityState,
        goal: BlockLocation,
        config: &PathConfig,
    ) -> TravelBlockProblem {
        let heuristic = BlockHeuristic::new(goal, &config.costs);
        let goal_checker = BlockGoalCheck::new(goal);
        PlayerProblem::new(bot_id, start, heuristic, goal_checker, config.budget)
    }

    pub fn navigate_near_block(
        bot_id: u32,
        start: EntityState,
        goal: BlockLocation2D,
        dist2: f64,
        must_not_hit: bool,
        config: &PathConfig,
    ) -> TravelNearProblem {
        let heuristic = BlockHeuristic::near(goal, dist2, &config.costs);
        let goal_checker = BlockNearGoalCheck::new(goal, dist2, must_not_hit);
        PlayerProblem::new(bot_id, start, heuristic, goal_checker, config.budget)
    }

    pub fn navigate_chunk(
        bot_id: u32,
        start: EntityState,
        goal: ChunkLocation,
        config: &PathConfig,
    ) -> TravelChunkProblem {
        let heuristic = ChunkHeuristic::new(goal, &config.costs);
        let goal_checker = ChunkGoalCheck::new(goal);
        PlayerProblem::new(bot_id, start, heuristic, goal_checker, config.budget)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use interfaces::types::{
        block_data::BlockData, BlockLocation, BlockLocation2D, BlockState, ChunkLocation,
    };
    use more_asserts::assert_le;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{
        client::{
            pathfind::{
                context::{GlobalContext, PathConfig},
                execution::WorldAction,
                implementations::{
                    find_route, find_routes_parallel,
                    no_vehicle::{
                        BlockGoalCheck, BlockHeuristic, BlockNearGoalCheck, ChunkGoalCheck,
                        ChunkHeuristic, TravelProblem,
                    },
                    RouteRequest,
                },
                moves::{GraphAction, Movements},
                snapshot::{EntityState, InventoryState},
                traits::{GoalCheck, Heuristic},
            },
            physics::tools::ToolSet,
        },
        error::PathError,
        storage::blocks::WorldBlocks,
    };

    fn node(location: BlockLocation, blocks: u32) -> EntityState {
        EntityState::new(location, InventoryState::new(blocks, ToolSet::default()))
    }

    /// a stone floor at y = -1 with random stone steps and towers on it
    fn random_world(rng: &mut StdRng) -> WorldBlocks {
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(-4, -1, -4),
            BlockLocation::new(4, -1, 4),
            BlockState::STONE,
        );

        for x in -4..=4 {
            for z in -4..=4 {
                if (x, z) == (0, 0) {
                    continue;
                }
                if rng.gen_bool(0.3) {
                    world.set_block(BlockLocation::new(x, 0, z), BlockState::STONE);
                    if rng.gen_bool(0.3) {
                        world.set_block(BlockLocation::new(x, 1, z), BlockState::STONE);
                    }
                }
            }
        }

        world
    }

    /// the block above the highest stone of a column
    fn standing_spot(world: &WorldBlocks, x: i32, z: i32) -> BlockLocation {
        let mut location = BlockLocation::new(x, 0, z);
        while world.get_block(location) == Some(BlockState::STONE) {
            location = location.above();
        }
        location
    }

    /// The exact cost to the goal from every node reachable from `start`,
    /// by relaxing every edge until nothing changes
    fn exhaustive(
        start: EntityState,
        goal: &impl GoalCheck,
        ctx: &GlobalContext,
    ) -> (Vec<EntityState>, Vec<f64>) {
        let mut index = HashMap::new();
        let mut nodes = vec![start.clone()];
        let mut edges: Vec<Vec<(usize, f64)>> = Vec::new();
        index.insert(start, 0);

        let mut on = 0;
        while on < nodes.len() {
            let mut out = Vec::new();
            for neighbor in Movements::obtain_all(&nodes[on], ctx) {
                let idx = *index.entry(neighbor.value.clone()).or_insert_with(|| {
                    nodes.push(neighbor.value);
                    nodes.len() - 1
                });
                out.push((idx, neighbor.cost));
            }
            edges.push(out);
            on += 1;
        }

        let mut to_goal: Vec<f64> = nodes
            .iter()
            .map(|node| if goal.is_goal(node) { 0.0 } else { f64::INFINITY })
            .collect();

        loop {
            let mut changed = false;
            for (from, out) in edges.iter().enumerate() {
                for &(to, cost) in out {
                    let through = to_goal[to] + cost;
                    if through < to_goal[from] - 1e-9 {
                        to_goal[from] = through;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        (nodes, to_goal)
    }

    #[test]
    fn test_goal_checks() {
        let at = |x, y, z| node(BlockLocation::new(x, y, z), 0);

        let exact = BlockGoalCheck::new(BlockLocation::new(1, 2, 3));
        assert!(exact.is_goal(&at(1, 2, 3)));
        assert!(!exact.is_goal(&at(1, 3, 3)));

        let tolerant = BlockGoalCheck::with_y_tolerance(BlockLocation::new(1, 2, 3), 1);
        assert!(tolerant.is_goal(&at(1, 3, 3)));
        assert!(!tolerant.is_goal(&at(1, 4, 3)));

        let near = BlockNearGoalCheck::new(BlockLocation2D::new(0, 0), 4.0, true);
        assert!(near.is_goal(&at(2, 9, 0)));
        assert!(!near.is_goal(&at(0, 0, 0)));
        assert!(!near.is_goal(&at(2, 0, 1)));

        let chunk = ChunkGoalCheck::new(ChunkLocation(-1, 0));
        assert!(chunk.is_goal(&at(-1, 0, 15)));
        assert!(!chunk.is_goal(&at(0, 0, 15)));
    }

    #[test]
    fn test_heuristic_values() {
        let config = PathConfig::default();
        let costs = &config.costs;

        let heuristic = BlockHeuristic::new(BlockLocation::new(3, 0, 1), costs);
        let expected = costs.block_diagonal + 2.0 * costs.block_walk;
        assert!((heuristic.heuristic(&node(BlockLocation::ZERO, 0)) - expected).abs() < 1e-9);

        // climbing dominates
        let heuristic = BlockHeuristic::new(BlockLocation::new(0, 4, 0), costs);
        let expected = 4.0 * costs.min_up();
        assert!((heuristic.heuristic(&node(BlockLocation::ZERO, 0)) - expected).abs() < 1e-9);

        let near = BlockHeuristic::near(BlockLocation2D::new(5, 0), 4.0, costs);
        let expected = 3.0 * costs.block_walk;
        assert!((near.heuristic(&node(BlockLocation::new(0, 9, 0), 0)) - expected).abs() < 1e-9);

        let chunk = ChunkHeuristic::new(ChunkLocation(1, 0), costs);
        assert!((chunk.heuristic(&node(BlockLocation::new(15, 0, 3), 0)) - 1.0).abs() < 1e-9);
        assert!(chunk.heuristic(&node(BlockLocation::new(20, 0, 3), 0)).abs() < 1e-9);
    }

    #[test]
    fn test_mine_then_pillar() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();

        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(0, -1, 0),
            BlockLocation::new(0, -1, 3),
            BlockState::STONE,
        );
        world.set_block(BlockLocation::new(0, 1, 1), BlockState::SAND);

        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };

        let goal = BlockLocation::new(0, 1, 3);
        let mut problem = TravelProblem::navigate_block(0, node(BlockLocation::ZERO, 0), goal, &config);
        let route = problem.solve(&ctx).unwrap();

        let summary: Vec<_> = route
            .actions()
            .map(|action| match action {
                WorldAction::BlockBreak(action) => ("break", action.mining.location),
                WorldAction::Movement(action) => ("move", action.target),
                WorldAction::BlockPlace(action) => ("place", action.location),
                WorldAction::JumpAndPlaceBelow(action) => ("pillar", action.target),
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("break", BlockLocation::new(0, 1, 1)),
                ("move", BlockLocation::new(0, 0, 1)),
                ("move", BlockLocation::new(0, 0, 2)),
                ("move", BlockLocation::new(0, 0, 3)),
                ("pillar", goal),
            ]
        );

        let costs = &config.costs;
        let sand = 15.0f64.mul_add(costs.mine_per_tick, costs.mine_required);
        let expected = 3.0 * costs.block_walk + sand + costs.pillar;
        assert!((route.cost() - expected).abs() < 1e-9);
        assert_eq!(route.end(), goal);
    }

    /// a pit whose only exit needs the block above the head mined
    fn pit(above_dirt: BlockState) -> WorldBlocks {
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(-2, -1, -2),
            BlockLocation::new(2, -1, 2),
            BlockState::STONE,
        );
        world.fill(
            BlockLocation::new(-1, 0, -1),
            BlockLocation::new(1, 1, 1),
            BlockState::STONE,
        );
        world.set_block(BlockLocation::new(0, 0, 0), BlockState::AIR);
        world.set_block(BlockLocation::new(0, 1, 0), BlockState::AIR);
        world.set_block(BlockLocation::new(1, 1, 0), BlockState::AIR);
        world.set_block(BlockLocation::new(0, 2, 0), BlockState::DIRT);
        world.set_block(BlockLocation::new(0, 3, 0), above_dirt);
        world
    }

    #[test]
    fn test_never_mines_under_a_falling_block() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let goal = BlockGoalCheck::new(BlockLocation::new(1, 1, 0));

        let safe = pit(BlockState::STONE);
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &safe,
        };
        let request = RouteRequest {
            bot_id: 0,
            start: node(BlockLocation::ZERO, 1),
            heuristic: BlockHeuristic::new(BlockLocation::new(1, 1, 0), &config.costs),
            goal,
            budget: config.budget,
        };
        let route = find_route(request, &ctx).unwrap();
        assert!(matches!(
            route.actions().next(),
            Some(WorldAction::BlockBreak(action)) if action.mining.location == BlockLocation::new(0, 2, 0)
        ));

        let unsafe_pit = pit(BlockState::SAND);
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &unsafe_pit,
        };

        // no edge out of the pit, not even Up
        let neighbors = Movements::obtain_all(&node(BlockLocation::ZERO, 1), &ctx);
        assert!(neighbors
            .iter()
            .all(|neighbor| !matches!(neighbor.edge.action, GraphAction::Up(_))));

        let request = RouteRequest {
            bot_id: 0,
            start: node(BlockLocation::ZERO, 1),
            heuristic: BlockHeuristic::new(BlockLocation::new(1, 1, 0), &config.costs),
            goal,
            budget: config.budget,
        };
        assert_matches!(find_route(request, &ctx), Err(PathError::NoRouteFound));
    }

    #[test]
    fn test_optimal_and_admissible_on_small_worlds() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..25 {
            let world = random_world(&mut rng);
            let ctx = GlobalContext {
                path_config: &config,
                block_data: &data,
                world: &world,
            };

            let goal = standing_spot(&world, rng.gen_range(-4..=4), rng.gen_range(-4..=4));
            let heuristic = BlockHeuristic::new(goal, &config.costs);
            let goal_check = BlockGoalCheck::new(goal);
            let start = node(BlockLocation::ZERO, 0);

            let (nodes, to_goal) = exhaustive(start.clone(), &goal_check, &ctx);

            for (node, &exact) in nodes.iter().zip(&to_goal) {
                if exact.is_finite() {
                    assert_le!(heuristic.heuristic(node) - 1e-9, exact, "at {:?}", node.location);
                }
            }

            let mut problem = TravelProblem::navigate_block(0, start, goal, &config);
            match problem.solve(&ctx) {
                Ok(route) => assert!(
                    (route.cost() - to_goal[0]).abs() < 1e-9,
                    "{} != {} to {goal}",
                    route.cost(),
                    to_goal[0]
                ),
                Err(err) => {
                    assert_eq!(err, PathError::NoRouteFound);
                    assert!(to_goal[0].is_infinite());
                }
            }
        }
    }

    #[test]
    fn test_blocks_are_never_overspent() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
            // a broken bridge
            for z in 0..=6 {
                if z == 0 || rng.gen_bool(0.4) {
                    world.set_block(BlockLocation::new(0, -1, z), BlockState::STONE);
                }
            }
            world.set_block(BlockLocation::new(0, -1, 6), BlockState::STONE);

            let ctx = GlobalContext {
                path_config: &config,
                block_data: &data,
                world: &world,
            };

            let blocks = rng.gen_range(0..4);
            let start = node(BlockLocation::ZERO, blocks);
            let goal = BlockLocation::new(0, 0, 6);

            let mut problem = TravelProblem::navigate_block(0, start.clone(), goal, &config);
            let Ok(route) = problem.solve(&ctx) else {
                continue;
            };

            let mut placed = 0;
            let end = route.actions().try_fold(start.clone(), |node, action| {
                if matches!(action, WorldAction::BlockPlace(_) | WorldAction::JumpAndPlaceBelow(_)) {
                    placed += 1;
                }
                action.simulate(&node)
            });

            let end = end.unwrap();
            assert_le!(placed, blocks);
            assert_eq!(end.location, goal);
            assert_eq!(end.inventory.blocks(), blocks - placed);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let world = WorldBlocks::flat();
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };

        let goals: Vec<_> = (0..8).map(|i| BlockLocation::new(i * 3 - 10, 0, 12 - i * 2)).collect();
        let requests = |goals: &[BlockLocation]| -> Vec<_> {
            goals
                .iter()
                .enumerate()
                .map(|(bot_id, &goal)| RouteRequest {
                    bot_id: bot_id as u32,
                    start: node(BlockLocation::ZERO, 0),
                    heuristic: BlockHeuristic::new(goal, &config.costs),
                    goal: BlockGoalCheck::new(goal),
                    budget: config.budget,
                })
                .collect()
        };

        let parallel = find_routes_parallel(requests(&goals), &ctx);
        let sequential: Vec<_> = requests(&goals)
            .into_iter()
            .map(|request| find_route(request, &ctx))
            .collect();

        assert_eq!(parallel.len(), goals.len());
        for ((parallel, sequential), goal) in parallel.iter().zip(&sequential).zip(&goals) {
            let parallel = parallel.as_ref().unwrap();
            let sequential = sequential.as_ref().unwrap();
            assert_eq!(parallel.end(), *goal);
            assert!((parallel.cost() - sequential.cost()).abs() < 1e-9);
        }
    }
}
