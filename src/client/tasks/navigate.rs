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

use interfaces::types::{BlockLocation, BlockLocation2D, ChunkLocation};
use tracing::{debug, warn};

use crate::{
    client::{
        follow::{Progress, RouteExecutor},
        pathfind::{
            context::PathConfig,
            implementations::{
                no_vehicle::{
                    BlockGoalCheck, BlockHeuristic, BlockNearGoalCheck, ChunkGoalCheck,
                    ChunkHeuristic, TravelProblem,
                },
                PlayerProblem, Problem,
            },
            traits::{GoalCheck, Heuristic},
        },
        state::{global::GlobalState, local::LocalState},
        tasks::TaskTrait,
        timing::Increment,
    },
    error::{PathError, Res},
    protocol::InterfaceOut,
};

pub type ChunkTravelTask = NavigateTask<ChunkHeuristic, ChunkGoalCheck>;
pub type BlockTravelTask = NavigateTask<BlockHeuristic, BlockGoalCheck>;
pub type BlockTravelNearTask = NavigateTask<BlockHeuristic, BlockNearGoalCheck>;

impl ChunkTravelTask {
    pub fn new(goal: ChunkLocation, local: &LocalState, config: &PathConfig) -> Self {
        TravelProblem::navigate_chunk(local.bot_id, local.entity_state(), goal, config).into()
    }
}

impl BlockTravelTask {
    pub fn new(goal: BlockLocation, local: &LocalState, config: &PathConfig) -> Self {
        TravelProblem::navigate_block(local.bot_id, local.entity_state(), goal, config).into()
    }
}

impl BlockTravelNearTask {
    pub fn new(
        goal: BlockLocation2D,
        dist2: f64,
        must_not_hit: bool,
        local: &LocalState,
        config: &PathConfig,
    ) -> Self {
        let start = local.entity_state();
        TravelProblem::navigate_near_block(local.bot_id, start, goal, dist2, must_not_hit, config)
            .into()
    }
}

/// Plan a route and follow it, planning again from wherever the bot ended up
/// when following fails.
pub struct NavigateTask<H, G> {
    calculate: bool,
    problem: Box<PlayerProblem<H, G>>,
    executor: Option<RouteExecutor>,
    replans: usize,
    outcome: Option<Res>,
}

impl<H, G> From<PlayerProblem<H, G>> for NavigateTask<H, G> {
    fn from(problem: PlayerProblem<H, G>) -> Self {
        Self {
            calculate: true,
            problem: Box::new(problem),
            executor: None,
            replans: 0,
            outcome: None,
        }
    }
}

impl<H, G> NavigateTask<H, G> {
    pub const fn outcome(&self) -> Option<Res> {
        self.outcome
    }

    pub const fn replans(&self) -> usize {
        self.replans
    }

    pub const fn is_calculating(&self) -> bool {
        self.calculate
    }

    pub fn abort(&mut self, out: &mut impl InterfaceOut, local: &LocalState) {
        if let Some(executor) = self.executor.as_mut() {
            executor.abort(out, local);
        }
        self.calculate = false;
        self.outcome.get_or_insert(Err(PathError::Aborted));
    }
}

impl<H: Heuristic + Send + Sync, G: GoalCheck + Send + Sync> TaskTrait for NavigateTask<H, G> {
    fn tick(
        &mut self,
        out: &mut impl InterfaceOut,
        local: &mut LocalState,
        global: &mut GlobalState,
    ) -> bool {
        if self.outcome.is_some() {
            return true;
        }

        let Some(executor) = self.executor.as_mut() else {
            return false;
        };

        match executor.tick(out, local, &global.blocks) {
            Progress::InProgress => false,
            Progress::Finished => {
                debug!(bot_id = local.bot_id, replans = self.replans, "arrived");
                self.outcome = Some(Ok(()));
                true
            }
            Progress::Failed(err) => {
                self.executor = None;

                if self.replans >= global.path_config.max_replans {
                    warn!(bot_id = local.bot_id, %err, "giving up");
                    self.outcome = Some(Err(err));
                    return true;
                }

                self.replans += 1;
                warn!(bot_id = local.bot_id, %err, replans = self.replans, "replanning");
                self.problem.recalc(local.entity_state());
                self.calculate = true;
                false
            }
        }
    }

    fn expensive(&mut self, end_at: Instant, _local: &LocalState, global: &GlobalState) {
        if !self.calculate {
            return;
        }

        match self.problem.iterate_until(end_at, &global.context()) {
            Increment::Finished(Ok(route)) => {
                self.calculate = false;
                self.executor = Some(RouteExecutor::new(route));
            }
            Increment::Finished(Err(err)) => {
                self.calculate = false;
                self.outcome = Some(Err(err));
            }

            // Nothing as we are still in progress
            Increment::InProgress => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use assert_matches::assert_matches;
    use interfaces::types::{BlockLocation, Location};

    use crate::{
        client::{
            pathfind::{
                context::{PathConfig, SearchBudget},
                execution::movement::MovementAction,
            },
            state::{global::GlobalState, local::LocalState},
            tasks::{navigate::BlockTravelTask, Task, TaskTrait},
        },
        error::PathError,
        protocol::Command,
        storage::blocks::WorldBlocks,
    };

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(10)
    }

    /// a bot which never moves times out on its first movement
    fn time_out(task: &mut Task, local: &mut LocalState, global: &mut GlobalState) -> bool {
        let mut out: Vec<Command> = Vec::new();
        for _ in 0..MovementAction::ALLOWED_TICKS {
            assert!(!task.tick(&mut out, local, global));
        }
        task.tick(&mut out, local, global)
    }

    #[test]
    fn test_replans_until_limit() {
        let config = PathConfig {
            max_replans: 1,
            ..PathConfig::default()
        };
        let mut global = GlobalState::new(WorldBlocks::flat(), config).unwrap();
        let mut local = LocalState::new(0, Location::new(0.5, 0.0, 0.5));

        let goal = BlockLocation::new(0, 0, 3);
        let mut task = Task::from(BlockTravelTask::new(goal, &local, &global.path_config));

        // nothing to follow until the route has been found
        assert!(!task.tick(&mut Vec::<Command>::new(), &mut local, &mut global));
        task.expensive(deadline(), &local, &global);

        assert!(!time_out(&mut task, &mut local, &mut global));
        let Task::BlockTravelTask(inner) = &task else {
            unreachable!()
        };
        assert_eq!(inner.replans(), 1);
        assert!(inner.is_calculating());

        task.expensive(deadline(), &local, &global);
        assert!(time_out(&mut task, &mut local, &mut global));
        assert_eq!(task.outcome(), Some(Err(PathError::ActionTimedOut(0))));
    }

    #[test]
    fn test_search_failure_ends_task() {
        let config = PathConfig {
            budget: SearchBudget::expansions(50),
            ..PathConfig::default()
        };
        let mut global = GlobalState::new(WorldBlocks::flat(), config).unwrap();
        let mut local = LocalState::new(0, Location::new(0.5, 0.0, 0.5));

        let goal = BlockLocation::new(1000, 0, 0);
        let mut task = BlockTravelTask::new(goal, &local, &global.path_config);
        task.expensive(deadline(), &local, &global);

        assert!(task.tick(&mut Vec::<Command>::new(), &mut local, &mut global));
        assert_matches!(task.outcome(), Some(Err(PathError::SearchBudgetExceeded)));
    }
}
