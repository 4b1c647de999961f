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

//! A local stand-in for a server: applies a bot's commands to a world and
//! moves it with [`Physics`]. Routes can be dry-run against it end to end.

use std::time::{Duration, Instant};

use interfaces::{
    types::{block_data::BlockData, BlockKind, BlockLocation, BlockState},
    BlockAccess,
};
use tracing::trace;

use crate::{
    client::{
        follow::Session,
        physics::Physics,
        state::{
            global::GlobalState,
            local::{inventory::PlayerInventory, LocalState},
        },
        tasks::TaskTrait,
    },
    protocol::{Command, ControlState, Mine},
    storage::blocks::WorldBlocks,
};

/// how long [`SimulatedSession::run_task`] lets a task search per tick
const EXPENSIVE_MILLIS: u64 = 50;

#[derive(Debug, Clone)]
pub struct SimulatedBot {
    physics: Physics,
    inventory: PlayerInventory,
    control: ControlState,
    /// the block being mined and the tick mining started on
    digging: Option<(BlockLocation, usize)>,
    ticks: usize,
}

impl SimulatedBot {
    pub fn new(local: &LocalState) -> Self {
        Self {
            physics: Physics::new(local.location),
            inventory: local.inventory.clone(),
            control: ControlState::default(),
            digging: None,
            ticks: local.ticks,
        }
    }

    pub const fn physics(&self) -> &Physics {
        &self.physics
    }

    pub const fn inventory(&self) -> &PlayerInventory {
        &self.inventory
    }

    /// Apply the commands issued during a tick, in order
    pub fn apply(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
        world: &mut WorldBlocks,
        data: &BlockData,
    ) {
        for command in commands {
            match command {
                Command::Control(control) => self.control = control,
                Command::ChangeSlot(idx) => self.inventory.set_selected(idx),
                Command::Mine(location, Mine::Start, _) => self.digging = Some((location, self.ticks)),
                Command::Mine(_, Mine::Cancel, _) => self.digging = None,
                Command::Mine(location, Mine::Finished, _) => self.finish_mining(location, world, data),
                Command::Place(against, face) => self.place(against, against + face.change(), world),
            }
        }
    }

    fn finish_mining(&mut self, location: BlockLocation, world: &mut WorldBlocks, data: &BlockData) {
        let Some((digging, since)) = self.digging.take() else {
            trace!(%location, "finished mining without starting");
            return;
        };

        let Some(block) = world
            .get_block(location)
            .and_then(|state| data.by_id(state.id()))
        else {
            return;
        };

        let needed = self.inventory.current_tool().break_ticks(block);
        let elapsed = self.ticks - since;

        let done = needed.is_some_and(|needed| elapsed >= needed as usize);
        if digging != location || !done {
            trace!(%location, elapsed, ?needed, "mining rejected");
            return;
        }

        for &id in &block.drops {
            let kind = BlockKind(id);
            if kind.placeable() {
                self.inventory.add_item(kind, 1);
            }
        }

        world.set_block(location, BlockState::AIR);
        Self::settle(location, world, data);
    }

    /// blocks with gravity fall into the gap left at `location`
    fn settle(mut location: BlockLocation, world: &mut WorldBlocks, data: &BlockData) {
        while let Some(above) = world.get_block(location.above()) {
            let falls = data.by_id(above.id()).is_some_and(|block| block.gravity);
            if !falls {
                break;
            }

            world.set_block(location, above);
            world.set_block(location.above(), BlockState::AIR);
            location = location.above();
        }
    }

    fn place(&mut self, against: BlockLocation, location: BlockLocation, world: &mut WorldBlocks) {
        let valid = world.block_state(against).is_some_and(|state| state.full_block())
            && world.block_state(location).is_some_and(|state| state.passable());

        if !valid || !self.inventory.selected_item().is_some_and(|stack| stack.kind.placeable()) {
            trace!(%location, "placement rejected");
            return;
        }

        if let Some(kind) = self.inventory.take_selected() {
            world.set_block(location, BlockState::from(kind.id(), 0));
        }
    }

    /// advance physics one tick using the held controls
    pub fn step(&mut self, world: &WorldBlocks) {
        self.physics.tick(self.control, world);
        self.ticks += 1;
    }

    /// report what the bot now knows about itself
    pub fn sync(&self, local: &mut LocalState) {
        local.location = self.physics.location();
        local.on_ground = self.physics.on_ground();
        local.inventory = self.inventory.clone();
        local.ticks = self.ticks;
    }
}

/// One simulated bot in its own world
pub struct SimulatedSession {
    pub bot: SimulatedBot,
    pub local: LocalState,
    pub global: GlobalState,
    commands: Vec<Command>,
}

impl SimulatedSession {
    pub fn new(local: LocalState, global: GlobalState) -> Self {
        Self {
            bot: SimulatedBot::new(&local),
            local,
            global,
            commands: Vec::new(),
        }
    }

    /// Run `task` until it is done or `max_ticks` pass, returning whether it
    /// finished
    pub fn run_task(&mut self, task: &mut impl TaskTrait, max_ticks: usize) -> bool {
        for _ in 0..max_ticks {
            let end_at = Instant::now() + Duration::from_millis(EXPENSIVE_MILLIS);
            task.expensive(end_at, &self.local, &self.global);

            let done = task.tick(&mut self.commands, &mut self.local, &mut self.global);
            self.end_tick();

            if done {
                return true;
            }
        }

        false
    }
}

impl Session for SimulatedSession {
    type Out = Vec<Command>;
    type World = WorldBlocks;

    fn parts(&mut self) -> (&mut Self::Out, &mut LocalState, &Self::World) {
        (&mut self.commands, &mut self.local, &self.global.blocks)
    }

    fn end_tick(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        self.bot
            .apply(commands, &mut self.global.blocks, &self.global.block_data);
        self.bot.step(&self.global.blocks);
        self.bot.sync(&mut self.local);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use assert_matches::assert_matches;
    use interfaces::types::{
        block_data::BlockData, BlockKind, BlockLocation, BlockState, ChunkLocation, Face,
    };

    use crate::{
        client::{
            bot::{SimulatedBot, SimulatedSession},
            follow::execute,
            pathfind::{context::PathConfig, implementations::no_vehicle::TravelProblem},
            state::{
                global::GlobalState,
                local::{inventory::ItemStack, LocalState},
            },
            tasks::{navigate::BlockTravelTask, TaskTrait},
        },
        protocol::{Command, Mine},
        storage::blocks::WorldBlocks,
    };

    /// a one block wide stone strip with sand in the way at head height
    fn strip() -> WorldBlocks {
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(0, -1, 0),
            BlockLocation::new(0, -1, 3),
            BlockState::STONE,
        );
        world.set_block(BlockLocation::new(0, 1, 1), BlockState::SAND);
        world
    }

    fn session(world: WorldBlocks) -> SimulatedSession {
        let global = GlobalState::new(world, PathConfig::default()).unwrap();
        let local = LocalState::new(0, BlockLocation::ZERO.center_bottom());
        SimulatedSession::new(local, global)
    }

    #[tokio::test]
    async fn test_route_runs_in_simulation() {
        let mut session = session(strip());
        let goal = BlockLocation::new(0, 1, 3);

        let route = {
            let start = session.local.entity_state();
            let mut problem =
                TravelProblem::navigate_block(0, start, goal, &session.global.path_config);
            problem.solve(&session.global.context()).unwrap()
        };

        let ticks = tokio_stream::iter(0..2_000);
        let res = execute(route, &mut session, ticks).await;
        assert_matches!(res, Ok(()));

        assert_eq!(session.local.block_location(), goal);
        assert!(session.local.on_ground);

        // the sand which was mined became the pillar
        assert_eq!(session.local.inventory.placeable_count(), 0);
        assert_eq!(
            session.global.blocks.get_block(BlockLocation::new(0, 0, 3)),
            Some(BlockState::SAND)
        );
        assert_eq!(
            session.global.blocks.get_block(BlockLocation::new(0, 1, 1)),
            Some(BlockState::AIR)
        );
    }

    #[test]
    fn test_replans_after_divergence() {
        let mut session = session(strip());
        let goal = BlockLocation::new(0, 1, 3);

        let mut task = BlockTravelTask::new(goal, &session.local, &session.global.path_config);
        task.expensive(
            Instant::now() + Duration::from_secs(10),
            &session.local,
            &session.global,
        );

        // the world changes between planning and following
        session
            .global
            .blocks
            .set_block(BlockLocation::new(0, 1, 1), BlockState::GRAVEL);

        assert!(session.run_task(&mut task, 2_000));
        assert_eq!(task.outcome(), Some(Ok(())));
        assert_eq!(task.replans(), 1);
        assert_eq!(session.local.block_location(), goal);
        assert_eq!(
            session.global.blocks.get_block(BlockLocation::new(0, 0, 3)),
            Some(BlockState::GRAVEL)
        );
    }

    #[test]
    fn test_mining_takes_time() {
        let mut world = WorldBlocks::flat();
        let data = &BlockData::read().unwrap();

        let sand = BlockLocation::new(0, 0, 1);
        let above = sand.above();
        world.set_block(sand, BlockState::SAND);
        world.set_block(above, BlockState::GRAVEL);

        let local = LocalState::new(0, BlockLocation::ZERO.center_bottom());
        let mut bot = SimulatedBot::new(&local);

        bot.apply([Command::Mine(sand, Mine::Start, Face::NegZ)], &mut world, data);
        bot.step(&world);
        bot.apply([Command::Mine(sand, Mine::Finished, Face::NegZ)], &mut world, data);
        assert_eq!(world.get_block(sand), Some(BlockState::SAND));

        bot.apply([Command::Mine(sand, Mine::Start, Face::NegZ)], &mut world, data);
        for _ in 0..15 {
            bot.step(&world);
        }
        bot.apply([Command::Mine(sand, Mine::Finished, Face::NegZ)], &mut world, data);

        // the gravel fell into the gap
        assert_eq!(world.get_block(sand), Some(BlockState::GRAVEL));
        assert_eq!(world.get_block(above), Some(BlockState::AIR));
        assert_eq!(bot.inventory().placeable_count(), 1);

        // stone cannot be harvested by hand
        let stone = BlockLocation::new(0, -1, 0);
        bot.apply([Command::Mine(stone, Mine::Start, Face::PosY)], &mut world, data);
        for _ in 0..1_000 {
            bot.step(&world);
        }
        bot.apply([Command::Mine(stone, Mine::Finished, Face::PosY)], &mut world, data);
        assert_eq!(world.get_block(stone), Some(BlockState::STONE));
    }

    #[test]
    fn test_placing_uses_blocks() {
        let mut world = WorldBlocks::flat();
        let data = &BlockData::read().unwrap();

        let mut local = LocalState::new(0, BlockLocation::ZERO.center_bottom());
        local
            .inventory
            .set_hotbar(2, Some(ItemStack::new(BlockKind::DIRT, 1)));
        let mut bot = SimulatedBot::new(&local);

        let against = BlockLocation::new(0, -1, 1);
        let place = Command::Place(against, Face::PosY);

        // nothing placeable is selected
        bot.apply([place], &mut world, data);
        assert_eq!(world.get_block(against.above()), Some(BlockState::AIR));

        bot.apply([Command::ChangeSlot(2), place], &mut world, data);
        assert_eq!(world.get_block(against.above()), Some(BlockState::DIRT));

        bot.sync(&mut local);
        assert_eq!(local.inventory.placeable_count(), 0);
        assert_eq!(local.inventory.selected(), 2);
    }
}
