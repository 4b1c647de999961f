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

use crate::{
    client::{
        state::{global::GlobalState, local::LocalState},
        tasks::navigate::{BlockTravelNearTask, BlockTravelTask, ChunkTravelTask},
    },
    error::Res,
    protocol::InterfaceOut,
};

pub mod navigate;

pub trait TaskTrait {
    /// return true if done
    fn tick(
        &mut self,
        out: &mut impl InterfaceOut,
        local: &mut LocalState,
        global: &mut GlobalState,
    ) -> bool;

    /// Do an expensive part of the task, such as searching for a route. This
    /// may run on another thread than [`TaskTrait::tick`] and MUST return by
    /// `end_at` or the game loop is held up. It is called every cycle until
    /// the work is done.
    fn expensive(&mut self, _end_at: Instant, _local: &LocalState, _global: &GlobalState) {}
}

#[allow(clippy::enum_variant_names)]
pub enum Task {
    BlockTravelTask(BlockTravelTask),
    BlockTravelNearTask(BlockTravelNearTask),
    ChunkTravelTask(ChunkTravelTask),
}

impl Task {
    /// how the task ended, if it has
    pub fn outcome(&self) -> Option<Res> {
        match self {
            Self::BlockTravelTask(task) => task.outcome(),
            Self::BlockTravelNearTask(task) => task.outcome(),
            Self::ChunkTravelTask(task) => task.outcome(),
        }
    }
}

impl TaskTrait for Task {
    fn tick(
        &mut self,
        out: &mut impl InterfaceOut,
        local: &mut LocalState,
        global: &mut GlobalState,
    ) -> bool {
        match self {
            Self::BlockTravelTask(task) => task.tick(out, local, global),
            Self::BlockTravelNearTask(task) => task.tick(out, local, global),
            Self::ChunkTravelTask(task) => task.tick(out, local, global),
        }
    }

    fn expensive(&mut self, end_at: Instant, local: &LocalState, global: &GlobalState) {
        match self {
            Self::BlockTravelTask(task) => task.expensive(end_at, local, global),
            Self::BlockTravelNearTask(task) => task.expensive(end_at, local, global),
            Self::ChunkTravelTask(task) => task.expensive(end_at, local, global),
        }
    }
}

impl From<BlockTravelTask> for Task {
    fn from(task: BlockTravelTask) -> Self {
        Self::BlockTravelTask(task)
    }
}

impl From<BlockTravelNearTask> for Task {
    fn from(task: BlockTravelNearTask) -> Self {
        Self::BlockTravelNearTask(task)
    }
}

impl From<ChunkTravelTask> for Task {
    fn from(task: ChunkTravelTask) -> Self {
        Self::ChunkTravelTask(task)
    }
}
