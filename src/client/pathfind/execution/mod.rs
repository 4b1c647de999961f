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

//! The concrete, tickable steps of a route.

use interfaces::{
    types::{Direction, Displacement, Location},
    BlockAccess,
};

use crate::{
    client::{
        pathfind::{
            execution::{
                block_break::BlockBreakAction, block_place::BlockPlaceAction,
                jump_place::JumpAndPlaceBelowAction, movement::MovementAction,
            },
            snapshot::EntityState,
        },
        state::local::LocalState,
    },
    protocol::{ControlState, InterfaceOut},
};

pub mod block_break;
pub mod block_place;
pub mod jump_place;
pub mod movement;

/// 20 ticks a second
pub const TICKS_PER_SECOND: usize = 20;

/// The live world no longer matches what the action was planned against
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Divergence {
    World,
    Inventory,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorldAction {
    Movement(MovementAction),
    BlockBreak(BlockBreakAction),
    BlockPlace(BlockPlaceAction),
    JumpAndPlaceBelow(JumpAndPlaceBelowAction),
}

impl WorldAction {
    pub fn is_completed(&self, local: &LocalState, world: &impl BlockAccess) -> bool {
        match self {
            Self::Movement(action) => action.is_completed(local),
            Self::BlockBreak(action) => action.is_completed(world),
            Self::BlockPlace(action) => action.is_completed(world),
            Self::JumpAndPlaceBelow(action) => action.is_completed(local, world),
        }
    }

    /// Issue at most one command
    pub fn tick(&mut self, out: &mut impl InterfaceOut, local: &mut LocalState) {
        match self {
            Self::Movement(action) => action.tick(out, local),
            Self::BlockBreak(action) => action.tick(out, local),
            Self::BlockPlace(action) => action.tick(out, local),
            Self::JumpAndPlaceBelow(action) => action.tick(out, local),
        }
    }

    /// Undo whatever the action has in flight on the server, such as a dig
    pub fn cancel(&mut self, out: &mut impl InterfaceOut) {
        if let Self::BlockBreak(action) = self {
            action.cancel(out);
        }
    }

    pub fn allowed_ticks(&self) -> usize {
        match self {
            Self::Movement(_) => MovementAction::ALLOWED_TICKS,
            Self::BlockBreak(action) => action.allowed_ticks(),
            Self::BlockPlace(_) => BlockPlaceAction::ALLOWED_TICKS,
            Self::JumpAndPlaceBelow(_) => JumpAndPlaceBelowAction::ALLOWED_TICKS,
        }
    }

    /// The node reached by running this action from `node`. `None` if the
    /// action cannot run there, e.g. because there is no block left to place.
    pub fn simulate(&self, node: &EntityState) -> Option<EntityState> {
        match self {
            Self::Movement(action) => Some(action.simulate(node)),
            Self::BlockBreak(action) => Some(action.simulate(node)),
            Self::BlockPlace(action) => action.simulate(node),
            Self::JumpAndPlaceBelow(action) => action.simulate(node),
        }
    }

    /// Re-check the live world before the action is started
    pub fn verify(&self, local: &LocalState, world: &impl BlockAccess) -> Result<(), Divergence> {
        match self {
            Self::Movement(_) => Ok(()),
            Self::BlockBreak(action) => action.verify(local, world),
            Self::BlockPlace(action) => action.verify(local, world),
            Self::JumpAndPlaceBelow(action) => action.verify(local, world),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Movement(_) => "movement",
            Self::BlockBreak(_) => "block break",
            Self::BlockPlace(_) => "block place",
            Self::JumpAndPlaceBelow(_) => "jump and place below",
        }
    }
}

/// the direction from the bot's eyes to `at`
pub fn look_at(local: &LocalState, at: Location) -> Direction {
    let eye = local.location + Displacement::EYE_HEIGHT;
    Direction::from(at - eye)
}

/// stop moving and look at `at`
pub fn stop_and_look(out: &mut impl InterfaceOut, local: &LocalState, at: Location) {
    out.set_control(ControlState::look(look_at(local, at)));
}
