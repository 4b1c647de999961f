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

use interfaces::{
    types::{BlockLocation, Direction, Face},
    BlockAccess,
};

use crate::{
    client::{
        pathfind::{
            execution::{block_place::verify_placement, Divergence, TICKS_PER_SECOND},
            snapshot::EntityState,
        },
        state::local::LocalState,
    },
    protocol::{ControlState, InterfaceOut},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PillarPhase {
    Stop,
    Switch,
    Jump,
    /// waiting to be high enough to place below
    Place,
    Release,
    Landing,
}

/// Jump, place a block where the bot was standing and land on it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpAndPlaceBelowAction {
    pub location: BlockLocation,
    pub against: BlockLocation,
    pub target: BlockLocation,
    phase: PillarPhase,
}

impl JumpAndPlaceBelowAction {
    pub const ALLOWED_TICKS: usize = 3 * TICKS_PER_SECOND;

    pub const fn new(location: BlockLocation, against: BlockLocation, target: BlockLocation) -> Self {
        Self {
            location,
            against,
            target,
            phase: PillarPhase::Stop,
        }
    }

    pub fn is_completed(&self, local: &LocalState, world: &impl BlockAccess) -> bool {
        let placed = world
            .block_state(self.location)
            .is_some_and(|state| state.full_block());

        placed && local.on_ground && local.block_location() == self.target
    }

    pub fn tick(&mut self, out: &mut impl InterfaceOut, local: &mut LocalState) {
        let looking_down = ControlState::look(Direction::DOWN);

        self.phase = match self.phase {
            PillarPhase::Stop => {
                out.set_control(looking_down);
                PillarPhase::Switch
            }
            PillarPhase::Switch => {
                local.inventory.switch_block(out);
                PillarPhase::Jump
            }
            PillarPhase::Jump => {
                out.set_control(ControlState {
                    jump: true,
                    ..looking_down
                });
                PillarPhase::Place
            }
            PillarPhase::Place => {
                // the feet are above the top of the block being placed
                if local.location.y > f64::from(self.location.y) + 1.0 {
                    out.place_block(self.against, Face::PosY);
                    PillarPhase::Release
                } else {
                    PillarPhase::Place
                }
            }
            PillarPhase::Release => {
                out.set_control(looking_down);
                PillarPhase::Landing
            }
            PillarPhase::Landing => PillarPhase::Landing,
        };
    }

    pub fn simulate(&self, node: &EntityState) -> Option<EntityState> {
        let placed = EntityState {
            level: node.level.with_change_to_solid_block(self.location),
            inventory: node.inventory.with_one_less_block()?,
            ..node.clone()
        };
        Some(placed.moved_to(self.target))
    }

    pub fn verify(&self, local: &LocalState, world: &impl BlockAccess) -> Result<(), Divergence> {
        verify_placement(self.location, self.against, local, world)
    }
}
