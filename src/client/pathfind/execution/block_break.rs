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

use interfaces::{types::Face, BlockAccess};

use crate::{
    client::{
        pathfind::{
            costs::MiningCost,
            execution::{stop_and_look, Divergence},
            snapshot::{EntityState, InventoryState},
        },
        state::local::LocalState,
    },
    protocol::{InterfaceOut, Mine},
};

/// slack on top of the planned mining time
const EXTRA_TICKS: usize = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BreakPhase {
    Look,
    SelectTool,
    Start,
    /// ticks spent mining so far
    Mining(u32),
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockBreakAction {
    pub mining: MiningCost,
    pub face: Face,
    phase: BreakPhase,
}

impl BlockBreakAction {
    pub const fn new(mining: MiningCost, face: Face) -> Self {
        Self {
            mining,
            face,
            phase: BreakPhase::Look,
        }
    }

    pub fn allowed_ticks(&self) -> usize {
        self.mining.ticks as usize + EXTRA_TICKS
    }

    pub fn is_completed(&self, world: &impl BlockAccess) -> bool {
        world
            .block_state(self.mining.location)
            .is_some_and(|state| state.passable())
    }

    pub fn tick(&mut self, out: &mut impl InterfaceOut, local: &mut LocalState) {
        let location = self.mining.location;

        self.phase = match self.phase {
            BreakPhase::Look => {
                stop_and_look(out, local, location.true_center());
                BreakPhase::SelectTool
            }
            BreakPhase::SelectTool => {
                local.inventory.select_tool(self.mining.tool, out);
                BreakPhase::Start
            }
            BreakPhase::Start => {
                out.mine(location, Mine::Start, self.face);
                BreakPhase::Mining(0)
            }
            BreakPhase::Mining(ticks) => {
                let ticks = ticks + 1;
                if ticks >= self.mining.ticks {
                    out.mine(location, Mine::Finished, self.face);
                    BreakPhase::Finished
                } else {
                    BreakPhase::Mining(ticks)
                }
            }
            BreakPhase::Finished => BreakPhase::Finished,
        };
    }

    /// Cancel a dig which was started but not finished
    pub fn cancel(&mut self, out: &mut impl InterfaceOut) {
        if matches!(self.phase, BreakPhase::Mining(_)) {
            out.mine(self.mining.location, Mine::Cancel, self.face);
            self.phase = BreakPhase::Look;
        }
    }

    pub fn simulate(&self, node: &EntityState) -> EntityState {
        let inventory = if self.mining.will_drop {
            node.inventory.with_one_more_block()
        } else {
            node.inventory
        };

        EntityState {
            level: node.level.with_change_to_air(self.mining.location),
            inventory,
            ..node.clone()
        }
    }

    /// The block must still be what was planned. A block placed earlier in the
    /// route may be any full block since the item used is not known.
    pub fn verify(&self, local: &LocalState, world: &impl BlockAccess) -> Result<(), Divergence> {
        let Some(live) = world.block_state(self.mining.location) else {
            return Err(Divergence::World);
        };

        if live.passable() {
            return Ok(());
        }

        let expected = if self.mining.placed {
            live.full_block()
        } else {
            live == self.mining.state
        };

        if !expected {
            return Err(Divergence::World);
        }

        if !InventoryState::from(&local.inventory).has_tool(self.mining.tool) {
            return Err(Divergence::Inventory);
        }

        Ok(())
    }
}
