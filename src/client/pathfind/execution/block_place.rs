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
    types::{BlockLocation, Face, Location},
    BlockAccess,
};

use crate::{
    client::{
        pathfind::{
            execution::{stop_and_look, Divergence, TICKS_PER_SECOND},
            snapshot::EntityState,
        },
        state::local::LocalState,
    },
    protocol::InterfaceOut,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PlacePhase {
    Look,
    Switch,
    Place,
    Placed,
}

/// Place a block at `location` by clicking `face` of `against`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockPlaceAction {
    pub location: BlockLocation,
    pub against: BlockLocation,
    pub face: Face,
    phase: PlacePhase,
}

/// the middle of a face
fn face_center(block: BlockLocation, face: Face) -> Location {
    let center = block.true_center();
    let change = face.change();
    Location::new(
        f64::from(change.x).mul_add(0.5, center.x),
        f64::from(change.y).mul_add(0.5, center.y),
        f64::from(change.z).mul_add(0.5, center.z),
    )
}

impl BlockPlaceAction {
    pub const ALLOWED_TICKS: usize = 3 * TICKS_PER_SECOND;

    pub const fn new(location: BlockLocation, against: BlockLocation, face: Face) -> Self {
        Self {
            location,
            against,
            face,
            phase: PlacePhase::Look,
        }
    }

    pub fn is_completed(&self, world: &impl BlockAccess) -> bool {
        world
            .block_state(self.location)
            .is_some_and(|state| state.full_block())
    }

    pub fn tick(&mut self, out: &mut impl InterfaceOut, local: &mut LocalState) {
        self.phase = match self.phase {
            PlacePhase::Look => {
                stop_and_look(out, local, face_center(self.against, self.face));
                PlacePhase::Switch
            }
            PlacePhase::Switch => {
                local.inventory.switch_block(out);
                PlacePhase::Place
            }
            PlacePhase::Place => {
                out.place_block(self.against, self.face);
                PlacePhase::Placed
            }
            PlacePhase::Placed => PlacePhase::Placed,
        };
    }

    pub fn simulate(&self, node: &EntityState) -> Option<EntityState> {
        Some(EntityState {
            level: node.level.with_change_to_solid_block(self.location),
            inventory: node.inventory.with_one_less_block()?,
            ..node.clone()
        })
    }

    pub fn verify(&self, local: &LocalState, world: &impl BlockAccess) -> Result<(), Divergence> {
        verify_placement(self.location, self.against, local, world)
    }
}

/// the target must be free, the block clicked must be solid and there must be
/// something to place
pub fn verify_placement(
    location: BlockLocation,
    against: BlockLocation,
    local: &LocalState,
    world: &impl BlockAccess,
) -> Result<(), Divergence> {
    let free = world
        .block_state(location)
        .is_some_and(|state| state.passable());
    let solid = world
        .block_state(against)
        .is_some_and(|state| state.full_block());

    if !free || !solid {
        return Err(Divergence::World);
    }

    if local.inventory.placeable_count() == 0 {
        return Err(Divergence::Inventory);
    }

    Ok(())
}
