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

use interfaces::types::{BlockLocation, Direction};

use crate::{
    client::{
        pathfind::{execution::TICKS_PER_SECOND, snapshot::EntityState},
        state::local::LocalState,
    },
    protocol::{ControlState, InterfaceOut},
};

/// how close to the center of the target block counts as arrived
const ARRIVED_DIST: f64 = 0.2;

/// Walk (jumping or falling if needed) to the center of a block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementAction {
    pub target: BlockLocation,
}

impl MovementAction {
    pub const ALLOWED_TICKS: usize = 5 * TICKS_PER_SECOND;

    pub const fn new(target: BlockLocation) -> Self {
        Self { target }
    }

    fn horizontal_dist(&self, local: &LocalState) -> f64 {
        (self.target.center_bottom() - local.location).horizontal().mag()
    }

    pub fn is_completed(&self, local: &LocalState) -> bool {
        local.on_ground
            && local.block_location().y == self.target.y
            && self.horizontal_dist(local) <= ARRIVED_DIST
    }

    pub fn tick(&mut self, out: &mut impl InterfaceOut, local: &LocalState) {
        let displacement = (self.target.center_bottom() - local.location).horizontal();

        let control = ControlState {
            forward: displacement.mag() > ARRIVED_DIST,
            jump: local.on_ground && self.target.y > local.block_location().y,
            look: Direction::from(displacement),
        };

        out.set_control(control);
    }

    pub fn simulate(&self, node: &EntityState) -> EntityState {
        node.moved_to(self.target)
    }
}
