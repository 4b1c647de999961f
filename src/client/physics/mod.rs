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

//! A point-mass approximation of player movement. Good enough to dry-run
//! routes without a server.

use interfaces::{
    types::{BlockLocation, Displacement, Location},
    BlockAccess,
};

use crate::protocol::ControlState;

pub mod tools;

/// upwards velocity given by a jump
const JUMP_UPWARDS_MOTION: f64 = 0.42;

/// acceleration due to gravity per tick
const ACC_G: f64 = 0.08;

/// fraction of vertical velocity kept after each tick
const DRAG_MULT: f64 = 0.98;

/// horizontal distance walked per tick
pub const WALK_SPEED: f64 = 0.2;

/// a player is 1.8 blocks tall
const HEIGHT: f64 = 1.8;

/// heights above the feet which must be in enterable blocks to walk
const BODY_CHECKS: [f64; 2] = [0.0, 1.5];

#[derive(Debug, Clone)]
pub struct Physics {
    location: Location,
    velocity_y: f64,
    on_ground: bool,
}

fn is_solid(world: &impl BlockAccess, location: BlockLocation) -> bool {
    world
        .block_state(location)
        .is_some_and(|state| state.full_block())
}

/// unloaded blocks cannot be entered
fn can_enter(world: &impl BlockAccess, location: BlockLocation) -> bool {
    world
        .block_state(location)
        .is_some_and(|state| state.walk_through())
}

impl Physics {
    pub const fn new(location: Location) -> Self {
        Self {
            location,
            velocity_y: 0.0,
            on_ground: true,
        }
    }

    pub const fn location(&self) -> Location {
        self.location
    }

    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// advance one tick
    pub fn tick(&mut self, control: ControlState, world: &impl BlockAccess) {
        let feet = BlockLocation::from(self.location);

        if self.on_ground && !is_solid(world, feet.below()) {
            self.on_ground = false;
            self.velocity_y = 0.0;
        }

        if self.on_ground && control.jump {
            self.on_ground = false;
            self.velocity_y = JUMP_UPWARDS_MOTION;
        }

        if !self.on_ground {
            self.move_vertical(world);
        }

        if control.forward {
            self.move_horizontal(control, world);
        }
    }

    fn move_vertical(&mut self, world: &impl BlockAccess) {
        let next = self.location.add_y(self.velocity_y);
        self.velocity_y = (self.velocity_y - ACC_G) * DRAG_MULT;

        let feet = BlockLocation::from(next);
        if is_solid(world, feet) {
            // landed inside a block, so we are standing on top of it
            self.location = Location::new(next.x, f64::from(feet.y) + 1.0, next.z);
            self.velocity_y = 0.0;
            self.on_ground = true;
            return;
        }

        let head = BlockLocation::from(next.add_y(HEIGHT));
        if self.velocity_y > 0.0 && is_solid(world, head) {
            self.velocity_y = 0.0;
            return;
        }

        self.location = next;
    }

    fn move_horizontal(&mut self, control: ControlState, world: &impl BlockAccess) {
        let direction = control.look.horizontal().unit_vector();
        let step = Displacement::new(direction.dx, 0.0, direction.dz).normalize() * WALK_SPEED;
        let next = self.location + step;

        let free = BODY_CHECKS
            .iter()
            .all(|&dy| can_enter(world, BlockLocation::from(next.add_y(dy))));

        if free {
            self.location = next;
        }
    }
}
