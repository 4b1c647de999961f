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

use interfaces::types::{BlockLocation, Location};

use crate::client::{
    pathfind::snapshot::{EntityState, InventoryState},
    state::local::inventory::PlayerInventory,
};

pub mod inventory;

/// What a bot knows about itself. Updated by the session layer every tick.
#[derive(Debug, Clone)]
pub struct LocalState {
    /// opaque id supplied by the caller, only used for logging
    pub bot_id: u32,
    pub ticks: usize,
    pub location: Location,
    pub on_ground: bool,
    pub inventory: PlayerInventory,
}

impl LocalState {
    pub fn new(bot_id: u32, location: Location) -> Self {
        Self {
            bot_id,
            ticks: 0,
            location,
            on_ground: true,
            inventory: PlayerInventory::default(),
        }
    }

    pub fn block_location(&self) -> BlockLocation {
        BlockLocation::from(self.location)
    }

    /// the search node for where the bot is right now
    pub fn entity_state(&self) -> EntityState {
        EntityState::new(
            self.block_location(),
            InventoryState::from(&self.inventory),
        )
    }
}
