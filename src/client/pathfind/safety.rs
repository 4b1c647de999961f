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
    types::{block_data::BlockData, BlockLocation, BlockState},
    BlockAccess,
};
use smallvec::SmallVec;

use crate::client::pathfind::moves::direction::BlockDirection;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockSafetyType {
    /// must not be a block which falls once the block below it is gone
    Falling,
    Fluids,
    FallingAndFluids,
}

impl BlockSafetyType {
    const fn checks_falling(self) -> bool {
        matches!(self, Self::Falling | Self::FallingAndFluids)
    }

    const fn checks_fluids(self) -> bool {
        matches!(self, Self::Fluids | Self::FallingAndFluids)
    }

    /// unloaded blocks are never safe
    pub fn is_safe(self, state: Option<BlockState>, data: &BlockData) -> bool {
        let Some(state) = state else {
            return false;
        };

        if self.checks_fluids() && state.is_fluid() {
            return false;
        }

        if self.checks_falling() && data.by_id(state.id()).is_some_and(|block| block.gravity) {
            return false;
        }

        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SafetyCheck {
    pub location: BlockLocation,
    pub kind: BlockSafetyType,
}

impl SafetyCheck {
    pub const fn new(location: BlockLocation, kind: BlockSafetyType) -> Self {
        Self { location, kind }
    }

    pub fn passes(&self, world: &impl BlockAccess, data: &BlockData) -> bool {
        self.kind.is_safe(world.block_state(self.location), data)
    }
}

/// The blocks to check before breaking `block`.
///
/// The block above is checked for falling blocks and fluids, the four
/// horizontal neighbours for fluids. Neighbours are derived by rotating
/// `facing`, and any block on `path` is skipped since it is either being
/// cleared or occupied by the bot.
pub fn checks_for(
    block: BlockLocation,
    facing: BlockDirection,
    path: &[BlockLocation],
) -> SmallVec<[SafetyCheck; 5]> {
    let mut checks = SmallVec::new();

    let above = block.above();
    if !path.contains(&above) {
        checks.push(SafetyCheck::new(above, BlockSafetyType::FallingAndFluids));
    }

    for direction in facing.frame() {
        let side = block + direction.offset();
        if !path.contains(&side) {
            checks.push(SafetyCheck::new(side, BlockSafetyType::Fluids));
        }
    }

    checks
}

/// true if `block` can be broken without letting anything fall or flow onto
/// the path
pub fn is_safe_to_break(
    block: BlockLocation,
    facing: BlockDirection,
    path: &[BlockLocation],
    world: &impl BlockAccess,
    data: &BlockData,
) -> bool {
    checks_for(block, facing, path)
        .iter()
        .all(|check| check.passes(world, data))
}
