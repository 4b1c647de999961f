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

use std::collections::HashMap;

use interfaces::{
    types::{BlockLocation, BlockState, ChunkLocation, SimpleType},
    BlockAccess,
};
use itertools::{iproduct, Itertools};

use crate::storage::chunk::ChunkColumn;

/// The blocks of every loaded column. Blocks in columns which have not been
/// loaded read as `None`.
#[derive(Default)]
pub struct WorldBlocks {
    storage: HashMap<ChunkLocation, ChunkColumn>,
}

const fn split(location: BlockLocation) -> (ChunkLocation, u8, u8) {
    let BlockLocation { x, z, .. } = location;

    let chunk_x = x >> 4;
    let chunk_z = z >> 4;

    let x = (x - (chunk_x << 4)) as u8;
    let z = (z - (chunk_z << 4)) as u8;

    (ChunkLocation(chunk_x, chunk_z), x, z)
}

impl WorldBlocks {
    /// load every column between `from` and `to` (inclusive) as air
    pub fn loaded(from: ChunkLocation, to: ChunkLocation) -> Self {
        let mut world = Self::default();
        let xs = from.0.min(to.0)..=from.0.max(to.0);
        let zs = from.1.min(to.1)..=from.1.max(to.1);
        for (x, z) in xs.cartesian_product(zs) {
            world.add_column(ChunkLocation(x, z), ChunkColumn::default());
        }
        world
    }

    /// a 4x4 column area around the origin with a stone floor at y = -1
    pub fn flat() -> Self {
        let mut world = Self::loaded(ChunkLocation(-2, -2), ChunkLocation(1, 1));
        world.fill(
            BlockLocation::new(-32, -1, -32),
            BlockLocation::new(31, -1, 31),
            BlockState::STONE,
        );
        world
    }

    pub fn add_column(&mut self, location: ChunkLocation, column: ChunkColumn) {
        self.storage.insert(location, column);
    }

    pub fn get_block(&self, location: BlockLocation) -> Option<BlockState> {
        let (chunk, x, z) = split(location);
        let column = self.storage.get(&chunk)?;
        column.get_block(x, location.y, z)
    }

    pub fn get_block_simple(&self, location: BlockLocation) -> Option<SimpleType> {
        self.get_block(location).map(|state| state.simple_type())
    }

    /// returns false if the block is not loaded
    pub fn set_block(&mut self, location: BlockLocation, block: BlockState) -> bool {
        let (chunk, x, z) = split(location);

        match self.storage.get_mut(&chunk) {
            None => false,
            Some(column) => column.set_block(x, location.y, z, block),
        }
    }

    /// set every loaded block in the (inclusive) box between `from` and `to`
    pub fn fill(&mut self, from: BlockLocation, to: BlockLocation, block: BlockState) {
        let xs = from.x.min(to.x)..=from.x.max(to.x);
        let ys = from.y.min(to.y)..=from.y.max(to.y);
        let zs = from.z.min(to.z)..=from.z.max(to.z);
        for (x, y, z) in iproduct!(xs, ys, zs) {
            self.set_block(BlockLocation::new(x, y, z), block);
        }
    }
}

impl BlockAccess for WorldBlocks {
    fn block_state(&self, location: BlockLocation) -> Option<BlockState> {
        self.get_block(location)
    }
}

#[cfg(test)]
mod tests {
    use interfaces::{
        types::{BlockLocation, BlockState, ChunkLocation, SimpleType},
        BlockAccess,
    };

    use crate::storage::blocks::WorldBlocks;

    #[test]
    fn test_negative_coordinates() {
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));

        let loc = BlockLocation::new(-1, 5, -16);
        assert!(world.set_block(loc, BlockState::SAND));
        assert_eq!(world.block_state(loc), Some(BlockState::SAND));
        assert_eq!(
            world.block_state(BlockLocation::new(15, 5, 15)),
            Some(BlockState::AIR)
        );

        // outside the loaded columns
        let far = BlockLocation::new(-17, 5, 0);
        assert_eq!(world.block_state(far), None);
        assert!(!world.set_block(far, BlockState::STONE));
    }

    #[test]
    fn test_flat() {
        let world = WorldBlocks::flat();
        assert_eq!(
            world.get_block_simple(BlockLocation::new(10, -1, -10)),
            Some(SimpleType::Solid)
        );
        assert_eq!(
            world.get_block_simple(BlockLocation::new(10, 0, -10)),
            Some(SimpleType::WalkThrough)
        );
        assert_eq!(world.get_block(BlockLocation::new(32, -1, 0)), None);
    }
}
