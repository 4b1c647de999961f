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

use interfaces::{types::BlockLocation, BlockAccess};

use crate::client::pathfind::{
    context::GlobalContext,
    moves::{direction::DiagonalDirection, BoundAction, GraphAction},
    snapshot::EntityState,
};

/// One block on both axes at the same height
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagonalMovement {
    pub direction: DiagonalDirection,
}

impl DiagonalMovement {
    pub const fn new(direction: DiagonalDirection) -> Self {
        Self { direction }
    }

    pub fn bind(self, node: &EntityState, ctx: &GlobalContext) -> BoundAction {
        let origin = node.location;
        let target = origin + self.direction.offset();
        let (a, b) = self.direction.components();

        let mut bound = BoundAction::new(GraphAction::Diagonal(self), origin, target, a);

        bound.require_free(&[target.above(), target], node, ctx);
        bound.require_solid(target.below(), node, ctx);

        // corners are never mined
        let world = node.level.view(ctx.world);
        let column_open = |column: BlockLocation| {
            [column, column.above()]
                .into_iter()
                .all(|loc| world.block_state(loc).is_some_and(|state| state.passable()))
        };

        let open = [origin + a.offset(), origin + b.offset()]
            .into_iter()
            .filter(|&column| column_open(column))
            .count();

        match open {
            0 => bound.impossible = true,
            1 => bound.extra_cost += ctx.path_config.costs.corner_penalty,
            _ => {}
        }

        bound
    }
}

#[cfg(test)]
mod tests {
    use interfaces::types::{block_data::BlockData, BlockLocation, BlockState, ChunkLocation};

    use crate::{
        client::pathfind::{
            context::{GlobalContext, PathConfig},
            moves::{diagonal::DiagonalMovement, direction::DiagonalDirection},
            snapshot::{EntityState, InventoryState},
        },
        storage::blocks::WorldBlocks,
    };

    #[test]
    fn test_corners() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(-3, -1, -3),
            BlockLocation::new(3, -1, 3),
            BlockState::STONE,
        );

        let node = EntityState::new(BlockLocation::ZERO, InventoryState::default());
        let north_east = DiagonalMovement::new(DiagonalDirection::NorthEast);

        {
            let ctx = GlobalContext {
                path_config: &config,
                block_data: &data,
                world: &world,
            };
            let bound = north_east.bind(&node, &ctx);
            assert!(!bound.impossible);
            assert!((bound.cost(&config.costs) - config.costs.block_diagonal).abs() < 1e-9);
        }

        // the north corner is blocked at head height
        world.set_block(BlockLocation::new(0, 1, -1), BlockState::STONE);
        {
            let ctx = GlobalContext {
                path_config: &config,
                block_data: &data,
                world: &world,
            };
            let bound = north_east.bind(&node, &ctx);
            assert!(!bound.impossible);
            let expected = config.costs.block_diagonal + config.costs.corner_penalty;
            assert!((bound.cost(&config.costs) - expected).abs() < 1e-9);
        }

        world.set_block(BlockLocation::new(1, 0, 0), BlockState::STONE);
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };
        assert!(north_east.bind(&node, &ctx).impossible);
    }
}
