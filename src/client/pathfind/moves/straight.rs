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

use crate::client::pathfind::{
    context::GlobalContext,
    moves::{direction::BlockDirection, BoundAction, GraphAction, Placement, Support},
    snapshot::EntityState,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementModifier {
    Normal,
    /// end one block higher
    JumpUpBlock,
    /// end one block lower
    FallBlock,
}

/// One block north, south, east or west
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StraightMovement {
    pub direction: BlockDirection,
    pub modifier: MovementModifier,
}

impl StraightMovement {
    pub const fn new(direction: BlockDirection, modifier: MovementModifier) -> Self {
        Self {
            direction,
            modifier,
        }
    }

    pub fn bind(self, node: &EntityState, ctx: &GlobalContext) -> BoundAction {
        let origin = node.location;
        let forward = origin + self.direction.offset();

        let target = match self.modifier {
            MovementModifier::Normal => forward,
            MovementModifier::JumpUpBlock => forward.above(),
            MovementModifier::FallBlock => forward.below(),
        };

        let mut bound = BoundAction::new(GraphAction::Straight(self), origin, target, self.direction);

        match self.modifier {
            MovementModifier::Normal => {
                bound.require_free(&[forward.above(), forward], node, ctx);
            }
            MovementModifier::JumpUpBlock => {
                bound.require_free(
                    &[origin.add_y(2), forward.add_y(2), forward.above()],
                    node,
                    ctx,
                );
            }
            MovementModifier::FallBlock => {
                bound.require_free(&[forward.above(), forward, forward.below()], node, ctx);
            }
        }

        let support = target.below();

        match (self.modifier, bound.support(support, node, ctx)) {
            (_, Support::Solid) => {}
            (MovementModifier::Normal, Support::Replaceable) if node.inventory.blocks() >= 1 => {
                let against = origin.below();
                bound.require_solid(against, node, ctx);
                bound.placement = Some(Placement::Bridge {
                    location: support,
                    against,
                    face: self.direction.face(),
                });
            }
            _ => bound.impossible = true,
        }

        bound
    }
}

#[cfg(test)]
mod tests {
    use interfaces::types::{block_data::BlockData, BlockLocation, BlockState, ChunkLocation};

    use crate::{
        client::{
            pathfind::{
                context::{GlobalContext, PathConfig},
                execution::WorldAction,
                moves::{
                    direction::BlockDirection,
                    straight::{MovementModifier, StraightMovement},
                    Placement,
                },
                snapshot::{EntityState, InventoryState},
            },
            physics::tools::ToolSet,
        },
        storage::blocks::WorldBlocks,
    };

    fn world() -> WorldBlocks {
        let mut world = WorldBlocks::loaded(ChunkLocation(-1, -1), ChunkLocation(0, 0));
        world.fill(
            BlockLocation::new(-4, -1, -4),
            BlockLocation::new(4, -1, 4),
            BlockState::STONE,
        );
        world
    }

    #[test]
    fn test_jump_up() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut world = world();
        world.set_block(BlockLocation::new(1, 0, 0), BlockState::STONE);

        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };
        let node = EntityState::new(BlockLocation::ZERO, InventoryState::default());

        let east = StraightMovement::new(BlockDirection::East, MovementModifier::Normal);
        assert!(east.bind(&node, &ctx).instructions(&node, &ctx).is_none());

        let jump = StraightMovement::new(BlockDirection::East, MovementModifier::JumpUpBlock);
        let instructions = jump.bind(&node, &ctx).instructions(&node, &ctx).unwrap();
        assert_eq!(instructions.next.location, BlockLocation::new(1, 1, 0));
        assert!((instructions.edge.cost - config.costs.jump_up_block).abs() < 1e-9);
    }

    #[test]
    fn test_fall_needs_a_floor() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut world = world();
        world.set_block(BlockLocation::new(0, -1, 1), BlockState::AIR);

        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };
        let node = EntityState::new(BlockLocation::ZERO, InventoryState::default());

        // nothing to land on below the hole
        let fall = StraightMovement::new(BlockDirection::South, MovementModifier::FallBlock);
        assert!(fall.bind(&node, &ctx).impossible);

        world.set_block(BlockLocation::new(0, -2, 1), BlockState::DIRT);
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };
        let instructions = fall.bind(&node, &ctx).instructions(&node, &ctx).unwrap();
        assert_eq!(instructions.next.location, BlockLocation::new(0, -1, 1));
    }

    #[test]
    fn test_bridge_over_a_gap() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let mut world = world();
        world.set_block(BlockLocation::new(0, -1, -1), BlockState::AIR);

        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };

        let north = StraightMovement::new(BlockDirection::North, MovementModifier::Normal);

        let empty = EntityState::new(BlockLocation::ZERO, InventoryState::default());
        assert!(north.bind(&empty, &ctx).impossible);

        let node = EntityState::new(BlockLocation::ZERO, InventoryState::new(2, ToolSet::default()));
        let bound = north.bind(&node, &ctx);
        assert_eq!(
            bound.placement,
            Some(Placement::Bridge {
                location: BlockLocation::new(0, -1, -1),
                against: BlockLocation::new(0, -1, 0),
                face: BlockDirection::North.face(),
            })
        );

        let instructions = bound.instructions(&node, &ctx).unwrap();
        assert!(matches!(
            instructions.edge.actions.as_slice(),
            [WorldAction::BlockPlace(_), WorldAction::Movement(_)]
        ));
        assert_eq!(instructions.next.inventory.blocks(), 1);
        assert_eq!(
            instructions.next.level.change(BlockLocation::new(0, -1, -1)),
            Some(BlockState::COBBLESTONE)
        );

        let expected = config.costs.block_walk + config.costs.place_required;
        assert!((instructions.edge.cost - expected).abs() < 1e-9);
    }
}
