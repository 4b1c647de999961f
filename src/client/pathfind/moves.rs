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

//! The edges of the search graph.
//!
//! Every node is expanded with the same fixed catalogue of [`GraphAction`]s.
//! Binding an action to a node produces a fresh [`BoundAction`] record which is
//! consumed once to produce the successor node and the [`WorldAction`]s which
//! get there.

use interfaces::{
    types::{BlockLocation, Face},
    BlockAccess,
};
use smallvec::SmallVec;

use crate::client::pathfind::{
    context::{Costs, GlobalContext},
    costs::{mining_cost, MiningCost},
    execution::{
        block_break::BlockBreakAction, block_place::BlockPlaceAction,
        jump_place::JumpAndPlaceBelowAction, movement::MovementAction, WorldAction,
    },
    moves::{
        diagonal::DiagonalMovement,
        direction::{BlockDirection, DiagonalDirection},
        down::DownMovement,
        straight::{MovementModifier, StraightMovement},
        up::UpMovement,
    },
    route::RouteEdge,
    safety::is_safe_to_break,
    snapshot::EntityState,
    traits::Neighbor,
};

pub mod diagonal;
pub mod direction;
pub mod down;
pub mod straight;
pub mod up;

/// the most blocks a single edge may need to clear
pub const MAX_BLOCKS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphAction {
    Straight(StraightMovement),
    Diagonal(DiagonalMovement),
    Up(UpMovement),
    Down(DownMovement),
}

const fn straight(direction: BlockDirection, modifier: MovementModifier) -> GraphAction {
    GraphAction::Straight(StraightMovement::new(direction, modifier))
}

const fn diagonal(direction: DiagonalDirection) -> GraphAction {
    GraphAction::Diagonal(DiagonalMovement::new(direction))
}

impl GraphAction {
    /// Every edge template, in the order they are bound for each node
    pub const CATALOGUE: [Self; 18] = [
        straight(BlockDirection::North, MovementModifier::Normal),
        straight(BlockDirection::South, MovementModifier::Normal),
        straight(BlockDirection::East, MovementModifier::Normal),
        straight(BlockDirection::West, MovementModifier::Normal),
        diagonal(DiagonalDirection::NorthEast),
        diagonal(DiagonalDirection::NorthWest),
        diagonal(DiagonalDirection::SouthEast),
        diagonal(DiagonalDirection::SouthWest),
        Self::Up(UpMovement),
        Self::Down(DownMovement),
        straight(BlockDirection::North, MovementModifier::JumpUpBlock),
        straight(BlockDirection::South, MovementModifier::JumpUpBlock),
        straight(BlockDirection::East, MovementModifier::JumpUpBlock),
        straight(BlockDirection::West, MovementModifier::JumpUpBlock),
        straight(BlockDirection::North, MovementModifier::FallBlock),
        straight(BlockDirection::South, MovementModifier::FallBlock),
        straight(BlockDirection::East, MovementModifier::FallBlock),
        straight(BlockDirection::West, MovementModifier::FallBlock),
    ];

    /// lower is preferred when two nodes have the same score
    pub const fn priority(self) -> u8 {
        match self {
            Self::Straight(_) => 0,
            Self::Diagonal(_) => 1,
            Self::Up(_) => 2,
            Self::Down(_) => 3,
        }
    }

    pub fn base_cost(self, costs: &Costs) -> f64 {
        match self {
            Self::Straight(straight) => match straight.modifier {
                MovementModifier::Normal => costs.block_walk,
                MovementModifier::JumpUpBlock => costs.jump_up_block,
                MovementModifier::FallBlock => costs.fall_block,
            },
            Self::Diagonal(_) => costs.block_diagonal,
            Self::Up(_) => costs.pillar,
            Self::Down(_) => costs.dig_down,
        }
    }

    pub fn bind(self, node: &EntityState, ctx: &GlobalContext) -> BoundAction {
        match self {
            Self::Straight(straight) => straight.bind(node, ctx),
            Self::Diagonal(diagonal) => diagonal.bind(node, ctx),
            Self::Up(up) => up.bind(node, ctx),
            Self::Down(down) => down.bind(node, ctx),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// place a block to walk on
    Bridge {
        location: BlockLocation,
        against: BlockLocation,
        face: Face,
    },
    /// jump and place a block where the bot was standing
    Pillar {
        location: BlockLocation,
        against: BlockLocation,
    },
}

/// How the block under a target can be used
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Support {
    Solid,
    /// empty, so a block could be placed there
    Replaceable,
    Unusable,
}

/// A [`GraphAction`] bound to one node
#[derive(Clone, Debug)]
pub struct BoundAction {
    pub action: GraphAction,
    pub origin: BlockLocation,
    pub target: BlockLocation,
    facing: BlockDirection,
    /// the blocks which must be free, in the order they are mined
    pub blocks: [Option<BlockLocation>; MAX_BLOCKS],
    pub mining: [Option<MiningCost>; MAX_BLOCKS],
    pub unsafe_to_break: [bool; MAX_BLOCKS],
    pub no_need_to_break: [bool; MAX_BLOCKS],
    pub placement: Option<Placement>,
    pub extra_cost: f64,
    pub impossible: bool,
}

/// The successor of a node along one edge
#[derive(Clone, Debug)]
pub struct GraphInstructions {
    pub next: EntityState,
    pub edge: RouteEdge,
}

/// The face of `block` the bot looks at from `eye`. Ties go to a side face so
/// a block at the feet is hit from the side.
pub fn face_towards(block: BlockLocation, eye: BlockLocation) -> Face {
    let diff = eye - block;
    let (dx, dy, dz) = (diff.x.abs(), i32::from(diff.y.abs()), diff.z.abs());

    if dy > dx && dy > dz {
        if diff.y >= 0 {
            Face::PosY
        } else {
            Face::NegY
        }
    } else if dx >= dz {
        if diff.x >= 0 {
            Face::PosX
        } else {
            Face::NegX
        }
    } else if diff.z >= 0 {
        Face::PosZ
    } else {
        Face::NegZ
    }
}

impl BoundAction {
    pub const fn new(
        action: GraphAction,
        origin: BlockLocation,
        target: BlockLocation,
        facing: BlockDirection,
    ) -> Self {
        Self {
            action,
            origin,
            target,
            facing,
            blocks: [None; MAX_BLOCKS],
            mining: [None; MAX_BLOCKS],
            unsafe_to_break: [false; MAX_BLOCKS],
            no_need_to_break: [false; MAX_BLOCKS],
            placement: None,
            extra_cost: 0.0,
            impossible: false,
        }
    }

    /// Require every block of `free` to be passable, mining the ones which are
    /// not. The edge becomes impossible if a block cannot be mined or mining it
    /// is unsafe.
    pub fn require_free(&mut self, free: &[BlockLocation], node: &EntityState, ctx: &GlobalContext) {
        let world = node.level.view(ctx.world);

        let mut path: SmallVec<[BlockLocation; MAX_BLOCKS + 4]> = SmallVec::new();
        path.extend_from_slice(free);
        path.extend_from_slice(&[
            self.origin,
            self.origin.above(),
            self.target,
            self.target.above(),
        ]);

        for (slot, &location) in free.iter().enumerate().take(MAX_BLOCKS) {
            self.blocks[slot] = Some(location);

            let Some(state) = world.block_state(location) else {
                self.impossible = true;
                continue;
            };

            if state.passable() {
                self.no_need_to_break[slot] = true;
                continue;
            }

            let placed = world.is_changed(location);
            let Some(cost) = mining_cost(location, state, placed, &node.inventory, ctx) else {
                self.impossible = true;
                continue;
            };

            if !is_safe_to_break(location, self.facing, &path, &world, ctx.block_data) {
                self.unsafe_to_break[slot] = true;
                self.impossible = true;
            }

            self.mining[slot] = Some(cost);
        }
    }

    pub fn support(&self, location: BlockLocation, node: &EntityState, ctx: &GlobalContext) -> Support {
        match node.level.view(ctx.world).block_state(location) {
            Some(state) if state.full_block() => Support::Solid,
            Some(state) if state.passable() => Support::Replaceable,
            _ => Support::Unusable,
        }
    }

    /// the edge is impossible unless the block is a full block
    pub fn require_solid(&mut self, location: BlockLocation, node: &EntityState, ctx: &GlobalContext) {
        if self.support(location, node, ctx) != Support::Solid {
            self.impossible = true;
        }
    }

    /// base + penalties + every mining and bridging cost. Never negative.
    pub fn cost(&self, costs: &Costs) -> f64 {
        let mining: f64 = self.mining.iter().flatten().map(|mining| mining.cost).sum();
        let place = match self.placement {
            Some(Placement::Bridge { .. }) => costs.place_required,
            _ => 0.0,
        };

        (self.action.base_cost(costs) + self.extra_cost + mining + place).max(0.0)
    }

    /// Consume the record. `None` if the edge is impossible.
    pub fn instructions(self, node: &EntityState, ctx: &GlobalContext) -> Option<GraphInstructions> {
        if self.impossible {
            return None;
        }

        let eye = self.origin.above();
        let mut actions: SmallVec<[WorldAction; 4]> = self
            .mining
            .iter()
            .flatten()
            .map(|&mining| {
                let face = face_towards(mining.location, eye);
                WorldAction::BlockBreak(BlockBreakAction::new(mining, face))
            })
            .collect();

        match self.placement {
            Some(Placement::Pillar { location, against }) => {
                actions.push(WorldAction::JumpAndPlaceBelow(JumpAndPlaceBelowAction::new(
                    location,
                    against,
                    self.target,
                )));
            }
            Some(Placement::Bridge {
                location,
                against,
                face,
            }) => {
                actions.push(WorldAction::BlockPlace(BlockPlaceAction::new(
                    location, against, face,
                )));
                actions.push(WorldAction::Movement(MovementAction::new(self.target)));
            }
            None => actions.push(WorldAction::Movement(MovementAction::new(self.target))),
        }

        // the successor is exactly what running the actions is expected to do
        let next = actions
            .iter()
            .try_fold(node.clone(), |node, action| action.simulate(&node))?;

        let edge = RouteEdge {
            action: self.action,
            from: self.origin,
            to: self.target,
            cost: self.cost(&ctx.path_config.costs),
            actions,
        };

        Some(GraphInstructions { next, edge })
    }
}

pub struct Movements;

impl Movements {
    /// every possible edge out of `node`
    pub fn obtain_all(node: &EntityState, ctx: &GlobalContext) -> Vec<Neighbor<EntityState, RouteEdge>> {
        let bound = GraphAction::CATALOGUE.map(|action| action.bind(node, ctx));

        bound
            .into_iter()
            .filter_map(|bound| bound.instructions(node, ctx))
            .map(|GraphInstructions { next, edge }| Neighbor {
                value: next,
                cost: edge.cost,
                priority: edge.action.priority(),
                edge,
            })
            .collect()
    }
}
