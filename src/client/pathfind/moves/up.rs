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

use interfaces::BlockAccess;

use crate::client::pathfind::{
    context::GlobalContext,
    moves::{direction::BlockDirection, BoundAction, GraphAction, Placement},
    snapshot::EntityState,
};

/// Jump and place a block where the bot was standing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UpMovement;

impl UpMovement {
    pub fn bind(self, node: &EntityState, ctx: &GlobalContext) -> BoundAction {
        let origin = node.location;
        let target = origin.above();

        // the safety checks rotate through every side so the facing is arbitrary
        let mut bound = BoundAction::new(GraphAction::Up(self), origin, target, BlockDirection::North);

        if node.inventory.blocks() == 0 {
            bound.impossible = true;
            return bound;
        }

        bound.require_free(&[origin.add_y(2)], node, ctx);

        let against = origin.below();
        bound.require_solid(against, node, ctx);

        let standing_in = node.level.view(ctx.world).block_state(origin);
        if !standing_in.is_some_and(|state| state.passable()) {
            bound.impossible = true;
        }

        bound.placement = Some(Placement::Pillar {
            location: origin,
            against,
        });

        bound
    }
}
