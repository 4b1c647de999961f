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
    moves::{direction::BlockDirection, BoundAction, GraphAction},
    snapshot::EntityState,
};

/// Mine the block below and drop into it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DownMovement;

impl DownMovement {
    pub fn bind(self, node: &EntityState, ctx: &GlobalContext) -> BoundAction {
        let origin = node.location;
        let target = origin.below();

        let mut bound =
            BoundAction::new(GraphAction::Down(self), origin, target, BlockDirection::North);

        bound.require_free(&[target], node, ctx);
        bound.require_solid(target.below(), node, ctx);

        bound
    }
}
