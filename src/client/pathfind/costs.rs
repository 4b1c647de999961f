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

use interfaces::types::{BlockKind, BlockLocation, BlockState};

use crate::client::{
    pathfind::{context::GlobalContext, snapshot::InventoryState},
    physics::tools::Tool,
};

/// The price of breaking one block on an edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiningCost {
    pub location: BlockLocation,
    /// what the block is expected to be when it is mined
    pub state: BlockState,
    /// the block was placed by an earlier edge of the same search
    pub placed: bool,
    pub tool: Tool,
    pub ticks: u32,
    pub cost: f64,
    /// mining gives back a block which can be placed
    pub will_drop: bool,
}

/// Price breaking `state` with the best tool in `inventory`. `None` when the
/// block cannot be harvested with anything held (or cannot be broken at all).
pub fn mining_cost(
    location: BlockLocation,
    state: BlockState,
    placed: bool,
    inventory: &InventoryState,
    ctx: &GlobalContext,
) -> Option<MiningCost> {
    if state.is_fluid() {
        return None;
    }

    let block = ctx.block_data.by_id(state.id())?;

    let (tool, ticks) = inventory
        .tools()
        .iter()
        .filter_map(|tool| Some((tool, tool.break_ticks(block)?)))
        // prefer the hand on ties so tools are not used up
        .min_by_key(|&(tool, ticks)| (ticks, tool != Tool::HAND))?;

    let will_drop = block.drops.iter().any(|&id| BlockKind(id).placeable());

    let costs = &ctx.path_config.costs;
    let cost = f64::from(ticks).mul_add(costs.mine_per_tick, costs.mine_required);

    Some(MiningCost {
        location,
        state,
        placed,
        tool,
        ticks,
        cost,
        will_drop,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use interfaces::types::{block_data::BlockData, BlockLocation, BlockState};

    use crate::client::{
        pathfind::{
            context::{GlobalContext, PathConfig},
            costs::mining_cost,
            snapshot::InventoryState,
        },
        physics::tools::{Tool, ToolKind, ToolMat, ToolSet},
    };

    #[test]
    fn test_tool_aware_cost() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let world: HashMap<BlockLocation, BlockState> = HashMap::new();
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };

        let loc = BlockLocation::ZERO;
        let hand = InventoryState::default();

        let sand = mining_cost(loc, BlockState::SAND, false, &hand, &ctx).unwrap();
        assert_eq!(sand.tool, Tool::HAND);
        assert_eq!(sand.ticks, 15);
        assert!((sand.cost - 4.0).abs() < 1e-9);
        assert!(sand.will_drop);

        // needs a pickaxe
        assert!(mining_cost(loc, BlockState::STONE, false, &hand, &ctx).is_none());
        assert!(mining_cost(loc, BlockState::BEDROCK, false, &hand, &ctx).is_none());
        assert!(mining_cost(loc, BlockState::WATER, false, &hand, &ctx).is_none());

        let pick = Tool::new(ToolKind::Pickaxe, ToolMat::Wood);
        let shovel = Tool::new(ToolKind::Shovel, ToolMat::Wood);
        let tools = InventoryState::new(0, ToolSet::default().with(pick).with(shovel));

        let stone = mining_cost(loc, BlockState::STONE, false, &tools, &ctx).unwrap();
        assert_eq!(stone.tool, pick);
        assert_eq!(stone.ticks, 23);
        // stone drops cobblestone
        assert!(stone.will_drop);

        let sand = mining_cost(loc, BlockState::SAND, false, &tools, &ctx).unwrap();
        assert_eq!(sand.tool, shovel);
        assert_eq!(sand.ticks, 8);
    }

    #[test]
    fn test_glass_drops_nothing() {
        let config = PathConfig::default();
        let data = BlockData::read().unwrap();
        let world: HashMap<BlockLocation, BlockState> = HashMap::new();
        let ctx = GlobalContext {
            path_config: &config,
            block_data: &data,
            world: &world,
        };

        let glass = BlockState::from(20, 0);
        let cost = mining_cost(BlockLocation::ZERO, glass, false, &InventoryState::default(), &ctx)
            .unwrap();
        assert!(!cost.will_drop);
        assert_eq!(cost.ticks, 9);
    }
}
