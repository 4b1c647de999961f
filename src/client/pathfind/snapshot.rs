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

//! Immutable search nodes. A node owns only what the search changed; the
//! unchanged world is read through the [`BlockAccess`] of the search context.

use std::hash::{Hash, Hasher};

use interfaces::{
    types::{BlockLocation, BlockState, Location},
    BlockAccess,
};
use smallvec::SmallVec;

use crate::client::{
    physics::tools::{Tool, ToolSet},
    state::local::inventory::PlayerInventory,
};

/// The blocks a search has hypothetically changed, sorted by location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LevelState {
    changes: SmallVec<[(BlockLocation, BlockState); 4]>,
}

impl LevelState {
    /// placed blocks are assumed to be cobblestone. Only their solidity matters.
    pub const PLACED: BlockState = BlockState::COBBLESTONE;

    pub fn changes(&self) -> &[(BlockLocation, BlockState)] {
        &self.changes
    }

    pub fn change(&self, location: BlockLocation) -> Option<BlockState> {
        self.changes
            .binary_search_by_key(&location, |&(loc, _)| loc)
            .ok()
            .map(|idx| self.changes[idx].1)
    }

    fn with_change(&self, location: BlockLocation, state: BlockState) -> Self {
        let mut changes = self.changes.clone();
        match changes.binary_search_by_key(&location, |&(loc, _)| loc) {
            Ok(idx) => changes[idx].1 = state,
            Err(idx) => changes.insert(idx, (location, state)),
        }
        Self { changes }
    }

    pub fn with_change_to_air(&self, location: BlockLocation) -> Self {
        self.with_change(location, BlockState::AIR)
    }

    pub fn with_change_to_solid_block(&self, location: BlockLocation) -> Self {
        self.with_change(location, Self::PLACED)
    }

    pub fn view<'a, W: BlockAccess + ?Sized>(&'a self, base: &'a W) -> LevelView<'a, W> {
        LevelView { base, level: self }
    }
}

/// A [`LevelState`] layered over the world it was derived from
pub struct LevelView<'a, W: ?Sized> {
    base: &'a W,
    level: &'a LevelState,
}

impl<W: BlockAccess + ?Sized> LevelView<'_, W> {
    pub fn is_changed(&self, location: BlockLocation) -> bool {
        self.level.change(location).is_some()
    }
}

impl<W: BlockAccess + ?Sized> BlockAccess for LevelView<'_, W> {
    fn block_state(&self, location: BlockLocation) -> Option<BlockState> {
        match self.level.change(location) {
            Some(state) => Some(state),
            None => self.base.block_state(location),
        }
    }
}

/// What the search knows about a bot's items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InventoryState {
    blocks: u32,
    tools: ToolSet,
}

impl InventoryState {
    pub const fn new(blocks: u32, tools: ToolSet) -> Self {
        Self { blocks, tools }
    }

    pub const fn blocks(&self) -> u32 {
        self.blocks
    }

    pub const fn tools(&self) -> ToolSet {
        self.tools
    }

    pub fn has_tool(&self, tool: Tool) -> bool {
        self.tools.contains(tool)
    }

    /// `None` if there is no block left to place
    pub fn with_one_less_block(&self) -> Option<Self> {
        let blocks = self.blocks.checked_sub(1)?;
        Some(Self { blocks, ..*self })
    }

    pub fn with_one_more_block(&self) -> Self {
        Self {
            blocks: self.blocks.saturating_add(1),
            ..*self
        }
    }
}

impl From<&PlayerInventory> for InventoryState {
    fn from(inventory: &PlayerInventory) -> Self {
        let mut tools = ToolSet::default();
        for tool in inventory.hotbar().iter().flatten().filter_map(|stack| stack.tool()) {
            tools.insert(tool);
        }

        Self {
            blocks: inventory.placeable_count(),
            tools,
        }
    }
}

/// A search node.
///
/// Two nodes are the same node when their block location, changed blocks and
/// inventory are equal. `exact` does not take part in equality.
#[derive(Clone, Debug)]
pub struct EntityState {
    pub location: BlockLocation,
    pub exact: Location,
    pub level: LevelState,
    pub inventory: InventoryState,
}

impl EntityState {
    pub fn new(location: BlockLocation, inventory: InventoryState) -> Self {
        Self {
            location,
            exact: location.center_bottom(),
            level: LevelState::default(),
            inventory,
        }
    }

    pub fn moved_to(&self, location: BlockLocation) -> Self {
        Self {
            location,
            exact: location.center_bottom(),
            ..self.clone()
        }
    }
}

impl PartialEq for EntityState {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
            && self.inventory == other.inventory
            && self.level == other.level
    }
}

impl Eq for EntityState {}

impl Hash for EntityState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.inventory.hash(state);
        self.level.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use interfaces::{
        types::{BlockLocation, BlockState, Location},
        BlockAccess,
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::client::pathfind::snapshot::{EntityState, InventoryState, LevelState};

    fn random_location(rng: &mut StdRng) -> BlockLocation {
        BlockLocation::new(rng.gen_range(-3..3), rng.gen_range(-3..3), rng.gen_range(-3..3))
    }

    #[test]
    fn test_change_to_air_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut world = HashMap::new();
        for x in -3..3 {
            for y in -3..3 {
                for z in -3..3 {
                    world.insert(BlockLocation::new(x, y, z), BlockState::STONE);
                }
            }
        }

        for _ in 0..200 {
            let mut level = LevelState::default();
            let p = random_location(&mut rng);

            for _ in 0..rng.gen_range(1..4) {
                let other = random_location(&mut rng);
                if other != p && rng.gen_bool(0.5) {
                    level = level.with_change_to_solid_block(other);
                }
                level = level.with_change_to_air(p);
            }

            let view = level.view(&world);
            assert_eq!(view.block_state(p), Some(BlockState::AIR));

            let q = random_location(&mut rng);
            if q != p && level.change(q).is_none() {
                assert_eq!(view.block_state(q), world.block_state(q));
            }
        }
    }

    #[test]
    fn test_overlay_does_not_load_blocks() {
        let world: HashMap<BlockLocation, BlockState> = HashMap::new();
        let level = LevelState::default().with_change_to_air(BlockLocation::ZERO);
        let view = level.view(&world);

        assert_eq!(view.block_state(BlockLocation::ZERO), Some(BlockState::AIR));
        assert_eq!(view.block_state(BlockLocation::new(0, 1, 0)), None);
        assert!(view.is_changed(BlockLocation::ZERO));
    }

    #[test]
    fn test_overlay_is_order_independent() {
        let a = BlockLocation::new(1, 0, 0);
        let b = BlockLocation::new(-1, 4, 2);

        let first = LevelState::default().with_change_to_air(a).with_change_to_solid_block(b);
        let second = LevelState::default().with_change_to_solid_block(b).with_change_to_air(a);
        assert_eq!(first, second);
    }

    #[test]
    fn test_node_identity_ignores_exact() {
        let mut a = EntityState::new(BlockLocation::ZERO, InventoryState::default());
        let b = a.clone();
        a.exact = Location::new(0.1, 0.0, 0.9);
        assert_eq!(a, b);

        let c = b.moved_to(BlockLocation::new(0, 1, 0));
        assert_ne!(b, c);
        assert_eq!(c.exact, BlockLocation::new(0, 1, 0).center_bottom());
    }

    #[test]
    fn test_inventory_counters() {
        let empty = InventoryState::default();
        assert_eq!(empty.with_one_less_block(), None);

        let one = empty.with_one_more_block();
        assert_eq!(one.blocks(), 1);
        assert_eq!(one.with_one_less_block(), Some(empty));
    }
}
