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

use interfaces::types::block_data::{Block, Material};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolMat {
    Hand,
    Wood,
    Stone,
    Iron,
    Diamond,
    Gold,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolKind {
    Generic,
    Pickaxe,
    Shovel,
    Axe,
    Sword,
}

impl ToolMat {
    pub const fn strength(self) -> f64 {
        match self {
            Self::Hand => 1.0,
            Self::Wood => 2.0,
            Self::Stone => 4.0,
            Self::Iron => 6.0,
            Self::Diamond => 8.0,
            Self::Gold => 12.0,
        }
    }
}

impl ToolKind {
    const fn effective_against(self, material: Material) -> bool {
        matches!(
            (self, material),
            (Self::Pickaxe, Material::Rock)
                | (Self::Shovel, Material::Dirt)
                | (Self::Axe, Material::Wood)
                | (Self::Sword, Material::Web)
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tool {
    pub material: ToolMat,
    pub kind: ToolKind,
}

impl Default for Tool {
    fn default() -> Self {
        Self::HAND
    }
}

/// (item id, kind, material) for every 1.12 tool which helps with mining
const TOOL_ITEMS: [(u32, ToolKind, ToolMat); 20] = [
    (256, ToolKind::Shovel, ToolMat::Iron),
    (257, ToolKind::Pickaxe, ToolMat::Iron),
    (258, ToolKind::Axe, ToolMat::Iron),
    (267, ToolKind::Sword, ToolMat::Iron),
    (268, ToolKind::Sword, ToolMat::Wood),
    (269, ToolKind::Shovel, ToolMat::Wood),
    (270, ToolKind::Pickaxe, ToolMat::Wood),
    (271, ToolKind::Axe, ToolMat::Wood),
    (272, ToolKind::Sword, ToolMat::Stone),
    (273, ToolKind::Shovel, ToolMat::Stone),
    (274, ToolKind::Pickaxe, ToolMat::Stone),
    (275, ToolKind::Axe, ToolMat::Stone),
    (276, ToolKind::Sword, ToolMat::Diamond),
    (277, ToolKind::Shovel, ToolMat::Diamond),
    (278, ToolKind::Pickaxe, ToolMat::Diamond),
    (279, ToolKind::Axe, ToolMat::Diamond),
    (283, ToolKind::Sword, ToolMat::Gold),
    (284, ToolKind::Shovel, ToolMat::Gold),
    (285, ToolKind::Pickaxe, ToolMat::Gold),
    (286, ToolKind::Axe, ToolMat::Gold),
];

impl Tool {
    pub const HAND: Self = Self::new(ToolKind::Generic, ToolMat::Hand);

    pub const fn new(kind: ToolKind, material: ToolMat) -> Self {
        Self { material, kind }
    }

    pub fn from_item(id: u32) -> Option<Self> {
        TOOL_ITEMS
            .iter()
            .find(|(item, ..)| *item == id)
            .map(|&(_, kind, material)| Self::new(kind, material))
    }

    /// `None` for the hand
    pub fn item_id(self) -> Option<u32> {
        TOOL_ITEMS
            .iter()
            .find(|&&(_, kind, material)| kind == self.kind && material == self.material)
            .map(|(id, ..)| *id)
    }

    fn speed_against(self, material: Material) -> f64 {
        if self.kind.effective_against(material) {
            self.material.strength()
        } else {
            1.0
        }
    }

    /// The number of ticks needed to break `block` with this tool, or `None` if
    /// the block cannot be broken or would not drop anything.
    ///
    /// <https://minecraft.fandom.com/wiki/Breaking#Speed>
    pub fn break_ticks(self, block: &Block) -> Option<u32> {
        if !block.breakable() || !block.can_harvest_with(self.item_id()) {
            return None;
        }

        let hardness = block.hardness?;
        let raw = hardness * 30.0 / self.speed_against(block.material);

        // so 0.6 * 30 stays 18 ticks
        let ticks = (raw - 1e-9).ceil().max(0.0);
        Some(ticks as u32)
    }
}

/// The distinct tools a bot can choose from. The hand is always available.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToolSet(u32);

impl ToolSet {
    fn bit(tool: Tool) -> Option<u32> {
        TOOL_ITEMS
            .iter()
            .position(|&(_, kind, material)| kind == tool.kind && material == tool.material)
            .map(|idx| 1 << idx)
    }

    pub fn insert(&mut self, tool: Tool) {
        if let Some(bit) = Self::bit(tool) {
            self.0 |= bit;
        }
    }

    pub fn with(mut self, tool: Tool) -> Self {
        self.insert(tool);
        self
    }

    pub fn contains(self, tool: Tool) -> bool {
        tool == Tool::HAND || Self::bit(tool).is_some_and(|bit| self.0 & bit != 0)
    }

    /// the hand first, then every held tool
    pub fn iter(self) -> impl Iterator<Item = Tool> {
        let held = TOOL_ITEMS
            .iter()
            .enumerate()
            .filter(move |(idx, _)| self.0 & (1 << idx) != 0)
            .map(|(_, &(_, kind, material))| Tool::new(kind, material));

        std::iter::once(Tool::HAND).chain(held)
    }
}
