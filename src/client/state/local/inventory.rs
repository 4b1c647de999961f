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

use interfaces::types::BlockKind;

use crate::{client::physics::tools::Tool, protocol::InterfaceOut};

const HOTBAR_START: usize = 36;
const HOTBAR_END: usize = 45;
const MAX_STACK: u8 = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: BlockKind,
    pub count: u8,
}

impl ItemStack {
    pub const fn new(kind: BlockKind, count: u8) -> Self {
        Self { kind, count }
    }

    pub fn tool(&self) -> Option<Tool> {
        Tool::from_item(self.kind.id())
    }
}

/// The client-side view of a player's inventory. Only the hotbar is used for
/// planning.
#[derive(Debug, Clone)]
pub struct PlayerInventory {
    slots: [Option<ItemStack>; 46],
    selected: u8,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            slots: [None; 46],
            selected: 0,
        }
    }
}

impl PlayerInventory {
    pub fn hotbar(&self) -> &[Option<ItemStack>] {
        &self.slots[HOTBAR_START..HOTBAR_END]
    }

    pub fn hotbar_mut(&mut self) -> &mut [Option<ItemStack>] {
        &mut self.slots[HOTBAR_START..HOTBAR_END]
    }

    pub const fn selected(&self) -> u8 {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&ItemStack> {
        self.hotbar()[self.selected as usize].as_ref()
    }

    pub fn current_tool(&self) -> Tool {
        self.selected_item()
            .and_then(ItemStack::tool)
            .unwrap_or_default()
    }

    /// number of blocks in the hotbar which can be used for bridging and
    /// pillaring
    pub fn placeable_count(&self) -> u32 {
        self.hotbar()
            .iter()
            .flatten()
            .filter(|stack| stack.kind.placeable())
            .map(|stack| u32::from(stack.count))
            .sum()
    }

    /// the slot change a server applies when told to
    pub fn set_selected(&mut self, idx: u8) {
        if (idx as usize) < HOTBAR_END - HOTBAR_START {
            self.selected = idx;
        }
    }

    /// returns true if a command was sent
    pub fn change_slot(&mut self, idx: u8, out: &mut impl InterfaceOut) -> bool {
        if self.selected == idx {
            return false;
        }

        self.selected = idx;
        out.change_slot(idx);
        true
    }

    /// Select a placeable block. Returns `None` if there is none in the hotbar,
    /// otherwise whether a command was sent.
    pub fn switch_block(&mut self, out: &mut impl InterfaceOut) -> Option<bool> {
        if self.selected_item().is_some_and(|stack| stack.kind.placeable()) {
            return Some(false);
        }

        let idx = self
            .hotbar()
            .iter()
            .position(|stack| stack.is_some_and(|stack| stack.kind.placeable()))?;

        Some(self.change_slot(idx as u8, out))
    }

    /// Select `tool`. The hand never needs a slot change since any held item
    /// mines at least as fast. Returns `None` if the tool is not in the hotbar,
    /// otherwise whether a command was sent.
    pub fn select_tool(&mut self, tool: Tool, out: &mut impl InterfaceOut) -> Option<bool> {
        if tool == Tool::HAND || self.current_tool() == tool {
            return Some(false);
        }

        let idx = self
            .hotbar()
            .iter()
            .position(|stack| stack.and_then(|stack| stack.tool()) == Some(tool))?;

        Some(self.change_slot(idx as u8, out))
    }

    /// place `count` items of `kind` into the first hotbar slot with room.
    /// Returns the number of items which did not fit.
    pub fn add_item(&mut self, kind: BlockKind, mut count: u8) -> u8 {
        for slot in self.hotbar_mut() {
            if count == 0 {
                break;
            }

            match slot {
                Some(stack) if stack.kind == kind && stack.count < MAX_STACK => {
                    let moved = count.min(MAX_STACK - stack.count);
                    stack.count += moved;
                    count -= moved;
                }
                _ => {}
            }
        }

        for slot in self.hotbar_mut() {
            if count == 0 {
                break;
            }

            if slot.is_none() {
                let moved = count.min(MAX_STACK);
                *slot = Some(ItemStack::new(kind, moved));
                count -= moved;
            }
        }

        count
    }

    /// remove one item from the selected slot, returning its kind
    pub fn take_selected(&mut self) -> Option<BlockKind> {
        let selected = self.selected as usize;
        let slot = &mut self.hotbar_mut()[selected];
        let stack = slot.as_mut()?;
        let kind = stack.kind;

        stack.count -= 1;
        if stack.count == 0 {
            *slot = None;
        }

        Some(kind)
    }

    pub fn set_hotbar(&mut self, idx: usize, stack: Option<ItemStack>) {
        self.hotbar_mut()[idx] = stack;
    }
}
