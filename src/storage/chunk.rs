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

use interfaces::types::BlockState;

pub const SECTION_WIDTH: usize = 16;
pub const SECTION_HEIGHT: usize = 16;
const SECTION_ELEMENTS: usize = SECTION_WIDTH * SECTION_WIDTH * SECTION_HEIGHT;

/// lowest y a column can store
pub const MIN_Y: i16 = -64;

/// one past the highest y a column can store
pub const MAX_Y: i16 = 320;

const SECTIONS: usize = (MAX_Y - MIN_Y) as usize / SECTION_HEIGHT;

/// 16x16x16 blocks. Sections which only contain air are not allocated.
pub struct ChunkSection {
    blocks: Box<[BlockState]>,
}

impl Default for ChunkSection {
    fn default() -> Self {
        Self {
            blocks: vec![BlockState::AIR; SECTION_ELEMENTS].into_boxed_slice(),
        }
    }
}

impl ChunkSection {
    const fn idx(x: u8, y: u8, z: u8) -> usize {
        (((y as usize * SECTION_WIDTH) + z as usize) * SECTION_WIDTH) + x as usize
    }

    fn get_block(&self, x: u8, y: u8, z: u8) -> BlockState {
        self.blocks[Self::idx(x, y, z)]
    }

    fn set_block(&mut self, x: u8, y: u8, z: u8, state: BlockState) {
        self.blocks[Self::idx(x, y, z)] = state;
    }
}

/// A full-height column of sections.
pub struct ChunkColumn {
    sections: Vec<Option<ChunkSection>>,
}

impl Default for ChunkColumn {
    fn default() -> Self {
        let mut sections = Vec::with_capacity(SECTIONS);
        sections.resize_with(SECTIONS, || None);
        Self { sections }
    }
}

impl ChunkColumn {
    /// `x` and `z` are relative to the column. Returns `None` if `y` is out of
    /// the world's height range.
    pub fn get_block(&self, x: u8, y: i16, z: u8) -> Option<BlockState> {
        let (section_idx, y) = Self::split_y(y)?;
        let block = match &self.sections[section_idx] {
            None => BlockState::AIR,
            Some(section) => section.get_block(x, y, z),
        };
        Some(block)
    }

    /// returns false if `y` is out of range
    pub fn set_block(&mut self, x: u8, y: i16, z: u8, state: BlockState) -> bool {
        let Some((section_idx, y)) = Self::split_y(y) else {
            return false;
        };

        let section = &mut self.sections[section_idx];

        if section.is_none() && state == BlockState::AIR {
            return true;
        }

        section
            .get_or_insert_with(ChunkSection::default)
            .set_block(x, y, z, state);
        true
    }

    fn split_y(y: i16) -> Option<(usize, u8)> {
        if !(MIN_Y..MAX_Y).contains(&y) {
            return None;
        }

        let offset = (y - MIN_Y) as usize;
        Some((offset / SECTION_HEIGHT, (offset % SECTION_HEIGHT) as u8))
    }
}
