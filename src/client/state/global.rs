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

use interfaces::types::block_data::BlockData;

use crate::{
    client::pathfind::context::{GlobalContext, PathConfig},
    storage::blocks::WorldBlocks,
};

/// State shared by every bot of a session
pub struct GlobalState {
    pub blocks: WorldBlocks,
    pub block_data: BlockData,
    pub path_config: PathConfig,
}

impl GlobalState {
    pub fn new(blocks: WorldBlocks, path_config: PathConfig) -> anyhow::Result<Self> {
        Ok(Self {
            blocks,
            block_data: BlockData::read()?,
            path_config,
        })
    }

    pub fn context(&self) -> GlobalContext<'_> {
        GlobalContext {
            path_config: &self.path_config,
            block_data: &self.block_data,
            world: &self.blocks,
        }
    }
}
