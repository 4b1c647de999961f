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

use std::io::Read;

use anyhow::Context;
use interfaces::{types::block_data::BlockData, BlockAccess};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Costs {
    pub block_walk: f64,
    pub block_diagonal: f64,
    /// added to a diagonal move when one of the corners is blocked
    pub corner_penalty: f64,
    pub jump_up_block: f64,
    pub fall_block: f64,
    /// jump and place a block below
    pub pillar: f64,
    /// mine the block below and drop into it
    pub dig_down: f64,
    pub mine_required: f64,
    pub mine_per_tick: f64,
    pub place_required: f64,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            block_walk: 1.0,
            block_diagonal: 1.5,
            corner_penalty: 0.5,
            jump_up_block: 2.0,
            fall_block: 1.5,
            pillar: 3.0,
            dig_down: 3.5,
            mine_required: 1.0,
            mine_per_tick: 0.2,
            place_required: 1.0,
        }
    }
}

impl Costs {
    /// the cheapest way to advance one block horizontally in a straight line
    pub fn min_straight(&self) -> f64 {
        self.block_walk.min(self.jump_up_block).min(self.fall_block)
    }

    pub fn min_diagonal(&self) -> f64 {
        self.block_diagonal.min(2.0 * self.min_straight())
    }

    pub fn min_up(&self) -> f64 {
        self.jump_up_block.min(self.pillar)
    }

    pub fn min_down(&self) -> f64 {
        self.fall_block.min(self.dig_down)
    }
}

/// Bounds the work a single search may do. Running out is reported as a
/// failure, never as a partial route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    pub max_expansions: usize,
    pub max_millis: Option<u64>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
            max_millis: Some(5_000),
        }
    }
}

impl SearchBudget {
    pub const fn expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions,
            max_millis: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub costs: Costs,
    pub budget: SearchBudget,
    /// how many times a navigation may re-plan after its route fails
    pub max_replans: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            costs: Costs::default(),
            budget: SearchBudget::default(),
            max_replans: 3,
        }
    }
}

impl PathConfig {
    pub fn load(reader: impl Read) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("could not parse path config")
    }
}

/// Everything a search reads besides its nodes. All of it is shared and
/// read-only, so independent searches can run on different threads.
#[derive(Clone, Copy)]
pub struct GlobalContext<'a> {
    pub path_config: &'a PathConfig,
    pub block_data: &'a BlockData,
    pub world: &'a (dyn BlockAccess + Sync),
}
