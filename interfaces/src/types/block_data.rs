use std::collections::HashMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    #[default]
    Generic,
    Rock,
    Dirt,
    Wood,
    Plant,
    Web,
    Wool,
}

/// Uses prismarine.js block data. We comment out the fields that we do not use
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub id: u32,
    // pub display_name: String,
    pub name: String,
    pub hardness: Option<f64>,
    pub harvest_tools: Option<HashMap<u32, bool>>,
    pub material: Option<Material>,
    // pub stack_size: u32,
    // pub diggable: bool,
    // pub bounding_box: String,
    pub drops: Option<Vec<u32>>,
    #[serde(default)]
    pub gravity: bool,
    // pub transparent: bool,
    // pub emit_light: u32,
    // pub filter_light: u32,
    // pub resistance: f64
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: u32,
    pub name: String,
    /// `None` or negative when the block cannot be broken
    pub hardness: Option<f64>,
    /// item ids which can harvest this block. Empty if anything can.
    pub harvest_tools: Vec<u32>,
    pub material: Material,
    /// item ids dropped when harvested
    pub drops: Vec<u32>,
    /// falls when the block below is removed (sand, gravel)
    pub gravity: bool,
}

impl From<RawBlock> for Block {
    fn from(block: RawBlock) -> Self {
        let mut harvest_tools: Vec<u32> = block
            .harvest_tools
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| v.then_some(k))
            .collect();
        harvest_tools.sort_unstable();

        Self {
            id: block.id,
            name: block.name,
            hardness: block.hardness,
            harvest_tools,
            material: block.material.unwrap_or_default(),
            // absent means the block drops itself
            drops: block.drops.unwrap_or_else(|| vec![block.id]),
            gravity: block.gravity,
        }
    }
}

impl Block {
    pub fn requires_tool(&self) -> bool {
        !self.harvest_tools.is_empty()
    }

    pub fn can_harvest_with(&self, item_id: Option<u32>) -> bool {
        if !self.requires_tool() {
            return true;
        }

        item_id.is_some_and(|id| self.harvest_tools.binary_search(&id).is_ok())
    }

    pub fn breakable(&self) -> bool {
        self.hardness.is_some_and(|hardness| (0.0..100.0).contains(&hardness))
    }
}

pub struct BlockData {
    // lookup by id
    block_lookup: HashMap<u32, Block>,
}

impl BlockData {
    pub fn by_id(&self, id: u32) -> Option<&Block> {
        self.block_lookup.get(&id)
    }

    pub fn read() -> anyhow::Result<Self> {
        Self::parse(include_str!("blocks.json"))
    }

    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let blocks: Vec<RawBlock> =
            serde_json::from_str(json).context("could not parse block table")?;

        let block_lookup = blocks
            .into_iter()
            .map(Block::from)
            .map(|elem| (elem.id, elem))
            .collect();

        Ok(Self { block_lookup })
    }
}

#[cfg(test)]
mod tests {
    use crate::types::block_data::{BlockData, Material};

    #[test]
    fn test_embedded_table() {
        let data = BlockData::read().unwrap();

        let stone = data.by_id(1).unwrap();
        assert_eq!(stone.material, Material::Rock);
        assert!(stone.requires_tool());
        assert!(stone.can_harvest_with(Some(270)));
        assert!(!stone.can_harvest_with(None));
        assert_eq!(stone.drops, vec![4]);

        let sand = data.by_id(12).unwrap();
        assert!(sand.gravity);
        assert!(sand.can_harvest_with(None));
        assert_eq!(sand.drops, vec![12]);

        let bedrock = data.by_id(7).unwrap();
        assert!(!bedrock.breakable());

        let water = data.by_id(9).unwrap();
        assert!(!water.breakable());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(BlockData::parse("{ not json").is_err());
    }
}
