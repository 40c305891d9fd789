//! This module defines the `Block` and `BlockRegistry` types used by the
//! world. Blocks are named by dash separated codes (`ore-poor-iron-granite`,
//! `bonfire-lit`); the first part names the block type and the last part its
//! variant. Variant helpers below build sibling codes from those parts.
//!
//! Example:
//! ```rust
//! use bonfires::block::registry::Block;
//!
//! let mut b = Block::default();
//! b.name = "bonfire-construct2".to_string();
//! assert_eq!(b.first_code_part(), "bonfire");
//! assert_eq!(b.last_code_part(), "construct2");
//! assert_eq!(b.code_with_last_part("lit"), "bonfire-lit");
//! ```
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Burn properties of a block or item that can be used as fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombustibleProps {
    pub burn_duration: f32, // Seconds one unit burns for
    #[serde(default)]
    pub burn_temperature: f32,
}

/// Sound cues attached to a block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockSounds {
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub ambient: Option<String>, // Looping sound while a block entity reports it as active
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub id: u8,

    /// Behaviour class registered in `BlockClasses` (e.g. `BlockBonfire`).
    #[serde(default)]
    pub class: Option<String>,
    /// Block-entity class instantiated when the block is placed or loaded.
    #[serde(default)]
    pub entity_class: Option<String>,
    #[serde(default = "Block::default_hardness")]
    pub hardness: f32,
    #[serde(default = "Block::default_solid")]
    pub solid: bool,
    /// How easily another block may take this cell. Air is 9999, solid stone 0.
    #[serde(default)]
    pub replaceable: u32,
    #[serde(default)]
    pub combustible: Option<CombustibleProps>,
    /// Set for fluid blocks (`water`); these live in the fluid layer of the world.
    #[serde(default)]
    pub liquid_code: Option<String>,
    #[serde(default)]
    pub sounds: BlockSounds,
    #[serde(default)]
    pub drop_item: Option<String>,
    #[serde(default = "Block::default_drop_count")]
    pub drop_count: u32,
}

impl Block {
    fn default_hardness() -> f32 { 1.5 }
    fn default_solid() -> bool { true }
    fn default_drop_count() -> u32 { 1 }

    /// Block type, the part of the code before the first `-`.
    #[must_use]
    pub fn first_code_part(&self) -> &str {
        self.name.split('-').next().unwrap_or(&self.name)
    }

    /// Variant, the part of the code after the last `-`.
    #[must_use]
    pub fn last_code_part(&self) -> &str {
        self.name.rsplit('-').next().unwrap_or(&self.name)
    }

    /// Same code with its first part swapped (`ore-poor-iron` -> `cracked_ore-poor-iron`).
    #[must_use]
    pub fn code_with_first_part(&self, first: &str) -> String {
        match self.name.split_once('-') {
            Some((_, rest)) => format!("{first}-{rest}"),
            None => first.to_string(),
        }
    }

    /// Same code with its last part swapped (`bonfire-construct3` -> `bonfire-lit`).
    #[must_use]
    pub fn code_with_last_part(&self, last: &str) -> String {
        match self.name.rsplit_once('-') {
            Some((head, _)) => format!("{head}-{last}"),
            None => last.to_string(),
        }
    }

    /// Combustible with a positive burn duration.
    #[must_use]
    pub fn is_combustible(&self) -> bool {
        self.combustible.is_some_and(|c| c.burn_duration > 0.0)
    }

    #[must_use]
    pub fn is_liquid(&self) -> bool {
        self.liquid_code.is_some()
    }
}

impl Default for Block {
    fn default() -> Self {
        Self {
            name: "rock-granite".to_string(),
            id: 1,
            class: None,
            entity_class: None,
            hardness: Self::default_hardness(),
            solid: true,
            replaceable: 0,
            combustible: None,
            liquid_code: None,
            sounds: BlockSounds::default(),
            drop_item: None,
            drop_count: Self::default_drop_count(),
        }
    }
}

#[derive(Resource, Default, Clone)]
pub struct BlockRegistry {
    pub blocks: HashMap<String, Block>,
    pub blocks_by_id: HashMap<u8, String>,
}

impl BlockRegistry {
    pub fn register(&mut self, block: Block) {
        self.blocks_by_id.insert(block.id, block.name.clone());
        self.blocks.insert(block.name.clone(), block);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    #[must_use]
    pub fn get_by_id(&self, id: u8) -> Option<&Block> {
        self.blocks_by_id
            .get(&id)
            .and_then(|name| self.blocks.get(name))
    }

    /// Lookup numeric ID for a block `name`.
    #[must_use]
    pub fn id_for_name(&self, name: &str) -> Option<u8> {
        self.blocks.get(name).map(|b| b.id)
    }

    /// Sentinel id to use when a requested block name is missing.
    /// This id is reserved for a placeholder block.
    #[must_use]
    pub fn missing_id(&self) -> u8 {
        u8::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Block {
        Block { name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn code_parts_of_multi_part_names() {
        let ore = named("ore-poor-iron-granite");
        assert_eq!(ore.first_code_part(), "ore");
        assert_eq!(ore.last_code_part(), "granite");
        assert_eq!(ore.code_with_first_part("cracked_ore"), "cracked_ore-poor-iron-granite");
    }

    #[test]
    fn code_parts_of_single_part_names() {
        let fire = named("fire");
        assert_eq!(fire.first_code_part(), "fire");
        assert_eq!(fire.last_code_part(), "fire");
        assert_eq!(fire.code_with_last_part("lit"), "lit");
    }

    #[test]
    fn zero_burn_duration_is_not_combustible() {
        let mut b = named("planks-oak");
        b.combustible = Some(CombustibleProps { burn_duration: 0.0, burn_temperature: 600.0 });
        assert!(!b.is_combustible());
        b.combustible = Some(CombustibleProps { burn_duration: 12.0, burn_temperature: 600.0 });
        assert!(b.is_combustible());
    }

    #[test]
    fn registry_lookups_by_name_and_id() {
        let mut registry = BlockRegistry::default();
        let mut soil = named("soil");
        soil.id = 7;
        registry.register(soil);
        assert_eq!(registry.id_for_name("soil"), Some(7));
        assert_eq!(registry.get_by_id(7).map(|b| b.name.as_str()), Some("soil"));
        assert!(registry.get("fire").is_none());
    }
}
