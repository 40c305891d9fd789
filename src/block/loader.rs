//! Block loader and watcher for loading block definitions from RON files
//! and monitoring changes for hot reloading during runtime.
//! # Example
//! ```ignore
//! use bevy::prelude::*;
//! use bonfires::block::loader as block_loader;
//!
//! let mut app = App::new();
//! app.insert_resource(block_loader::load_blocks_from_dir("data/blocks"));
//! let watcher = block_loader::setup_block_watcher("data/blocks")
//!     .unwrap_or_else(|_| block_loader::BlockWatcher::stub());
//! app.insert_resource(watcher);
//! app.add_systems(Update, block_loader::check_block_changes);
//! ```

use super::{Block, BlockRegistry, blocks};
use crate::ron::{RonWatcher, load_ron_files, setup_ron_watcher};
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};
use std::path::Path;

#[derive(Resource)]
pub struct BlockWatcher(pub RonWatcher);

/// Load all block definitions from RON files.
///
/// Air (id 0) and the `__missing__` placeholder are always present, even when
/// the directory does not define them.
///
/// # Arguments
/// * `path` - The directory path where block RON files are located (e.g., "data/blocks").
///
/// # Returns
/// A `BlockRegistry` containing all loaded block definitions, indexed by both name and numeric ID
#[must_use]
pub fn load_blocks_from_dir(path: impl AsRef<Path>) -> BlockRegistry {
    let mut registry = BlockRegistry::default();
    let blocks: Vec<Block> = load_ron_files(path);
    for block in blocks {
        if let Some(existing) = registry.blocks_by_id.get(&block.id) {
            warn!("block {} reuses id {} of {existing}, replacing it", block.name, block.id);
        }
        registry.register(block);
    }

    if !registry.blocks_by_id.contains_key(&blocks::AIR) {
        registry.register(air());
    }

    let missing_id = registry.missing_id();
    if !registry.blocks_by_id.contains_key(&missing_id) {
        let placeholder = Block {
            name: "__missing__".to_string(),
            id: missing_id,
            ..Default::default()
        };
        registry.register(placeholder);
    }

    registry
}

fn air() -> Block {
    Block {
        name: "air".to_string(),
        id: blocks::AIR,
        hardness: 0.0,
        solid: false,
        replaceable: 9999,
        drop_count: 0,
        ..Default::default()
    }
}

/// Set up a file watcher to monitor changes in block RON files.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file watcher could not be created or configured.
pub fn setup_block_watcher(path: impl AsRef<Path>) -> Result<BlockWatcher, notify::Error> {
    setup_ron_watcher(path).map(BlockWatcher)
}

/// Reloads the block registry when the watched directory changes.
///
/// Block ids are stable across reloads as long as the files keep them, so
/// blocks already placed in the world keep their meaning.
#[allow(clippy::needless_pass_by_value)]
pub fn check_block_changes(watcher: Res<BlockWatcher>, mut registry: ResMut<BlockRegistry>) {
    if watcher.0.take_changed() {
        let reloaded = load_blocks_from_dir(&watcher.0.dir);
        info!(
            "blocks changed, reloaded {} definitions (was {})",
            reloaded.blocks.len(),
            registry.blocks.len()
        );
        *registry = reloaded;
    }
}

impl BlockWatcher {
    /// Create a stub `BlockWatcher` that does not have an active OS watcher.
    #[must_use]
    pub fn stub() -> Self {
        BlockWatcher(RonWatcher::stub())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_blocks_include_every_bonfire_stage() {
        let registry = load_blocks_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data/blocks"));
        for code in ["base", "construct1", "construct2", "construct3", "lit", "extinct"] {
            let name = format!("bonfire-{code}");
            let block = registry.get(&name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(block.entity_class.as_deref(), Some("BlockEntityBonfire"));
        }
        assert!(registry.get("fire").is_some());
    }

    #[test]
    fn empty_directory_still_has_air_and_placeholder() {
        let registry = load_blocks_from_dir("does/not/exist");
        let air = registry.get_by_id(blocks::AIR).unwrap();
        assert_eq!(air.name, "air");
        assert!(air.replaceable >= 9999);
        assert!(registry.get("__missing__").is_some());
    }
}
