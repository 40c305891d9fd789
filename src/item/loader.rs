//! Item loader and watcher, mirroring the block loader.
use super::{Item, ItemRegistry};
use crate::ron::{RonWatcher, load_ron_files, setup_ron_watcher};
use bevy::log::info;
use bevy::prelude::{Res, ResMut, Resource};
use std::path::Path;

#[derive(Resource)]
pub struct ItemWatcher(pub RonWatcher);

/// Load all item definitions from the RON files in `path`.
#[must_use]
pub fn load_items_from_dir(path: impl AsRef<Path>) -> ItemRegistry {
    let mut registry = ItemRegistry::default();
    let items: Vec<Item> = load_ron_files(path);
    for item in items {
        registry.register(item);
    }
    registry
}

/// # Errors
/// Returns a `notify::Error` if the watcher cannot be created for `path`.
pub fn setup_item_watcher(path: impl AsRef<Path>) -> Result<ItemWatcher, notify::Error> {
    setup_ron_watcher(path).map(ItemWatcher)
}

#[allow(clippy::needless_pass_by_value)]
pub fn check_item_changes(watcher: Res<ItemWatcher>, mut registry: ResMut<ItemRegistry>) {
    if watcher.0.take_changed() {
        *registry = load_items_from_dir(&watcher.0.dir);
        info!("items changed, reloaded {} definitions", registry.items.len());
    }
}

impl ItemWatcher {
    #[must_use]
    pub fn stub() -> Self {
        ItemWatcher(RonWatcher::stub())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_firewood_burns() {
        let registry = load_items_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data/items"));
        let firewood = registry.get("firewood").unwrap();
        assert!(firewood.combustible.is_some_and(|c| c.burn_duration > 0.0));
        assert!(!registry.igniters().is_empty());
    }
}
