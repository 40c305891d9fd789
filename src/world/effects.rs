//! Side effects produced by block logic during a frame.
//!
//! Block entities never talk to observers directly. They record what
//! happened here and `publish_world_changes` turns the records into events
//! at the end of the frame.
use crate::item::ItemStack;
use bevy::math::{IVec3, Vec3};
use bevy::prelude::Resource;

#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub sound: String,
    pub pos: IVec3,
    pub player: Option<String>, // Player that caused the sound, if any
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub stack: ItemStack,
    pub position: Vec3,
}

#[derive(Resource, Debug, Default)]
pub struct WorldEffects {
    pub dirty: Vec<IVec3>,          // Block entities whose state changed
    pub changed_blocks: Vec<IVec3>, // Block ids that changed
    pub removed: Vec<IVec3>,        // Block entities that were removed
    pub sounds: Vec<SoundCue>,
    pub drops: Vec<DroppedItem>,
}

impl WorldEffects {
    pub fn mark_dirty(&mut self, pos: IVec3) {
        if !self.dirty.contains(&pos) {
            self.dirty.push(pos);
        }
    }

    pub fn block_changed(&mut self, pos: IVec3) {
        if !self.changed_blocks.contains(&pos) {
            self.changed_blocks.push(pos);
        }
    }

    pub fn block_entity_removed(&mut self, pos: IVec3) {
        self.dirty.retain(|p| *p != pos);
        self.removed.push(pos);
    }

    pub fn play_sound(&mut self, sound: impl Into<String>, pos: IVec3, player: Option<&str>) {
        self.sounds.push(SoundCue {
            sound: sound.into(),
            pos,
            player: player.map(str::to_string),
        });
    }

    /// Drop `stack` at the centre of the block at `pos`.
    pub fn drop_item(&mut self, stack: ItemStack, pos: IVec3) {
        self.drops.push(DroppedItem {
            stack,
            position: pos.as_vec3() + Vec3::splat(0.5),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
            && self.changed_blocks.is_empty()
            && self.removed.is_empty()
            && self.sounds.is_empty()
            && self.drops.is_empty()
    }
}
