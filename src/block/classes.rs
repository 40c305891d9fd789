//! Block behaviour classes and block-entity classes.
//!
//! Block definitions name a behaviour `class` and an `entity_class` by
//! string. `BlockClasses` resolves those names: behaviour classes to shared
//! `BlockBehavior` objects, entity classes to constructors that are called
//! whenever a block carrying that class is placed or loaded.
use bevy::log::warn;
use bevy::math::IVec3;
use bevy::prelude::Resource;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::fire::ignite::Ignitable;
use crate::item::{ItemSlot, ItemStack};
use crate::player::Player;
use crate::world::{BlockContext, BlockEntity};

pub const BLOCK_BONFIRE: &str = "BlockBonfire";
pub const BLOCK_ENTITY_BONFIRE: &str = "BlockEntityBonfire";
pub const BLOCK_ENTITY_FIRE: &str = "BlockEntityFire";

/// Why a block declined an interaction. None of these are errors for the
/// player: the interaction simply has no effect and default handling applies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("not handled by this block")]
    NotHandled,
    #[error("no block entity at the target")]
    NoBlockEntity,
    #[error("already lit")]
    AlreadyLit,
    #[error("fuel is full")]
    FuelFull,
    #[error("no fuel")]
    NoFuel,
    #[error("construction is not finished")]
    NotConstructed,
    #[error("no block variant {0}")]
    MissingVariant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractButton {
    Left,
    Right,
}

/// A hint shown to players looking at a placed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldInteraction {
    pub action_lang_code: &'static str,
    pub button: InteractButton,
    pub hot_key: Option<&'static str>,
    pub item_stacks: Vec<ItemStack>,
}

/// Behaviour shared by every block of a class.
pub trait BlockBehavior: Send + Sync {
    /// Player used the block while holding `slot`.
    ///
    /// # Errors
    /// `Rejected::NotHandled` lets the host fall back to default handling;
    /// other variants say why the interaction had no effect.
    fn on_interact(
        &self,
        _ctx: &mut BlockContext,
        _pos: IVec3,
        _player: &Player,
        _slot: &mut ItemSlot,
    ) -> Result<(), Rejected> {
        Err(Rejected::NotHandled)
    }

    /// Interaction hints for the placed block at `pos`.
    fn interaction_help(&self, _ctx: &BlockContext, _pos: IVec3) -> Vec<WorldInteraction> {
        Vec::new()
    }

    fn as_ignitable(&self) -> Option<&dyn Ignitable> {
        None
    }
}

pub type BlockEntityFactory = fn() -> BlockEntity;

#[derive(Resource, Default, Clone)]
pub struct BlockClasses {
    block_classes: HashMap<String, Arc<dyn BlockBehavior>>,
    entity_classes: HashMap<String, BlockEntityFactory>,
}

impl BlockClasses {
    pub fn register_block_class(&mut self, name: &str, behavior: impl BlockBehavior + 'static) {
        if self.block_classes.insert(name.to_string(), Arc::new(behavior)).is_some() {
            warn!("block class {name} registered twice, keeping the last one");
        }
    }

    pub fn register_block_entity_class(&mut self, name: &str, factory: BlockEntityFactory) {
        if self.entity_classes.insert(name.to_string(), factory).is_some() {
            warn!("block entity class {name} registered twice, keeping the last one");
        }
    }

    #[must_use]
    pub fn behavior(&self, class: &str) -> Option<Arc<dyn BlockBehavior>> {
        self.block_classes.get(class).cloned()
    }

    /// Construct a fresh, uninitialized block entity of `class`.
    #[must_use]
    pub fn create_entity(&self, class: &str) -> Option<BlockEntity> {
        self.entity_classes.get(class).map(|factory| factory())
    }

    #[must_use]
    pub fn has_entity_class(&self, class: &str) -> bool {
        self.entity_classes.contains_key(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonfire::register_classes;

    #[test]
    fn bonfire_classes_are_registered() {
        let mut classes = BlockClasses::default();
        register_classes(&mut classes);

        let behavior = classes.behavior(BLOCK_BONFIRE).unwrap();
        assert!(behavior.as_ignitable().is_some());
        assert!(matches!(classes.create_entity(BLOCK_ENTITY_BONFIRE), Some(BlockEntity::Bonfire(_))));
        assert!(matches!(classes.create_entity(BLOCK_ENTITY_FIRE), Some(BlockEntity::Fire(_))));
        assert!(classes.create_entity("BlockEntityKiln").is_none());
        assert!(classes.behavior(BLOCK_ENTITY_BONFIRE).is_none());
    }
}
