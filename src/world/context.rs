//! Mutable access to the world for block logic.
//!
//! `BlockContext` bundles everything a block or block entity may touch while
//! handling an interaction or a tick: the voxel world, the registries, the
//! tick scheduler, land claims, settings, the effect log and the world random
//! source. Systems build one from the `BlockCtx` system param; tests build one
//! from plain values.
//!
//! The context owns the block-entity lifecycle:
//! * `place_block` removes the entity of the replaced block and creates the
//!   entity of the new block (if its definition names an entity class),
//! * `exchange_block` swaps the block id and keeps the entity (variant changes),
//! * `break_block` removes the block and its entity and drops the block's item.
use bevy::ecs::system::SystemParam;
use bevy::log::warn;
use bevy::math::IVec3;
use bevy::prelude::{Res, ResMut};
use rand::rngs::StdRng;

use super::{BlockEntity, World, WorldEffects, WorldRng};
use crate::block::{Block, BlockClasses, BlockId, BlockRegistry, blocks};
use crate::item::{ItemRegistry, ItemStack};
use crate::protection::Protection;
use crate::settings::Settings;
use crate::tick::TickScheduler;

pub struct BlockContext<'a> {
    pub world: &'a mut World,
    pub blocks: &'a BlockRegistry,
    pub items: &'a ItemRegistry,
    pub classes: &'a BlockClasses,
    pub scheduler: &'a mut TickScheduler,
    pub protection: &'a Protection,
    pub settings: &'a Settings,
    pub effects: &'a mut WorldEffects,
    pub rng: &'a mut StdRng,
}

impl<'a> BlockContext<'a> {
    /// Definition of the block at `pos`.
    #[must_use]
    pub fn block(&self, pos: IVec3) -> Option<&'a Block> {
        let blocks: &'a BlockRegistry = self.blocks;
        blocks.get_by_id(self.world.get_block(pos))
    }

    /// Definition of the fluid at `pos`.
    #[must_use]
    pub fn fluid(&self, pos: IVec3) -> Option<&'a Block> {
        let blocks: &'a BlockRegistry = self.blocks;
        self.world.get_fluid(pos).and_then(|id| blocks.get_by_id(id))
    }

    /// Whether `pos` is covered by the liquid named `liquid_code`.
    #[must_use]
    pub fn has_liquid(&self, pos: IVec3, liquid_code: &str) -> bool {
        let covering = self.fluid(pos).or_else(|| self.block(pos));
        covering.and_then(|b| b.liquid_code.as_deref()) == Some(liquid_code)
    }

    /// Place `id` at `pos`, replacing the old block and its block entity.
    ///
    /// Returns `false` if `pos` is outside the world.
    pub fn place_block(&mut self, pos: IVec3, id: BlockId) -> bool {
        if !World::in_bounds(pos) {
            return false;
        }
        if let Some(mut old) = self.world.block_entities.remove(&pos) {
            old.on_removed(self, pos);
        }
        self.world.set_block(pos, id);
        self.effects.block_changed(pos);

        let blocks: &'a BlockRegistry = self.blocks;
        let classes: &'a BlockClasses = self.classes;
        let entity_class = blocks.get_by_id(id).and_then(|b| b.entity_class.as_deref());
        if let Some(class) = entity_class {
            match classes.create_entity(class) {
                Some(mut entity) => {
                    entity.initialize(self, pos);
                    self.world.block_entities.insert(pos, entity);
                    self.effects.mark_dirty(pos);
                }
                None => warn!("block entity class {class} is not registered, {pos} has no block entity"),
            }
        }
        true
    }

    /// Swap the block at `pos` for `id`, keeping its block entity.
    pub fn exchange_block(&mut self, pos: IVec3, id: BlockId) {
        if self.world.set_block(pos, id) {
            self.effects.block_changed(pos);
        }
    }

    /// Remove the block at `pos`. With `drops` the block's drop item is spawned.
    ///
    /// Returns `false` if there was nothing to break.
    pub fn break_block(&mut self, pos: IVec3, drops: bool) -> bool {
        let id = self.world.get_block(pos);
        if id == blocks::AIR {
            return false;
        }
        let block = self.block(pos);
        if let Some(mut entity) = self.world.block_entities.remove(&pos) {
            entity.on_removed(self, pos);
        }
        self.world.set_block(pos, blocks::AIR);
        self.effects.block_changed(pos);

        if drops
            && let Some(block) = block
            && let Some(item) = &block.drop_item
            && block.drop_count > 0
        {
            self.effects.drop_item(ItemStack::new(item.clone(), block.drop_count), pos);
        }
        true
    }

    /// Run `f` with the block entity at `pos` taken out of the world.
    ///
    /// While `f` runs the entity may freely use the context, including placing
    /// blocks and other block entities. Afterwards it goes back in place if its
    /// block still names its class; otherwise it is treated as removed.
    pub fn with_block_entity<R>(
        &mut self,
        pos: IVec3,
        f: impl FnOnce(&mut BlockEntity, &mut BlockContext<'a>) -> R,
    ) -> Option<R> {
        let mut entity = self.world.block_entities.remove(&pos)?;
        let out = f(&mut entity, self);

        let owned = self
            .block(pos)
            .and_then(|b| b.entity_class.as_deref())
            .is_some_and(|class| class == entity.class_name());
        if owned && !self.world.block_entities.contains_key(&pos) {
            self.world.block_entities.insert(pos, entity);
        } else {
            entity.on_removed(self, pos);
        }
        Some(out)
    }
}

/// System param that hands out a `BlockContext` for the current frame.
#[derive(SystemParam)]
pub struct BlockCtx<'w> {
    world: ResMut<'w, World>,
    blocks: Res<'w, BlockRegistry>,
    items: Res<'w, ItemRegistry>,
    classes: Res<'w, BlockClasses>,
    scheduler: ResMut<'w, TickScheduler>,
    protection: Res<'w, Protection>,
    settings: Res<'w, Settings>,
    effects: ResMut<'w, WorldEffects>,
    rng: ResMut<'w, WorldRng>,
}

impl BlockCtx<'_> {
    pub fn context(&mut self) -> BlockContext<'_> {
        BlockContext {
            world: &mut self.world,
            blocks: &self.blocks,
            items: &self.items,
            classes: &self.classes,
            scheduler: &mut self.scheduler,
            protection: &self.protection,
            settings: &self.settings,
            effects: &mut self.effects,
            rng: &mut self.rng.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::item::ItemStack;
    use crate::testing::TestWorld;
    use crate::world::BlockEntity;
    use bevy::math::IVec3;

    const POS: IVec3 = IVec3::new(1, 80, 1);

    #[test]
    fn placing_a_block_with_an_entity_class_creates_the_entity() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-base");
        assert!(matches!(t.world.block_entity(POS), Some(BlockEntity::Bonfire(_))));
        assert_eq!(t.effects.dirty, vec![POS]);
        assert_eq!(t.effects.changed_blocks, vec![POS]);
    }

    #[test]
    fn replacing_a_block_removes_its_entity() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-base");
        t.place(POS, "soil");
        assert!(t.world.block_entity(POS).is_none());
        assert_eq!(t.effects.removed, vec![POS]);
        assert!(t.effects.dirty.is_empty());
    }

    #[test]
    fn exchanging_keeps_the_entity() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-base");
        let id = t.id("bonfire-construct1");
        t.ctx().exchange_block(POS, id);
        assert_eq!(t.name_at(POS), "bonfire-construct1");
        assert!(t.world.block_entity(POS).is_some());
    }

    #[test]
    fn breaking_drops_the_block_item() {
        let mut t = TestWorld::new();
        t.place(POS, "rock-granite");
        assert!(t.ctx().break_block(POS, true));
        assert_eq!(t.name_at(POS), "air");
        assert_eq!(t.effects.drops.len(), 1);
        assert_eq!(t.effects.drops[0].stack, ItemStack::new("stone-granite", 1));
        assert_eq!(t.effects.drops[0].position, POS.as_vec3() + 0.5);
        assert!(!t.ctx().break_block(POS, true));
    }

    #[test]
    fn entity_whose_block_changed_class_is_dropped() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-base");
        let soil = t.id("soil");
        let ran = t.ctx().with_block_entity(POS, |_, ctx| {
            ctx.world.set_block(POS, soil);
        });
        assert_eq!(ran, Some(()));
        assert!(t.world.block_entity(POS).is_none());
        assert_eq!(t.effects.removed, vec![POS]);
    }

    #[test]
    fn water_in_the_fluid_layer_counts_as_liquid() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-lit");
        assert!(!t.ctx().has_liquid(POS, "water"));
        let water = t.id("water");
        t.world.set_fluid(POS, Some(water));
        assert!(t.ctx().has_liquid(POS, "water"));
        t.world.set_fluid(POS, None);
        t.place(POS, "water");
        assert!(t.ctx().has_liquid(POS, "water"));
    }
}
