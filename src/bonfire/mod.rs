//! Bonfires: a buildable, fuelled fire block.
//!
//! A bonfire is placed as `bonfire-base` and built up with the fuel item
//! (firewood) through three construction stages. Once built it takes fuel,
//! can be lit with an igniter and then burns its fuel down one second at a
//! time. While lit it hurts and ignites entities standing in its flames,
//! may spread fire to combustible surroundings, and gives off heat. When the
//! fuel runs out (or water reaches it) the bonfire goes out, cracks the ore
//! and rock around it and turns into `bonfire-extinct`, from which it can be
//! rebuilt.
//!
//! The block class (`BlockBonfire`) and block entity class
//! (`BlockEntityBonfire`) are registered by [`BonfirePlugin`] together with
//! the fire block entity (`BlockEntityFire`) used by spreading fire.
use bevy::math::Vec3;
use bevy::prelude::*;

use crate::block::classes::{BLOCK_BONFIRE, BLOCK_ENTITY_BONFIRE, BLOCK_ENTITY_FIRE, BlockClasses};
use crate::block::events::{
    BlockChanged, BlockEntityRemoved, BlockEntitySynced, BlockInteract, BreakBlock, ExtinguishBlock,
    IgniteAttempt, IgniteResponse, InteractRay, ItemDropped, SoundPlayed,
};
use crate::block::interaction::resolve_interact_rays;
use crate::entity::{ActiveFlames, Cuboid, EntityDamaged, burn_entities_in_flames};
use crate::fire::Burning;
use crate::protection::Protection;
use crate::settings::Settings;
use crate::tick::{DueTicks, TickScheduler, advance_block_ticks};
use crate::world::{BlockEntity, WorldEffects, WorldRng};

pub mod block;
pub mod crack;
pub mod entity;
pub mod fuel;
pub mod stage;
pub mod systems;

pub use block::BonfireBlock;
pub use entity::Bonfire;
pub use fuel::FuelState;
pub use stage::BonfireStage;

pub const HEAT_STRENGTH_BURNING: f32 = 30.0;
pub const HEAT_STRENGTH_EXTINCT: f32 = 1.0;

/// Volume around the bonfire block that hurts entities, relative to the block origin.
#[must_use]
pub fn flame_volume() -> Cuboid {
    Cuboid::new(Vec3::new(-0.35, 0.0, -0.35), Vec3::new(1.35, 2.8, 1.35))
}

/// Register the bonfire and fire classes.
pub fn register_classes(classes: &mut BlockClasses) {
    classes.register_block_class(BLOCK_BONFIRE, BonfireBlock);
    classes.register_block_entity_class(BLOCK_ENTITY_BONFIRE, || BlockEntity::Bonfire(Bonfire::default()));
    classes.register_block_entity_class(BLOCK_ENTITY_FIRE, || BlockEntity::Fire(Burning::default()));
}

/// Server side bonfire simulation.
///
/// Expects `World`, `BlockRegistry`, `ItemRegistry`, `Settings` and `Lang`
/// to be inserted by the app; missing ones fall back to empty defaults.
pub struct BonfirePlugin;

impl Plugin for BonfirePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Settings>()
            .init_resource::<crate::world::World>()
            .init_resource::<crate::block::BlockRegistry>()
            .init_resource::<crate::item::ItemRegistry>()
            .init_resource::<crate::lang::Lang>()
            .init_resource::<Protection>()
            .init_resource::<BlockClasses>()
            .init_resource::<TickScheduler>()
            .init_resource::<DueTicks>()
            .init_resource::<ActiveFlames>()
            .init_resource::<WorldEffects>();

        if !app.world().contains_resource::<WorldRng>() {
            let seed = app.world().resource::<Settings>().server.world_seed;
            app.insert_resource(WorldRng::seeded(seed));
        }
        register_classes(&mut app.world_mut().resource_mut::<BlockClasses>());

        app.add_event::<InteractRay>()
            .add_event::<BlockInteract>()
            .add_event::<IgniteAttempt>()
            .add_event::<IgniteResponse>()
            .add_event::<BreakBlock>()
            .add_event::<ExtinguishBlock>()
            .add_event::<BlockChanged>()
            .add_event::<BlockEntitySynced>()
            .add_event::<BlockEntityRemoved>()
            .add_event::<SoundPlayed>()
            .add_event::<ItemDropped>()
            .add_event::<EntityDamaged>();

        app.add_systems(Startup, systems::report_missing_assets).add_systems(
            Update,
            (
                resolve_interact_rays,
                systems::handle_block_interactions,
                systems::handle_ignite_attempts,
                systems::handle_block_breaks,
                systems::handle_extinguish_requests,
                advance_block_ticks,
                systems::run_block_ticks,
                burn_entities_in_flames,
                systems::publish_world_changes,
            )
                .chain(),
        );
    }
}
