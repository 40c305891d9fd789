//! Block entities: runtime state attached to a placed block.
//!
//! Every block entity class of the crate is a variant of `BlockEntity`; the
//! class names used in block definitions map onto the variants through
//! `BlockClasses`. Block entities are saved as RON records holding only what
//! cannot be derived from the world (the bonfire stage, for example, comes
//! back from the block variant).
use bevy::log::debug;
use bevy::math::IVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::heat::HeatSource;
use super::{BlockContext, World};
use crate::block::classes::{BLOCK_ENTITY_BONFIRE, BLOCK_ENTITY_FIRE};
use crate::bonfire::Bonfire;
use crate::entity::Flame;
use crate::fire::Burning;
use crate::lang::Lang;
use crate::tick::{DueTick, TickListenerId, TickScheduler};

#[derive(Debug)]
pub enum BlockEntity {
    Bonfire(Bonfire),
    Fire(Burning),
}

/// What a block entity reported from one server tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub flame: Option<Flame>,
    pub extinguished: bool,
}

/// State sent to observers when a block entity is marked dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub burning: bool,
    pub fuel: Option<(u32, u32)>, // (current, max) for fuel holding entities
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not serialize block entities: {0}")]
    Serialize(#[from] ron::Error),
    #[error("could not parse block entities: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("block entity class {0} is not registered")]
    UnknownClass(String),
}

/// Persisted fields of a block entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockEntityData {
    Bonfire {
        remaining_burn_seconds: f32,
        #[serde(default)]
        started_by: Option<String>,
    },
    Fire {
        #[serde(default)]
        fuel_pos: Option<(i32, i32, i32)>,
        #[serde(default)]
        started_by: Option<String>,
        #[serde(default)]
        burned_seconds: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBlockEntity {
    pub class: String,
    pub pos: (i32, i32, i32),
    pub data: BlockEntityData,
}

impl BlockEntity {
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            BlockEntity::Bonfire(_) => BLOCK_ENTITY_BONFIRE,
            BlockEntity::Fire(_) => BLOCK_ENTITY_FIRE,
        }
    }

    /// Called once the entity is attached to the block at `pos`, after any
    /// saved record has been applied.
    pub fn initialize(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.initialize(ctx, pos),
            BlockEntity::Fire(fire) => fire.initialize(ctx, pos),
        }
    }

    pub fn on_server_tick(&mut self, ctx: &mut BlockContext, pos: IVec3, dt: f32) -> TickReport {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.on_server_tick(ctx, pos, dt),
            BlockEntity::Fire(fire) => fire.on_server_tick(ctx, pos, dt),
        }
    }

    /// The block under the entity went away. Releases the tick listener.
    pub fn on_removed(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.on_removed(ctx, pos),
            BlockEntity::Fire(fire) => fire.on_removed(ctx, pos),
        }
    }

    /// Force the fire out. Returns `false` if there was nothing burning.
    pub fn extinguish(&mut self, ctx: &mut BlockContext, pos: IVec3) -> bool {
        match self {
            BlockEntity::Bonfire(bonfire) if bonfire.is_burning() => {
                bonfire.extinguish(ctx, pos);
                true
            }
            BlockEntity::Fire(fire) => {
                fire.go_out(ctx, pos);
                true
            }
            BlockEntity::Bonfire(_) => false,
        }
    }

    /// Release the tick listener without any other side effect.
    pub fn release(&mut self, scheduler: &mut TickScheduler) {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.release(scheduler),
            BlockEntity::Fire(fire) => fire.release(scheduler),
        }
    }

    #[must_use]
    pub fn is_burning(&self) -> bool {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.is_burning(),
            BlockEntity::Fire(_) => true,
        }
    }

    #[must_use]
    pub fn subscription(&self) -> Option<TickListenerId> {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.subscription(),
            BlockEntity::Fire(fire) => fire.subscription(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        match self {
            BlockEntity::Bonfire(bonfire) => Snapshot {
                burning: bonfire.is_burning(),
                fuel: Some((bonfire.total_fuel(), bonfire.max_fuel())),
            },
            BlockEntity::Fire(_) => Snapshot { burning: true, fuel: None },
        }
    }

    /// Lines for the block info panel.
    #[must_use]
    pub fn block_info(&self, lang: &Lang) -> Vec<String> {
        match self {
            BlockEntity::Bonfire(bonfire) => vec![bonfire.block_info(lang)],
            BlockEntity::Fire(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn as_heat_source(&self) -> Option<&dyn HeatSource> {
        match self {
            BlockEntity::Bonfire(bonfire) => Some(bonfire),
            BlockEntity::Fire(_) => None,
        }
    }

    #[must_use]
    pub fn to_data(&self) -> BlockEntityData {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.to_data(),
            BlockEntity::Fire(fire) => fire.to_data(),
        }
    }

    /// Apply a saved record. Records of another class are ignored.
    pub fn apply_data(&mut self, data: &BlockEntityData) {
        match self {
            BlockEntity::Bonfire(bonfire) => bonfire.apply_data(data),
            BlockEntity::Fire(fire) => fire.apply_data(data),
        }
    }
}

/// Run the block entities owning `due` and collect the flames they report.
///
/// A tick whose listener was released earlier in the same frame is skipped.
pub fn run_due_ticks(ctx: &mut BlockContext, due: &[DueTick]) -> Vec<Flame> {
    let mut flames = Vec::new();
    for tick in due {
        if !ctx.scheduler.is_active(tick.id) {
            continue;
        }
        let report = ctx.with_block_entity(tick.pos, |entity, ctx| {
            if entity.subscription() == Some(tick.id) {
                entity.on_server_tick(ctx, tick.pos, tick.dt)
            } else {
                TickReport::default()
            }
        });
        match report {
            Some(report) => flames.extend(report.flame),
            None => debug!("tick listener {:?} at {} has no block entity", tick.id, tick.pos),
        }
    }
    flames
}

/// Serialize every block entity of `world` to RON, ordered by position.
///
/// # Errors
/// `PersistError::Serialize` if RON serialization fails.
pub fn save_block_entities(world: &World) -> Result<String, PersistError> {
    let mut records: Vec<SavedBlockEntity> = world
        .block_entities
        .iter()
        .map(|(pos, entity)| SavedBlockEntity {
            class: entity.class_name().to_string(),
            pos: (pos.x, pos.y, pos.z),
            data: entity.to_data(),
        })
        .collect();
    records.sort_by_key(|r| r.pos);
    Ok(ron::ser::to_string_pretty(&records, ron::ser::PrettyConfig::default())?)
}

/// Re-create block entities from RON records written by `save_block_entities`.
///
/// The blocks must already be in the world. Each entity is constructed from
/// its class, given its record and then initialized, which subscribes lit
/// bonfires and fires to the tick scheduler again. An entity already at a
/// position is replaced. Returns the number of entities loaded.
///
/// # Errors
/// `PersistError::Parse` for malformed input and `PersistError::UnknownClass`
/// when a record names a class that is not registered.
pub fn load_block_entities(ctx: &mut BlockContext, text: &str) -> Result<usize, PersistError> {
    let records: Vec<SavedBlockEntity> = ron::from_str(text)?;
    let mut loaded = 0;
    for record in records {
        let pos = IVec3::new(record.pos.0, record.pos.1, record.pos.2);
        let mut entity = ctx
            .classes
            .create_entity(&record.class)
            .ok_or_else(|| PersistError::UnknownClass(record.class.clone()))?;
        entity.apply_data(&record.data);
        if let Some(mut old) = ctx.world.block_entities.remove(&pos) {
            old.release(ctx.scheduler);
        }
        entity.initialize(ctx, pos);
        ctx.world.block_entities.insert(pos, entity);
        ctx.effects.mark_dirty(pos);
        loaded += 1;
    }
    Ok(loaded)
}
