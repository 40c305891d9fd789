//! Events exchanged between players, block behaviours and observers.
//!
//! Requests (`InteractRay`, `BlockInteract`, `IgniteAttempt`, `BreakBlock`,
//! `ExtinguishBlock`) are sent by the host and handled by the server systems
//! of `BonfirePlugin`. Notifications (`BlockChanged`, `BlockEntitySynced`,
//! `BlockEntityRemoved`, `SoundPlayed`, `ItemDropped`) are published at the end
//! of the frame from `WorldEffects`.
use bevy::math::{IVec3, Vec3};
use bevy::prelude::{Entity, Event};

use super::BlockId;
use super::classes::InteractButton;
use crate::fire::ignite::IgniteState;
use crate::world::block_entity::Snapshot;
use crate::world::effects::{DroppedItem, SoundCue};

/// A player clicked along a view ray. Resolved to the first solid block hit.
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractRay {
    pub player: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
    pub button: InteractButton,
}

/// A player used (right clicked) the block at `pos` with their active hotbar slot.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInteract {
    pub player: Entity,
    pub pos: IVec3,
}

/// A player has been holding an igniter against `pos` for `seconds`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct IgniteAttempt {
    pub player: Entity,
    pub pos: IVec3,
    pub seconds: f32,
}

/// Answer to an `IgniteAttempt`. `IgniteNow` means the block was lit.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgniteResponse {
    pub player: Entity,
    pub pos: IVec3,
    pub state: IgniteState,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakBlock {
    pub pos: IVec3,
    pub player: Option<Entity>,
}

/// Put out whatever burns at `pos` (e.g. water poured on it).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtinguishBlock {
    pub pos: IVec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChanged {
    pub pos: IVec3,
    pub block: BlockId,
}

/// A block entity changed; observers should refresh from `snapshot`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEntitySynced {
    pub pos: IVec3,
    pub snapshot: Snapshot,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEntityRemoved {
    pub pos: IVec3,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundPlayed(pub SoundCue);

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ItemDropped(pub DroppedItem);
