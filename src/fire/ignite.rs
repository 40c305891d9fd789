//! Ignition contract between igniters (torches, firestarters) and blocks.
//!
//! An igniter held against a block asks `try_ignite` every frame with the
//! seconds it has been held so far. Once the answer is `IgniteNow` the igniter
//! commits with `on_ignited`.
use bevy::math::IVec3;

use crate::block::classes::Rejected;
use crate::world::BlockContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgniteState {
    /// Keep holding the igniter.
    Ignitable,
    /// Held long enough, commit with `on_ignited`.
    IgniteNow,
    /// This block cannot be lit right now; the igniter should stop.
    NotIgnitable,
}

pub trait Ignitable {
    fn try_ignite(&self, ctx: &BlockContext, pos: IVec3, seconds: f32) -> IgniteState;

    /// # Errors
    /// Returns why the block did not light.
    fn on_ignited(
        &self,
        ctx: &mut BlockContext,
        pos: IVec3,
        seconds: f32,
        player: &str,
    ) -> Result<(), Rejected>;
}
