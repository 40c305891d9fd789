//! Heat sources for the ambient temperature model.
use bevy::math::IVec3;

use super::World;

pub trait HeatSource {
    /// Heat given off at `source` as felt at `receiver`.
    fn heat_strength(&self, world: &World, source: IVec3, receiver: IVec3) -> f32;
}

/// Heat from the block entity at `source`, if it is a heat source.
#[must_use]
pub fn heat_strength_at(world: &World, source: IVec3, receiver: IVec3) -> Option<f32> {
    world
        .block_entity(source)
        .and_then(|entity| entity.as_heat_source())
        .map(|heat| heat.heat_strength(world, source, receiver))
}
