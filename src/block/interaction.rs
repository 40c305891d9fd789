//! Resolve player view rays into block requests, and read-only block queries
//! used by hosts to show what a block offers.
//!
//! A player's click arrives as an `InteractRay`. `resolve_interact_rays`
//! raycasts it against the world: a right click on a block becomes a
//! `BlockInteract`, a left click a `BreakBlock`.
//!
//! # Examples
//!
//! ```rust
//! use bonfires::block::raycast_block;
//! use bonfires::world::World;
//! use bevy::math::{Vec3, IVec3};
//!
//! let mut world = World::new();
//! world.set_block(IVec3::new(1, 1, 0), 2);
//!
//! // Raycast from z=-1 towards +z; should hit the placed block at (1,1,0).
//! let origin = Vec3::new(1.5, 1.5, -1.0);
//! let dir = Vec3::new(0.0, 0.0, 1.0);
//! let (hit_pos, before) = raycast_block(&world, origin, dir, 10.0).expect("should hit block");
//! assert_eq!(hit_pos, IVec3::new(1, 1, 0));
//! assert_eq!(before, IVec3::new(1, 1, -1));
//! ```
use bevy::log::debug;
use bevy::prelude::*;

use super::blocks;
use super::classes::{InteractButton, WorldInteraction};
use super::events::{BlockInteract, BreakBlock, InteractRay};
use crate::lang::Lang;
use crate::world::{BlockContext, World};

/// How far a player can reach, in blocks.
pub const INTERACT_RANGE: f32 = 5.0;

#[inline]
fn f32_floor_to_i32(v: f32) -> i32 {
    debug_assert!(
        v.is_finite() && (-2_147_483_648.0_f32..=2_147_483_647.0_f32).contains(&v),
        "coordinate out of i32 range",
    );
    #[allow(clippy::cast_possible_truncation)]
    {
        v.floor() as i32
    }
}

fn block_at(pos: Vec3) -> IVec3 {
    IVec3::new(f32_floor_to_i32(pos.x), f32_floor_to_i32(pos.y), f32_floor_to_i32(pos.z))
}

/// Step along a ray until it enters a non-air block.
///
/// # Returns
/// The hit block position and the last air position before it.
#[must_use]
pub fn raycast_block(
    world: &World,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<(IVec3, IVec3)> {
    let step = direction.try_normalize()? * 0.1;
    let mut pos = origin;
    let mut last_air_pos = block_at(pos);

    let mut distance = 0.0;
    while distance < max_distance {
        let block_pos = block_at(pos);
        if world.get_block(block_pos) != blocks::AIR {
            return Some((block_pos, last_air_pos));
        }
        last_air_pos = block_pos;
        pos += step;
        distance += 0.1;
    }
    None
}

/// Turn this frame's `InteractRay`s into block requests.
#[allow(clippy::needless_pass_by_value)]
pub fn resolve_interact_rays(
    world: Res<World>,
    mut rays: EventReader<InteractRay>,
    mut interact: EventWriter<BlockInteract>,
    mut breaks: EventWriter<BreakBlock>,
) {
    for ray in rays.read() {
        let Some((pos, _)) = raycast_block(&world, ray.origin, ray.direction, INTERACT_RANGE) else {
            debug!("interact ray from {} hit nothing", ray.origin);
            continue;
        };
        match ray.button {
            InteractButton::Right => {
                interact.send(BlockInteract { player: ray.player, pos });
            }
            InteractButton::Left => {
                breaks.send(BreakBlock { pos, player: Some(ray.player) });
            }
        }
    }
}

/// Interaction hints the block class at `pos` offers.
#[must_use]
pub fn interaction_help_at(ctx: &BlockContext, pos: IVec3) -> Vec<WorldInteraction> {
    ctx.block(pos)
        .and_then(|block| block.class.as_deref())
        .and_then(|class| ctx.classes.behavior(class))
        .map(|behavior| behavior.interaction_help(ctx, pos))
        .unwrap_or_default()
}

/// Lines for the block info panel of the block at `pos`.
#[must_use]
pub fn block_info_at(world: &World, lang: &Lang, pos: IVec3) -> Vec<String> {
    world.block_entity(pos).map(|entity| entity.block_info(lang)).unwrap_or_default()
}
