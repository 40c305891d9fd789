//! World storage and block access helpers.
//!
//! This module provides the `World` resource which manages loaded chunks
//! (a `HashMap<(chunk_x, chunk_z), Chunk>`), a sparse fluid layer that sits
//! on top of the solid blocks and the block entities attached to placed
//! blocks. Writes into an unloaded chunk create an empty chunk.
//!
//! Block level operations with side effects (placing a block that carries a
//! block entity, breaking a block into drops) go through
//! [`context::BlockContext`], which also owns the lifecycle of block entities.
//!
//! # Example:
//!
//! ```
//! use bonfires::world::World;
//! use bevy::math::IVec3;
//!
//! let mut world = World::new();
//! assert!(world.set_block(IVec3::new(10, 64, -5), 3));
//! assert_eq!(world.get_block(IVec3::new(10, 64, -5)), 3);
//! assert!(!world.set_block(IVec3::new(0, -1, 0), 3));
//! ```

use crate::block::{BlockId, blocks};
use crate::chunk::{CHUNK_SIZE, Chunk};
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

pub mod block_entity;
pub mod context;
pub mod effects;
pub mod heat;

pub use block_entity::{BlockEntity, PersistError, load_block_entities, run_due_ticks, save_block_entities};
pub use context::{BlockContext, BlockCtx};
pub use effects::WorldEffects;

/// Maximum world build height (exclusive upper bound).
pub const MAX_HEIGHT: usize = 256;

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
const MAX_HEIGHT_I32: i32 = MAX_HEIGHT as i32;

/// The `World` resource holds loaded chunks keyed by `(chunk_x, chunk_z)`.
///
/// # Fields
/// * `chunks` - mapping from chunk coordinates to `Chunk` data
/// * `fluids` - fluid block ids layered over the solid block at a position
/// * `block_entities` - runtime state attached to placed blocks
#[derive(Resource, Default, Debug)]
pub struct World {
    pub chunks: HashMap<(i32, i32), Chunk>,
    pub fluids: HashMap<IVec3, BlockId>,
    pub block_entities: HashMap<IVec3, BlockEntity>,
}

/// Split a world position into chunk coordinates and local indices.
fn locate(pos: IVec3) -> Option<((i32, i32), (usize, usize, usize))> {
    if pos.y < 0 || pos.y >= MAX_HEIGHT_I32 {
        return None;
    }
    let cx = pos.x.div_euclid(CHUNK_SIZE_I32);
    let cz = pos.z.div_euclid(CHUNK_SIZE_I32);
    let lx = usize::try_from(pos.x.rem_euclid(CHUNK_SIZE_I32)).ok()?;
    let ly = usize::try_from(pos.y).ok()?;
    let lz = usize::try_from(pos.z.rem_euclid(CHUNK_SIZE_I32)).ok()?;
    Some(((cx, cz), (lx, ly, lz)))
}

impl World {
    /// Create an empty `World` resource with no loaded chunks.
    #[must_use]
    pub fn new() -> Self {
        World::default()
    }

    #[must_use]
    pub fn in_bounds(pos: IVec3) -> bool {
        locate(pos).is_some()
    }

    /// Get the block ID at `pos`.
    ///
    /// # Return
    /// * `BlockId` - block id at the given coordinates, or `AIR` if out of bounds or unloaded
    #[must_use]
    pub fn get_block(&self, pos: IVec3) -> BlockId {
        let Some((chunk, (x, y, z))) = locate(pos) else {
            return blocks::AIR;
        };
        self.chunks.get(&chunk).map_or(blocks::AIR, |c| c.get(x, y, z))
    }

    /// Set the block at `pos`, creating the chunk if necessary.
    ///
    /// Only the stored id changes; block entities are handled by `BlockContext`.
    ///
    /// # Return
    /// * `false` if the position is outside the build height
    pub fn set_block(&mut self, pos: IVec3, block: BlockId) -> bool {
        let Some((chunk, (x, y, z))) = locate(pos) else {
            return false;
        };
        self.chunks.entry(chunk).or_default().set(x, y, z, block);
        true
    }

    /// Fluid block at `pos`, if any.
    #[must_use]
    pub fn get_fluid(&self, pos: IVec3) -> Option<BlockId> {
        self.fluids.get(&pos).copied()
    }

    /// Set or clear (`None`) the fluid at `pos`.
    pub fn set_fluid(&mut self, pos: IVec3, fluid: Option<BlockId>) {
        match fluid {
            Some(id) if World::in_bounds(pos) => {
                self.fluids.insert(pos, id);
            }
            Some(_) => {}
            None => {
                self.fluids.remove(&pos);
            }
        }
    }

    #[must_use]
    pub fn block_entity(&self, pos: IVec3) -> Option<&BlockEntity> {
        self.block_entities.get(&pos)
    }
}

/// World random source. Seeded from the server settings so runs are repeatable.
#[derive(Resource, Debug)]
pub struct WorldRng(pub StdRng);

impl WorldRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        WorldRng(StdRng::seed_from_u64(seed))
    }
}

impl Default for WorldRng {
    fn default() -> Self {
        WorldRng::seeded(0)
    }
}
