//! Chunk block storage.
//!
//! A `Chunk` stores the block ids of a `CHUNK_SIZE x MAX_HEIGHT x CHUNK_SIZE`
//! column. Chunks are created empty (all `AIR`) the first time a block is
//! written into them.

use crate::block::{BlockId, blocks};
use crate::world::MAX_HEIGHT;

pub const CHUNK_SIZE: usize = 32;

#[derive(Clone)]
pub struct Chunk {
    pub blocks: Vec<BlockId>,
}

impl Chunk {
    /// Create a new, empty `Chunk` filled with `AIR` blocks.
    #[must_use]
    pub fn new() -> Self {
        Chunk {
            blocks: vec![blocks::AIR; CHUNK_SIZE * MAX_HEIGHT * CHUNK_SIZE],
        }
    }

    /// Read a block ID at the given local chunk coordinates.
    ///
    /// # Arguments
    /// * `x` - local x in `[0, CHUNK_SIZE)`
    /// * `y` - local y in `[0, MAX_HEIGHT)`
    /// * `z` - local z in `[0, CHUNK_SIZE)`
    ///
    /// # Return
    /// * `BlockId` - the block id at the given coordinates, or `AIR` if out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        if x >= CHUNK_SIZE || y >= MAX_HEIGHT || z >= CHUNK_SIZE {
            blocks::AIR
        } else {
            self.blocks[x + y * CHUNK_SIZE + z * CHUNK_SIZE * MAX_HEIGHT]
        }
    }

    /// Set a block ID at the given local chunk coordinates. Out of bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        if x < CHUNK_SIZE && y < MAX_HEIGHT && z < CHUNK_SIZE {
            self.blocks[x + y * CHUNK_SIZE + z * CHUNK_SIZE * MAX_HEIGHT] = block;
        }
    }

    /// Number of non-air blocks in the chunk.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| **b != blocks::AIR).count()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk").field("solid", &self.solid_count()).finish()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_air() {
        let mut chunk = Chunk::new();
        chunk.set(CHUNK_SIZE, 0, 0, 5);
        assert_eq!(chunk.get(CHUNK_SIZE, 0, 0), blocks::AIR);
        assert_eq!(chunk.solid_count(), 0);

        chunk.set(3, 200, 31, 5);
        assert_eq!(chunk.get(3, 200, 31), 5);
        assert_eq!(chunk.solid_count(), 1);
    }
}
