//! This module contains the core block types and helpers.
//! It exposes block definitions (`Block`), the `BlockRegistry` which
//! stores all loaded blocks, the class registry used to attach behaviour
//! and block entities to block definitions, the block events exchanged with
//! the host systems and the runtime loader/watchers used for hot-reloading
//! block data from RON files.

pub mod interaction;
pub use interaction::*;

/// Type used throughout the engine to represent a compact block identifier.
///
/// This is intentionally a `u8` to keep chunk storage memory-efficient.
pub type BlockId = u8;

/// Special block ids that world code refers to without the registry.
pub mod blocks {
    use super::BlockId;

    /// The block id used to represent empty space (no block present).
    pub const AIR: BlockId = 0;
}

/// Block class and block-entity class registration.
pub mod classes;

/// Events exchanged between players, block behaviours and observers.
pub mod events;

/// Axis-aligned faces and their offsets.
pub mod facing;

/// Loader/watchers for block RON files.
pub mod loader;

/// Block registry and related data structures.
pub mod registry;

pub use classes::BlockClasses;
pub use facing::BlockFacing;
pub use registry::{Block, BlockRegistry, CombustibleProps};
