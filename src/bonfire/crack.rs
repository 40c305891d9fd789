//! Heat cracking of the blocks around a bonfire that went out.
//!
//! `ore-*` turns into `cracked_ore-*` and `rock-*` into `crackedrock-*` when
//! those variants exist. Blocks that are already cracked break into their
//! drops unless `CrackedNeighbors::Keep` is configured.
use bevy::log::debug;
use bevy::math::IVec3;

use crate::block::{BlockFacing, blocks};
use crate::settings::CrackedNeighbors;
use crate::world::BlockContext;

const ORE: &str = "ore";
const ROCK: &str = "rock";
const CRACKED_ORE: &str = "cracked_ore";
const CRACKED_ROCK: &str = "crackedrock";

/// Crack or break the six neighbours of `pos`.
pub fn crack_neighbours(ctx: &mut BlockContext, pos: IVec3) {
    for npos in BlockFacing::neighbours(pos) {
        let Some(block) = ctx.block(npos) else {
            continue;
        };
        if block.id == blocks::AIR {
            continue;
        }
        match block.first_code_part() {
            CRACKED_ORE | CRACKED_ROCK => {
                if ctx.settings.bonfire.cracked_neighbors == CrackedNeighbors::Break {
                    ctx.break_block(npos, true);
                }
            }
            part @ (ORE | ROCK) => {
                let cracked_part = if part == ORE { CRACKED_ORE } else { CRACKED_ROCK };
                let cracked = block.code_with_first_part(cracked_part);
                match ctx.blocks.id_for_name(&cracked) {
                    Some(id) => ctx.exchange_block(npos, id),
                    None => debug!("{} has no cracked variant {cracked}", block.name),
                }
            }
            _ => {}
        }
    }
}
