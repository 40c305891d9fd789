//! Debug utilities: on a `DumpRequest` event, write every block entity and
//! tick listener to a timestamped text file in './debug-dumps/'.
//!
//! This is a useful module for quickly capturing a snapshot of the bonfire
//! simulation (what burns, how much fuel is left, who lit it, what is still
//! subscribed to ticks) without attaching a debugger.
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use crate::block::BlockRegistry;
use crate::tick::TickScheduler;
use crate::world::{BlockEntity, World};

pub const DUMP_DIR: &str = "debug-dumps";

/// Ask for a dump. `dir` defaults to `DUMP_DIR`.
#[derive(Event, Debug, Clone, Default)]
pub struct DumpRequest {
    pub dir: Option<PathBuf>,
}

/// Written after each dump with the file it went to.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DumpWritten(pub PathBuf);

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DumpRequest>()
            .add_event::<DumpWritten>()
            .add_systems(Last, write_debug_dumps);
    }
}

/// Build the dump text.
///
/// # Arguments
/// * `world` - block entities are read from here, sorted by position
/// * `registry` - resolves the block name under each entity
/// * `scheduler` - every active tick listener is listed
/// * `now` - timestamp printed in the header
#[must_use]
pub fn dump_text(world: &World, registry: &BlockRegistry, scheduler: &TickScheduler, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    writeln!(out, "Debug dump: {}", now.timestamp()).ok();
    writeln!(out, "Timestamp: {}", now.format("%Y-%m-%d %H:%M:%S")).ok();
    writeln!(out, "Loaded chunks: {}", world.chunks.len()).ok();

    let mut positions: Vec<IVec3> = world.block_entities.keys().copied().collect();
    positions.sort_by_key(|p| (p.x, p.y, p.z));
    writeln!(out, "\nBlock entities ({}):", positions.len()).ok();
    for pos in positions {
        let Some(entity) = world.block_entity(pos) else {
            continue;
        };
        let block = registry
            .get_by_id(world.get_block(pos))
            .map_or("?", |b| b.name.as_str());
        let line = match entity {
            BlockEntity::Bonfire(bonfire) => writeln!(
                out,
                "  {pos} {block}: stage={} fuel={}/{} remaining={:.1}s started_by={}",
                bonfire.stage(),
                bonfire.total_fuel(),
                bonfire.max_fuel(),
                bonfire.fuel().remaining_burn_seconds,
                bonfire.started_by().unwrap_or("-"),
            ),
            BlockEntity::Fire(fire) => writeln!(
                out,
                "  {pos} {block}: fuel_pos={} burned={:.1}s started_by={}",
                fire.fuel_pos().map_or_else(|| "-".to_string(), |p| p.to_string()),
                fire.burned_seconds(),
                fire.started_by().unwrap_or("-"),
            ),
        };
        line.ok();
    }

    writeln!(out, "\nTick listeners ({}):", scheduler.len()).ok();
    for (id, pos) in scheduler.positions() {
        writeln!(out, "  #{} -> {pos}", id.0).ok();
    }
    out
}

#[allow(clippy::needless_pass_by_value)]
fn write_debug_dumps(
    world: Res<World>,
    registry: Res<BlockRegistry>,
    scheduler: Res<TickScheduler>,
    mut requests: EventReader<DumpRequest>,
    mut written: EventWriter<DumpWritten>,
) {
    for request in requests.read() {
        let now = Utc::now();
        let dir = request.dir.clone().unwrap_or_else(|| PathBuf::from(DUMP_DIR));
        let fname = dir.join(format!("bonfires-{}.txt", now.format("%Y%m%d-%H%M%S%.3f")));

        if let Err(e) = fs::create_dir_all(&dir) {
            error!("debug dump: failed to create dir '{}': {}", dir.display(), e);
            continue;
        }
        if let Err(e) = fs::write(&fname, dump_text(&world, &registry, &scheduler, now)) {
            error!("debug dump: failed to write {}: {}", fname.display(), e);
        } else {
            info!("wrote debug dump: {}", fname.display());
            written.send(DumpWritten(fname));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorld;

    #[test]
    fn dump_lists_bonfires_and_their_listeners() {
        let mut t = TestWorld::new();
        let pos = IVec3::new(4, 64, 4);
        t.place(pos, "bonfire-lit");

        let text = dump_text(&t.world, &t.blocks, &t.scheduler, Utc::now());
        assert!(text.contains("Block entities (1):"));
        assert!(text.contains("bonfire-lit: stage=lit fuel=0/32"));
        assert!(text.contains("Tick listeners (1):"));
    }
}
