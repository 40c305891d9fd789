//! Server systems that drive block behaviour from events and ticks.
//!
//! Each system builds a `BlockContext` from `BlockCtx` and hands the work to
//! the plain block logic; what that logic records in `WorldEffects` is turned
//! into events by `publish_world_changes` at the end of the frame.
use bevy::log::{debug, warn};
use bevy::prelude::*;

use crate::block::BlockRegistry;
use crate::block::events::{
    BlockChanged, BlockEntityRemoved, BlockEntitySynced, BlockInteract, BreakBlock, ExtinguishBlock,
    IgniteAttempt, IgniteResponse, ItemDropped, SoundPlayed,
};
use crate::entity::ActiveFlames;
use crate::fire::ignite::IgniteState;
use crate::item::ItemRegistry;
use crate::player::{Hotbar, Player};
use crate::settings::Settings;
use crate::tick::DueTicks;
use crate::world::{BlockCtx, World, WorldEffects, run_due_ticks};

/// Warn once about data the bonfire depends on but that was not loaded.
#[allow(clippy::needless_pass_by_value)]
pub fn report_missing_assets(blocks: Res<BlockRegistry>, items: Res<ItemRegistry>, settings: Res<Settings>) {
    let bonfire = &settings.bonfire;
    if blocks.get(&bonfire.fire_block).is_none() {
        warn!("block {} not found, fire spread is disabled", bonfire.fire_block);
    }
    if items.get(&bonfire.fuel_item).and_then(|i| i.combustible).is_none() {
        warn!(
            "item {} not found or not combustible, bonfires burn {}s per fuel",
            bonfire.fuel_item, bonfire.fallback_burn_duration
        );
    }
}

/// Run the block entities whose tick listener is due.
#[allow(clippy::needless_pass_by_value)]
pub fn run_block_ticks(mut ctx: BlockCtx, due: Res<DueTicks>, mut flames: ResMut<ActiveFlames>) {
    flames.0 = run_due_ticks(&mut ctx.context(), &due.0);
}

pub fn handle_block_interactions(
    mut ctx: BlockCtx,
    mut events: EventReader<BlockInteract>,
    mut players: Query<(&Player, &mut Hotbar)>,
) {
    for ev in events.read() {
        let Ok((player, mut hotbar)) = players.get_mut(ev.player) else {
            debug!("interaction from unknown player {:?}", ev.player);
            continue;
        };
        let mut ctx = ctx.context();
        let behavior = ctx
            .block(ev.pos)
            .and_then(|b| b.class.as_deref())
            .and_then(|class| ctx.classes.behavior(class));
        let Some(behavior) = behavior else {
            continue;
        };
        if let Err(reason) = behavior.on_interact(&mut ctx, ev.pos, player, &mut hotbar.active) {
            debug!("{} interacting with {}: {reason}", player.uid, ev.pos);
        }
    }
}

pub fn handle_ignite_attempts(
    mut ctx: BlockCtx,
    mut attempts: EventReader<IgniteAttempt>,
    players: Query<&Player>,
    mut responses: EventWriter<IgniteResponse>,
) {
    for ev in attempts.read() {
        let mut ctx = ctx.context();
        let behavior = ctx
            .block(ev.pos)
            .and_then(|b| b.class.as_deref())
            .and_then(|class| ctx.classes.behavior(class));
        let Some(ignitable) = behavior.as_deref().and_then(|b| b.as_ignitable()) else {
            responses.send(IgniteResponse { player: ev.player, pos: ev.pos, state: IgniteState::NotIgnitable });
            continue;
        };

        let mut state = ignitable.try_ignite(&ctx, ev.pos, ev.seconds);
        if state == IgniteState::IgniteNow {
            let uid = players.get(ev.player).map_or("", |p| p.uid.as_str());
            if let Err(reason) = ignitable.on_ignited(&mut ctx, ev.pos, ev.seconds, uid) {
                debug!("igniting {} failed: {reason}", ev.pos);
                state = IgniteState::NotIgnitable;
            }
        }
        responses.send(IgniteResponse { player: ev.player, pos: ev.pos, state });
    }
}

pub fn handle_block_breaks(mut ctx: BlockCtx, mut events: EventReader<BreakBlock>) {
    for ev in events.read() {
        if !ctx.context().break_block(ev.pos, true) {
            debug!("nothing to break at {}", ev.pos);
        }
    }
}

pub fn handle_extinguish_requests(mut ctx: BlockCtx, mut events: EventReader<ExtinguishBlock>) {
    for ev in events.read() {
        let put_out = ctx
            .context()
            .with_block_entity(ev.pos, |entity, ctx| entity.extinguish(ctx, ev.pos));
        if put_out != Some(true) {
            debug!("nothing burning at {}", ev.pos);
        }
    }
}

/// Drain `WorldEffects` into notification events.
///
/// Removals go out before syncs so an entity replaced at the same position in
/// one frame is seen as removed, then created.
#[allow(clippy::needless_pass_by_value)]
pub fn publish_world_changes(
    world: Res<World>,
    mut effects: ResMut<WorldEffects>,
    mut removed: EventWriter<BlockEntityRemoved>,
    mut synced: EventWriter<BlockEntitySynced>,
    mut changed: EventWriter<BlockChanged>,
    mut sounds: EventWriter<SoundPlayed>,
    mut drops: EventWriter<ItemDropped>,
) {
    if effects.is_empty() {
        return;
    }
    for pos in effects.removed.drain(..) {
        removed.send(BlockEntityRemoved { pos });
    }
    for pos in effects.dirty.drain(..) {
        if let Some(entity) = world.block_entity(pos) {
            synced.send(BlockEntitySynced { pos, snapshot: entity.snapshot() });
        }
    }
    for pos in effects.changed_blocks.drain(..) {
        changed.send(BlockChanged { pos, block: world.get_block(pos) });
    }
    for cue in effects.sounds.drain(..) {
        sounds.send(SoundPlayed(cue));
    }
    for item in effects.drops.drain(..) {
        drops.send(ItemDropped(item));
    }
}
