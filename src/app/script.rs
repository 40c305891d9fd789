//! Scripted player for the demo: build the bonfire, add one fuel, hold an
//! igniter against it and wait for it to burn out.
use bevy::app::AppExit;
use bevy::prelude::*;
use bonfires::block::BlockRegistry;
use bonfires::block::block_info_at;
use bonfires::block::events::{
    BlockEntitySynced, BlockInteract, IgniteAttempt, IgniteResponse, ItemDropped, SoundPlayed,
};
use bonfires::debug::DumpRequest;
use bonfires::entity::{EntityDamaged, Health};
use bonfires::fire::IgniteState;
use bonfires::lang::Lang;
use bonfires::presentation::AmbientSounds;
use bonfires::world::World;

/// Construction steps before the bonfire takes fuel.
const BUILD_STEPS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DemoStep {
    #[default]
    Waiting,
    Build(u32),
    Fuel,
    Ignite { held: f32 },
    Burning,
    Done,
}

#[derive(Resource, Debug, Default)]
pub struct DemoScript {
    pub site: IVec3,
    pub player: Option<Entity>,
    pub step: DemoStep,
}

#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
pub fn run_demo_script(
    time: Res<Time>,
    mut script: ResMut<DemoScript>,
    world: Res<World>,
    lang: Res<Lang>,
    mut interact: EventWriter<BlockInteract>,
    mut ignite: EventWriter<IgniteAttempt>,
    mut responses: EventReader<IgniteResponse>,
    mut synced: EventReader<BlockEntitySynced>,
    mut dumps: EventWriter<DumpRequest>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(player) = script.player else {
        return;
    };
    let pos = script.site;

    script.step = match script.step {
        DemoStep::Waiting => DemoStep::Waiting,
        DemoStep::Build(n) if n < BUILD_STEPS => {
            interact.send(BlockInteract { player, pos });
            DemoStep::Build(n + 1)
        }
        DemoStep::Build(_) => DemoStep::Fuel,
        DemoStep::Fuel => {
            interact.send(BlockInteract { player, pos });
            DemoStep::Ignite { held: 0.0 }
        }
        DemoStep::Ignite { held } => {
            let mut next = DemoStep::Ignite { held: held + time.delta_seconds() };
            for response in responses.read().filter(|r| r.pos == pos) {
                match response.state {
                    IgniteState::IgniteNow => {
                        info!("bonfire lit after {held:.1}s");
                        next = DemoStep::Burning;
                    }
                    IgniteState::NotIgnitable => {
                        warn!("bonfire at {pos} refused to light");
                        next = DemoStep::Done;
                    }
                    IgniteState::Ignitable => {}
                }
            }
            if let DemoStep::Ignite { held } = next {
                ignite.send(IgniteAttempt { player, pos, seconds: held });
            }
            next
        }
        DemoStep::Burning => {
            let mut next = DemoStep::Burning;
            for ev in synced.read().filter(|ev| ev.pos == pos) {
                for line in block_info_at(&world, &lang, pos) {
                    info!("{line}");
                }
                if !ev.snapshot.burning {
                    info!("bonfire went out");
                    dumps.send(DumpRequest::default());
                    next = DemoStep::Done;
                }
            }
            next
        }
        DemoStep::Done => {
            exit.send(AppExit::Success);
            DemoStep::Done
        }
    };
    // Events not consumed by the current step are stale by the next one.
    responses.clear();
    synced.clear();
}

#[allow(clippy::needless_pass_by_value)]
pub fn log_world_events(
    blocks: Res<BlockRegistry>,
    world: Res<World>,
    ambient: Res<AmbientSounds>,
    health: Query<(&Name, &Health)>,
    mut sounds: EventReader<SoundPlayed>,
    mut drops: EventReader<ItemDropped>,
    mut damaged: EventReader<EntityDamaged>,
) {
    for SoundPlayed(cue) in sounds.read() {
        debug!("sound {} at {}", cue.sound, cue.pos);
    }
    for ItemDropped(drop) in drops.read() {
        info!("dropped {}x {} at {}", drop.stack.quantity, drop.stack.item, drop.position);
    }
    for ev in damaged.read() {
        if let Ok((name, hp)) = health.get(ev.entity) {
            let source = blocks.get_by_id(world.get_block(ev.source)).map_or("?", |b| b.name.as_str());
            info!("{name} took {} damage from {source}, {}/{} left", ev.amount, hp.current, hp.max);
        }
    }
    if ambient.is_changed() {
        for (pos, sound) in &ambient.sounds {
            debug!("ambient {} at {pos}: {:?} volume {:.2}", sound.sound, sound.state, sound.volume);
        }
    }
}
