//! Client side ambient sound state for burning blocks.
//!
//! There is no audio output here. `AmbientSounds` tracks, per block position,
//! which looping sound a host should be playing and at what volume. It follows
//! the `BlockEntitySynced` and `BlockEntityRemoved` events published by the
//! server systems:
//! * a block entity reported as burning starts its block's `ambient` sound at a
//!   random playback position,
//! * one reported as not burning fades its sound out over
//!   `audio.fade_out_seconds`,
//! * a removed one stops and disposes its sound immediately.
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::block::BlockRegistry;
use crate::block::events::{BlockEntityRemoved, BlockEntitySynced};
use crate::bonfire::systems::publish_world_changes;
use crate::settings::Settings;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playback {
    Playing,
    FadingOut { remaining: f32 },
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientSound {
    pub sound: String,
    pub volume: f32,
    pub base_volume: f32,
    pub playback_position: f32, // Fraction of the loop, 0..1
    pub state: Playback,
}

impl AmbientSound {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == Playback::Playing
    }

    /// Start fading out. Does nothing unless playing.
    pub fn fade_out(&mut self, seconds: f32) {
        if self.is_playing() {
            if seconds > 0.0 {
                self.state = Playback::FadingOut { remaining: seconds };
            } else {
                self.stop();
            }
        }
    }

    pub fn stop(&mut self) {
        self.state = Playback::Stopped;
        self.volume = 0.0;
    }

    /// Advance a fade by `dt` seconds out of a `total` second fade.
    pub fn advance_fade(&mut self, dt: f32, total: f32) {
        if let Playback::FadingOut { remaining } = self.state {
            let remaining = remaining - dt;
            if remaining <= 0.0 || total <= 0.0 {
                self.stop();
            } else {
                self.volume = self.base_volume * (remaining / total).min(1.0);
                self.state = Playback::FadingOut { remaining };
            }
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct AmbientSounds {
    pub sounds: HashMap<IVec3, AmbientSound>,
}

impl AmbientSounds {
    #[must_use]
    pub fn get(&self, pos: IVec3) -> Option<&AmbientSound> {
        self.sounds.get(&pos)
    }
}

/// Start, fade or dispose ambient sounds from block entity sync events.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_ambient_sounds(
    world: Res<World>,
    blocks: Res<BlockRegistry>,
    settings: Res<Settings>,
    mut sounds: ResMut<AmbientSounds>,
    mut removed: EventReader<BlockEntityRemoved>,
    mut synced: EventReader<BlockEntitySynced>,
) {
    for ev in removed.read() {
        if sounds.sounds.remove(&ev.pos).is_some() {
            debug!("disposed ambient sound at {}", ev.pos);
        }
    }

    for ev in synced.read() {
        if !ev.snapshot.burning {
            if let Some(sound) = sounds.sounds.get_mut(&ev.pos) {
                sound.fade_out(settings.audio.fade_out_seconds);
            }
            continue;
        }
        if sounds.get(ev.pos).is_some_and(AmbientSound::is_playing) {
            continue;
        }
        let ambient = blocks
            .get_by_id(world.get_block(ev.pos))
            .and_then(|b| b.sounds.ambient.clone());
        let Some(ambient) = ambient else {
            continue;
        };
        let volume = settings.audio.ambient_volume * settings.audio.master_volume;
        sounds.sounds.insert(
            ev.pos,
            AmbientSound {
                sound: ambient,
                volume,
                base_volume: volume,
                playback_position: rand::thread_rng().gen_range(0.0..1.0),
                state: Playback::Playing,
            },
        );
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn fade_ambient_sounds(time: Res<Time>, settings: Res<Settings>, mut sounds: ResMut<AmbientSounds>) {
    let dt = time.delta_seconds();
    for sound in sounds.sounds.values_mut() {
        sound.advance_fade(dt, settings.audio.fade_out_seconds);
    }
}

pub struct AmbientSoundPlugin;

impl Plugin for AmbientSoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AmbientSounds>().add_systems(
            Update,
            (sync_ambient_sounds, fade_ambient_sounds)
                .chain()
                .after(publish_world_changes),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> AmbientSound {
        AmbientSound {
            sound: "sounds/environment/fireplace".into(),
            volume: 2.0,
            base_volume: 2.0,
            playback_position: 0.3,
            state: Playback::Playing,
        }
    }

    #[test]
    fn fade_lowers_volume_then_stops() {
        let mut sound = playing();
        sound.fade_out(1.0);
        sound.advance_fade(0.5, 1.0);
        assert!((sound.volume - 1.0).abs() < 1e-6);
        assert!(matches!(sound.state, Playback::FadingOut { .. }));
        sound.advance_fade(0.5, 1.0);
        assert_eq!(sound.state, Playback::Stopped);
        assert_eq!(sound.volume, 0.0);
    }

    #[test]
    fn only_playing_sounds_fade() {
        let mut sound = playing();
        sound.stop();
        sound.fade_out(1.0);
        assert_eq!(sound.state, Playback::Stopped);
    }

    #[test]
    fn zero_fade_stops_immediately() {
        let mut sound = playing();
        sound.fade_out(0.0);
        assert_eq!(sound.state, Playback::Stopped);
    }

    #[test]
    fn starting_a_sound_leaves_the_world_rng_alone() {
        use crate::block::Block;
        use crate::block::registry::BlockSounds;
        use crate::world::WorldRng;
        use crate::world::block_entity::Snapshot;

        let pos = IVec3::new(2, 64, 2);
        let mut blocks = BlockRegistry::default();
        blocks.register(Block {
            name: "bonfire-lit".into(),
            id: 24,
            sounds: BlockSounds { place: None, ambient: Some("sounds/environment/fireplace".into()) },
            ..Default::default()
        });
        let mut world = World::new();
        world.set_block(pos, 24);

        let mut app = App::new();
        app.insert_resource(world)
            .insert_resource(blocks)
            .insert_resource(Settings::default())
            .insert_resource(WorldRng::seeded(5))
            .init_resource::<AmbientSounds>()
            .add_event::<BlockEntitySynced>()
            .add_event::<BlockEntityRemoved>()
            .add_systems(Update, sync_ambient_sounds);
        app.world_mut().send_event(BlockEntitySynced {
            pos,
            snapshot: Snapshot { burning: true, fuel: Some((1, 32)) },
        });
        app.update();

        let sound = app.world().resource::<AmbientSounds>().get(pos).cloned().unwrap();
        assert!(sound.is_playing());
        assert!((0.0..1.0).contains(&sound.playback_position));
        let next: u64 = app.world_mut().resource_mut::<WorldRng>().0.r#gen();
        assert_eq!(next, WorldRng::seeded(5).0.r#gen::<u64>());
    }
}
