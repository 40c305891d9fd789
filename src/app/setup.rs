//! Startup systems for the demo: speed up virtual time and build a small
//! site around a bonfire.
//!
//! The site is a 9x9 soil floor with a `bonfire-base` in the middle. The
//! bonfire sits on cracked granite and has granite on one side and iron ore on
//! the other, so going out visibly cracks and breaks its surroundings. A log
//! two blocks away gives spreading fire something to feed on, and a sheep
//! stands close enough to get burned.
use bevy::prelude::*;
use bonfires::entity::{CollisionBox, Cuboid, Health};
use bonfires::player::{Hotbar, Player};
use bonfires::settings::Settings;
use bonfires::world::{BlockContext, BlockCtx};

use super::script::{DemoScript, DemoStep};
use crate::DEMO_SPEED;

pub fn speed_up_time(mut time: ResMut<Time<Virtual>>) {
    time.set_relative_speed(DEMO_SPEED);
}

fn place(ctx: &mut BlockContext, pos: IVec3, name: &str) {
    match ctx.blocks.id_for_name(name) {
        Some(id) => {
            ctx.place_block(pos, id);
        }
        None => warn!("demo: block {name} is not loaded, leaving {pos} empty"),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn setup_demo_site(
    mut commands: Commands,
    mut blocks: BlockCtx,
    settings: Res<Settings>,
    mut script: ResMut<DemoScript>,
) {
    let site = IVec3::new(0, 64, 0);
    let mut ctx = blocks.context();

    for x in -4..=4 {
        for z in -4..=4 {
            place(&mut ctx, IVec3::new(x, site.y - 1, z), "soil");
        }
    }
    place(&mut ctx, site - IVec3::Y, "crackedrock-granite");
    place(&mut ctx, site + IVec3::X, "rock-granite");
    place(&mut ctx, site - IVec3::X, "ore-poor-iron-granite");
    place(&mut ctx, site - IVec3::Z * 2, "log-oak");
    place(&mut ctx, site, "bonfire-base");

    let player = commands
        .spawn((Player::survival("demo-player"), Hotbar::holding(settings.bonfire.fuel_item.clone(), 8)))
        .id();
    commands.spawn((
        Name::new("sheep"),
        Transform::from_xyz(0.5, 64.0, 1.5),
        CollisionBox(Cuboid::new(Vec3::new(-0.3, 0.0, -0.3), Vec3::new(0.3, 1.2, 0.3))),
        Health::new(8.0),
    ));

    script.site = site;
    script.player = Some(player);
    script.step = DemoStep::Build(0);
    info!("demo site ready, bonfire at {site}");
}
