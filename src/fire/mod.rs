//! Loose fire started by a bonfire or by another fire.
//!
//! The `fire` block carries a `Burning` block entity. It feeds on one
//! combustible neighbour for that block's burn duration, then consumes it and
//! goes out. While it burns it may spread to its six neighbours.
use bevy::log::debug;
use bevy::math::{IVec3, Vec3};
use rand::Rng;

use crate::block::{BlockId, blocks};
use crate::entity::{Cuboid, Flame};
use crate::tick::{ONCE_A_SECOND, TickListenerId, TickScheduler, TickSubscription};
use crate::world::BlockContext;
use crate::world::block_entity::{BlockEntityData, TickReport};

pub mod ignite;
pub mod spread;

pub use ignite::{IgniteState, Ignitable};
pub use spread::{SpreadBlocked, spread_all_dirs, try_spread_to};

#[derive(Debug, Default)]
pub struct Burning {
    fuel_pos: Option<IVec3>,
    started_by: Option<String>,
    burned_seconds: f32,
    subscription: Option<TickSubscription>,
    fire_block: Option<BlockId>,
}

impl Burning {
    #[must_use]
    pub fn fuel_pos(&self) -> Option<IVec3> {
        self.fuel_pos
    }

    #[must_use]
    pub fn started_by(&self) -> Option<&str> {
        self.started_by.as_deref()
    }

    #[must_use]
    pub fn burned_seconds(&self) -> f32 {
        self.burned_seconds
    }

    #[must_use]
    pub fn subscription(&self) -> Option<TickListenerId> {
        self.subscription.as_ref().map(TickSubscription::id)
    }

    pub fn initialize(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.fire_block = ctx.blocks.id_for_name(&ctx.settings.bonfire.fire_block);
        if self.subscription.is_none() {
            self.subscription = Some(ctx.scheduler.register(pos, ONCE_A_SECOND));
        }
    }

    /// The fire was just placed at `pos`, feeding on `fuel_pos`.
    pub fn on_fire_placed(&mut self, ctx: &mut BlockContext, pos: IVec3, fuel_pos: IVec3, started_by: Option<&str>) {
        self.fuel_pos = Some(fuel_pos);
        self.started_by = started_by.map(str::to_string);
        self.burned_seconds = 0.0;
        ctx.effects.mark_dirty(pos);
    }

    pub fn release(&mut self, scheduler: &mut TickScheduler) {
        if let Some(subscription) = self.subscription.take() {
            scheduler.unregister(subscription);
        }
    }

    /// Remove the fire block. The entity itself is dropped by the caller
    /// once it sees the block is gone.
    pub fn go_out(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.release(ctx.scheduler);
        if self.fire_block.is_some_and(|fire| ctx.world.get_block(pos) == fire) {
            ctx.place_block(pos, blocks::AIR);
        }
    }

    pub fn on_server_tick(&mut self, ctx: &mut BlockContext, pos: IVec3, dt: f32) -> TickReport {
        let out = TickReport { flame: None, extinguished: true };

        if ctx.has_liquid(pos, "water") {
            self.go_out(ctx, pos);
            return out;
        }

        let fuel = self
            .fuel_pos
            .filter(|p| spread::can_burn(ctx, *p))
            .and_then(|p| Some((p, ctx.block(p)?.combustible?.burn_duration)));
        let Some((fuel_pos, burn_duration)) = fuel else {
            debug!("fire at {pos} has nothing left to burn");
            self.go_out(ctx, pos);
            return out;
        };

        self.burned_seconds += dt;
        if self.burned_seconds >= burn_duration {
            ctx.break_block(fuel_pos, false);
            self.go_out(ctx, pos);
            return out;
        }

        if ctx.settings.server.allow_fire_spread && ctx.rng.gen_bool(ctx.settings.spread_chance()) {
            let started_by = self.started_by.clone();
            spread_all_dirs(ctx, pos, self.fire_block, started_by.as_deref(), false);
        }

        let settings = &ctx.settings.bonfire;
        TickReport {
            flame: Some(Flame {
                source: pos,
                volume: Cuboid::new(Vec3::ZERO, Vec3::ONE).translated(pos.as_vec3()),
                range: settings.entity_detection_range,
                damage: settings.fire_damage,
                ignite_chance: ctx.settings.ignite_chance(),
            }),
            extinguished: false,
        }
    }

    pub fn on_removed(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.release(ctx.scheduler);
        ctx.effects.block_entity_removed(pos);
    }

    #[must_use]
    pub fn to_data(&self) -> BlockEntityData {
        BlockEntityData::Fire {
            fuel_pos: self.fuel_pos.map(|p| (p.x, p.y, p.z)),
            started_by: self.started_by.clone(),
            burned_seconds: self.burned_seconds,
        }
    }

    pub fn apply_data(&mut self, data: &BlockEntityData) {
        if let BlockEntityData::Fire { fuel_pos, started_by, burned_seconds } = data {
            self.fuel_pos = fuel_pos.map(|(x, y, z)| IVec3::new(x, y, z));
            self.started_by.clone_from(started_by);
            self.burned_seconds = burned_seconds.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorld;
    use crate::world::BlockEntity;

    fn fire_at(t: &TestWorld, pos: IVec3) -> &Burning {
        match t.world.block_entity(pos) {
            Some(BlockEntity::Fire(fire)) => fire,
            other => panic!("expected fire at {pos}, found {other:?}"),
        }
    }

    #[test]
    fn spread_fire_feeds_on_its_neighbour_then_consumes_it() {
        let mut t = TestWorld::new();
        t.settings.server.allow_fire_spread = false;
        let log = IVec3::new(0, 64, 0);
        let target = log + IVec3::Y;
        t.place(log, "log-oak");

        let fire = Some(t.id("fire"));
        let fuel = try_spread_to(&mut t.ctx(), target, fire, Some("alice"));
        assert_eq!(fuel, Ok(log));
        assert_eq!(fire_at(&t, target).fuel_pos(), Some(log));
        assert_eq!(fire_at(&t, target).started_by(), Some("alice"));
        assert_eq!(t.scheduler.len(), 1);

        // log-oak burns for 10 s in the test registry
        t.tick(9);
        assert_eq!(t.name_at(target), "fire");
        t.tick(1);
        assert_eq!(t.name_at(target), "air");
        assert_eq!(t.name_at(log), "air");
        assert!(t.world.block_entity(target).is_none());
        assert!(t.scheduler.is_empty());
        assert!(t.effects.drops.is_empty());
    }

    #[test]
    fn water_puts_fire_out() {
        let mut t = TestWorld::new();
        t.settings.server.allow_fire_spread = false;
        let log = IVec3::new(0, 64, 0);
        let target = log + IVec3::X;
        t.place(log, "log-oak");
        let fire = Some(t.id("fire"));
        try_spread_to(&mut t.ctx(), target, fire, None).unwrap();

        let water = t.id("water");
        t.world.set_fluid(target, Some(water));
        t.tick(1);

        assert_eq!(t.name_at(target), "air");
        assert_eq!(t.name_at(log), "log-oak");
        assert!(t.scheduler.is_empty());
    }

    #[test]
    fn fire_goes_out_when_its_fuel_is_removed() {
        let mut t = TestWorld::new();
        let log = IVec3::new(0, 64, 0);
        let target = log + IVec3::Z;
        t.place(log, "log-oak");
        let fire = Some(t.id("fire"));
        try_spread_to(&mut t.ctx(), target, fire, None).unwrap();

        t.ctx().break_block(log, false);
        t.tick(1);

        assert_eq!(t.name_at(target), "air");
        assert!(t.scheduler.is_empty());
    }

    #[test]
    fn fire_record_round_trips_through_data() {
        let mut fire = Burning::default();
        fire.apply_data(&BlockEntityData::Fire {
            fuel_pos: Some((1, 2, 3)),
            started_by: Some("bob".into()),
            burned_seconds: 4.5,
        });
        assert_eq!(fire.fuel_pos(), Some(IVec3::new(1, 2, 3)));
        assert_eq!(fire.to_data(), BlockEntityData::Fire {
            fuel_pos: Some((1, 2, 3)),
            started_by: Some("bob".into()),
            burned_seconds: 4.5,
        });
    }
}
