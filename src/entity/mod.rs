//! Living entities that fire can hurt.
//!
//! Entities are plain Bevy entities with a `Transform`, a `CollisionBox`
//! relative to their position and `Health`. Flames reported by burning blocks
//! are applied to them by `burn_entities_in_flames`.
use bevy::math::{IVec3, Vec3};
use bevy::prelude::*;
use rand::Rng;

use crate::world::WorldRng;

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub min: Vec3,
    pub max: Vec3,
}

impl Cuboid {
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn translated(&self, by: Vec3) -> Self {
        Self { min: self.min + by, max: self.max + by }
    }

    /// Overlap test; touching faces do not count.
    #[must_use]
    pub fn intersects(&self, other: &Cuboid) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }
}

/// Collision box relative to the entity's translation.
#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionBox(pub Cuboid);

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[must_use]
    pub fn alive(&self) -> bool {
        self.current > 0.0
    }
}

/// Marks an entity as burning.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct OnFire;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDamaged {
    pub entity: Entity,
    pub amount: f32,
    pub source: IVec3, // Block that dealt the damage
}

/// Flames of a burning block for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flame {
    pub source: IVec3,
    pub volume: Cuboid, // World space
    pub range: f32,
    pub damage: f32,
    pub ignite_chance: f64,
}

impl Flame {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.source.as_vec3() + Vec3::splat(0.5)
    }

    /// Whether an entity at `position` with `collision` stands in the flames.
    ///
    /// Only entities within `range` of the block centre on every axis are
    /// considered.
    #[must_use]
    pub fn reaches(&self, position: Vec3, collision: &Cuboid) -> bool {
        let within = (position - self.center()).abs().cmple(Vec3::splat(self.range)).all();
        within && collision.translated(position).intersects(&self.volume)
    }
}

/// Flames reported by this frame's block ticks.
#[derive(Resource, Debug, Default)]
pub struct ActiveFlames(pub Vec<Flame>);

/// Damage and ignite every entity standing in a reported flame.
#[allow(clippy::needless_pass_by_value)]
pub fn burn_entities_in_flames(
    mut commands: Commands,
    flames: Res<ActiveFlames>,
    mut rng: ResMut<WorldRng>,
    mut entities: Query<(Entity, &Transform, &CollisionBox, &mut Health)>,
    mut damaged: EventWriter<EntityDamaged>,
) {
    for flame in &flames.0 {
        for (entity, transform, collision, mut health) in &mut entities {
            if !flame.reaches(transform.translation, &collision.0) {
                continue;
            }
            if health.alive() {
                health.current = (health.current - flame.damage).max(0.0);
                damaged.send(EntityDamaged { entity, amount: flame.damage, source: flame.source });
            }
            if rng.0.gen_bool(flame.ignite_chance) {
                commands.entity(entity).insert(OnFire);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flame_at(source: IVec3) -> Flame {
        let volume = Cuboid::new(Vec3::new(-0.35, 0.0, -0.35), Vec3::new(1.35, 2.8, 1.35));
        Flame {
            source,
            volume: volume.translated(source.as_vec3()),
            range: 3.0,
            damage: 2.0,
            ignite_chance: 0.125,
        }
    }

    fn humanoid() -> Cuboid {
        Cuboid::new(Vec3::new(-0.3, 0.0, -0.3), Vec3::new(0.3, 1.8, 0.3))
    }

    #[test]
    fn entity_standing_beside_the_block_is_reached() {
        let flame = flame_at(IVec3::new(10, 64, 10));
        assert!(flame.reaches(Vec3::new(11.5, 64.0, 10.5), &humanoid()));
    }

    #[test]
    fn entity_out_of_flame_volume_is_not_reached() {
        let flame = flame_at(IVec3::new(10, 64, 10));
        assert!(!flame.reaches(Vec3::new(12.5, 64.0, 10.5), &humanoid()));
        assert!(!flame.reaches(Vec3::new(10.5, 67.0, 10.5), &humanoid()));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Cuboid::new(Vec3::ZERO, Vec3::ONE);
        let b = a.translated(Vec3::X);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&a.translated(Vec3::splat(0.5))));
    }

    #[test]
    fn flames_burn_only_the_entities_standing_in_them() {
        let source = IVec3::new(10, 64, 10);
        let mut app = App::new();
        app.insert_resource(ActiveFlames(vec![Flame { ignite_chance: 1.0, ..flame_at(source) }]))
            .insert_resource(WorldRng::seeded(3))
            .add_event::<EntityDamaged>()
            .add_systems(Update, burn_entities_in_flames);

        let spawn = |app: &mut App, x: f32| {
            app.world_mut()
                .spawn((Transform::from_xyz(x, 64.0, 10.5), CollisionBox(humanoid()), Health::new(10.0)))
                .id()
        };
        let inside = spawn(&mut app, 11.5);
        let outside = spawn(&mut app, 12.5);

        app.update();
        let damaged: Vec<EntityDamaged> = app
            .world()
            .resource::<bevy::ecs::event::Events<EntityDamaged>>()
            .iter_current_update_events()
            .cloned()
            .collect();
        assert_eq!(damaged, vec![EntityDamaged { entity: inside, amount: 2.0, source }]);
        assert_eq!(app.world().get::<Health>(inside).unwrap().current, 8.0);
        assert!(app.world().get::<OnFire>(inside).is_some());
        assert_eq!(app.world().get::<Health>(outside).unwrap().current, 10.0);
        assert!(app.world().get::<OnFire>(outside).is_none());

        app.update();
        assert_eq!(app.world().get::<Health>(inside).unwrap().current, 6.0);
    }
}
