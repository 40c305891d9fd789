//! Plain-value world used by the unit tests.
use bevy::math::IVec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::block::registry::BlockSounds;
use crate::block::{Block, BlockClasses, BlockId, BlockRegistry, CombustibleProps};
use crate::bonfire::{Bonfire, register_classes};
use crate::entity::Flame;
use crate::item::{Item, ItemRegistry};
use crate::protection::Protection;
use crate::settings::Settings;
use crate::tick::{ONCE_A_SECOND, TickScheduler};
use crate::world::{BlockContext, BlockEntity, World, WorldEffects, run_due_ticks};

pub(crate) struct TestWorld {
    pub world: World,
    pub blocks: BlockRegistry,
    pub items: ItemRegistry,
    pub classes: BlockClasses,
    pub scheduler: TickScheduler,
    pub protection: Protection,
    pub settings: Settings,
    pub effects: WorldEffects,
    pub rng: StdRng,
}

fn block(name: &str, id: BlockId) -> Block {
    Block { name: name.to_string(), id, ..Default::default() }
}

fn combustible(burn_duration: f32) -> Option<CombustibleProps> {
    Some(CombustibleProps { burn_duration, burn_temperature: 600.0 })
}

fn bonfire(stage: &str, id: BlockId) -> Block {
    Block {
        class: Some("BlockBonfire".into()),
        entity_class: Some("BlockEntityBonfire".into()),
        sounds: BlockSounds {
            place: Some("sounds/block/planks".into()),
            ambient: (stage == "lit").then(|| "sounds/environment/fireplace".into()),
        },
        drop_count: 0,
        ..block(&format!("bonfire-{stage}"), id)
    }
}

pub(crate) fn test_blocks() -> BlockRegistry {
    let mut registry = BlockRegistry::default();
    let defs = [
        Block { solid: false, replaceable: 9999, drop_count: 0, ..block("air", 0) },
        Block { drop_item: Some("soil".into()), ..block("soil", 1) },
        Block { drop_item: Some("stone-granite".into()), ..block("rock-granite", 2) },
        Block { drop_item: Some("stone-granite".into()), drop_count: 2, ..block("crackedrock-granite", 3) },
        Block { drop_item: Some("ore-poor-iron".into()), ..block("ore-poor-iron-granite", 4) },
        Block { drop_item: Some("nugget-iron".into()), drop_count: 3, ..block("cracked_ore-poor-iron-granite", 5) },
        Block { combustible: combustible(10.0), drop_item: Some("log-oak".into()), ..block("log-oak", 6) },
        Block { combustible: combustible(8.0), ..block("planks-oak", 7) },
        Block { solid: false, replaceable: 6500, combustible: combustible(2.0), drop_count: 0, ..block("tallgrass", 8) },
        Block {
            solid: false,
            replaceable: 9500,
            liquid_code: Some("water".into()),
            drop_count: 0,
            ..block("water", 9)
        },
        Block {
            solid: false,
            replaceable: 8000,
            entity_class: Some("BlockEntityFire".into()),
            drop_count: 0,
            ..block("fire", 10)
        },
        Block { drop_item: Some("gold".into()), ..block("ore-rich-gold-granite", 11) },
        bonfire("base", 20),
        bonfire("construct1", 21),
        bonfire("construct2", 22),
        bonfire("construct3", 23),
        bonfire("lit", 24),
        bonfire("extinct", 25),
    ];
    for def in defs {
        registry.register(def);
    }
    registry
}

pub(crate) fn test_items() -> ItemRegistry {
    let mut items = ItemRegistry::default();
    items.register(Item { name: "firewood".into(), combustible: combustible(24.0), can_ignite: false, max_stack: 32 });
    items.register(Item { name: "torch".into(), combustible: None, can_ignite: true, max_stack: 4 });
    items.register(Item { name: "firestarter".into(), combustible: None, can_ignite: true, max_stack: 1 });
    items.register(Item { name: "stone-granite".into(), combustible: None, can_ignite: false, max_stack: 64 });
    items
}

impl TestWorld {
    pub fn new() -> Self {
        let mut classes = BlockClasses::default();
        register_classes(&mut classes);
        TestWorld {
            world: World::new(),
            blocks: test_blocks(),
            items: test_items(),
            classes,
            scheduler: TickScheduler::default(),
            protection: Protection::default(),
            settings: Settings::default(),
            effects: WorldEffects::default(),
            rng: StdRng::seed_from_u64(7),
        }
    }

    pub fn ctx(&mut self) -> BlockContext<'_> {
        BlockContext {
            world: &mut self.world,
            blocks: &self.blocks,
            items: &self.items,
            classes: &self.classes,
            scheduler: &mut self.scheduler,
            protection: &self.protection,
            settings: &self.settings,
            effects: &mut self.effects,
            rng: &mut self.rng,
        }
    }

    pub fn id(&self, name: &str) -> BlockId {
        self.blocks.id_for_name(name).unwrap_or_else(|| panic!("no block {name}"))
    }

    pub fn place(&mut self, pos: IVec3, name: &str) {
        let id = self.id(name);
        assert!(self.ctx().place_block(pos, id));
    }

    pub fn name_at(&self, pos: IVec3) -> &str {
        let id = self.world.get_block(pos);
        self.blocks.get_by_id(id).map_or("?", |b| b.name.as_str())
    }

    pub fn bonfire(&self, pos: IVec3) -> &Bonfire {
        match self.world.block_entity(pos) {
            Some(BlockEntity::Bonfire(bonfire)) => bonfire,
            other => panic!("expected bonfire at {pos}, found {other:?}"),
        }
    }

    /// Advance the scheduler `seconds` times by one second and run the due
    /// block entities. Returns the flames of the last second.
    pub fn tick(&mut self, seconds: u32) -> Vec<Flame> {
        let mut flames = Vec::new();
        for _ in 0..seconds {
            let due = self.scheduler.advance(ONCE_A_SECOND);
            flames = run_due_ticks(&mut self.ctx(), &due);
        }
        flames
    }
}
