//! The bonfire block entity.
//!
//! `Bonfire` holds the stage, the fuel, who lit it and its tick listener.
//! Every operation takes the `BlockContext` and the bonfire position so the
//! block variant in the world can be kept in step with the stage.
use bevy::log::{debug, warn};
use bevy::math::IVec3;
use rand::Rng;

use super::crack::crack_neighbours;
use super::fuel::FuelState;
use super::stage::BonfireStage;
use super::{HEAT_STRENGTH_BURNING, HEAT_STRENGTH_EXTINCT, flame_volume};
use crate::block::BlockId;
use crate::block::classes::Rejected;
use crate::entity::Flame;
use crate::fire::spread::spread_all_dirs;
use crate::item::{ItemSlot, ItemStack};
use crate::lang::Lang;
use crate::player::Player;
use crate::tick::{ONCE_A_SECOND, TickListenerId, TickScheduler, TickSubscription};
use crate::world::block_entity::{BlockEntityData, TickReport};
use crate::world::heat::HeatSource;
use crate::world::{BlockContext, World};

#[derive(Debug, Default)]
pub struct Bonfire {
    stage: BonfireStage,
    fuel: FuelState,
    started_by: Option<String>,
    subscription: Option<TickSubscription>,
    fire_block: Option<BlockId>, // Placed when spreading; `None` disables spreading
}

impl Bonfire {
    #[must_use]
    pub fn stage(&self) -> BonfireStage {
        self.stage
    }

    #[must_use]
    pub fn fuel(&self) -> &FuelState {
        &self.fuel
    }

    #[must_use]
    pub fn total_fuel(&self) -> u32 {
        self.fuel.total_fuel()
    }

    #[must_use]
    pub fn max_fuel(&self) -> u32 {
        self.fuel.max_fuel
    }

    #[must_use]
    pub fn is_burning(&self) -> bool {
        self.stage.is_lit()
    }

    #[must_use]
    pub fn started_by(&self) -> Option<&str> {
        self.started_by.as_deref()
    }

    #[must_use]
    pub fn subscription(&self) -> Option<TickListenerId> {
        self.subscription.as_ref().map(TickSubscription::id)
    }

    /// Attach to the block at `pos`: read the stage from the block variant,
    /// resolve the fuel item and fire block and resume ticking if lit.
    pub fn initialize(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.stage = match ctx.block(pos) {
            Some(block) => BonfireStage::from_code(block.last_code_part()).unwrap_or_else(|| {
                warn!("{} at {pos} is not a bonfire variant, treating it as base", block.name);
                BonfireStage::Base
            }),
            None => BonfireStage::Base,
        };

        let settings = &ctx.settings.bonfire;
        self.fuel.seconds_per_fuel_item = FuelState::seconds_per_item(ctx.items, settings);
        self.fuel.max_fuel = settings.max_fuel;
        self.fire_block = ctx.blocks.id_for_name(&settings.fire_block);

        if self.stage.is_lit() {
            self.subscribe(ctx, pos);
        }
    }

    fn subscribe(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        if self.subscription.is_none() {
            self.subscription = Some(ctx.scheduler.register(pos, ONCE_A_SECOND));
        }
    }

    /// Release the tick listener, if any.
    pub fn release(&mut self, scheduler: &mut TickScheduler) {
        if let Some(subscription) = self.subscription.take() {
            scheduler.unregister(subscription);
        }
    }

    /// Move to `stage` and exchange the block for the matching variant.
    ///
    /// # Errors
    /// `Rejected::MissingVariant` if no block exists for the new stage; the
    /// stage is left unchanged.
    fn set_stage(&mut self, ctx: &mut BlockContext, pos: IVec3, stage: BonfireStage) -> Result<BlockId, Rejected> {
        let code = match ctx.block(pos) {
            Some(block) => block.code_with_last_part(stage.code()),
            None => format!("bonfire-{}", stage.code()),
        };
        let id = ctx
            .blocks
            .id_for_name(&code)
            .ok_or(Rejected::MissingVariant(code))?;
        ctx.exchange_block(pos, id);
        self.stage = stage;
        ctx.effects.mark_dirty(pos);
        Ok(id)
    }

    /// A player used the bonfire while holding `slot`.
    ///
    /// Construction material advances the construction by one stage; once
    /// built it is added as fuel instead. One item is used up unless the
    /// player is in creative mode.
    ///
    /// # Errors
    /// `Rejected::NotHandled` for anything but the fuel item, `AlreadyLit`
    /// while burning and `FuelFull` at capacity.
    pub fn interact(
        &mut self,
        ctx: &mut BlockContext,
        pos: IVec3,
        player: &Player,
        slot: &mut ItemSlot,
    ) -> Result<(), Rejected> {
        if !slot.holds(&ctx.settings.bonfire.fuel_item) {
            return Err(Rejected::NotHandled);
        }

        match self.stage {
            BonfireStage::Lit => return Err(Rejected::AlreadyLit),
            BonfireStage::Construct3 => {
                self.refuel(ctx, pos, 1)?;
            }
            stage => {
                let next = stage.next_construction_stage().ok_or(Rejected::NotHandled)?;
                let id = self.set_stage(ctx, pos, next)?;
                let sound = ctx.blocks.get_by_id(id).and_then(|b| b.sounds.place.clone());
                if let Some(sound) = sound {
                    ctx.effects.play_sound(sound, pos, Some(&player.uid));
                }
            }
        }

        if player.consumes_items() {
            slot.take_out(1);
        }
        Ok(())
    }

    /// Add `amount` fuel items.
    ///
    /// # Errors
    /// `Rejected::FuelFull` at capacity.
    pub fn refuel(&mut self, ctx: &mut BlockContext, pos: IVec3, amount: u32) -> Result<u32, Rejected> {
        let total = self.fuel.refuel(amount)?;
        ctx.effects.mark_dirty(pos);
        Ok(total)
    }

    /// Whether an igniter would light this bonfire.
    ///
    /// # Errors
    /// Why it would not.
    pub fn can_ignite(&self) -> Result<(), Rejected> {
        match self.stage {
            BonfireStage::Lit => Err(Rejected::AlreadyLit),
            BonfireStage::Construct3 if self.fuel.total_fuel() == 0 => Err(Rejected::NoFuel),
            BonfireStage::Construct3 => Ok(()),
            _ => Err(Rejected::NotConstructed),
        }
    }

    /// Light the bonfire on behalf of `player`.
    ///
    /// # Errors
    /// See [`Bonfire::can_ignite`]; also `MissingVariant` without a lit block.
    pub fn ignite(&mut self, ctx: &mut BlockContext, pos: IVec3, player: &str) -> Result<(), Rejected> {
        self.can_ignite()?;
        self.set_stage(ctx, pos, BonfireStage::Lit)?;
        self.started_by = Some(player.to_string());
        self.subscribe(ctx, pos);
        debug!("bonfire at {pos} lit by {player} with {} fuel", self.fuel.total_fuel());
        Ok(())
    }

    /// Put the fire out: drop the fuel, stop ticking, crack the surroundings
    /// and turn into the extinct variant.
    pub fn extinguish(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.fuel.clear();
        self.release(ctx.scheduler);
        crack_neighbours(ctx, pos);
        if let Err(e) = self.set_stage(ctx, pos, BonfireStage::Extinct) {
            warn!("bonfire at {pos} went out but could not change block: {e}");
            self.stage = BonfireStage::Extinct;
        }
        ctx.effects.mark_dirty(pos);
    }

    /// One server tick of `dt` seconds.
    pub fn on_server_tick(&mut self, ctx: &mut BlockContext, pos: IVec3, dt: f32) -> TickReport {
        if !self.stage.is_lit() {
            self.release(ctx.scheduler);
            return TickReport::default();
        }

        let burn = self.fuel.burn(dt);
        if burn.changed {
            ctx.effects.mark_dirty(pos);
        }
        if burn.exhausted {
            self.extinguish(ctx, pos);
            return TickReport { flame: None, extinguished: true };
        }

        let settings = &ctx.settings.bonfire;
        let flame = Flame {
            source: pos,
            volume: flame_volume().translated(pos.as_vec3()),
            range: settings.entity_detection_range,
            damage: settings.fire_damage,
            ignite_chance: ctx.settings.ignite_chance(),
        };

        if ctx.has_liquid(pos, "water") {
            self.extinguish(ctx, pos);
            return TickReport { flame: Some(flame), extinguished: true };
        }

        if ctx.settings.server.allow_fire_spread {
            let chance = ctx.settings.spread_chance();
            if ctx.rng.gen_bool(chance) {
                let started_by = self.started_by.clone();
                spread_all_dirs(ctx, pos, self.fire_block, started_by.as_deref(), true);
            }
        }

        TickReport { flame: Some(flame), extinguished: false }
    }

    /// The bonfire block was removed: stop ticking and drop the fuel left.
    pub fn on_removed(&mut self, ctx: &mut BlockContext, pos: IVec3) {
        self.release(ctx.scheduler);
        let total = self.fuel.total_fuel();
        if total > 0 {
            let item = ctx.settings.bonfire.fuel_item.clone();
            ctx.effects.drop_item(ItemStack::new(item, total), pos);
        }
        self.fuel.clear();
        ctx.effects.block_entity_removed(pos);
    }

    #[must_use]
    pub fn block_info(&self, lang: &Lang) -> String {
        lang.get("bonfire-fuel", &[&self.total_fuel(), &self.max_fuel()])
    }

    #[must_use]
    pub fn to_data(&self) -> BlockEntityData {
        BlockEntityData::Bonfire {
            remaining_burn_seconds: self.fuel.remaining_burn_seconds,
            started_by: self.started_by.clone(),
        }
    }

    pub fn apply_data(&mut self, data: &BlockEntityData) {
        if let BlockEntityData::Bonfire { remaining_burn_seconds, started_by } = data {
            self.fuel.remaining_burn_seconds = remaining_burn_seconds.max(0.0);
            self.started_by.clone_from(started_by);
        }
    }
}

impl HeatSource for Bonfire {
    fn heat_strength(&self, _world: &World, _source: IVec3, _receiver: IVec3) -> f32 {
        if self.stage.is_lit() { HEAT_STRENGTH_BURNING } else { HEAT_STRENGTH_EXTINCT }
    }
}
