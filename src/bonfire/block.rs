//! The `BlockBonfire` block class.
//!
//! Dispatches player interaction and ignition to the `Bonfire` block entity
//! at the used position and builds the interaction hints shown for it.
use bevy::math::IVec3;

use super::entity::Bonfire;
use crate::block::classes::{BlockBehavior, InteractButton, Rejected, WorldInteraction};
use crate::fire::ignite::{IgniteState, Ignitable};
use crate::item::{ItemSlot, ItemStack};
use crate::player::Player;
use crate::world::{BlockContext, BlockEntity};

pub const HELP_IGNITE: &str = "blockhelp-firepit-ignite";
pub const HELP_FUEL: &str = "blockhelp-bonfire-fuel";

#[derive(Debug, Clone, Copy, Default)]
pub struct BonfireBlock;

fn bonfire_at<'c>(ctx: &'c BlockContext, pos: IVec3) -> Option<&'c Bonfire> {
    match ctx.world.block_entity(pos)? {
        BlockEntity::Bonfire(bonfire) => Some(bonfire),
        BlockEntity::Fire(_) => None,
    }
}

/// Run `f` on the bonfire entity at `pos`.
fn with_bonfire<R>(
    ctx: &mut BlockContext,
    pos: IVec3,
    f: impl FnOnce(&mut Bonfire, &mut BlockContext) -> Result<R, Rejected>,
) -> Result<R, Rejected> {
    ctx.with_block_entity(pos, |entity, ctx| match entity {
        BlockEntity::Bonfire(bonfire) => f(bonfire, ctx),
        BlockEntity::Fire(_) => Err(Rejected::NoBlockEntity),
    })
    .unwrap_or(Err(Rejected::NoBlockEntity))
}

impl BlockBehavior for BonfireBlock {
    fn on_interact(
        &self,
        ctx: &mut BlockContext,
        pos: IVec3,
        player: &Player,
        slot: &mut ItemSlot,
    ) -> Result<(), Rejected> {
        with_bonfire(ctx, pos, |bonfire, ctx| bonfire.interact(ctx, pos, player, slot))
    }

    fn interaction_help(&self, ctx: &BlockContext, pos: IVec3) -> Vec<WorldInteraction> {
        let Some(bonfire) = bonfire_at(ctx, pos) else {
            return Vec::new();
        };
        let mut help = Vec::new();

        if bonfire.total_fuel() > 0 && !bonfire.is_burning() {
            help.push(WorldInteraction {
                action_lang_code: HELP_IGNITE,
                button: InteractButton::Right,
                hot_key: Some("sneak"),
                item_stacks: ctx.items.igniters().into_iter().map(|i| ItemStack::new(i.name.clone(), 1)).collect(),
            });
        }

        let stage = bonfire.stage();
        if !bonfire.is_burning() && (stage.is_under_construction() || !bonfire.fuel().is_full()) {
            help.push(WorldInteraction {
                action_lang_code: HELP_FUEL,
                button: InteractButton::Right,
                hot_key: None,
                item_stacks: vec![ItemStack::new(ctx.settings.bonfire.fuel_item.clone(), 1)],
            });
        }
        help
    }

    fn as_ignitable(&self) -> Option<&dyn Ignitable> {
        Some(self)
    }
}

impl Ignitable for BonfireBlock {
    /// Lit bonfires and bonfires that cannot burn yet refuse ignition.
    /// Otherwise the igniter has to be held for more than the configured time.
    fn try_ignite(&self, ctx: &BlockContext, pos: IVec3, seconds: f32) -> IgniteState {
        let ready = bonfire_at(ctx, pos).is_some_and(|b| b.can_ignite().is_ok());
        if !ready {
            IgniteState::NotIgnitable
        } else if seconds > ctx.settings.bonfire.ignite_after_seconds {
            IgniteState::IgniteNow
        } else {
            IgniteState::Ignitable
        }
    }

    fn on_ignited(
        &self,
        ctx: &mut BlockContext,
        pos: IVec3,
        _seconds: f32,
        player: &str,
    ) -> Result<(), Rejected> {
        with_bonfire(ctx, pos, |bonfire, ctx| bonfire.ignite(ctx, pos, player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorld;

    const POS: IVec3 = IVec3::new(0, 64, 0);

    fn codes(help: &[WorldInteraction]) -> Vec<&'static str> {
        help.iter().map(|h| h.action_lang_code).collect()
    }

    fn fuel(t: &mut TestWorld, amount: u32) {
        t.ctx().with_block_entity(POS, |entity, ctx| {
            if let BlockEntity::Bonfire(bonfire) = entity {
                bonfire.refuel(ctx, POS, amount).unwrap();
            }
        });
    }

    #[test]
    fn unfinished_bonfire_asks_for_fuel_only() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-construct1");
        let help = BonfireBlock.interaction_help(&t.ctx(), POS);
        assert_eq!(codes(&help), vec![HELP_FUEL]);
        assert_eq!(help[0].item_stacks, vec![ItemStack::new("firewood", 1)]);
    }

    #[test]
    fn fuelled_bonfire_offers_igniters() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-construct3");
        fuel(&mut t, 2);
        let help = BonfireBlock.interaction_help(&t.ctx(), POS);
        assert_eq!(codes(&help), vec![HELP_IGNITE, HELP_FUEL]);
        assert_eq!(help[0].hot_key, Some("sneak"));
        let igniters: Vec<&str> = help[0].item_stacks.iter().map(|s| s.item.as_str()).collect();
        assert_eq!(igniters, vec!["firestarter", "torch"]);
    }

    #[test]
    fn full_bonfire_only_offers_ignition() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-construct3");
        let max = t.settings.bonfire.max_fuel;
        fuel(&mut t, max);
        let help = BonfireBlock.interaction_help(&t.ctx(), POS);
        assert_eq!(codes(&help), vec![HELP_IGNITE]);
    }

    #[test]
    fn lit_bonfire_has_no_hints() {
        let mut t = TestWorld::new();
        t.place(POS, "bonfire-construct3");
        fuel(&mut t, 1);
        BonfireBlock.on_ignited(&mut t.ctx(), POS, 4.0, "alice").unwrap();
        assert!(BonfireBlock.interaction_help(&t.ctx(), POS).is_empty());
        assert_eq!(BonfireBlock.try_ignite(&t.ctx(), POS, 10.0), IgniteState::NotIgnitable);
    }

    #[test]
    fn fire_entity_is_not_a_bonfire() {
        let mut t = TestWorld::new();
        t.place(POS, "fire");
        let mut slot = ItemSlot::with("firewood", 1);
        let result = BonfireBlock.on_interact(&mut t.ctx(), POS, &Player::survival("bob"), &mut slot);
        assert!(matches!(result, Err(Rejected::NoBlockEntity)));
        assert!(BonfireBlock.interaction_help(&t.ctx(), POS).is_empty());
        assert_eq!(slot.quantity(), 1);
    }
}
