//! Fire spreading onto neighbouring cells.
use bevy::log::debug;
use bevy::math::IVec3;
use thiserror::Error;

use crate::block::{BlockFacing, BlockId};
use crate::protection::AccessResponse;
use crate::world::{BlockContext, BlockEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpreadBlocked {
    #[error("no fire block is registered")]
    NoFireBlock,
    #[error("target is not replaceable")]
    NotReplaceable,
    #[error("target is already burning")]
    AlreadyBurning,
    #[error("no combustible neighbour to feed the fire")]
    NoFuelNeighbour,
    #[error("igniting player may not build at the target")]
    ClaimDenied,
}

/// Whether the block at `pos` can feed a fire: combustible and not reinforced.
#[must_use]
pub fn can_burn(ctx: &BlockContext, pos: IVec3) -> bool {
    ctx.block(pos).is_some_and(|b| b.is_combustible()) && !ctx.protection.is_reinforced(pos)
}

#[must_use]
pub fn is_burning(ctx: &BlockContext, pos: IVec3) -> bool {
    ctx.world.block_entity(pos).is_some_and(BlockEntity::is_burning)
}

/// First combustible, not yet burning neighbour of `target`.
#[must_use]
pub fn find_fuel_neighbour(ctx: &BlockContext, target: IVec3) -> Option<IVec3> {
    BlockFacing::neighbours(target).find(|n| can_burn(ctx, *n) && !is_burning(ctx, *n))
}

/// Try to start a fire at `target`.
///
/// On success the fire block is placed, its burning entity is told which
/// neighbour it feeds on and who started it, and the fuel position is
/// returned. Claims are only checked when the igniting player is known.
///
/// # Errors
/// Returns the first condition that blocked the spread.
pub fn try_spread_to(
    ctx: &mut BlockContext,
    target: IVec3,
    fire_block: Option<BlockId>,
    started_by: Option<&str>,
) -> Result<IVec3, SpreadBlocked> {
    let fire_block = fire_block.ok_or(SpreadBlocked::NoFireBlock)?;

    let replaceable = ctx.block(target).map_or(0, |b| b.replaceable);
    if replaceable < ctx.settings.bonfire.min_replaceable {
        return Err(SpreadBlocked::NotReplaceable);
    }
    if is_burning(ctx, target) {
        return Err(SpreadBlocked::AlreadyBurning);
    }
    let fuel_pos = find_fuel_neighbour(ctx, target).ok_or(SpreadBlocked::NoFuelNeighbour)?;
    if let Some(player) = started_by
        && ctx.protection.test_access(player, target) != AccessResponse::Granted
    {
        return Err(SpreadBlocked::ClaimDenied);
    }

    if !ctx.place_block(target, fire_block) {
        return Err(SpreadBlocked::NotReplaceable);
    }
    ctx.with_block_entity(target, |entity, ctx| {
        if let BlockEntity::Fire(fire) = entity {
            fire.on_fire_placed(ctx, target, fuel_pos, started_by);
        }
    });
    debug!("fire spread to {target}, feeding on {fuel_pos}");
    Ok(fuel_pos)
}

/// Candidate cells around `origin`: the six faces, then the configured band
/// straight above when `upwards` is set.
#[must_use]
pub fn spread_targets(ctx: &BlockContext, origin: IVec3, upwards: bool) -> Vec<IVec3> {
    let mut targets: Vec<IVec3> = BlockFacing::neighbours(origin).collect();
    if upwards {
        let settings = &ctx.settings.bonfire;
        for up in settings.spread_up_min..=settings.spread_up_max {
            let pos = origin + IVec3::Y * up;
            if !targets.contains(&pos) {
                targets.push(pos);
            }
        }
    }
    targets
}

/// Try every target around `origin` and return the cells that caught fire.
pub fn spread_all_dirs(
    ctx: &mut BlockContext,
    origin: IVec3,
    fire_block: Option<BlockId>,
    started_by: Option<&str>,
    upwards: bool,
) -> Vec<IVec3> {
    let mut lit = Vec::new();
    for target in spread_targets(ctx, origin, upwards) {
        match try_spread_to(ctx, target, fire_block, started_by) {
            Ok(_) => lit.push(target),
            Err(SpreadBlocked::NoFireBlock) => break,
            Err(_) => {}
        }
    }
    lit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protection::LandClaim;
    use crate::testing::TestWorld;

    const ORIGIN: IVec3 = IVec3::new(0, 64, 0);

    fn fire(t: &TestWorld) -> Option<BlockId> {
        Some(t.id("fire"))
    }

    #[test]
    fn solid_targets_are_not_replaced() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target, "planks-oak");
        t.place(target + IVec3::X, "log-oak");
        let fire = fire(&t);
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, None), Err(SpreadBlocked::NotReplaceable));
        assert_eq!(t.name_at(target), "planks-oak");
    }

    #[test]
    fn tall_grass_is_replaceable_enough() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target, "tallgrass");
        t.place(target + IVec3::X, "log-oak");
        let fire = fire(&t);
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, None), Ok(target + IVec3::X));
        assert_eq!(t.name_at(target), "fire");
    }

    #[test]
    fn needs_a_combustible_neighbour() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target + IVec3::X, "rock-granite");
        let fire = fire(&t);
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, None), Err(SpreadBlocked::NoFuelNeighbour));
        assert_eq!(t.name_at(target), "air");
    }

    #[test]
    fn reinforced_fuel_does_not_count() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target + IVec3::X, "log-oak");
        t.protection.reinforced.insert(target + IVec3::X);
        let fire = fire(&t);
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, None), Err(SpreadBlocked::NoFuelNeighbour));
    }

    #[test]
    fn does_not_ignite_a_burning_cell_twice() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target + IVec3::X, "log-oak");
        let fire = fire(&t);
        assert!(try_spread_to(&mut t.ctx(), target, fire, None).is_ok());
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, None), Err(SpreadBlocked::AlreadyBurning));
        assert_eq!(t.scheduler.len(), 1);
    }

    #[test]
    fn claims_stop_fire_started_by_outsiders() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target + IVec3::X, "log-oak");
        t.protection.claims.push(LandClaim {
            owner: "bob".into(),
            min: IVec3::new(-8, 0, -8),
            max: IVec3::new(8, 255, 8),
            allowed: vec!["carol".into()],
        });
        let fire = fire(&t);

        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, Some("alice")), Err(SpreadBlocked::ClaimDenied));
        assert_eq!(try_spread_to(&mut t.ctx(), target, fire, Some("carol")), Ok(target + IVec3::X));
    }

    #[test]
    fn unknown_igniter_skips_the_claim_check() {
        let mut t = TestWorld::new();
        let target = ORIGIN + IVec3::X;
        t.place(target + IVec3::X, "log-oak");
        t.protection.claims.push(LandClaim {
            owner: "bob".into(),
            min: IVec3::new(-8, 0, -8),
            max: IVec3::new(8, 255, 8),
            allowed: Vec::new(),
        });
        let fire = fire(&t);
        assert!(try_spread_to(&mut t.ctx(), target, fire, None).is_ok());
    }

    #[test]
    fn missing_fire_block_stops_spreading() {
        let mut t = TestWorld::new();
        t.place(ORIGIN + IVec3::new(2, 0, 0), "log-oak");
        assert!(spread_all_dirs(&mut t.ctx(), ORIGIN, None, None, true).is_empty());
        assert_eq!(t.name_at(ORIGIN + IVec3::X), "air");
    }

    #[test]
    fn upward_band_follows_settings() {
        let mut t = TestWorld::new();
        let targets = spread_targets(&t.ctx(), ORIGIN, true);
        assert_eq!(targets.len(), 6 + 4);
        assert!(targets.contains(&(ORIGIN + IVec3::Y * 5)));
        assert!(!targets.contains(&(ORIGIN + IVec3::Y * 6)));
        assert_eq!(spread_targets(&t.ctx(), ORIGIN, false).len(), 6);
    }

    #[test]
    fn spreads_into_every_open_cell_next_to_fuel() {
        let mut t = TestWorld::new();
        // Log two blocks east: only the cell between it and the origin can burn.
        t.place(ORIGIN + IVec3::new(2, 0, 0), "log-oak");
        let fire = fire(&t);
        let lit = spread_all_dirs(&mut t.ctx(), ORIGIN, fire, Some("alice"), true);
        assert_eq!(lit, vec![ORIGIN + IVec3::X]);
    }
}
