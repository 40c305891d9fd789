//! Fuel accounting.
//!
//! Fuel is stored as the burn time left in seconds. The number of fuel items
//! shown to players is derived from it and never stored.
use bevy::log::debug;

use crate::block::classes::Rejected;
use crate::item::ItemRegistry;
use crate::settings::BonfireSettings;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelState {
    pub remaining_burn_seconds: f32,
    pub seconds_per_fuel_item: f32,
    pub max_fuel: u32,
}

/// Outcome of burning for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Burn {
    pub changed: bool,   // The displayed fuel count changed
    pub exhausted: bool, // Nothing left to burn
}

impl FuelState {
    #[must_use]
    pub fn new(seconds_per_fuel_item: f32, max_fuel: u32) -> Self {
        Self {
            remaining_burn_seconds: 0.0,
            seconds_per_fuel_item,
            max_fuel,
        }
    }

    /// Seconds one fuel item burns for: the fuel item's burn duration times
    /// the configured multiplier, or the fallback duration when the item or
    /// its burn properties are unknown.
    #[must_use]
    pub fn seconds_per_item(items: &ItemRegistry, settings: &BonfireSettings) -> f32 {
        let duration = items
            .get(&settings.fuel_item)
            .and_then(|item| item.combustible)
            .map(|c| c.burn_duration)
            .filter(|d| *d > 0.0);
        let duration = duration.unwrap_or_else(|| {
            debug!(
                "fuel item {} has no burn duration, using {}s",
                settings.fuel_item, settings.fallback_burn_duration
            );
            settings.fallback_burn_duration
        });
        duration * settings.burn_time_multiplier
    }

    /// Whole fuel items left, rounded up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn total_fuel(&self) -> u32 {
        if self.seconds_per_fuel_item <= 0.0 || self.remaining_burn_seconds <= 0.0 {
            return 0;
        }
        (self.remaining_burn_seconds / self.seconds_per_fuel_item).ceil() as u32
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.total_fuel() >= self.max_fuel
    }

    /// Add `amount` fuel items, capped at `max_fuel`.
    ///
    /// # Errors
    /// `Rejected::FuelFull` if the bonfire already holds `max_fuel` items.
    #[allow(clippy::cast_precision_loss)]
    pub fn refuel(&mut self, amount: u32) -> Result<u32, Rejected> {
        if self.is_full() {
            return Err(Rejected::FuelFull);
        }
        self.remaining_burn_seconds += amount as f32 * self.seconds_per_fuel_item;
        if self.total_fuel() > self.max_fuel {
            self.remaining_burn_seconds = self.max_fuel as f32 * self.seconds_per_fuel_item;
        }
        Ok(self.total_fuel())
    }

    /// Burn for `dt` seconds.
    pub fn burn(&mut self, dt: f32) -> Burn {
        let before = self.total_fuel();
        self.remaining_burn_seconds -= dt;
        Burn {
            changed: before != self.total_fuel(),
            exhausted: self.remaining_burn_seconds <= 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.remaining_burn_seconds = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: f32 = 24.0 * 4.0;

    #[test]
    fn refuel_adds_whole_items_up_to_max() {
        let mut fuel = FuelState::new(FALLBACK, 32);
        for n in 0..40u32 {
            let before = fuel.total_fuel();
            match fuel.refuel(n) {
                Ok(total) => assert_eq!(total, (before + n).min(32)),
                Err(e) => {
                    assert_eq!(e, Rejected::FuelFull);
                    assert_eq!(before, 32);
                }
            }
        }
    }

    #[test]
    fn refuel_when_full_leaves_state_unchanged() {
        let mut fuel = FuelState::new(FALLBACK, 32);
        assert_eq!(fuel.refuel(32), Ok(32));
        let snapshot = fuel;
        assert_eq!(fuel.refuel(1), Err(Rejected::FuelFull));
        assert_eq!(fuel, snapshot);
    }

    #[test]
    fn partially_burned_item_still_counts() {
        let mut fuel = FuelState::new(FALLBACK, 32);
        fuel.refuel(1).unwrap();
        let burn = fuel.burn(95.5);
        assert_eq!(fuel.total_fuel(), 1);
        assert!(!burn.changed);
        assert!(!burn.exhausted);
        assert_eq!(fuel.refuel(1), Ok(2));
    }

    #[test]
    fn full_load_burns_for_exactly_its_duration() {
        let mut fuel = FuelState::new(FALLBACK, 32);
        assert_eq!(fuel.refuel(32), Ok(32));
        for _ in 0..3071 {
            assert!(!fuel.burn(1.0).exhausted);
        }
        assert!(fuel.total_fuel() >= 1);
        assert!(fuel.burn(1.0).exhausted);
        assert_eq!(fuel.total_fuel(), 0);
    }

    #[test]
    fn unknown_fuel_item_uses_fallback() {
        let settings = BonfireSettings::default();
        let per_item = FuelState::seconds_per_item(&ItemRegistry::default(), &settings);
        assert!((per_item - FALLBACK).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_seconds_per_item_has_no_fuel() {
        let fuel = FuelState { remaining_burn_seconds: 10.0, seconds_per_fuel_item: 0.0, max_fuel: 32 };
        assert_eq!(fuel.total_fuel(), 0);
    }
}
