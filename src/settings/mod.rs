//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the existing RON watcher utilities (see `ron::setup_ron_watcher`).
//! Every field carries a serde default so a settings file only needs to name
//! the values it changes.
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server-side rules for the simulated world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_allow_fire_spread")]
    pub allow_fire_spread: bool, // Allow fires and bonfires to spread onto neighbouring cells.
    #[serde(default = "ServerSettings::default_world_seed")]
    pub world_seed: u64, // Seed for the world random source (spread and ignite rolls).
}

impl ServerSettings {
    fn default_allow_fire_spread() -> bool { true }
    fn default_world_seed() -> u64 { 0x5EED_F1AE }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            allow_fire_spread: Self::default_allow_fire_spread(),
            world_seed: Self::default_world_seed(),
        }
    }
}

/// What happens to neighbours that are already cracked when a bonfire goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrackedNeighbors {
    /// Break them into their drops.
    Break,
    /// Leave them in place.
    Keep,
}

impl Default for CrackedNeighbors {
    fn default() -> Self { CrackedNeighbors::Break }
}

/// Gameplay balance for bonfires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonfireSettings {
    #[serde(default = "BonfireSettings::default_max_fuel")]
    pub max_fuel: u32, // Maximum fuel items a built bonfire can hold.
    #[serde(default = "BonfireSettings::default_fuel_item")]
    pub fuel_item: String, // Item used both to build and to fuel a bonfire.
    #[serde(default = "BonfireSettings::default_fire_block")]
    pub fire_block: String, // Block placed when fire spreads.
    #[serde(default = "BonfireSettings::default_burn_time_multiplier")]
    pub burn_time_multiplier: f32, // Fuel item burn duration is multiplied by this.
    #[serde(default = "BonfireSettings::default_fallback_burn_duration")]
    pub fallback_burn_duration: f32, // Used when the fuel item has no combustible props.
    #[serde(default = "BonfireSettings::default_fire_damage")]
    pub fire_damage: f32, // Damage applied each second to entities in the flames.
    #[serde(default = "BonfireSettings::default_ignite_chance")]
    pub ignite_chance: f64, // Chance per second that an entity in the flames catches fire.
    #[serde(default = "BonfireSettings::default_spread_chance")]
    pub spread_chance: f64, // Chance per second of attempting to spread.
    #[serde(default = "BonfireSettings::default_entity_detection_range")]
    pub entity_detection_range: f32, // Range (blocks) scanned for entities around the bonfire.
    #[serde(default = "BonfireSettings::default_spread_up_min")]
    pub spread_up_min: i32, // Lowest cell above the bonfire that fire may spread to.
    #[serde(default = "BonfireSettings::default_spread_up_max")]
    pub spread_up_max: i32, // Highest cell above the bonfire that fire may spread to.
    #[serde(default = "BonfireSettings::default_min_replaceable")]
    pub min_replaceable: u32, // Target cells must be at least this replaceable to catch fire.
    #[serde(default = "BonfireSettings::default_ignite_after_seconds")]
    pub ignite_after_seconds: f32, // Seconds an igniter must be held before the bonfire lights.
    #[serde(default)]
    pub cracked_neighbors: CrackedNeighbors,
}

impl BonfireSettings {
    fn default_max_fuel() -> u32 { 32 }
    fn default_fuel_item() -> String { "firewood".to_string() }
    fn default_fire_block() -> String { "fire".to_string() }
    fn default_burn_time_multiplier() -> f32 { 4.0 }
    fn default_fallback_burn_duration() -> f32 { 24.0 }
    fn default_fire_damage() -> f32 { 2.0 }
    fn default_ignite_chance() -> f64 { 0.125 }
    fn default_spread_chance() -> f64 { 0.2 }
    fn default_entity_detection_range() -> f32 { 3.0 }
    fn default_spread_up_min() -> i32 { 2 }
    fn default_spread_up_max() -> i32 { 5 }
    fn default_min_replaceable() -> u32 { 6000 }
    fn default_ignite_after_seconds() -> f32 { 3.0 }
}

impl Default for BonfireSettings {
    fn default() -> Self {
        Self {
            max_fuel: Self::default_max_fuel(),
            fuel_item: Self::default_fuel_item(),
            fire_block: Self::default_fire_block(),
            burn_time_multiplier: Self::default_burn_time_multiplier(),
            fallback_burn_duration: Self::default_fallback_burn_duration(),
            fire_damage: Self::default_fire_damage(),
            ignite_chance: Self::default_ignite_chance(),
            spread_chance: Self::default_spread_chance(),
            entity_detection_range: Self::default_entity_detection_range(),
            spread_up_min: Self::default_spread_up_min(),
            spread_up_max: Self::default_spread_up_max(),
            min_replaceable: Self::default_min_replaceable(),
            ignite_after_seconds: Self::default_ignite_after_seconds(),
            cracked_neighbors: CrackedNeighbors::default(),
        }
    }
}

/// Audio related settings. Only the presentation side reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "AudioSettings::default_master")]
    pub master_volume: f32, // Master output volume
    #[serde(default = "AudioSettings::default_ambient")]
    pub ambient_volume: f32, // Volume of looping ambient sounds such as a burning bonfire
    #[serde(default = "AudioSettings::default_fade_out")]
    pub fade_out_seconds: f32, // How long an ambient sound takes to fade when its source stops
}

impl AudioSettings {
    fn default_master() -> f32 { 1.0 }
    fn default_ambient() -> f32 { 2.0 }
    fn default_fade_out() -> f32 { 1.0 }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: Self::default_master(),
            ambient_volume: Self::default_ambient(),
            fade_out_seconds: Self::default_fade_out(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub bonfire: BonfireSettings,
    #[serde(default)]
    pub audio: AudioSettings,
}

/// `chance` as a probability `gen_bool` accepts. NaN and infinities count as never.
fn probability(chance: f64) -> f64 {
    if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 }
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Chance of a spread attempt per second, clamped into a valid probability.
    #[must_use]
    pub fn spread_chance(&self) -> f64 {
        probability(self.bonfire.spread_chance)
    }

    /// Chance of setting an entity ablaze per second, clamped into a valid probability.
    #[must_use]
    pub fn ignite_chance(&self) -> f64 {
        probability(self.bonfire.ignite_chance)
    }

    /// Add descriptions to each setting field so users understand
    /// what each setting does when editing the RON file.
    ///
    /// # Return
    /// A nested `HashMap` where the first level keys are section names (e.g. "bonfire")
    /// and the second level maps setting field names to their descriptions.
    #[must_use]
    pub fn field_descriptions() -> HashMap<&'static str, HashMap<&'static str, &'static str>> {
        let mut out: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();

        out.insert("server", {
            let mut m = HashMap::new();
            m.insert("allow_fire_spread", "Allow fires and bonfires to spread onto neighbouring cells.");
            m.insert("world_seed", "Seed for the world random source used by spread and ignite rolls.");
            m
        });

        out.insert("bonfire", {
            let mut m = HashMap::new();
            m.insert("max_fuel", "Maximum fuel items a built bonfire can hold.");
            m.insert("fuel_item", "Item used both to build and to fuel a bonfire.");
            m.insert("fire_block", "Block placed when fire spreads from a bonfire.");
            m.insert("burn_time_multiplier", "Fuel item burn duration is multiplied by this.");
            m.insert("fallback_burn_duration", "Burn duration used when the fuel item cannot be resolved.");
            m.insert("fire_damage", "Damage per second dealt to entities standing in the flames.");
            m.insert("ignite_chance", "Chance per second that an entity in the flames catches fire (0.0-1.0).");
            m.insert("spread_chance", "Chance per second of attempting to spread fire (0.0-1.0).");
            m.insert("entity_detection_range", "Range in blocks scanned for entities around a bonfire.");
            m.insert("spread_up_min", "Lowest cell above the bonfire that fire may spread to.");
            m.insert("spread_up_max", "Highest cell above the bonfire that fire may spread to.");
            m.insert("min_replaceable", "Cells must be at least this replaceable for fire to spread into them.");
            m.insert("ignite_after_seconds", "Seconds an igniter has to be held before the bonfire lights.");
            m.insert("cracked_neighbors", "What to do with already cracked ore or rock when a bonfire goes out (break/keep).");
            m
        });

        out.insert("audio", {
            let mut m = HashMap::new();
            m.insert("master_volume", "Master output volume (0.0 = silent, 1.0 = full).");
            m.insert("ambient_volume", "Volume of looping ambient sounds such as a burning bonfire.");
            m.insert("fade_out_seconds", "How long an ambient sound takes to fade out when its source stops.");
            m
        });

        out
    }
}

pub mod loader;
