//! Player components.
//!
//! A player entity carries a `Player` (uid and game mode) and a `Hotbar`
//! whose active slot is what the player interacts with.
//!
//! # Example:
//!
//! ```ignore
//! commands.spawn((
//!     Player::survival("alice"),
//!     Hotbar::holding("firewood", 8),
//! ));
//! ```
use crate::item::ItemSlot;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Stable identifier used by land claims and ignition records.
    pub uid: String,
    pub game_mode: GameMode,
}

impl Player {
    #[must_use]
    pub fn survival(uid: impl Into<String>) -> Self {
        Self { uid: uid.into(), game_mode: GameMode::Survival }
    }

    #[must_use]
    pub fn creative(uid: impl Into<String>) -> Self {
        Self { uid: uid.into(), game_mode: GameMode::Creative }
    }

    /// Creative players place and build without using up items.
    #[must_use]
    pub fn consumes_items(&self) -> bool {
        self.game_mode != GameMode::Creative
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Hotbar {
    pub active: ItemSlot,
}

impl Hotbar {
    #[must_use]
    pub fn holding(item: impl Into<String>, quantity: u32) -> Self {
        Self { active: ItemSlot::with(item, quantity) }
    }
}
