//! Items, stacks and inventory slots.
//!
//! Items are defined in `data/items/*.ron` and loaded into an `ItemRegistry`
//! the same way blocks are. Only what block interaction needs is modelled:
//! an item's burn properties, whether it can light things and the slot a
//! player holds it in.
use crate::block::CombustibleProps;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod loader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub combustible: Option<CombustibleProps>,
    #[serde(default)]
    pub can_ignite: bool, // Torches, firestarters
    #[serde(default = "Item::default_max_stack")]
    pub max_stack: u32,
}

impl Item {
    fn default_max_stack() -> u32 { 64 }
}

#[derive(Resource, Default, Clone, Debug)]
pub struct ItemRegistry {
    pub items: HashMap<String, Item>,
}

impl ItemRegistry {
    pub fn register(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Every item that can be used to light a fire, sorted by name.
    #[must_use]
    pub fn igniters(&self) -> Vec<&Item> {
        let mut out: Vec<&Item> = self.items.values().filter(|i| i.can_ignite).collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    pub quantity: u32,
}

impl ItemStack {
    #[must_use]
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self { item: item.into(), quantity }
    }
}

/// A single inventory slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSlot {
    pub stack: Option<ItemStack>,
}

impl ItemSlot {
    #[must_use]
    pub fn with(item: impl Into<String>, quantity: u32) -> Self {
        Self { stack: Some(ItemStack::new(item, quantity)) }
    }

    /// Whether the slot holds at least one `item`.
    #[must_use]
    pub fn holds(&self, item: &str) -> bool {
        self.stack.as_ref().is_some_and(|s| s.item == item && s.quantity > 0)
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.stack.as_ref().map_or(0, |s| s.quantity)
    }

    /// Remove up to `amount` items, emptying the slot when it runs out.
    pub fn take_out(&mut self, amount: u32) -> Option<ItemStack> {
        let stack = self.stack.as_mut()?;
        let taken = amount.min(stack.quantity);
        stack.quantity -= taken;
        let out = ItemStack::new(stack.item.clone(), taken);
        if stack.quantity == 0 {
            self.stack = None;
        }
        (taken > 0).then_some(out)
    }
}
