pub mod block;
pub mod bonfire;
pub mod chunk;
pub mod entity;
pub mod fire;
pub mod item;
pub mod lang;
pub mod player;
pub mod presentation;
pub mod protection;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod settings;
pub mod tick;
pub mod world;

pub mod debug;

#[cfg(test)]
pub(crate) mod testing;
