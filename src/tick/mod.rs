//! Recurring block ticks.
//!
//! Block entities that need to run periodically (a lit bonfire, a burning
//! fire block) register a listener with the `TickScheduler` and keep the
//! returned `TickSubscription`. The subscription is the only way to stop the
//! listener: it is not `Clone`, so exactly one owner can release it, and
//! releasing consumes it.
//!
//! The scheduler itself is plain data. `advance` is fed the frame delta by
//! `advance_block_ticks` and returns the listeners that are due, each with the
//! time accumulated since it last fired.
use bevy::math::IVec3;
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

/// Interval used by every block entity in this crate.
pub const ONCE_A_SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickListenerId(pub u64);

/// Owned handle to a registered listener.
#[must_use = "dropping a subscription without unregistering it leaks the listener"]
#[derive(Debug, PartialEq, Eq)]
pub struct TickSubscription {
    id: TickListenerId,
}

impl TickSubscription {
    #[must_use]
    pub fn id(&self) -> TickListenerId {
        self.id
    }
}

#[derive(Debug, Clone)]
struct Listener {
    pos: IVec3,
    interval: Duration,
    elapsed: Duration,
}

/// A listener that is due this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueTick {
    pub id: TickListenerId,
    pub pos: IVec3,
    pub dt: f32, // Seconds since the listener last fired
}

#[derive(Resource, Debug, Default)]
pub struct TickScheduler {
    next_id: u64,
    listeners: BTreeMap<TickListenerId, Listener>,
}

impl TickScheduler {
    /// Register a listener for the block at `pos`, firing every `interval`.
    pub fn register(&mut self, pos: IVec3, interval: Duration) -> TickSubscription {
        self.next_id += 1;
        let id = TickListenerId(self.next_id);
        self.listeners.insert(
            id,
            Listener {
                pos,
                interval,
                elapsed: Duration::ZERO,
            },
        );
        TickSubscription { id }
    }

    /// Release a listener. Returns `false` if it was already gone.
    pub fn unregister(&mut self, subscription: TickSubscription) -> bool {
        self.listeners.remove(&subscription.id).is_some()
    }

    #[must_use]
    pub fn is_active(&self, id: TickListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Positions with an active listener, in registration order.
    pub fn positions(&self) -> impl Iterator<Item = (TickListenerId, IVec3)> + '_ {
        self.listeners.iter().map(|(id, l)| (*id, l.pos))
    }

    /// Advance every listener by `delta` and collect the ones that are due.
    ///
    /// A listener fires at most once per call even when `delta` spans several
    /// intervals; its `dt` then covers the whole span.
    pub fn advance(&mut self, delta: Duration) -> Vec<DueTick> {
        let mut due = Vec::new();
        for (id, listener) in &mut self.listeners {
            listener.elapsed += delta;
            if listener.elapsed >= listener.interval {
                due.push(DueTick {
                    id: *id,
                    pos: listener.pos,
                    dt: listener.elapsed.as_secs_f32(),
                });
                listener.elapsed = Duration::ZERO;
            }
        }
        due
    }
}

/// Ticks collected by `advance_block_ticks` for the block systems to run.
#[derive(Resource, Debug, Default)]
pub struct DueTicks(pub Vec<DueTick>);

/// Feeds the frame delta into the scheduler.
#[allow(clippy::needless_pass_by_value)]
pub fn advance_block_ticks(time: Res<Time>, mut scheduler: ResMut<TickScheduler>, mut due: ResMut<DueTicks>) {
    due.0 = scheduler.advance(time.delta());
}
