//! Effect engine: clock ownership and the pump task.
//!
//! The pure lifecycle transitions live in `game_core::effect::lifecycle`;
//! this module owns the world clock, runs the transitions under each
//! actor's lock, and publishes the resulting notifications after the lock
//! is released. Expiry and periodic ticks are accurate to within the pump
//! resolution configured at startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use game_core::effect::{EffectTemplate, lifecycle};
use game_core::state::{Actor, ActorId};
use game_core::{GameTime, Notification};

use crate::error::{Result, RuntimeError};
use crate::events::NotificationBus;
use crate::world::{ActorCell, World};

/// Monotonic simulation clock. Milliseconds since the runtime started.
#[derive(Clone, Copy, Debug)]
pub struct WorldClock {
    start: Instant,
}

impl WorldClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> GameTime {
        GameTime::from_millis(self.start.elapsed().as_millis() as u64)
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies effect templates and drives active effects to their scheduled
/// transitions.
pub struct EffectEngine {
    world: Arc<World>,
    bus: NotificationBus,
    clock: WorldClock,
}

impl EffectEngine {
    pub fn new(world: Arc<World>, bus: NotificationBus, clock: WorldClock) -> Self {
        Self { world, bus, clock }
    }

    #[inline]
    pub fn clock(&self) -> WorldClock {
        self.clock
    }

    /// Applies a template to an actor by id. This is the entry point for
    /// scripted consequences (quest rewards, dispels) that come with their
    /// own authorization; skill resolution reaches effects through
    /// [`apply_locked`] instead while it already holds the target's lock.
    ///
    /// [`apply_locked`]: EffectEngine::apply_locked
    pub fn apply_to(
        &self,
        target: ActorId,
        template: &EffectTemplate,
        source: ActorId,
    ) -> Result<()> {
        let cell = self
            .world
            .resolve(target)
            .ok_or(RuntimeError::ActorNotFound(target))?;
        let mut out = Vec::new();
        {
            let mut actor = cell.lock();
            self.apply_locked(&mut actor, template, source, &mut out)?;
        }
        self.bus.publish_all(out);
        Ok(())
    }

    /// Applies a template to an already-locked actor, collecting the
    /// notifications for the caller to publish after it drops the lock.
    pub fn apply_locked(
        &self,
        actor: &mut Actor,
        template: &EffectTemplate,
        source: ActorId,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        lifecycle::apply(actor, template, source, self.clock.now(), out).map_err(|_| {
            RuntimeError::EffectCapacity { actor: actor.id }
        })
    }

    /// Advances every actor's effects to the current time. One pump pass.
    pub fn pump_once(&self) {
        let now = self.clock.now();
        for id in self.world.ids() {
            let Some(cell) = self.world.resolve(id) else {
                continue;
            };
            let mut out = Vec::new();
            {
                let mut actor = cell.lock();
                lifecycle::advance(&mut actor, now, &mut out);
            }
            if !out.is_empty() {
                trace!(target: "runtime::effects", actor = %id, events = out.len(), "effects advanced");
                self.bus.publish_all(out);
            }
        }
    }

    /// Proactively expires everything on a cell. Part of the mandatory
    /// removal cleanup; natural timers are not waited on.
    pub fn expire_actor(&self, cell: &ActorCell) {
        let mut out = Vec::new();
        {
            let mut actor = cell.lock();
            lifecycle::expire_all(&mut actor, &mut out);
        }
        self.bus.publish_all(out);
    }

    /// Pump loop. Runs until the owning task is aborted at shutdown.
    pub async fn run(self: Arc<Self>, resolution_ms: u64) {
        let mut interval = tokio::time::interval(Duration::from_millis(resolution_ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.pump_once();
        }
    }
}
