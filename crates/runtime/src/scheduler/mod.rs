//! Deferred action scheduler.
//!
//! The general form of "wind up, then verify nothing changed before
//! committing": a continuation runs after a delay only if its captured
//! fingerprint still matches the live world. A mismatch discards the
//! continuation silently: no error, no side effect. Firing is inherently
//! best-effort; continuations re-check their context immediately before
//! mutating, which filters the rare fire that races a concurrent change.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::{debug, trace};

use game_core::state::ActorId;

use crate::world::World;

/// Captured context a deferred action depends on. Checked against the live
/// world at fire time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fingerprint {
    /// The actor still has the same target selected.
    TargetLocked { actor: ActorId, target: ActorId },
    /// The actor is still registered in the world.
    Present { actor: ActorId },
}

impl Fingerprint {
    /// The actor whose removal invalidates this fingerprint.
    pub fn actor(&self) -> ActorId {
        match *self {
            Self::TargetLocked { actor, .. } | Self::Present { actor } => actor,
        }
    }

    /// True if the live world still matches the captured context.
    pub fn matches(&self, world: &World) -> bool {
        match *self {
            Self::TargetLocked { actor, target } => world.targets(actor, target),
            Self::Present { actor } => world.contains(actor),
        }
    }
}

/// A deferred continuation. Runs at most once, on a scheduler task.
pub type Continuation = Box<dyn FnOnce() + Send + 'static>;

struct Entry {
    fingerprint: Fingerprint,
    abort: AbortHandle,
}

/// Cancellable timer queue keyed by actor/context.
pub struct ActionScheduler {
    world: Arc<World>,
    pending: Arc<Mutex<HashMap<u64, Entry>>>,
    next_id: AtomicU64,
}

impl ActionScheduler {
    pub fn new(world: Arc<World>) -> Self {
        Self {
            world,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Schedules `continuation` to run after `delay` if `fingerprint` still
    /// matches the live world at fire time.
    pub fn schedule(&self, delay: Duration, fingerprint: Fingerprint, continuation: Continuation) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let world = Arc::clone(&self.world);
        let queue = Arc::clone(&self.pending);

        // The queue lock is held across the spawn so a zero-delay task
        // cannot observe the queue before its own entry is registered.
        let mut pending = self.pending.lock().expect("scheduler queue poisoned");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Claim the entry; a concurrent cancel that got here first wins.
            let claimed = {
                let mut queue = queue.lock().expect("scheduler queue poisoned");
                queue.remove(&id)
            };
            let Some(entry) = claimed else {
                return;
            };

            if !entry.fingerprint.matches(&world) {
                trace!(
                    target: "runtime::scheduler",
                    fingerprint = ?entry.fingerprint,
                    "stale deferred action discarded"
                );
                return;
            }
            continuation();
        });

        pending.insert(
            id,
            Entry {
                fingerprint,
                abort: handle.abort_handle(),
            },
        );
        debug!(
            target: "runtime::scheduler",
            id,
            ?fingerprint,
            delay_ms = delay.as_millis() as u64,
            "deferred action scheduled"
        );
    }

    /// Cancels every outstanding action whose fingerprint references the
    /// actor. Part of the mandatory removal cleanup.
    pub fn cancel_for(&self, actor: ActorId) {
        let mut pending = self.pending.lock().expect("scheduler queue poisoned");
        pending.retain(|id, entry| {
            if entry.fingerprint.actor() == actor {
                entry.abort.abort();
                debug!(target: "runtime::scheduler", id, actor = %actor, "deferred action cancelled");
                false
            } else {
                true
            }
        });
    }

    /// Cancels everything. Called at shutdown.
    pub fn cancel_all(&self) {
        let mut pending = self.pending.lock().expect("scheduler queue poisoned");
        for entry in pending.values() {
            entry.abort.abort();
        }
        pending.clear();
    }

    /// Number of outstanding deferred actions.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().expect("scheduler queue poisoned").len()
    }
}
