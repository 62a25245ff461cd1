//! Actor registry and per-actor locking discipline.
//!
//! The world/spawn collaborator constructs actors; the core only mutates
//! them. Each actor lives in an [`ActorCell`] whose mutex serializes every
//! resolution and effect tick touching it. Critical sections are short,
//! bounded computations and are never held across an await point.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::debug;

use game_core::state::{Actor, ActorId, ActorKind};

/// One actor behind its exclusivity lock.
pub struct ActorCell {
    id: ActorId,
    inner: Mutex<Actor>,
}

impl ActorCell {
    fn new(actor: Actor) -> Self {
        Self {
            id: actor.id,
            inner: Mutex::new(actor),
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, Actor> {
        self.inner.lock().expect("actor lock poisoned")
    }
}

/// What the spawn collaborator provides when registering an actor.
#[derive(Clone, Copy, Debug)]
pub struct ActorSpec {
    pub kind: ActorKind,
    pub max_hp: u32,
    pub natural_model: u32,
}

/// Registry of live actors.
///
/// Lookups take a read lock only long enough to clone the cell's `Arc`;
/// spawn/remove serialize on the write lock. Actor state itself is guarded
/// by the per-cell mutex, never by the registry lock.
pub struct World {
    actors: RwLock<HashMap<ActorId, Arc<ActorCell>>>,
    next_id: AtomicU32,
}

impl World {
    pub fn new() -> Self {
        Self {
            actors: RwLock::new(HashMap::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Registers a new actor and returns its id.
    pub fn spawn(&self, spec: ActorSpec) -> ActorId {
        let id = ActorId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let actor = Actor::new(id, spec.kind, spec.max_hp, spec.natural_model);
        let cell = Arc::new(ActorCell::new(actor));
        self.actors
            .write()
            .expect("actor registry poisoned")
            .insert(id, cell);
        debug!(target: "runtime::world", actor = %id, kind = ?spec.kind, "actor spawned");
        id
    }

    /// Looks up a live actor. `None` means the actor left the world.
    pub fn resolve(&self, id: ActorId) -> Option<Arc<ActorCell>> {
        self.actors
            .read()
            .expect("actor registry poisoned")
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors
            .read()
            .expect("actor registry poisoned")
            .contains_key(&id)
    }

    /// Ids of every live actor. The snapshot is taken under the read lock;
    /// callers re-resolve each id before touching it.
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors
            .read()
            .expect("actor registry poisoned")
            .keys()
            .copied()
            .collect()
    }

    /// Unregisters an actor and returns its cell so the caller can run the
    /// required cleanup (effect expiry, deferred-action cancellation).
    pub fn remove(&self, id: ActorId) -> Option<Arc<ActorCell>> {
        let cell = self
            .actors
            .write()
            .expect("actor registry poisoned")
            .remove(&id);
        if cell.is_some() {
            debug!(target: "runtime::world", actor = %id, "actor removed");
        }
        cell
    }

    /// Sets an actor's live target selection. Session and AI collaborators
    /// call this; deferred-action fingerprints read it back.
    pub fn set_target(&self, actor: ActorId, target: Option<ActorId>) -> bool {
        match self.resolve(actor) {
            Some(cell) => {
                cell.lock().target = target;
                true
            }
            None => false,
        }
    }

    /// True if `actor` currently has `target` selected.
    pub fn targets(&self, actor: ActorId, target: ActorId) -> bool {
        self.resolve(actor)
            .map(|cell| cell.lock().target == Some(target))
            .unwrap_or(false)
    }

    /// Locks two distinct cells in ascending id order and hands the guards
    /// back in argument order. The fixed global order is what makes
    /// concurrent A→B and B→A resolutions deadlock-free.
    pub fn lock_pair<'a>(
        first: &'a ActorCell,
        second: &'a ActorCell,
    ) -> (MutexGuard<'a, Actor>, MutexGuard<'a, Actor>) {
        debug_assert_ne!(first.id(), second.id(), "lock_pair requires distinct actors");
        if first.id() < second.id() {
            let a = first.lock();
            let b = second.lock();
            (a, b)
        } else {
            let b = second.lock();
            let a = first.lock();
            (a, b)
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
