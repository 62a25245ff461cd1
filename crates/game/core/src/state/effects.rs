//! Per-actor collection of active timed effects.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::effect::{Effect, EffectKind};

/// The set of live effect instances owned by one actor, keyed by effect
/// kind. At most one instance of a given kind exists at a time; the newer
/// application replaces the older one rather than stacking.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<Effect, { GameConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Looks up the live instance of a kind, if any.
    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: EffectKind) -> Option<&mut Effect> {
        self.effects.iter_mut().find(|e| e.kind() == kind)
    }

    /// Inserts an instance, replacing any existing instance of the same
    /// kind. Returns the replaced instance.
    ///
    /// Returns `Err` with the rejected effect when the collection is full
    /// and no same-kind slot could be reused.
    pub fn insert(&mut self, effect: Effect) -> Result<Option<Effect>, Effect> {
        if let Some(slot) = self.effects.iter_mut().find(|e| e.kind() == effect.kind()) {
            let old = *slot;
            *slot = effect;
            return Ok(Some(old));
        }
        match self.effects.try_push(effect) {
            Ok(()) => Ok(None),
            Err(err) => Err(err.element()),
        }
    }

    /// Removes and returns the instance of a kind.
    pub fn remove(&mut self, kind: EffectKind) -> Option<Effect> {
        let index = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(index))
    }

    /// Removes every instance, returning them in insertion order.
    pub fn drain_all(&mut self) -> ArrayVec<Effect, { GameConfig::MAX_ACTIVE_EFFECTS }> {
        core::mem::take(&mut self.effects)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Effect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
