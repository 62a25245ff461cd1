//! Actor-related state types.
//!
//! The core never creates or destroys actors; the world/spawn collaborator
//! owns their lifetime and hands the core mutable access. Everything the
//! gating and effect layers read or write lives here: vitality, the
//! abnormal-status bitmask, the transformed appearance, the live targeting
//! state, and the collection of active timed effects.

pub mod abnormal;
pub mod effects;

pub use abnormal::AbnormalState;
pub use effects::ActiveEffects;

use core::fmt;

/// Unique identifier for any actor tracked in the world.
///
/// Opaque and stable for the actor's lifetime. Also the global lock-ordering
/// key: cross-actor operations acquire per-actor locks in ascending id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distinguishes persistent player characters from template-spawned NPCs.
///
/// The distinction matters at effect expiry: a transformed NPC reverts to
/// its spawn template's model, a player reverts to "no transformation".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Npc,
}

/// Hit points with a bounded maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitality {
    hp: u32,
    max_hp: u32,
}

impl Vitality {
    pub fn full(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Remaining health as a percentage in `0..=100`.
    ///
    /// This is the figure carried by health-changed notifications; the wire
    /// collaborator never sees raw hit points.
    pub fn percent(&self) -> u8 {
        if self.max_hp == 0 {
            return 0;
        }
        ((u64::from(self.hp) * 100) / u64::from(self.max_hp)) as u8
    }

    /// Applies damage, clamping at zero. Returns the amount actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores hit points, clamping at the maximum. Returns the amount
    /// actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }
}

/// Mutable per-actor state consulted and mutated by the gating and effect
/// layers.
///
/// # Invariants
///
/// - `abnormal` always reflects the union of flags owned by entries in
///   `effects` plus flags set directly by world collaborators.
/// - `transformed_model == 0` means "not transformed"; `natural_model` is
///   the spawn template id NPCs revert to on effect expiry.
/// - Mutation happens only under the owning runtime cell's lock.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub vitality: Vitality,

    /// Bitmask of active abnormal statuses.
    pub abnormal: AbnormalState,

    /// Appearance template id the actor was spawned with.
    pub natural_model: u32,

    /// Appearance override while transformed. Zero when untransformed.
    pub transformed_model: u32,

    /// The actor this actor currently has selected, if any. Deferred-action
    /// fingerprints compare against this field at fire time.
    pub target: Option<ActorId>,

    /// Active timed effects, at most one per effect kind.
    pub effects: ActiveEffects,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, max_hp: u32, natural_model: u32) -> Self {
        Self {
            id,
            kind,
            vitality: Vitality::full(max_hp),
            abnormal: AbnormalState::empty(),
            natural_model,
            transformed_model: 0,
            target: None,
            effects: ActiveEffects::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.vitality.is_alive()
    }

    /// The model id observers should render: the override while transformed,
    /// otherwise the natural template.
    pub fn visible_model(&self) -> u32 {
        if self.transformed_model != 0 {
            self.transformed_model
        } else {
            self.natural_model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitality_percent_rounds_down() {
        let mut v = Vitality::full(3);
        v.apply_damage(1);
        assert_eq!(v.percent(), 66);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut v = Vitality::full(10);
        assert_eq!(v.apply_damage(25), 10);
        assert_eq!(v.hp(), 0);
        assert!(!v.is_alive());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut v = Vitality::full(10);
        v.apply_damage(4);
        assert_eq!(v.heal(100), 4);
        assert_eq!(v.hp(), 10);
    }

    #[test]
    fn visible_model_prefers_override() {
        let mut actor = Actor::new(ActorId(1), ActorKind::Npc, 50, 7001);
        assert_eq!(actor.visible_model(), 7001);
        actor.transformed_model = 9004;
        assert_eq!(actor.visible_model(), 9004);
    }
}
