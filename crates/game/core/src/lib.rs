//! Deterministic gating and effect rules shared across the simulation.
//!
//! `game-core` defines the canonical data model (actors, abnormal states,
//! timed effects, skill definitions) and the pure decision logic consulted on
//! every gameplay action: the restriction chains and the effect lifecycle
//! state machine. Everything here is synchronous and side-effect free with
//! respect to the outside world; the `runtime` crate owns clocks, locks and
//! notification delivery.
pub mod config;
pub mod damage;
pub mod effect;
pub mod events;
pub mod restriction;
pub mod skill;
pub mod state;
pub mod time;

pub use config::GameConfig;
pub use damage::{DamageKind, FlatMitigation, Mitigation, NoMitigation};
pub use effect::{Effect, EffectKind, EffectState, EffectTemplate, lifecycle};
pub use events::Notification;
pub use restriction::{
    DEFAULT_PRIORITY, Restriction, RestrictionKind, RestrictionRegistry,
    modules::{DownedRestrictions, IncapacitatedRestrictions, ProtectedTargetRestrictions},
};
pub use skill::{SkillCategory, SkillId, SkillOutcome, SkillTemplate};
pub use state::{AbnormalState, ActiveEffects, Actor, ActorId, ActorKind, Vitality};
pub use time::GameTime;
