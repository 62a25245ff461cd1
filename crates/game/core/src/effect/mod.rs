//! Timed effect model.
//!
//! An [`EffectTemplate`] is the immutable, configuration-loaded description
//! of a timed state change; an [`Effect`] is one live application of a
//! template to an actor. Instances exist only inside their owner's
//! [`crate::state::ActiveEffects`] collection; removal from that collection
//! is the sole destruction path.

pub mod lifecycle;

use crate::state::{AbnormalState, ActorId};
use crate::time::GameTime;

/// Identifies an effect template and enforces per-actor uniqueness: an actor
/// carries at most one live instance of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectKind(pub u16);

/// Immutable declarative description of a timed effect.
///
/// Durations are in simulation milliseconds. Zero `duration` means the
/// mutation is instantaneous: it is applied once and the instance expires
/// without ever being observable as active. Zero `tick_interval` means no
/// periodic action. Negative values are rejected by the content loader
/// before a template reaches this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub duration: GameTime,
    pub tick_interval: GameTime,

    /// Abnormal status set while the effect is active and cleared on expiry.
    pub abnormal: AbnormalState,

    /// Appearance override while active. Zero means no override.
    pub model_override: u32,

    /// Damage applied on each periodic tick. Zero means ticks are
    /// notification-only.
    pub tick_damage: u32,
}

impl EffectTemplate {
    /// True for templates whose mutation is applied once and never lingers.
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }

    /// True if the template performs a periodic action while active.
    #[inline]
    pub fn is_periodic(&self) -> bool {
        !self.tick_interval.is_zero()
    }
}

/// Lifecycle state of a live effect instance.
///
/// `Pending` exists only between construction and the synchronous start
/// transition; observers never see it. `Expired` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectState {
    Pending,
    Active,
    Expired,
}

/// One live application of an [`EffectTemplate`] to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub template: EffectTemplate,

    /// Who cast the ability that applied this effect.
    pub source: ActorId,

    pub applied_at: GameTime,
    pub expires_at: GameTime,

    /// Deadline of the next periodic action. `None` for non-periodic
    /// templates.
    pub next_tick: Option<GameTime>,

    pub state: EffectState,
}

impl Effect {
    /// Constructs a pending instance; [`lifecycle::apply`] drives it active.
    pub fn pending(template: EffectTemplate, source: ActorId, now: GameTime) -> Self {
        let next_tick = template
            .is_periodic()
            .then(|| now.saturating_add(template.tick_interval));
        Self {
            template,
            source,
            applied_at: now,
            expires_at: now.saturating_add(template.duration),
            next_tick,
            state: EffectState::Pending,
        }
    }

    #[inline]
    pub fn kind(&self) -> EffectKind {
        self.template.kind
    }

    /// True once the scheduled end time has been reached.
    #[inline]
    pub fn is_due(&self, now: GameTime) -> bool {
        now >= self.expires_at
    }
}
