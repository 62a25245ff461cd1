//! Notification payloads emitted toward the network/visibility collaborator.
//!
//! The core decides *what* happened; encoding these into wire messages and
//! choosing which observers receive them is entirely the subscriber's
//! concern. Health is reported as a percentage and abnormal statuses as the
//! full mask, so observers need no additional state queries.

use crate::effect::EffectKind;
use crate::skill::SkillId;
use crate::state::{AbnormalState, ActorId};
use crate::time::GameTime;

/// A state change worth broadcasting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// A cast began. Emitted before any wind-up elapses.
    AbilityStarted {
        caster: ActorId,
        target: Option<ActorId>,
        skill: SkillId,
        cast_time: GameTime,
    },

    /// A timed effect became active on (or was refreshed for) an actor.
    EffectApplied {
        actor: ActorId,
        source: ActorId,
        kind: EffectKind,
        abnormal: AbnormalState,
    },

    /// A periodic action of an active effect fired.
    EffectTicked {
        actor: ActorId,
        kind: EffectKind,
        damage: u32,
    },

    /// A timed effect ended and its status flags were cleared.
    EffectEnded {
        actor: ActorId,
        kind: EffectKind,
        abnormal: AbnormalState,
    },

    /// An actor's health changed.
    HealthChanged {
        actor: ActorId,
        source: Option<ActorId>,
        hp_percent: u8,
        abnormal: AbnormalState,
        skill: Option<SkillId>,
    },
}

impl Notification {
    /// The actor whose state the notification describes.
    pub fn subject(&self) -> ActorId {
        match *self {
            Self::AbilityStarted { caster, .. } => caster,
            Self::EffectApplied { actor, .. }
            | Self::EffectTicked { actor, .. }
            | Self::EffectEnded { actor, .. }
            | Self::HealthChanged { actor, .. } => actor,
        }
    }
}
