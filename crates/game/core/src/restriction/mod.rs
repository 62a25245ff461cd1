//! Action gating.
//!
//! Every gameplay action class is guarded by a chain of [`Restriction`]
//! modules. Modules declare the action kinds they participate in through an
//! explicit capability set, carry a priority, and can be activated and
//! deactivated at runtime; the [`RestrictionRegistry`] keeps one
//! priority-ordered chain per kind and evaluates them with
//! deny-overrides-approve short-circuit semantics.

mod registry;

pub mod modules;

pub use registry::RestrictionRegistry;

use crate::state::Actor;

/// Priority assigned to modules that do not override [`Restriction::priority`].
pub const DEFAULT_PRIORITY: i32 = 0;

/// Closed set of gated action classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestrictionKind {
    Attack,
    UseSkill,
    Chat,
    InviteToGroup,
    ChangeEquip,
    Trade,
    UseStorage,
}

/// A pluggable, prioritized decision unit contributing to gate evaluation.
///
/// Implementations declare the kinds they participate in via [`kinds`];
/// only those chains consult the module. Decision methods default to
/// approval so a module only overrides what it cares about.
///
/// Decision methods must not call back into the gate for the same kind;
/// re-entrant evaluation is a programming error, not a runtime condition.
///
/// [`kinds`]: Restriction::kinds
pub trait Restriction: Send + Sync {
    /// Stable name for logs and registry diagnostics.
    fn name(&self) -> &'static str;

    /// The action kinds this module participates in.
    fn kinds(&self) -> &[RestrictionKind];

    /// Chain position: higher priorities are consulted first. Equal
    /// priorities keep registration order.
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn can_attack(&self, _actor: &Actor, _target: Option<&Actor>) -> bool {
        true
    }

    fn can_use_skill(&self, _actor: &Actor, _target: Option<&Actor>) -> bool {
        true
    }

    fn can_chat(&self, _actor: &Actor) -> bool {
        true
    }

    fn can_invite_to_group(&self, _actor: &Actor, _target: Option<&Actor>) -> bool {
        true
    }

    fn can_change_equip(&self, _actor: &Actor) -> bool {
        true
    }

    fn can_trade(&self, _actor: &Actor) -> bool {
        true
    }

    fn can_use_storage(&self, _actor: &Actor) -> bool {
        true
    }

    /// Routes a kind to its decision method.
    fn allows(&self, kind: RestrictionKind, actor: &Actor, target: Option<&Actor>) -> bool {
        match kind {
            RestrictionKind::Attack => self.can_attack(actor, target),
            RestrictionKind::UseSkill => self.can_use_skill(actor, target),
            RestrictionKind::Chat => self.can_chat(actor),
            RestrictionKind::InviteToGroup => self.can_invite_to_group(actor, target),
            RestrictionKind::ChangeEquip => self.can_change_equip(actor),
            RestrictionKind::Trade => self.can_trade(actor),
            RestrictionKind::UseStorage => self.can_use_storage(actor),
        }
    }
}
