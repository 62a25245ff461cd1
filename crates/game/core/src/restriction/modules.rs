//! Built-in restriction modules for the normal game state.
//!
//! World collaborators (events, instances, scripting) register their own
//! modules on top of these; higher priorities are consulted first.

use super::{Restriction, RestrictionKind};
use crate::state::{AbnormalState, Actor};

/// Denies actions an actor cannot perform while stunned or sleeping.
pub struct IncapacitatedRestrictions;

impl Restriction for IncapacitatedRestrictions {
    fn name(&self) -> &'static str {
        "incapacitated"
    }

    fn kinds(&self) -> &[RestrictionKind] {
        &[
            RestrictionKind::Attack,
            RestrictionKind::UseSkill,
            RestrictionKind::ChangeEquip,
            RestrictionKind::Trade,
        ]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn can_attack(&self, actor: &Actor, _target: Option<&Actor>) -> bool {
        !actor.abnormal.is_incapacitated()
    }

    fn can_use_skill(&self, actor: &Actor, _target: Option<&Actor>) -> bool {
        !actor.abnormal.is_incapacitated()
    }

    fn can_change_equip(&self, actor: &Actor) -> bool {
        !actor.abnormal.is_incapacitated()
    }

    fn can_trade(&self, actor: &Actor) -> bool {
        !actor.abnormal.is_incapacitated()
    }
}

/// Dead actors may still chat; everything else is denied.
pub struct DownedRestrictions;

impl Restriction for DownedRestrictions {
    fn name(&self) -> &'static str {
        "downed"
    }

    fn kinds(&self) -> &[RestrictionKind] {
        &[
            RestrictionKind::Attack,
            RestrictionKind::UseSkill,
            RestrictionKind::InviteToGroup,
            RestrictionKind::ChangeEquip,
            RestrictionKind::Trade,
            RestrictionKind::UseStorage,
        ]
    }

    fn priority(&self) -> i32 {
        20
    }

    fn can_attack(&self, actor: &Actor, _target: Option<&Actor>) -> bool {
        actor.is_alive()
    }

    fn can_use_skill(&self, actor: &Actor, _target: Option<&Actor>) -> bool {
        actor.is_alive()
    }

    fn can_invite_to_group(&self, actor: &Actor, _target: Option<&Actor>) -> bool {
        actor.is_alive()
    }

    fn can_change_equip(&self, actor: &Actor) -> bool {
        actor.is_alive()
    }

    fn can_trade(&self, actor: &Actor) -> bool {
        actor.is_alive()
    }

    fn can_use_storage(&self, actor: &Actor) -> bool {
        actor.is_alive()
    }
}

/// Denies offensive actions against actors carrying the protected flag.
pub struct ProtectedTargetRestrictions;

impl Restriction for ProtectedTargetRestrictions {
    fn name(&self) -> &'static str {
        "protected-target"
    }

    fn kinds(&self) -> &[RestrictionKind] {
        &[RestrictionKind::Attack]
    }

    fn priority(&self) -> i32 {
        30
    }

    fn can_attack(&self, _actor: &Actor, target: Option<&Actor>) -> bool {
        match target {
            Some(target) => !target.abnormal.contains(AbnormalState::PROTECTED),
            None => true,
        }
    }
}
