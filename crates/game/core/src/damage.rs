//! Damage magnitude and the mitigation seam.
//!
//! The resolver supplies a raw magnitude from the skill template; reducing
//! it is a collaborator concern behind [`Mitigation`], so combat-formula
//! tuning never touches the resolution flow.

use crate::state::{AbnormalState, Actor};

/// Which mitigation inputs apply to a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    Magical,
    Physical,
}

/// Reduces a raw magnitude to the damage actually dealt.
pub trait Mitigation: Send + Sync {
    fn reduce(&self, raw: u32, kind: DamageKind, target: &Actor) -> u32;
}

/// Identity mitigation: the raw magnitude lands unreduced.
pub struct NoMitigation;

impl Mitigation for NoMitigation {
    fn reduce(&self, raw: u32, _kind: DamageKind, _target: &Actor) -> u32 {
        raw
    }
}

/// Flat per-kind reduction, halved again behind an active shield.
pub struct FlatMitigation {
    pub magical: u32,
    pub physical: u32,
}

impl Mitigation for FlatMitigation {
    fn reduce(&self, raw: u32, kind: DamageKind, target: &Actor) -> u32 {
        let flat = match kind {
            DamageKind::Magical => self.magical,
            DamageKind::Physical => self.physical,
        };
        let reduced = raw.saturating_sub(flat);
        if target.abnormal.contains(AbnormalState::SHIELD) {
            reduced / 2
        } else {
            reduced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, ActorKind};

    #[test]
    fn flat_mitigation_is_per_kind() {
        let target = Actor::new(ActorId(1), ActorKind::Npc, 100, 0);
        let mitigation = FlatMitigation {
            magical: 10,
            physical: 30,
        };
        assert_eq!(mitigation.reduce(50, DamageKind::Magical, &target), 40);
        assert_eq!(mitigation.reduce(50, DamageKind::Physical, &target), 20);
    }

    #[test]
    fn shield_halves_after_flat_reduction() {
        let mut target = Actor::new(ActorId(1), ActorKind::Npc, 100, 0);
        target.abnormal.insert(AbnormalState::SHIELD);
        let mitigation = FlatMitigation {
            magical: 10,
            physical: 0,
        };
        assert_eq!(mitigation.reduce(50, DamageKind::Magical, &target), 20);
    }
}
