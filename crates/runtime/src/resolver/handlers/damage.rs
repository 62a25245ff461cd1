//! Immediate damage resolution.
//!
//! The handler supplies the raw magnitude from the template; the mitigation
//! collaborator decides what actually lands. The health-changed
//! notification carries the remaining percentage and the abnormal mask, the
//! way the wire collaborator expects to relay it.

use game_core::state::Actor;
use game_core::{DamageKind, Notification, SkillOutcome, SkillTemplate};

use super::super::{HandlerContext, SkillHandler};

pub struct DamageHandler {
    kind: DamageKind,
    name: &'static str,
}

impl DamageHandler {
    pub fn magical() -> Self {
        Self {
            kind: DamageKind::Magical,
            name: "magic-damage",
        }
    }

    pub fn physical() -> Self {
        Self {
            kind: DamageKind::Physical,
            name: "physical-damage",
        }
    }
}

impl SkillHandler for DamageHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        caster: &Actor,
        target: &mut Actor,
        template: &SkillTemplate,
        level: u8,
        out: &mut Vec<Notification>,
    ) -> SkillOutcome {
        let raw = template.magnitude_at(level);
        let reduced = ctx.mitigation.reduce(raw, self.kind, target);
        target.vitality.apply_damage(reduced);

        out.push(Notification::HealthChanged {
            actor: target.id,
            source: Some(caster.id),
            hp_percent: target.vitality.percent(),
            abnormal: target.abnormal,
            skill: Some(template.id),
        });
        SkillOutcome::Executed
    }
}
