//! Miscellaneous resolution: one-off restorative mutation.

use game_core::state::Actor;
use game_core::{Notification, SkillOutcome, SkillTemplate};

use super::super::{HandlerContext, SkillHandler};

pub struct MiscHandler;

impl SkillHandler for MiscHandler {
    fn name(&self) -> &'static str {
        "misc"
    }

    fn execute(
        &self,
        _ctx: &HandlerContext<'_>,
        caster: &Actor,
        target: &mut Actor,
        template: &SkillTemplate,
        level: u8,
        out: &mut Vec<Notification>,
    ) -> SkillOutcome {
        target.vitality.heal(template.magnitude_at(level));
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
