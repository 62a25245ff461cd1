//! Buff resolution: applies the skill's effect template to the target.

use tracing::warn;

use game_core::state::Actor;
use game_core::{Notification, SkillOutcome, SkillTemplate};

use super::super::{HandlerContext, SkillHandler};

pub struct BuffHandler;

impl SkillHandler for BuffHandler {
    fn name(&self) -> &'static str {
        "buff"
    }

    fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        caster: &Actor,
        target: &mut Actor,
        template: &SkillTemplate,
        _level: u8,
        out: &mut Vec<Notification>,
    ) -> SkillOutcome {
        // Load validation guarantees the reference; stay defensive for
        // scripted templates that bypassed the book.
        let Some(kind) = template.effect else {
            warn!(target: "runtime::resolver", skill = template.id.0, "buff skill without effect");
            return SkillOutcome::Failed;
        };
        let Some(effect_template) = ctx.catalog.get(kind) else {
            warn!(target: "runtime::resolver", skill = template.id.0, effect = kind.0, "unknown effect template");
            return SkillOutcome::Failed;
        };

        match ctx.effects.apply_locked(target, effect_template, caster.id, out) {
            Ok(()) => SkillOutcome::Executed,
            Err(err) => {
                warn!(target: "runtime::resolver", skill = template.id.0, %err, "effect application failed");
                SkillOutcome::Failed
            }
        }
    }
}
