//! Create resolution: conjures an object through the factory collaborator.
//!
//! No effect instance, no actor mutation; the factory owns everything
//! downstream of the creation request.

use game_core::state::Actor;
use game_core::{Notification, SkillOutcome, SkillTemplate};

use super::super::{HandlerContext, SkillHandler};

pub struct CreateHandler;

impl SkillHandler for CreateHandler {
    fn name(&self) -> &'static str {
        "create"
    }

    fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        caster: &Actor,
        _target: &mut Actor,
        template: &SkillTemplate,
        _level: u8,
        _out: &mut Vec<Notification>,
    ) -> SkillOutcome {
        ctx.factory.create_object(caster.id, template.id);
        SkillOutcome::Executed
    }
}
