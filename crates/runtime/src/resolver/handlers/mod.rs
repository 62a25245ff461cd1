//! Default resolution handlers, one per skill category.

mod buff;
mod create;
mod damage;
mod misc;

pub use buff::BuffHandler;
pub use create::CreateHandler;
pub use damage::DamageHandler;
pub use misc::MiscHandler;

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::debug;

use game_core::state::Actor;
use game_core::{Notification, SkillCategory, SkillOutcome, SkillTemplate};

use super::{HandlerContext, SkillHandler};

/// Builds the default handler registry covering every category.
pub fn defaults() -> HashMap<SkillCategory, Arc<dyn SkillHandler>> {
    SkillCategory::iter()
        .map(|category| {
            let handler: Arc<dyn SkillHandler> = match category {
                SkillCategory::Buff => Arc::new(BuffHandler),
                SkillCategory::Create => Arc::new(CreateHandler),
                SkillCategory::MagicDamage => Arc::new(DamageHandler::magical()),
                SkillCategory::PhysicalDamage => Arc::new(DamageHandler::physical()),
                SkillCategory::Misc => Arc::new(MiscHandler),
                SkillCategory::Unimplemented => Arc::new(NotImplementedHandler),
            };
            (category, handler)
        })
        .collect()
}

/// Configured-but-unbuilt skills resolve to a logged no-op.
pub struct NotImplementedHandler;

impl SkillHandler for NotImplementedHandler {
    fn name(&self) -> &'static str {
        "not-implemented"
    }

    fn execute(
        &self,
        _ctx: &HandlerContext<'_>,
        _caster: &Actor,
        _target: &mut Actor,
        template: &SkillTemplate,
        _level: u8,
        _out: &mut Vec<Notification>,
    ) -> SkillOutcome {
        debug!(
            target: "runtime::resolver",
            skill = template.id.0,
            "skill category not implemented"
        );
        SkillOutcome::NotImplemented
    }
}
