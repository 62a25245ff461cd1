//! Skill resolution service.
//!
//! `resolve` looks up the skill definition, consults the restriction gate,
//! and dispatches to the handler registered for the skill's category. The
//! registry is keyed by category tag, so new categories plug in without
//! touching the dispatch path. All mutation for one resolution happens
//! under the target's (and caster's) lock; notifications are published only
//! after the locks are released, and only when the resolution executed.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use game_content::{EffectCatalog, SkillBook};
use game_core::restriction::{RestrictionKind, RestrictionRegistry};
use game_core::state::{Actor, ActorId};
use game_core::{
    GameTime, Mitigation, NoMitigation, Notification, SkillCategory, SkillId, SkillOutcome,
    SkillTemplate,
};

use crate::effects::EffectEngine;
use crate::events::NotificationBus;
use crate::scheduler::{ActionScheduler, Fingerprint};
use crate::world::World;

/// Collaborator that materializes the objects conjured by create-category
/// skills. Item storage is outside the core; the handler only owes the
/// factory a creation request.
pub trait ObjectFactory: Send + Sync {
    fn create_object(&self, creator: ActorId, skill: SkillId);
}

/// Default factory: requests go nowhere.
pub struct NoopObjectFactory;

impl ObjectFactory for NoopObjectFactory {
    fn create_object(&self, _creator: ActorId, _skill: SkillId) {}
}

/// Shared collaborators handed to handlers for the duration of one
/// resolution.
pub struct HandlerContext<'a> {
    pub effects: &'a EffectEngine,
    pub catalog: &'a EffectCatalog,
    pub mitigation: &'a dyn Mitigation,
    pub factory: &'a dyn ObjectFactory,
}

/// One resolution strategy. Implementations mutate only `target` (under its
/// lock, which the engine already holds) and push the notifications their
/// mutation warrants; the engine publishes them when the outcome is
/// `Executed` and discards them otherwise.
pub trait SkillHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        caster: &Actor,
        target: &mut Actor,
        template: &SkillTemplate,
        level: u8,
        out: &mut Vec<Notification>,
    ) -> SkillOutcome;
}

/// Resolves skill casts against the live world.
///
/// Cloning is shallow: every collaborator is shared. Wind-up continuations
/// capture a clone and re-enter through the same gate-then-mutate path as
/// an immediate resolution.
#[derive(Clone)]
pub struct SkillEngine {
    world: Arc<World>,
    restrictions: Arc<RestrictionRegistry>,
    effects: Arc<EffectEngine>,
    scheduler: Arc<ActionScheduler>,
    bus: NotificationBus,
    skills: Arc<SkillBook>,
    catalog: Arc<EffectCatalog>,
    mitigation: Arc<dyn Mitigation>,
    factory: Arc<dyn ObjectFactory>,
    handlers: HashMap<SkillCategory, Arc<dyn SkillHandler>>,
}

impl SkillEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        world: Arc<World>,
        restrictions: Arc<RestrictionRegistry>,
        effects: Arc<EffectEngine>,
        scheduler: Arc<ActionScheduler>,
        bus: NotificationBus,
        skills: Arc<SkillBook>,
        catalog: Arc<EffectCatalog>,
    ) -> Self {
        Self {
            world,
            restrictions,
            effects,
            scheduler,
            bus,
            skills,
            catalog,
            mitigation: Arc::new(NoMitigation),
            factory: Arc::new(NoopObjectFactory),
            handlers: handlers::defaults(),
        }
    }

    /// Swaps in the combat collaborator's mitigation formula.
    pub fn with_mitigation(mut self, mitigation: Arc<dyn Mitigation>) -> Self {
        self.mitigation = mitigation;
        self
    }

    /// Swaps in the object factory collaborator.
    pub fn with_factory(mut self, factory: Arc<dyn ObjectFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Registers (or replaces) the handler for a category.
    pub fn with_handler(mut self, category: SkillCategory, handler: Arc<dyn SkillHandler>) -> Self {
        self.handlers.insert(category, handler);
        self
    }

    /// Resolves one cast. Negative outcomes are values, not errors; none of
    /// them has mutated anything or emitted a notification.
    pub fn resolve(
        &self,
        caster: ActorId,
        target: ActorId,
        skill: SkillId,
        level: u8,
    ) -> SkillOutcome {
        let Some(template) = self.skills.get(skill) else {
            debug!(target: "runtime::resolver", skill = skill.0, "unknown skill id");
            return SkillOutcome::UnknownSkill;
        };
        let template = template.clone();

        if template.cast_time.is_zero() {
            return self.resolve_now(caster, target, &template, level, true);
        }

        // Wind-up: gate, announce the cast, defer the application.
        if let Err(outcome) = self.gate_only(caster, target, &template) {
            return outcome;
        }
        self.bus.publish(Notification::AbilityStarted {
            caster,
            target: Some(target),
            skill: template.id,
            cast_time: template.cast_time,
        });

        let engine = self.clone();
        let delay = Duration::from_millis(template.cast_time.as_millis());
        self.scheduler.schedule(
            delay,
            Fingerprint::TargetLocked { actor: caster, target },
            Box::new(move || {
                // Second look at the live state right before committing.
                if !engine.world.targets(caster, target) {
                    trace!(target: "runtime::resolver", caster = %caster, "wind-up target changed, discarded");
                    return;
                }
                let outcome = engine.resolve_now(caster, target, &template, level, false);
                trace!(target: "runtime::resolver", ?outcome, skill = template.id.0, "wind-up resolved");
            }),
        );
        SkillOutcome::CastStarted
    }

    /// Gate-then-mutate under the per-actor locks.
    fn resolve_now(
        &self,
        caster: ActorId,
        target: ActorId,
        template: &SkillTemplate,
        level: u8,
        announce: bool,
    ) -> SkillOutcome {
        let Some(handler) = self.handlers.get(&template.category) else {
            debug!(target: "runtime::resolver", category = ?template.category, "no handler registered");
            return SkillOutcome::NotImplemented;
        };
        let Some(caster_cell) = self.world.resolve(caster) else {
            return SkillOutcome::TargetGone;
        };
        let Some(target_cell) = self.world.resolve(target) else {
            return SkillOutcome::TargetGone;
        };

        let ctx = HandlerContext {
            effects: &self.effects,
            catalog: &self.catalog,
            mitigation: self.mitigation.as_ref(),
            factory: self.factory.as_ref(),
        };

        let mut out = Vec::new();
        let outcome = if caster == target {
            let mut guard = target_cell.lock();
            // Self-cast: the handler reads the caster through a snapshot
            // taken under the same lock it mutates through.
            let caster_view = guard.clone();
            match self.check_gate(template, &caster_view, &caster_view) {
                Err(denied) => denied,
                Ok(()) => {
                    if announce {
                        out.push(started(caster, target, template));
                    }
                    handler.execute(&ctx, &caster_view, &mut guard, template, level, &mut out)
                }
            }
        } else {
            let (caster_guard, mut target_guard) = World::lock_pair(&caster_cell, &target_cell);
            match self.check_gate(template, &caster_guard, &target_guard) {
                Err(denied) => denied,
                Ok(()) => {
                    if announce {
                        out.push(started(caster, target, template));
                    }
                    handler.execute(
                        &ctx,
                        &caster_guard,
                        &mut target_guard,
                        template,
                        level,
                        &mut out,
                    )
                }
            }
        };

        // Locks are released here; only an executed resolution notifies.
        if outcome == SkillOutcome::Executed {
            self.bus.publish_all(out);
        }
        outcome
    }

    /// Gate evaluation without mutation, for the wind-up announcement.
    fn gate_only(
        &self,
        caster: ActorId,
        target: ActorId,
        template: &SkillTemplate,
    ) -> Result<(), SkillOutcome> {
        let Some(caster_cell) = self.world.resolve(caster) else {
            return Err(SkillOutcome::TargetGone);
        };
        let Some(target_cell) = self.world.resolve(target) else {
            return Err(SkillOutcome::TargetGone);
        };
        if caster == target {
            let guard = caster_cell.lock();
            self.check_gate(template, &guard, &guard)
        } else {
            let (caster_guard, target_guard) = World::lock_pair(&caster_cell, &target_cell);
            self.check_gate(template, &caster_guard, &target_guard)
        }
    }

    /// Use-skill always; attack additionally for offensive categories.
    fn check_gate(
        &self,
        template: &SkillTemplate,
        caster: &Actor,
        target: &Actor,
    ) -> Result<(), SkillOutcome> {
        if !self
            .restrictions
            .can(RestrictionKind::UseSkill, caster, Some(target))
        {
            return Err(SkillOutcome::NotPermitted);
        }
        if template.category.is_offensive()
            && !self
                .restrictions
                .can(RestrictionKind::Attack, caster, Some(target))
        {
            return Err(SkillOutcome::NotPermitted);
        }
        Ok(())
    }
}

fn started(caster: ActorId, target: ActorId, template: &SkillTemplate) -> Notification {
    Notification::AbilityStarted {
        caster,
        target: Some(target),
        skill: template.id,
        cast_time: GameTime::ZERO,
    }
}
