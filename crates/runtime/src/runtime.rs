//! Runtime orchestrator.
//!
//! Wires the world, the restriction registry, the effect engine, the
//! deferred scheduler and the notification bus into one façade, and owns
//! the background pump task. Consumers embed [`Runtime`] to spawn and
//! remove actors, resolve casts, and subscribe to notifications.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use game_content::ContentSet;
use game_core::GameConfig;
use game_core::restriction::{RestrictionRegistry, modules};
use game_core::state::{ActorId, Actor};
use game_core::{Mitigation, SkillId, SkillOutcome};

use crate::effects::{EffectEngine, WorldClock};
use crate::events::{NotificationBus, Topic};
use crate::resolver::{ObjectFactory, SkillEngine};
use crate::scheduler::ActionScheduler;
use crate::world::{ActorSpec, World};

/// Startup configuration.
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Per-topic capacity of the notification bus.
    pub event_capacity: usize,
    /// Skip registering the built-in restriction modules. Tests exercising
    /// bespoke chains start from an empty registry.
    pub bare_restrictions: bool,
    pub mitigation: Option<Arc<dyn Mitigation>>,
    pub factory: Option<Arc<dyn ObjectFactory>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_capacity: 256,
            bare_restrictions: false,
            mitigation: None,
            factory: None,
        }
    }
}

/// The live simulation backend.
pub struct Runtime {
    world: Arc<World>,
    restrictions: Arc<RestrictionRegistry>,
    bus: NotificationBus,
    effects: Arc<EffectEngine>,
    scheduler: Arc<ActionScheduler>,
    skills: SkillEngine,
    pump: JoinHandle<()>,
}

impl Runtime {
    /// Builds the component graph, registers the built-in restrictions and
    /// starts the effect pump. Content must already be loaded and
    /// validated; configuration problems never get this far.
    pub async fn start(config: RuntimeConfig, content: ContentSet) -> Arc<Self> {
        let world = Arc::new(World::new());
        let bus = NotificationBus::with_capacity(config.event_capacity);
        let clock = WorldClock::new();

        let effects = Arc::new(EffectEngine::new(Arc::clone(&world), bus.clone(), clock));
        let scheduler = Arc::new(ActionScheduler::new(Arc::clone(&world)));

        let restrictions = Arc::new(RestrictionRegistry::new());
        if !config.bare_restrictions {
            restrictions.register(Arc::new(modules::IncapacitatedRestrictions));
            restrictions.register(Arc::new(modules::DownedRestrictions));
            restrictions.register(Arc::new(modules::ProtectedTargetRestrictions));
        }

        let mut skills = SkillEngine::new(
            Arc::clone(&world),
            Arc::clone(&restrictions),
            Arc::clone(&effects),
            Arc::clone(&scheduler),
            bus.clone(),
            Arc::new(content.skills),
            Arc::new(content.effects),
        );
        if let Some(mitigation) = config.mitigation {
            skills = skills.with_mitigation(mitigation);
        }
        if let Some(factory) = config.factory {
            skills = skills.with_factory(factory);
        }

        let pump = tokio::spawn(Arc::clone(&effects).run(config.game.tick_resolution_ms));
        info!(
            target: "runtime",
            tick_resolution_ms = config.game.tick_resolution_ms,
            "runtime started"
        );

        Arc::new(Self {
            world,
            restrictions,
            bus,
            effects,
            scheduler,
            skills,
            pump,
        })
    }

    /// Registers an actor on behalf of the spawn collaborator.
    pub fn spawn_actor(&self, spec: ActorSpec) -> ActorId {
        self.world.spawn(spec)
    }

    /// Removes an actor with the mandatory cleanup: all of its effects are
    /// expired immediately (end notifications included) and every deferred
    /// action fingerprinted to it is cancelled.
    pub fn remove_actor(&self, id: ActorId) -> bool {
        let Some(cell) = self.world.remove(id) else {
            return false;
        };
        self.effects.expire_actor(&cell);
        self.scheduler.cancel_for(id);
        true
    }

    /// Resolves one cast.
    pub fn resolve_skill(
        &self,
        caster: ActorId,
        target: ActorId,
        skill: SkillId,
        level: u8,
    ) -> SkillOutcome {
        self.skills.resolve(caster, target, skill, level)
    }

    /// Runs a closure against a live actor's state, under its lock.
    pub fn with_actor<T>(&self, id: ActorId, f: impl FnOnce(&Actor) -> T) -> Option<T> {
        let cell = self.world.resolve(id)?;
        let guard = cell.lock();
        Some(f(&guard))
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<game_core::Notification> {
        self.bus.subscribe(topic)
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn restrictions(&self) -> &Arc<RestrictionRegistry> {
        &self.restrictions
    }

    /// Effect engine access for scripted consequences.
    pub fn effects(&self) -> &Arc<EffectEngine> {
        &self.effects
    }

    /// Scheduler access for scripted multi-step interactions.
    pub fn scheduler(&self) -> &Arc<ActionScheduler> {
        &self.scheduler
    }

    /// Stops the pump and discards every outstanding deferred action.
    pub fn shutdown(&self) {
        self.pump.abort();
        self.scheduler.cancel_all();
        info!(target: "runtime", "runtime stopped");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
