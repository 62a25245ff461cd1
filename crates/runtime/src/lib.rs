//! Concurrent orchestration of the gating and effect core.
//!
//! This crate wires the pure rules from `game-core` into a live, multi-task
//! simulation: the world of locked actors, the skill resolution service, the
//! effect pump, the deferred action scheduler, and the notification bus the
//! network/visibility collaborator subscribes to.
//!
//! Modules are organized by responsibility:
//! - [`world`] owns actor registration and the per-actor locking discipline
//! - [`resolver`] dispatches skill categories to their handlers behind the
//!   restriction gate
//! - [`effects`] drives timed effects to their scheduled transitions
//! - [`scheduler`] runs delay-then-verify continuations
//! - [`events`] provides the topic-based notification bus
//! - [`runtime`] hosts the orchestrator that ties the above together
pub mod effects;
pub mod error;
pub mod events;
pub mod resolver;
pub mod runtime;
pub mod scheduler;
pub mod world;

pub use effects::{EffectEngine, WorldClock};
pub use error::{Result, RuntimeError};
pub use events::{NotificationBus, Topic};
pub use resolver::{NoopObjectFactory, ObjectFactory, SkillEngine, SkillHandler};
pub use runtime::{Runtime, RuntimeConfig};
pub use scheduler::{ActionScheduler, Fingerprint};
pub use world::{ActorCell, ActorSpec, World};
