//! Declarative content for the simulation core.
//!
//! Skill definitions, effect templates and the skill learn table live in
//! embedded RON files. Loading happens once at startup; every table is
//! validated before it is published and any violation aborts the load;
//! configuration errors never surface mid-game.

#[cfg(feature = "loaders")]
pub mod loaders;

pub mod error;

pub use error::LoadError;

#[cfg(feature = "loaders")]
pub use loaders::{ContentSet, EffectCatalog, SkillBook, SkillLearnIndex};
