//! Content loaders for reading simulation data from RON tables.
//!
//! Durations are declared signed in the file formats so that a negative
//! value is caught by validation (and rejected as a fatal configuration
//! error) instead of silently wrapping; the core types only ever see
//! validated unsigned milliseconds.

pub mod effects;
pub mod learn;
pub mod skills;

pub use effects::EffectCatalog;
pub use learn::SkillLearnIndex;
pub use skills::SkillBook;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Everything the runtime needs from configuration, loaded and
/// cross-validated as one unit.
pub struct ContentSet {
    pub effects: EffectCatalog,
    pub skills: SkillBook,
    pub learn: SkillLearnIndex,
}

impl ContentSet {
    /// Loads the embedded tables. Any validation failure aborts startup.
    pub fn load_embedded() -> LoadResult<Self> {
        let effects = EffectCatalog::load()?;
        let skills = SkillBook::load(&effects)?;
        let learn = SkillLearnIndex::load(&skills)?;
        Ok(Self {
            effects,
            skills,
            learn,
        })
    }
}
