//! Content validation errors.
//!
//! All of these are configuration errors: fatal at load time, impossible at
//! runtime because the validated tables are immutable afterwards.

/// A table entry that must not be published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("effect {kind}: {field} is negative ({value})")]
    NegativeDuration {
        kind: u16,
        field: &'static str,
        value: i64,
    },

    #[error("skill {id}: {field} is negative ({value})")]
    NegativeCastTime { id: u16, field: &'static str, value: i64 },

    #[error("duplicate effect template {0}")]
    DuplicateEffect(u16),

    #[error("duplicate skill definition {0}")]
    DuplicateSkill(u16),

    #[error("skill {skill} references unknown effect template {effect}")]
    UnknownEffect { skill: u16, effect: u16 },

    #[error("skill {skill}: category {category} requires an effect template")]
    MissingEffect { skill: u16, category: &'static str },

    #[error("learn entry for skill {0} references an unknown skill")]
    UnknownLearnSkill(u16),
}
