//! Skill learn table.
//!
//! Maps (class, level) to the skills gained at that level. Entries without
//! a class apply to every class; a query merges class-specific entries with
//! the class-agnostic ones.

use std::collections::HashMap;

use serde::Deserialize;

use game_core::SkillId;

use crate::error::LoadError;

use super::{LoadResult, SkillBook};

/// On-disk shape of one learn entry. `class: None` means all classes.
#[derive(Debug, Clone, Deserialize)]
pub struct LearnSpec {
    pub skill: u16,
    #[serde(default)]
    pub class: Option<u8>,
    pub level: u8,
}

/// Class/level-indexed learn lookups.
#[derive(Debug, Clone, Default)]
pub struct SkillLearnIndex {
    by_class: HashMap<(u8, u8), Vec<SkillId>>,
    general: HashMap<u8, Vec<SkillId>>,
}

impl SkillLearnIndex {
    /// Loads the embedded learn table, checking every referenced skill
    /// exists in the book.
    pub fn load(skills: &SkillBook) -> LoadResult<Self> {
        let raw = include_str!("../../data/skill_tree.ron");
        let specs: Vec<LearnSpec> = ron::from_str(raw)
            .map_err(|e| anyhow::anyhow!("failed to parse skill_tree.ron: {e}"))?;
        Ok(Self::from_specs(specs, skills)?)
    }

    pub fn from_specs(specs: Vec<LearnSpec>, skills: &SkillBook) -> Result<Self, LoadError> {
        let mut index = Self::default();
        for spec in specs {
            let id = SkillId(spec.skill);
            if skills.get(id).is_none() {
                return Err(LoadError::UnknownLearnSkill(spec.skill));
            }
            match spec.class {
                Some(class) => index
                    .by_class
                    .entry((class, spec.level))
                    .or_default()
                    .push(id),
                None => index.general.entry(spec.level).or_default().push(id),
            }
        }
        Ok(index)
    }

    /// Skills a class gains at a level: class-specific entries first, then
    /// the class-agnostic ones.
    pub fn skills_for(&self, class: u8, level: u8) -> Vec<SkillId> {
        let mut out = Vec::new();
        if let Some(specific) = self.by_class.get(&(class, level)) {
            out.extend_from_slice(specific);
        }
        if let Some(general) = self.general.get(&level) {
            out.extend_from_slice(general);
        }
        out
    }
}
