//! Skill definition loader.

use std::collections::HashMap;

use serde::Deserialize;

use game_core::{EffectKind, GameTime, SkillCategory, SkillId, SkillTemplate};

use crate::error::LoadError;

use super::{EffectCatalog, LoadResult};

/// On-disk shape of one skill definition.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillSpec {
    pub id: u16,
    pub name: String,
    pub category: SkillCategory,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub cast_time_ms: i64,
    #[serde(default)]
    pub magnitude: u32,
    #[serde(default)]
    pub magnitude_per_level: u32,
    #[serde(default)]
    pub effect: Option<u16>,
}

fn default_level() -> u8 {
    1
}

impl SkillSpec {
    fn validate(&self, effects: &EffectCatalog) -> Result<SkillTemplate, LoadError> {
        if self.cast_time_ms < 0 {
            return Err(LoadError::NegativeCastTime {
                id: self.id,
                field: "cast_time_ms",
                value: self.cast_time_ms,
            });
        }
        let effect = self.effect.map(EffectKind);
        if let Some(kind) = effect
            && effects.get(kind).is_none()
        {
            return Err(LoadError::UnknownEffect {
                skill: self.id,
                effect: kind.0,
            });
        }
        if self.category == SkillCategory::Buff && effect.is_none() {
            return Err(LoadError::MissingEffect {
                skill: self.id,
                category: "Buff",
            });
        }
        Ok(SkillTemplate {
            id: SkillId(self.id),
            name: self.name.clone(),
            category: self.category,
            level: self.level,
            cast_time: GameTime::from_millis(self.cast_time_ms as u64),
            magnitude: self.magnitude,
            magnitude_per_level: self.magnitude_per_level,
            effect,
        })
    }
}

/// Registry of validated skill definitions, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SkillBook {
    skills: HashMap<SkillId, SkillTemplate>,
}

impl SkillBook {
    /// Loads the embedded skill table, cross-checking effect references
    /// against the already-loaded catalog.
    pub fn load(effects: &EffectCatalog) -> LoadResult<Self> {
        let raw = include_str!("../../data/skills.ron");
        let specs: Vec<SkillSpec> =
            ron::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse skills.ron: {e}"))?;
        Ok(Self::from_specs(specs, effects)?)
    }

    pub fn from_specs(specs: Vec<SkillSpec>, effects: &EffectCatalog) -> Result<Self, LoadError> {
        let mut skills = HashMap::with_capacity(specs.len());
        for spec in specs {
            let template = spec.validate(effects)?;
            let id = template.id;
            if skills.insert(id, template).is_some() {
                return Err(LoadError::DuplicateSkill(id.0));
            }
        }
        Ok(Self { skills })
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillTemplate> {
        self.skills.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.skills.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::effects::EffectSpec;
    use game_core::state::AbnormalState;

    fn catalog() -> EffectCatalog {
        EffectCatalog::from_specs(vec![EffectSpec {
            kind: 1,
            duration_ms: 1000,
            tick_interval_ms: 0,
            abnormal: AbnormalState::POISON,
            model_override: 0,
            tick_damage: 0,
        }])
        .unwrap()
    }

    fn spec(id: u16, category: SkillCategory, effect: Option<u16>) -> SkillSpec {
        SkillSpec {
            id,
            name: "Test".into(),
            category,
            level: 1,
            cast_time_ms: 0,
            magnitude: 10,
            magnitude_per_level: 0,
            effect,
        }
    }

    #[test]
    fn unknown_effect_reference_is_fatal() {
        let err = SkillBook::from_specs(
            vec![spec(10, SkillCategory::Buff, Some(99))],
            &catalog(),
        )
        .unwrap_err();
        assert_eq!(err, LoadError::UnknownEffect { skill: 10, effect: 99 });
    }

    #[test]
    fn buff_without_effect_is_fatal() {
        let err =
            SkillBook::from_specs(vec![spec(10, SkillCategory::Buff, None)], &catalog())
                .unwrap_err();
        assert_eq!(err, LoadError::MissingEffect { skill: 10, category: "Buff" });
    }

    #[test]
    fn negative_cast_time_is_fatal() {
        let mut bad = spec(10, SkillCategory::MagicDamage, None);
        bad.cast_time_ms = -200;
        let err = SkillBook::from_specs(vec![bad], &catalog()).unwrap_err();
        assert!(matches!(err, LoadError::NegativeCastTime { id: 10, .. }));
    }

    #[test]
    fn embedded_table_parses() {
        let effects = EffectCatalog::load().unwrap();
        let book = SkillBook::load(&effects).expect("skills.ron must be valid");
        assert!(book.len() >= 5);
    }
}
