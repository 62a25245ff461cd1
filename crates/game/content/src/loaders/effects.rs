//! Effect template loader.

use std::collections::HashMap;

use serde::Deserialize;

use game_core::state::AbnormalState;
use game_core::{EffectKind, EffectTemplate, GameTime};

use crate::error::LoadError;

use super::LoadResult;

/// On-disk shape of one effect template. Durations are signed so negative
/// values reach validation instead of wrapping.
#[derive(Debug, Clone, Deserialize)]
pub struct EffectSpec {
    pub kind: u16,
    pub duration_ms: i64,
    #[serde(default)]
    pub tick_interval_ms: i64,
    #[serde(default)]
    pub abnormal: AbnormalState,
    #[serde(default)]
    pub model_override: u32,
    #[serde(default)]
    pub tick_damage: u32,
}

impl EffectSpec {
    fn validate(&self) -> Result<EffectTemplate, LoadError> {
        if self.duration_ms < 0 {
            return Err(LoadError::NegativeDuration {
                kind: self.kind,
                field: "duration_ms",
                value: self.duration_ms,
            });
        }
        if self.tick_interval_ms < 0 {
            return Err(LoadError::NegativeDuration {
                kind: self.kind,
                field: "tick_interval_ms",
                value: self.tick_interval_ms,
            });
        }
        Ok(EffectTemplate {
            kind: EffectKind(self.kind),
            duration: GameTime::from_millis(self.duration_ms as u64),
            tick_interval: GameTime::from_millis(self.tick_interval_ms as u64),
            abnormal: self.abnormal,
            model_override: self.model_override,
            tick_damage: self.tick_damage,
        })
    }
}

/// Registry of validated effect templates, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    templates: HashMap<EffectKind, EffectTemplate>,
}

impl EffectCatalog {
    /// Loads the embedded effect table.
    pub fn load() -> LoadResult<Self> {
        let raw = include_str!("../../data/effects.ron");
        let specs: Vec<EffectSpec> =
            ron::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse effects.ron: {e}"))?;
        Ok(Self::from_specs(specs)?)
    }

    /// Validates and indexes a spec list. Any rejected entry fails the whole
    /// table; a partially loaded catalog is never published.
    pub fn from_specs(specs: Vec<EffectSpec>) -> Result<Self, LoadError> {
        let mut templates = HashMap::with_capacity(specs.len());
        for spec in specs {
            let template = spec.validate()?;
            if templates.insert(template.kind, template).is_some() {
                return Err(LoadError::DuplicateEffect(template.kind.0));
            }
        }
        Ok(Self { templates })
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectTemplate> {
        self.templates.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.templates.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
