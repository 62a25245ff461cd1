//! Skill (ability) definitions and resolution outcomes.
//!
//! A [`SkillTemplate`] is loaded once from configuration and read-only
//! thereafter. Templates are grouped into a closed set of categories; the
//! runtime maps each category to a resolution handler.

use crate::effect::EffectKind;
use crate::time::GameTime;

/// Numeric skill identifier from the definition tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

/// Closed set of resolution categories.
///
/// The category decides which handler resolves the skill; handlers are
/// registered per category, so new categories extend the registry without
/// touching the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    /// Applies a timed effect template to the target.
    Buff,
    /// Produces an item/object side effect, no effect instance.
    Create,
    /// Immediate health reduction, magical mitigation inputs.
    MagicDamage,
    /// Immediate health reduction, physical mitigation inputs.
    PhysicalDamage,
    /// Category-specific one-off mutation.
    Misc,
    /// Configured but not implemented; resolves to a no-op.
    Unimplemented,
}

impl SkillCategory {
    /// Offensive categories additionally pass the attack gate before
    /// resolution.
    #[inline]
    pub fn is_offensive(&self) -> bool {
        matches!(self, Self::MagicDamage | Self::PhysicalDamage)
    }
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,

    /// Level the template is defined at; resolution may be requested at a
    /// higher cast level, which scales the magnitude.
    pub level: u8,

    /// Wind-up before the skill's mutation lands. Zero resolves
    /// immediately; non-zero goes through the deferred scheduler.
    pub cast_time: GameTime,

    /// Raw magnitude before mitigation (damage) or the heal/restore amount
    /// (misc), depending on category.
    pub magnitude: u32,

    /// Additional magnitude per cast level above the template level.
    pub magnitude_per_level: u32,

    /// Effect template applied by buff-category skills.
    pub effect: Option<EffectKind>,
}

impl SkillTemplate {
    /// Raw magnitude at the requested cast level.
    pub fn magnitude_at(&self, level: u8) -> u32 {
        let above = u32::from(level.saturating_sub(self.level));
        self.magnitude + self.magnitude_per_level * above
    }
}

/// Result of one `resolve` call. Negative outcomes are normal values, not
/// errors: no mutation and no notification has happened for any of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillOutcome {
    /// The skill's mutation was applied.
    Executed,
    /// The skill has a wind-up; application was scheduled.
    CastStarted,
    /// A restriction chain denied the action.
    NotPermitted,
    /// The target left the world between lookup and mutation.
    TargetGone,
    /// No definition exists for the requested id.
    UnknownSkill,
    /// The definition exists but its category is unimplemented.
    NotImplemented,
    /// The mutation could not be applied (e.g. the target's effect set is
    /// full). Nothing was mutated.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_scales_above_template_level() {
        let template = SkillTemplate {
            id: SkillId(40),
            name: "Flame Bolt".into(),
            category: SkillCategory::MagicDamage,
            level: 3,
            cast_time: GameTime::ZERO,
            magnitude: 120,
            magnitude_per_level: 15,
            effect: None,
        };
        assert_eq!(template.magnitude_at(3), 120);
        assert_eq!(template.magnitude_at(5), 150);
        // Casting below the template level never subtracts
        assert_eq!(template.magnitude_at(1), 120);
    }

    #[test]
    fn only_damage_categories_are_offensive() {
        assert!(SkillCategory::MagicDamage.is_offensive());
        assert!(SkillCategory::PhysicalDamage.is_offensive());
        assert!(!SkillCategory::Buff.is_offensive());
        assert!(!SkillCategory::Create.is_offensive());
        assert!(!SkillCategory::Misc.is_offensive());
    }
}
