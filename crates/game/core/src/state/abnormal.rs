//! Abnormal status bitmask.
//!
//! One bit per abnormal condition; effects own the bits they set and clear
//! them on expiry. The full mask travels with health-changed notifications
//! so observers can render status icons without tracking effect state.

use bitflags::bitflags;

bitflags! {
    /// Active abnormal conditions on an actor.
    ///
    /// Serialization comes from the `bitflags/serde` feature when the crate's
    /// `serde` feature is enabled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AbnormalState: u32 {
        /// Periodic damage.
        const POISON = 1 << 0;
        /// Cannot act.
        const STUN = 1 << 1;
        /// Cannot move.
        const ROOT = 1 << 2;
        /// Broken on damage.
        const SLEEP = 1 << 3;
        /// Appearance replaced by a template override.
        const TRANSFORM = 1 << 4;
        /// Periodic bleed damage.
        const BLEED = 1 << 5;
        /// Damage intake reduced.
        const SHIELD = 1 << 6;
        /// Cannot be the target of offensive actions.
        const PROTECTED = 1 << 7;
    }
}

impl AbnormalState {
    /// True if any action-preventing condition is set.
    pub fn is_incapacitated(&self) -> bool {
        self.intersects(Self::STUN | Self::SLEEP)
    }
}
