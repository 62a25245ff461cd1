/// Simulation configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Resolution of the effect pump in milliseconds. Effect expiry and
    /// periodic ticks are accurate to within this interval.
    pub tick_resolution_ms: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active timed effects per actor.
    pub const MAX_ACTIVE_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_RESOLUTION_MS: u64 = 50;

    pub fn new() -> Self {
        Self {
            tick_resolution_ms: Self::DEFAULT_TICK_RESOLUTION_MS,
        }
    }

    pub fn with_tick_resolution(tick_resolution_ms: u64) -> Self {
        Self { tick_resolution_ms }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
