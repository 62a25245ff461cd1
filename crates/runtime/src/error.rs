//! Runtime errors.

use game_core::state::ActorId;

/// Faults surfaced by the orchestration layer. Permission denials and
/// stale-context discards are *not* errors; they are normal outcomes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// The referenced actor is not registered in the world.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    /// An effect application was rejected because the target's active set
    /// is at capacity.
    #[error("actor {actor} cannot hold more effects")]
    EffectCapacity { actor: ActorId },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
