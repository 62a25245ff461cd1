//! Effect lifecycle transitions.
//!
//! Pure functions over `&mut Actor`: the caller owns the clock and the
//! actor's lock, and publishes the returned notifications after releasing
//! it. Transition graph per instance:
//!
//! ```text
//! Pending ──apply──▶ Active ──(periodic interval)──▶ Active (self-loop)
//!                      │
//!                      ├─ duration elapsed ─▶ Expired (removed)
//!                      └─ cancel/expire_all ─▶ Expired (removed)
//! ```
//!
//! Zero-duration templates run the start and end mutations in the same
//! `apply` call and are never inserted into the owner's collection.

use crate::events::Notification;
use crate::state::{Actor, ActorId, ActorKind};
use crate::time::GameTime;

use super::{Effect, EffectKind, EffectState, EffectTemplate};

/// Application failure. Capacity exhaustion is the only way a validated
/// template can fail to land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("actor {actor} cannot hold more than {capacity} effects")]
    CapacityExceeded { actor: ActorId, capacity: usize },
}

/// Applies a template to an actor: start mutation, activation, and
/// insertion into the active set.
///
/// Re-applying a kind the actor already carries replaces the running
/// instance: duration and tick schedule reset, no end notification for the
/// superseded instance. The caller must hold the actor's lock, which is
/// what serializes two concurrent same-kind applications.
pub fn apply(
    actor: &mut Actor,
    template: &EffectTemplate,
    source: ActorId,
    now: GameTime,
    out: &mut Vec<Notification>,
) -> Result<(), EffectError> {
    let mut effect = Effect::pending(*template, source, now);

    // Start mutation: flags up, appearance overridden.
    actor.abnormal.insert(template.abnormal);
    if template.model_override != 0 {
        actor.transformed_model = template.model_override;
    }
    effect.state = EffectState::Active;
    out.push(Notification::EffectApplied {
        actor: actor.id,
        source,
        kind: template.kind,
        abnormal: actor.abnormal,
    });

    if template.is_instant() {
        // Instantaneous: never observable as active, never inserted.
        end_effect(actor, template, out);
        return Ok(());
    }

    actor.effects.insert(effect).map_err(|_| {
        // Roll the start mutation back so a rejected application leaves no trace.
        actor.abnormal.remove(template.abnormal);
        if template.model_override != 0 {
            revert_model(actor);
        }
        out.pop();
        EffectError::CapacityExceeded {
            actor: actor.id,
            capacity: actor.effects.len(),
        }
    })?;
    Ok(())
}

/// Advances every active effect on the actor to `now`: due periodic ticks
/// fire first (a tick landing exactly on the end deadline still counts),
/// then due instances expire and are removed.
pub fn advance(actor: &mut Actor, now: GameTime, out: &mut Vec<Notification>) {
    let Actor {
        id,
        effects,
        vitality,
        abnormal,
        ..
    } = actor;

    for effect in effects.iter_mut() {
        let interval = effect.template.tick_interval;
        while let Some(deadline) = effect.next_tick {
            if deadline > now || deadline > effect.expires_at {
                break;
            }
            effect.next_tick = Some(deadline.saturating_add(interval));

            let damage = effect.template.tick_damage;
            let lost = if damage > 0 {
                vitality.apply_damage(damage)
            } else {
                0
            };
            out.push(Notification::EffectTicked {
                actor: *id,
                kind: effect.kind(),
                damage: lost,
            });
            if lost > 0 {
                out.push(Notification::HealthChanged {
                    actor: *id,
                    source: Some(effect.source),
                    hp_percent: vitality.percent(),
                    abnormal: *abnormal,
                    skill: None,
                });
            }
        }
    }

    let expired: Vec<EffectKind> = actor
        .effects
        .iter()
        .filter(|e| e.is_due(now))
        .map(|e| e.kind())
        .collect();
    for kind in expired {
        if let Some(effect) = actor.effects.remove(kind) {
            end_effect(actor, &effect.template, out);
        }
    }
}

/// Explicitly terminates one effect before its scheduled end (early
/// termination rules, scripted dispels). Returns false if the actor does
/// not carry the kind.
pub fn cancel(actor: &mut Actor, kind: EffectKind, out: &mut Vec<Notification>) -> bool {
    match actor.effects.remove(kind) {
        Some(effect) => {
            end_effect(actor, &effect.template, out);
            true
        }
        None => false,
    }
}

/// Expires every active effect immediately. Required cleanup when the owner
/// leaves the world; natural timers must not be waited on.
pub fn expire_all(actor: &mut Actor, out: &mut Vec<Notification>) {
    for effect in actor.effects.drain_all() {
        end_effect(actor, &effect.template, out);
    }
}

/// End mutation: flags down, appearance reverted, end notification.
fn end_effect(actor: &mut Actor, template: &EffectTemplate, out: &mut Vec<Notification>) {
    actor.abnormal.remove(template.abnormal);
    if template.model_override != 0 {
        revert_model(actor);
    }
    out.push(Notification::EffectEnded {
        actor: actor.id,
        kind: template.kind,
        abnormal: actor.abnormal,
    });
}

/// NPCs revert to their spawn template's appearance, players to none.
fn revert_model(actor: &mut Actor) {
    actor.transformed_model = match actor.kind {
        ActorKind::Npc => actor.natural_model,
        ActorKind::Player => 0,
    };
}
