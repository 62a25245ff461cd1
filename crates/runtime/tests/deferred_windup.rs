//! Wind-up casts and the deferred action scheduler: fingerprint-validated
//! continuations, stale discards, and removal cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use game_content::loaders::skills::SkillSpec;
use game_content::{ContentSet, EffectCatalog, SkillBook, SkillLearnIndex};
use game_core::state::{AbnormalState, ActorKind};
use game_core::{GameConfig, Notification, SkillCategory, SkillId, SkillOutcome};
use runtime::{ActorSpec, Fingerprint, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

const LANCE: SkillId = SkillId(4);

fn content() -> ContentSet {
    let effects = EffectCatalog::from_specs(vec![]).unwrap();
    let skills = SkillBook::from_specs(
        vec![SkillSpec {
            id: LANCE.0,
            name: "test-lance".into(),
            category: SkillCategory::MagicDamage,
            level: 1,
            cast_time_ms: 300,
            magnitude: 30,
            magnitude_per_level: 0,
            effect: None,
        }],
        &effects,
    )
    .unwrap();
    ContentSet {
        effects,
        skills,
        learn: SkillLearnIndex::default(),
    }
}

async fn start() -> Arc<Runtime> {
    let config = RuntimeConfig {
        game: GameConfig::with_tick_resolution(10),
        ..RuntimeConfig::default()
    };
    Runtime::start(config, content()).await
}

fn player() -> ActorSpec {
    ActorSpec {
        kind: ActorKind::Player,
        max_hp: 100,
        natural_model: 0,
    }
}

fn drain(rx: &mut Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(n) => out.push(n),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            Err(TryRecvError::Lagged(_)) => continue,
        }
    }
    out
}

#[tokio::test(start_paused = true)]
async fn windup_with_unchanged_target_fires_exactly_once() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world().set_target(caster, Some(target));

    let mut ability = rt.subscribe(Topic::Ability);
    let mut vitals = rt.subscribe(Topic::Vitals);

    let outcome = rt.resolve_skill(caster, target, LANCE, 1);
    assert_eq!(outcome, SkillOutcome::CastStarted);

    // The cast announcement is immediate; the damage is not
    let started = drain(&mut ability);
    assert_eq!(started.len(), 1);
    let hp = rt.with_actor(target, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 100);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let health = drain(&mut vitals);
    assert_eq!(health.len(), 1, "the wind-up lands exactly once");
    let hp = rt.with_actor(target, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 70);
    assert_eq!(rt.scheduler().pending_len(), 0);

    // Nothing else fires later
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(drain(&mut vitals).is_empty());
}

#[tokio::test(start_paused = true)]
async fn windup_is_discarded_when_the_caster_retargets() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    let other = rt.spawn_actor(player());
    rt.world().set_target(caster, Some(target));

    let mut vitals = rt.subscribe(Topic::Vitals);
    assert_eq!(rt.resolve_skill(caster, target, LANCE, 1), SkillOutcome::CastStarted);

    // Retarget mid-wind-up
    tokio::time::sleep(Duration::from_millis(100)).await;
    rt.world().set_target(caster, Some(other));

    tokio::time::sleep(Duration::from_millis(400)).await;

    // Silently dropped: no mutation on anyone, no notification
    assert!(drain(&mut vitals).is_empty());
    assert_eq!(rt.with_actor(target, |a| a.vitality.hp()).unwrap(), 100);
    assert_eq!(rt.with_actor(other, |a| a.vitality.hp()).unwrap(), 100);
}

#[tokio::test(start_paused = true)]
async fn windup_is_cancelled_when_the_caster_is_removed() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world().set_target(caster, Some(target));

    assert_eq!(rt.resolve_skill(caster, target, LANCE, 1), SkillOutcome::CastStarted);
    assert_eq!(rt.scheduler().pending_len(), 1);

    rt.remove_actor(caster);
    assert_eq!(rt.scheduler().pending_len(), 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(rt.with_actor(target, |a| a.vitality.hp()).unwrap(), 100);
}

#[tokio::test(start_paused = true)]
async fn fired_windup_still_passes_through_the_gate() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world().set_target(caster, Some(target));

    assert_eq!(rt.resolve_skill(caster, target, LANCE, 1), SkillOutcome::CastStarted);

    // Target becomes protected while the cast winds up; the fingerprint
    // still matches but the gate must deny at fire time
    rt.world()
        .resolve(target)
        .unwrap()
        .lock()
        .abnormal
        .insert(AbnormalState::PROTECTED);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(rt.with_actor(target, |a| a.vitality.hp()).unwrap(), 100);
}

#[tokio::test(start_paused = true)]
async fn scripted_deferred_actions_share_the_same_contract() {
    let rt = start().await;
    let actor = rt.spawn_actor(player());
    let fired = Arc::new(AtomicU32::new(0));

    // A scripting collaborator defers its own continuation
    let counter = Arc::clone(&fired);
    rt.scheduler().schedule(
        Duration::from_millis(200),
        Fingerprint::Present { actor },
        Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }),
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(fired.load(Ordering::Relaxed), 1);

    // A second one dies with the actor
    let counter = Arc::clone(&fired);
    rt.scheduler().schedule(
        Duration::from_millis(200),
        Fingerprint::Present { actor },
        Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }),
    );
    rt.remove_actor(actor);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}
