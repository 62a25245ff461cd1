//! End-to-end cast resolution against the embedded content tables.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use game_content::ContentSet;
use game_core::state::{AbnormalState, ActorId, ActorKind};
use game_core::{Notification, SkillId, SkillOutcome};
use runtime::{ActorSpec, ObjectFactory, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

const FLAME_BOLT: SkillId = SkillId(10);
const MENDING_TOUCH: SkillId = SkillId(16);
const CONJURE_TONIC: SkillId = SkillId(17);
const CHRONO_FLUX: SkillId = SkillId(18);

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

async fn start() -> Arc<Runtime> {
    // RUST_LOG=runtime=trace surfaces the resolver/scheduler diagnostics
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let content = ContentSet::load_embedded().expect("embedded content");
    Runtime::start(RuntimeConfig::default(), content).await
}

#[tokio::test(start_paused = true)]
async fn protected_target_denies_attack_without_mutation() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world()
        .resolve(target)
        .unwrap()
        .lock()
        .abnormal
        .insert(AbnormalState::PROTECTED);

    let mut ability = rt.subscribe(Topic::Ability);
    let mut vitals = rt.subscribe(Topic::Vitals);

    let outcome = rt.resolve_skill(caster, target, FLAME_BOLT, 1);
    assert_eq!(outcome, SkillOutcome::NotPermitted);

    // No mutation, no notification
    let hp = rt.with_actor(target, |a| a.vitality.percent()).unwrap();
    assert_eq!(hp, 100);
    assert!(drain(&mut ability).is_empty());
    assert!(drain(&mut vitals).is_empty());
}

#[tokio::test(start_paused = true)]
async fn unprotected_target_takes_damage_with_exactly_one_of_each_notification() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());

    let mut ability = rt.subscribe(Topic::Ability);
    let mut vitals = rt.subscribe(Topic::Vitals);

    let outcome = rt.resolve_skill(caster, target, FLAME_BOLT, 1);
    assert_eq!(outcome, SkillOutcome::Executed);

    // Flame Bolt: magnitude 20 at template level, no mitigation configured
    let hp = rt.with_actor(target, |a| a.vitality.percent()).unwrap();
    assert_eq!(hp, 80);

    let started = drain(&mut ability);
    assert_eq!(started.len(), 1);
    assert!(matches!(
        started[0],
        Notification::AbilityStarted { skill: FLAME_BOLT, .. }
    ));

    let health = drain(&mut vitals);
    assert_eq!(health.len(), 1);
    assert!(matches!(
        health[0],
        Notification::HealthChanged {
            hp_percent: 80,
            skill: Some(FLAME_BOLT),
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn damage_scales_with_cast_level() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());

    // 20 base + 5 per level above 1
    rt.resolve_skill(caster, target, FLAME_BOLT, 3);
    let hp = rt.with_actor(target, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 70);
}

#[tokio::test(start_paused = true)]
async fn misc_skill_heals_the_target() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world()
        .resolve(target)
        .unwrap()
        .lock()
        .vitality
        .apply_damage(50);

    let outcome = rt.resolve_skill(caster, target, MENDING_TOUCH, 1);
    assert_eq!(outcome, SkillOutcome::Executed);
    let hp = rt.with_actor(target, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 75);
}

#[tokio::test(start_paused = true)]
async fn self_cast_resolves_under_a_single_lock() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    rt.world()
        .resolve(caster)
        .unwrap()
        .lock()
        .vitality
        .apply_damage(40);

    let outcome = rt.resolve_skill(caster, caster, MENDING_TOUCH, 1);
    assert_eq!(outcome, SkillOutcome::Executed);
    let hp = rt.with_actor(caster, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 85);
}

#[tokio::test(start_paused = true)]
async fn create_skill_reaches_the_object_factory() {
    struct Recording(AtomicU32);
    impl ObjectFactory for Recording {
        fn create_object(&self, _creator: ActorId, _skill: SkillId) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let factory = Arc::new(Recording(AtomicU32::new(0)));
    let config = RuntimeConfig {
        factory: Some(Arc::clone(&factory) as Arc<dyn ObjectFactory>),
        ..RuntimeConfig::default()
    };
    let content = ContentSet::load_embedded().unwrap();
    let rt = Runtime::start(config, content).await;

    let caster = rt.spawn_actor(player());
    let outcome = rt.resolve_skill(caster, caster, CONJURE_TONIC, 1);
    assert_eq!(outcome, SkillOutcome::Executed);
    assert_eq!(factory.0.load(Ordering::Relaxed), 1);
}

#[tokio::test(start_paused = true)]
async fn unimplemented_category_is_a_silent_no_op() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    let mut ability = rt.subscribe(Topic::Ability);

    let outcome = rt.resolve_skill(caster, target, CHRONO_FLUX, 1);
    assert_eq!(outcome, SkillOutcome::NotImplemented);
    assert!(drain(&mut ability).is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_skill_id_resolves_to_unknown() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let outcome = rt.resolve_skill(caster, caster, SkillId(9999), 1);
    assert_eq!(outcome, SkillOutcome::UnknownSkill);
}

#[tokio::test(start_paused = true)]
async fn vanished_target_yields_target_gone() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.remove_actor(target);

    let outcome = rt.resolve_skill(caster, target, FLAME_BOLT, 1);
    assert_eq!(outcome, SkillOutcome::TargetGone);
}

#[tokio::test(start_paused = true)]
async fn stunned_caster_is_gated_before_any_mutation() {
    let rt = start().await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());
    rt.world()
        .resolve(caster)
        .unwrap()
        .lock()
        .abnormal
        .insert(AbnormalState::STUN);

    let outcome = rt.resolve_skill(caster, target, FLAME_BOLT, 1);
    assert_eq!(outcome, SkillOutcome::NotPermitted);
    let hp = rt.with_actor(target, |a| a.vitality.percent()).unwrap();
    assert_eq!(hp, 100);
}
