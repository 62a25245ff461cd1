//! Runtime-level gate behavior: live chain mutation and concurrent
//! resolutions against the per-actor locking discipline.

use std::sync::Arc;

use game_content::ContentSet;
use game_core::restriction::{Restriction, RestrictionKind};
use game_core::state::{AbnormalState, Actor, ActorKind};
use game_core::{SkillId, SkillOutcome};
use runtime::{ActorSpec, Runtime, RuntimeConfig};

const FLAME_BOLT: SkillId = SkillId(10);

fn player() -> ActorSpec {
    ActorSpec {
        kind: ActorKind::Player,
        max_hp: 10_000,
        natural_model: 0,
    }
}

struct DenyAllSkills;

impl Restriction for DenyAllSkills {
    fn name(&self) -> &'static str {
        "deny-all-skills"
    }

    fn kinds(&self) -> &[RestrictionKind] {
        &[RestrictionKind::UseSkill]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn can_use_skill(&self, _actor: &Actor, _target: Option<&Actor>) -> bool {
        false
    }
}

#[tokio::test(start_paused = true)]
async fn registering_and_deregistering_a_module_takes_effect_live() {
    let content = ContentSet::load_embedded().unwrap();
    let rt = Runtime::start(RuntimeConfig::default(), content).await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());

    assert_eq!(rt.resolve_skill(caster, target, FLAME_BOLT, 1), SkillOutcome::Executed);

    let deny: Arc<dyn Restriction> = Arc::new(DenyAllSkills);
    rt.restrictions().register(Arc::clone(&deny));
    assert_eq!(
        rt.resolve_skill(caster, target, FLAME_BOLT, 1),
        SkillOutcome::NotPermitted
    );

    rt.restrictions().deregister(&deny);
    assert_eq!(rt.resolve_skill(caster, target, FLAME_BOLT, 1), SkillOutcome::Executed);
}

#[tokio::test(start_paused = true)]
async fn empty_registry_approves_everything() {
    let content = ContentSet::load_embedded().unwrap();
    let config = RuntimeConfig {
        bare_restrictions: true,
        ..RuntimeConfig::default()
    };
    let rt = Runtime::start(config, content).await;
    let caster = rt.spawn_actor(player());
    let target = rt.spawn_actor(player());

    // Without the built-in modules, even a protected target is attackable
    rt.world()
        .resolve(target)
        .unwrap()
        .lock()
        .abnormal
        .insert(AbnormalState::PROTECTED);
    assert_eq!(rt.resolve_skill(caster, target, FLAME_BOLT, 1), SkillOutcome::Executed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolutions_on_one_target_serialize() {
    let content = ContentSet::load_embedded().unwrap();
    let rt = Runtime::start(RuntimeConfig::default(), content).await;
    let target = rt.spawn_actor(player());

    let casters: Vec<_> = (0..8).map(|_| rt.spawn_actor(player())).collect();

    let mut tasks = Vec::new();
    for caster in casters {
        let rt = Arc::clone(&rt);
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                // Flame Bolt at template level: 20 raw damage
                assert_eq!(
                    rt.resolve_skill(caster, target, FLAME_BOLT, 1),
                    SkillOutcome::Executed
                );
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // 8 casters x 10 casts x 20 damage, nothing lost to races
    let hp = rt.with_actor(target, |a| a.vitality.hp()).unwrap();
    assert_eq!(hp, 10_000 - 8 * 10 * 20);
    rt.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crossed_attack_directions_do_not_deadlock() {
    let content = ContentSet::load_embedded().unwrap();
    let rt = Runtime::start(RuntimeConfig::default(), content).await;
    let a = rt.spawn_actor(player());
    let b = rt.spawn_actor(player());

    let rt_ab = Arc::clone(&rt);
    let ab = tokio::spawn(async move {
        for _ in 0..50 {
            rt_ab.resolve_skill(a, b, FLAME_BOLT, 1);
        }
    });
    let rt_ba = Arc::clone(&rt);
    let ba = tokio::spawn(async move {
        for _ in 0..50 {
            rt_ba.resolve_skill(b, a, FLAME_BOLT, 1);
        }
    });

    ab.await.unwrap();
    ba.await.unwrap();

    let hp_a = rt.with_actor(a, |x| x.vitality.hp()).unwrap();
    let hp_b = rt.with_actor(b, |x| x.vitality.hp()).unwrap();
    assert_eq!(hp_a, 10_000 - 50 * 20);
    assert_eq!(hp_b, 10_000 - 50 * 20);
    rt.shutdown();
}
