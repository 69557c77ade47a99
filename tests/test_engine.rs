use std::time::Duration;

use tardis_shooter::config::LevelConfig;
use tardis_shooter::engine;
use tardis_shooter::entities::*;
use tardis_shooter::physics;
use tardis_shooter::scene::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: Duration = Duration::from_millis(33);

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn started(config: LevelConfig, rng: &mut StdRng) -> GameScene {
    let mut scene = GameScene::new(Bounds::new(40.0, 20.0), DeviceIdiom::Phone, config);
    scene.did_move(rng);
    scene
}

fn enemy_x(scene: &GameScene) -> f32 {
    scene.entities().find(|e| e.kind == EntityKind::Enemy).unwrap().x
}

// ── physics ───────────────────────────────────────────────────────────────────

#[test]
fn integrate_moves_free_bodies_only() {
    let mut bodies = vec![
        Entity::enemy(EntityId(1), 5.0, 10.0, 4.0),
        Entity::projectile(EntityId(2), 5.0, 2.0, 20.0, Duration::from_secs(1)),
    ];
    bodies[1].vy = 100.0; // ignored while a move-to runs
    physics::integrate(bodies.iter_mut(), Duration::from_millis(500));
    assert_eq!(bodies[0].y, 8.0);
    assert_eq!(bodies[1].y, 2.0);
}

#[test]
fn contacts_only_between_reporting_kinds() {
    let bodies = vec![
        Entity::player(EntityId(1), 5.0, 2.0),
        Entity::projectile(EntityId(2), 5.0, 2.0, 20.0, Duration::from_secs(1)),
        Entity::enemy(EntityId(3), 5.0, 2.5, 1.0),
        Entity::enemy(EntityId(4), 5.0, 2.5, 1.0),
    ];
    let contacts = physics::detect_contacts(bodies.iter());
    assert_eq!(
        contacts,
        vec![
            (EntityId(1), EntityId(3)),
            (EntityId(1), EntityId(4)),
            (EntityId(2), EntityId(3)),
            (EntityId(2), EntityId(4)),
        ]
    );
}

#[test]
fn separated_or_dead_bodies_do_not_touch() {
    let mut far = Entity::enemy(EntityId(3), 5.0 + 2.0, 10.0, 1.0);
    let p = Entity::projectile(EntityId(2), 5.0, 10.0, 20.0, Duration::from_secs(1));
    assert!(physics::detect_contacts([&p, &far].into_iter()).is_empty());

    far.x = 5.5;
    assert_eq!(physics::detect_contacts([&p, &far].into_iter()).len(), 1);

    far.kill();
    assert!(physics::detect_contacts([&p, &far].into_iter()).is_empty());
}

// ── full frames ───────────────────────────────────────────────────────────────

#[test]
fn projectile_under_enemy_scores_a_kill() {
    let mut rng = seeded_rng();
    let mut scene = started(LevelConfig::start(), &mut rng);
    let x = enemy_x(&scene);
    scene.touch_moved(&[x]);

    // the first timed enemy arrives at 2.0s
    for _ in 0..55 {
        engine::step(&mut scene, FRAME, &mut rng);
    }
    assert_eq!(scene.score(), 10);
    assert_eq!(scene.count(EntityKind::Enemy), 0);
    assert_eq!(scene.hud.score_label.as_ref().unwrap().text, "Score: 10");
}

#[test]
fn enemy_reaching_player_ends_the_run() {
    let config = LevelConfig {
        enemy_spawn_rate: 100.0,
        enemy_speed: 20.0,
        projectile_rate: 100.0,
        projectile_speed: 0.01,
    };
    let mut rng = seeded_rng();
    let mut scene = started(config, &mut rng);
    let x = enemy_x(&scene);
    scene.touch_moved(&[x]);

    let mut frames = 0;
    while !scene.is_player_down() {
        engine::step(&mut scene, FRAME, &mut rng);
        frames += 1;
        assert!(frames < 60, "enemy never reached the player");
    }
    assert_eq!(scene.score(), 0);

    // the life system reacts
    scene.game_over();
    assert!(scene.player().is_none());

    let mut transitions = Vec::new();
    for _ in 0..200 {
        if let Some(t) = engine::step(&mut scene, FRAME, &mut rng) {
            transitions.push(t);
        }
    }
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].crossfade, Duration::from_secs(1));
    assert_eq!(scene.status, GameStatus::Title);
    assert_eq!(scene.entities().count(), 0);
}

#[test]
fn enemies_that_slip_past_are_removed() {
    let config = LevelConfig {
        enemy_spawn_rate: 100.0,
        enemy_speed: 10.0,
        projectile_rate: 100.0,
        projectile_speed: 0.01,
    };
    let mut rng = seeded_rng();
    let mut scene = started(config, &mut rng);
    let x = enemy_x(&scene);
    // keep the player well away from the enemy's column
    scene.touch_moved(&[if x < 20.0 { 38.0 } else { 2.0 }]);

    for _ in 0..90 {
        engine::step(&mut scene, FRAME, &mut rng);
    }
    assert_eq!(scene.count(EntityKind::Enemy), 0);
    assert!(scene.player().unwrap().alive);
}

#[test]
fn negative_enemy_speed_still_descends() {
    let config = LevelConfig {
        enemy_spawn_rate: 1.0,
        enemy_speed: -3.0,
        projectile_rate: 100.0,
        projectile_speed: 0.01,
    };
    let mut rng = seeded_rng();
    let mut scene = started(config, &mut rng);
    let x = enemy_x(&scene);
    scene.touch_moved(&[if x < 20.0 { 38.0 } else { 2.0 }]);

    let seed = scene.entities().find(|e| e.kind == EntityKind::Enemy).unwrap();
    let (seed_id, start_y) = (seed.id, seed.y);
    assert_eq!(seed.vy, -3.0);

    engine::step(&mut scene, FRAME, &mut rng);
    assert!(scene.entity(seed_id).unwrap().y < start_y);

    // 30s of play: each enemy leaves within ~8s, so no more than a handful
    // are ever on screen at once.
    for _ in 0..900 {
        engine::step(&mut scene, FRAME, &mut rng);
        if scene.is_player_down() {
            break;
        }
        assert!(scene.count(EntityKind::Enemy) <= 10);
    }
}
