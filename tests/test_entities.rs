use std::time::Duration;

use tardis_shooter::contact::Responder;
use tardis_shooter::entities::*;

fn bounds() -> Bounds {
    Bounds::new(40.0, 20.0)
}

#[test]
fn kinds_and_responders() {
    assert_eq!(Entity::player(EntityId(1), 0.0, 0.0).responder(), None);
    assert_eq!(
        Entity::enemy(EntityId(2), 0.0, 0.0, 1.0).responder(),
        Some(Responder::Enemy)
    );
    assert_eq!(
        Entity::projectile(EntityId(3), 0.0, 0.0, 20.0, Duration::from_secs(1)).responder(),
        Some(Responder::Projectile)
    );
}

#[test]
fn only_enemies_are_worth_points() {
    assert_eq!(Entity::enemy(EntityId(2), 0.0, 0.0, 1.0).bounty(), ENEMY_POINTS);
    assert_eq!(Entity::player(EntityId(1), 0.0, 0.0).bounty(), 0);
}

#[test]
fn enemy_moves_down() {
    let e = Entity::enemy(EntityId(2), 5.0, 18.0, 3.0);
    assert_eq!(e.vy, -3.0);
    assert!(e.alive);
    assert!(!e.removed);
}

#[test]
fn enemy_below_field_is_removed_on_update() {
    let mut e = Entity::enemy(EntityId(2), 5.0, -0.5, 3.0);
    e.update(&bounds());
    assert!(!e.removed); // still half visible
    e.y = -1.5;
    e.update(&bounds());
    assert!(e.removed);
}

#[test]
fn enemy_outside_any_edge_is_removed_on_update() {
    for (x, y) in [(5.0, 25.0), (-5.0, 10.0), (50.0, 10.0)] {
        let mut e = Entity::enemy(EntityId(2), x, y, 3.0);
        e.update(&bounds());
        assert!(e.removed, "enemy at ({}, {}) kept", x, y);
    }
}

#[test]
fn enemy_inside_field_is_kept() {
    for (x, y) in [(0.0, 10.0), (40.0, 10.0), (20.0, 20.5), (20.0, 0.0)] {
        let mut e = Entity::enemy(EntityId(2), x, y, 3.0);
        e.update(&bounds());
        assert!(!e.removed, "enemy at ({}, {}) removed", x, y);
    }
}

#[test]
fn update_leaves_player_and_projectile_alone() {
    let mut pl = Entity::player(EntityId(1), 5.0, -10.0);
    pl.update(&bounds());
    assert!(!pl.removed);

    let mut p = Entity::projectile(EntityId(3), 5.0, -10.0, 20.0, Duration::from_secs(1));
    p.update(&bounds());
    assert!(!p.removed);
}

#[test]
fn projectile_removes_itself_after_transit() {
    let mut p = Entity::projectile(EntityId(3), 5.0, 2.0, 20.0, Duration::from_secs(1));
    p.step_motion(Duration::from_millis(500));
    assert_eq!(p.y, 11.0);
    assert!(!p.removed);
    p.step_motion(Duration::from_millis(500));
    assert_eq!(p.y, 20.0);
    assert!(p.removed);
    assert!(p.motion.is_none());
}

#[test]
fn on_game_over_parks_entity() {
    let mut p = Entity::projectile(EntityId(3), 5.0, 2.0, 20.0, Duration::from_secs(1));
    p.on_game_over();
    assert_eq!(p.x, OFFSCREEN_X);
    assert!(p.motion.is_none());
    assert!(!p.alive);
    assert!(p.removed);
    assert!(p.game_over_received);

    let mut e = Entity::enemy(EntityId(2), 5.0, 18.0, 3.0);
    e.on_game_over();
    assert_eq!(e.vy, 0.0);
}

#[test]
fn killed_player_stays_in_play() {
    let mut pl = Entity::player(EntityId(1), 5.0, 2.0);
    pl.kill();
    assert!(!pl.alive);
    assert!(!pl.removed);

    let mut e = Entity::enemy(EntityId(2), 5.0, 18.0, 3.0);
    e.kill();
    assert!(e.removed);
}

#[test]
fn entity_clone_is_independent() {
    let original = Entity::enemy(EntityId(2), 5.0, 18.0, 3.0);
    let mut cloned = original.clone();
    cloned.x = 99.0;
    cloned.kill();
    assert_eq!(original.x, 5.0);
    assert!(original.alive);
}

#[test]
fn bounds_helpers() {
    let b = bounds();
    assert_eq!(b.mid_x(), 20.0);
    assert_eq!(b.max_y(), 20.0);
}
