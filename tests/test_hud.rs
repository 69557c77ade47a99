use std::time::Duration;

use proptest::prelude::*;
use tardis_shooter::hud::*;

fn hud_with_labels() -> Hud {
    let mut hud = Hud::default();
    hud.create_score_label();
    hud.create_main_label();
    hud
}

/// Labels as they stand once play has started.
fn started_hud() -> Hud {
    let mut hud = hud_with_labels();
    hud.update_score();
    hud
}

#[test]
fn labels_start_with_placeholder_text() {
    let hud = hud_with_labels();
    assert_eq!(hud.score_label.as_ref().unwrap().text, "Score");
    let main = hud.main_label.as_ref().unwrap();
    assert_eq!(main.text, "Start");
    assert_eq!(main.font_size, MAIN_FONT_SIZE);
    assert_eq!(main.alpha, 1.0);
}

#[test]
fn kills_add_up() {
    let mut hud = hud_with_labels();
    hud.killed_enemy_for(10);
    hud.killed_enemy_for(5);
    assert_eq!(hud.score, 15);
    assert_eq!(hud.score_label.as_ref().unwrap().text, "Score: 15");
}

#[test]
fn zero_point_kill_still_refreshes_label() {
    let mut hud = hud_with_labels();
    hud.killed_enemy_for(0);
    assert_eq!(hud.score, 0);
    assert_eq!(hud.score_label.as_ref().unwrap().text, "Score: 0");
}

#[test]
fn score_without_label_is_still_counted() {
    let mut hud = Hud::default();
    hud.killed_enemy_for(7);
    assert_eq!(hud.score, 7);
    assert!(hud.score_label.is_none());
}

#[test]
fn game_over_overrides_running_fade() {
    let mut hud = hud_with_labels();
    hud.hide_main_label(Duration::from_secs(3));
    hud.step(Duration::from_secs(1));
    assert!(hud.main_label.as_ref().unwrap().alpha < 1.0);

    assert!(hud.show_game_over());
    let main = hud.main_label.as_ref().unwrap();
    assert_eq!(main.text, "Game Over");
    assert_eq!(main.font_size, GAME_OVER_FONT_SIZE);
    assert_eq!(main.alpha, 1.0);
    assert!(!main.has_actions());

    // the cancelled fade must not come back
    hud.step(Duration::from_secs(5));
    assert_eq!(hud.main_label.as_ref().unwrap().alpha, 1.0);
}

#[test]
fn started_hud_shows_zero_before_any_kill() {
    let hud = started_hud();
    assert_eq!(hud.score_label.as_ref().unwrap().text, "Score: 0");
}

#[test]
fn game_over_without_main_label_is_skipped() {
    let mut hud = Hud::default();
    assert!(!hud.show_game_over());
}

#[test]
fn remove_all_actions_freezes_alpha() {
    let mut label = Label::new("x", 10);
    label.fade_out(Duration::from_secs(2));
    label.step(Duration::from_secs(1));
    label.remove_all_actions();
    label.step(Duration::from_secs(1));
    assert_eq!(label.alpha, 0.5);
    assert!(label.is_visible());
}

proptest! {
    #[test]
    fn score_is_sum_of_kills(points in prop::collection::vec(0u32..=u16::MAX as u32, 0..100)) {
        let mut hud = started_hud();
        for p in &points {
            hud.killed_enemy_for(*p);
        }
        let sum: u32 = points.iter().sum();
        prop_assert_eq!(hud.score, sum);
        prop_assert_eq!(&hud.score_label.as_ref().unwrap().text, &format!("Score: {}", sum));
    }
}
