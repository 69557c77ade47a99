/// Heads-up display: the score counter and the two text labels.

use std::time::Duration;

use crate::actions::Tween;

pub const SCORE_FONT_SIZE: u16 = 50;
pub const MAIN_FONT_SIZE: u16 = 100;
pub const GAME_OVER_FONT_SIZE: u16 = 50;

/// A text label with an optional running fade.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: u16,
    pub alpha: f32,
    fade: Option<Tween>,
}

impl Label {
    pub fn new(text: &str, font_size: u16) -> Self {
        Self {
            text: text.to_string(),
            font_size,
            alpha: 1.0,
            fade: None,
        }
    }

    /// Fade from the current alpha to zero over `duration`.
    pub fn fade_out(&mut self, duration: Duration) {
        self.fade = Some(Tween::new(self.alpha, 0.0, duration));
    }

    /// Cancel every pending action on this label.
    pub fn remove_all_actions(&mut self) {
        self.fade = None;
    }

    pub fn has_actions(&self) -> bool {
        self.fade.is_some()
    }

    pub fn step(&mut self, dt: Duration) {
        if let Some(fade) = self.fade.as_mut() {
            self.alpha = fade.step(dt);
            if fade.is_finished() {
                self.fade = None;
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Score plus the labels that show it.
#[derive(Clone, Debug, Default)]
pub struct Hud {
    pub score: u32,
    pub score_label: Option<Label>,
    pub main_label: Option<Label>,
}

impl Hud {
    pub fn create_score_label(&mut self) {
        self.score_label = Some(Label::new("Score", SCORE_FONT_SIZE));
    }

    pub fn create_main_label(&mut self) {
        self.main_label = Some(Label::new("Start", MAIN_FONT_SIZE));
    }

    /// Credit a kill worth `points`.
    pub fn killed_enemy_for(&mut self, points: u32) {
        self.score += points;
        self.update_score();
    }

    /// Refresh the score label text.
    pub fn update_score(&mut self) {
        if let Some(label) = self.score_label.as_mut() {
            label.text = format!("Score: {}", self.score);
        }
    }

    pub fn hide_main_label(&mut self, duration: Duration) {
        if let Some(label) = self.main_label.as_mut() {
            label.fade_out(duration);
        }
    }

    /// Replace whatever the main label is doing with a solid "Game Over".
    pub fn show_game_over(&mut self) -> bool {
        let Some(label) = self.main_label.as_mut() else {
            return false;
        };
        label.text = "Game Over".to_string();
        label.remove_all_actions();
        label.font_size = GAME_OVER_FONT_SIZE;
        label.alpha = 1.0;
        true
    }

    pub fn step(&mut self, dt: Duration) {
        if let Some(label) = self.main_label.as_mut() {
            label.step(dt);
        }
        if let Some(label) = self.score_label.as_mut() {
            label.step(dt);
        }
    }
}
