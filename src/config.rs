/// Level tuning and player settings.
///
/// Settings live in a small JSON file.  A missing or broken file is never an
/// error: the game falls back to defaults and says so in the log.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "SHOOTER_CONFIG";

/// Difficulty snapshot in effect for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Seconds between enemy spawns.
    pub enemy_spawn_rate: f64,
    /// Enemy descent speed, cells per second.
    pub enemy_speed: f32,
    /// Seconds between projectile shots.
    pub projectile_rate: f64,
    /// Seconds a projectile takes to reach the top of the play field.
    pub projectile_speed: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::start()
    }
}

impl LevelConfig {
    /// The opening difficulty.
    pub fn start() -> Self {
        Self {
            enemy_spawn_rate: 2.0,
            enemy_speed: 3.0,
            projectile_rate: 0.5,
            projectile_speed: 1.0,
        }
    }

    /// Enemy speed, or the opening speed when the configured one isn't a
    /// positive finite number.
    pub fn descent_speed(&self) -> f32 {
        if self.has_valid_speed() {
            self.enemy_speed
        } else {
            Self::start().enemy_speed
        }
    }

    pub fn has_valid_speed(&self) -> bool {
        self.enemy_speed.is_finite() && self.enemy_speed > 0.0
    }

    pub fn enemy_period(&self) -> Duration {
        secs(self.enemy_spawn_rate)
    }

    pub fn projectile_period(&self) -> Duration {
        secs(self.projectile_rate)
    }

    pub fn projectile_transit(&self) -> Duration {
        secs(self.projectile_speed)
    }
}

/// Negative, NaN and absurd values collapse to zero; the scheduler clamps
/// periods from there.
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Everything read from the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: LevelConfig,
    /// Target frame time in milliseconds.
    pub frame_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelConfig::start(),
            frame_millis: 33,
        }
    }
}

impl Settings {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_millis.max(1))
    }

    /// `$SHOOTER_CONFIG`, else `$HOME/.tardis_shooter.json`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".tardis_shooter.json")
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
