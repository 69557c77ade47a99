/// Tardis Shooter — a single arcade shooter scene.
///
/// Core modules (no terminal I/O):
/// - `entities`: player, enemy and projectile data plus their hooks
/// - `config`: level tuning snapshot and on-disk settings
/// - `actions`: frame-clock timers and tweens
/// - `contact`: collision-response dispatch
/// - `hud`: score and labels
/// - `scene`: the game scene state machine
///
/// Host modules (stand-ins for an engine): `physics`, `engine`, `display`.

pub mod actions;
pub mod config;
pub mod contact;
pub mod display;
pub mod engine;
pub mod entities;
pub mod hud;
pub mod physics;
pub mod scene;
