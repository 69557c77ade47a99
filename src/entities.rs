/// Game entities — the player (Tardis), enemies (Daleks) and projectiles.
///
/// Coordinates are world cells with the origin at the bottom-left of the
/// play field and `y` growing upward.  The renderer flips them for the
/// terminal.

use std::time::Duration;

use crate::actions::Tween;
use crate::contact::Responder;

/// Where entities are parked once they must no longer be seen or touched.
pub const OFFSCREEN_X: f32 = -200.0;

/// Points awarded for destroying one enemy.
pub const ENEMY_POINTS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

impl EntityKind {
    /// Half width and half height of the contact box.
    ///
    /// Player and enemy sprites are 3 columns by 2 rows; a projectile is a
    /// single cell.
    pub fn half_extents(self) -> (f32, f32) {
        match self {
            EntityKind::Player => (1.5, 1.0),
            EntityKind::Enemy => (1.5, 1.0),
            EntityKind::Projectile => (0.5, 0.5),
        }
    }
}

/// Size of the play field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn mid_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn max_y(&self) -> f32 {
        self.height
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in cells per second, applied by the physics step.
    pub vy: f32,
    pub alive: bool,
    /// Flagged for removal from the live set at the end of the frame.
    pub removed: bool,
    /// Pending move-to action on `y`; the entity removes itself when it ends.
    pub motion: Option<Tween>,
    /// Set by `on_game_over`; game over reaches each entity exactly once.
    pub game_over_received: bool,
}

impl Entity {
    fn new(id: EntityId, kind: EntityKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            vy: 0.0,
            alive: true,
            removed: false,
            motion: None,
            game_over_received: false,
        }
    }

    pub fn player(id: EntityId, x: f32, y: f32) -> Self {
        Self::new(id, EntityKind::Player, x, y)
    }

    /// An enemy drifting down at `speed` cells per second.
    pub fn enemy(id: EntityId, x: f32, y: f32, speed: f32) -> Self {
        Self {
            vy: -speed,
            ..Self::new(id, EntityKind::Enemy, x, y)
        }
    }

    /// A projectile that travels from `y` to `top_y` over `transit`, then
    /// removes itself whether or not it hit anything.
    pub fn projectile(id: EntityId, x: f32, y: f32, top_y: f32, transit: Duration) -> Self {
        Self {
            motion: Some(Tween::new(y, top_y, transit)),
            ..Self::new(id, EntityKind::Projectile, x, y)
        }
    }

    /// Per-frame hook.  Only enemies care: once fully outside the play
    /// field they are done.
    pub fn update(&mut self, bounds: &Bounds) {
        if self.kind == EntityKind::Enemy && !self.overlaps_field(bounds) {
            self.removed = true;
        }
    }

    /// Whether any part of the contact box is still inside `bounds`.
    pub fn overlaps_field(&self, bounds: &Bounds) -> bool {
        let (half_w, half_h) = self.kind.half_extents();
        self.x + half_w >= 0.0
            && self.x - half_w <= bounds.width
            && self.y + half_h >= 0.0
            && self.y - half_h <= bounds.height
    }

    /// Advance the pending move-to action, if any.
    pub fn step_motion(&mut self, dt: Duration) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        self.y = motion.step(dt);
        if motion.is_finished() {
            self.motion = None;
            self.removed = true;
        }
    }

    /// Called once when the game ends: park off-screen and forget any
    /// movement intent.
    pub fn on_game_over(&mut self) {
        debug_assert!(!self.game_over_received, "game over delivered twice to {:?}", self.id);
        self.x = OFFSCREEN_X;
        self.vy = 0.0;
        self.motion = None;
        self.alive = false;
        self.removed = true;
        self.game_over_received = true;
    }

    /// Killed by a collision.  The player stays in the live set so the
    /// scene can still see it went down.
    pub fn kill(&mut self) {
        self.alive = false;
        if self.kind != EntityKind::Player {
            self.removed = true;
        }
    }

    /// Points awarded for destroying this entity.
    pub fn bounty(&self) -> u32 {
        match self.kind {
            EntityKind::Enemy => ENEMY_POINTS,
            EntityKind::Player | EntityKind::Projectile => 0,
        }
    }

    /// The collision-response capability, if this kind has one.
    pub fn responder(&self) -> Option<Responder> {
        match self.kind {
            EntityKind::Player => None,
            EntityKind::Enemy => Some(Responder::Enemy),
            EntityKind::Projectile => Some(Responder::Projectile),
        }
    }
}
