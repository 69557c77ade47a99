/// The game scene — owns the player, the live entities, the HUD and the
/// spawn timers, and sequences the game from start to the title hand-off.
///
/// Entry points mirror what a host engine calls:
/// * `did_move`          — the scene was presented
/// * `update`            — start of every frame
/// * `evaluate_actions`  — advance timers, motions and fades by one frame
/// * `touch_moved`       — pointer / touch drag
/// * `did_begin_contact` — the physics layer saw two bodies touch
/// * `game_over`         — the life system says the run is over
///
/// Missing optional pieces (no player, no label) are skipped silently; no
/// operation here can fail.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;

use crate::actions::Scheduler;
use crate::config::LevelConfig;
use crate::contact::{dispatch, Contact, ContactEffect};
use crate::entities::{Bounds, Entity, EntityId, EntityKind, OFFSCREEN_X};
use crate::hud::Hud;

/// Height of the player above the bottom of the play field.
pub const PLAYER_OFFSET_Y: f32 = 2.0;
/// Gap between the top of the play field and a fresh enemy.
pub const ENEMY_TOP_MARGIN: f32 = 2.0;
pub const MAIN_LABEL_FADE: Duration = Duration::from_secs(3);
pub const TITLE_DELAY: Duration = Duration::from_secs(3);
pub const TITLE_CROSSFADE: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Loading,
    Playing,
    GameOver,
    /// Handed off to the title scene; nothing left to do here.
    Title,
}

/// Work the scene schedules on its own timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneTask {
    SpawnEnemy,
    FireProjectile,
    PresentTitle,
}

/// Request to present the title scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransition {
    pub width: f32,
    pub height: f32,
    pub crossfade: Duration,
}

// ── Background ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceIdiom {
    Phone,
    Pad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundVariant {
    Phone,
    PadPortrait,
    PadLandscape,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub variant: BackgroundVariant,
    pub x_scale: f32,
    pub y_scale: f32,
}

impl Background {
    pub fn for_screen(idiom: DeviceIdiom, bounds: &Bounds) -> Self {
        let (variant, scale) = match idiom {
            DeviceIdiom::Pad if bounds.height > bounds.width => (BackgroundVariant::PadPortrait, 1.2),
            DeviceIdiom::Pad => (BackgroundVariant::PadLandscape, 1.5),
            DeviceIdiom::Phone => (BackgroundVariant::Phone, 1.2),
        };
        Self {
            variant,
            x_scale: scale,
            y_scale: scale,
        }
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameScene {
    pub bounds: Bounds,
    pub idiom: DeviceIdiom,
    pub config: LevelConfig,
    pub status: GameStatus,
    pub hud: Hud,
    pub background: Option<Background>,
    player: Option<EntityId>,
    entities: BTreeMap<EntityId, Entity>,
    scheduler: Scheduler<SceneTask>,
    next_id: u32,
}

impl GameScene {
    pub fn new(bounds: Bounds, idiom: DeviceIdiom, config: LevelConfig) -> Self {
        if !config.has_valid_speed() {
            log::warn!(
                "enemy speed {} unusable, using {}",
                config.enemy_speed,
                config.descent_speed()
            );
        }
        Self {
            bounds,
            idiom,
            config,
            status: GameStatus::Loading,
            hud: Hud::default(),
            background: None,
            player: None,
            entities: BTreeMap::new(),
            scheduler: Scheduler::new(),
            next_id: 1,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// The scene has been presented: build everything and start playing.
    pub fn did_move(&mut self, rng: &mut impl Rng) {
        if self.status != GameStatus::Loading {
            log::warn!("did_move called in {:?}, ignoring", self.status);
            return;
        }
        self.background = Some(Background::for_screen(self.idiom, &self.bounds));
        self.create_nodes(rng);
        self.start_game();
        self.status = GameStatus::Playing;
        log::info!(
            "Scene started ({}x{}, {:?})",
            self.bounds.width,
            self.bounds.height,
            self.config
        );
    }

    fn create_nodes(&mut self, rng: &mut impl Rng) {
        self.spawn_player();
        self.spawn_enemy(rng);
        self.spawn_projectile();

        self.hud.create_score_label();
        self.hud.create_main_label();
    }

    fn start_game(&mut self) {
        self.scheduler
            .repeat_forever(self.config.projectile_period(), SceneTask::FireProjectile);
        self.scheduler
            .repeat_forever(self.config.enemy_period(), SceneTask::SpawnEnemy);
        self.hud.update_score();
        self.hud.hide_main_label(MAIN_LABEL_FADE);
    }

    /// End the run.  Only meaningful while playing; later calls do nothing.
    pub fn game_over(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.status = GameStatus::GameOver;
        log::info!("Game over, score {}", self.hud.score);

        if self.hud.show_game_over() {
            self.scheduler
                .run_once_after(TITLE_DELAY, SceneTask::PresentTitle);
        }

        // Drop the player reference before anyone hears about game over so
        // a late touch can't move a half torn-down player.
        if let Some(player) = self.player.take().and_then(|id| self.entities.get_mut(&id)) {
            player.x = OFFSCREEN_X;
        }
        for entity in self.entities.values_mut() {
            entity.on_game_over();
        }
    }

    // ── Per-frame ─────────────────────────────────────────────────────────────

    pub fn update(&mut self) {
        let bounds = self.bounds;
        for entity in self.entities.values_mut() {
            entity.update(&bounds);
        }
    }

    /// Advance every running action by `dt`: entity motions first, then
    /// label fades, then the timer queue.  A projectile fired part-way
    /// through the frame starts its transit at its due time.  Returns the
    /// title hand-off when it comes due.
    pub fn evaluate_actions(&mut self, dt: Duration, rng: &mut impl Rng) -> Option<SceneTransition> {
        for entity in self.entities.values_mut() {
            entity.step_motion(dt);
        }
        self.hud.step(dt);

        let mut transition = None;
        for (due, task) in self.scheduler.advance_timed(dt) {
            match task {
                SceneTask::SpawnEnemy => {
                    self.spawn_enemy(rng);
                }
                SceneTask::FireProjectile => {
                    let fired = self.spawn_projectile();
                    if let Some(projectile) = fired.and_then(|id| self.entities.get_mut(&id)) {
                        projectile.step_motion(dt.saturating_sub(due));
                    }
                }
                SceneTask::PresentTitle => transition = self.present_title(),
            }
        }
        transition
    }

    fn present_title(&mut self) -> Option<SceneTransition> {
        if self.status != GameStatus::GameOver {
            return None;
        }
        self.status = GameStatus::Title;
        self.scheduler.cancel_all();
        log::info!("Presenting title scene");
        Some(SceneTransition {
            width: self.bounds.width,
            height: self.bounds.height,
            crossfade: TITLE_CROSSFADE,
        })
    }

    /// Drop every entity flagged for removal.
    pub fn sweep(&mut self) {
        self.entities.retain(|_, e| !e.removed);
        if let Some(id) = self.player {
            if !self.entities.contains_key(&id) {
                self.player = None;
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Move the player to each touch's x.  With no live player, a leftover
    /// player marker is parked off-screen instead; once the reference has
    /// been cleared this does nothing.
    pub fn touch_moved(&mut self, touches: &[f32]) {
        for &touch_x in touches {
            let player = self.player.and_then(|id| self.entities.get_mut(&id));
            match player {
                Some(player) if player.alive => player.x = touch_x,
                Some(player) => player.x = OFFSCREEN_X,
                None => {}
            }
        }
    }

    /// Where a keyboard nudge of `step` should touch: beside the player,
    /// kept inside the play field like a real touch.
    pub fn keyboard_touch(&self, step: f32) -> Option<f32> {
        self.player()
            .map(|p| (p.x + step).clamp(0.0, self.bounds.width))
    }

    // ── Contacts & scoring ────────────────────────────────────────────────────

    /// Route a contact between two bodies and apply its effects.
    pub fn did_begin_contact(&mut self, a: EntityId, b: EntityId) -> Option<Contact> {
        let contact = dispatch(self.entities.get(&a), self.entities.get(&b))?;
        log::debug!("contact {:?} -> {:?}: {:?}", contact.responder, contact.other, contact.effects);

        for effect in &contact.effects {
            match *effect {
                ContactEffect::Destroy(id) | ContactEffect::PlayerDown(id) => {
                    if let Some(entity) = self.entities.get_mut(&id) {
                        entity.kill();
                    }
                }
                ContactEffect::Award(points) => self.killed_enemy_for(points),
            }
        }
        Some(contact)
    }

    pub fn killed_enemy_for(&mut self, points: u32) {
        self.hud.killed_enemy_for(points);
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.insert(id, entity);
        id
    }

    fn spawn_player(&mut self) {
        let id = self.next_id();
        let player = Entity::player(id, self.bounds.mid_x(), PLAYER_OFFSET_Y);
        self.player = Some(self.insert(player));
    }

    /// Spawn an enemy at a random x near the top.  Skipped without a live
    /// player.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) -> Option<EntityId> {
        if !self.player().is_some_and(|p| p.alive) {
            log::trace!("enemy spawn skipped, no live player");
            return None;
        }
        let (half_w, _) = EntityKind::Enemy.half_extents();
        let (lo, hi) = (half_w, self.bounds.width - half_w);
        let x = if lo < hi {
            rng.gen_range(lo..hi)
        } else {
            self.bounds.mid_x()
        };
        let y = self.bounds.max_y() - ENEMY_TOP_MARGIN;

        let id = self.next_id();
        self.insert(Entity::enemy(id, x, y, self.config.descent_speed()));
        log::debug!("spawned enemy {:?} at x={:.1}", id, x);
        Some(id)
    }

    /// Fire a projectile from the player's position toward the top.
    /// Skipped without a player.
    pub fn spawn_projectile(&mut self) -> Option<EntityId> {
        let Some((x, y)) = self.player().map(|p| (p.x, p.y)) else {
            log::trace!("projectile skipped, no player");
            return None;
        };
        let id = self.next_id();
        let projectile = Entity::projectile(
            id,
            x,
            y,
            self.bounds.max_y(),
            self.config.projectile_transit(),
        );
        self.insert(projectile);
        log::debug!("fired projectile {:?} at x={:.1}", id, x);
        Some(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(&id))
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// True once the player has been struck but game over hasn't run yet.
    pub fn is_player_down(&self) -> bool {
        self.player().is_some_and(|p| !p.alive)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Live entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    pub fn score(&self) -> u32 {
        self.hud.score
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }
}
