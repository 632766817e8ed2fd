//! The simulation engine: a fixed-tick stepper owning all run state.
//!
//! The engine is driven externally — `tick` at the 20 ms cadence,
//! `countdown_tick` once per second — and mutated between ticks by key
//! edges. All randomness is injected through `&mut impl Rng`, so a seeded
//! RNG makes every run deterministic.

pub mod entities;

use std::time::SystemTime;

use crossterm::event::KeyCode;
use log::info;
use rand::Rng;

use self::entities::{
    spawn_formation, Arena, Bullet, Enemy, Ship, BULLET_WIDTH, ROW_POINTS, SHIP_SIZE,
};

/// Units the ship moves per held intent flag per tick.
const PLAYER_STEP: f32 = 5.0;
/// Player shot speed in arena units per second.
const SHOT_SPEED: f32 = 300.0;
const SIN_25: f32 = 0.4226;
const COS_25: f32 = 0.9063;
/// Initial magnitude of the shared formation velocity, both axes.
const FORMATION_SPEED: f32 = 50.0;
const ENEMY_BULLET_SPEED: f32 = 200.0;
/// Velocities are per-second; ticks arrive every 20 ms.
const TIME_DIVISOR: f32 = 50.0;
/// Chance per tick that the formation returns fire.
const ENEMY_FIRE_CHANCE: f64 = 0.02;
/// No new enemy shot while the newest one is still above this arena fraction.
pub const ENEMY_FIRE_GATE: f32 = 0.75;
/// Bullets are culled this far beyond the arena edge.
const CULL_MARGIN: f32 = 10.0;
const SPEED_UP_DELTA: f32 = 20.0;
const MAX_SPEED_UPS: u32 = 4;
const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Win,
    Lost,
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Ended(EndReason),
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Key that fires; matched case-insensitively for letters. Space is ' '.
    pub fire_key: char,
    pub time_limit_secs: u32,
    pub ship_color: (u8, u8, u8),
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig { fire_key: ' ', time_limit_secs: 120, ship_color: (80, 255, 80) }
    }
}

/// What the HUD shows each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub seconds: u32,
}

/// Handed to the shell exactly once when a run ends.
#[derive(Clone, Debug)]
pub struct RunRecord {
    pub reason: EndReason,
    pub final_score: u32,
    pub started_at: SystemTime,
    pub ended_at: SystemTime,
}

/// All mutable state of one run.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Ship,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Shared formation velocity, signed.
    pub vx: f32,
    pub vy: f32,
    pub enemy_bullet_speed: f32,
    pub score: u32,
    pub lives: u32,
    /// Remaining seconds.
    pub timer: u32,
    pub speed_ups: u32,
}

impl World {
    fn empty(arena: &Arena) -> Self {
        World {
            player: Ship::at_spawn(0.0, arena.height - SHIP_SIZE),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            vx: 0.0,
            vy: 0.0,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            score: 0,
            lives: STARTING_LIVES,
            timer: 0,
            speed_ups: 0,
        }
    }
}

pub struct Engine {
    arena: Arena,
    config: RunConfig,
    state: RunState,
    world: World,
    fire_cooldown: bool,
    started_at: SystemTime,
    outcome: Option<RunRecord>,
}

impl Engine {
    pub fn new(width: f32, height: f32) -> Self {
        let arena = Arena::new(width, height);
        Engine {
            world: World::empty(&arena),
            arena,
            config: RunConfig::default(),
            state: RunState::Idle,
            fire_cooldown: false,
            started_at: SystemTime::now(),
            outcome: None,
        }
    }

    /// Reset everything and begin a run. The ship spawns at a random x along
    /// the bottom edge; the formation drifts in a random initial direction.
    pub fn start(&mut self, config: RunConfig, rng: &mut impl Rng) {
        let spawn_x = rng.gen::<f32>() * (self.arena.width - SHIP_SIZE);
        let spawn_y = self.arena.height - SHIP_SIZE;
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.world = World {
            player: Ship::at_spawn(spawn_x, spawn_y),
            enemies: spawn_formation(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            vx: FORMATION_SPEED * sign,
            vy: FORMATION_SPEED * sign,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            score: 0,
            lives: STARTING_LIVES,
            timer: config.time_limit_secs,
            speed_ups: 0,
        };
        self.fire_cooldown = false;
        self.started_at = SystemTime::now();
        self.outcome = None;
        info!(
            "run started: {}s limit, fire key {:?}",
            config.time_limit_secs, config.fire_key
        );
        self.config = config;
        self.state = RunState::Running;
    }

    /// Abandon a run without producing a record (leaving the game screen).
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            info!("run cancelled at score {}", self.world.score);
        }
        self.state = RunState::Idle;
        self.outcome = None;
    }

    pub fn on_key_down(&mut self, key: KeyCode) {
        if self.state != RunState::Running {
            return;
        }
        if self.matches_fire_key(key) && !self.fire_cooldown {
            self.fire();
            self.fire_cooldown = true;
        }
        match key {
            KeyCode::Left => self.world.player.left = true,
            KeyCode::Right => self.world.player.right = true,
            KeyCode::Up => self.world.player.up = true,
            KeyCode::Down => self.world.player.down = true,
            _ => {}
        }
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        if self.state != RunState::Running {
            return;
        }
        if self.matches_fire_key(key) {
            self.fire_cooldown = false;
        }
        match key {
            KeyCode::Left => self.world.player.left = false,
            KeyCode::Right => self.world.player.right = false,
            KeyCode::Up => self.world.player.up = false,
            KeyCode::Down => self.world.player.down = false,
            _ => {}
        }
    }

    /// Advance the simulation by one 20 ms step.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.state != RunState::Running {
            return;
        }
        self.move_player();
        self.move_formation();
        if rng.gen_bool(ENEMY_FIRE_CHANCE) {
            self.enemy_fire(rng);
        }
        self.move_bullets();
        self.cull_bullets();
        self.resolve_collisions();
    }

    /// One second of countdown: timer, and on every fifth remaining second a
    /// speed-up while under the cap. In-flight enemy bullets pick up the
    /// delta too, matching the formation and the base speed.
    pub fn countdown_tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        let w = &mut self.world;
        w.timer = w.timer.saturating_sub(1);
        if w.timer == 0 {
            self.end(EndReason::Time);
            return;
        }
        if w.timer % 5 == 0 && w.speed_ups < MAX_SPEED_UPS {
            w.vx += if w.vx > 0.0 { SPEED_UP_DELTA } else { -SPEED_UP_DELTA };
            w.vy += if w.vy > 0.0 { SPEED_UP_DELTA } else { -SPEED_UP_DELTA };
            w.enemy_bullet_speed += SPEED_UP_DELTA;
            for b in &mut w.enemy_bullets {
                b.vy += SPEED_UP_DELTA;
            }
            w.speed_ups += 1;
            info!(
                "speed-up {}/{}: formation ({:.0}, {:.0})",
                w.speed_ups, MAX_SPEED_UPS, w.vx, w.vy
            );
        }
    }

    fn matches_fire_key(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => c.eq_ignore_ascii_case(&self.config.fire_key),
            _ => false,
        }
    }

    fn fire(&mut self) {
        let p = &self.world.player;
        let mut vx = 0.0;
        let mut vy = -SHOT_SPEED;
        // Exactly one of left/right held angles the shot ~25 degrees.
        if p.left != p.right {
            let side = if p.left { -1.0 } else { 1.0 };
            vx = side * SHOT_SPEED * SIN_25;
            vy = -SHOT_SPEED * COS_25;
        }
        self.world.player_bullets.push(Bullet {
            x: p.x + SHIP_SIZE / 2.0 - BULLET_WIDTH / 2.0,
            y: p.y,
            vx,
            vy,
        });
    }

    fn enemy_fire(&mut self, rng: &mut impl Rng) {
        let w = &mut self.world;
        if let Some(last) = w.enemy_bullets.last() {
            if last.y < self.arena.height * ENEMY_FIRE_GATE {
                return;
            }
        }
        if w.enemies.is_empty() {
            return;
        }
        let shooter = &w.enemies[rng.gen_range(0..w.enemies.len())];
        w.enemy_bullets.push(Bullet {
            x: shooter.x + SHIP_SIZE / 2.0 - BULLET_WIDTH / 2.0,
            y: shooter.y + SHIP_SIZE,
            vx: 0.0,
            vy: w.enemy_bullet_speed,
        });
    }

    fn move_player(&mut self) {
        let p = &mut self.world.player;
        if p.left {
            p.x -= PLAYER_STEP;
        }
        if p.right {
            p.x += PLAYER_STEP;
        }
        if p.up {
            p.y -= PLAYER_STEP;
        }
        if p.down {
            p.y += PLAYER_STEP;
        }
        p.x = p.x.clamp(0.0, self.arena.width - SHIP_SIZE);
        p.y = p.y.clamp(self.arena.player_zone_top(), self.arena.height - SHIP_SIZE);
    }

    /// Bounce check against projected positions, then move — the flip and
    /// the move land in the same tick, so the formation never pokes past a
    /// boundary for a frame.
    fn move_formation(&mut self) {
        let w = &mut self.world;
        let dx = w.vx / TIME_DIVISOR;
        let dy = w.vy / TIME_DIVISOR;
        let mut flip_x = false;
        let mut flip_y = false;
        for e in &w.enemies {
            if e.x + dx <= 0.0 || e.x + SHIP_SIZE + dx >= self.arena.width {
                flip_x = true;
            }
            if e.y + dy <= 0.0 || e.y + SHIP_SIZE + dy >= self.arena.top_zone_bottom() {
                flip_y = true;
            }
        }
        if flip_x {
            w.vx = -w.vx;
        }
        if flip_y {
            w.vy = -w.vy;
        }
        let dx = w.vx / TIME_DIVISOR;
        let dy = w.vy / TIME_DIVISOR;
        for e in &mut w.enemies {
            e.x += dx;
            e.y += dy;
        }
    }

    fn move_bullets(&mut self) {
        let w = &mut self.world;
        for b in w.player_bullets.iter_mut().chain(w.enemy_bullets.iter_mut()) {
            b.x += b.vx / TIME_DIVISOR;
            b.y += b.vy / TIME_DIVISOR;
        }
    }

    fn cull_bullets(&mut self) {
        let (aw, ah) = (self.arena.width, self.arena.height);
        self.world
            .player_bullets
            .retain(|b| b.y > -CULL_MARGIN && b.x > -CULL_MARGIN && b.x < aw + CULL_MARGIN);
        self.world.enemy_bullets.retain(|b| b.y < ah + CULL_MARGIN);
    }

    fn resolve_collisions(&mut self) {
        let w = &mut self.world;

        // Player bullets vs enemies. Hits go into removal sets first; each
        // bullet kills at most one enemy and each enemy dies at most once,
        // however many overlaps this tick produced.
        let mut spent_bullets: Vec<usize> = Vec::new();
        let mut dead_enemies: Vec<usize> = Vec::new();
        for (bi, bullet) in w.player_bullets.iter().enumerate() {
            let brect = bullet.rect();
            for (ei, enemy) in w.enemies.iter().enumerate() {
                if dead_enemies.contains(&ei) {
                    continue;
                }
                if brect.intersects(&enemy.rect()) {
                    w.score += ROW_POINTS[enemy.row];
                    dead_enemies.push(ei);
                    spent_bullets.push(bi);
                    break;
                }
            }
        }
        if !dead_enemies.is_empty() {
            let mut i = 0;
            w.player_bullets.retain(|_| {
                let keep = !spent_bullets.contains(&i);
                i += 1;
                keep
            });
            let mut i = 0;
            w.enemies.retain(|_| {
                let keep = !dead_enemies.contains(&i);
                i += 1;
                keep
            });
        }

        // Enemy bullets vs the player: one life per overlapping bullet, then
        // a single respawn with cleared intents.
        let player_rect = w.player.rect();
        let mut hits: Vec<usize> = Vec::new();
        for (bi, bullet) in w.enemy_bullets.iter().enumerate() {
            if bullet.rect().intersects(&player_rect) {
                hits.push(bi);
            }
        }
        if !hits.is_empty() {
            let mut i = 0;
            w.enemy_bullets.retain(|_| {
                let keep = !hits.contains(&i);
                i += 1;
                keep
            });
            for _ in &hits {
                w.lives = w.lives.saturating_sub(1);
            }
            w.player.reset_to_spawn();
            if w.lives == 0 {
                self.end(EndReason::Lost);
                return;
            }
        }

        if self.world.enemies.is_empty() {
            self.end(EndReason::Win);
        }
    }

    fn end(&mut self, reason: EndReason) {
        if self.state != RunState::Running {
            return;
        }
        self.state = RunState::Ended(reason);
        self.outcome = Some(RunRecord {
            reason,
            final_score: self.world.score,
            started_at: self.started_at,
            ended_at: SystemTime::now(),
        });
        info!("run ended: {:?}, score {}", reason, self.world.score);
    }

    // ── Snapshot access for the shell ──────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access (for testing).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ship_color(&self) -> (u8, u8, u8) {
        self.config.ship_color
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.world.score,
            lives: self.world.lives,
            seconds: self.world.timer,
        }
    }

    /// The run record, handed out once after the run ends.
    pub fn take_outcome(&mut self) -> Option<RunRecord> {
        self.outcome.take()
    }
}
