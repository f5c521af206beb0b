//! All game entity types: pure data, no logic beyond geometry helpers.

use crate::constants::{
    BULLET_HEIGHT, BULLET_WIDTH, ENEMY_SIZE, PLAYER_SIZE, POWER_UP_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// User-triggered state transitions (screen buttons and the pause key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    TogglePause,
    Resume,
    Restart,
    PlayAgain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Shortens the shot cooldown while active.
    RapidFire,
    /// Nullifies damage from enemy contact while active.
    Shield,
}

/// Something that happened during the most recent tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Shot,
    EnemyKilled,
    PlayerHit,
    PowerUpCollected(PowerUpKind),
    LevelUp(u32),
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Mix `over` on top of `self` with the given opacity (0.0 ..= 1.0).
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |under: u8, top: u8| -> u8 {
            (under as f32 + (top as f32 - under as f32) * a).round() as u8
        };
        Rgb(mix(self.0, over.0), mix(self.1, over.1), mix(self.2, over.2))
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: rectangles that merely touch along an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub bullets: Vec<Bullet>,
    /// Milliseconds timestamp of the last shot; `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub rapid_fire_ms: u32,
    pub shield_ms: u32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn shield_active(&self) -> bool {
        self.shield_ms > 0
    }

    pub fn rapid_fire_active(&self) -> bool {
        self.rapid_fire_ms > 0
    }
}

// ── Enemies & pickups ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub health: u32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

// ── Effects & background ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining ticks.
    pub life: u32,
    /// Life at spawn; `life / max_life` drives the fade.
    pub max_life: u32,
    pub color: Rgb,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    /// Best score seen by this process; survives restarts.
    pub best_score: u32,
    /// `best_score` as it stood when the current session began.
    pub best_at_session_start: u32,
    /// Ticks since the last enemy spawn.
    pub spawn_timer: u32,
    pub frame: u64,
    /// Events raised by the most recent tick.
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// True once this session's score has beaten every earlier session.
    pub fn is_new_best(&self) -> bool {
        self.score > self.best_at_session_start
    }
}
