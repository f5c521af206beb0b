//! Tuning constants.  All distances are world pixels, all speeds are pixels
//! per tick, and every per-tick amount assumes a ~60 Hz tick.

// ── Play area ─────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Gap between the player's bottom edge and the bottom of the play area at spawn.
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
pub const STARTING_LIVES: u32 = 3;

pub const SHOT_COOLDOWN_MS: u64 = 250;
pub const RAPID_FIRE_COOLDOWN_MS: u64 = 100;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const BULLET_SPEED: f32 = 7.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 40.0;
pub const ENEMY_BASE_SPEED: f32 = 1.5;
pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.5;
/// Spawn interval (ticks) at level 0; shrinks by `SPAWN_INTERVAL_STEP` per level.
pub const SPAWN_INTERVAL_BASE: u32 = 90;
pub const SPAWN_INTERVAL_STEP: u32 = 5;
pub const SPAWN_INTERVAL_FLOOR: u32 = 30;
pub const ENEMY_REWARD: u32 = 100;

// ── Levels ────────────────────────────────────────────────────────────────────

/// Score needed per level: level N ends once score reaches N × this.
pub const LEVEL_SCORE_STEP: u32 = 1000;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: f32 = 30.0;
pub const POWER_UP_SPEED: f32 = 2.0;
pub const POWER_UP_DURATION_MS: u32 = 5000;
/// Milliseconds removed from each active power-up timer per tick (one 60 Hz frame).
pub const POWER_UP_DECAY_MS: u32 = 16;
pub const POWER_UP_DROP_CHANCE: f64 = 0.1;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const EXPLOSION_PARTICLES: usize = 20;
pub const PARTICLE_MIN_SPEED: f32 = 1.0;
pub const PARTICLE_MAX_SPEED: f32 = 4.0;
pub const PARTICLE_MIN_LIFE: u32 = 20;
pub const PARTICLE_MAX_LIFE: u32 = 40;

// ── Background ────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 100;
pub const STAR_MIN_SPEED: f32 = 0.5;
pub const STAR_MAX_SPEED: f32 = 2.0;
pub const CLOUD_COUNT: usize = 5;
pub const CLOUD_MIN_SPEED: f32 = 0.2;
pub const CLOUD_MAX_SPEED: f32 = 0.7;
