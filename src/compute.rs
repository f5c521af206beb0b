//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and tracing.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::constants::*;
use crate::entities::{
    Action, Bullet, Cloud, Enemy, GameEvent, GameState, GameStatus, Particle, Player, PowerUp,
    PowerUpKind, Rgb, Star,
};
use crate::input::Controls;

const ENEMY_EXPLOSION: Rgb = Rgb(255, 140, 0);
const PLAYER_EXPLOSION: Rgb = Rgb(0, 200, 255);

// ── Difficulty tables ────────────────────────────────────────────────────────

pub fn enemy_speed(level: u32) -> f32 {
    ENEMY_BASE_SPEED + ENEMY_SPEED_PER_LEVEL * level.saturating_sub(1) as f32
}

pub fn enemy_health(level: u32) -> u32 {
    1 + level / 3
}

/// Ticks between enemy spawns; shrinks with level down to a floor.
pub fn spawn_interval(level: u32) -> u32 {
    SPAWN_INTERVAL_BASE
        .saturating_sub(SPAWN_INTERVAL_STEP.saturating_mul(level))
        .max(SPAWN_INTERVAL_FLOOR)
}

pub fn shot_cooldown_ms(player: &Player) -> u64 {
    if player.rapid_fire_active() {
        RAPID_FIRE_COOLDOWN_MS
    } else {
        SHOT_COOLDOWN_MS
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn spawn_player() -> Player {
    Player {
        x: (WORLD_WIDTH - PLAYER_SIZE) / 2.0,
        y: WORLD_HEIGHT - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
        bullets: Vec::new(),
        last_shot_ms: None,
        rapid_fire_ms: 0,
        shield_ms: 0,
    }
}

fn random_between(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    low + rng.gen::<f32>() * (high - low)
}

pub fn spawn_stars(rng: &mut impl Rng) -> Vec<Star> {
    (0..STAR_COUNT)
        .map(|_| Star {
            x: rng.gen::<f32>() * WORLD_WIDTH,
            y: rng.gen::<f32>() * WORLD_HEIGHT,
            size: random_between(rng, 0.5, 2.0),
            speed: random_between(rng, STAR_MIN_SPEED, STAR_MAX_SPEED),
        })
        .collect()
}

pub fn spawn_clouds(rng: &mut impl Rng) -> Vec<Cloud> {
    (0..CLOUD_COUNT)
        .map(|_| Cloud {
            x: rng.gen::<f32>() * WORLD_WIDTH,
            y: rng.gen::<f32>() * WORLD_HEIGHT,
            width: random_between(rng, 80.0, 160.0),
            height: random_between(rng, 30.0, 50.0),
            speed: random_between(rng, CLOUD_MIN_SPEED, CLOUD_MAX_SPEED),
        })
        .collect()
}

/// Build the state shown on the start screen.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        status: GameStatus::Start,
        player: spawn_player(),
        enemies: Vec::new(),
        particles: Vec::new(),
        power_ups: Vec::new(),
        stars: spawn_stars(rng),
        clouds: spawn_clouds(rng),
        score: 0,
        level: 1,
        lives: STARTING_LIVES,
        best_score: 0,
        best_at_session_start: 0,
        spawn_timer: 0,
        frame: 0,
        events: Vec::new(),
    }
}

/// Fresh play session: counters reset, transient entities cleared.
/// Background decoration and the session best score carry over.
pub fn reset(state: &GameState) -> GameState {
    let best_score = state.best_score.max(state.score);
    GameState {
        status: GameStatus::Playing,
        player: spawn_player(),
        enemies: Vec::new(),
        particles: Vec::new(),
        power_ups: Vec::new(),
        score: 0,
        level: 1,
        lives: STARTING_LIVES,
        best_score,
        best_at_session_start: best_score,
        spawn_timer: 0,
        frame: 0,
        events: Vec::new(),
        ..state.clone()
    }
}

// ── User-driven state transitions (pure) ─────────────────────────────────────

/// Apply a screen action.  Actions that make no sense for the current screen
/// leave the state untouched.
pub fn apply_action(state: &GameState, action: Action) -> GameState {
    let status = match (state.status, action) {
        (GameStatus::Start, Action::Start)
        | (GameStatus::Paused, Action::Restart)
        | (GameStatus::GameOver, Action::PlayAgain) => {
            info!(from = ?state.status, ?action, "new play session");
            return reset(state);
        }
        (GameStatus::Playing, Action::TogglePause) => GameStatus::Paused,
        (GameStatus::Paused, Action::TogglePause) | (GameStatus::Paused, Action::Resume) => {
            GameStatus::Playing
        }
        _ => {
            trace!(status = ?state.status, ?action, "action ignored");
            return state.clone();
        }
    };
    info!(from = ?state.status, to = ?status, "status change");
    GameState {
        status,
        ..state.clone()
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

/// Push a burst of `EXPLOSION_PARTICLES` particles centred on (x, y).
pub fn spawn_explosion(
    particles: &mut Vec<Particle>,
    x: f32,
    y: f32,
    color: Rgb,
    rng: &mut impl Rng,
) {
    for _ in 0..EXPLOSION_PARTICLES {
        let angle = rng.gen::<f32>() * TAU;
        let speed = random_between(rng, PARTICLE_MIN_SPEED, PARTICLE_MAX_SPEED);
        let span = (PARTICLE_MAX_LIFE - PARTICLE_MIN_LIFE + 1) as f32;
        let life = (PARTICLE_MIN_LIFE + (rng.gen::<f32>() * span) as u32).min(PARTICLE_MAX_LIFE);
        particles.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life,
            max_life: life,
            color,
        });
    }
}

// ── Per-frame tick (nearly pure: RNG and clock are injected) ─────────────

/// Advance the simulation by one frame.  `now_ms` is the driver's clock, used
/// only for the shot cooldown.  All randomness comes through `rng` so callers
/// control determinism.  Outside `Playing` this is a no-op.
pub fn tick(
    state: &GameState,
    controls: &Controls,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.events.clear();
    next.frame += 1;

    // ── 1-3. Player ──────────────────────────────────────────────────────────
    move_player(&mut next.player, controls);
    if controls.fire {
        try_shoot(&mut next, now_ms);
    }
    decay_power_ups(&mut next.player);

    // ── 4-6. Spawning and movement ───────────────────────────────────────────
    spawn_enemies(&mut next, rng);
    next.enemies.iter_mut().for_each(|e| e.y += e.speed);
    next.enemies.retain(|e| e.y <= WORLD_HEIGHT);
    next.player.bullets.iter_mut().for_each(|b| b.y -= BULLET_SPEED);
    next.player.bullets.retain(|b| b.y + BULLET_HEIGHT >= 0.0);

    // ── 7. Collisions ────────────────────────────────────────────────────────
    resolve_bullet_hits(&mut next, rng);
    resolve_player_hits(&mut next, rng);

    // ── 8-10. Effects, pickups, background ───────────────────────────────────
    advance_particles(&mut next.particles);
    collect_power_ups(&mut next);
    advance_background(&mut next, rng);

    // ── 11. Level-up (at most one level per tick) ────────────────────────────
    if next.score >= next.level.saturating_mul(LEVEL_SCORE_STEP) {
        next.level += 1;
        info!(level = next.level, score = next.score, "level up");
        next.events.push(GameEvent::LevelUp(next.level));
    }

    next.best_score = next.best_score.max(next.score);
    next
}

fn move_player(player: &mut Player, controls: &Controls) {
    if controls.left {
        player.x -= PLAYER_SPEED;
    }
    if controls.right {
        player.x += PLAYER_SPEED;
    }
    if controls.up {
        player.y -= PLAYER_SPEED;
    }
    if controls.down {
        player.y += PLAYER_SPEED;
    }
    player.x = player.x.clamp(0.0, WORLD_WIDTH - PLAYER_SIZE);
    player.y = player.y.clamp(0.0, WORLD_HEIGHT - PLAYER_SIZE);
}

fn try_shoot(state: &mut GameState, now_ms: u64) {
    let player = &mut state.player;
    let ready = match player.last_shot_ms {
        Some(last) => now_ms.saturating_sub(last) >= shot_cooldown_ms(player),
        None => true,
    };
    if !ready {
        return;
    }
    player.bullets.push(Bullet {
        x: player.x + PLAYER_SIZE / 2.0 - BULLET_WIDTH / 2.0,
        y: player.y,
    });
    player.last_shot_ms = Some(now_ms);
    state.events.push(GameEvent::Shot);
}

fn decay_power_ups(player: &mut Player) {
    player.rapid_fire_ms = player.rapid_fire_ms.saturating_sub(POWER_UP_DECAY_MS);
    player.shield_ms = player.shield_ms.saturating_sub(POWER_UP_DECAY_MS);
}

fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    state.spawn_timer += 1;
    if state.spawn_timer <= spawn_interval(state.level) {
        return;
    }
    let enemy = Enemy {
        x: rng.gen::<f32>() * (WORLD_WIDTH - ENEMY_SIZE),
        y: -ENEMY_SIZE,
        speed: enemy_speed(state.level),
        health: enemy_health(state.level),
    };
    debug!(x = enemy.x, health = enemy.health, "enemy spawned");
    state.enemies.push(enemy);
    state.spawn_timer = 0;
}

/// Run one collision pass (bullets against enemies, then enemies against the
/// player) without moving anything.
pub fn resolve_collisions(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    resolve_bullet_hits(&mut next, rng);
    resolve_player_hits(&mut next, rng);
    next
}

/// Bullets are scanned oldest first; each one strikes the earliest-spawned
/// live enemy it overlaps and is consumed.  Enemies that drop to zero health
/// are removed afterwards, in spawn order.
fn resolve_bullet_hits(state: &mut GameState, rng: &mut impl Rng) {
    let enemies = &mut state.enemies;
    state.player.bullets.retain(|bullet| {
        let rect = bullet.rect();
        match enemies
            .iter_mut()
            .find(|e| e.health > 0 && rect.overlaps(&e.rect()))
        {
            Some(enemy) => {
                enemy.health -= 1;
                false
            }
            None => true,
        }
    });

    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut state.enemies)
            .into_iter()
            .partition(|e| e.health == 0);
    state.enemies = alive;

    for enemy in dead {
        state.score += ENEMY_REWARD;
        let (cx, cy) = enemy.rect().center();
        spawn_explosion(&mut state.particles, cx, cy, ENEMY_EXPLOSION, rng);
        state.events.push(GameEvent::EnemyKilled);
        debug!(x = cx, y = cy, score = state.score, "enemy destroyed");

        if rng.gen_bool(POWER_UP_DROP_CHANCE) {
            let kind = if rng.gen_bool(0.5) {
                PowerUpKind::RapidFire
            } else {
                PowerUpKind::Shield
            };
            state.power_ups.push(PowerUp {
                x: cx - POWER_UP_SIZE / 2.0,
                y: enemy.y,
                kind,
            });
            debug!(?kind, "power-up dropped");
        }
    }
}

/// Enemies touching the player are always removed; damage is skipped while
/// the shield is up.  Stops as soon as the last life is gone.
fn resolve_player_hits(state: &mut GameState, rng: &mut impl Rng) {
    let player_rect = state.player.rect();
    let mut i = 0;
    while i < state.enemies.len() {
        if !state.enemies[i].rect().overlaps(&player_rect) {
            i += 1;
            continue;
        }
        state.enemies.remove(i);

        if state.player.shield_active() {
            trace!("shield absorbed enemy contact");
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        let (cx, cy) = player_rect.center();
        spawn_explosion(&mut state.particles, cx, cy, PLAYER_EXPLOSION, rng);
        state.events.push(GameEvent::PlayerHit);
        debug!(lives = state.lives, "player hit");

        if state.lives == 0 {
            state.status = GameStatus::GameOver;
            state.events.push(GameEvent::GameOver);
            info!(score = state.score, level = state.level, "game over");
            break;
        }
    }
}

fn advance_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

fn collect_power_ups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();

    for p in state.power_ups.iter_mut() {
        p.y += POWER_UP_SPEED;
    }
    state.power_ups.retain(|p| {
        if p.y > WORLD_HEIGHT {
            return false;
        }
        if p.rect().overlaps(&player_rect) {
            collected.push(p.kind);
            return false;
        }
        true
    });

    for kind in collected {
        match kind {
            PowerUpKind::RapidFire => state.player.rapid_fire_ms = POWER_UP_DURATION_MS,
            PowerUpKind::Shield => state.player.shield_ms = POWER_UP_DURATION_MS,
        }
        debug!(?kind, "power-up collected");
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn advance_background(state: &mut GameState, rng: &mut impl Rng) {
    for star in state.stars.iter_mut() {
        star.y += star.speed;
        if star.y > WORLD_HEIGHT {
            star.y = 0.0;
            star.x = rng.gen::<f32>() * WORLD_WIDTH;
        }
    }
    for cloud in state.clouds.iter_mut() {
        cloud.x += cloud.speed;
        if cloud.x > WORLD_WIDTH {
            cloud.x = -cloud.width;
        }
    }
}
