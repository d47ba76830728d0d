//! Gameplay tuning constants.
//!
//! Distances are world units, speeds are world units per frame and
//! durations are seconds.

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const PLAYER_MAX_HP: i32 = 100;
pub const PLAYER_MOVE_SPEED: f32 = 6.0;
/// Seconds between shots.
pub const PLAYER_FIRE_RATE: f64 = 0.25;
pub const PLAYER_BULLET_SPEED: f32 = 15.0;
pub const PLAYER_BULLET_DAMAGE: i32 = 20;
pub const PLAYER_I_FRAMES: f64 = 0.8;
/// How long the damage flash stays visible.
pub const PLAYER_FLASH_DURATION: f64 = 0.12;
pub const KNOCKBACK_RESIST_MAX: f32 = 0.9;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_RADIUS: f32 = 5.0;
/// Half-extent of the square a bullet is hit-tested as.
pub const BULLET_HIT_HALF: f32 = 4.0;
/// Bullets die this far outside the arena.
pub const BULLET_OFFSCREEN_MARGIN: f32 = 50.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Knockback applied to the player on enemy contact.
pub const CONTACT_KNOCKBACK: f32 = 7.0;
/// Heal granted per kill while lifesteal is active.
pub const LIFESTEAL_HEAL: i32 = 2;

// ── Spawning ──────────────────────────────────────────────────────────────────

pub const WAVE_BASE_ENEMIES: usize = 4;
pub const WAVE_ENEMIES_PER_WAVE: usize = 2;
/// Distance outside the arena edge that enemies appear at.
pub const SPAWN_EDGE_OFFSET: f32 = 40.0;
/// Spawn points keep this distance from both corners of their edge.
pub const SPAWN_EDGE_INSET: f32 = 60.0;
/// Minimum spawn distance from the player.
pub const SPAWN_PLAYER_MARGIN: f32 = 120.0;

// ── Waves & scoring ───────────────────────────────────────────────────────────

pub const WAVE_BASE_DURATION: f64 = 18.0;
pub const WAVE_DURATION_PER_WAVE: f64 = 1.2;
pub const WAVE_DURATION_BONUS_CAP: f64 = 10.0;
/// Score per second grows by this fraction per wave.
pub const SCORE_WAVE_FACTOR: f64 = 0.1;

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;
pub const DEFAULT_FPS: u32 = 60;
