/// Per-frame simulation of a run.
///
/// Entity movement advances by a fixed step per frame while the wave timer
/// and score advance by elapsed real time, so timers stay frame-rate
/// independent and movement does not. All randomness comes through an
/// injected RNG so callers control determinism.

use rand::Rng;

use crate::consts::*;
use crate::entities::{Arena, Bullet, Enemy, Player};
use crate::input::FrameInput;
use crate::powerups::Meta;
use crate::spawner::spawn_wave;

// ── Run state ─────────────────────────────────────────────────────────────────

/// Everything that belongs to one run. A restart replaces it wholesale.
#[derive(Clone, Debug)]
pub struct RunState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub wave: u32,
    pub wave_time_left: f64,
    pub score: f64,
    pub meta: Meta,
    pub arena: Arena,
}

impl RunState {
    /// An empty run before any wave: no enemies, wave 0.
    pub fn empty(arena: Arena) -> Self {
        Self {
            player: Player::new(&arena),
            bullets: Vec::new(),
            enemies: Vec::new(),
            wave: 0,
            wave_time_left: WAVE_BASE_DURATION,
            score: 0.0,
            meta: Meta::default(),
            arena,
        }
    }
}

/// Fresh run at wave 1 with its enemies already spawned.
pub fn init_run(arena: Arena, rng: &mut impl Rng) -> RunState {
    let mut run = RunState::empty(arena);
    run.wave = 1;
    run.wave_time_left = WAVE_BASE_DURATION;
    run.enemies = spawn_wave(run.wave, run.player.pos, &run.arena, rng);
    log::info!("run started");
    run
}

/// Length of `wave` when it is reached through a pick. Later waves get a
/// little longer, up to a cap.
pub fn wave_duration(wave: u32) -> f64 {
    WAVE_BASE_DURATION + (WAVE_DURATION_PER_WAVE * wave as f64).min(WAVE_DURATION_BONUS_CAP)
}

/// Move on to the next wave and spawn it.
pub fn advance_wave(run: &mut RunState, rng: &mut impl Rng) {
    run.wave += 1;
    run.wave_time_left = wave_duration(run.wave);
    run.enemies = spawn_wave(run.wave, run.player.pos, &run.arena, rng);
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Timer ran out or the arena was cleared.
    WaveEnded,
    PlayerDied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub shots: usize,
    pub kills: usize,
    pub player_hit: bool,
}

/// Advance the run by one frame. `dt` is the real time since the previous
/// frame in seconds.
pub fn tick(run: &mut RunState, input: &FrameInput, dt: f64) -> TickReport {
    let now = input.now;

    // ── 1. Movement ──────────────────────────────────────────────────────────
    run.player.move_by(&input.movement, &run.arena);

    // ── 2. Shooting (clicks, then the held button) ───────────────────────────
    let mut shots = 0;
    for target in input.clicks() {
        if run.player.can_shoot(now) {
            run.bullets.push(run.player.shoot(target, now));
            shots += 1;
        }
    }
    if input.shoot_held && run.player.can_shoot(now) {
        run.bullets.push(run.player.shoot(input.pointer, now));
        shots += 1;
    }

    // ── 3. Bullets ───────────────────────────────────────────────────────────
    for bullet in &mut run.bullets {
        bullet.update(&run.arena);
    }
    run.bullets.retain(|b| b.alive);

    // ── 4. Enemies chase ─────────────────────────────────────────────────────
    let target = run.player.pos;
    for enemy in &mut run.enemies {
        enemy.update(target);
    }

    // ── 5-6. Collisions ──────────────────────────────────────────────────────
    let kills = resolve_bullet_hits(run);
    let player_hit = resolve_contact_damage(run, now);

    // ── 7. Compact ───────────────────────────────────────────────────────────
    run.enemies.retain(|e| e.alive);
    run.bullets.retain(|b| b.alive);

    // ── 8. Timer & score ─────────────────────────────────────────────────────
    run.wave_time_left -= dt;
    run.score += dt * (1.0 + SCORE_WAVE_FACTOR * run.wave as f64);

    let outcome = if run.player.is_dead() {
        TickOutcome::PlayerDied
    } else if run.wave_time_left <= 0.0 || run.enemies.is_empty() {
        TickOutcome::WaveEnded
    } else {
        TickOutcome::Running
    };

    TickReport {
        outcome,
        shots,
        kills,
        player_hit,
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// Bullets against enemies. Each live bullet damages the first live enemy
/// it overlaps, then either spends one pierce and keeps going or dies.
/// Dead entities are only marked here; the caller compacts afterwards.
///
/// Returns the number of enemies killed.
pub fn resolve_bullet_hits(run: &mut RunState) -> usize {
    let RunState {
        player,
        bullets,
        enemies,
        meta,
        ..
    } = run;

    let mut kills = 0;
    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        for enemy in enemies.iter_mut() {
            if !enemy.alive || !enemy.hit_box().overlaps(&bullet.hit_box()) {
                continue;
            }
            if enemy.hit(bullet.damage) {
                kills += 1;
                log::debug!("{} enemy killed", enemy.kind.name());
                if meta.lifesteal {
                    player.heal(LIFESTEAL_HEAL, player.max_hp);
                }
            }
            if bullet.pierce > 0 {
                bullet.pierce -= 1;
            } else {
                bullet.alive = false;
                break;
            }
        }
    }
    kills
}

/// Live enemies touching the player deal contact damage, subject to
/// i-frames and knockback. Returns whether any damage landed.
pub fn resolve_contact_damage(run: &mut RunState, now: f64) -> bool {
    let mut hit = false;
    for enemy in run.enemies.iter().filter(|e| e.alive) {
        if !enemy.hit_box().overlaps(&run.player.hit_box()) {
            continue;
        }
        let landed = run.player.take_damage(
            enemy.damage,
            now,
            Some(enemy.pos),
            CONTACT_KNOCKBACK,
            &run.arena,
        );
        if landed {
            log::debug!(
                "player hit by {} for {}, hp {}",
                enemy.kind.name(),
                enemy.damage,
                run.player.hp
            );
            hit = true;
        }
    }
    hit
}
