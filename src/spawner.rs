//! Wave composition and spawn placement.
//!
//! A wave is spawned once, as a single batch, just outside the arena edges.

use glam::Vec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::consts::*;
use crate::entities::{Arena, Enemy, EnemyKind};

/// Number of enemies in `wave`.
pub fn wave_size(wave: u32) -> usize {
    WAVE_BASE_ENEMIES + WAVE_ENEMIES_PER_WAVE * wave as usize
}

/// Relative weights for `[Basic, Fast, Tank]`. Tanks ramp up from wave 3.
pub fn kind_weights(wave: u32) -> [u32; 3] {
    [60, 28 + 2 * wave, 12 + 3 * wave.saturating_sub(2)]
}

pub fn roll_kind(wave: u32, rng: &mut impl Rng) -> EnemyKind {
    match WeightedIndex::new(kind_weights(wave)) {
        Ok(dist) => EnemyKind::ALL[dist.sample(rng)],
        Err(_) => EnemyKind::Basic,
    }
}

/// Uniform coordinate along an edge of length `len`, away from its corners.
fn along_edge(len: f32, rng: &mut impl Rng) -> f32 {
    let hi = (len - SPAWN_EDGE_INSET).max(SPAWN_EDGE_INSET);
    rng.gen_range(SPAWN_EDGE_INSET..=hi)
}

/// A point just outside a random arena edge, pushed away from `player` if
/// it would land too close.
pub fn spawn_point_away_from(player: Vec2, arena: &Arena, rng: &mut impl Rng) -> Vec2 {
    let mut p = match rng.gen_range(0..4) {
        0 => Vec2::new(along_edge(arena.width, rng), -SPAWN_EDGE_OFFSET),
        1 => Vec2::new(along_edge(arena.width, rng), arena.height + SPAWN_EDGE_OFFSET),
        2 => Vec2::new(-SPAWN_EDGE_OFFSET, along_edge(arena.height, rng)),
        _ => Vec2::new(arena.width + SPAWN_EDGE_OFFSET, along_edge(arena.height, rng)),
    };

    if p.distance(player) < SPAWN_PLAYER_MARGIN {
        let away = (p - player).normalize_or_zero();
        let away = if away == Vec2::ZERO { Vec2::NEG_Y } else { away };
        p += away * SPAWN_PLAYER_MARGIN;
    }
    p
}

/// Spawn the full batch for `wave`.
pub fn spawn_wave(wave: u32, player: Vec2, arena: &Arena, rng: &mut impl Rng) -> Vec<Enemy> {
    let enemies: Vec<Enemy> = (0..wave_size(wave))
        .map(|_| {
            let kind = roll_kind(wave, rng);
            let pos = spawn_point_away_from(player, arena, rng);
            Enemy::new(kind, pos, wave)
        })
        .collect();

    log::info!(
        "wave {} spawned: {} enemies ({} tank)",
        wave,
        enemies.len(),
        enemies.iter().filter(|e| e.kind == EnemyKind::Tank).count()
    );
    enemies
}
