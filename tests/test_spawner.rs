use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_survival::entities::{Arena, EnemyKind};
use wave_survival::spawner::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn arena() -> Arena {
    Arena::new(1280.0, 720.0)
}

fn outside(p: Vec2, arena: &Arena) -> bool {
    p.x < 0.0 || p.x > arena.width || p.y < 0.0 || p.y > arena.height
}

#[test]
fn wave_size_grows_by_two() {
    assert_eq!(wave_size(1), 6);
    assert_eq!(wave_size(2), 8);
    assert_eq!(wave_size(10), 24);
}

#[test]
fn kind_weights_ramp_tanks_from_wave_three() {
    assert_eq!(kind_weights(1), [60, 30, 12]);
    assert_eq!(kind_weights(2), [60, 32, 12]);
    assert_eq!(kind_weights(3), [60, 34, 15]);
    assert_eq!(kind_weights(6), [60, 40, 24]);
}

#[test]
fn spawn_wave_builds_full_batch_for_wave() {
    let a = arena();
    let enemies = spawn_wave(3, a.center(), &a, &mut seeded_rng());
    assert_eq!(enemies.len(), 10);
    for e in &enemies {
        assert!(e.alive);
        let base = e.kind.stats();
        assert_eq!(e.hp, base.base_hp + 3 * base.hp_per_wave);
    }
}

#[test]
fn spawns_land_outside_the_arena() {
    let a = arena();
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let p = spawn_point_away_from(a.center(), &a, &mut rng);
        assert!(outside(p, &a), "{p:?} is inside the arena");
    }
}

#[test]
fn spawns_keep_distance_from_player_on_the_edge() {
    let a = arena();
    let mut rng = seeded_rng();
    let player = Vec2::new(640.0, 0.0);
    for _ in 0..500 {
        let p = spawn_point_away_from(player, &a, &mut rng);
        assert!(p.distance(player) >= 120.0 - 1e-3, "{p:?} too close");
        assert!(outside(p, &a));
    }
}

#[test]
fn kind_mix_follows_weights() {
    let mut rng = seeded_rng();
    let n = 6000;
    let mut counts = [0usize; 3];
    for _ in 0..n {
        let i = match roll_kind(1, &mut rng) {
            EnemyKind::Basic => 0,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 2,
        };
        counts[i] += 1;
    }
    let frac = |c: usize| c as f64 / n as f64;
    assert!((frac(counts[0]) - 60.0 / 102.0).abs() < 0.03);
    assert!((frac(counts[1]) - 30.0 / 102.0).abs() < 0.03);
    assert!((frac(counts[2]) - 12.0 / 102.0).abs() < 0.03);
}
