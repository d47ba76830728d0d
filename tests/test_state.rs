use std::collections::HashSet;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_survival::compute::wave_duration;
use wave_survival::input::{FrameInput, InputEvent, Key};
use wave_survival::snapshot::ScreenView;
use wave_survival::state::*;
use wave_survival::GameConfig;

fn new_game(config: GameConfig) -> Game<StdRng> {
    Game::with_rng(config, StdRng::seed_from_u64(42))
}

fn key(now: f64, k: Key) -> FrameInput {
    FrameInput::at(now).with_event(InputEvent::Key(k))
}

/// Game that has just left the start screen at t = 0.
fn playing_game(config: GameConfig) -> Game<StdRng> {
    let mut game = new_game(config);
    assert_eq!(game.update(&key(0.0, Key::Other)), Flow::Continue);
    assert_eq!(game.screen(), &Screen::Playing);
    game
}

fn pick_options(game: &Game<StdRng>) -> [wave_survival::powerups::Powerup; 3] {
    match game.screen() {
        Screen::PowerupPick { options } => *options,
        other => panic!("expected powerup pick, got {other:?}"),
    }
}

// ── transition table ──────────────────────────────────────────────────────────

#[test]
fn transition_table() {
    use ScreenKind::*;
    assert_eq!(next_screen(Start, Trigger::AnyKey), Some(Playing));
    assert_eq!(next_screen(Start, Trigger::Restart), None);
    assert_eq!(next_screen(Playing, Trigger::WaveEnded), Some(PowerupPick));
    assert_eq!(next_screen(Playing, Trigger::FinalWaveEnded), Some(Won));
    assert_eq!(next_screen(Playing, Trigger::PlayerDied), Some(GameOver));
    assert_eq!(next_screen(Playing, Trigger::Restart), Some(Playing));
    assert_eq!(next_screen(PowerupPick, Trigger::Picked(2)), Some(Playing));
    assert_eq!(next_screen(PowerupPick, Trigger::Picked(3)), None);
    assert_eq!(next_screen(PowerupPick, Trigger::Restart), None);
    assert_eq!(next_screen(GameOver, Trigger::Restart), Some(Playing));
    assert_eq!(next_screen(GameOver, Trigger::AnyKey), None);
    assert_eq!(next_screen(Won, Trigger::Restart), Some(Playing));
}

#[test]
fn illegal_trigger_is_ignored() {
    let mut game = new_game(GameConfig::default());
    assert!(!game.fire(Trigger::PlayerDied));
    assert_eq!(game.screen(), &Screen::Start);
}

// ── start ─────────────────────────────────────────────────────────────────────

#[test]
fn start_waits_for_a_key() {
    let mut game = new_game(GameConfig::default());
    game.update(&FrameInput::at(0.0));
    game.update(&FrameInput::at(0.1).with_event(InputEvent::Click(Vec2::ZERO)));
    assert_eq!(game.screen(), &Screen::Start);

    game.update(&key(0.2, Key::Other));
    assert_eq!(game.screen(), &Screen::Playing);
    let run = game.run();
    assert_eq!(run.wave, 1);
    assert_eq!(run.enemies.len(), 6);
    assert_eq!(run.wave_time_left, 18.0);
}

#[test]
fn quit_is_accepted_everywhere() {
    let mut game = new_game(GameConfig::default());
    assert_eq!(game.update(&key(0.0, Key::Quit)), Flow::Quit);

    let mut game = playing_game(GameConfig::default());
    assert_eq!(game.update(&key(0.1, Key::Quit)), Flow::Quit);

    game.run_mut().wave_time_left = 0.0;
    game.update(&FrameInput::at(0.2));
    assert!(matches!(game.screen(), Screen::PowerupPick { .. }));
    assert_eq!(game.update(&key(0.3, Key::Quit)), Flow::Quit);
}

// ── wave end ──────────────────────────────────────────────────────────────────

#[test]
fn timeout_ends_wave_with_enemies_alive() {
    let mut game = playing_game(GameConfig::default());
    game.run_mut().wave_time_left = 0.01;
    game.update(&FrameInput::at(0.05));

    assert!(matches!(game.screen(), Screen::PowerupPick { .. }));
    assert!(!game.run().enemies.is_empty());
}

#[test]
fn clear_ends_wave_with_time_left() {
    let mut game = playing_game(GameConfig::default());
    for e in &mut game.run_mut().enemies {
        e.alive = false;
    }
    game.update(&FrameInput::at(0.016));

    assert!(matches!(game.screen(), Screen::PowerupPick { .. }));
    assert!(game.run().wave_time_left > 0.0);
}

#[test]
fn pick_freezes_the_simulation() {
    let mut game = playing_game(GameConfig::default());
    game.run_mut().wave_time_left = 0.0;
    game.update(&FrameInput::at(0.016));
    let frozen = game.run().clone();

    for i in 1..60 {
        let mut input = FrameInput::at(0.016 + i as f64 * 0.016);
        input.movement.right = true;
        input.shoot_held = true;
        game.update(&input);
    }

    let run = game.run();
    assert_eq!(run.wave_time_left, frozen.wave_time_left);
    assert_eq!(run.score, frozen.score);
    assert_eq!(run.player, frozen.player);
    assert_eq!(run.enemies, frozen.enemies);
    assert!(run.bullets.is_empty());
}

#[test]
fn picking_applies_and_starts_next_wave() {
    let mut game = playing_game(GameConfig::default());
    game.run_mut().wave_time_left = 0.0;
    game.update(&FrameInput::at(0.016));
    let options = pick_options(&game);

    // Out-of-range and unrelated keys do nothing.
    game.update(&key(0.1, Key::Other));
    game.update(&key(0.2, Key::Choice(5)));
    assert!(matches!(game.screen(), Screen::PowerupPick { .. }));

    game.update(&key(0.3, Key::Choice(1)));
    assert_eq!(game.screen(), &Screen::Playing);

    let run = game.run();
    assert_eq!(run.wave, 2);
    assert_eq!(run.enemies.len(), 8);
    assert_eq!(run.wave_time_left, wave_duration(2));

    let mut expected = wave_survival::entities::Player::new(&run.arena);
    let mut meta = wave_survival::powerups::Meta::default();
    expected.pos = run.player.pos;
    wave_survival::powerups::apply_powerup(&mut expected, options[1].kind, &mut meta);
    assert_eq!(run.player.bullet_damage, expected.bullet_damage);
    assert_eq!(run.player.max_hp, expected.max_hp);
    assert_eq!(run.player.bullet_pierce, expected.bullet_pierce);
    assert_eq!(run.meta, meta);
}

// ── death & restart ───────────────────────────────────────────────────────────

#[test]
fn lethal_hit_ends_the_run_on_next_frame() {
    let mut game = playing_game(GameConfig::default());
    let arena = game.run().arena;
    {
        let player = &mut game.run_mut().player;
        player.hp = 10;
        assert!(player.take_damage(15, 0.0, None, 0.0, &arena));
        assert_eq!(player.hp, -5);
    }
    game.update(&FrameInput::at(0.016));
    assert_eq!(game.screen(), &Screen::GameOver);

    let player = &mut game.run_mut().player;
    assert!(!player.take_damage(15, 0.3, None, 0.0, &arena));
    assert_eq!(player.hp, -5);

    // Terminal screen ignores everything but restart and quit.
    game.update(&key(0.4, Key::Other));
    game.update(&key(0.5, Key::Choice(0)));
    assert_eq!(game.screen(), &Screen::GameOver);
}

#[test]
fn game_over_snapshot_reports_score_and_wave() {
    let mut game = playing_game(GameConfig::default());
    game.update(&FrameInput::at(1.0));
    game.run_mut().player.hp = 0;
    game.update(&FrameInput::at(2.0));

    match game.snapshot(2.0).screen {
        ScreenView::GameOver { score, wave } => {
            assert_eq!(wave, 1);
            assert_eq!(score, 2);
        }
        other => panic!("expected game over, got {other:?}"),
    }
}

#[test]
fn restart_from_game_over_resets_the_run() {
    let mut game = playing_game(GameConfig::default());
    game.run_mut().meta.lifesteal = true;
    game.run_mut().score = 99.0;
    game.run_mut().player.hp = 0;
    game.update(&FrameInput::at(0.016));
    assert_eq!(game.screen(), &Screen::GameOver);

    game.update(&key(0.5, Key::Restart));
    assert_eq!(game.screen(), &Screen::Playing);
    let run = game.run();
    assert_eq!(run.wave, 1);
    assert_eq!(run.score, 0.0);
    assert!(!run.meta.lifesteal);
    assert_eq!(run.player.hp, run.player.max_hp);
    assert_eq!(run.enemies.len(), 6);
}

#[test]
fn restart_while_playing_resets_the_run() {
    let mut game = playing_game(GameConfig::default());
    game.run_mut().score = 12.0;
    game.run_mut().wave = 4;
    game.update(&key(0.5, Key::Restart));

    assert_eq!(game.screen(), &Screen::Playing);
    assert_eq!(game.run().wave, 1);
    assert_eq!(game.run().score, 0.0);
}

// ── win mode ──────────────────────────────────────────────────────────────────

#[test]
fn final_wave_leads_to_win() {
    let config = GameConfig {
        win_after_waves: Some(2),
        ..GameConfig::default()
    };
    let mut game = playing_game(config);

    game.run_mut().wave_time_left = 0.0;
    game.update(&FrameInput::at(0.016));
    assert!(matches!(game.screen(), Screen::PowerupPick { .. }));

    game.update(&key(0.1, Key::Choice(0)));
    game.run_mut().wave_time_left = 0.0;
    game.update(&FrameInput::at(0.2));
    assert_eq!(game.screen(), &Screen::Won);

    game.update(&key(0.3, Key::Restart));
    assert_eq!(game.screen(), &Screen::Playing);
    assert_eq!(game.run().wave, 1);
}

// ── end to end ────────────────────────────────────────────────────────────────

#[test]
fn clearing_wave_one_offers_three_powerups() {
    let mut game = playing_game(GameConfig::default());
    assert_eq!(game.run().enemies.len(), 6);
    {
        let player = &mut game.run_mut().player;
        player.bullet_damage = 10_000;
        player.bullet_pierce = 0;
        player.fire_rate = 0.0;
        player.max_hp = 1_000_000;
        player.hp = 1_000_000;
    }

    let mut now = 0.0;
    for _ in 0..3000 {
        if game.screen() != &Screen::Playing {
            break;
        }
        now += 1.0 / 60.0;
        let mut input = FrameInput::at(now);
        let center = game.run().player.center();
        let nearest = game
            .run()
            .enemies
            .iter()
            .map(|e| e.pos + Vec2::splat(e.size / 2.0))
            .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)));
        if let Some(target) = nearest {
            input.events.push(InputEvent::Click(target));
        }
        game.update(&input);
    }

    let options = pick_options(&game);
    assert!(game.run().enemies.is_empty());
    assert!(game.run().wave_time_left > 0.0);
    let kinds: HashSet<_> = options.iter().map(|p| p.kind).collect();
    assert_eq!(kinds.len(), 3);
    assert!(options.iter().all(|p| !p.description.is_empty()));

    match game.snapshot(now).screen {
        ScreenView::PowerupPick { options } => assert_eq!(options.len(), 3),
        other => panic!("expected pick view, got {other:?}"),
    }
}
