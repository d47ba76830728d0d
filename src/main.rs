mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;

use display::Viewport;
use wave_survival::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, DEFAULT_FPS};
use wave_survival::entities::{Arena, MoveIntent};
use wave_survival::input::{FrameInput, InputEvent, Key};
use wave_survival::{Flow, Game, GameConfig, GameError};

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

/// A key is considered "held" if its last press/repeat event arrived within
/// this long.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is at least 15 Hz, so the window is refreshed before it
/// expires.  Converted to frames with [`hold_window_frames`].
const HOLD_WINDOW_SECS: f64 = 0.133;

/// `HOLD_WINDOW_SECS` in frames at `fps`, never less than one frame.
fn hold_window_frames(fps: u32) -> u64 {
    ((HOLD_WINDOW_SECS * fps as f64).round() as u64).max(1)
}

/// Held-key bookkeeping: frame of the last press/repeat for every key.
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
    window: u64,
}

impl HeldKeys {
    fn new(fps: u32) -> Self {
        Self {
            last_seen: HashMap::new(),
            window: hold_window_frames(fps),
        }
    }

    fn touch(&mut self, key: KeyCode, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    fn release(&mut self, key: &KeyCode) {
        self.last_seen.remove(key);
    }

    /// True if `key` was seen within the hold window.
    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= self.window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }
}

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Command line ──────────────────────────────────────────────────────────────

/// Survive waves of chasing enemies in the terminal.
#[derive(Parser, Debug)]
#[command(name = "wave-survival", version)]
struct Cli {
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Arena width in world units.
    #[arg(long, default_value_t = DEFAULT_ARENA_WIDTH)]
    arena_width: f32,

    /// Arena height in world units.
    #[arg(long, default_value_t = DEFAULT_ARENA_HEIGHT)]
    arena_height: f32,

    /// Win once this many waves are survived instead of playing endlessly.
    #[arg(long)]
    win_after: Option<u32>,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        GameConfig {
            arena: Arena::new(self.arena_width, self.arena_height),
            fps: self.fps,
            seed: self.seed,
            win_after_waves: self.win_after,
        }
    }
}

// ── Input translation ─────────────────────────────────────────────────────────

/// Map a pressed key to the discrete key the core understands.
fn translate_key(code: &KeyCode, modifiers: KeyModifiers) -> Key {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
        KeyCode::Char(c @ '1'..='3') => Key::Choice(*c as u8 - b'1'),
        _ => Key::Other,
    }
}

/// Mouse state carried between frames.
#[derive(Default)]
struct Pointer {
    pos: Vec2,
    held: bool,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: held keys are tracked in a [`HeldKeys`] map recording the
/// frame of the last press/repeat event for every key, so several keys can
/// be held at once.  Presses also become discrete core events; repeats only
/// refresh the map.  The mouse reports its own press/release, so its button
/// state is tracked directly.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let frame_time = Duration::from_secs_f64(game.config().frame_time());
    let arena = game.config().arena;
    let clock = Instant::now();

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, arena);
    let mut held = HeldKeys::new(game.config().fps);
    let mut pointer = Pointer {
        pos: arena.center(),
        held: false,
    };
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = FrameInput::at(clock.elapsed().as_secs_f64());

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        input
                            .events
                            .push(InputEvent::Key(translate_key(&code, modifiers)));
                        held.touch(code, frame);
                    }
                    KeyEventKind::Repeat => held.touch(code, frame),
                    KeyEventKind::Release => held.release(&code),
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    pointer.pos = view.to_world(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            pointer.held = true;
                            input.events.push(InputEvent::Click(pointer.pos));
                        }
                        MouseEventKind::Up(MouseButton::Left) => pointer.held = false,
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows, arena),
                _ => {}
            }
        }

        // ── Held-key snapshot ─────────────────────────────────────────────────
        input.movement = MoveIntent {
            up: held.any_held(&UP_KEYS, frame),
            down: held.any_held(&DOWN_KEYS, frame),
            left: held.any_held(&LEFT_KEYS, frame),
            right: held.any_held(&RIGHT_KEYS, frame),
        };
        input.shoot_held = pointer.held || held.is_held(&KeyCode::Char(' '), frame);
        input.pointer = pointer.pos;

        if game.update(&input) == Flow::Quit {
            return Ok(());
        }

        display::render(out, &game.snapshot(input.now), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Cli::parse().into_config();
    config.validate().context("invalid configuration")?;

    let (cols, rows) = terminal::size().context("cannot query terminal size")?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::TerminalTooSmall {
            width: cols,
            height: rows,
            min_width: MIN_COLS,
            min_height: MIN_ROWS,
        }
        .into());
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    log::info!("session starting with {:?}", config);
    let mut game = Game::new(config);
    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
