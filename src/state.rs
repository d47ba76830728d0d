//! Screen state machine for a whole session.
//!
//! `START -> PLAYING -> (POWERUP_PICK <-> PLAYING) -> GAME_OVER / WON`.
//! Legal moves are listed in [`next_screen`]; [`Game`] runs the hooks that
//! go with each move and owns the current [`RunState`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::{advance_wave, init_run, tick, RunState, TickOutcome};
use crate::config::GameConfig;
use crate::input::{FrameInput, Key};
use crate::powerups::{apply_powerup, roll_powerups, Powerup};
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    /// Simulation is frozen while the player chooses.
    PowerupPick { options: [Powerup; 3] },
    GameOver,
    /// Only reachable when the session has a final wave.
    Won,
}

/// Payload-free tag of a [`Screen`], used by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Start,
    Playing,
    PowerupPick,
    GameOver,
    Won,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start => ScreenKind::Start,
            Screen::Playing => ScreenKind::Playing,
            Screen::PowerupPick { .. } => ScreenKind::PowerupPick,
            Screen::GameOver => ScreenKind::GameOver,
            Screen::Won => ScreenKind::Won,
        }
    }
}

/// Something that can move the machine to another screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    AnyKey,
    Restart,
    WaveEnded,
    /// The configured last wave ended.
    FinalWaveEnded,
    PlayerDied,
    Picked(usize),
}

/// The transition table. `None` means the trigger is ignored on `from`.
pub fn next_screen(from: ScreenKind, trigger: Trigger) -> Option<ScreenKind> {
    use ScreenKind::*;
    match (from, trigger) {
        (Start, Trigger::AnyKey) => Some(Playing),
        (Playing, Trigger::Restart) => Some(Playing),
        (Playing, Trigger::PlayerDied) => Some(GameOver),
        (Playing, Trigger::WaveEnded) => Some(PowerupPick),
        (Playing, Trigger::FinalWaveEnded) => Some(Won),
        (PowerupPick, Trigger::Picked(i)) if i < 3 => Some(Playing),
        (GameOver | Won, Trigger::Restart) => Some(Playing),
        _ => None,
    }
}

/// Whether the frame loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    screen: Screen,
    run: RunState,
    rng: R,
    last_now: Option<f64>,
}

impl Game<StdRng> {
    /// New session on the start screen, seeded from the config.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            run: RunState::empty(config.arena),
            config,
            screen: Screen::Start,
            rng,
            last_now: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self, now: f64) -> Snapshot {
        Snapshot::capture(&self.screen, &self.run, now)
    }

    /// Run one frame of the active screen.
    pub fn update(&mut self, input: &FrameInput) -> Flow {
        let dt = self
            .last_now
            .map(|prev| (input.now - prev).max(0.0))
            .unwrap_or(0.0);
        self.last_now = Some(input.now);

        if input.keys().any(|k| k == Key::Quit) {
            return Flow::Quit;
        }

        match self.screen.kind() {
            ScreenKind::Start => {
                if input.keys().next().is_some() {
                    self.fire(Trigger::AnyKey);
                }
            }
            ScreenKind::Playing => self.update_playing(input, dt),
            ScreenKind::PowerupPick => {
                let choice = input.keys().find_map(|k| match k {
                    Key::Choice(i) if i < 3 => Some(usize::from(i)),
                    _ => None,
                });
                if let Some(i) = choice {
                    self.fire(Trigger::Picked(i));
                }
            }
            ScreenKind::GameOver | ScreenKind::Won => {
                if input.keys().any(|k| k == Key::Restart) {
                    self.fire(Trigger::Restart);
                }
            }
        }
        Flow::Continue
    }

    fn update_playing(&mut self, input: &FrameInput, dt: f64) {
        if input.keys().any(|k| k == Key::Restart) {
            self.fire(Trigger::Restart);
            return;
        }

        let report = tick(&mut self.run, input, dt);
        match report.outcome {
            TickOutcome::Running => {}
            TickOutcome::PlayerDied => {
                self.fire(Trigger::PlayerDied);
            }
            TickOutcome::WaveEnded => {
                let last = self
                    .config
                    .win_after_waves
                    .is_some_and(|n| self.run.wave >= n);
                if last {
                    self.fire(Trigger::FinalWaveEnded);
                } else {
                    self.fire(Trigger::WaveEnded);
                }
            }
        }
    }

    /// Apply `trigger` if the table allows it: leave the current screen,
    /// then enter the next one. Returns whether a transition happened.
    pub fn fire(&mut self, trigger: Trigger) -> bool {
        let from = self.screen.kind();
        let Some(to) = next_screen(from, trigger) else {
            return false;
        };
        self.exit(trigger);
        self.screen = self.enter(to, trigger);
        log::debug!("{:?} -> {:?} on {:?}", from, to, trigger);
        true
    }

    fn exit(&mut self, trigger: Trigger) {
        if let (Screen::PowerupPick { options }, Trigger::Picked(i)) = (&self.screen, trigger) {
            let chosen = options[i];
            apply_powerup(&mut self.run.player, chosen.kind, &mut self.run.meta);
            advance_wave(&mut self.run, &mut self.rng);
        }
    }

    fn enter(&mut self, to: ScreenKind, trigger: Trigger) -> Screen {
        match to {
            ScreenKind::Start => Screen::Start,
            ScreenKind::Playing => {
                if matches!(trigger, Trigger::AnyKey | Trigger::Restart) {
                    self.run = init_run(self.config.arena, &mut self.rng);
                }
                Screen::Playing
            }
            ScreenKind::PowerupPick => Screen::PowerupPick {
                options: roll_powerups(&mut self.rng),
            },
            ScreenKind::GameOver => {
                log::info!(
                    "game over: score {}, wave {}",
                    self.run.score as u64,
                    self.run.wave
                );
                Screen::GameOver
            }
            ScreenKind::Won => {
                log::info!("run won: score {}, wave {}", self.run.score as u64, self.run.wave);
                Screen::Won
            }
        }
    }
}
