//! Session configuration.

use crate::consts::*;
use crate::entities::Arena;
use crate::error::ConfigError;

/// Smallest arena that still fits the player and the spawn band.
pub const MIN_ARENA_SIDE: f32 = 2.0 * SPAWN_EDGE_INSET + PLAYER_SIZE;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub arena: Arena,
    /// Target frame rate of the loop.
    pub fps: u32,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// End the run with a win once this wave is over. `None` plays
    /// endlessly.
    pub win_after_waves: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            fps: DEFAULT_FPS,
            seed: None,
            win_after_waves: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.arena.width < MIN_ARENA_SIDE || self.arena.height < MIN_ARENA_SIDE {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena.width,
                height: self.arena.height,
                min: MIN_ARENA_SIDE,
            });
        }
        if self.win_after_waves == Some(0) {
            return Err(ConfigError::ZeroWinWaves);
        }
        Ok(())
    }

    /// Seconds per frame at the configured rate.
    pub fn frame_time(&self) -> f64 {
        1.0 / self.fps.max(1) as f64
    }
}
