//! Error types for the parts of the game that touch the outside world.
//!
//! The simulation itself is infallible.

use thiserror::Error;

/// Rejected session configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 fps")]
    ZeroFps,
    #[error("arena {width}x{height} is too small (minimum {min}x{min})")]
    ArenaTooSmall { width: f32, height: f32, min: f32 },
    #[error("win-after must be at least 1 wave")]
    ZeroWinWaves,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
