//! Wave Survival - a top-down "survive the waves" arcade game
//!
//! Core modules:
//! - `entities`: player, bullet and enemy models
//! - `powerups`: the between-wave powerup catalog
//! - `spawner`: per-wave enemy batches
//! - `compute`: per-frame simulation and collision resolution
//! - `state`: screen state machine driving a whole session
//!
//! Rendering and input polling live in the binary.

pub mod compute;
pub mod config;
pub mod consts;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod powerups;
pub mod snapshot;
pub mod spawner;
pub mod state;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use state::{Flow, Game, Screen};
