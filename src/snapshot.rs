//! Read-only view of a frame for the renderer.

use glam::Vec2;

use crate::compute::RunState;
use crate::entities::{Arena, EnemyKind};
use crate::state::Screen;

#[derive(Clone, Debug, PartialEq)]
pub enum ScreenView {
    Start,
    Playing,
    /// `(name, description)` of each offered powerup, in key order.
    PowerupPick { options: Vec<(&'static str, &'static str)> },
    GameOver { score: u64, wave: u32 },
    Won { score: u64, wave: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub flashing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: EnemyKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub wave: u32,
    /// Never negative.
    pub time_left: f64,
    pub enemies_left: usize,
    pub score: u64,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub screen: ScreenView,
    pub arena: Arena,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(screen: &Screen, run: &RunState, now: f64) -> Self {
        let score = run.score as u64;
        let screen = match screen {
            Screen::Start => ScreenView::Start,
            Screen::Playing => ScreenView::Playing,
            Screen::PowerupPick { options } => ScreenView::PowerupPick {
                options: options.iter().map(|p| (p.name, p.description)).collect(),
            },
            Screen::GameOver => ScreenView::GameOver {
                score,
                wave: run.wave,
            },
            Screen::Won => ScreenView::Won {
                score,
                wave: run.wave,
            },
        };

        let p = &run.player;
        Self {
            screen,
            arena: run.arena,
            player: PlayerView {
                pos: p.pos,
                size: p.size,
                hp: p.hp,
                max_hp: p.max_hp,
                flashing: p.is_flashing(now),
            },
            bullets: run
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            enemies: run
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: e.size,
                    kind: e.kind,
                })
                .collect(),
            hud: Hud {
                wave: run.wave,
                time_left: run.wave_time_left.max(0.0),
                enemies_left: run.enemies.len(),
                score,
                hp: p.hp,
                max_hp: p.max_hp,
            },
        }
    }
}
