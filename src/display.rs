/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot of the
/// frame.  No game logic is performed; this module only translates world
/// space into terminal cells and queues draw commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use wave_survival::entities::{Arena, EnemyKind};
use wave_survival::snapshot::{BulletView, EnemyView, Hud, PlayerView, ScreenView, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HP_BAR: Color = Color::Green;
const C_HP_BAR_LOW: Color = Color::Red;
const C_HP_BAR_EMPTY: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_FLASH: Color = Color::Red;
const C_ENEMY: Color = Color::Red;
const C_ENEMY_TANK: Color = Color::DarkYellow;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_CARD: Color = Color::Grey;

const HP_BAR_WIDTH: usize = 20;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the world-space arena onto the terminal play area, which sits inside
/// the border between the HUD row and the hint row.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    arena: Arena,
}

impl Viewport {
    /// First column/row inside the border.
    const LEFT: u16 = 1;
    const TOP: u16 = 2;

    pub fn new(cols: u16, rows: u16, arena: Arena) -> Self {
        Self { cols, rows, arena }
    }

    fn play_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a world point, `None` when it falls outside the
    /// play area.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let cx = (p.x / self.arena.width * self.play_cols()).floor();
        let cy = (p.y / self.arena.height * self.play_rows()).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.play_cols() || cy >= self.play_rows() {
            return None;
        }
        Some((Self::LEFT + cx as u16, Self::TOP + cy as u16))
    }

    /// World point at the centre of a terminal cell (for the mouse pointer).
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        let cx = col.saturating_sub(Self::LEFT) as f32 + 0.5;
        let cy = row.saturating_sub(Self::TOP) as f32 + 0.5;
        Vec2::new(
            cx / self.play_cols() * self.arena.width,
            cy / self.play_rows() * self.arena.height,
        )
    }

    /// Cells covered by a world-space box, clipped to the play area.
    /// Every box covers at least one cell.
    fn box_cells(&self, pos: Vec2, size: Vec2) -> Vec<(u16, u16)> {
        let sx = self.play_cols() / self.arena.width;
        let sy = self.play_rows() / self.arena.height;
        let x0 = (pos.x * sx).floor() as i32;
        let y0 = (pos.y * sy).floor() as i32;
        let x1 = ((pos.x + size.x) * sx).ceil().max(x0 as f32 + 1.0) as i32;
        let y1 = ((pos.y + size.y) * sy).ceil().max(y0 as f32 + 1.0) as i32;

        let max_x = self.play_cols() as i32;
        let max_y = self.play_rows() as i32;
        let mut cells = Vec::new();
        for y in y0.max(0)..y1.min(max_y) {
            for x in x0.max(0)..x1.min(max_x) {
                cells.push((Self::LEFT + x as u16, Self::TOP + y as u16));
            }
        }
        cells
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match &snap.screen {
        ScreenView::Start => draw_start(out, view)?,
        ScreenView::Playing => draw_playfield(out, snap, view)?,
        ScreenView::PowerupPick { options } => draw_powerup_pick(out, options, view)?,
        ScreenView::GameOver { score, wave } => {
            draw_playfield(out, snap, view)?;
            draw_end_overlay(out, "GAME  OVER", Color::Red, *score, *wave, view)?;
        }
        ScreenView::Won { score, wave } => {
            draw_playfield(out, snap, view)?;
            draw_end_overlay(out, " YOU  WIN ", Color::Green, *score, *wave, view)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    row: u16,
    view: &Viewport,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Start screen ──────────────────────────────────────────────────────────────

fn draw_start<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;
    print_centered(out, "★  WAVE  SURVIVAL  ★", C_TITLE, cy.saturating_sub(4), view)?;
    print_centered(
        out,
        "WASD / Arrows : Move   Mouse / SPACE : Shoot",
        C_HUD,
        cy.saturating_sub(1),
        view,
    )?;
    print_centered(
        out,
        "Survive waves, pick 1 of 3 powerups between waves",
        C_HINT,
        cy + 1,
        view,
    )?;
    print_centered(out, "Press any key to start · ESC to quit", C_HINT, cy + 3, view)?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    draw_border(out, view)?;
    draw_hud(out, &snap.hud, view)?;

    for enemy in &snap.enemies {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in &snap.bullets {
        draw_bullet(out, bullet, view)?;
    }
    draw_player(out, &snap.player, view)?;
    draw_controls_hint(out, view)?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Wave {}  |  Time: {}s  |  Enemies: {}",
        hud.wave, hud.time_left as u64, hud.enemies_left
    )))?;

    // Score, centred
    let score = format!("Score: {}", hud.score);
    let sx = (view.cols / 2).saturating_sub(score.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;

    // HP bar, right-aligned
    let pct = if hud.max_hp > 0 {
        (hud.hp as f32 / hud.max_hp as f32).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (pct * HP_BAR_WIDTH as f32).round() as usize;
    let label = format!(" {}/{}", hud.hp, hud.max_hp);
    let total = 4 + HP_BAR_WIDTH + label.chars().count();
    let rx = view.cols.saturating_sub(total as u16 + 1);

    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("HP "))?;
    out.queue(style::SetForegroundColor(if pct < 0.3 { C_HP_BAR_LOW } else { C_HP_BAR }))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HP_BAR_EMPTY))?;
    out.queue(Print("░".repeat(HP_BAR_WIDTH - filled)))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&label))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_cells<W: Write>(
    out: &mut W,
    cells: &[(u16, u16)],
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for &(col, row) in cells {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, player: &PlayerView, view: &Viewport) -> std::io::Result<()> {
    let color = if player.flashing { C_PLAYER_FLASH } else { C_PLAYER };
    fill_cells(out, &view.box_cells(player.pos, player.size), "█", color)
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &EnemyView, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = match enemy.kind {
        EnemyKind::Basic => ("▓", C_ENEMY),
        EnemyKind::Fast => ("▒", C_ENEMY),
        EnemyKind::Tank => ("▓", C_ENEMY_TANK),
    };
    let cells = view.box_cells(enemy.pos, Vec2::splat(enemy.size));
    fill_cells(out, &cells, glyph, color)
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &BulletView, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(bullet.pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / Arrows : Move   Mouse / SPACE : Shoot   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Powerup pick ──────────────────────────────────────────────────────────────

fn draw_powerup_pick<W: Write>(
    out: &mut W,
    options: &[(&'static str, &'static str)],
    view: &Viewport,
) -> std::io::Result<()> {
    let top = (view.rows / 2).saturating_sub(6);
    print_centered(out, "Choose a Powerup", C_TITLE, top, view)?;

    for (i, (name, desc)) in options.iter().enumerate() {
        let row = top + 3 + 3 * i as u16;
        let title = format!("{}. {}", i + 1, name);
        print_centered(out, &title, C_HUD, row, view)?;
        print_centered(out, desc, C_CARD, row + 1, view)?;
    }

    print_centered(out, "Press 1 / 2 / 3", C_HINT, top + 13, view)?;
    Ok(())
}

// ── Game-over / win overlay ───────────────────────────────────────────────────

fn draw_end_overlay<W: Write>(
    out: &mut W,
    title: &str,
    color: Color,
    score: u64,
    wave: u32,
    view: &Viewport,
) -> std::io::Result<()> {
    let framed = [
        "╔════════════════════╗".to_string(),
        format!("║     {}     ║", title),
        "╚════════════════════╝".to_string(),
    ];
    let start_row = (view.rows / 2).saturating_sub(3);

    for (i, line) in framed.iter().enumerate() {
        print_centered(out, line, color, start_row + i as u16, view)?;
    }

    let summary = format!("Score: {}  ·  Wave Reached: {}", score, wave);
    print_centered(out, &summary, Color::Yellow, start_row + 3, view)?;
    print_centered(out, "R - Play Again  Q - Quit", Color::White, start_row + 4, view)?;
    Ok(())
}
