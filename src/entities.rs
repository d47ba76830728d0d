/// Game entity types and their self-contained per-frame behaviour.
///
/// Positions are top-left corners in world units, except for bullets which
/// are tracked by their centre.

use glam::Vec2;

use crate::consts::*;
use crate::geometry::{angle_to, clamp, heading, Rect};

// ── Arena ─────────────────────────────────────────────────────────────────────

/// The playfield. Entities live in `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a box's top-left corner so the whole box stays inside.
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            clamp(pos.x, 0.0, self.width - size.x),
            clamp(pos.y, 0.0, self.height - size.y),
        )
    }

    /// True while `p` is inside the arena grown by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.x <= self.width + margin
            && p.y >= -margin
            && p.y <= self.height + margin
    }
}

// ── Input intent ──────────────────────────────────────────────────────────────

/// Held directional keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Unit-length direction, or zero when nothing (or only opposing keys)
    /// is held.
    pub fn direction(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        d.normalize_or_zero()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Centre of the bullet.
    pub pos: Vec2,
    /// Fixed at creation; bullets have no drag.
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
    /// Additional enemies this bullet may pass through.
    pub pierce: u32,
    pub alive: bool,
}

impl Bullet {
    /// Aim from `source` at `target`. A target on top of the source fires
    /// along +x.
    pub fn new(source: Vec2, target: Vec2, speed: f32, damage: i32, pierce: u32) -> Self {
        Self {
            pos: source,
            vel: heading(angle_to(source, target)) * speed,
            radius: BULLET_RADIUS,
            damage,
            pierce,
            alive: true,
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        self.pos += self.vel;
        if !arena.contains_with_margin(self.pos, BULLET_OFFSCREEN_MARGIN) {
            self.alive = false;
        }
    }

    /// Bullets are drawn round but hit-tested as a small square.
    pub fn hit_box(&self) -> Rect {
        Rect::centered(self.pos, BULLET_HIT_HALF)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// May drop below zero; death is detected by the caller.
    pub hp: i32,
    pub max_hp: i32,
    pub move_speed: f32,
    /// Seconds between shots.
    pub fire_rate: f64,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_pierce: u32,
    /// Invulnerability window after a hit, in seconds.
    pub i_frames: f64,
    pub last_shot_time: f64,
    pub last_hit_time: f64,
    /// Fraction of knockback ignored, `0.0..=0.9`.
    pub knockback_resist: f32,
    pub flash_time: f64,
}

impl Player {
    /// Fresh player with base stats, centred in the arena.
    pub fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            size: Vec2::splat(PLAYER_SIZE),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            move_speed: PLAYER_MOVE_SPEED,
            fire_rate: PLAYER_FIRE_RATE,
            bullet_speed: PLAYER_BULLET_SPEED,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            bullet_pierce: 0,
            i_frames: PLAYER_I_FRAMES,
            last_shot_time: f64::NEG_INFINITY,
            last_hit_time: -10.0,
            knockback_resist: 0.0,
            flash_time: -10.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn hit_box(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn move_by(&mut self, intent: &MoveIntent, arena: &Arena) {
        self.pos += intent.direction() * self.move_speed;
        self.pos = arena.clamp_box(self.pos, self.size);
    }

    pub fn can_shoot(&self, now: f64) -> bool {
        now - self.last_shot_time >= self.fire_rate
    }

    /// Fire from the player's centre toward `target`. Cooldown is the
    /// caller's concern; see [`Player::can_shoot`].
    pub fn shoot(&mut self, target: Vec2, now: f64) -> Bullet {
        self.last_shot_time = now;
        Bullet::new(
            self.center(),
            target,
            self.bullet_speed,
            self.bullet_damage,
            self.bullet_pierce,
        )
    }

    /// Apply a hit. Returns `false` without touching anything while the
    /// player is still inside the previous hit's i-frames.
    pub fn take_damage(
        &mut self,
        amount: i32,
        now: f64,
        source: Option<Vec2>,
        knockback: f32,
        arena: &Arena,
    ) -> bool {
        if now - self.last_hit_time < self.i_frames {
            return false;
        }
        self.last_hit_time = now;
        self.hp -= amount;
        self.flash_time = now;

        if let Some(src) = source {
            if knockback > 0.0 {
                let push = knockback * (1.0 - self.knockback_resist);
                self.pos += heading(angle_to(src, self.pos)) * push;
                self.pos = arena.clamp_box(self.pos, self.size);
            }
        }
        true
    }

    /// Add `amount` hp, then clamp to `cap`. An overhealed player above
    /// `cap` is pulled back down to it.
    pub fn heal(&mut self, amount: i32, cap: i32) {
        self.hp = (self.hp + amount).min(cap);
    }

    pub fn is_flashing(&self, now: f64) -> bool {
        now - self.flash_time < PLAYER_FLASH_DURATION
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Per-kind base stats and their growth per wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub size: f32,
    pub base_speed: f32,
    pub speed_per_wave: f32,
    pub base_hp: i32,
    pub hp_per_wave: i32,
    pub damage: i32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                size: 42.0,
                base_speed: 2.2,
                speed_per_wave: 0.05,
                base_hp: 30,
                hp_per_wave: 4,
                damage: 10,
            },
            EnemyKind::Fast => EnemyStats {
                size: 34.0,
                base_speed: 3.6,
                speed_per_wave: 0.06,
                base_hp: 22,
                hp_per_wave: 3,
                damage: 8,
            },
            EnemyKind::Tank => EnemyStats {
                size: 56.0,
                base_speed: 1.5,
                speed_per_wave: 0.04,
                base_hp: 65,
                hp_per_wave: 6,
                damage: 15,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub hp: i32,
    /// Contact damage dealt to the player.
    pub damage: i32,
    pub alive: bool,
}

impl Enemy {
    /// Build an enemy of `kind` scaled for `wave`.
    pub fn new(kind: EnemyKind, pos: Vec2, wave: u32) -> Self {
        let s = kind.stats();
        Self {
            kind,
            pos,
            size: s.size,
            speed: s.base_speed + s.speed_per_wave * wave as f32,
            hp: s.base_hp + s.hp_per_wave * wave as i32,
            damage: s.damage,
            alive: true,
        }
    }

    pub fn hit_box(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Step straight toward `target`.
    pub fn update(&mut self, target: Vec2) {
        self.pos += heading(angle_to(self.pos, target)) * self.speed;
    }

    /// Returns `true` if this hit killed the enemy.
    pub fn hit(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        if self.hp <= 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }
}
