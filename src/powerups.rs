//! Between-wave powerups.
//!
//! The catalog is fixed. Each pick offers three distinct entries and the
//! chosen one is applied once, permanently, for the rest of the run.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::consts::KNOCKBACK_RESIST_MAX;
use crate::entities::Player;
use crate::geometry::clamp;

/// Run-wide toggles set by powerups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    /// Enemy kills heal the player.
    pub lifesteal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    GlassCannon,
    Adrenaline,
    TriggerFinger,
    SplinterRounds,
    MagnumRounds,
    HotLoad,
    Hardened,
    Steadfast,
    SecondWind,
    VampiricRounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Powerup {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: PowerupKind,
}

const fn powerup(name: &'static str, description: &'static str, kind: PowerupKind) -> Powerup {
    Powerup {
        name,
        description,
        kind,
    }
}

pub static CATALOG: [Powerup; 10] = [
    powerup("Glass Cannon", "Bullet dmg +40%, HP -15%", PowerupKind::GlassCannon),
    powerup("Adrenaline", "Move speed +20%", PowerupKind::Adrenaline),
    powerup("Trigger Finger", "Fire rate +25%", PowerupKind::TriggerFinger),
    powerup("Splinter Rounds", "Bullets pierce +1", PowerupKind::SplinterRounds),
    powerup("Magnum Rounds", "Bullet dmg +25%", PowerupKind::MagnumRounds),
    powerup("Hot Load", "Bullet speed +20%", PowerupKind::HotLoad),
    powerup("Hardened", "Max HP +20%, i-frames +0.1s", PowerupKind::Hardened),
    powerup("Steadfast", "Knockback taken -50%", PowerupKind::Steadfast),
    powerup("Second Wind", "Heal 30 HP (over-heal to +10)", PowerupKind::SecondWind),
    powerup("Vampiric Rounds", "On kill: heal 2 HP", PowerupKind::VampiricRounds),
];

/// Glass Cannon never drops max hp below this.
const GLASS_CANNON_MIN_HP: i32 = 40;

/// Three distinct catalog entries, uniformly sampled.
pub fn roll_powerups(rng: &mut impl Rng) -> [Powerup; 3] {
    let mut picked = CATALOG.choose_multiple(rng, 3).copied();
    // CATALOG has more than three entries, so all three are present.
    let mut next = || picked.next().unwrap_or(CATALOG[0]);
    [next(), next(), next()]
}

/// Scale an integer stat, truncating toward zero.
fn scale(v: i32, factor: f32) -> i32 {
    (v as f32 * factor) as i32
}

pub fn apply_powerup(player: &mut Player, kind: PowerupKind, meta: &mut Meta) {
    match kind {
        PowerupKind::GlassCannon => {
            player.bullet_damage = scale(player.bullet_damage, 1.4);
            player.max_hp = scale(player.max_hp, 0.85).max(GLASS_CANNON_MIN_HP);
            player.hp = player.hp.min(player.max_hp);
        }
        PowerupKind::Adrenaline => player.move_speed *= 1.2,
        PowerupKind::TriggerFinger => player.fire_rate *= 0.75,
        PowerupKind::SplinterRounds => player.bullet_pierce += 1,
        PowerupKind::MagnumRounds => player.bullet_damage = scale(player.bullet_damage, 1.25),
        PowerupKind::HotLoad => player.bullet_speed *= 1.2,
        PowerupKind::Hardened => {
            player.max_hp = scale(player.max_hp, 1.2);
            player.heal(20, player.max_hp);
            player.i_frames += 0.1;
        }
        PowerupKind::Steadfast => {
            player.knockback_resist =
                clamp(player.knockback_resist + 0.5, 0.0, KNOCKBACK_RESIST_MAX);
        }
        PowerupKind::SecondWind => player.heal(30, player.max_hp + 10),
        PowerupKind::VampiricRounds => meta.lifesteal = true,
    }
    log::info!("powerup applied: {:?}", kind);
}
