//! Damage math: attack power, defence, hit application and area splits.
//!
//! Everything here is a pure function of the combatants involved and the
//! random source. The action resolver decides *which* profile to swing with;
//! this module decides how hard it lands.

mod area;
mod attack;
mod defence;
mod scale;

pub use area::{armor_soak, split_evenly};
pub use attack::{AttackRoll, roll_attack};
pub use defence::{DefenceRoll, roll_defence};

use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::event::HitDetail;
use crate::state::{Combatant, StatusKind};

/// Attribute an attack draws its base power from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStat {
    Strength,
    Dexterity,
}

/// How a single swing is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwingProfile {
    pub stat: AttackStat,
    /// Adds `weapon + U(0, weapon)` and the two-handed multiplier.
    pub uses_weapon: bool,
    pub flat_bonus: i32,
    /// Extra multiplier in percent, 100 for none.
    pub multiplier_pct: u32,
    /// Skips the defender's armor roll.
    pub ignore_armor: bool,
    /// Whether a shield may block.
    pub can_block: bool,
    /// Never reported as a miss, even with non-positive power.
    pub always_hit: bool,
    pub off_hand: bool,
}

impl SwingProfile {
    /// A plain strength-and-weapon swing.
    pub const fn weapon() -> Self {
        Self {
            stat: AttackStat::Strength,
            uses_weapon: true,
            flat_bonus: 0,
            multiplier_pct: 100,
            ignore_armor: false,
            can_block: true,
            always_hit: false,
            off_hand: false,
        }
    }

    pub const fn finesse() -> Self {
        Self {
            stat: AttackStat::Dexterity,
            ..Self::weapon()
        }
    }

    pub const fn off_hand(mut self) -> Self {
        self.off_hand = true;
        self
    }

    pub const fn with_bonus(mut self, bonus: i32) -> Self {
        self.flat_bonus = bonus;
        self
    }

    pub const fn piercing(mut self) -> Self {
        self.ignore_armor = true;
        self.can_block = false;
        self
    }

    pub const fn unerring(mut self) -> Self {
        self.always_hit = true;
        self
    }
}

impl Default for SwingProfile {
    fn default() -> Self {
        Self::weapon()
    }
}

/// Result of one swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swing {
    Missed,
    Hit(HitDetail),
}

/// Resolves one swing of `attacker` against `defender` and applies the damage.
///
/// Rolls are drawn in a fixed order: weapon variance, d20 (twice when hidden),
/// critical check, defence variance, armor, shield block. A hidden attacker is
/// revealed by the swing whether or not it lands.
pub fn swing(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    profile: &SwingProfile,
    config: &CombatConfig,
    rng: &mut dyn CombatRng,
) -> Swing {
    let attack = roll_attack(attacker, defender, profile, config, rng);
    attacker.status.remove(StatusKind::Hidden);

    if attack.missed {
        return Swing::Missed;
    }

    let defence = roll_defence(defender, attacker, profile, config, rng);
    let mut detail = land(defender, attack.power - defence.value);
    detail.critical = attack.critical;
    detail.blocked = defence.blocked;
    detail.off_hand = profile.off_hand;
    Swing::Hit(detail)
}

/// Applies already-computed damage to `defender`.
///
/// Floors the damage at 1, lets a Defending stance halve it (rounding up, and
/// consuming the stance), drains stoneskin, then removes the rest from HP.
pub fn land(defender: &mut Combatant, damage: i32) -> HitDetail {
    let mut detail = HitDetail {
        damage: damage.max(1),
        ..HitDetail::default()
    };

    if defender.status.remove(StatusKind::Defending).is_some() {
        detail.damage = (detail.damage + 1) / 2;
        detail.halved = true;
    }

    let mut depleted = false;
    if let Some(skin) = defender.status.get_mut(StatusKind::Stoneskin) {
        let absorbed = skin.potency.clamp(0, detail.damage);
        skin.potency -= absorbed;
        detail.absorbed = absorbed;
        depleted = skin.potency <= 0;
    }
    if depleted {
        defender.status.remove(StatusKind::Stoneskin);
    }

    defender.take_damage(detail.hp_loss());
    detail
}
