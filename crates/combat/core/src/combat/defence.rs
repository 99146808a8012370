use super::SwingProfile;
use super::scale::Scale;
use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::state::{Combatant, StatusKind};

/// Defence rolled against one incoming swing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefenceRoll {
    pub value: i32,
    /// The shield bonus was added.
    pub blocked: bool,
}

/// Rolls the defender's defence against one swing.
///
/// `defence + U(0, max(1, defence/8)) + U(0, armor)` plus flat modifiers and a
/// possible shield block, then the multipliers (power stance ×1.25,
/// two-handed ×0.85, dual wield ×0.9). Never negative.
pub fn roll_defence(
    defender: &Combatant,
    attacker: &Combatant,
    profile: &SwingProfile,
    config: &CombatConfig,
    rng: &mut dyn CombatRng,
) -> DefenceRoll {
    let base = defender.attributes.defence;
    let mut value = base + rng.uniform_int(0, (base / 8).max(1));

    if !profile.ignore_armor {
        value += rng.uniform_int(0, defender.armor_power);
    }

    if defender.status.has(StatusKind::Blessed) {
        value += CombatConfig::BLESS_BONUS;
    }
    value += defender.status.potency(StatusKind::Protected);
    value -= defender.status.potency(StatusKind::Taunted);
    if attacker.is_raging() {
        value += CombatConfig::RAGE_DEFENCE_BONUS;
    }

    let blocked = profile.can_block
        && defender.loadout.has_shield()
        && rng.chance(config.shield_block_chance);
    if blocked {
        value += defender.shield_bonus;
    }

    let mut scale = Scale::unit();
    if defender.status.has(StatusKind::PowerStance) {
        scale.by(125);
    }
    if defender.loadout.is_two_handed() {
        scale.by(85);
    }
    if defender.loadout.is_dual_wielding() {
        scale.by(90);
    }

    DefenceRoll {
        value: scale.of(value).max(0),
        blocked,
    }
}
