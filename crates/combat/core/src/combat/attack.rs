use super::scale::Scale;
use super::{AttackStat, SwingProfile};
use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::state::{Combatant, StatusKind};

/// Attack power before the defender's defence is subtracted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackRoll {
    pub power: i32,
    pub critical: bool,
    /// Power was non-positive before multipliers.
    pub missed: bool,
}

/// Rolls attack power.
///
/// `base (+ weapon + U(0, weapon)) + d20 + flat modifiers`, then the
/// multipliers (power stance ×1.5, two-handed ×1.25, off hand ×0.5), then
/// weakness (−4, floor 1), then the critical check.
pub fn roll_attack(
    attacker: &Combatant,
    defender: &Combatant,
    profile: &SwingProfile,
    config: &CombatConfig,
    rng: &mut dyn CombatRng,
) -> AttackRoll {
    let attrs = &attacker.attributes;
    let mut power = match profile.stat {
        AttackStat::Strength if attacker.is_raging() => attrs.strength * 2,
        AttackStat::Strength => attrs.strength,
        AttackStat::Dexterity => attrs.dexterity,
    };

    if profile.uses_weapon {
        let weapon = attacker.effective_weapon_power();
        power += weapon + rng.uniform_int(0, weapon);
    }

    let mut d20 = rng.roll_die(CombatConfig::CRIT_DIE);
    if attacker.is_hidden() {
        d20 = d20.max(rng.roll_die(CombatConfig::CRIT_DIE));
    }
    power += d20 + profile.flat_bonus;

    if attacker.status.has(StatusKind::Blessed) {
        power += CombatConfig::BLESS_BONUS;
    }
    power += attacker.status.potency(StatusKind::Empowered);
    power -= defender.status.potency(StatusKind::Blurred);

    if power <= 0 && !profile.always_hit {
        return AttackRoll {
            missed: true,
            ..AttackRoll::default()
        };
    }

    let mut scale = Scale::unit();
    if attacker.status.has(StatusKind::PowerStance) {
        scale.by(150);
    }
    if profile.uses_weapon && attacker.loadout.is_two_handed() {
        scale.by(125);
    }
    if profile.off_hand {
        scale.by(50);
    }
    scale.by(profile.multiplier_pct);
    power = scale.of(power.max(1));

    if attacker.status.has(StatusKind::Weakened) {
        power = (power - CombatConfig::WEAKEN_PENALTY).max(1);
    }

    let critical = rng.uniform_int(0, CombatConfig::CRIT_DIE - 1) == 0;
    if critical {
        power = (i64::from(power) * i64::from(config.critical_multiplier_pct) / 100) as i32;
    }

    AttackRoll {
        power: power.max(1),
        critical,
        missed: false,
    }
}
