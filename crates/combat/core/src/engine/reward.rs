//! Experience and gold for defeated monsters.

use super::arena::Battlefield;
use super::outcome::Outcome;
use crate::env::CombatRng;
use crate::state::Combatant;

/// Rewards earned in one encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: u32,
    pub gold: u32,
    /// Earned while fleeing: half experience, no loot.
    pub partial: bool,
}

impl Rewards {
    pub const fn none() -> Self {
        Self {
            experience: 0,
            gold: 0,
            partial: false,
        }
    }
}

/// Level-scaled experience for one kill.
///
/// `max(base/2, base + clamp((monster − player)×10, −base/2, base/2))`
pub fn experience_for(base: u32, monster_level: u32, player_level: u32) -> u32 {
    let base = i64::from(base);
    let half = base / 2;
    let diff = i64::from(monster_level) - i64::from(player_level);
    let scaled = base + (diff * 10).clamp(-half, half);
    u32::try_from(scaled.max(half)).unwrap_or(u32::MAX)
}

/// Gold for one kill: `gold + U(0, gold/2)`, saturating at `u32::MAX`.
pub fn gold_for(gold: u32, rng: &mut dyn CombatRng) -> u32 {
    let half = i32::try_from(gold / 2).unwrap_or(i32::MAX);
    let bonus = rng.uniform_int(0, half).max(0) as u32;
    gold.saturating_add(bonus)
}

/// Rewards for the monsters defeated so far, given how the encounter ended.
///
/// Victory pays full, level-scaled experience and rolled gold. An escape
/// pays exactly half the base experience and the base gold of the kills made
/// before fleeing. Every other outcome pays nothing.
pub fn calculate(outcome: Outcome, field: &Battlefield<'_>, rng: &mut dyn CombatRng) -> Rewards {
    let player_level = field.player().level;
    let kills = field.defeated().iter().filter_map(|id| field.get(*id));

    match outcome {
        Outcome::Victory => kills.fold(Rewards::none(), |mut total, monster: &Combatant| {
            total.experience = total.experience.saturating_add(experience_for(
                monster.bounty.experience,
                monster.level,
                player_level,
            ));
            total.gold = total.gold.saturating_add(gold_for(monster.bounty.gold, rng));
            total
        }),
        Outcome::PlayerEscaped => {
            let (experience, gold) = kills.fold((0u32, 0u32), |(exp, gold), monster| {
                (
                    exp.saturating_add(monster.bounty.experience),
                    gold.saturating_add(monster.bounty.gold),
                )
            });
            if experience == 0 && gold == 0 {
                return Rewards::none();
            }
            Rewards {
                experience: experience / 2,
                gold,
                partial: true,
            }
        }
        Outcome::PlayerDied | Outcome::Stalemate | Outcome::Interrupted => Rewards::none(),
    }
}
