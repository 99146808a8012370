use core::fmt;

use super::rng::CombatRng;
use crate::state::Combatant;

/// Spell system consulted by the CastSpell action.
///
/// Spell content lives outside the core: the oracle resolves a caster and a
/// spell identifier into numbers, and the core applies them with the same
/// primitives it uses for native actions.
pub trait SpellOracle: Send + Sync {
    /// Resolve a cast. `None` means the caster does not know the spell.
    fn cast(
        &self,
        caster: &Combatant,
        spell: &SpellId,
        rng: &mut dyn CombatRng,
    ) -> Option<SpellOutcome>;
}

/// Spell identifier as known by the spell book.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub String);

impl SpellId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved result of casting one spell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellOutcome {
    /// Total damage; split across all living foes when cast on all.
    pub damage: i32,
    /// HP restored to the caster.
    pub healing: i32,
    pub mana_cost: i32,
    /// Defence granted to the caster (Protected).
    pub protection_bonus: i32,
    /// Attack granted to the caster (Empowered).
    pub attack_bonus: i32,
    pub effect: SpellEffect,
    /// Turns the granted statuses last.
    pub duration: u8,
}

/// Special effect carried by a spell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SpellEffect {
    #[default]
    None,
    // Applied to the targets the spell hits.
    Stun,
    Poison,
    Weaken,
    Slow,
    // Applied to the caster.
    Blur,
    Haste,
    Stoneskin,
    Bless,
    /// The spell turns on its caster, who takes the damage instead.
    Backfire,
}

impl SpellEffect {
    /// Effects that land on the spell's targets rather than the caster.
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Stun | Self::Poison | Self::Weaken | Self::Slow)
    }
}
