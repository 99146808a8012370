//! Traits and helpers that expose external collaborators to the combat core.
//!
//! The core never owns spell content, loot tables or randomness; callers plug
//! them in through the oracles bundled in [`CombatEnv`] and the [`CombatRng`]
//! handed to each step.

mod loot;
pub mod rng;
mod spells;

pub use loot::{LootOffer, LootOracle, LootSlot};
pub use rng::{CombatRng, PcgRng, SequenceRng, derive_seed};
pub use spells::{SpellEffect, SpellId, SpellOracle, SpellOutcome};

/// Encounter facts that are not part of any combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterContext {
    /// Dungeon depth; scales the penalty for failed escapes.
    pub depth: u32,
}

impl EncounterContext {
    pub const fn at_depth(depth: u32) -> Self {
        Self { depth }
    }
}

/// Aggregates optional oracle references for an encounter.
#[derive(Clone, Copy, Default)]
pub struct CombatEnv<'a> {
    spells: Option<&'a dyn SpellOracle>,
    loot: Option<&'a dyn LootOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spells(mut self, spells: &'a dyn SpellOracle) -> Self {
        self.spells = Some(spells);
        self
    }

    pub fn with_loot(mut self, loot: &'a dyn LootOracle) -> Self {
        self.loot = Some(loot);
        self
    }

    pub fn spells(&self) -> Option<&'a dyn SpellOracle> {
        self.spells
    }

    pub fn loot(&self) -> Option<&'a dyn LootOracle> {
        self.loot
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("spells", &self.spells.is_some())
            .field("loot", &self.loot.is_some())
            .finish()
    }
}
