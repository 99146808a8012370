//! Data-driven combat content and loaders.
//!
//! This crate turns RON/TOML data files into values the combat core consumes:
//! - Monster templates (bestiary, RON)
//! - Hero sheets for the player and teammates (RON)
//! - Spell book implementing [`combat_core::SpellOracle`] (RON)
//! - Loot table implementing [`combat_core::LootOracle`] (RON)
//! - Balance configuration ([`combat_core::CombatConfig`], TOML)
//!
//! Content is consumed by the runtime and never appears in session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub mod template;

#[cfg(feature = "loaders")]
pub use loaders::{
    Bestiary, BestiaryLoader, ConfigLoader, ContentFactory, HeroLoader, HeroSheet, LoadResult,
    LootEntry, LootTable, LootTableLoader, SpellBook, SpellBookLoader, SpellEntry,
};
#[cfg(feature = "loaders")]
pub use template::CombatantTemplate;
