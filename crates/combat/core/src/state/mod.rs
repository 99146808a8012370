//! Combat state types.
//!
//! Combatants are long-lived objects owned by the caller; a session borrows
//! them mutably for the duration of one encounter and every change made during
//! combat stays on them afterwards.

pub mod combatant;
pub mod loadout;
pub mod status;

pub use combatant::{Attributes, Bounty, Combatant, CombatantId, CombatantKind, Consumables};
pub use loadout::Loadout;
pub use status::{StatusEffect, StatusEffects, StatusKind};
