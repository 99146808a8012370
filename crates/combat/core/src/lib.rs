pub mod action;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use action::{ActionResolver, ActionTag, CombatAction, ItemKind, TurnUse};
pub use combat::{AttackStat, Swing, SwingProfile};
pub use config::CombatConfig;
pub use effects::TickOutcome;
pub use engine::{
    AutoCombat, Battlefield, CombatResult, CombatSession, CombatantSnapshot, DefeatedMonster,
    EncounterOptions, LootDrop, Outcome, Phase, PlayerPolicy, Progress, Rewards, ScriptedPolicy,
    SessionError, SessionFlags, SessionView, TurnScheduler, run_combat, run_pvp,
};
pub use env::{
    CombatEnv, CombatRng, EncounterContext, LootOffer, LootOracle, LootSlot, PcgRng, SequenceRng,
    SpellEffect, SpellId, SpellOracle, SpellOutcome, derive_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use event::{CombatEvent, CombatLog, EscapeMethod, FailReason, HitDetail, LogEntry};
pub use state::{
    Attributes, Bounty, Combatant, CombatantId, CombatantKind, Consumables, Loadout, StatusEffect,
    StatusEffects, StatusKind,
};
