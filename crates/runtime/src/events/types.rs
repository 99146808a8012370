//! Event types for each topic.

use combat_core::{LogEntry, Outcome};
use serde::{Deserialize, Serialize};

/// A log entry together with its narrated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatMessage {
    /// Encounter number within this runner.
    pub encounter: u64,
    pub entry: LogEntry,
    pub line: String,
}

/// Turn management events (lightweight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    EncounterStarted { encounter: u64, monsters: usize },
    RoundStarted { encounter: u64, round: u32 },
    AwaitingPlayer { encounter: u64, round: u32 },
    Finished { encounter: u64, outcome: Outcome, rounds: u32 },
}
