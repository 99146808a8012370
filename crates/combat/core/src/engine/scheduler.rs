//! Turn order within and across rounds.
//!
//! ```text
//! RoundStart -> PlayerTurn -> AwaitingPlayer -> TeammatesTurn -> MonstersTurn -> RoundEnd
//!      ^                                                                          |
//!      +--------------------------------------------------------------------------+
//! ```
//!
//! Any state can exit to `Terminal`. The terminal guards run at the start of
//! every step and again after it, so a death or escape cuts the round short
//! before anyone else acts.

use super::ai;
use super::arena::Battlefield;
use super::outcome::{self, Outcome};
use crate::action::{ActionResolver, TurnUse};
use crate::config::CombatConfig;
use crate::effects::{self, TickOutcome};
use crate::env::CombatRng;
use crate::event::CombatEvent;
use crate::state::CombatantId;

/// Scheduler state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    RoundStart,
    /// The player's statuses tick before a choice is requested.
    PlayerTurn,
    AwaitingPlayer {
        free_actions: u32,
    },
    /// `next` is a position in the teammate list.
    TeammatesTurn {
        next: usize,
    },
    /// `queue` holds the monsters alive when the phase began.
    MonstersTurn {
        queue: Vec<CombatantId>,
        next: usize,
    },
    RoundEnd,
    Terminal(Outcome),
}

impl Phase {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RoundStart => "round start",
            Self::PlayerTurn => "player turn",
            Self::AwaitingPlayer { .. } => "awaiting player",
            Self::TeammatesTurn { .. } => "teammates turn",
            Self::MonstersTurn { .. } => "monsters turn",
            Self::RoundEnd => "round end",
            Self::Terminal(_) => "terminal",
        }
    }
}

/// What the caller should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Call `advance` again.
    Running,
    /// Submit the player's action.
    AwaitingPlayer,
    Finished(Outcome),
}

/// Finite-state machine sequencing the turns of one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnScheduler {
    phase: Phase,
    round: u32,
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::RoundStart,
            round: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current round number, starting at 1 once the first round begins.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Forces the terminal state. No effect once terminal.
    pub(crate) fn halt(&mut self, outcome: Outcome) {
        if self.outcome().is_none() {
            self.phase = Phase::Terminal(outcome);
        }
    }

    /// Runs the terminal guards, entering `Terminal` when one fires.
    fn guard(&mut self, field: &Battlefield<'_>) -> Option<Outcome> {
        if let Some(outcome) = self.outcome() {
            return Some(outcome);
        }
        let outcome = outcome::evaluate(field)?;
        self.phase = Phase::Terminal(outcome);
        Some(outcome)
    }

    fn progress(&mut self, field: &Battlefield<'_>) -> Progress {
        if let Some(outcome) = self.guard(field) {
            return Progress::Finished(outcome);
        }
        match self.phase {
            Phase::AwaitingPlayer { .. } => Progress::AwaitingPlayer,
            _ => Progress::Running,
        }
    }

    /// Performs one unit of work: starting a round, ticking the player, one
    /// teammate's turn, one monster's turn, or closing the round.
    pub(crate) fn step(
        &mut self,
        field: &mut Battlefield<'_>,
        resolver: &ActionResolver<'_>,
        config: &CombatConfig,
        rng: &mut dyn CombatRng,
    ) -> Progress {
        if let Some(outcome) = self.guard(field) {
            return Progress::Finished(outcome);
        }

        let phase = core::mem::replace(&mut self.phase, Phase::RoundEnd);
        self.phase = match phase {
            Phase::RoundStart => {
                if self.round >= config.max_rounds {
                    Phase::Terminal(Outcome::Stalemate)
                } else {
                    self.round += 1;
                    field.log.set_round(self.round);
                    field.log.push(CombatEvent::RoundStarted { round: self.round });
                    Phase::PlayerTurn
                }
            }
            Phase::PlayerTurn => match tick(field, CombatantId::PLAYER, rng) {
                TickOutcome::Ready => Phase::AwaitingPlayer { free_actions: 0 },
                TickOutcome::Stunned | TickOutcome::Died => Phase::TeammatesTurn { next: 0 },
            },
            awaiting @ Phase::AwaitingPlayer { .. } => awaiting,
            Phase::TeammatesTurn { next } => {
                let up = field
                    .teammate_ids()
                    .enumerate()
                    .skip(next)
                    .find(|(_, id)| field.is_alive(*id));
                match up {
                    Some((position, teammate)) => {
                        if tick(field, teammate, rng) == TickOutcome::Ready {
                            let action = ai::teammate_action(field);
                            resolver.resolve(field, teammate, &action, rng);
                        }
                        Phase::TeammatesTurn { next: position + 1 }
                    }
                    None => Phase::MonstersTurn {
                        queue: field.living_monsters(),
                        next: 0,
                    },
                }
            }
            Phase::MonstersTurn { queue, next } => match queue.get(next).copied() {
                Some(monster) => {
                    if field.is_alive(monster) && tick(field, monster, rng) == TickOutcome::Ready {
                        let action = ai::monster_action(field, monster, config, rng);
                        resolver.resolve(field, monster, &action, rng);
                    }
                    Phase::MonstersTurn {
                        queue,
                        next: next + 1,
                    }
                }
                None => Phase::RoundEnd,
            },
            Phase::RoundEnd => Phase::RoundStart,
            terminal @ Phase::Terminal(_) => terminal,
        };

        self.progress(field)
    }

    /// Moves past the player's choice once it has been resolved.
    pub(crate) fn player_acted(&mut self, field: &Battlefield<'_>, used: TurnUse) -> Progress {
        if let Phase::AwaitingPlayer { free_actions } = self.phase {
            self.phase = match used {
                TurnUse::Free => Phase::AwaitingPlayer {
                    free_actions: free_actions + 1,
                },
                TurnUse::Consumed => Phase::TeammatesTurn { next: 0 },
            };
        }
        self.progress(field)
    }
}

/// Start-of-turn status tick for one combatant, settling a poison death.
fn tick(field: &mut Battlefield<'_>, id: CombatantId, rng: &mut dyn CombatRng) -> TickOutcome {
    let outcome = match field.with_log(id) {
        Some((combatant, log)) => effects::tick(combatant, rng, log),
        None => return TickOutcome::Died,
    };
    field.settle(id);
    outcome
}
