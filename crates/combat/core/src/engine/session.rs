//! The encounter aggregate root.

use super::arena::Battlefield;
use super::errors::SessionError;
use super::outcome::Outcome;
use super::reward::{self, Rewards};
use super::scheduler::{Phase, Progress, TurnScheduler};
use super::view::SessionView;
use crate::action::{ActionResolver, CombatAction};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, CombatRng, EncounterContext, LootOffer};
use crate::event::CombatLog;
use crate::state::{Bounty, Combatant, CombatantId};

/// A monster killed during the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatedMonster {
    pub id: CombatantId,
    /// Position in the monster list the session was built from.
    pub index: usize,
    pub name: String,
    pub level: u32,
    pub bounty: Bounty,
}

/// Loot offered by one defeated monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub from: CombatantId,
    pub offer: LootOffer,
}

/// Everything a finished encounter hands back to its caller.
///
/// Combatant state is not copied here: the session mutated the caller's
/// combatants in place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub outcome: Outcome,
    pub rounds: u32,
    /// In the order they fell.
    pub defeated: Vec<DefeatedMonster>,
    pub log: CombatLog,
    pub rewards: Rewards,
    /// Offers to accept or decline. Only a victory produces any.
    pub loot: Vec<LootDrop>,
}

#[derive(Clone, Debug)]
struct Conclusion {
    outcome: Outcome,
    rewards: Rewards,
    loot: Vec<LootDrop>,
}

/// One encounter between the player's party and a monster roster.
///
/// The session borrows every combatant mutably for its whole life and is
/// driven one step at a time: call [`advance`](Self::advance) until it asks
/// for the player's action, hand that in with
/// [`submit_player_action`](Self::submit_player_action), and repeat until it
/// reports [`Progress::Finished`]. A finished session cannot be restarted.
pub struct CombatSession<'a> {
    field: Battlefield<'a>,
    scheduler: TurnScheduler,
    config: CombatConfig,
    env: CombatEnv<'a>,
    context: EncounterContext,
    conclusion: Option<Conclusion>,
}

impl<'a> CombatSession<'a> {
    pub fn new(
        player: &'a mut Combatant,
        monsters: &'a mut [Combatant],
        teammates: &'a mut [Combatant],
    ) -> Self {
        Self {
            field: Battlefield::new(player, teammates, monsters),
            scheduler: TurnScheduler::new(),
            config: CombatConfig::default(),
            env: CombatEnv::new(),
            context: EncounterContext::default(),
            conclusion: None,
        }
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_env(mut self, env: CombatEnv<'a>) -> Self {
        self.env = env;
        self
    }

    pub fn with_context(mut self, context: EncounterContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn log(&self) -> &CombatLog {
        self.field.log()
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn phase(&self) -> &Phase {
        self.scheduler.phase()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.scheduler.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.conclusion.is_some()
    }

    pub fn battlefield(&self) -> &Battlefield<'a> {
        &self.field
    }

    /// Snapshot for whoever chooses the player's action.
    pub fn view(&self) -> SessionView {
        let free_actions = match self.scheduler.phase() {
            Phase::AwaitingPlayer { free_actions } => *free_actions,
            _ => 0,
        };
        SessionView::capture(&self.field, self.scheduler.round(), free_actions)
    }

    /// Runs one scheduler step. Does nothing while a player action is due.
    pub fn advance(&mut self, rng: &mut dyn CombatRng) -> Progress {
        let resolver = ActionResolver::new(&self.config, self.env, self.context);
        let progress = self
            .scheduler
            .step(&mut self.field, &resolver, &self.config, rng);
        self.settle(progress, rng);
        progress
    }

    /// Resolves the player's action for this turn.
    ///
    /// A free action leaves the session awaiting another choice; past
    /// `max_free_actions` in one turn a free action is replaced by an attack.
    pub fn submit_player_action(
        &mut self,
        action: CombatAction,
        rng: &mut dyn CombatRng,
    ) -> Result<Progress, SessionError> {
        let free_actions = match self.scheduler.phase() {
            Phase::AwaitingPlayer { free_actions } => *free_actions,
            Phase::Terminal(outcome) => return Err(SessionError::AlreadyFinished(*outcome)),
            other => {
                return Err(SessionError::NotAwaitingAction {
                    phase: other.name(),
                });
            }
        };
        if let Some(target) = action.target().filter(|id| !self.field.contains(*id)) {
            return Err(SessionError::UnknownTarget(target));
        }

        let action = match action {
            CombatAction::Status if free_actions >= self.config.max_free_actions => {
                CombatAction::attack()
            }
            action => action,
        };

        let resolver = ActionResolver::new(&self.config, self.env, self.context);
        let used = resolver.resolve(&mut self.field, CombatantId::PLAYER, &action, rng);
        let progress = self.scheduler.player_acted(&self.field, used);
        self.settle(progress, rng);
        Ok(progress)
    }

    /// Stops the session with [`Outcome::Interrupted`]. Nothing is awarded.
    pub fn interrupt(&mut self) {
        if self.conclusion.is_some() {
            return;
        }
        self.scheduler.halt(Outcome::Interrupted);
        self.conclusion = Some(Conclusion {
            outcome: Outcome::Interrupted,
            rewards: Rewards::none(),
            loot: Vec::new(),
        });
    }

    /// Computes rewards and loot the first time the session turns terminal.
    fn settle(&mut self, progress: Progress, rng: &mut dyn CombatRng) {
        let Progress::Finished(outcome) = progress else {
            return;
        };
        if self.conclusion.is_some() {
            return;
        }

        let rewards = reward::calculate(outcome, &self.field, rng);
        let mut loot = Vec::new();
        if let (Outcome::Victory, Some(oracle)) = (outcome, self.env.loot()) {
            for id in self.field.defeated() {
                let offer = self
                    .field
                    .get(*id)
                    .and_then(|monster| oracle.loot_for(monster, rng));
                if let Some(offer) = offer {
                    loot.push(LootDrop { from: *id, offer });
                }
            }
        }

        self.conclusion = Some(Conclusion {
            outcome,
            rewards,
            loot,
        });
    }

    /// The result of a finished session.
    pub fn into_result(self) -> Result<CombatResult, SessionError> {
        if self.conclusion.is_none() {
            return Err(SessionError::NotFinished);
        }
        Ok(self.finish())
    }

    /// The result, interrupting the session first if it is still running.
    pub fn finish(mut self) -> CombatResult {
        self.interrupt();
        let conclusion = self.conclusion.take().unwrap_or(Conclusion {
            outcome: Outcome::Interrupted,
            rewards: Rewards::none(),
            loot: Vec::new(),
        });

        let defeated = self
            .field
            .defeated()
            .iter()
            .filter_map(|id| {
                let monster = self.field.get(*id)?;
                Some(DefeatedMonster {
                    id: *id,
                    index: self.field.monster_index(*id)?,
                    name: monster.name.clone(),
                    level: monster.level,
                    bounty: monster.bounty,
                })
            })
            .collect();

        CombatResult {
            outcome: conclusion.outcome,
            rounds: self.scheduler.round(),
            defeated,
            log: self.field.into_log(),
            rewards: conclusion.rewards,
            loot: conclusion.loot,
        }
    }
}

impl core::fmt::Debug for CombatSession<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatSession")
            .field("phase", self.scheduler.phase())
            .field("round", &self.scheduler.round())
            .field("field", &self.field)
            .finish()
    }
}
