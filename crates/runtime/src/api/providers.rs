//! Asynchronous abstraction for sourcing the player's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or auto-combat.
use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatAction, Combatant, LootOffer, SessionView};
use tokio::sync::Mutex;

use super::errors::Result;

/// Trait for providing the player's actions based on the current session view.
///
/// Different implementations can handle:
/// - Player input (from a terminal prompt)
/// - Auto-combat after "fight to the death"
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the player's next action.
    ///
    /// # Arguments
    /// * `view` - Read-only snapshot of the encounter
    ///
    /// # Returns
    /// The action to submit, or an error if no action can be obtained. An
    /// error interrupts the encounter.
    async fn choose_action(&self, view: &SessionView) -> Result<CombatAction>;

    /// Decide whether the player equips a dropped item.
    ///
    /// The default accepts strict upgrades only.
    async fn accept_loot(&self, offer: &LootOffer, player: &Combatant) -> Result<bool> {
        Ok(offer.is_upgrade_for(player))
    }
}

/// Always attacks a random living monster.
pub struct AutoCombatProvider;

#[async_trait]
impl ActionProvider for AutoCombatProvider {
    async fn choose_action(&self, _view: &SessionView) -> Result<CombatAction> {
        Ok(CombatAction::attack())
    }
}

/// Plays back a fixed list of actions, then attacks.
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<CombatAction>>,
    loot: Mutex<VecDeque<bool>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = CombatAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
            loot: Mutex::new(VecDeque::new()),
        }
    }

    /// Scripted answers to loot offers; once exhausted every offer is declined.
    pub fn with_loot_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            loot: Mutex::new(answers.into_iter().collect()),
            ..self
        }
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn choose_action(&self, _view: &SessionView) -> Result<CombatAction> {
        Ok(self
            .actions
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(CombatAction::attack))
    }

    async fn accept_loot(&self, _offer: &LootOffer, _player: &Combatant) -> Result<bool> {
        Ok(self.loot.lock().await.pop_front().unwrap_or(false))
    }
}
