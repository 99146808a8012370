use std::collections::VecDeque;

use super::view::SessionView;
use crate::action::CombatAction;

/// Chooses the player's action when the synchronous driver needs one.
pub trait PlayerPolicy {
    fn choose_action(&mut self, view: &SessionView) -> CombatAction;
}

/// Always attacks a random living monster.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoCombat;

impl PlayerPolicy for AutoCombat {
    fn choose_action(&mut self, _view: &SessionView) -> CombatAction {
        CombatAction::attack()
    }
}

/// Plays back a fixed list of actions, then attacks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    actions: VecDeque<CombatAction>,
}

impl ScriptedPolicy {
    pub fn new(actions: impl IntoIterator<Item = CombatAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl PlayerPolicy for ScriptedPolicy {
    fn choose_action(&mut self, _view: &SessionView) -> CombatAction {
        self.actions.pop_front().unwrap_or_default()
    }
}
