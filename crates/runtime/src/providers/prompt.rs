//! Interactive player provider built on an [`InputSource`].

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use combat_core::{CombatAction, Combatant, LootOffer, LootSlot, SessionView, SpellId};
use tokio::sync::Mutex;

use super::command::{menu_lines, parse_command};
use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::presentation::{Narrator, Style};

/// Source of typed player choices (terminal, socket, test script).
#[async_trait]
pub trait InputSource: Send + Sync {
    /// Shows `prompt` and waits for one line. `Ok(None)` means the input is closed.
    async fn get_choice(&self, prompt: &str) -> io::Result<Option<String>>;
}

/// Input source that replays canned lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn get_choice(&self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.lock().await.push(prompt.to_owned());
        Ok(self.lines.lock().await.pop_front())
    }
}

/// Asks the player for each action through an [`InputSource`] and renders
/// the menu through a [`Narrator`].
pub struct PromptProvider<I> {
    input: I,
    narrator: Narrator,
}

impl<I: InputSource> PromptProvider<I> {
    pub fn new(input: I, narrator: Narrator) -> Self {
        Self { input, narrator }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    async fn ask(&self, prompt: &str, kind: ProviderKind) -> Result<String> {
        match self.input.get_choice(prompt).await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(RuntimeError::InputClosed { kind }),
            Err(source) => Err(RuntimeError::Input { kind, source }),
        }
    }
}

#[async_trait]
impl<I: InputSource> ActionProvider for PromptProvider<I> {
    async fn choose_action(&self, view: &SessionView) -> Result<CombatAction> {
        for line in menu_lines(view) {
            self.narrator.say(&line, Style::Muted);
        }

        let choice = self.ask("What will you do? ", ProviderKind::Player).await?;
        let mut action = parse_command(&choice, view);

        if let CombatAction::CastSpell { spell, .. } = &mut action
            && spell.as_str().is_empty()
        {
            let name = self.ask("Which spell? ", ProviderKind::Player).await?;
            *spell = SpellId::new(name.trim());
        }

        tracing::debug!(input = %choice.trim(), action = %action.tag(), "player command parsed");
        Ok(action)
    }

    async fn accept_loot(&self, offer: &LootOffer, player: &Combatant) -> Result<bool> {
        let current = match offer.slot {
            LootSlot::Weapon => player.weapon_power,
            LootSlot::Armor => player.armor_power,
        };
        self.narrator.say(
            &format!(
                "Found {} ({} power {}, yours is {}).",
                offer.item,
                offer.slot.to_string().to_lowercase(),
                offer.power,
                current
            ),
            Style::Positive,
        );

        let answer = self.ask("Equip it? [y/N] ", ProviderKind::Loot).await?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
