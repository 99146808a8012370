use std::sync::{Arc, Mutex};
use std::time::Duration;

use combat_core::{CombatEvent, CombatantId, LogEntry};

/// Rendering hint attached to every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Normal,
    /// Round banners and headings.
    Header,
    /// Damage dealt to a foe.
    Damage,
    /// Damage taken by the player's side.
    Danger,
    /// Healing, mana and good news.
    Positive,
    /// Failed actions and refusals.
    Warning,
    /// Deaths, escapes, oaths.
    Emphasis,
    /// Status readouts.
    Muted,
}

/// Output surface for narrated text.
pub trait Display: Send + Sync {
    fn write(&self, text: &str, style: Style);
}

/// Display that records every line; handy for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryDisplay {
    lines: Arc<Mutex<Vec<(String, Style)>>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(String, Style)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn text(&self) -> Vec<String> {
        self.lines().into_iter().map(|(line, _)| line).collect()
    }
}

impl Display for MemoryDisplay {
    fn write(&self, text: &str, style: Style) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((text.to_owned(), style));
        }
    }
}

/// Writes narrated combat lines to a display, pausing between them.
#[derive(Clone)]
pub struct Narrator {
    display: Arc<dyn Display>,
    pacing: Duration,
}

impl Narrator {
    pub fn new(display: Arc<dyn Display>) -> Self {
        Self {
            display,
            pacing: Duration::ZERO,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn display(&self) -> &Arc<dyn Display> {
        &self.display
    }

    /// Writes a line that does not come from the combat log.
    pub fn say(&self, text: &str, style: Style) {
        self.display.write(text, style);
    }

    /// Writes one narrated log entry and waits out the pacing delay.
    pub async fn narrate(&self, entry: &LogEntry, line: &str) {
        self.display.write(line, Self::style_for(&entry.event));
        if !self.pacing.is_zero() && !matches!(entry.event, CombatEvent::StatusReport { .. }) {
            tokio::time::sleep(self.pacing).await;
        }
    }

    /// Picks the style for an event from the player's point of view.
    pub fn style_for(event: &CombatEvent) -> Style {
        let is_player = |id: &CombatantId| *id == CombatantId::PLAYER;
        match event {
            CombatEvent::RoundStarted { .. } => Style::Header,
            CombatEvent::Hit { target, .. } | CombatEvent::PoisonDamage { target, .. } => {
                if is_player(target) {
                    Style::Danger
                } else {
                    Style::Damage
                }
            }
            CombatEvent::Backfired { .. } | CombatEvent::EscapeFailed { .. } => Style::Danger,
            CombatEvent::Healed { .. } | CombatEvent::ManaRestored { .. } => Style::Positive,
            CombatEvent::ActionFailed { .. } | CombatEvent::TurnSkipped { .. } => Style::Warning,
            CombatEvent::Defeated { .. }
            | CombatEvent::Escaped { .. }
            | CombatEvent::SwornToDeath { .. } => Style::Emphasis,
            CombatEvent::StatusReport { .. } => Style::Muted,
            CombatEvent::Missed { .. }
            | CombatEvent::SpellCast { .. }
            | CombatEvent::StatusApplied { .. }
            | CombatEvent::StatusExpired { .. } => Style::Normal,
        }
    }
}
