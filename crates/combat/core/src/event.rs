//! Structured combat events and the append-only combat log.
//!
//! Resolution never formats text. Every mechanical change is recorded as a
//! [`CombatEvent`]; presentation layers render them (see
//! [`CombatLog::narrate`]) or stream them elsewhere.

use std::collections::BTreeMap;

use crate::action::ActionTag;
use crate::env::SpellId;
use crate::state::{CombatantId, StatusKind};

/// Why an action produced no mechanical effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailReason {
    #[strum(to_string = "not enough mana")]
    NoMana,
    #[strum(to_string = "no smite charges left")]
    NoCharges,
    #[strum(to_string = "no potions left")]
    NoPotions,
    #[strum(to_string = "nothing left to use")]
    NoItem,
    #[strum(to_string = "already at full health")]
    AlreadyFull,
    #[strum(to_string = "nothing to cure")]
    NothingToCure,
    #[strum(to_string = "no ranged weapon equipped")]
    NoRangedWeapon,
    #[strum(to_string = "spell unknown")]
    UnknownSpell,
    #[strum(to_string = "no target")]
    NoTarget,
    #[strum(to_string = "the attempt failed")]
    RollFailed,
    #[strum(to_string = "the target resisted")]
    Resisted,
    #[strum(to_string = "sworn to fight to the death")]
    Refused,
}

/// How a combatant tried to leave the fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EscapeMethod {
    #[strum(to_string = "retreat")]
    Retreat,
    #[strum(to_string = "plea for mercy")]
    Mercy,
}

/// Details of a landed blow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitDetail {
    /// Damage after defence, halving and the floor; always >= 1.
    pub damage: i32,
    /// Part of `damage` soaked by stoneskin.
    pub absorbed: i32,
    pub critical: bool,
    pub blocked: bool,
    /// The defender's Defending stance halved this hit.
    pub halved: bool,
    pub off_hand: bool,
}

impl HitDetail {
    /// HP actually removed from the target.
    pub fn hp_loss(&self) -> i32 {
        (self.damage - self.absorbed).max(0)
    }
}

/// Everything that can happen during an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    Hit {
        attacker: CombatantId,
        target: CombatantId,
        action: ActionTag,
        detail: HitDetail,
    },
    Missed {
        attacker: CombatantId,
        target: CombatantId,
        action: ActionTag,
    },
    SpellCast {
        caster: CombatantId,
        spell: SpellId,
        mana_cost: i32,
        affect_all: bool,
    },
    Backfired {
        caster: CombatantId,
        damage: i32,
    },
    Healed {
        target: CombatantId,
        amount: i32,
    },
    ManaRestored {
        target: CombatantId,
        amount: i32,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusKind,
        potency: i32,
        remaining: u8,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusKind,
    },
    PoisonDamage {
        target: CombatantId,
        amount: i32,
    },
    TurnSkipped {
        actor: CombatantId,
        status: StatusKind,
    },
    ActionFailed {
        actor: CombatantId,
        action: ActionTag,
        reason: FailReason,
    },
    Escaped {
        actor: CombatantId,
        method: EscapeMethod,
    },
    EscapeFailed {
        actor: CombatantId,
        method: EscapeMethod,
        damage: i32,
    },
    SwornToDeath {
        actor: CombatantId,
    },
    StatusReport {
        actor: CombatantId,
        hp: i32,
        max_hp: i32,
        mana: i32,
        max_mana: i32,
        statuses: Vec<StatusKind>,
    },
    Defeated {
        combatant: CombatantId,
    },
}

/// One log line: an event stamped with the round it happened in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub round: u32,
    pub event: CombatEvent,
}

/// Append-only, ordered record of an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<LogEntry>,
    names: BTreeMap<CombatantId, String>,
    round: u32,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the display name used when narrating `id`.
    pub fn register(&mut self, id: CombatantId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub(crate) fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.entries.push(LogEntry {
            round: self.round,
            event,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`, for incremental consumers.
    pub fn since(&self, index: usize) -> &[LogEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name_of(&self, id: CombatantId) -> &str {
        self.names.get(&id).map_or("someone", String::as_str)
    }

    /// Renders every entry as a line of prose.
    pub fn narrate(&self) -> Vec<String> {
        self.entries.iter().map(|e| self.line(e)).collect()
    }

    /// Renders one entry as a line of prose.
    pub fn line(&self, entry: &LogEntry) -> String {
        let name = |id: CombatantId| self.name_of(id);

        match &entry.event {
            CombatEvent::RoundStarted { round } => format!("-- Round {round} --"),
            CombatEvent::Hit {
                attacker,
                target,
                action,
                detail,
            } => {
                let mut line = format!(
                    "{} {} {} for {} damage",
                    name(*attacker),
                    action.verb(detail.off_hand),
                    name(*target),
                    detail.damage
                );
                if detail.critical {
                    line.push_str(" (critical!)");
                }
                if detail.blocked {
                    line.push_str(" (partly blocked)");
                }
                if detail.halved {
                    line.push_str(" (defended)");
                }
                if detail.absorbed > 0 {
                    line.push_str(&format!(" ({} absorbed by stoneskin)", detail.absorbed));
                }
                line
            }
            CombatEvent::Missed {
                attacker, target, ..
            } => format!("{} misses {}", name(*attacker), name(*target)),
            CombatEvent::SpellCast {
                caster,
                spell,
                affect_all,
                ..
            } => {
                if *affect_all {
                    format!("{} casts {spell} on all foes", name(*caster))
                } else {
                    format!("{} casts {spell}", name(*caster))
                }
            }
            CombatEvent::Backfired { caster, damage } => {
                format!("The spell backfires on {} for {damage} damage", name(*caster))
            }
            CombatEvent::Healed { target, amount } => {
                format!("{} recovers {amount} HP", name(*target))
            }
            CombatEvent::ManaRestored { target, amount } => {
                format!("{} recovers {amount} mana", name(*target))
            }
            CombatEvent::StatusApplied { target, status, .. } => {
                format!("{} is now affected by {status}", name(*target))
            }
            CombatEvent::StatusExpired { target, status } => {
                format!("{} is no longer affected by {status}", name(*target))
            }
            CombatEvent::PoisonDamage { target, amount } => {
                format!("{} suffers {amount} poison damage", name(*target))
            }
            CombatEvent::TurnSkipped { actor, status } => {
                format!("{} loses the turn ({status})", name(*actor))
            }
            CombatEvent::ActionFailed {
                actor,
                action,
                reason,
            } => format!("{} tries to {action}, but {reason}", name(*actor)),
            CombatEvent::Escaped { actor, method } => {
                format!("{} escapes by {method}", name(*actor))
            }
            CombatEvent::EscapeFailed {
                actor,
                method,
                damage,
            } => format!(
                "{}'s {method} fails and costs {damage} HP",
                name(*actor)
            ),
            CombatEvent::SwornToDeath { actor } => {
                format!("{} swears to fight to the death", name(*actor))
            }
            CombatEvent::StatusReport {
                actor,
                hp,
                max_hp,
                mana,
                max_mana,
                statuses,
            } => {
                let mut line = format!(
                    "{}: HP {hp}/{max_hp}, mana {mana}/{max_mana}",
                    name(*actor)
                );
                if !statuses.is_empty() {
                    let list: Vec<String> = statuses.iter().map(ToString::to_string).collect();
                    line.push_str(&format!(", {}", list.join(", ")));
                }
                line
            }
            CombatEvent::Defeated { combatant } => format!("{} falls", name(*combatant)),
        }
    }
}
