//! Status effect engine: applying and ticking timed effects.
//!
//! Every combatant ticks once at the start of its own turn. Poison bites
//! first, then every timed effect counts down by one and expires at zero. A
//! combatant that was stunned when the tick began loses the turn.

use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::event::{CombatEvent, CombatLog};
use crate::state::{Combatant, StatusEffect, StatusKind};

/// What the start-of-turn tick left the combatant able to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ready,
    Stunned,
    Died,
}

/// Ticks `combatant`'s statuses for the start of its turn.
pub fn tick(combatant: &mut Combatant, rng: &mut dyn CombatRng, log: &mut CombatLog) -> TickOutcome {
    let id = combatant.id;

    if combatant.status.has(StatusKind::Poisoned) {
        let amount = rng.uniform_int(1, CombatConfig::POISON_TICK_MAX);
        let lost = combatant.take_damage(amount);
        log.push(CombatEvent::PoisonDamage {
            target: id,
            amount: lost,
        });
        count_down(combatant, StatusKind::Poisoned, log);

        if !combatant.is_alive() {
            return TickOutcome::Died;
        }
    }

    let stunned = combatant.status.has(StatusKind::Stunned);

    let timed: Vec<StatusKind> = combatant
        .status
        .iter()
        .map(|effect| effect.kind)
        .filter(|kind| kind.is_timed() && *kind != StatusKind::Poisoned)
        .collect();
    for kind in timed {
        count_down(combatant, kind, log);
    }

    if stunned {
        log.push(CombatEvent::TurnSkipped {
            actor: id,
            status: StatusKind::Stunned,
        });
        return TickOutcome::Stunned;
    }
    TickOutcome::Ready
}

fn count_down(combatant: &mut Combatant, kind: StatusKind, log: &mut CombatLog) {
    let expired = match combatant.status.get_mut(kind) {
        Some(effect) => {
            effect.remaining = effect.remaining.saturating_sub(1);
            effect.remaining == 0
        }
        None => false,
    };

    if expired {
        combatant.status.remove(kind);
        log.push(CombatEvent::StatusExpired {
            target: combatant.id,
            status: kind,
        });
    }
}

/// Applies (or overwrites) a status and records it.
///
/// Timed kinds last at least one turn; consumable kinds ignore `remaining`.
pub fn apply(
    combatant: &mut Combatant,
    kind: StatusKind,
    potency: i32,
    remaining: u8,
    log: &mut CombatLog,
) {
    let remaining = if kind.is_timed() { remaining.max(1) } else { 0 };
    combatant
        .status
        .apply(StatusEffect::new(kind, potency, remaining));
    log.push(CombatEvent::StatusApplied {
        target: combatant.id,
        status: kind,
        potency,
        remaining,
    });
}

/// Removes a status if present, recording the expiry.
pub fn cure(combatant: &mut Combatant, kind: StatusKind, log: &mut CombatLog) -> bool {
    if combatant.status.remove(kind).is_none() {
        return false;
    }
    log.push(CombatEvent::StatusExpired {
        target: combatant.id,
        status: kind,
    });
    true
}
