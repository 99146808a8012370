//! Stances and opposed-roll tricks. None of these touch HP.

use super::targeting::{keenest_foe, resolve_target};
use super::{ActionResolver, ActionTag};
use crate::effects;
use crate::engine::Battlefield;
use crate::env::CombatRng;
use crate::event::FailReason;
use crate::state::{CombatantId, StatusKind};

impl ActionResolver<'_> {
    /// Dexterity against the target's strength; strips its weapon.
    pub(super) fn disarm(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::Disarm, FailReason::NoTarget);
        };
        let (Some(attacker), Some(defender)) = (field.get(actor), field.get(target)) else {
            return;
        };
        let (skill, grip) = (attacker.attributes.dexterity, defender.attributes.strength);

        if !self.opposed(skill, grip, rng) {
            return self.fail(field, actor, ActionTag::Disarm, FailReason::Resisted);
        }
        let duration = self.config.disarm_duration;
        if let Some((defender, log)) = field.with_log(target) {
            effects::apply(defender, StatusKind::Disarmed, 0, duration, log);
        }
    }

    /// Charisma against the target's intelligence; lowers its defence.
    pub(super) fn taunt(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::Taunt, FailReason::NoTarget);
        };
        let (Some(attacker), Some(defender)) = (field.get(actor), field.get(target)) else {
            return;
        };
        let (presence, wits) = (attacker.attributes.charisma, defender.attributes.intelligence);

        if !self.opposed(presence, wits, rng) {
            return self.fail(field, actor, ActionTag::Taunt, FailReason::Resisted);
        }
        let (penalty, duration) = (self.config.taunt_defence_penalty, self.config.taunt_duration);
        if let Some((defender, log)) = field.with_log(target) {
            effects::apply(defender, StatusKind::Taunted, penalty, duration, log);
        }
    }

    /// Dexterity against the sharpest enemy's intelligence. Success grants
    /// advantage on the next swing and a sure backstab.
    pub(super) fn hide(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        rng: &mut dyn CombatRng,
    ) {
        let Some(watcher) = keenest_foe(field, actor) else {
            return self.fail(field, actor, ActionTag::Hide, FailReason::NoTarget);
        };
        let (Some(sneak), Some(watcher)) = (field.get(actor), field.get(watcher)) else {
            return;
        };
        let (stealth, wits) = (sneak.attributes.dexterity, watcher.attributes.intelligence);

        if !self.opposed(stealth, wits, rng) {
            return self.fail(field, actor, ActionTag::Hide, FailReason::RollFailed);
        }
        if let Some((sneak, log)) = field.with_log(actor) {
            effects::apply(sneak, StatusKind::Hidden, 0, 0, log);
        }
    }

    pub(super) fn rage(&self, field: &mut Battlefield<'_>, actor: CombatantId) {
        let duration = self.config.stance_duration;
        if let Some((combatant, log)) = field.with_log(actor) {
            effects::apply(combatant, StatusKind::Raging, 0, duration, log);
        }
    }

    pub(super) fn defend(&self, field: &mut Battlefield<'_>, actor: CombatantId) {
        if let Some((combatant, log)) = field.with_log(actor) {
            effects::apply(combatant, StatusKind::Defending, 0, 0, log);
        }
    }
}
