//! Healing, consumables and the status readout.

use super::{ActionResolver, ActionTag, TurnUse};
use crate::effects;
use crate::engine::Battlefield;
use crate::env::CombatRng;
use crate::event::{CombatEvent, FailReason};
use crate::state::{CombatantId, StatusKind};

impl ActionResolver<'_> {
    /// Quaffs a healing potion for `potion_heal + U(0, level×2)`.
    ///
    /// A full-health drinker keeps the potion.
    pub(super) fn drink_healing_potion(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        action: ActionTag,
        rng: &mut dyn CombatRng,
    ) {
        let Some(drinker) = field.get_mut(actor) else {
            return;
        };
        if drinker.consumables.healing_potions == 0 {
            return self.fail(field, actor, action, FailReason::NoPotions);
        }
        if drinker.is_full_health() {
            return self.fail(field, actor, action, FailReason::AlreadyFull);
        }

        drinker.consumables.healing_potions -= 1;
        let amount = self.config.potion_heal + rng.uniform_int(0, drinker.level as i32 * 2);
        let gained = drinker.heal(amount);
        field.log.push(CombatEvent::Healed {
            target: actor,
            amount: gained,
        });
    }

    /// Mana-fuelled heal for `intelligence + U(1,10)`.
    pub(super) fn quick_heal(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        rng: &mut dyn CombatRng,
    ) {
        let Some(caster) = field.get_mut(actor) else {
            return;
        };
        if caster.is_full_health() {
            return self.fail(field, actor, ActionTag::QuickHeal, FailReason::AlreadyFull);
        }
        if !caster.spend_mana(self.config.quick_heal_mana) {
            return self.fail(field, actor, ActionTag::QuickHeal, FailReason::NoMana);
        }

        let amount = caster.attributes.intelligence + rng.roll_die(10);
        let gained = caster.heal(amount);
        field.log.push(CombatEvent::Healed {
            target: actor,
            amount: gained,
        });
    }

    pub(super) fn drink_mana_potion(&self, field: &mut Battlefield<'_>, actor: CombatantId) {
        let Some(drinker) = field.get_mut(actor) else {
            return;
        };
        if drinker.consumables.mana_potions == 0 {
            return self.fail(field, actor, ActionTag::UseItem, FailReason::NoItem);
        }
        if drinker.mana() >= drinker.max_mana() {
            return self.fail(field, actor, ActionTag::UseItem, FailReason::AlreadyFull);
        }

        drinker.consumables.mana_potions -= 1;
        let gained = drinker.restore_mana(self.config.mana_potion_restore);
        field.log.push(CombatEvent::ManaRestored {
            target: actor,
            amount: gained,
        });
    }

    pub(super) fn use_antidote(&self, field: &mut Battlefield<'_>, actor: CombatantId) {
        let Some((drinker, log)) = field.with_log(actor) else {
            return;
        };
        if drinker.consumables.antidotes == 0 {
            return self.fail(field, actor, ActionTag::UseItem, FailReason::NoItem);
        }
        if !drinker.status.has(StatusKind::Poisoned) {
            return self.fail(field, actor, ActionTag::UseItem, FailReason::NothingToCure);
        }

        drinker.consumables.antidotes -= 1;
        effects::cure(drinker, StatusKind::Poisoned, log);
    }

    /// Reports the actor's condition. Costs nothing.
    pub(super) fn status_report(&self, field: &mut Battlefield<'_>, actor: CombatantId) -> TurnUse {
        if let Some(combatant) = field.get(actor) {
            let event = CombatEvent::StatusReport {
                actor,
                hp: combatant.hp(),
                max_hp: combatant.max_hp(),
                mana: combatant.mana(),
                max_mana: combatant.max_mana(),
                statuses: combatant.status.iter().map(|e| e.kind).collect(),
            };
            field.log.push(event);
        }
        TurnUse::Free
    }
}
