//! Spell casting. Spell content lives behind [`crate::env::SpellOracle`];
//! this module only applies the resolved [`SpellOutcome`].

use super::targeting::resolve_target;
use super::{ActionResolver, ActionTag};
use crate::combat::{armor_soak, split_evenly};
use crate::effects;
use crate::engine::Battlefield;
use crate::env::{CombatRng, SpellEffect, SpellId, SpellOutcome};
use crate::event::{CombatEvent, FailReason};
use crate::state::{CombatantId, StatusKind};

impl ActionResolver<'_> {
    pub(super) fn cast_spell(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        spell: &SpellId,
        requested: Option<CombatantId>,
        affect_all: bool,
        rng: &mut dyn CombatRng,
    ) {
        let outcome = match (self.env.spells(), field.get(actor)) {
            (Some(oracle), Some(caster)) => oracle.cast(caster, spell, rng),
            _ => None,
        };
        let Some(outcome) = outcome else {
            return self.fail(field, actor, ActionTag::CastSpell, FailReason::UnknownSpell);
        };

        let paid = field
            .get_mut(actor)
            .is_some_and(|caster| caster.spend_mana(outcome.mana_cost));
        if !paid {
            return self.fail(field, actor, ActionTag::CastSpell, FailReason::NoMana);
        }
        field.log.push(CombatEvent::SpellCast {
            caster: actor,
            spell: spell.clone(),
            mana_cost: outcome.mana_cost.max(0),
            affect_all,
        });

        if outcome.effect == SpellEffect::Backfire {
            return self.backfire(field, actor, &outcome);
        }
        self.bolster(field, actor, &outcome);

        if outcome.damage <= 0 && !outcome.effect.is_hostile() {
            return;
        }

        if affect_all {
            // Everyone standing when the spell goes off takes a share, even if
            // an earlier share in this pass already finished the fight.
            let targets = field.foes_of(actor);
            let share = split_evenly(outcome.damage, targets.len());
            for target in targets {
                self.blast(field, actor, target, share, &outcome, rng);
            }
        } else if let Some(target) = resolve_target(field, actor, requested, rng) {
            self.blast(field, actor, target, outcome.damage, &outcome, rng);
        }
    }

    fn backfire(&self, field: &mut Battlefield<'_>, actor: CombatantId, outcome: &SpellOutcome) {
        if let Some((caster, log)) = field.with_log(actor) {
            let damage = caster.take_damage(outcome.damage.max(1));
            log.push(CombatEvent::Backfired {
                caster: actor,
                damage,
            });
        }
        field.settle(actor);
    }

    /// Caster-side parts of an outcome: healing, bonuses and self buffs.
    fn bolster(&self, field: &mut Battlefield<'_>, actor: CombatantId, outcome: &SpellOutcome) {
        let Some((caster, log)) = field.with_log(actor) else {
            return;
        };
        let duration = outcome.duration;

        if outcome.healing > 0 {
            let amount = caster.heal(outcome.healing);
            log.push(CombatEvent::Healed {
                target: actor,
                amount,
            });
        }
        if outcome.protection_bonus > 0 {
            effects::apply(caster, StatusKind::Protected, outcome.protection_bonus, duration, log);
        }
        if outcome.attack_bonus > 0 {
            effects::apply(caster, StatusKind::Empowered, outcome.attack_bonus, duration, log);
        }

        match outcome.effect {
            SpellEffect::Blur => {
                effects::apply(caster, StatusKind::Blurred, self.config.blur_penalty, duration, log)
            }
            SpellEffect::Haste => effects::apply(caster, StatusKind::Hasted, 0, duration, log),
            SpellEffect::Stoneskin => {
                effects::apply(caster, StatusKind::Stoneskin, self.config.stoneskin_pool, 0, log)
            }
            SpellEffect::Bless => effects::apply(caster, StatusKind::Blessed, 0, duration, log),
            SpellEffect::None
            | SpellEffect::Stun
            | SpellEffect::Poison
            | SpellEffect::Weaken
            | SpellEffect::Slow
            | SpellEffect::Backfire => {}
        }
    }

    /// Spell damage and hostile effect on one target.
    fn blast(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        target: CombatantId,
        damage: i32,
        outcome: &SpellOutcome,
        rng: &mut dyn CombatRng,
    ) {
        if outcome.damage > 0 {
            let Some(defender) = field.get(target) else {
                return;
            };
            let amount = armor_soak(defender, damage, rng);
            self.strike_direct(field, actor, target, amount, ActionTag::CastSpell);
        }

        let status = match outcome.effect {
            SpellEffect::Stun => StatusKind::Stunned,
            SpellEffect::Poison => StatusKind::Poisoned,
            SpellEffect::Weaken => StatusKind::Weakened,
            SpellEffect::Slow => StatusKind::Slowed,
            _ => return,
        };
        if !field.is_alive(target) {
            return;
        }
        if let Some((defender, log)) = field.with_log(target) {
            effects::apply(defender, status, 0, outcome.duration, log);
        }
    }
}
