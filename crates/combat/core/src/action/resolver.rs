use super::{ActionTag, CombatAction, ItemKind};
use crate::combat::{self, Swing, SwingProfile};
use crate::config::CombatConfig;
use crate::engine::Battlefield;
use crate::env::{CombatEnv, CombatRng, EncounterContext};
use crate::event::{CombatEvent, FailReason};
use crate::state::CombatantId;

/// Whether an action used up the actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnUse {
    Consumed,
    /// Informational actions; the actor may choose again.
    Free,
}

/// Executes one action for one actor against the battlefield.
///
/// Resolution never fails: unmet preconditions and failed rolls become
/// [`CombatEvent::ActionFailed`] or counter-effects in the log.
#[derive(Clone, Copy, Debug)]
pub struct ActionResolver<'e> {
    pub(super) config: &'e CombatConfig,
    pub(super) env: CombatEnv<'e>,
    pub(super) context: EncounterContext,
}

impl<'e> ActionResolver<'e> {
    pub fn new(config: &'e CombatConfig, env: CombatEnv<'e>, context: EncounterContext) -> Self {
        Self {
            config,
            env,
            context,
        }
    }

    /// Resolves `action` for `actor`. Dead or unknown actors do nothing.
    pub fn resolve(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        action: &CombatAction,
        rng: &mut dyn CombatRng,
    ) -> TurnUse {
        if !field.is_alive(actor) {
            return TurnUse::Consumed;
        }

        match action {
            CombatAction::Attack { target } => self.attack(field, actor, *target, rng),
            CombatAction::PowerAttack { target } => self.power_attack(field, actor, *target, rng),
            CombatAction::PreciseStrike { target } => {
                self.precise_strike(field, actor, *target, rng)
            }
            CombatAction::RangedAttack { target } => self.ranged_attack(field, actor, *target, rng),
            CombatAction::Backstab { target } => self.backstab(field, actor, *target, rng),
            CombatAction::SoulStrike { target } => self.soul_strike(field, actor, *target, rng),
            CombatAction::Smite { target } => self.smite(field, actor, *target, rng),
            CombatAction::Disarm { target } => self.disarm(field, actor, *target, rng),
            CombatAction::Taunt { target } => self.taunt(field, actor, *target, rng),
            CombatAction::Hide => self.hide(field, actor, rng),
            CombatAction::Rage => self.rage(field, actor),
            CombatAction::Defend => self.defend(field, actor),
            CombatAction::Heal => self.drink_healing_potion(field, actor, ActionTag::Heal, rng),
            CombatAction::QuickHeal => self.quick_heal(field, actor, rng),
            CombatAction::UseItem { item } => match item {
                ItemKind::HealingPotion => {
                    self.drink_healing_potion(field, actor, ActionTag::UseItem, rng)
                }
                ItemKind::ManaPotion => self.drink_mana_potion(field, actor),
                ItemKind::Antidote => self.use_antidote(field, actor),
            },
            CombatAction::CastSpell {
                spell,
                target,
                affect_all,
            } => self.cast_spell(field, actor, spell, *target, *affect_all, rng),
            CombatAction::Retreat => self.retreat(field, actor, rng),
            CombatAction::BegForMercy => self.beg_for_mercy(field, actor, rng),
            CombatAction::FightToDeath => self.fight_to_death(field, actor, rng),
            CombatAction::Status => return self.status_report(field, actor),
        }

        TurnUse::Consumed
    }

    pub(super) fn fail(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        action: ActionTag,
        reason: FailReason,
    ) {
        field.log.push(CombatEvent::ActionFailed {
            actor,
            action,
            reason,
        });
    }

    /// One swing from `attacker` at `target`, logged and settled.
    pub(super) fn strike(
        &self,
        field: &mut Battlefield<'_>,
        attacker: CombatantId,
        target: CombatantId,
        profile: &SwingProfile,
        action: ActionTag,
        rng: &mut dyn CombatRng,
    ) -> Option<Swing> {
        let (striker, defender) = field.pair_mut(attacker, target)?;
        let outcome = combat::swing(striker, defender, profile, self.config, rng);

        let event = match outcome {
            Swing::Missed => CombatEvent::Missed {
                attacker,
                target,
                action,
            },
            Swing::Hit(detail) => CombatEvent::Hit {
                attacker,
                target,
                action,
                detail,
            },
        };
        field.log.push(event);
        field.settle(target);
        Some(outcome)
    }

    /// Damage that skips the attack/defence exchange, logged and settled.
    pub(super) fn strike_direct(
        &self,
        field: &mut Battlefield<'_>,
        attacker: CombatantId,
        target: CombatantId,
        amount: i32,
        action: ActionTag,
    ) {
        let Some(defender) = field.get_mut(target) else {
            return;
        };
        let detail = combat::land(defender, amount);
        field.log.push(CombatEvent::Hit {
            attacker,
            target,
            action,
            detail,
        });
        field.settle(target);
    }

    /// Opposed roll: `attacker + U(1,20)` must beat `defender/2 + U(1,20)`.
    pub(super) fn opposed(&self, attacker: i32, defender: i32, rng: &mut dyn CombatRng) -> bool {
        let offence = attacker + rng.roll_die(20);
        let resistance = defender / 2 + rng.roll_die(20);
        offence > resistance
    }
}
