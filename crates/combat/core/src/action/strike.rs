//! Damage-dealing weapon and holy attacks.

use super::targeting::resolve_target;
use super::{ActionResolver, ActionTag};
use crate::combat::SwingProfile;
use crate::effects;
use crate::engine::Battlefield;
use crate::env::CombatRng;
use crate::event::{CombatEvent, FailReason};
use crate::state::{CombatantId, Loadout, StatusKind};

impl ActionResolver<'_> {
    /// Basic attack: one swing per attack (haste/slow adjusted), each followed
    /// by an off-hand swing when dual wielding. A swing whose target already
    /// fell moves on to another living foe.
    pub(super) fn attack(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(attacker) = field.get(actor) else {
            return;
        };
        let swings = attacker.attack_count();
        let dual = attacker.loadout.is_dual_wielding();

        let mut requested = requested;
        for _ in 0..swings {
            let Some(target) = resolve_target(field, actor, requested, rng) else {
                return;
            };
            self.strike(field, actor, target, &SwingProfile::weapon(), ActionTag::Attack, rng);

            if dual {
                let Some(target) = resolve_target(field, actor, Some(target), rng) else {
                    return;
                };
                self.strike(
                    field,
                    actor,
                    target,
                    &SwingProfile::weapon().off_hand(),
                    ActionTag::Attack,
                    rng,
                );
            }
            requested = Some(target);
        }
    }

    pub(super) fn power_attack(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::PowerAttack, FailReason::NoTarget);
        };
        let duration = self.config.stance_duration;
        if let Some((attacker, log)) = field.with_log(actor) {
            effects::apply(attacker, StatusKind::PowerStance, 0, duration, log);
        }
        self.strike(
            field,
            actor,
            target,
            &SwingProfile::weapon(),
            ActionTag::PowerAttack,
            rng,
        );
    }

    /// Dexterity strike through the gaps: ignores armor, cannot be blocked.
    pub(super) fn precise_strike(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::PreciseStrike, FailReason::NoTarget);
        };
        self.strike(
            field,
            actor,
            target,
            &SwingProfile::finesse().piercing(),
            ActionTag::PreciseStrike,
            rng,
        );
    }

    pub(super) fn ranged_attack(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let armed = field
            .get(actor)
            .is_some_and(|c| c.loadout.contains(Loadout::RANGED));
        if !armed {
            return self.fail(field, actor, ActionTag::RangedAttack, FailReason::NoRangedWeapon);
        }
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::RangedAttack, FailReason::NoTarget);
        };
        self.strike(
            field,
            actor,
            target,
            &SwingProfile::finesse(),
            ActionTag::RangedAttack,
            rng,
        );
    }

    /// `(strength + weapon) × multiplier` straight past defence. Succeeds
    /// on a `min(100, dex×2)`% roll, or automatically from hiding.
    pub(super) fn backstab(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::Backstab, FailReason::NoTarget);
        };
        let Some(attacker) = field.get_mut(actor) else {
            return;
        };

        let hidden = attacker.status.remove(StatusKind::Hidden).is_some();
        let odds = (attacker.attributes.dexterity.max(0) as u32).saturating_mul(2);
        let amount = (attacker.attributes.strength + attacker.effective_weapon_power())
            * self.config.backstab_multiplier;

        if hidden || rng.chance(odds.min(100)) {
            self.strike_direct(field, actor, target, amount, ActionTag::Backstab);
        } else {
            field.log.push(CombatEvent::Missed {
                attacker: actor,
                target,
                action: ActionTag::Backstab,
            });
        }
    }

    /// `chivalry/10 + level×5`, bypassing defence.
    pub(super) fn soul_strike(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::SoulStrike, FailReason::NoTarget);
        };
        let Some(attacker) = field.get(actor) else {
            return;
        };
        let amount = attacker.attributes.chivalry / 10 + attacker.level as i32 * 5;
        self.strike_direct(field, actor, target, amount, ActionTag::SoulStrike);
    }

    /// Holy blow that always connects, paid for with a smite charge.
    pub(super) fn smite(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        requested: Option<CombatantId>,
        rng: &mut dyn CombatRng,
    ) {
        let Some(bonus) = field
            .get(actor)
            .map(|c| c.attributes.charisma / 2 + c.level as i32)
        else {
            return;
        };
        if field.smite_charges(actor) == 0 {
            return self.fail(field, actor, ActionTag::Smite, FailReason::NoCharges);
        }

        let Some(target) = resolve_target(field, actor, requested, rng) else {
            return self.fail(field, actor, ActionTag::Smite, FailReason::NoTarget);
        };
        field.spend_smite(actor);
        self.strike(
            field,
            actor,
            target,
            &SwingProfile::weapon().with_bonus(bonus).unerring(),
            ActionTag::Smite,
            rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{ActionResolver, CombatAction};
    use crate::config::CombatConfig;
    use crate::engine::Battlefield;
    use crate::env::{CombatEnv, EncounterContext, SequenceRng};
    use crate::event::{CombatEvent, FailReason};
    use crate::state::{Attributes, Combatant, CombatantId, Loadout, StatusEffect, StatusKind};

    fn resolve(
        player: &mut Combatant,
        monsters: &mut [Combatant],
        action: CombatAction,
        rng: &mut SequenceRng,
    ) -> Vec<CombatEvent> {
        let config = CombatConfig::default();
        let resolver = ActionResolver::new(&config, CombatEnv::new(), EncounterContext::default());
        let mut field = Battlefield::new(player, &mut [], monsters);
        resolver.resolve(&mut field, CombatantId::PLAYER, &action, rng);
        field.log().entries().iter().map(|e| e.event.clone()).collect()
    }

    fn hits(events: &[CombatEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Hit { .. }))
            .count()
    }

    #[test]
    fn dual_wield_adds_off_hand_swings() {
        let mut player = Combatant::player("Twinblade", 1, 30)
            .with_attributes(Attributes::new(10, 10, 5, 5, 5))
            .with_loadout(Loadout::DUAL_WIELD);
        let mut monsters = vec![Combatant::monster("Troll", 5, 500)];
        let mut rng = SequenceRng::default();

        let events = resolve(&mut player, &mut monsters, CombatAction::attack(), &mut rng);
        assert_eq!(hits(&events), 2);
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::Hit { detail, .. } if detail.off_hand
        )));
    }

    #[test]
    fn attack_moves_on_when_target_falls() {
        let mut player = Combatant::player("Hero", 1, 30)
            .with_attributes(Attributes::new(50, 10, 5, 5, 5))
            .with_attacks(2);
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 1),
            Combatant::monster("Bat", 1, 1),
        ];
        let mut rng = SequenceRng::default();

        resolve(
            &mut player,
            &mut monsters,
            CombatAction::attack_target(CombatantId(1)),
            &mut rng,
        );
        assert!(monsters.iter().all(|m| !m.is_alive()));
    }

    #[test]
    fn smite_fails_closed_without_charges() {
        let mut player = Combatant::player("Paladin", 3, 30);
        let mut monsters = vec![Combatant::monster("Ghoul", 2, 20)];
        let mut rng = SequenceRng::default();

        let events = resolve(
            &mut player,
            &mut monsters,
            CombatAction::Smite { target: None },
            &mut rng,
        );
        assert_eq!(
            events,
            vec![CombatEvent::ActionFailed {
                actor: CombatantId::PLAYER,
                action: crate::action::ActionTag::Smite,
                reason: FailReason::NoCharges,
            }]
        );
        assert_eq!(monsters[0].hp(), 20);
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn smite_spends_a_charge() {
        let mut player = Combatant::player("Paladin", 3, 30).with_smite_charges(2);
        let mut monsters = vec![Combatant::monster("Ghoul", 2, 200)];
        let mut rng = SequenceRng::default();

        let config = CombatConfig::default();
        let resolver = ActionResolver::new(&config, CombatEnv::new(), EncounterContext::default());
        let mut field = Battlefield::new(&mut player, &mut [], &mut monsters);
        resolver.resolve(
            &mut field,
            CombatantId::PLAYER,
            &CombatAction::Smite { target: None },
            &mut rng,
        );

        assert_eq!(field.smite_charges(CombatantId::PLAYER), 1);
        let events: Vec<_> = field.log().entries().iter().map(|e| e.event.clone()).collect();
        assert_eq!(hits(&events), 1);
        drop(field);
        assert_eq!(player.smite_charges, 2);
    }

    #[test]
    fn backstab_from_hiding_always_lands() {
        let mut player = Combatant::player("Rogue", 2, 30)
            .with_attributes(Attributes::new(6, 1, 5, 5, 5))
            .with_weapon(4);
        player
            .status
            .apply(StatusEffect::until_used(StatusKind::Hidden, 0));
        let mut monsters = vec![Combatant::monster("Guard", 2, 100)];
        let mut rng = SequenceRng::new([100]);

        resolve(
            &mut player,
            &mut monsters,
            CombatAction::Backstab { target: None },
            &mut rng,
        );
        assert_eq!(monsters[0].hp(), 70);
        assert!(!player.is_hidden());
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn failed_backstab_is_a_miss() {
        let mut player = Combatant::player("Rogue", 2, 30)
            .with_attributes(Attributes::new(6, 10, 5, 5, 5));
        let mut monsters = vec![Combatant::monster("Guard", 2, 100)];
        let mut rng = SequenceRng::new([21]);

        let events = resolve(
            &mut player,
            &mut monsters,
            CombatAction::Backstab { target: None },
            &mut rng,
        );
        assert!(matches!(events[0], CombatEvent::Missed { .. }));
        assert_eq!(monsters[0].hp(), 100);
    }

    #[test]
    fn soul_strike_ignores_defence() {
        let mut player = Combatant::player("Templar", 4, 30)
            .with_attributes(Attributes::new(5, 5, 5, 5, 5).with_chivalry(35));
        let mut monsters = vec![
            Combatant::monster("Wall", 4, 100)
                .with_attributes(Attributes::new(1, 1, 1, 1, 500))
                .with_armor(100),
        ];
        let mut rng = SequenceRng::default();

        resolve(
            &mut player,
            &mut monsters,
            CombatAction::SoulStrike { target: None },
            &mut rng,
        );
        assert_eq!(monsters[0].hp(), 77);
    }

    #[test]
    fn ranged_attack_needs_a_ranged_weapon() {
        let mut player = Combatant::player("Archer", 1, 30);
        let mut monsters = vec![Combatant::monster("Crow", 1, 10)];
        let mut rng = SequenceRng::default();

        let events = resolve(
            &mut player,
            &mut monsters,
            CombatAction::RangedAttack { target: None },
            &mut rng,
        );
        assert!(matches!(
            events[0],
            CombatEvent::ActionFailed {
                reason: FailReason::NoRangedWeapon,
                ..
            }
        ));
    }
}
