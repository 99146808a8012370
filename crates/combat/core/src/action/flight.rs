//! Leaving the fight, or swearing not to.
//!
//! Only the player can escape: the flags live on the session and end it for
//! the whole party.

use super::{ActionResolver, ActionTag};
use crate::engine::Battlefield;
use crate::env::CombatRng;
use crate::event::{CombatEvent, EscapeMethod, FailReason};
use crate::state::CombatantId;

impl ActionResolver<'_> {
    /// Flat `retreat_chance`% to get away; failure costs
    /// `escape_penalty_base + U(0, depth×2)` HP.
    pub(super) fn retreat(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        rng: &mut dyn CombatRng,
    ) {
        if !self.may_flee(field, actor, ActionTag::Retreat) {
            return;
        }
        if rng.chance(self.config.retreat_chance) {
            return self.escape(field, actor, EscapeMethod::Retreat);
        }
        self.punish(field, actor, EscapeMethod::Retreat, rng);
    }

    /// `min(100, charisma×2)`% to be let go. Once a plea has worked it never
    /// works again this session.
    pub(super) fn beg_for_mercy(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        rng: &mut dyn CombatRng,
    ) {
        if !self.may_flee(field, actor, ActionTag::BegForMercy) {
            return;
        }
        let charisma = field
            .get(actor)
            .map_or(0, |c| c.attributes.charisma.max(0) as u32);

        if !field.flags.begged_already && rng.chance(charisma.saturating_mul(2).min(100)) {
            field.flags.begged_already = true;
            return self.escape(field, actor, EscapeMethod::Mercy);
        }
        self.punish(field, actor, EscapeMethod::Mercy, rng);
    }

    /// Forbids fleeing for the rest of the session, then attacks.
    pub(super) fn fight_to_death(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        rng: &mut dyn CombatRng,
    ) {
        if actor == CombatantId::PLAYER && !field.flags.fight_to_death {
            field.flags.fight_to_death = true;
            field.log.push(CombatEvent::SwornToDeath { actor });
        }
        self.attack(field, actor, None, rng);
    }

    fn may_flee(&self, field: &mut Battlefield<'_>, actor: CombatantId, action: ActionTag) -> bool {
        if actor != CombatantId::PLAYER || field.flags.fight_to_death {
            self.fail(field, actor, action, FailReason::Refused);
            return false;
        }
        true
    }

    fn escape(&self, field: &mut Battlefield<'_>, actor: CombatantId, method: EscapeMethod) {
        field.flags.escaped = true;
        field.log.push(CombatEvent::Escaped { actor, method });
    }

    fn punish(
        &self,
        field: &mut Battlefield<'_>,
        actor: CombatantId,
        method: EscapeMethod,
        rng: &mut dyn CombatRng,
    ) {
        let spread = self.context.depth.saturating_mul(2).min(i32::MAX as u32) as i32;
        let penalty = self.config.escape_penalty_base + rng.uniform_int(0, spread);

        if let Some(fugitive) = field.get_mut(actor) {
            let damage = fugitive.take_damage(penalty);
            field.log.push(CombatEvent::EscapeFailed {
                actor,
                method,
                damage,
            });
        }
        field.settle(actor);
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{ActionResolver, CombatAction};
    use crate::config::CombatConfig;
    use crate::engine::{Battlefield, SessionFlags};
    use crate::env::{CombatEnv, EncounterContext, PcgRng, SequenceRng};
    use crate::event::{CombatEvent, FailReason};
    use crate::state::{Attributes, Combatant, CombatantId};

    fn flee(
        player: &mut Combatant,
        actions: &[CombatAction],
        depth: u32,
        rng: &mut dyn crate::env::CombatRng,
    ) -> (SessionFlags, Vec<CombatEvent>) {
        let config = CombatConfig::default();
        let resolver =
            ActionResolver::new(&config, CombatEnv::new(), EncounterContext::at_depth(depth));
        let mut monsters = vec![Combatant::monster("Wolf", 1, 10)];
        let mut field = Battlefield::new(player, &mut [], &mut monsters);
        for action in actions {
            resolver.resolve(&mut field, CombatantId::PLAYER, action, rng);
        }
        let events = field.log().entries().iter().map(|e| e.event.clone()).collect();
        (field.flags(), events)
    }

    #[test]
    fn retreat_succeeds_about_half_the_time() {
        let mut rng = PcgRng::seeded(2024);
        let trials = 20_000;
        let mut escapes = 0;

        for _ in 0..trials {
            let mut player = Combatant::player("Hero", 1, 1_000);
            let (flags, events) = flee(&mut player, &[CombatAction::Retreat], 3, &mut rng);
            if flags.escaped {
                escapes += 1;
            } else {
                let damage = events.iter().find_map(|e| match e {
                    CombatEvent::EscapeFailed { damage, .. } => Some(*damage),
                    _ => None,
                });
                assert!(damage.is_some_and(|d| d >= 3));
            }
        }

        let rate = escapes as f64 / trials as f64;
        assert!((0.48..=0.52).contains(&rate), "retreat rate {rate}");
    }

    #[test]
    fn failed_retreat_penalty_scales_with_depth() {
        // chance roll 80 fails, penalty roll 10 of U(0, 10)
        let mut rng = SequenceRng::new([80, 10]);
        let mut player = Combatant::player("Hero", 1, 100);
        flee(&mut player, &[CombatAction::Retreat], 5, &mut rng);
        assert_eq!(player.hp(), 87);
    }

    #[test]
    fn failed_beg_can_be_retried() {
        let mut player =
            Combatant::player("Bard", 1, 100).with_attributes(Attributes::new(5, 5, 5, 20, 5));
        // 41 > 40 fails (no penalty spread at depth 0), then 40 succeeds
        let mut rng = SequenceRng::new([41, 40]);
        let (flags, _) = flee(
            &mut player,
            &[CombatAction::BegForMercy, CombatAction::BegForMercy],
            0,
            &mut rng,
        );
        assert!(flags.escaped);
        assert!(flags.begged_already);
        assert_eq!(player.hp(), 97);
    }

    #[test]
    fn second_plea_after_success_always_fails() {
        let mut player =
            Combatant::player("Bard", 1, 100).with_attributes(Attributes::new(5, 5, 5, 50, 5));
        let mut rng = SequenceRng::new([1, 1]);
        let (_, events) = flee(
            &mut player,
            &[CombatAction::BegForMercy, CombatAction::BegForMercy],
            0,
            &mut rng,
        );

        let escapes = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Escaped { .. }))
            .count();
        assert_eq!(escapes, 1);
        assert!(events.iter().any(|e| matches!(e, CombatEvent::EscapeFailed { .. })));
    }

    #[test]
    fn sworn_fighters_cannot_flee() {
        let mut player = Combatant::player("Hero", 1, 100);
        let mut rng = SequenceRng::new([1]);
        let (flags, events) = flee(
            &mut player,
            &[CombatAction::FightToDeath, CombatAction::Retreat],
            0,
            &mut rng,
        );
        assert!(flags.fight_to_death);
        assert!(!flags.escaped);
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::ActionFailed {
                reason: FailReason::Refused,
                ..
            }
        )));
    }
}
