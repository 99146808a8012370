//! Encounter engine: battlefield, turn scheduling, outcomes and rewards.
//!
//! [`CombatSession`] is the step-driven core that async drivers pace
//! themselves. [`run_combat`] and [`run_pvp`] drive a session to completion
//! synchronously with a [`PlayerPolicy`] standing in for the player.

mod ai;
mod arena;
mod errors;
mod outcome;
mod policy;
mod reward;
mod scheduler;
mod session;
mod view;

pub use ai::{monster_action, teammate_action};
pub use arena::{Battlefield, SessionFlags};
pub use errors::SessionError;
pub use outcome::{Outcome, evaluate};
pub use policy::{AutoCombat, PlayerPolicy, ScriptedPolicy};
pub use reward::{Rewards, experience_for, gold_for};
pub use scheduler::{Phase, Progress, TurnScheduler};
pub use session::{CombatResult, CombatSession, DefeatedMonster, LootDrop};
pub use view::{CombatantSnapshot, SessionView};

use crate::action::CombatAction;
use crate::config::CombatConfig;
use crate::env::{CombatEnv, CombatRng, EncounterContext};
use crate::state::Combatant;

/// Everything about an encounter besides its combatants.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncounterOptions<'e> {
    pub config: CombatConfig,
    pub env: CombatEnv<'e>,
    pub context: EncounterContext,
}

impl<'e> EncounterOptions<'e> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_env(mut self, env: CombatEnv<'e>) -> Self {
        self.env = env;
        self
    }

    pub fn with_context(mut self, context: EncounterContext) -> Self {
        self.context = context;
        self
    }
}

/// Fights one encounter to the end.
///
/// The player's choices come from `policy` until the player swears to fight
/// to the death, after which every turn is an attack. An action naming a
/// combatant outside the encounter is replaced by an attack.
pub fn run_combat(
    player: &mut Combatant,
    monsters: &mut [Combatant],
    teammates: &mut [Combatant],
    policy: &mut dyn PlayerPolicy,
    rng: &mut dyn CombatRng,
    options: EncounterOptions<'_>,
) -> CombatResult {
    let mut session = CombatSession::new(player, monsters, teammates)
        .with_config(options.config)
        .with_env(options.env)
        .with_context(options.context);

    loop {
        match session.advance(rng) {
            Progress::Running => {}
            Progress::AwaitingPlayer => {
                let view = session.view();
                let action = if view.flags.fight_to_death {
                    CombatAction::attack()
                } else {
                    policy.choose_action(&view)
                };
                if session.submit_player_action(action, rng).is_err() {
                    // Only an out-of-roster target can fail here.
                    let _ = session.submit_player_action(CombatAction::attack(), rng);
                }
            }
            Progress::Finished(_) => break,
        }
    }

    session.finish()
}

/// Player-versus-player duel. The defender fights from the monster side and
/// is normally an [`CombatantKind::OpposingPlayer`](crate::state::CombatantKind).
pub fn run_pvp(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    policy: &mut dyn PlayerPolicy,
    rng: &mut dyn CombatRng,
    options: EncounterOptions<'_>,
) -> CombatResult {
    run_combat(
        attacker,
        core::slice::from_mut(defender),
        &mut [],
        policy,
        rng,
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        LootOffer, LootOracle, LootSlot, PcgRng, SequenceRng, SpellEffect, SpellId, SpellOracle,
        SpellOutcome,
    };
    use crate::action::ActionTag;
    use crate::event::{CombatEvent, FailReason};
    use crate::state::{Attributes, CombatantId, CombatantKind};

    struct Grimoire;

    impl SpellOracle for Grimoire {
        fn cast(
            &self,
            _caster: &Combatant,
            spell: &SpellId,
            _rng: &mut dyn CombatRng,
        ) -> Option<SpellOutcome> {
            match spell.as_str() {
                "fireball" => Some(SpellOutcome {
                    damage: 30,
                    mana_cost: 10,
                    ..SpellOutcome::default()
                }),
                "wild surge" => Some(SpellOutcome {
                    damage: 500,
                    effect: SpellEffect::Backfire,
                    ..SpellOutcome::default()
                }),
                _ => None,
            }
        }
    }

    struct Generous;

    impl LootOracle for Generous {
        fn loot_for(&self, monster: &Combatant, _rng: &mut dyn CombatRng) -> Option<LootOffer> {
            Some(LootOffer {
                item: format!("{}'s blade", monster.name),
                slot: LootSlot::Weapon,
                power: 5,
            })
        }
    }

    static GRIMOIRE: Grimoire = Grimoire;
    static GENEROUS: Generous = Generous;

    fn await_player(session: &mut CombatSession<'_>, rng: &mut dyn CombatRng) -> Progress {
        loop {
            match session.advance(rng) {
                Progress::Running => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn single_swing_logs_exactly_one_attack_line() {
        let mut player =
            Combatant::player("Hero", 1, 40).with_attributes(Attributes::new(20, 5, 5, 5, 5));
        let mut monsters = vec![
            Combatant::monster("Ogre", 1, 100).with_attributes(Attributes::new(5, 5, 5, 5, 10)),
        ];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []);

        assert_eq!(await_player(&mut session, &mut rng), Progress::AwaitingPlayer);
        session
            .submit_player_action(CombatAction::attack(), &mut rng)
            .expect("player is up");

        let lines: Vec<String> = session
            .log()
            .narrate()
            .into_iter()
            .filter(|line| line.starts_with("Hero attacks Ogre for "))
            .collect();
        assert_eq!(lines.len(), 1);

        let damage = session.log().entries().iter().find_map(|e| match &e.event {
            CombatEvent::Hit {
                attacker: CombatantId::PLAYER,
                detail,
                ..
            } => Some(detail.damage),
            _ => None,
        });
        assert!(damage.is_some_and(|d| d >= 1));
    }

    #[test]
    fn area_spell_clears_the_roster_in_death_order() {
        let mut player = Combatant::player("Mage", 5, 40).with_mana(30);
        let mut monsters = vec![
            Combatant::monster("Imp", 1, 8).with_hp(1),
            Combatant::monster("Imp", 1, 8).with_hp(1),
            Combatant::monster("Imp", 1, 8).with_hp(1),
        ];
        let mut rng = SequenceRng::default();
        let env = CombatEnv::new().with_spells(&GRIMOIRE);
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []).with_env(env);

        await_player(&mut session, &mut rng);
        let progress = session
            .submit_player_action(CombatAction::cast_on_all("fireball"), &mut rng)
            .expect("player is up");
        assert_eq!(progress, Progress::Finished(Outcome::Victory));

        let result = session.into_result().expect("finished");
        let order: Vec<usize> = result.defeated.iter().map(|d| d.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(monsters.iter().all(|m| m.hp() == 0));
    }

    #[test]
    fn player_dying_on_own_action_ends_the_round() {
        let mut player = Combatant::player("Mage", 5, 40).with_mana(30);
        let mut teammates = vec![Combatant::teammate("Squire", 1, 20)];
        let mut monsters = vec![Combatant::monster("Troll", 3, 50)];
        let mut rng = SequenceRng::default();
        let env = CombatEnv::new().with_spells(&GRIMOIRE);
        let mut session =
            CombatSession::new(&mut player, &mut monsters, &mut teammates).with_env(env);

        await_player(&mut session, &mut rng);
        let progress = session
            .submit_player_action(CombatAction::cast("wild surge", None), &mut rng)
            .expect("player is up");
        assert_eq!(progress, Progress::Finished(Outcome::PlayerDied));
        assert_eq!(session.advance(&mut rng), Progress::Finished(Outcome::PlayerDied));

        let result = session.into_result().expect("finished");
        assert!(
            !result
                .log
                .entries()
                .iter()
                .any(|e| matches!(e.event, CombatEvent::Hit { .. } | CombatEvent::Missed { .. }))
        );
        assert_eq!(result.rewards, Rewards::none());
        assert_eq!(monsters[0].hp(), 50);
    }

    #[test]
    fn retreat_after_two_kills_pays_half_and_drops_no_loot() {
        let mut player = Combatant::player("Hero", 3, 1_000)
            .with_attributes(Attributes::new(100, 5, 5, 5, 5));
        let mut monsters: Vec<Combatant> = (0..5)
            .map(|i| Combatant::monster(format!("Goblin {i}"), 3, 50).with_bounty(40 + i * 20, 10 + i * 10))
            .collect();
        let env = CombatEnv::new().with_loot(&GENEROUS);
        let mut policy = ScriptedPolicy::new([
            CombatAction::attack_target(CombatantId(1)),
            CombatAction::attack_target(CombatantId(2)),
            CombatAction::Retreat,
        ]);
        // Midpoint rolls: every swing lands for well over 50 and the
        // retreat roll of 50 succeeds.
        let mut rng = SequenceRng::default();

        let result = run_combat(
            &mut player,
            &mut monsters,
            &mut [],
            &mut policy,
            &mut rng,
            EncounterOptions::new().with_env(env),
        );

        assert_eq!(result.outcome, Outcome::PlayerEscaped);
        assert_eq!(result.defeated.len(), 2);
        assert_eq!(
            result.rewards,
            Rewards {
                experience: (40 + 60) / 2,
                gold: 10 + 20,
                partial: true,
            }
        );
        assert!(result.loot.is_empty());
        assert_eq!(monsters.iter().filter(|m| m.is_alive()).count(), 3);
    }

    #[test]
    fn smite_charges_refill_every_encounter() {
        let mut player = Combatant::player("Paladin", 3, 500)
            .with_attributes(Attributes::new(100, 5, 5, 5, 5))
            .with_smite_charges(1);
        let mut rng = PcgRng::seeded(17);

        for _ in 0..2 {
            let mut monsters = vec![Combatant::monster("Ghoul", 1, 20)];
            let mut policy = ScriptedPolicy::new([CombatAction::Smite { target: None }]);
            let result = run_combat(
                &mut player,
                &mut monsters,
                &mut [],
                &mut policy,
                &mut rng,
                EncounterOptions::new(),
            );

            assert_eq!(result.outcome, Outcome::Victory);
            let events: Vec<_> = result.log.entries().iter().map(|e| &e.event).collect();
            assert!(events.iter().any(|e| matches!(
                e,
                CombatEvent::Hit { action: ActionTag::Smite, .. }
            )));
            assert!(!events.iter().any(|e| matches!(
                e,
                CombatEvent::ActionFailed { reason: FailReason::NoCharges, .. }
            )));
        }
        assert_eq!(player.smite_charges, 1);
    }

    #[test]
    fn victory_pays_rewards_and_offers_loot() {
        let mut player = Combatant::player("Hero", 3, 100)
            .with_attributes(Attributes::new(100, 5, 5, 5, 5));
        let mut monsters = vec![Combatant::monster("Rat", 3, 5).with_bounty(20, 4)];
        let env = CombatEnv::new().with_loot(&GENEROUS);
        let mut rng = SequenceRng::default();

        let result = run_combat(
            &mut player,
            &mut monsters,
            &mut [],
            &mut AutoCombat,
            &mut rng,
            EncounterOptions::new().with_env(env),
        );

        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.rewards.experience, 20);
        assert_eq!(result.rewards.gold, 5);
        assert_eq!(result.loot.len(), 1);
        assert_eq!(result.loot[0].offer.item, "Rat's blade");
    }

    #[test]
    fn monster_killed_this_round_does_not_strike_back() {
        let mut player = Combatant::player("Hero", 3, 100)
            .with_attributes(Attributes::new(100, 5, 5, 5, 5));
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 5),
            Combatant::monster("Bat", 1, 500),
        ];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []);

        await_player(&mut session, &mut rng);
        session
            .submit_player_action(CombatAction::attack_target(CombatantId(1)), &mut rng)
            .expect("player is up");
        assert_eq!(await_player(&mut session, &mut rng), Progress::AwaitingPlayer);

        let attackers: Vec<CombatantId> = session
            .log()
            .entries()
            .iter()
            .filter_map(|e| match e.event {
                CombatEvent::Hit { attacker, .. } | CombatEvent::Missed { attacker, .. } => {
                    Some(attacker)
                }
                _ => None,
            })
            .collect();
        assert_eq!(attackers, vec![CombatantId::PLAYER, CombatantId(2)]);
    }

    #[test]
    fn teammates_focus_the_weakest_monster() {
        let mut player = Combatant::player("Hero", 1, 100);
        let mut teammates = vec![
            Combatant::teammate("Squire", 1, 30).with_attributes(Attributes::new(8, 5, 5, 5, 5)),
        ];
        let mut monsters = vec![
            Combatant::monster("Ogre", 1, 90),
            Combatant::monster("Goblin", 1, 20),
        ];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut teammates);

        await_player(&mut session, &mut rng);
        session
            .submit_player_action(CombatAction::Defend, &mut rng)
            .expect("player is up");
        session.advance(&mut rng);

        let first_hit = session.log().entries().iter().find_map(|e| match e.event {
            CombatEvent::Hit {
                attacker, target, ..
            } => Some((attacker, target)),
            _ => None,
        });
        assert_eq!(first_hit, Some((CombatantId(1), CombatantId(3))));
    }

    #[test]
    fn combat_always_terminates() {
        for seed in 0..50 {
            let mut player = Combatant::player("Hero", 3, 60)
                .with_attributes(Attributes::new(12, 10, 8, 8, 8))
                .with_weapon(4)
                .with_armor(2);
            let mut teammates = vec![Combatant::teammate("Squire", 2, 30).with_weapon(2)];
            let mut monsters = vec![
                Combatant::monster("Orc", 3, 40)
                    .with_attributes(Attributes::new(10, 6, 3, 3, 6))
                    .with_weapon(3),
                Combatant::monster("Wolf", 2, 25).with_attributes(Attributes::new(8, 12, 2, 2, 4)),
            ];
            let mut rng = PcgRng::seeded(seed);

            let result = run_combat(
                &mut player,
                &mut monsters,
                &mut teammates,
                &mut AutoCombat,
                &mut rng,
                EncounterOptions::default(),
            );

            assert!(
                matches!(result.outcome, Outcome::Victory | Outcome::PlayerDied),
                "seed {seed}: {:?}",
                result.outcome
            );
            assert!(result.rounds < CombatConfig::DEFAULT_MAX_ROUNDS);
            assert!(player.hp() >= 0);
        }
    }

    #[test]
    fn round_limit_ends_in_stalemate() {
        let mut player = Combatant::player("Hero", 1, 1_000_000);
        let mut monsters = vec![Combatant::monster("Tree", 1, 1_000_000)];
        let mut rng = PcgRng::seeded(5);

        let result = run_combat(
            &mut player,
            &mut monsters,
            &mut [],
            &mut AutoCombat,
            &mut rng,
            EncounterOptions::new().with_config(CombatConfig::default().with_max_rounds(3)),
        );

        assert_eq!(result.outcome, Outcome::Stalemate);
        assert_eq!(result.rounds, 3);
        assert_eq!(result.rewards, Rewards::none());
    }

    #[test]
    fn step_api_rejects_misuse() {
        let mut player = Combatant::player("Hero", 1, 100)
            .with_attributes(Attributes::new(100, 5, 5, 5, 5));
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []);

        assert!(matches!(
            session.submit_player_action(CombatAction::attack(), &mut rng),
            Err(SessionError::NotAwaitingAction { .. })
        ));

        await_player(&mut session, &mut rng);
        assert_eq!(
            session.submit_player_action(CombatAction::attack_target(CombatantId(7)), &mut rng),
            Err(SessionError::UnknownTarget(CombatantId(7)))
        );

        assert_eq!(
            session.submit_player_action(CombatAction::attack(), &mut rng),
            Ok(Progress::Finished(Outcome::Victory))
        );
        assert_eq!(
            session.submit_player_action(CombatAction::attack(), &mut rng),
            Err(SessionError::AlreadyFinished(Outcome::Victory))
        );
    }

    #[test]
    fn unfinished_session_has_no_result() {
        let mut player = Combatant::player("Hero", 1, 100);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let session = CombatSession::new(&mut player, &mut monsters, &mut []);
        assert_eq!(session.into_result().err(), Some(SessionError::NotFinished));
    }

    #[test]
    fn interrupt_stops_the_session() {
        let mut player = Combatant::player("Hero", 1, 100);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []);

        await_player(&mut session, &mut rng);
        session.interrupt();
        assert_eq!(session.advance(&mut rng), Progress::Finished(Outcome::Interrupted));
        let result = session.into_result().expect("finished");
        assert_eq!(result.outcome, Outcome::Interrupted);
    }

    #[test]
    fn free_actions_are_capped() {
        let mut player = Combatant::player("Hero", 1, 100);
        let mut monsters = vec![Combatant::monster("Ogre", 1, 500)];
        let mut rng = SequenceRng::default();
        let mut session = CombatSession::new(&mut player, &mut monsters, &mut []);
        let cap = session.config().max_free_actions;

        await_player(&mut session, &mut rng);
        for _ in 0..cap {
            assert_eq!(
                session.submit_player_action(CombatAction::Status, &mut rng),
                Ok(Progress::AwaitingPlayer)
            );
        }
        assert_eq!(
            session.submit_player_action(CombatAction::Status, &mut rng),
            Ok(Progress::Running)
        );
        assert!(
            session
                .log()
                .entries()
                .iter()
                .any(|e| matches!(e.event, CombatEvent::Hit { .. }))
        );
    }

    #[test]
    fn sworn_player_is_switched_to_auto_combat() {
        let mut player = Combatant::player("Hero", 3, 500)
            .with_attributes(Attributes::new(30, 5, 5, 5, 5));
        let mut monsters = vec![Combatant::monster("Troll", 3, 200)];
        let mut policy = ScriptedPolicy::new([
            CombatAction::FightToDeath,
            CombatAction::Retreat,
            CombatAction::Retreat,
        ]);
        let mut rng = PcgRng::seeded(9);

        let result = run_combat(
            &mut player,
            &mut monsters,
            &mut [],
            &mut policy,
            &mut rng,
            EncounterOptions::default(),
        );

        assert_eq!(policy.remaining(), 2);
        assert_ne!(result.outcome, Outcome::PlayerEscaped);
    }

    #[test]
    fn pvp_duel_uses_the_opponents_bounty() {
        let mut attacker = Combatant::player("Aria", 4, 80)
            .with_attributes(Attributes::new(40, 10, 5, 5, 5));
        let mut defender = Combatant::new(CombatantKind::OpposingPlayer, "Brom", 4, 30)
            .with_bounty(60, 12);
        let mut rng = SequenceRng::default();

        let result = run_pvp(
            &mut attacker,
            &mut defender,
            &mut AutoCombat,
            &mut rng,
            EncounterOptions::default(),
        );

        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.defeated[0].name, "Brom");
        assert_eq!(result.rewards.experience, 60);
        assert!(!defender.is_alive());
    }
}
