use std::sync::Arc;

use combat_core::{
    Attributes, CombatAction, CombatConfig, CombatEnv, CombatEvent, CombatRng, Combatant,
    CombatantKind, EncounterOptions, LootOffer, LootOracle, LootSlot, Outcome,
};
use combat_runtime::{
    AutoCombatProvider, EncounterRunner, Event, JsonLinesSink, MemoryDisplay, Narrator,
    PromptProvider, RunnerConfig, ScriptedInput, ScriptedProvider, Topic, TurnEvent,
};

fn champion() -> Combatant {
    Combatant::player("Aldric", 10, 500)
        .with_attributes(Attributes::new(30, 10, 10, 5, 20))
        .with_weapon(10)
}

fn goblins(n: usize) -> Vec<Combatant> {
    (0..n)
        .map(|i| {
            Combatant::monster(format!("Goblin {}", i + 1), 1, 8)
                .with_attributes(Attributes::new(3, 4, 2, 1, 2))
                .with_bounty(10, 4)
        })
        .collect()
}

fn seeded(seed: u64) -> RunnerConfig {
    RunnerConfig {
        event_capacity: 4096,
        ..RunnerConfig::default()
    }
    .with_seed(seed)
}

struct AlwaysDrops;

impl LootOracle for AlwaysDrops {
    fn loot_for(&self, monster: &Combatant, _rng: &mut dyn CombatRng) -> Option<LootOffer> {
        Some(LootOffer {
            item: format!("{}'s cleaver", monster.name),
            slot: LootSlot::Weapon,
            power: 40,
        })
    }
}

#[tokio::test]
async fn auto_combat_wins_and_publishes_every_entry() {
    let mut runner = EncounterRunner::new(&seeded(7));
    let mut combat = runner.subscribe(Topic::Combat);
    let mut turns = runner.subscribe(Topic::Turn);

    let mut player = champion();
    let mut monsters = goblins(3);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &AutoCombatProvider)
        .await;

    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(result.defeated.len(), 3);
    assert!(result.rewards.experience > 0);

    let mut published = 0;
    while let Ok(event) = combat.try_recv() {
        assert!(matches!(event, Event::Combat(_)));
        published += 1;
    }
    assert_eq!(published, result.log.len());

    let mut turn_events = Vec::new();
    while let Ok(Event::Turn(event)) = turns.try_recv() {
        turn_events.push(event);
    }
    assert!(matches!(
        turn_events.first(),
        Some(TurnEvent::EncounterStarted { encounter: 1, monsters: 3 })
    ));
    assert!(matches!(
        turn_events.last(),
        Some(TurnEvent::Finished {
            outcome: Outcome::Victory,
            ..
        })
    ));
}

#[tokio::test]
async fn same_seed_replays_the_same_fight() {
    let run = |seed| async move {
        let mut runner = EncounterRunner::new(&seeded(seed));
        let mut player = champion();
        let mut monsters = goblins(4);
        runner
            .run_combat(&mut player, &mut monsters, &mut [], &AutoCombatProvider)
            .await
            .log
    };

    assert_eq!(run(42).await, run(42).await);
}

#[tokio::test]
async fn closed_input_interrupts_without_rewards() {
    let display = MemoryDisplay::new();
    let narrator = Narrator::new(Arc::new(display.clone()));
    let provider = PromptProvider::new(ScriptedInput::new(Vec::<String>::new()), narrator.clone());
    let mut runner = EncounterRunner::new(&seeded(1)).with_narrator(narrator);

    let mut player = champion();
    let mut monsters = goblins(2);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &provider)
        .await;

    assert_eq!(result.outcome, Outcome::Interrupted);
    assert_eq!(result.rewards.experience, 0);
    assert!(result.loot.is_empty());
    assert!(display.text().iter().any(|l| l == "The fight is abandoned."));
}

#[tokio::test]
async fn certain_retreat_escapes_in_the_first_turn() {
    let options = EncounterOptions::new().with_config(CombatConfig {
        retreat_chance: 100,
        ..CombatConfig::default()
    });
    let mut runner = EncounterRunner::new(&seeded(3)).with_options(options);
    let provider = ScriptedProvider::new([CombatAction::Retreat]);

    let mut player = champion();
    let mut monsters = goblins(2);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &provider)
        .await;

    assert_eq!(result.outcome, Outcome::PlayerEscaped);
    assert_eq!(result.rounds, 1);
    assert!(!result.rewards.partial);
    assert!(monsters.iter().all(Combatant::is_alive));
}

#[tokio::test]
async fn sworn_player_is_not_asked_again() {
    let mut runner = EncounterRunner::new(&seeded(11));
    let provider = ScriptedProvider::new([CombatAction::FightToDeath, CombatAction::Retreat]);

    let mut player = champion();
    let mut monsters = goblins(3);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &provider)
        .await;

    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(provider.remaining().await, 1);
    assert!(
        result
            .log
            .entries()
            .iter()
            .any(|e| matches!(e.event, CombatEvent::SwornToDeath { .. }))
    );
}

#[tokio::test]
async fn accepted_loot_is_equipped() {
    let loot = AlwaysDrops;
    let options = EncounterOptions::new().with_env(CombatEnv::new().with_loot(&loot));
    let mut runner = EncounterRunner::new(&seeded(5)).with_options(options);
    let provider = ScriptedProvider::new(Vec::<CombatAction>::new()).with_loot_answers([false, true]);

    let mut player = champion();
    let mut monsters = goblins(2);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &provider)
        .await;

    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(result.loot.len(), 2);
    assert_eq!(player.weapon_power, 40);
}

#[tokio::test]
async fn export_sink_receives_the_whole_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combat.jsonl");
    let mut runner =
        EncounterRunner::new(&seeded(9)).with_sink(JsonLinesSink::create(&path).unwrap());

    let mut player = champion();
    let mut monsters = goblins(2);
    let result = runner
        .run_combat(&mut player, &mut monsters, &mut [], &AutoCombatProvider)
        .await;

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), result.log.len());
}

#[tokio::test]
async fn pvp_duel_pays_the_opponents_bounty() {
    let mut runner = EncounterRunner::new(&seeded(13));
    let mut attacker = champion();
    let mut rival = Combatant::new(CombatantKind::OpposingPlayer, "Varek", 3, 20)
        .with_attributes(Attributes::new(5, 5, 3, 3, 3))
        .with_bounty(80, 50);

    let result = runner
        .run_pvp(&mut attacker, &mut rival, &AutoCombatProvider)
        .await;

    assert_eq!(result.outcome, Outcome::Victory);
    assert!(!rival.is_alive());
    assert!(result.rewards.gold >= 50);
    assert_eq!(runner.encounters(), 1);
}

#[tokio::test]
async fn narration_reads_like_a_fight() {
    let display = MemoryDisplay::new();
    let mut runner = EncounterRunner::new(&seeded(21))
        .with_narrator(Narrator::new(Arc::new(display.clone())));

    let mut player = champion();
    let mut monsters = goblins(1);
    runner
        .run_combat(&mut player, &mut monsters, &mut [], &AutoCombatProvider)
        .await;

    let lines = display.text();
    assert_eq!(lines.first().map(String::as_str), Some("-- Round 1 --"));
    assert!(lines.iter().any(|l| l.starts_with("Aldric attacks Goblin 1 for ")));
    assert!(lines.iter().any(|l| l.starts_with("Victory!")));
}
