use std::path::PathBuf;

use combat_content::ContentFactory;
use combat_core::{CombatAction, CombatEnv, CombatEvent, EncounterOptions};
use combat_runtime::{EncounterRunner, RunnerConfig, ScriptedProvider};

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

#[tokio::test]
async fn shipped_content_drives_a_full_encounter() {
    let factory = factory();
    let config = factory.load_config().unwrap();
    let spells = factory.load_spells().unwrap();
    let loot = factory.load_loot().unwrap();
    let bestiary = factory.load_bestiary().unwrap();
    let sheet = factory.load_hero("aldric").unwrap();

    let options = EncounterOptions::new()
        .with_config(config)
        .with_env(CombatEnv::new().with_spells(&spells).with_loot(&loot));
    let mut runner =
        EncounterRunner::new(&RunnerConfig::default().with_seed(2024)).with_options(options);

    let mut player = sheet.player();
    let mut party = sheet.party();
    let mut monsters = bestiary.spawn_group(["rat", "bat"]).unwrap();
    let provider = ScriptedProvider::new([
        CombatAction::cast_on_all("Fireball"),
        CombatAction::Status,
    ]);

    let result = runner
        .run_combat(&mut player, &mut monsters, &mut party, &provider)
        .await;

    assert!(result.outcome.player_survived());
    assert!(result.log.entries().iter().any(|e| matches!(
        &e.event,
        CombatEvent::SpellCast { spell, affect_all: true, .. } if spell.as_str() == "Fireball"
    )));
    assert!(player.mana() < player.max_mana());
}
