//! Campaign and duel loops for the `skirmish` binary.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::{Bestiary, ContentFactory, HeroSheet};
use combat_core::{CombatEnv, CombatRng, EncounterContext, EncounterOptions, Outcome, PcgRng, derive_seed};
use combat_runtime::{
    ActionProvider, AutoCombatProvider, Display, EncounterRunner, JsonLinesSink, Narrator,
    PromptProvider, Style,
};

use crate::config::ClientConfig;
use crate::terminal::{StdinInput, TerminalDisplay};

/// What the binary runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Descend floor by floor until the hero falls or the last floor is cleared.
    #[default]
    Campaign,
    /// One fight against the rival hero sheet.
    Duel,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "campaign" => Ok(Mode::Campaign),
            "duel" | "pvp" => Ok(Mode::Duel),
            other => anyhow::bail!("unknown mode '{}' (expected 'campaign' or 'duel')", other),
        }
    }
}

/// Stream used to roll encounter rosters, kept apart from the combat stream.
const ROSTER_STREAM: u32 = 1;

pub async fn run(config: ClientConfig, mode: Mode) -> Result<()> {
    let factory = ContentFactory::new(&config.data_dir);
    let combat_config = factory
        .load_config()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;
    let spells = factory.load_spells()?;
    let loot = factory.load_loot()?;
    let bestiary = factory.load_bestiary()?;
    let sheet = factory.load_hero(&config.hero)?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        monsters = bestiary.len(),
        spells = spells.len(),
        "content loaded"
    );

    let display: Arc<dyn Display> = Arc::new(TerminalDisplay);
    let narrator = Narrator::new(display).with_pacing(config.runner.pacing);

    let options = EncounterOptions::new()
        .with_config(combat_config)
        .with_env(CombatEnv::new().with_spells(&spells).with_loot(&loot));
    let mut runner = EncounterRunner::new(&config.runner)
        .with_options(options)
        .with_narrator(narrator.clone());
    if let Some(path) = &config.runner.export_path {
        runner = runner.with_sink(JsonLinesSink::create(path)?);
    }
    tracing::info!(seed = runner.base_seed(), ?mode, "run started");

    let provider: Box<dyn ActionProvider> = if config.runner.auto_combat {
        Box::new(AutoCombatProvider)
    } else {
        Box::new(PromptProvider::new(StdinInput, narrator.clone()))
    };

    match mode {
        Mode::Campaign => {
            campaign(&mut runner, &narrator, &bestiary, &sheet, config.floors, &*provider).await
        }
        Mode::Duel => {
            let rival = factory.load_hero(&config.rival)?;
            duel(&mut runner, &narrator, &sheet, &rival, &*provider).await
        }
    }
}

async fn campaign(
    runner: &mut EncounterRunner<'_>,
    narrator: &Narrator,
    bestiary: &Bestiary,
    sheet: &HeroSheet,
    floors: u32,
    provider: &dyn ActionProvider,
) -> Result<()> {
    let mut player = sheet.player();
    let mut party = sheet.party();
    let (mut experience, mut gold) = (0u32, 0u32);

    for floor in 1..=floors {
        let mut monsters = roster(bestiary, floor, runner.base_seed())?;
        narrator.say(
            &format!("== Floor {}: {} foes approach ==", floor, monsters.len()),
            Style::Header,
        );

        runner.set_context(EncounterContext::at_depth(floor));
        let result = runner
            .run_combat(&mut player, &mut monsters, &mut party, provider)
            .await;
        experience = experience.saturating_add(result.rewards.experience);
        gold = gold.saturating_add(result.rewards.gold);

        match result.outcome {
            Outcome::Victory | Outcome::PlayerEscaped => {}
            Outcome::PlayerDied | Outcome::Stalemate | Outcome::Interrupted => break,
        }
    }

    narrator.say(
        &format!(
            "{} ends the run with {} experience and {} gold.",
            player.name, experience, gold
        ),
        Style::Emphasis,
    );
    tracing::info!(experience, gold, alive = player.is_alive(), "campaign finished");
    Ok(())
}

async fn duel(
    runner: &mut EncounterRunner<'_>,
    narrator: &Narrator,
    sheet: &HeroSheet,
    rival: &HeroSheet,
    provider: &dyn ActionProvider,
) -> Result<()> {
    let mut player = sheet.player();
    let mut opponent = rival.opponent();
    narrator.say(
        &format!("== {} challenges {} ==", player.name, opponent.name),
        Style::Header,
    );

    let result = runner.run_pvp(&mut player, &mut opponent, provider).await;
    tracing::info!(outcome = %result.outcome, rounds = result.rounds, "duel finished");
    Ok(())
}

/// Rolls one to three monsters whose level suits `floor`.
fn roster(bestiary: &Bestiary, floor: u32, base_seed: u64) -> Result<Vec<combat_core::Combatant>> {
    let mut rng = PcgRng::seeded(derive_seed(base_seed, u64::from(floor), ROSTER_STREAM));

    let mut eligible: Vec<&str> = bestiary
        .keys()
        .filter(|key| {
            bestiary
                .template(key)
                .is_some_and(|template| template.level <= floor + 1)
        })
        .collect();
    if eligible.is_empty() {
        eligible = bestiary.keys().collect();
    }
    anyhow::ensure!(!eligible.is_empty(), "the bestiary is empty");

    let count = 1 + rng.pick(3);
    let picks: Vec<&str> = (0..count)
        .map(|_| eligible[rng.pick(eligible.len())])
        .collect();
    bestiary.spawn_group(picks)
}
