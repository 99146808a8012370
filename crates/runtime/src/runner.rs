//! Asynchronous encounter driver.
//!
//! The runner steps a [`CombatSession`] to completion, awaiting the player's
//! [`ActionProvider`] whenever the session asks for an action. After every
//! step the new log entries are narrated, published on the [`EventBus`] and
//! optionally exported. Mutation and awaiting never overlap: the session is
//! only touched between awaits.

use combat_core::{
    CombatAction, CombatLog, CombatResult, CombatSession, Combatant, CombatEvent,
    EncounterContext, EncounterOptions, Outcome, PcgRng, Progress, SessionError, derive_seed,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::ActionProvider;
use crate::config::RunnerConfig;
use crate::events::{CombatMessage, Event, EventBus, Topic, TurnEvent};
use crate::presentation::{JsonLinesSink, Narrator, Style};

/// Runs encounters one after another with a shared seed, bus and narrator.
pub struct EncounterRunner<'e> {
    options: EncounterOptions<'e>,
    bus: EventBus,
    narrator: Option<Narrator>,
    sink: Option<JsonLinesSink>,
    base_seed: u64,
    encounters: u64,
}

impl<'e> EncounterRunner<'e> {
    pub fn new(config: &RunnerConfig) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        debug!(base_seed, "encounter runner created");
        Self {
            options: EncounterOptions::default(),
            bus: EventBus::with_capacity(config.event_capacity),
            narrator: None,
            sink: None,
            base_seed,
            encounters: 0,
        }
    }

    pub fn with_options(mut self, options: EncounterOptions<'e>) -> Self {
        self.options = options;
        self
    }

    pub fn with_narrator(mut self, narrator: Narrator) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_sink(mut self, sink: JsonLinesSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the dungeon depth used by the next encounters.
    pub fn set_context(&mut self, context: EncounterContext) {
        self.options.context = context;
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Seed every encounter stream is derived from; log it to replay a run.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Encounters started so far.
    pub fn encounters(&self) -> u64 {
        self.encounters
    }

    /// Fights one encounter to the end.
    ///
    /// A provider error interrupts the encounter (no rewards). After a
    /// victory each loot offer is put to the provider and equipped on the
    /// player when accepted.
    pub async fn run_combat(
        &mut self,
        player: &mut Combatant,
        monsters: &mut [Combatant],
        teammates: &mut [Combatant],
        provider: &dyn ActionProvider,
    ) -> CombatResult {
        self.encounters += 1;
        let encounter = self.encounters;
        let mut rng = PcgRng::seeded(derive_seed(self.base_seed, encounter, 0));

        info!(
            encounter,
            player = %player.name,
            monsters = monsters.len(),
            teammates = teammates.len(),
            depth = self.options.context.depth,
            "encounter started"
        );
        self.bus.publish(Event::Turn(TurnEvent::EncounterStarted {
            encounter,
            monsters: monsters.len(),
        }));

        let mut session = CombatSession::new(player, monsters, teammates)
            .with_config(self.options.config)
            .with_env(self.options.env)
            .with_context(self.options.context);
        let mut cursor = 0;

        loop {
            let progress = session.advance(&mut rng);
            cursor = self.flush(encounter, session.log(), cursor).await;

            match progress {
                Progress::Running => {}
                Progress::AwaitingPlayer => {
                    let view = session.view();
                    self.bus.publish(Event::Turn(TurnEvent::AwaitingPlayer {
                        encounter,
                        round: view.round,
                    }));

                    let action = if view.flags.fight_to_death {
                        CombatAction::attack()
                    } else {
                        match provider.choose_action(&view).await {
                            Ok(action) => action,
                            Err(err) => {
                                warn!(encounter, error = %err, "player provider failed; interrupting encounter");
                                session.interrupt();
                                break;
                            }
                        }
                    };
                    debug!(encounter, round = view.round, action = %action.tag(), "player action");

                    let submitted = match session.submit_player_action(action, &mut rng) {
                        Err(SessionError::UnknownTarget(target)) => {
                            warn!(encounter, %target, "unknown target; attacking instead");
                            session.submit_player_action(CombatAction::attack(), &mut rng)
                        }
                        other => other,
                    };
                    if let Err(err) = submitted {
                        warn!(encounter, error = %err, "player action rejected");
                    }
                    cursor = self.flush(encounter, session.log(), cursor).await;
                }
                Progress::Finished(_) => break,
            }
        }

        let result = session.finish();
        // Entries from an interrupted session may not have been flushed yet.
        self.flush(encounter, &result.log, cursor).await;

        info!(
            encounter,
            outcome = %result.outcome,
            rounds = result.rounds,
            defeated = result.defeated.len(),
            experience = result.rewards.experience,
            gold = result.rewards.gold,
            "encounter finished"
        );
        self.bus.publish(Event::Turn(TurnEvent::Finished {
            encounter,
            outcome: result.outcome,
            rounds: result.rounds,
        }));
        self.announce(&result, player);

        if result.outcome.is_victory() {
            self.offer_loot(&result, player, provider).await;
        }
        if let Some(sink) = self.sink.as_mut()
            && let Err(err) = sink.flush()
        {
            warn!(error = %err, "failed to flush event export");
        }

        result
    }

    /// Player-versus-player duel; the defender fights from the monster side.
    pub async fn run_pvp(
        &mut self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        provider: &dyn ActionProvider,
    ) -> CombatResult {
        self.run_combat(attacker, std::slice::from_mut(defender), &mut [], provider)
            .await
    }

    /// Narrates, publishes and exports the entries from `cursor` on.
    /// Returns the new cursor.
    async fn flush(&mut self, encounter: u64, log: &CombatLog, cursor: usize) -> usize {
        let fresh = log.since(cursor);

        for entry in fresh {
            let line = log.line(entry);

            if let CombatEvent::RoundStarted { round } = entry.event {
                self.bus
                    .publish(Event::Turn(TurnEvent::RoundStarted { encounter, round }));
            }
            if let Some(narrator) = &self.narrator {
                narrator.narrate(entry, &line).await;
            }
            if let Some(sink) = self.sink.as_mut()
                && let Err(err) = sink.write_entry(encounter, entry)
            {
                warn!(error = %err, "event export failed; disabling it");
                self.sink = None;
            }
            self.bus.publish(Event::Combat(CombatMessage {
                encounter,
                entry: entry.clone(),
                line,
            }));
        }

        cursor + fresh.len()
    }

    fn announce(&self, result: &CombatResult, player: &Combatant) {
        let Some(narrator) = &self.narrator else {
            return;
        };
        let rewards = result.rewards;
        let (text, style) = match result.outcome {
            Outcome::Victory => (
                format!(
                    "Victory! {} gains {} experience and {} gold.",
                    player.name, rewards.experience, rewards.gold
                ),
                Style::Emphasis,
            ),
            Outcome::PlayerEscaped if rewards.partial => (
                format!(
                    "{} escapes, keeping {} experience and {} gold.",
                    player.name, rewards.experience, rewards.gold
                ),
                Style::Positive,
            ),
            Outcome::PlayerEscaped => (format!("{} escapes.", player.name), Style::Normal),
            Outcome::PlayerDied => (format!("{} has been slain.", player.name), Style::Danger),
            Outcome::Stalemate => (
                "Both sides are too exhausted to go on.".to_owned(),
                Style::Warning,
            ),
            Outcome::Interrupted => ("The fight is abandoned.".to_owned(), Style::Warning),
        };
        narrator.say(&text, style);
    }

    async fn offer_loot(
        &self,
        result: &CombatResult,
        player: &mut Combatant,
        provider: &dyn ActionProvider,
    ) {
        for drop in &result.loot {
            match provider.accept_loot(&drop.offer, player).await {
                Ok(true) => {
                    drop.offer.equip(player);
                    info!(item = %drop.offer.item, slot = %drop.offer.slot, power = drop.offer.power, "loot equipped");
                    if let Some(narrator) = &self.narrator {
                        narrator.say(
                            &format!("{} equips {}.", player.name, drop.offer.item),
                            Style::Positive,
                        );
                    }
                }
                Ok(false) => debug!(item = %drop.offer.item, "loot declined"),
                Err(err) => {
                    warn!(error = %err, "loot provider failed; remaining loot is left behind");
                    break;
                }
            }
        }
    }
}
