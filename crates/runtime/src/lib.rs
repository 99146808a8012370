//! Runtime orchestration for turn-based encounters.
//!
//! This crate wires the synchronous combat core to asynchronous players and
//! observers. Consumers build an [`EncounterRunner`], hand it an
//! [`ActionProvider`] for the player's choices, and watch the fight through
//! the [`EventBus`] or a [`Narrator`].
//!
//! Modules are organized by responsibility:
//! - [`runner`] hosts the encounter driver
//! - [`api`] exposes the provider trait and error types
//! - [`providers`] turns typed input into actions
//! - [`events`] provides a topic-based event bus
//! - [`presentation`] narrates and exports log entries
//! - [`config`] reads runner settings from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod presentation;
pub mod providers;
pub mod runner;

pub use api::{
    ActionProvider, AutoCombatProvider, ProviderKind, Result, RuntimeError, ScriptedProvider,
};
pub use config::RunnerConfig;
pub use events::{CombatMessage, Event, EventBus, Topic, TurnEvent};
pub use presentation::{Display, JsonLinesSink, MemoryDisplay, Narrator, Style};
pub use providers::{InputSource, PromptProvider, ScriptedInput, menu_lines, parse_command};
pub use runner::EncounterRunner;
