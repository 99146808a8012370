//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the runner, presentation and providers can stay focused on their own jobs.

pub mod errors;
pub mod providers;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{ActionProvider, AutoCombatProvider, ScriptedProvider};
