//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from action providers, input sources and event export so
//! clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} input closed")]
    InputClosed { kind: ProviderKind },

    #[error("failed to read {kind} input")]
    Input {
        kind: ProviderKind,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to export combat event")]
    Export(#[source] std::io::Error),

    #[error("failed to encode combat event")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Loot,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Loot => "loot",
        };
        write!(f, "{}", label)
    }
}
