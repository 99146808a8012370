use super::outcome::Outcome;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::CombatantId;

/// Misuse of the session step API.
///
/// Resolution itself never fails; these only arise when a driver calls the
/// session out of order or names a combatant that is not in the encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is not waiting for a player action (phase: {phase})")]
    NotAwaitingAction { phase: &'static str },

    #[error("session already finished: {0}")]
    AlreadyFinished(Outcome),

    #[error("no combatant {0} in this encounter")]
    UnknownTarget(CombatantId),

    #[error("session has not finished yet")]
    NotFinished,
}

impl CombatError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTarget(_) => ErrorSeverity::Validation,
            Self::NotAwaitingAction { .. } | Self::NotFinished => ErrorSeverity::Recoverable,
            Self::AlreadyFinished(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAwaitingAction { .. } => "SESSION_NOT_AWAITING",
            Self::AlreadyFinished(_) => "SESSION_FINISHED",
            Self::UnknownTarget(_) => "SESSION_UNKNOWN_TARGET",
            Self::NotFinished => "SESSION_NOT_FINISHED",
        }
    }
}
