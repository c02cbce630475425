//! Error taxonomy for the battle engine.
//!
//! Two classes of failure exist:
//!
//! - **Invalid input**: a malformed action or a finished battle handed to
//!   [`crate::resolver::RoundResolver::process_round`]. These fail before any
//!   state mutation — the caller gets back an error and the previous state is
//!   untouched.
//! - **Configuration errors**: the AI policy finding a role with an empty
//!   catalog ([`EngineError::NoAvailableAction`]). This indicates broken
//!   catalog data, not a recoverable per-round condition.
//!
//! Out-of-range numeric state is deliberately NOT an error: bounded fields are
//! clamped after every mutation and the engine continues.

use crate::catalog::ActionId;
use crate::state::Role;

/// Errors produced by the resolution engine and the AI policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// `process_round` was called on a battle that already has a winner.
    #[error("battle is already over")]
    BattleFinished,

    /// An action id that does not exist in the given role's catalog.
    #[error("unknown {role} action `{id}`")]
    UnknownAction {
        /// Role whose catalog was searched.
        role: Role,
        /// The offending action id.
        id: ActionId,
    },

    /// An action failed structural validation (empty id, inverted impact
    /// range, negative cost).
    #[error("malformed action `{id}`: {reason}")]
    MalformedAction {
        /// The offending action id.
        id: ActionId,
        /// Human-readable description of the defect.
        reason: String,
    },

    /// The AI policy found zero actions for its role, even under the relaxed
    /// fallback. The catalog for that role is empty or fully filtered out.
    #[error("no action available for {0}")]
    NoAvailableAction(Role),

    /// A terminal-state-only computation (report, analytics) was asked for
    /// while the battle is still in progress.
    #[error("battle is still in progress")]
    BattleInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let err = EngineError::UnknownAction {
            role: Role::Hacker,
            id: ActionId::new("warpdrive"),
        };
        assert_eq!(err.to_string(), "unknown hacker action `warpdrive`");

        let err = EngineError::NoAvailableAction(Role::Defender);
        assert_eq!(err.to_string(), "no action available for defender");
    }
}
