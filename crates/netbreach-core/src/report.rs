//! Terminal-state reporting.
//!
//! The core performs no I/O. At the end of a battle it produces a single
//! flat [`BattleReport`] — the exact record the external leaderboard/history
//! store consumes — and hands it to whatever implements [`ReportStore`].

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::state::{BattleState, Role, Winner};

/// Flat record of a finished battle, shaped for leaderboard storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    /// Display name of the human player.
    pub player_name: String,
    /// The player's final score.
    pub score: f32,
    /// Which side the player played.
    pub role: Role,
    /// Whether the player won.
    pub won: bool,
    /// Rounds actually played.
    pub rounds: u32,
    /// Final threat level.
    pub threat_level: f32,
    /// Final network integrity.
    pub network_integrity: f32,
    /// Final data stolen.
    pub data_stolen: f32,
    /// Combos triggered over the battle.
    pub combos_earned: u32,
}

impl BattleReport {
    /// Builds the report from a terminal state.
    ///
    /// # Errors
    ///
    /// [`EngineError::BattleInProgress`] if the battle has no winner yet.
    pub fn from_state(
        state: &BattleState,
        player_role: Role,
        player_name: impl Into<String>,
    ) -> Result<Self, EngineError> {
        if !state.is_terminal() {
            return Err(EngineError::BattleInProgress);
        }
        let won = matches!(
            (state.winner, player_role),
            (Some(Winner::Hacker), Role::Hacker) | (Some(Winner::Defender), Role::Defender)
        );
        Ok(Self {
            player_name: player_name.into(),
            score: state.score(player_role),
            role: player_role,
            won,
            rounds: state.round.saturating_sub(1),
            threat_level: state.threat_level,
            network_integrity: state.network_integrity,
            data_stolen: state.data_stolen,
            combos_earned: state.combos_earned,
        })
    }
}

/// Key-value seam to the external persistence collaborator. The orchestrator
/// implements this against whatever backend it uses; the core only defines
/// the shape.
pub trait ReportStore {
    /// Writes a report under a key (e.g. a session or user id).
    fn put(&mut self, key: &str, report: &BattleReport);

    /// Reads a previously stored report back, if present.
    fn get(&self, key: &str) -> Option<BattleReport>;
}
