//! Battle state: the mutable aggregate threaded through round resolution.
//!
//! `BattleState` is a plain value type. The resolver never mutates a caller's
//! state in place — it clones, mutates the clone, and returns it. `Clone` is
//! derived, so a newly added field can never be forgotten by a hand-written
//! copy routine.
//!
//! Most fields feed the resolution logic directly; the accumulator block at
//! the bottom (`tallies`, `action_stats`, damage totals) is write-only from
//! the engine's point of view and is consumed by reporting and analytics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ActionId;
use crate::config::{BattleConfig, STARTING_ENERGY, STARTING_THREAT};

/// Momentum cap: five consecutive successes is the maximum streak.
pub const MOMENTUM_MAX: u8 = 5;

/// How many of a side's recent action ids are retained for combo lookback.
pub const ACTION_HISTORY_LEN: usize = 2;

// =============================================================================
// Roles and outcomes
// =============================================================================

/// The two sides of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The attacking side; wins by maxing threat or zeroing integrity.
    Hacker,
    /// The defending side; wins by keeping threat low for consecutive rounds.
    Defender,
}

impl Role {
    /// The opposing role.
    #[must_use]
    pub const fn opponent(self) -> Role {
        match self {
            Role::Hacker => Role::Defender,
            Role::Defender => Role::Hacker,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hacker => write!(f, "hacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}

/// Terminal outcome of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Threat reached 100 or integrity reached 0.
    Hacker,
    /// Threat stayed below 40 for three consecutive rounds.
    Defender,
    /// Both sides ran out of energy.
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hacker => write!(f, "hacker"),
            Self::Defender => write!(f, "defender"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

// =============================================================================
// History records
// =============================================================================

/// One side's outcome within a resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideOutcome {
    /// The action this side played.
    pub action: ActionId,
    /// Whether the action succeeded.
    pub success: bool,
    /// Final success chance after all modifiers (0 for auto-failures).
    pub chance: f32,
    /// Whether the opponent's previous action countered this one.
    pub countered: bool,
    /// Name of the combo that applied, if any.
    pub combo: Option<String>,
    /// Magnitude applied on success (sampled impact + combo bonus), else 0.
    pub magnitude: f32,
}

/// Structured record of a resolved round, appended to `history`. Display and
/// replay read these; the engine itself only consults the bounded
/// `last_*_actions` sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number this record describes.
    pub round: u32,
    /// Hacker-side outcome.
    pub hacker: SideOutcome,
    /// Defender-side outcome.
    pub defender: SideOutcome,
    /// Threat level after the round.
    pub threat_level: f32,
    /// Network integrity after the round.
    pub network_integrity: f32,
    /// Data stolen after the round.
    pub data_stolen: f32,
    /// Hacker energy after settlement.
    pub energy_hacker: f32,
    /// Defender energy after settlement.
    pub energy_defender: f32,
}

// =============================================================================
// Accumulators
// =============================================================================

/// Per-side write-only counters consumed by reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideTally {
    /// Total energy actually deducted for attempts.
    pub energy_spent: f32,
    /// Number of successful actions.
    pub successful_actions: u32,
    /// Number of failed actions (including auto-failures).
    pub failed_actions: u32,
}

/// Per-action usage counters, keyed by [`ActionId`] in
/// [`BattleState::action_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionStats {
    /// Times the action was played.
    pub uses: u32,
    /// Times it succeeded.
    pub successes: u32,
    /// Total magnitude it delivered.
    pub damage: f32,
}

// =============================================================================
// BattleState
// =============================================================================

/// The whole battle aggregate. Created once per session, replaced by each
/// call to the resolver, destroyed when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    /// Current round, starting at 1.
    pub round: u32,
    /// Hacker energy, clamped to [0, 100].
    pub energy_hacker: f32,
    /// Defender energy, clamped to [0, 100].
    pub energy_defender: f32,
    /// Defender's health metric; 0 means the hacker wins instantly.
    pub network_integrity: f32,
    /// Monotone non-decreasing exfiltration metric, clamped to [0, 100].
    pub data_stolen: f32,
    /// Hacker's progress metric; 100 means the hacker wins instantly.
    pub threat_level: f32,
    /// Hacker success streak, in [0, 5].
    pub hacker_momentum: u8,
    /// Defender success streak, in [0, 5].
    pub defender_momentum: u8,
    /// Remaining lockout rounds per hacker action.
    pub hacker_cooldowns: BTreeMap<ActionId, u8>,
    /// Remaining lockout rounds per defender action.
    pub defender_cooldowns: BTreeMap<ActionId, u8>,
    /// Most recent hacker action ids, newest last, capped at 2.
    pub last_hacker_actions: Vec<ActionId>,
    /// Most recent defender action ids, newest last, capped at 2.
    pub last_defender_actions: Vec<ActionId>,
    /// Append-only log of resolved rounds.
    pub history: Vec<RoundRecord>,
    /// Terminal flag; once true, no further rounds are processed.
    pub game_over: bool,
    /// Terminal outcome, `None` while in progress.
    pub winner: Option<Winner>,
    /// Consecutive rounds ending with threat below 40.
    pub low_threat_rounds: u32,

    // --- Accumulators (write-only for the engine) ---
    /// Combos triggered over the whole battle, both sides.
    pub combos_earned: u32,
    /// Total magnitude the hacker applied to the network.
    pub total_damage_dealt: f32,
    /// Total magnitude the defender restored.
    pub total_damage_blocked: f32,
    /// Lowest network integrity seen at any round boundary.
    pub min_network_integrity: f32,
    /// Hacker-side counters.
    pub hacker_tally: SideTally,
    /// Defender-side counters.
    pub defender_tally: SideTally,
    /// Per-action usage/success/damage, keyed by action id (ids are unique
    /// across both catalogs).
    pub action_stats: BTreeMap<ActionId, ActionStats>,
    /// Final hacker score, set on terminal states.
    pub hacker_score: f32,
    /// Final defender score, set on terminal states.
    pub defender_score: f32,
}

impl BattleState {
    /// Creates the fixed initial state for a session.
    ///
    /// Both energies start at 100 (plus the difficulty's player bonus, and
    /// subject to a challenge starting-energy override on the player side),
    /// integrity at 100, threat at 50, everything else empty.
    #[must_use]
    pub fn new(config: &BattleConfig) -> Self {
        let mut energy_hacker = STARTING_ENERGY;
        let mut energy_defender = STARTING_ENERGY;

        let player_energy = {
            let bonus = config.difficulty.settings().player_energy_bonus;
            match config.modifiers.as_ref().and_then(|m| m.starting_energy) {
                Some(override_energy) => override_energy,
                None => STARTING_ENERGY + bonus,
            }
        };
        match config.player_role {
            Role::Hacker => energy_hacker = player_energy,
            Role::Defender => energy_defender = player_energy,
        }

        Self {
            round: 1,
            energy_hacker: energy_hacker.clamp(0.0, 100.0),
            energy_defender: energy_defender.clamp(0.0, 100.0),
            network_integrity: 100.0,
            data_stolen: 0.0,
            threat_level: STARTING_THREAT,
            hacker_momentum: 0,
            defender_momentum: 0,
            hacker_cooldowns: BTreeMap::new(),
            defender_cooldowns: BTreeMap::new(),
            last_hacker_actions: Vec::new(),
            last_defender_actions: Vec::new(),
            history: Vec::new(),
            game_over: false,
            winner: None,
            low_threat_rounds: 0,
            combos_earned: 0,
            total_damage_dealt: 0.0,
            total_damage_blocked: 0.0,
            min_network_integrity: 100.0,
            hacker_tally: SideTally::default(),
            defender_tally: SideTally::default(),
            action_stats: BTreeMap::new(),
            hacker_score: 0.0,
            defender_score: 0.0,
        }
    }

    /// Whether the battle has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.game_over
    }

    /// Energy pool for a side.
    #[must_use]
    pub fn energy(&self, role: Role) -> f32 {
        match role {
            Role::Hacker => self.energy_hacker,
            Role::Defender => self.energy_defender,
        }
    }

    /// Momentum for a side.
    #[must_use]
    pub fn momentum(&self, role: Role) -> u8 {
        match role {
            Role::Hacker => self.hacker_momentum,
            Role::Defender => self.defender_momentum,
        }
    }

    /// Cooldown map for a side.
    #[must_use]
    pub fn cooldowns(&self, role: Role) -> &BTreeMap<ActionId, u8> {
        match role {
            Role::Hacker => &self.hacker_cooldowns,
            Role::Defender => &self.defender_cooldowns,
        }
    }

    /// Recent action ids for a side, newest last.
    #[must_use]
    pub fn last_actions(&self, role: Role) -> &[ActionId] {
        match role {
            Role::Hacker => &self.last_hacker_actions,
            Role::Defender => &self.last_defender_actions,
        }
    }

    /// Write-only tally for a side.
    #[must_use]
    pub fn tally(&self, role: Role) -> &SideTally {
        match role {
            Role::Hacker => &self.hacker_tally,
            Role::Defender => &self.defender_tally,
        }
    }

    pub(crate) fn set_energy(&mut self, role: Role, energy: f32) {
        let slot = match role {
            Role::Hacker => &mut self.energy_hacker,
            Role::Defender => &mut self.energy_defender,
        };
        *slot = energy.clamp(0.0, 100.0);
    }

    pub(crate) fn set_momentum(&mut self, role: Role, momentum: u8) {
        let slot = match role {
            Role::Hacker => &mut self.hacker_momentum,
            Role::Defender => &mut self.defender_momentum,
        };
        *slot = momentum.min(MOMENTUM_MAX);
    }

    pub(crate) fn cooldowns_mut(&mut self, role: Role) -> &mut BTreeMap<ActionId, u8> {
        match role {
            Role::Hacker => &mut self.hacker_cooldowns,
            Role::Defender => &mut self.defender_cooldowns,
        }
    }

    pub(crate) fn tally_mut(&mut self, role: Role) -> &mut SideTally {
        match role {
            Role::Hacker => &mut self.hacker_tally,
            Role::Defender => &mut self.defender_tally,
        }
    }

    /// Pushes an action id onto a side's recent-action list, dropping the
    /// oldest entry beyond the cap.
    pub(crate) fn push_last_action(&mut self, role: Role, id: ActionId) {
        let list = match role {
            Role::Hacker => &mut self.last_hacker_actions,
            Role::Defender => &mut self.last_defender_actions,
        };
        list.push(id);
        if list.len() > ACTION_HISTORY_LEN {
            list.remove(0);
        }
    }

    /// Final score for a side; meaningful only on terminal states.
    #[must_use]
    pub fn score(&self, role: Role) -> f32 {
        match role {
            Role::Hacker => self.hacker_score,
            Role::Defender => self.defender_score,
        }
    }
}
