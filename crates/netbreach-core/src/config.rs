//! Battle configuration and engine tuning constants.
//!
//! Difficulty touches exactly three engine knobs — the AI side's energy
//! regeneration, the AI's mistake probability, and the final score multiplier
//! — plus a starting-energy bonus for the player on easy. Everything else is
//! a fixed constant of the simulation.

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeModifiers;
use crate::state::Role;

// =============================================================================
// Fixed engine constants
// =============================================================================

/// Energy both sides start with.
pub const STARTING_ENERGY: f32 = 100.0;

/// Threat level at session start (balanced midpoint).
pub const STARTING_THREAT: f32 = 50.0;

/// Per-round energy regeneration for the player side.
pub const BASE_ENERGY_REGEN: f32 = 15.0;

/// Flat success-chance penalty for a countered action, percentage points.
pub const COUNTER_PENALTY: f32 = 40.0;

/// Flat success-chance bonus when the action combos with the side's previous
/// action.
pub const SYNERGY_CHANCE_BONUS: f32 = 15.0;

/// Success-chance bonus per point of momentum.
pub const MOMENTUM_STEP: f32 = 5.0;

/// Cap on the total momentum bonus.
pub const MOMENTUM_BONUS_CAP: f32 = 25.0;

/// Lower clamp on any computed success chance.
pub const CHANCE_FLOOR: f32 = 5.0;

/// Upper clamp on any computed success chance.
pub const CHANCE_CEILING: f32 = 95.0;

/// Half-width of the uniform random jitter applied to success chances.
pub const JITTER_SPAN: f32 = 5.0;

/// Fraction of hacker damage converted into stolen data.
pub const DATA_THEFT_RATIO: f32 = 0.6;

/// Threat level below which a round counts toward the defender's win.
pub const LOW_THREAT_THRESHOLD: f32 = 40.0;

/// Consecutive low-threat rounds required for a defender victory.
pub const LOW_THREAT_ROUNDS_TO_WIN: u32 = 3;

/// Both sides below this energy at round end is a draw.
pub const DRAW_ENERGY_FLOOR: f32 = 15.0;

/// Default round limit; effectively unbounded unless a challenge tightens it.
pub const DEFAULT_MAX_ROUNDS: u32 = 999;

// =============================================================================
// Difficulty
// =============================================================================

/// Opponent difficulty selected at session creation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Forgiving: sloppy AI, slow AI regen, player energy head start.
    Easy,
    /// Baseline tuning.
    #[default]
    Normal,
    /// Sharp AI, fast AI regen, score bonus.
    Hard,
}

/// Concrete knob values for a difficulty level.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Per-round energy regeneration for the AI side.
    pub ai_energy_regen: f32,
    /// Probability the AI plays a random available action instead of the
    /// best-scoring one.
    pub mistake_probability: f64,
    /// Multiplier applied to both final scores.
    pub score_multiplier: f32,
    /// Extra starting energy for the player side.
    pub player_energy_bonus: f32,
}

impl Difficulty {
    /// The knob values for this difficulty.
    #[must_use]
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                ai_energy_regen: 10.0,
                mistake_probability: 0.25,
                score_multiplier: 0.75,
                player_energy_bonus: 20.0,
            },
            Difficulty::Normal => DifficultySettings {
                ai_energy_regen: BASE_ENERGY_REGEN,
                mistake_probability: 0.15,
                score_multiplier: 1.0,
                player_energy_bonus: 0.0,
            },
            Difficulty::Hard => DifficultySettings {
                ai_energy_regen: 18.0,
                mistake_probability: 0.08,
                score_multiplier: 1.25,
                player_energy_bonus: 0.0,
            },
        }
    }
}

// =============================================================================
// BattleConfig
// =============================================================================

/// Per-session configuration consumed by the resolver and the AI policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Which side the human plays; the other side is the AI.
    pub player_role: Role,
    /// Opponent difficulty.
    pub difficulty: Difficulty,
    /// Round limit consumed by AI urgency and challenge validation.
    pub max_rounds: u32,
    /// Optional challenge modifiers (catalog pre-filter plus a few config
    /// overrides). `None` for a standard battle.
    pub modifiers: Option<ChallengeModifiers>,
}

impl BattleConfig {
    /// Creates a standard (no-challenge) configuration.
    #[must_use]
    pub fn new(player_role: Role, difficulty: Difficulty) -> Self {
        Self {
            player_role,
            difficulty,
            max_rounds: DEFAULT_MAX_ROUNDS,
            modifiers: None,
        }
    }

    /// Attaches challenge modifiers, tightening the round limit if the
    /// challenge defines one.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: ChallengeModifiers) -> Self {
        if let Some(max_rounds) = modifiers.max_rounds {
            self.max_rounds = max_rounds;
        }
        self.modifiers = Some(modifiers);
        self
    }

    /// The AI's role.
    #[must_use]
    pub const fn ai_role(&self) -> Role {
        self.player_role.opponent()
    }

    /// Per-round energy regeneration for a side. The player side always
    /// regenerates at the base rate; the AI side follows difficulty. A
    /// challenge regen override (e.g. "no regeneration") trumps both.
    #[must_use]
    pub fn energy_regen(&self, role: Role) -> f32 {
        if let Some(regen) = self.modifiers.as_ref().and_then(|m| m.energy_regen) {
            return regen;
        }
        if role == self.ai_role() {
            self.difficulty.settings().ai_energy_regen
        } else {
            BASE_ENERGY_REGEN
        }
    }
}
