//! Challenge modifiers: a pre-filter over the action catalog plus a handful
//! of config overrides, applied once at session creation.
//!
//! The engine itself knows nothing about challenges — by the time a round is
//! resolved, modifiers have already shaped the visible roster and the battle
//! config. Completion validation is a pure read of the terminal state.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Action, CategorySet};
use crate::state::{BattleState, Role, Winner};

// =============================================================================
// Modifiers
// =============================================================================

/// Restrictions and overrides a challenge imposes on a session.
///
/// Category bans and cost caps/floors filter the action catalog; the
/// remaining fields override config/state defaults or set completion
/// requirements checked after the battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeModifiers {
    /// Categories removed from the visible roster.
    pub banned_categories: Option<CategorySet>,
    /// Maximum allowed energy cost; pricier actions are filtered out.
    pub max_energy_cost: Option<f32>,
    /// Minimum allowed energy cost; cheaper actions are filtered out.
    pub min_energy_cost: Option<f32>,
    /// Player starting energy override.
    pub starting_energy: Option<f32>,
    /// Per-round regeneration override for both sides.
    pub energy_regen: Option<f32>,
    /// Round limit to win within.
    pub max_rounds: Option<u32>,
    /// Minimum combos that must trigger for completion.
    pub min_combos: Option<u32>,
    /// Network integrity must never drop below this for completion.
    pub min_network_integrity: Option<f32>,
}

impl ChallengeModifiers {
    /// Whether a single action survives the filter.
    #[must_use]
    pub fn allows(&self, action: &Action) -> bool {
        if let Some(banned) = self.banned_categories {
            if banned.contains(action.category.into()) {
                return false;
            }
        }
        if let Some(max_cost) = self.max_energy_cost {
            if action.energy_cost > max_cost {
                return false;
            }
        }
        if let Some(min_cost) = self.min_energy_cost {
            if action.energy_cost < min_cost {
                return false;
            }
        }
        true
    }

    /// Filters an action list, preserving order.
    #[must_use]
    pub fn filter_actions(&self, actions: &[Action]) -> Vec<Action> {
        actions.iter().filter(|a| self.allows(a)).cloned().collect()
    }
}

// =============================================================================
// Challenge kinds
// =============================================================================

/// The fixed set of challenge types a session can run under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Win without any Network-category actions.
    NoNetwork,
    /// All actions cost at most 12 energy.
    BudgetBattle,
    /// Win in under 8 rounds.
    SpeedRun,
    /// Trigger 3 or more combos to win.
    ComboMaster,
    /// Win without integrity dropping below 80.
    PerfectDefense,
    /// Start with 50 energy, no regeneration.
    HighStakes,
    /// Only actions costing 20+ energy available.
    UltimatePower,
}

impl ChallengeKind {
    /// All kinds, pick order for the seeded selection.
    pub const ALL: [ChallengeKind; 7] = [
        ChallengeKind::NoNetwork,
        ChallengeKind::BudgetBattle,
        ChallengeKind::SpeedRun,
        ChallengeKind::ComboMaster,
        ChallengeKind::PerfectDefense,
        ChallengeKind::HighStakes,
        ChallengeKind::UltimatePower,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoNetwork => "No Network Actions",
            Self::BudgetBattle => "Budget Battle",
            Self::SpeedRun => "Speed Run",
            Self::ComboMaster => "Combo Master",
            Self::PerfectDefense => "Perfect Defense",
            Self::HighStakes => "High Stakes",
            Self::UltimatePower => "Ultimate Power",
        }
    }

    /// One-line description shown to the player.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoNetwork => "Win without using any Network category actions",
            Self::BudgetBattle => "All actions cost maximum 12 energy",
            Self::SpeedRun => "Win in under 8 rounds",
            Self::ComboMaster => "Trigger 3 or more combos to win",
            Self::PerfectDefense => "Win without Network Integrity dropping below 80",
            Self::HighStakes => "Start with 50 energy, no regeneration",
            Self::UltimatePower => "Only actions costing 20+ energy available",
        }
    }

    /// The modifiers this challenge imposes.
    #[must_use]
    pub fn modifiers(self) -> ChallengeModifiers {
        match self {
            Self::NoNetwork => ChallengeModifiers {
                banned_categories: Some(CategorySet::NETWORK),
                ..Default::default()
            },
            Self::BudgetBattle => ChallengeModifiers {
                max_energy_cost: Some(12.0),
                ..Default::default()
            },
            Self::SpeedRun => ChallengeModifiers {
                max_rounds: Some(8),
                ..Default::default()
            },
            Self::ComboMaster => ChallengeModifiers {
                min_combos: Some(3),
                ..Default::default()
            },
            Self::PerfectDefense => ChallengeModifiers {
                min_network_integrity: Some(80.0),
                ..Default::default()
            },
            Self::HighStakes => ChallengeModifiers {
                starting_energy: Some(50.0),
                energy_regen: Some(0.0),
                ..Default::default()
            },
            Self::UltimatePower => ChallengeModifiers {
                min_energy_cost: Some(20.0),
                ..Default::default()
            },
        }
    }

    /// Deterministically picks a challenge kind and a forced player role from
    /// a seed. The same seed (e.g. derived from a calendar date by the host)
    /// always yields the same pair.
    #[must_use]
    pub fn pick(seed: u64) -> (ChallengeKind, Role) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let kind = *Self::ALL
            .choose(&mut rng)
            .expect("challenge kind list is non-empty");
        let role = *[Role::Hacker, Role::Defender]
            .choose(&mut rng)
            .expect("role list is non-empty");
        (kind, role)
    }

    /// Validates completion against a terminal state.
    ///
    /// A challenge is complete only if the player won AND every requirement
    /// the modifiers define held.
    pub fn validate(
        self,
        state: &BattleState,
        player_role: Role,
    ) -> Result<(), ChallengeFailure> {
        let player_won = matches!(
            (state.winner, player_role),
            (Some(Winner::Hacker), Role::Hacker) | (Some(Winner::Defender), Role::Defender)
        );
        if !state.game_over || !player_won {
            return Err(ChallengeFailure::MustWin);
        }

        let modifiers = self.modifiers();
        // `round` has already advanced past the final resolved round.
        let rounds_played = state.round.saturating_sub(1);
        if let Some(max_rounds) = modifiers.max_rounds {
            if rounds_played > max_rounds {
                return Err(ChallengeFailure::TooManyRounds { limit: max_rounds });
            }
        }
        if let Some(min_combos) = modifiers.min_combos {
            if state.combos_earned < min_combos {
                return Err(ChallengeFailure::NotEnoughCombos { required: min_combos });
            }
        }
        if let Some(floor) = modifiers.min_network_integrity {
            if state.min_network_integrity < floor {
                return Err(ChallengeFailure::IntegrityDroppedBelow { floor });
            }
        }
        Ok(())
    }
}

/// Why a challenge run did not count as complete.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ChallengeFailure {
    /// The battle was lost, drawn, or still in progress.
    #[error("must win the battle")]
    MustWin,
    /// Victory took longer than the challenge allows.
    #[error("must win in {limit} rounds or less")]
    TooManyRounds {
        /// The round limit.
        limit: u32,
    },
    /// Too few combos triggered.
    #[error("must trigger at least {required} combos")]
    NotEnoughCombos {
        /// Combos required.
        required: u32,
    },
    /// Integrity dipped below the required floor at some point.
    #[error("network integrity must stay above {floor}")]
    IntegrityDroppedBelow {
        /// The integrity floor.
        floor: f32,
    },
}
