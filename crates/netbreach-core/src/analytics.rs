//! Post-battle performance analytics: letter grades over four axes plus
//! per-action usage breakdowns.
//!
//! Everything here is a pure read of the state's accumulator fields — nothing
//! feeds back into resolution.

use serde::{Deserialize, Serialize};

use crate::catalog::roster::ActionRoster;
use crate::catalog::ActionId;
use crate::state::{BattleState, Role};

/// Letter grade on the usual S-to-F ladder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// 90+.
    S,
    /// 80–89.
    A,
    /// 70–79.
    B,
    /// 60–69.
    C,
    /// 50–59.
    D,
    /// Below 50.
    F,
}

impl Grade {
    /// Maps a 0–100 score onto the ladder.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 90.0 => Grade::S,
            s if s >= 80.0 => Grade::A,
            s if s >= 70.0 => Grade::B,
            s if s >= 60.0 => Grade::C,
            s if s >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// One graded axis: the letter plus the raw 0–100 score behind it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGrade {
    /// Letter grade.
    pub grade: Grade,
    /// Underlying score, clamped to [0, 100].
    pub score: f32,
}

impl AxisGrade {
    fn from_score(score: f32) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            grade: Grade::from_score(score),
            score,
        }
    }
}

/// The full grade card for one player's battle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Average of the four axes.
    pub overall: AxisGrade,
    /// Damage output (or blocking, for the defender).
    pub offense: AxisGrade,
    /// Integrity and threat containment.
    pub defense: AxisGrade,
    /// Combos, hit rate, momentum.
    pub strategy: AxisGrade,
    /// Output per energy and actions that landed.
    pub efficiency: AxisGrade,
}

/// Grades a battle from the player's perspective. Meaningful on terminal
/// states, but computable at any point.
#[must_use]
pub fn grade_battle(state: &BattleState, player_role: Role) -> PerformanceReport {
    let offense = offense_score(state, player_role);
    let defense = defense_score(state, player_role);
    let strategy = strategy_score(state, player_role);
    let efficiency = efficiency_score(state, player_role);
    let overall = (offense + defense + strategy + efficiency) / 4.0;

    PerformanceReport {
        overall: AxisGrade::from_score(overall),
        offense: AxisGrade::from_score(offense),
        defense: AxisGrade::from_score(defense),
        strategy: AxisGrade::from_score(strategy),
        efficiency: AxisGrade::from_score(efficiency),
    }
}

fn rounds_weight(state: &BattleState) -> f32 {
    (state.round as f32) * 10.0
}

fn offense_score(state: &BattleState, role: Role) -> f32 {
    match role {
        Role::Hacker => {
            let damage = (state.total_damage_dealt / rounds_weight(state)) * 100.0;
            damage * 0.4 + state.threat_level * 0.3 + state.data_stolen * 0.3
        }
        Role::Defender => {
            let blocked = (state.total_damage_blocked / rounds_weight(state)) * 100.0;
            blocked * 0.5 + (100.0 - state.threat_level).max(0.0) * 0.5
        }
    }
}

fn defense_score(state: &BattleState, role: Role) -> f32 {
    match role {
        Role::Defender => {
            state.network_integrity * 0.6 + (100.0 - state.threat_level).max(0.0) * 0.4
        }
        Role::Hacker => (100.0 - state.network_integrity).max(0.0),
    }
}

fn strategy_score(state: &BattleState, role: Role) -> f32 {
    let combo_pace = (state.round as f32 / 3.0).max(1.0);
    let combo_score = ((state.combos_earned as f32 / combo_pace) * 100.0).min(100.0);

    let tally = state.tally(role);
    let attempts = (tally.successful_actions + tally.failed_actions).max(1);
    let success_rate = tally.successful_actions as f32 / attempts as f32 * 100.0;

    let momentum_score =
        ((f32::from(state.hacker_momentum + state.defender_momentum) / 10.0) * 100.0).min(100.0);

    combo_score * 0.4 + success_rate * 0.4 + momentum_score * 0.2
}

fn efficiency_score(state: &BattleState, role: Role) -> f32 {
    let output = match role {
        Role::Hacker => state.total_damage_dealt,
        Role::Defender => state.total_damage_blocked,
    };
    let tally = state.tally(role);
    let per_energy = output / tally.energy_spent.max(1.0);
    let energy_score = (per_energy * 20.0).min(100.0);

    let landed = tally.successful_actions as f32 / (state.round as f32).max(1.0) * 100.0;

    energy_score * 0.5 + landed.min(100.0) * 0.5
}

// =============================================================================
// Per-action analytics
// =============================================================================

/// Usage breakdown for one action over a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    /// Action id.
    pub id: ActionId,
    /// Display name.
    pub name: String,
    /// Times played.
    pub uses: u32,
    /// Percent of plays that succeeded.
    pub success_rate: f32,
    /// Total magnitude delivered.
    pub damage: f32,
    /// Magnitude per energy spent on this action.
    pub efficiency: f32,
}

/// Per-action analytics over the player's roster, sorted by usage, heaviest
/// first.
#[must_use]
pub fn action_analytics(state: &BattleState, roster: &ActionRoster) -> Vec<ActionReport> {
    let mut rows: Vec<ActionReport> = roster
        .visible()
        .iter()
        .map(|action| {
            let stats = state.action_stats.get(&action.id).copied().unwrap_or_default();
            let success_rate = if stats.uses > 0 {
                stats.successes as f32 / stats.uses as f32 * 100.0
            } else {
                0.0
            };
            let efficiency = if stats.uses > 0 {
                stats.damage / (stats.uses as f32 * action.energy_cost).max(1.0)
            } else {
                0.0
            };
            ActionReport {
                id: action.id.clone(),
                name: action.name.clone(),
                uses: stats.uses,
                success_rate,
                damage: stats.damage,
                efficiency,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.uses.cmp(&a.uses));
    rows
}
