//! Win-condition evaluation and final scoring.
//!
//! Checked in fixed precedence order after every round; the first match
//! wins. A threat of 100 always reports a hacker win even when integrity hit
//! 0 in the same round.

use crate::config::{BattleConfig, DRAW_ENERGY_FLOOR, LOW_THREAT_ROUNDS_TO_WIN, LOW_THREAT_THRESHOLD};
use crate::state::{BattleState, Winner};

/// Evaluates the win conditions against a freshly resolved round and, on a
/// terminal state, computes final scores.
///
/// Precedence: threat maxed → hacker; integrity zeroed → hacker; three
/// consecutive low-threat rounds → defender; both sides energy-starved →
/// draw; otherwise the battle continues. The low-threat counter is only
/// updated when neither hacker condition fired.
pub(crate) fn evaluate(state: &mut BattleState, config: &BattleConfig) {
    if state.threat_level >= 100.0 {
        finish(state, config, Winner::Hacker);
        return;
    }

    if state.network_integrity <= 0.0 {
        finish(state, config, Winner::Hacker);
        return;
    }

    if state.threat_level < LOW_THREAT_THRESHOLD {
        state.low_threat_rounds += 1;
    } else {
        state.low_threat_rounds = 0;
    }
    if state.low_threat_rounds >= LOW_THREAT_ROUNDS_TO_WIN {
        finish(state, config, Winner::Defender);
        return;
    }

    if state.energy_hacker < DRAW_ENERGY_FLOOR && state.energy_defender < DRAW_ENERGY_FLOOR {
        finish(state, config, Winner::Draw);
    }
}

fn finish(state: &mut BattleState, config: &BattleConfig, winner: Winner) {
    state.game_over = true;
    state.winner = Some(winner);
    compute_final_scores(state, config);
    tracing::info!(
        winner = %winner,
        rounds = state.round.saturating_sub(1),
        threat = state.threat_level,
        integrity = state.network_integrity,
        "battle over"
    );
}

/// Strategic scoring: rewards exfiltration/protection, combos, raw output,
/// and energy actually put to work, mirrored per side and scaled by the
/// difficulty multiplier.
fn compute_final_scores(state: &mut BattleState, config: &BattleConfig) {
    let multiplier = config.difficulty.settings().score_multiplier;

    let hacker = state.data_stolen
        + (100.0 - state.network_integrity) * 0.6
        + state.combos_earned as f32 * 10.0
        + state.total_damage_dealt * 0.3
        + (100.0 - state.energy_hacker) * 0.1;

    let defender = state.network_integrity
        + (100.0 - state.data_stolen) * 0.6
        + state.combos_earned as f32 * 10.0
        + state.total_damage_blocked * 0.3
        + (100.0 - state.energy_defender) * 0.1;

    state.hacker_score = hacker * multiplier;
    state.defender_score = defender * multiplier;
}
