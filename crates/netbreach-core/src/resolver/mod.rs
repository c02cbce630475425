//! Round resolution: the deterministic state machine at the heart of the
//! game.
//!
//! [`RoundResolver::process_round`] takes the current [`BattleState`] plus
//! one chosen action per side and produces the next state. The caller's
//! state is never mutated — a clone is transformed and returned, so undo and
//! audit trails come for free.
//!
//! # Pipeline
//!
//! 1. Input validation (fails before any work)
//! 2. Availability check per side (energy + cooldown)
//! 3. Counter check per side (symmetric category 3-cycle)
//! 4. Success chance + roll per side ([`chance`])
//! 5. Effect application — hacker first, with the breakthrough latch
//! 6. Energy settlement (deduct attempts, regenerate)
//! 7. Cooldown bookkeeping
//! 8. History + accumulators
//! 9. Round increment and win evaluation
//!
//! # Determinism
//!
//! The resolver owns a `ChaCha8Rng` seeded at construction. Random draws
//! happen in a fixed order (hacker chance/roll, defender chance/roll, hacker
//! magnitude, defender magnitude), so identical seeds, states, and actions
//! reproduce identical rounds bit for bit.

pub mod chance;
mod victory;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{find_action, Action, Category};
use crate::config::{BattleConfig, DATA_THEFT_RATIO};
use crate::error::EngineError;
use crate::state::{BattleState, Role, RoundRecord, SideOutcome};

use self::chance::SuccessCheck;

/// The round-resolution engine for one session.
///
/// Holds the session config and the seeded RNG; all battle data lives in the
/// [`BattleState`] values threaded through [`Self::process_round`].
#[derive(Debug, Clone)]
pub struct RoundResolver {
    config: BattleConfig,
    rng: ChaCha8Rng,
    seed: u64,
}

impl RoundResolver {
    /// Creates a resolver with the given config and RNG seed.
    #[must_use]
    pub fn new(config: BattleConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this resolver was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Resolves one round and returns the next state.
    ///
    /// # Errors
    ///
    /// - [`EngineError::BattleFinished`] if `state` is already terminal.
    /// - [`EngineError::MalformedAction`] / [`EngineError::UnknownAction`] if
    ///   an action fails validation. Nothing is resolved in that case; the
    ///   input state stands.
    pub fn process_round(
        &mut self,
        state: &BattleState,
        hacker_action: &Action,
        defender_action: &Action,
    ) -> Result<BattleState, EngineError> {
        if state.is_terminal() {
            return Err(EngineError::BattleFinished);
        }
        validate_action(hacker_action, Role::Hacker)?;
        validate_action(defender_action, Role::Defender)?;

        let mut next = state.clone();

        // Availability. "Attempted" is an energy question only: an
        // affordable action still pays its cost even when cooldown blocks
        // the roll.
        let hacker_attempted = state.energy_hacker >= hacker_action.energy_cost;
        let defender_attempted = state.energy_defender >= defender_action.energy_cost;
        let hacker_available = hacker_attempted
            && hacker_action.is_available(state.energy_hacker, &state.hacker_cooldowns);
        let defender_available = defender_attempted
            && defender_action.is_available(state.energy_defender, &state.defender_cooldowns);

        // Counter checks read the opponent's previous round.
        let hacker_countered = is_countered(
            hacker_action.category,
            last_category(state, Role::Defender),
        );
        let defender_countered = is_countered(
            defender_action.category,
            last_category(state, Role::Hacker),
        );

        // Success rolls, both from the pre-round snapshot.
        let hacker_check = if hacker_available {
            chance::roll_success(
                hacker_action,
                state.hacker_momentum,
                hacker_countered,
                &state.last_hacker_actions,
                &mut self.rng,
            )
        } else {
            SuccessCheck::auto_failure()
        };
        let defender_check = if defender_available {
            chance::roll_success(
                defender_action,
                state.defender_momentum,
                defender_countered,
                &state.last_defender_actions,
                &mut self.rng,
            )
        } else {
            SuccessCheck::auto_failure()
        };

        // Momentum is own-result-only: success extends the streak, failure
        // breaks it, the opponent's round never touches it.
        step_momentum(&mut next, Role::Hacker, hacker_check.success);
        step_momentum(&mut next, Role::Defender, defender_check.success);

        // Hacker effects land first. If they max threat or zero integrity
        // the battle is decided before the defender's recovery: the
        // defender's roll is still recorded but its effects are void.
        let hacker_magnitude = self.apply_hacker_effects(&mut next, hacker_action, &hacker_check);
        let breakthrough = next.threat_level >= 100.0 || next.network_integrity <= 0.0;
        let defender_magnitude = if breakthrough {
            0.0
        } else {
            self.apply_defender_effects(&mut next, defender_action, &defender_check)
        };

        next.min_network_integrity = next.min_network_integrity.min(next.network_integrity);

        // Energy settlement: attempts pay, then both sides regenerate.
        settle_energy(
            &mut next,
            Role::Hacker,
            hacker_action,
            hacker_attempted,
            &self.config,
        );
        settle_energy(
            &mut next,
            Role::Defender,
            defender_action,
            defender_attempted,
            &self.config,
        );

        // Cooldowns: arm on success, then tick everything down one round.
        arm_cooldown(&mut next, Role::Hacker, hacker_action, hacker_check.success);
        arm_cooldown(&mut next, Role::Defender, defender_action, defender_check.success);
        tick_cooldowns(&mut next);

        // Accumulators and history.
        record_side_stats(&mut next, Role::Hacker, hacker_action, &hacker_check, hacker_magnitude);
        record_side_stats(
            &mut next,
            Role::Defender,
            defender_action,
            &defender_check,
            defender_magnitude,
        );
        next.push_last_action(Role::Hacker, hacker_action.id.clone());
        next.push_last_action(Role::Defender, defender_action.id.clone());
        next.history.push(RoundRecord {
            round: next.round,
            hacker: side_outcome(hacker_action, &hacker_check, hacker_countered, hacker_magnitude),
            defender: side_outcome(
                defender_action,
                &defender_check,
                defender_countered,
                defender_magnitude,
            ),
            threat_level: next.threat_level,
            network_integrity: next.network_integrity,
            data_stolen: next.data_stolen,
            energy_hacker: next.energy_hacker,
            energy_defender: next.energy_defender,
        });

        next.round += 1;

        clamp_bounded_fields(&mut next);
        victory::evaluate(&mut next, &self.config);

        tracing::debug!(
            round = next.round - 1,
            hacker = %hacker_action.id,
            hacker_success = hacker_check.success,
            defender = %defender_action.id,
            defender_success = defender_check.success,
            threat = next.threat_level,
            integrity = next.network_integrity,
            "round resolved"
        );

        Ok(next)
    }

    /// Applies a successful hacker action; returns the magnitude dealt.
    fn apply_hacker_effects(
        &mut self,
        next: &mut BattleState,
        action: &Action,
        check: &SuccessCheck,
    ) -> f32 {
        if !check.success {
            return 0.0;
        }
        let mut magnitude = self
            .rng
            .gen_range(action.impact_range.0..=action.impact_range.1);
        if let Some(combo) = check.combo {
            magnitude += combo.bonus;
            next.combos_earned += 1;
        }

        next.network_integrity = (next.network_integrity - magnitude).max(0.0);
        next.data_stolen = (next.data_stolen + magnitude * DATA_THEFT_RATIO).min(100.0);
        next.threat_level = (next.threat_level + action.threat_impact).min(100.0);
        next.total_damage_dealt += magnitude;
        magnitude
    }

    /// Applies a successful defender action; returns the magnitude restored.
    fn apply_defender_effects(
        &mut self,
        next: &mut BattleState,
        action: &Action,
        check: &SuccessCheck,
    ) -> f32 {
        if !check.success {
            return 0.0;
        }
        let mut magnitude = self
            .rng
            .gen_range(action.impact_range.0..=action.impact_range.1);
        if let Some(combo) = check.combo {
            magnitude += combo.bonus;
            next.combos_earned += 1;
        }

        next.network_integrity = (next.network_integrity + magnitude).min(100.0);
        next.threat_level = (next.threat_level - action.threat_impact).max(0.0);
        next.total_damage_blocked += magnitude;
        magnitude
    }
}

// =============================================================================
// Pipeline helpers
// =============================================================================

fn validate_action(action: &Action, role: Role) -> Result<(), EngineError> {
    action
        .validate()
        .map_err(|reason| EngineError::MalformedAction {
            id: action.id.clone(),
            reason,
        })?;
    if find_action(role, &action.id).is_none() {
        return Err(EngineError::UnknownAction {
            role,
            id: action.id.clone(),
        });
    }
    Ok(())
}

/// Category of a side's most recent action, if it has played one.
fn last_category(state: &BattleState, role: Role) -> Option<Category> {
    state
        .last_actions(role)
        .last()
        .and_then(|id| find_action(role, id))
        .map(|a| a.category)
}

fn is_countered(current: Category, opponent_previous: Option<Category>) -> bool {
    opponent_previous.is_some_and(|prev| current.is_countered_by(prev))
}

fn step_momentum(next: &mut BattleState, role: Role, success: bool) {
    let updated = if success { next.momentum(role) + 1 } else { 0 };
    next.set_momentum(role, updated);
}

fn settle_energy(
    next: &mut BattleState,
    role: Role,
    action: &Action,
    attempted: bool,
    config: &BattleConfig,
) {
    let mut energy = next.energy(role);
    if attempted {
        energy -= action.energy_cost;
        next.tally_mut(role).energy_spent += action.energy_cost;
    }
    energy += config.energy_regen(role);
    next.set_energy(role, energy);
}

fn arm_cooldown(next: &mut BattleState, role: Role, action: &Action, success: bool) {
    if success && action.cooldown > 0 {
        next.cooldowns_mut(role)
            .insert(action.id.clone(), action.cooldown);
    }
}

/// Every tracked cooldown ticks down one round, floor 0 — including one armed
/// this round.
fn tick_cooldowns(next: &mut BattleState) {
    for role in [Role::Hacker, Role::Defender] {
        for remaining in next.cooldowns_mut(role).values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }
}

fn record_side_stats(
    next: &mut BattleState,
    role: Role,
    action: &Action,
    check: &SuccessCheck,
    magnitude: f32,
) {
    let tally = next.tally_mut(role);
    if check.success {
        tally.successful_actions += 1;
    } else {
        tally.failed_actions += 1;
    }

    let stats = next.action_stats.entry(action.id.clone()).or_default();
    stats.uses += 1;
    if check.success {
        stats.successes += 1;
        stats.damage += magnitude;
    }
}

fn side_outcome(
    action: &Action,
    check: &SuccessCheck,
    countered: bool,
    magnitude: f32,
) -> SideOutcome {
    SideOutcome {
        action: action.id.clone(),
        success: check.success,
        chance: check.chance,
        countered,
        combo: check.combo.map(|c| c.name.to_owned()),
        magnitude,
    }
}

/// Defensive clamp over all [0, 100]-bounded fields. Out-of-range values are
/// an internal inconsistency, recovered by clamping rather than thrown.
fn clamp_bounded_fields(next: &mut BattleState) {
    next.threat_level = next.threat_level.clamp(0.0, 100.0);
    next.network_integrity = next.network_integrity.clamp(0.0, 100.0);
    next.data_stolen = next.data_stolen.clamp(0.0, 100.0);
    next.energy_hacker = next.energy_hacker.clamp(0.0, 100.0);
    next.energy_defender = next.energy_defender.clamp(0.0, 100.0);
}

// =============================================================================
// Tests
// =============================================================================
