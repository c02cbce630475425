//! AI decision policy: picks the opponent's action each round.
//!
//! The policy scores every legal action by expected value and plays the best
//! one, with three deliberate imperfections that keep it beatable:
//!
//! - a difficulty-tuned **mistake roll** that plays a random legal action,
//! - a **pattern predictor** over the player's last two categories that is
//!   itself probabilistic on the repeat branch,
//! - a fixed per-session **personality** that skews preferences.
//!
//! Expected value is a deliberately shallow estimate — base chance adjusted
//! by own momentum only, no counter or synergy lookahead on the chance side —
//! matching the sort of heuristic a human plays by.
//!
//! # Contract
//!
//! [`AiPolicy::choose_action`] is a pure read of the battle state plus the
//! policy's own RNG. It returns an error only when the role has zero actions
//! even under the relaxed fallback, which means the catalog itself is broken.

pub mod persona;
pub mod prediction;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::roster::ActionRoster;
use crate::catalog::Action;
use crate::config::{BattleConfig, CHANCE_CEILING, CHANCE_FLOOR, MOMENTUM_STEP};
use crate::error::EngineError;
use crate::state::{BattleState, Role};

pub use persona::{Personality, PersonalityProfile};

/// Expected-value multiplier for an action that combos with the AI's own
/// previous play.
const COMBO_BONUS_MULTIPLIER: f32 = 1.3;

/// Expected-value multiplier for countering the predicted player category
/// (defender only).
const COUNTER_BONUS_MULTIPLIER: f32 = 1.4;

/// Average impact above which an action counts as high-damage for persona
/// purposes.
const HIGH_DAMAGE_THRESHOLD: f32 = 12.0;

/// Energy cost above which an action counts as expensive for persona
/// purposes.
const ENERGY_EXPENSIVE_THRESHOLD: f32 = 15.0;

/// The AI opponent for one session.
///
/// Holds the AI's role, its fixed personality, the difficulty-derived mistake
/// probability, and a seeded RNG. All battle data comes in through
/// [`Self::choose_action`].
#[derive(Debug, Clone)]
pub struct AiPolicy {
    role: Role,
    persona: Personality,
    mistake_probability: f64,
    max_rounds: u32,
    rng: ChaCha8Rng,
}

impl AiPolicy {
    /// Creates the policy for a session, rolling a random personality from
    /// the seed.
    #[must_use]
    pub fn new(config: &BattleConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let persona = Personality::roll(&mut rng);
        Self {
            role: config.ai_role(),
            persona,
            mistake_probability: config.difficulty.settings().mistake_probability,
            max_rounds: config.max_rounds,
            rng,
        }
    }

    /// Creates the policy with an explicit personality.
    #[must_use]
    pub fn with_persona(config: &BattleConfig, persona: Personality, seed: u64) -> Self {
        Self {
            persona,
            ..Self::new(config, seed)
        }
    }

    /// The role this policy plays.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The personality fixed at session creation.
    #[must_use]
    pub const fn persona(&self) -> Personality {
        self.persona
    }

    #[cfg(test)]
    pub(crate) fn set_mistake_probability(&mut self, probability: f64) {
        self.mistake_probability = probability;
    }

    /// Chooses the AI's action for the current round.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoAvailableAction`] when the role's catalog is empty
    /// even under the relaxed fallback — a configuration error, not a normal
    /// outcome.
    pub fn choose_action(
        &mut self,
        state: &BattleState,
        roster: &ActionRoster,
    ) -> Result<Action, EngineError> {
        let energy = state.energy(self.role);
        let cooldowns = state.cooldowns(self.role);
        let available = roster.available(energy, cooldowns);

        // Degraded fallback: ignore energy and cooldowns, play the cheapest
        // thing the catalog has.
        if available.is_empty() {
            tracing::warn!(role = %self.role, "no available action, falling back to cheapest");
            return roster
                .cheapest()
                .cloned()
                .ok_or(EngineError::NoAvailableAction(self.role));
        }

        // Deliberate mistake: random legal play.
        if self.rng.gen_bool(self.mistake_probability) {
            let index = self.rng.gen_range(0..available.len());
            tracing::debug!(role = %self.role, action = %available[index].id, "mistake roll");
            return Ok(available[index].clone());
        }

        let player_role = self.role.opponent();
        let predicted = prediction::predict_next_category(
            state.last_actions(player_role),
            player_role,
            &mut self.rng,
        );
        let opponent_last = state
            .last_actions(player_role)
            .last()
            .and_then(|id| crate::catalog::find_action(player_role, id))
            .map(|a| a.category);

        let mut best: Option<(&Action, f32)> = None;
        for action in &available {
            let score = self.score_action(action, state, predicted, opponent_last);
            tracing::debug!(
                role = %self.role,
                action = %action.id,
                score,
                "candidate evaluated"
            );
            // Strictly-greater keeps the first occurrence on ties, which is
            // catalog order.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        let (chosen, score) = best.expect("available list is non-empty");
        tracing::debug!(role = %self.role, action = %chosen.id, score, "action chosen");
        Ok(chosen.clone())
    }

    /// Expected value of one candidate action.
    fn score_action(
        &self,
        action: &Action,
        state: &BattleState,
        predicted: Option<crate::catalog::Category>,
        opponent_last: Option<crate::catalog::Category>,
    ) -> f32 {
        let momentum = state.momentum(self.role);

        // Shallow chance estimate: base + own momentum, nothing else.
        let chance_estimate = (action.base_chance + f32::from(momentum) * MOMENTUM_STEP)
            .clamp(CHANCE_FLOOR, CHANCE_CEILING)
            / 100.0;

        let mut ev = chance_estimate * action.avg_impact() * self.strategic_value(action, state);

        // Synergy with the AI's own previous play.
        if crate::catalog::combos::synergy_with_history(
            state.last_actions(self.role),
            &action.id,
        )
        .is_some()
        {
            ev *= COMBO_BONUS_MULTIPLIER;
        }

        // Countering the predicted player category (defender only).
        if self.role == Role::Defender {
            if let Some(predicted) = predicted {
                if action.category.counters() == predicted {
                    ev *= COUNTER_BONUS_MULTIPLIER;
                }
            }
        }

        ev *= self.urgency_multiplier(action, state);

        // Personality skew.
        let profile = self.persona.profile();
        if action.avg_impact() > HIGH_DAMAGE_THRESHOLD {
            ev *= profile.high_damage_bonus;
        }
        if action.energy_cost > ENERGY_EXPENSIVE_THRESHOLD {
            ev *= profile.energy_conservation;
        }
        // Counter-type: would counter the opponent's latest category if they
        // repeat it.
        if opponent_last.is_some_and(|last| action.category.counters() == last) {
            ev *= profile.counter_bonus;
        }

        ev
    }

    /// Role- and context-dependent strategic multiplier.
    fn strategic_value(&self, action: &Action, state: &BattleState) -> f32 {
        let mut value = 1.0;
        match self.role {
            Role::Hacker => {
                // Press the advantage when threat is already high.
                if state.threat_level > 75.0 {
                    value *= 1.4;
                }
                // Finish a crumbling network.
                if state.network_integrity < 30.0 {
                    value *= 1.3;
                }
                // Ahead on data: weight toward threat output.
                if state.data_stolen > 60.0 {
                    value *= action.threat_impact / 10.0;
                }
                // Late game favors energy efficiency.
                if state.round > 3 {
                    value *= 1.0 - action.energy_cost / 100.0;
                }
            }
            Role::Defender => {
                // Critical threat: weight hard toward threat reduction.
                if state.threat_level > 75.0 {
                    value *= (action.threat_impact / 10.0) * 2.5;
                }
                // Restore a weakened network.
                if state.network_integrity < 40.0 {
                    value *= 1.5;
                }
                // Heavy data loss needs answering.
                if state.data_stolen > 50.0 {
                    value *= 1.3;
                }
            }
        }
        value
    }

    /// End-game pressure multiplier.
    fn urgency_multiplier(&self, action: &Action, state: &BattleState) -> f32 {
        let mut multiplier = 1.0;

        if state.round >= self.max_rounds {
            multiplier *= 1.5;
        }

        if state.threat_level > 85.0 {
            match self.role {
                Role::Defender => multiplier *= 2.0,
                // Go for the kill, but only with real threat output.
                Role::Hacker if action.threat_impact >= 15.0 => multiplier *= 1.8,
                Role::Hacker => {}
            }
        }

        if state.network_integrity < 20.0 {
            multiplier *= match self.role {
                Role::Hacker => 1.6,
                Role::Defender => 1.4,
            };
        }

        multiplier
    }
}
