//! Success-chance computation and the success roll.
//!
//! The chance formula, per attempt:
//!
//! ```text
//! chance = base + min(momentum * 5, 25) - counter(40) + synergy(15) + jitter
//! ```
//!
//! with jitter uniform in [-5, +5] and the result clamped to [5, 95]. The
//! roll itself draws uniform [0, 100); success iff roll < chance. Both draws
//! come from the resolver's seeded RNG, so a fixed seed fixes the outcome.

use rand::Rng;

use crate::catalog::combos::{self, Combo};
use crate::catalog::{Action, ActionId};
use crate::config::{
    CHANCE_CEILING, CHANCE_FLOOR, COUNTER_PENALTY, JITTER_SPAN, MOMENTUM_BONUS_CAP, MOMENTUM_STEP,
    SYNERGY_CHANCE_BONUS,
};

/// Outcome of one side's success check, with the modifier breakdown kept for
/// the round record.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessCheck {
    /// Whether the roll succeeded.
    pub success: bool,
    /// Final chance after all modifiers and clamping.
    pub chance: f32,
    /// Momentum contribution, percentage points.
    pub momentum_bonus: f32,
    /// Counter penalty applied, percentage points (0 or 40).
    pub counter_penalty: f32,
    /// Synergy contribution, percentage points (0 or 15).
    pub synergy_bonus: f32,
    /// The combo that applied, if any.
    pub combo: Option<Combo>,
    /// The jitter that was drawn.
    pub jitter: f32,
}

impl SuccessCheck {
    /// The outcome of an action that never got to roll: not enough energy or
    /// still on cooldown. Chance is reported as 0.
    #[must_use]
    pub fn auto_failure() -> Self {
        Self {
            success: false,
            chance: 0.0,
            momentum_bonus: 0.0,
            counter_penalty: 0.0,
            synergy_bonus: 0.0,
            combo: None,
            jitter: 0.0,
        }
    }
}

/// Computes the modified chance and rolls for success.
///
/// `momentum` is the acting side's own pre-round momentum; `own_history` is
/// that side's recent actions (combo lookback); `countered` has already been
/// decided from the opponent's most recent category.
pub fn roll_success<R: Rng>(
    action: &Action,
    momentum: u8,
    countered: bool,
    own_history: &[ActionId],
    rng: &mut R,
) -> SuccessCheck {
    let momentum_bonus = (f32::from(momentum) * MOMENTUM_STEP).min(MOMENTUM_BONUS_CAP);
    let counter_penalty = if countered { COUNTER_PENALTY } else { 0.0 };

    let combo = combos::synergy_with_history(own_history, &action.id);
    let synergy_bonus = if combo.is_some() { SYNERGY_CHANCE_BONUS } else { 0.0 };

    let jitter = rng.gen_range(-JITTER_SPAN..=JITTER_SPAN);

    let chance = (action.base_chance + momentum_bonus - counter_penalty + synergy_bonus + jitter)
        .clamp(CHANCE_FLOOR, CHANCE_CEILING);

    let roll: f32 = rng.gen_range(0.0..100.0);
    SuccessCheck {
        success: roll < chance,
        chance,
        momentum_bonus,
        counter_penalty,
        synergy_bonus,
        combo,
        jitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_action, ActionId};
    use crate::state::Role;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ddos() -> Action {
        find_action(Role::Hacker, &ActionId::new("ddos")).unwrap()
    }

    #[test]
    fn chance_stays_within_clamp_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let action = find_action(Role::Hacker, &ActionId::new("zeroday")).unwrap();
        for momentum in 0..=5 {
            for countered in [false, true] {
                let check = roll_success(&action, momentum, countered, &[], &mut rng);
                assert!(check.chance >= CHANCE_FLOOR);
                assert!(check.chance <= CHANCE_CEILING);
            }
        }
    }

    #[test]
    fn momentum_bonus_caps_at_twenty_five() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let check = roll_success(&ddos(), 5, false, &[], &mut rng);
        assert!((check.momentum_bonus - 25.0).abs() < f32::EPSILON);

        let check = roll_success(&ddos(), 3, false, &[], &mut rng);
        assert!((check.momentum_bonus - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn counter_penalty_is_flat_forty() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let check = roll_success(&ddos(), 0, true, &[], &mut rng);
        assert!((check.counter_penalty - 40.0).abs() < f32::EPSILON);
        // 65 - 40 + jitter stays well below the uncountered value.
        assert!(check.chance <= 30.0 + f32::EPSILON);
    }

    #[test]
    fn synergy_grants_chance_bonus_and_combo() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let bruteforce = find_action(Role::Hacker, &ActionId::new("bruteforce")).unwrap();
        let history = vec![ActionId::new("ddos")];
        let check = roll_success(&bruteforce, 0, false, &history, &mut rng);
        assert!((check.synergy_bonus - 15.0).abs() < f32::EPSILON);
        assert_eq!(check.combo.unwrap().name, "Network Assault");
    }

    #[test]
    fn fixed_seed_fixes_the_outcome() {
        let a = roll_success(&ddos(), 2, false, &[], &mut ChaCha8Rng::seed_from_u64(77));
        let b = roll_success(&ddos(), 2, false, &[], &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn auto_failure_reports_zero_chance() {
        let check = SuccessCheck::auto_failure();
        assert!(!check.success);
        assert_eq!(check.chance, 0.0);
        assert!(check.combo.is_none());
    }
}
