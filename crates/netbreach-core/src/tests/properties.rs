//! Property tests over the resolver's bounded-state invariants.
//!
//! Whatever corner of the state space a round starts from, the resolver must
//! keep every [0, 100] field in range, momentum in [0, 5] with
//! own-result-only resets, cooldowns on their exact lifecycle, and data
//! stolen monotone.

use proptest::prelude::*;

use crate::catalog::catalog_for;
use crate::config::{BattleConfig, Difficulty};
use crate::resolver::RoundResolver;
use crate::state::{BattleState, Role, MOMENTUM_MAX};

use super::helpers::assert_state_invariants;

#[derive(Debug, Clone)]
struct RoundCase {
    seed: u64,
    hacker_idx: usize,
    defender_idx: usize,
    energy_hacker: f32,
    energy_defender: f32,
    threat: f32,
    integrity: f32,
    data: f32,
    hacker_momentum: u8,
    defender_momentum: u8,
    hacker_cooldown: u8,
}

fn round_case() -> impl Strategy<Value = RoundCase> {
    (
        any::<u64>(),
        0usize..12,
        0usize..12,
        (
            0.0f32..=100.0,
            0.0f32..=100.0,
            0.0f32..=100.0,
            0.0f32..=100.0,
            0.0f32..=100.0,
        ),
        (0u8..=MOMENTUM_MAX, 0u8..=MOMENTUM_MAX, 0u8..=3),
    )
        .prop_map(
            |(
                seed,
                hacker_idx,
                defender_idx,
                (energy_hacker, energy_defender, threat, integrity, data),
                (hacker_momentum, defender_momentum, hacker_cooldown),
            )| RoundCase {
                seed,
                hacker_idx,
                defender_idx,
                energy_hacker,
                energy_defender,
                threat,
                integrity,
                data,
                hacker_momentum,
                defender_momentum,
                hacker_cooldown,
            },
        )
}

fn build_state(case: &RoundCase, config: &BattleConfig) -> BattleState {
    let mut state = BattleState::new(config);
    state.energy_hacker = case.energy_hacker;
    state.energy_defender = case.energy_defender;
    state.threat_level = case.threat;
    state.network_integrity = case.integrity;
    state.data_stolen = case.data;
    state.hacker_momentum = case.hacker_momentum;
    state.defender_momentum = case.defender_momentum;
    state
}

proptest! {
    #[test]
    fn one_round_preserves_every_bound(case in round_case()) {
        let config = BattleConfig::new(Role::Hacker, Difficulty::Normal);
        let hacker_action = catalog_for(Role::Hacker)[case.hacker_idx].clone();
        let defender_action = catalog_for(Role::Defender)[case.defender_idx].clone();

        let mut state = build_state(&case, &config);
        if case.hacker_cooldown > 0 {
            state
                .hacker_cooldowns
                .insert(hacker_action.id.clone(), case.hacker_cooldown);
        }

        let mut resolver = RoundResolver::new(config, case.seed);
        let next = resolver
            .process_round(&state, &hacker_action, &defender_action)
            .unwrap();

        assert_state_invariants(&next);
        prop_assert_eq!(next.round, state.round + 1);
        prop_assert!(next.data_stolen >= state.data_stolen);
        prop_assert_eq!(next.history.len(), 1);
    }

    #[test]
    fn momentum_follows_own_result_only(case in round_case()) {
        let config = BattleConfig::new(Role::Hacker, Difficulty::Normal);
        let hacker_action = catalog_for(Role::Hacker)[case.hacker_idx].clone();
        let defender_action = catalog_for(Role::Defender)[case.defender_idx].clone();

        let state = build_state(&case, &config);
        let mut resolver = RoundResolver::new(config, case.seed);
        let next = resolver
            .process_round(&state, &hacker_action, &defender_action)
            .unwrap();

        let record = next.history.last().unwrap();
        let expect_hacker = if record.hacker.success {
            (case.hacker_momentum + 1).min(MOMENTUM_MAX)
        } else {
            0
        };
        let expect_defender = if record.defender.success {
            (case.defender_momentum + 1).min(MOMENTUM_MAX)
        } else {
            0
        };
        prop_assert_eq!(next.hacker_momentum, expect_hacker);
        prop_assert_eq!(next.defender_momentum, expect_defender);
    }

    #[test]
    fn cooldown_lifecycle_is_exact(case in round_case()) {
        let config = BattleConfig::new(Role::Hacker, Difficulty::Normal);
        let hacker_action = catalog_for(Role::Hacker)[case.hacker_idx].clone();
        let defender_action = catalog_for(Role::Defender)[case.defender_idx].clone();

        let mut state = build_state(&case, &config);
        if case.hacker_cooldown > 0 {
            state
                .hacker_cooldowns
                .insert(hacker_action.id.clone(), case.hacker_cooldown);
        }

        let mut resolver = RoundResolver::new(config, case.seed);
        let next = resolver
            .process_round(&state, &hacker_action, &defender_action)
            .unwrap();

        let record = next.history.last().unwrap();
        let remaining = next
            .hacker_cooldowns
            .get(&hacker_action.id)
            .copied()
            .unwrap_or(0);
        let expected = if record.hacker.success && hacker_action.cooldown > 0 {
            // Armed this round, then ticked once.
            hacker_action.cooldown - 1
        } else {
            case.hacker_cooldown.saturating_sub(1)
        };
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn identical_inputs_resolve_identically(case in round_case()) {
        let config = BattleConfig::new(Role::Hacker, Difficulty::Normal);
        let hacker_action = catalog_for(Role::Hacker)[case.hacker_idx].clone();
        let defender_action = catalog_for(Role::Defender)[case.defender_idx].clone();
        let state = build_state(&case, &config);

        let mut first = RoundResolver::new(config.clone(), case.seed);
        let mut second = RoundResolver::new(config, case.seed);
        let a = first
            .process_round(&state, &hacker_action, &defender_action)
            .unwrap();
        let b = second
            .process_round(&state, &hacker_action, &defender_action)
            .unwrap();
        prop_assert_eq!(a, b);
    }
}
