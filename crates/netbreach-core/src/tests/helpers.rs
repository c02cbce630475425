//! Test fixtures: canned sessions and battle runners.

use crate::catalog::roster::ActionRoster;
use crate::catalog::{find_action, Action, ActionId};
use crate::config::{BattleConfig, Difficulty};
use crate::policy::AiPolicy;
use crate::resolver::RoundResolver;
use crate::state::{BattleState, Role};

/// Safety cap for test battles that should terminate on their own.
pub const ROUND_CAP: u32 = 1000;

/// A full AI-vs-AI session: resolver, one policy per side, both rosters, and
/// the evolving state.
pub struct TestSession {
    /// The round resolver.
    pub resolver: RoundResolver,
    /// Policy playing the hacker side.
    pub hacker_policy: AiPolicy,
    /// Policy playing the defender side.
    pub defender_policy: AiPolicy,
    /// Hacker roster.
    pub hacker_roster: ActionRoster,
    /// Defender roster.
    pub defender_roster: ActionRoster,
    /// Current state.
    pub state: BattleState,
}

impl TestSession {
    /// Builds a session where both sides are driven by policies, all seeded
    /// from `seed` so the whole battle is reproducible.
    pub fn new(seed: u64) -> Self {
        Self::with_config(BattleConfig::new(Role::Hacker, Difficulty::Normal), seed)
    }

    /// Builds a session with an explicit config.
    pub fn with_config(config: BattleConfig, seed: u64) -> Self {
        // The "player" side needs its own policy too; give it a config whose
        // AI role is the player's role.
        let mut mirrored = config.clone();
        mirrored.player_role = config.player_role.opponent();

        let (hacker_config, defender_config) = match config.ai_role() {
            Role::Hacker => (&config, &mirrored),
            Role::Defender => (&mirrored, &config),
        };

        let state = BattleState::new(&config);
        Self {
            resolver: RoundResolver::new(config.clone(), seed),
            hacker_policy: AiPolicy::new(hacker_config, seed.wrapping_add(1)),
            defender_policy: AiPolicy::new(defender_config, seed.wrapping_add(2)),
            hacker_roster: ActionRoster::rotate(
                Role::Hacker,
                seed.wrapping_add(3),
                config.modifiers.as_ref(),
            ),
            defender_roster: ActionRoster::rotate(
                Role::Defender,
                seed.wrapping_add(4),
                config.modifiers.as_ref(),
            ),
            state,
        }
    }

    /// Plays one round with both policies choosing.
    pub fn step(&mut self) {
        let hacker_action = self
            .hacker_policy
            .choose_action(&self.state, &self.hacker_roster)
            .expect("hacker policy must find an action");
        let defender_action = self
            .defender_policy
            .choose_action(&self.state, &self.defender_roster)
            .expect("defender policy must find an action");
        self.state = self
            .resolver
            .process_round(&self.state, &hacker_action, &defender_action)
            .expect("round must resolve");
    }

    /// Plays until terminal or the round cap, returning rounds played.
    pub fn run_to_completion(&mut self) -> u32 {
        let mut rounds = 0;
        while !self.state.is_terminal() && rounds < ROUND_CAP {
            self.step();
            rounds += 1;
        }
        rounds
    }
}

/// Looks up a hacker catalog action by id.
pub fn hacker_action(id: &str) -> Action {
    find_action(Role::Hacker, &ActionId::new(id)).expect("known hacker action")
}

/// Looks up a defender catalog action by id.
pub fn defender_action(id: &str) -> Action {
    find_action(Role::Defender, &ActionId::new(id)).expect("known defender action")
}

/// Asserts every bounded invariant over a state snapshot.
pub fn assert_state_invariants(state: &BattleState) {
    for (name, value) in [
        ("threat_level", state.threat_level),
        ("network_integrity", state.network_integrity),
        ("data_stolen", state.data_stolen),
        ("energy_hacker", state.energy_hacker),
        ("energy_defender", state.energy_defender),
    ] {
        assert!(
            (0.0..=100.0).contains(&value),
            "{name} out of range: {value}"
        );
    }
    assert!(state.hacker_momentum <= 5, "hacker momentum over cap");
    assert!(state.defender_momentum <= 5, "defender momentum over cap");
    assert!(state.last_hacker_actions.len() <= 2);
    assert!(state.last_defender_actions.len() <= 2);
    if state.game_over {
        assert!(state.winner.is_some(), "terminal state without winner");
    } else {
        assert!(state.winner.is_none(), "winner set before terminal");
    }
}
