//! AI personality profiles.
//!
//! A personality is picked once per session and held fixed as an explicit
//! field on the policy — never module-level state — so concurrent sessions
//! and tests each get their own.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The three fixed opponent temperaments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Chases high-damage plays, loose with energy.
    Aggressive,
    /// Prioritizes counters, hoards energy.
    Defensive,
    /// No preference skew.
    Balanced,
}

/// Multiplier knobs for a personality. Values above 1.0 amplify a preference,
/// below 1.0 dampen it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Applied to actions whose average impact clears the high-damage bar.
    pub high_damage_bonus: f32,
    /// Applied to energy-expensive actions.
    pub energy_conservation: f32,
    /// Applied to counter-type actions.
    pub counter_bonus: f32,
}

impl Personality {
    /// All personalities, pick order for [`Personality::roll`].
    pub const ALL: [Personality; 3] = [
        Personality::Aggressive,
        Personality::Defensive,
        Personality::Balanced,
    ];

    /// Picks a personality uniformly at random.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).expect("personality list is non-empty")
    }

    /// The multiplier profile for this personality.
    #[must_use]
    pub const fn profile(self) -> PersonalityProfile {
        match self {
            Personality::Aggressive => PersonalityProfile {
                high_damage_bonus: 1.4,
                energy_conservation: 0.8,
                counter_bonus: 1.0,
            },
            Personality::Defensive => PersonalityProfile {
                high_damage_bonus: 0.9,
                energy_conservation: 1.4,
                counter_bonus: 1.5,
            },
            Personality::Balanced => PersonalityProfile {
                high_damage_bonus: 1.0,
                energy_conservation: 1.0,
                counter_bonus: 1.0,
            },
        }
    }
}
