//! Session roster: the seeded rotation that picks which slice of the catalog
//! a battle is played with.
//!
//! Rotation runs once at session creation — 2 actions per category per role,
//! sampled from the 12-action catalog with a seeded RNG — and the result is
//! treated as fixed catalog data for the rest of the session. Challenge
//! modifiers are applied after sampling, so a banned category simply vanishes
//! from an otherwise normal roster.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{catalog_for, Action, ActionId, Category};
use crate::challenge::ChallengeModifiers;
use crate::state::Role;

/// Visible actions sampled per category.
pub const VISIBLE_PER_CATEGORY: usize = 2;

/// The fixed action subset one side plays with for a whole session.
///
/// `visible` is what the player/AI normally selects from; `full` is the
/// modifier-filtered complete catalog, used only by the AI's degraded
/// fallback and by input validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRoster {
    role: Role,
    visible: Vec<Action>,
    full: Vec<Action>,
}

impl ActionRoster {
    /// Samples a roster for `role` from its full catalog.
    ///
    /// Sampling is seeded: the same seed always yields the same roster. The
    /// visible set keeps catalog order (the policy's tie-break order) even
    /// though selection within each category is random.
    #[must_use]
    pub fn rotate(role: Role, seed: u64, modifiers: Option<&ChallengeModifiers>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let catalog = catalog_for(role);

        let mut chosen: BTreeSet<ActionId> = BTreeSet::new();
        for category in Category::ALL {
            let candidates: Vec<&Action> =
                catalog.iter().filter(|a| a.category == category).collect();
            for action in candidates.choose_multiple(&mut rng, VISIBLE_PER_CATEGORY) {
                chosen.insert(action.id.clone());
            }
        }

        let mut visible: Vec<Action> = catalog
            .iter()
            .filter(|a| chosen.contains(&a.id))
            .cloned()
            .collect();
        let mut full = catalog;

        if let Some(modifiers) = modifiers {
            visible = modifiers.filter_actions(&visible);
            full = modifiers.filter_actions(&full);
        }

        Self { role, visible, full }
    }

    /// The role this roster belongs to.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The visible action subset, in catalog order.
    #[must_use]
    pub fn visible(&self) -> &[Action] {
        &self.visible
    }

    /// The modifier-filtered full catalog, in catalog order.
    #[must_use]
    pub fn full(&self) -> &[Action] {
        &self.full
    }

    /// Finds a visible action by id.
    #[must_use]
    pub fn find(&self, id: &ActionId) -> Option<&Action> {
        self.visible.iter().find(|a| &a.id == id)
    }

    /// Visible actions usable with the given energy and cooldowns.
    #[must_use]
    pub fn available(
        &self,
        energy: f32,
        cooldowns: &std::collections::BTreeMap<ActionId, u8>,
    ) -> Vec<Action> {
        super::available_actions(&self.visible, energy, cooldowns)
    }

    /// Cheapest action in the full filtered catalog — the AI's degraded
    /// fallback. Ties go to the earlier catalog entry.
    #[must_use]
    pub fn cheapest(&self) -> Option<&Action> {
        self.full.iter().fold(None, |best: Option<&Action>, a| match best {
            Some(b) if b.energy_cost <= a.energy_cost => Some(b),
            _ => Some(a),
        })
    }
}
