//! Opponent pattern prediction.
//!
//! Reads the opponent's last two action categories: a repeat predicts a
//! switch to one of the two other categories (picked at random — the
//! prediction itself is intentionally probabilistic), while a change predicts
//! the most recent category again. With fewer than two observed actions there
//! is no prediction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{find_action, ActionId, Category};
use crate::state::Role;

/// Predicts the opponent's next action category from their recent history.
///
/// `history` is newest-last, as kept by the battle state; `role` identifies
/// whose catalog the ids resolve against. Returns `None` when fewer than two
/// categories can be resolved.
pub fn predict_next_category<R: Rng>(
    history: &[ActionId],
    role: Role,
    rng: &mut R,
) -> Option<Category> {
    let categories: Vec<Category> = history
        .iter()
        .filter_map(|id| find_action(role, id).map(|a| a.category))
        .collect();
    if categories.len() < 2 {
        return None;
    }

    let older = categories[categories.len() - 2];
    let newest = categories[categories.len() - 1];

    if older == newest {
        // Two in a row: expect a switch to one of the other categories.
        let others: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|&c| c != newest)
            .collect();
        others.choose(rng).copied()
    } else {
        // A change: expect the newest category to repeat.
        Some(newest)
    }
}
