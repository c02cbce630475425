//! Action catalog: the immutable data tables both the resolver and the AI
//! policy select from.
//!
//! Each role (hacker / defender) has a fixed catalog of 12 actions, 4 per
//! [`Category`]. A session never sees the full catalog — a seeded rotation
//! ([`roster::ActionRoster`]) samples 2 actions per category at session
//! creation and holds that subset fixed for the whole battle.
//!
//! # Counter cycle
//!
//! Categories counter each other in a fixed 3-cycle, applied symmetrically to
//! both sides:
//!
//! ```text
//! Network ── counters ──> Software ── counters ──> Human ── counters ──> Network
//! ```
//!
//! An action is countered when the opponent's most recent action's category
//! counters its own category. The resolver turns that into a flat success
//! penalty; the policy uses the same relation for prediction bonuses.
//!
//! There is no behavioral polymorphism here — actions are plain data, and
//! everything beyond lookup/filtering lives in `resolver` and `policy`.

pub mod combos;
pub mod roster;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Role;

// =============================================================================
// Identifiers and categories
// =============================================================================

/// Stable string identifier for an action.
///
/// Ids are unique across *both* role catalogs, so a single map keyed by
/// `ActionId` can hold per-action statistics for a whole battle.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Creates an action id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionId({})", self.0)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Attack/defense surface an action targets. Every action belongs to exactly
/// one category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Traffic-level attacks and perimeter defenses.
    Network,
    /// Social engineering and the people countering it.
    Human,
    /// Malicious code and the software hygiene against it.
    Software,
}

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; 3] = [Category::Network, Category::Human, Category::Software];

    /// The category this one counters (the 3-cycle).
    #[must_use]
    pub const fn counters(self) -> Category {
        match self {
            Category::Network => Category::Software,
            Category::Human => Category::Network,
            Category::Software => Category::Human,
        }
    }

    /// Whether an action of this category is countered by an opposing action
    /// of `opponent` category.
    #[must_use]
    pub const fn is_countered_by(self, opponent: Category) -> bool {
        matches!(
            (opponent, self),
            (Category::Network, Category::Software)
                | (Category::Human, Category::Network)
                | (Category::Software, Category::Human)
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "Network"),
            Self::Human => write!(f, "Human"),
            Self::Software => write!(f, "Software"),
        }
    }
}

bitflags::bitflags! {
    /// Set of categories, used by challenge modifiers to ban whole surfaces.
    ///
    /// Serde impls come from the bitflags `serde` feature (text format).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct CategorySet: u8 {
        /// Network-category actions.
        const NETWORK = 1 << 0;
        /// Human-category actions.
        const HUMAN = 1 << 1;
        /// Software-category actions.
        const SOFTWARE = 1 << 2;
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        match category {
            Category::Network => CategorySet::NETWORK,
            Category::Human => CategorySet::HUMAN,
            Category::Software => CategorySet::SOFTWARE,
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// A single selectable action. Immutable catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique stable identifier.
    pub id: ActionId,
    /// Display name.
    pub name: String,
    /// The one category this action belongs to.
    pub category: Category,
    /// Pre-modifier success probability, percent.
    pub base_chance: f32,
    /// Energy paid by the acting side on any attempt, success or not.
    pub energy_cost: f32,
    /// Inclusive bounds for the uniformly sampled magnitude on success.
    pub impact_range: (f32, f32),
    /// Threat moved on success: hackers add it, defenders subtract it.
    pub threat_impact: f32,
    /// Rounds the action locks out after a *successful* use.
    pub cooldown: u8,
}

impl Action {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &str,
        name: &str,
        category: Category,
        base_chance: f32,
        energy_cost: f32,
        impact_range: (f32, f32),
        threat_impact: f32,
        cooldown: u8,
    ) -> Self {
        Self {
            id: ActionId::new(id),
            name: name.to_owned(),
            category,
            base_chance,
            energy_cost,
            impact_range,
            threat_impact,
            cooldown,
        }
    }

    /// Midpoint of the impact range — the policy's "average impact".
    #[must_use]
    pub fn avg_impact(&self) -> f32 {
        (self.impact_range.0 + self.impact_range.1) / 2.0
    }

    /// Usable right now: affordable and off cooldown.
    #[must_use]
    pub fn is_available(&self, energy: f32, cooldowns: &BTreeMap<ActionId, u8>) -> bool {
        let on_cooldown = cooldowns.get(&self.id).copied().unwrap_or(0) > 0;
        energy >= self.energy_cost && !on_cooldown
    }

    /// Structural validation; catches hand-built actions that never came from
    /// the catalog.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.id.as_str().is_empty() {
            return Err("empty id".to_owned());
        }
        if self.name.is_empty() {
            return Err("empty name".to_owned());
        }
        if self.impact_range.0 > self.impact_range.1 {
            return Err("inverted impact range".to_owned());
        }
        if self.energy_cost < 0.0 {
            return Err("negative energy cost".to_owned());
        }
        Ok(())
    }
}

// =============================================================================
// Catalogs
// =============================================================================

/// Full hacker catalog: 12 actions, 4 per category, catalog order is the
/// policy's tie-break order.
#[must_use]
pub fn hacker_catalog() -> Vec<Action> {
    use Category::{Human, Network, Software};
    vec![
        Action::new("ddos", "DDoS Attack", Network, 65.0, 10.0, (8.0, 14.0), 8.0, 0),
        Action::new("phishing", "Phishing", Human, 70.0, 12.0, (10.0, 16.0), 10.0, 0),
        Action::new("malware", "Deploy Malware", Software, 60.0, 15.0, (12.0, 20.0), 12.0, 1),
        Action::new("socialeng", "Social Engineering", Human, 65.0, 14.0, (11.0, 17.0), 11.0, 0),
        Action::new("bruteforce", "Brute Force", Network, 50.0, 18.0, (15.0, 24.0), 15.0, 2),
        Action::new("zeroday", "Zero-Day Exploit", Software, 40.0, 25.0, (20.0, 32.0), 20.0, 3),
        Action::new("portscan", "Port Scan", Network, 75.0, 8.0, (5.0, 10.0), 6.0, 0),
        Action::new("mitm", "Man-in-the-Middle", Network, 60.0, 14.0, (10.0, 16.0), 10.0, 1),
        Action::new("baiting", "Baiting", Human, 62.0, 10.0, (8.0, 13.0), 8.0, 0),
        Action::new("insider", "Insider Threat", Human, 45.0, 20.0, (16.0, 26.0), 16.0, 2),
        Action::new("sqlinject", "SQL Injection", Software, 65.0, 12.0, (10.0, 16.0), 10.0, 1),
        Action::new("ransomware", "Ransomware", Software, 50.0, 20.0, (16.0, 25.0), 16.0, 2),
    ]
}

/// Full defender catalog: 12 actions, 4 per category.
#[must_use]
pub fn defender_catalog() -> Vec<Action> {
    use Category::{Human, Network, Software};
    vec![
        Action::new("firewall", "Deploy Firewall", Network, 75.0, 12.0, (8.0, 14.0), 10.0, 0),
        Action::new("training", "Security Training", Human, 70.0, 10.0, (6.0, 12.0), 8.0, 0),
        Action::new("antivirus", "Update Antivirus", Software, 72.0, 13.0, (10.0, 16.0), 12.0, 1),
        Action::new("monitoring", "Network Monitoring", Network, 68.0, 8.0, (5.0, 10.0), 6.0, 0),
        Action::new("patch", "Patch Systems", Software, 75.0, 15.0, (12.0, 18.0), 15.0, 2),
        Action::new("backup", "Backup Data", Software, 80.0, 12.0, (8.0, 14.0), 10.0, 1),
        Action::new("segmentation", "Network Segmentation", Network, 65.0, 16.0, (12.0, 18.0), 13.0, 2),
        Action::new("honeypot", "Honeypot", Network, 55.0, 14.0, (11.0, 18.0), 12.0, 1),
        Action::new("drill", "Phishing Drill", Human, 72.0, 9.0, (6.0, 11.0), 7.0, 0),
        Action::new("audit", "Security Audit", Human, 60.0, 17.0, (13.0, 20.0), 14.0, 2),
        Action::new("leastpriv", "Least Privilege", Human, 66.0, 13.0, (9.0, 15.0), 10.0, 1),
        Action::new("sandbox", "Sandbox Analysis", Software, 58.0, 18.0, (14.0, 22.0), 15.0, 2),
    ]
}

/// Full catalog for a role.
#[must_use]
pub fn catalog_for(role: Role) -> Vec<Action> {
    match role {
        Role::Hacker => hacker_catalog(),
        Role::Defender => defender_catalog(),
    }
}

/// Looks up a single action by id within a role's catalog.
#[must_use]
pub fn find_action(role: Role, id: &ActionId) -> Option<Action> {
    catalog_for(role).into_iter().find(|a| &a.id == id)
}

/// Filters a role's catalog down to actions usable with the given energy and
/// cooldowns, preserving catalog order.
#[must_use]
pub fn available_actions(
    actions: &[Action],
    energy: f32,
    cooldowns: &BTreeMap<ActionId, u8>,
) -> Vec<Action> {
    actions
        .iter()
        .filter(|a| a.is_available(energy, cooldowns))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_by_category(actions: &[Action], category: Category) -> usize {
        actions.iter().filter(|a| a.category == category).count()
    }

    #[test]
    fn catalogs_have_four_actions_per_category() {
        for catalog in [hacker_catalog(), defender_catalog()] {
            assert_eq!(catalog.len(), 12);
            for category in Category::ALL {
                assert_eq!(count_by_category(&catalog, category), 4);
            }
        }
    }

    #[test]
    fn action_ids_are_unique_across_both_catalogs() {
        let mut seen = std::collections::BTreeSet::new();
        for action in hacker_catalog().into_iter().chain(defender_catalog()) {
            assert!(seen.insert(action.id.clone()), "duplicate id {}", action.id);
        }
    }

    #[test]
    fn every_catalog_entry_passes_validation() {
        for action in hacker_catalog().into_iter().chain(defender_catalog()) {
            assert_eq!(action.validate(), Ok(()));
        }
    }

    #[test]
    fn counter_cycle_covers_each_category_once() {
        assert_eq!(Category::Network.counters(), Category::Software);
        assert_eq!(Category::Human.counters(), Category::Network);
        assert_eq!(Category::Software.counters(), Category::Human);

        // Each category counters exactly one and is countered by exactly one.
        for category in Category::ALL {
            let countered_by: Vec<_> = Category::ALL
                .iter()
                .filter(|&&c| category.is_countered_by(c))
                .collect();
            assert_eq!(countered_by.len(), 1);
            assert!(!category.is_countered_by(category));
        }
    }

    #[test]
    fn availability_requires_energy_and_no_cooldown() {
        let catalog = hacker_catalog();
        let action = &catalog[0]; // ddos, cost 10
        let mut cooldowns = BTreeMap::new();

        assert!(action.is_available(10.0, &cooldowns));
        assert!(!action.is_available(9.9, &cooldowns));

        cooldowns.insert(action.id.clone(), 1);
        assert!(!action.is_available(100.0, &cooldowns));

        cooldowns.insert(action.id.clone(), 0);
        assert!(action.is_available(100.0, &cooldowns));
    }

    #[test]
    fn find_action_respects_role_boundaries() {
        let firewall = ActionId::new("firewall");
        assert!(find_action(Role::Defender, &firewall).is_some());
        assert!(find_action(Role::Hacker, &firewall).is_none());
    }

    #[test]
    fn avg_impact_is_range_midpoint() {
        let action = find_action(Role::Hacker, &ActionId::new("zeroday")).unwrap();
        assert!((action.avg_impact() - 26.0).abs() < f32::EPSILON);
    }
}
