//! Combo table: directed (previous action → current action) pairs that grant
//! a success-chance and magnitude bonus when played on consecutive rounds by
//! the same side.
//!
//! Lookback depth is exactly 1: only the immediately preceding action
//! matters. Lookups are NOT symmetric — `ddos -> bruteforce` is "Network
//! Assault" while `bruteforce -> ddos` is a different combo ("Brute Flood")
//! that exists only because it is listed explicitly.

use serde::Serialize;

use super::ActionId;

/// A named combo bonus. The flat `bonus` is added to the sampled impact
/// magnitude; the success-chance bonus is a fixed engine constant and does not
/// vary per combo.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Combo {
    /// Display name of the combo.
    pub name: &'static str,
    /// Flat magnitude bonus applied on top of the sampled impact.
    pub bonus: f32,
}

/// Directed combo table. One row per (from, to) pair.
const COMBO_TABLE: &[(&str, &str, &str, f32)] = &[
    // Hacker chains
    ("phishing", "socialeng", "Social Chain", 15.0),
    ("socialeng", "phishing", "Social Chain", 15.0),
    ("ddos", "bruteforce", "Network Assault", 18.0),
    ("bruteforce", "ddos", "Brute Flood", 14.0),
    ("malware", "zeroday", "Exploit Chain", 20.0),
    ("zeroday", "malware", "Zero Infection", 16.0),
    ("phishing", "malware", "Trojan Horse", 14.0),
    ("socialeng", "bruteforce", "Inside Job", 15.0),
    ("portscan", "bruteforce", "Mapped Assault", 12.0),
    ("mitm", "phishing", "Spoofed Sender", 13.0),
    ("baiting", "malware", "Poisoned Bait", 14.0),
    ("sqlinject", "ransomware", "Data Hostage", 16.0),
    ("socialeng", "insider", "Groomed Asset", 17.0),
    // Defender chains
    ("firewall", "monitoring", "Fortified Watch", 15.0),
    ("monitoring", "firewall", "Alert Defense", 14.0),
    ("training", "antivirus", "Aware Defense", 15.0),
    ("antivirus", "training", "Tech Training", 13.0),
    ("patch", "backup", "Secure Foundation", 18.0),
    ("backup", "patch", "Recovery Ready", 14.0),
    ("firewall", "antivirus", "Full Shield", 15.0),
    ("monitoring", "patch", "Vigilant Update", 13.0),
    ("segmentation", "firewall", "Defense in Depth", 16.0),
    ("honeypot", "monitoring", "Sticky Trap", 14.0),
    ("drill", "training", "Culture of Caution", 13.0),
    ("sandbox", "patch", "Analyzed and Patched", 15.0),
];

/// Looks up the combo formed by playing `current` immediately after
/// `previous`. Returns `None` when the ordered pair is not in the table.
#[must_use]
pub fn synergy_between(previous: &ActionId, current: &ActionId) -> Option<Combo> {
    COMBO_TABLE
        .iter()
        .find(|(from, to, _, _)| *from == previous.as_str() && *to == current.as_str())
        .map(|&(_, _, name, bonus)| Combo { name, bonus })
}

/// Convenience wrapper over a side's recent-action history: checks the last
/// entry (lookback depth 1) against `current`.
#[must_use]
pub fn synergy_with_history(history: &[ActionId], current: &ActionId) -> Option<Combo> {
    history.last().and_then(|prev| synergy_between(prev, current))
}
