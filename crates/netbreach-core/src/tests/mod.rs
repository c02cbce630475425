//! Cross-module test suite.
//!
//! - `determinism.rs`: same seeds must reproduce whole battles bit for bit
//! - `integration.rs`: full battles through the resolver + policy together
//! - `properties.rs`: proptest coverage of the bounded-state invariants
//! - `helpers.rs`: session fixtures shared by the above

mod determinism;
mod helpers;
mod properties;
