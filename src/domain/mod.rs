//! Pure domain logic
//!
//! Types and algorithms with no I/O: colors, vault ledgers, and the
//! procedural coin-pile generator.

pub mod core;
pub mod pile;
pub mod vault;
