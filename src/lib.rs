//! Hoardkeeper: a themed treasure-vault balance tracker
//!
//! Five preconfigured vaults, each an independent in-memory ledger with a
//! bounded transaction history, a procedurally generated coin pile that
//! grows with the balance, a synthesized coin clink on every commit, and
//! a Royal Treasurer commentary line fetched from a text-generation API
//! (with offline fallbacks). State is volatile; nothing survives exit.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod services;
pub mod ui;
