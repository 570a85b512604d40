//! Static application configuration
//!
//! Seed data for the vault list. Runtime credentials (the commentary API
//! key) are read from the environment by the service that needs them.

pub mod vaults;
