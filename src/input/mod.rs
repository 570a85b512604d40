//! User input handling
//!
//! Translates raw terminal lines into typed commands for the controller.

pub mod command;
