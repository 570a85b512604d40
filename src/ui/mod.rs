//! Presentation layer
//!
//! The tiny-skia pile renderer and the ANSI terminal surface that
//! displays it alongside the ledger views.

pub mod renderer;
pub mod terminal;
