//! XML layer for the updateinfo dialect.
//!
//! `dump` renders the in-memory model to the canonical document form,
//! byte-exact down to attribute order and self-closing conventions.
//! `parse` reads a document back, tolerating unknown markup with warnings.

pub mod dump;
pub mod parse;

pub use dump::*;
pub use parse::*;
