//! Structured logging with document context.
//!
//! Provides logging utilities that include doc_id and record_id in every
//! log message for easy correlation.

pub mod structured;

pub use structured::*;
