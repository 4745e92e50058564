//! nudge - suggestion vetting and ranking
//!
//! Candidates are gathered per category from a catalog, filtered by an
//! eligibility chain with a persistent appear/dismiss state machine,
//! deduplicated in category order and ranked from their interaction history.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod storage;
pub mod suggestions;
pub mod test_utils;

pub use error::{NudgeError, Result};
