//! Data structures for mention completion.
//!
//! This module contains the in-memory indexes behind mention completion.
//! They perform no I/O and hold no locks; owners rebuild them when their
//! input changes.

pub mod prefix_matcher;

// Re-export common data structures
pub use prefix_matcher::{IndexedRecord, Matches, PrefixMatcher};
