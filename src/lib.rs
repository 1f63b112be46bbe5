//! Portal Mentions Library
//!
//! This library powers `@user` and `#instrument` completion in the comment
//! boxes of an astronomical-alert portal. Candidate users and instruments are
//! indexed into a case-insensitive prefix trie; the text being typed is
//! scanned for a mention token at the cursor; matching candidates are offered
//! as suggestions and the chosen one is spliced back into the text.
//!
//! # Architecture
//!
//! - [`data_structures::prefix_matcher`]: the generic trie
//! - [`mentions`]: candidate adapters, token handling, composer state
//! - [`config`] and [`error`]: configuration loading and error types

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod mentions;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
