//! Error module for portal mentions.
//!
//! The prefix matcher and the token helpers never fail: an empty match set is
//! a normal outcome. Errors arise only at the edges, when loading
//! configuration or reading candidate files.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod config;

/// Result type alias used throughout the crate.
pub type MentionsResult<T> = Result<T, MentionsError>;

/// Core error enum.
#[derive(Error, Debug)]
pub enum MentionsError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A candidate file could not be read.
    #[error("Cannot read candidates from {path}: {source}")]
    CandidateRead {
        /// The candidate file
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// A candidate file is not a JSON array of the expected records.
    #[error("Malformed candidate list in {path}: {source}")]
    CandidateFormat {
        /// The candidate file
        path: PathBuf,
        /// Underlying decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// IO errors outside candidate loading, e.g. writing a generated config.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl MentionsError {
    /// The candidate file involved, if this is a candidate loading error.
    pub fn candidate_path(&self) -> Option<&Path> {
        match self {
            Self::CandidateRead { path, .. } | Self::CandidateFormat { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}
