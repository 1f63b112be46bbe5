//! Configuration error module.
//!
//! Failures while locating, parsing and validating `MentionsConfig`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file passed on the command line does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension is not one of toml, json, yaml or yml.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A source could not be parsed or deserialized.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A sigil that could never be told apart from ordinary text.
    #[error("{key} = {sigil:?} cannot open a mention")]
    InvalidSigil {
        /// Which sigil setting is invalid
        key: &'static str,
        /// The rejected character
        sigil: char,
    },

    /// Both mention kinds share one sigil.
    #[error("user_sigil and instrument_sigil must differ, both are {0:?}")]
    DuplicateSigil(char),

    #[error("suggestion_limit must be greater than 0")]
    ZeroSuggestionLimit,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
