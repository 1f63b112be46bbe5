//! Completion configuration module.
//!
//! This module defines which sigils open a mention and how many suggestions
//! a single lookup may return.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Mention completion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Sigil that opens a user mention
    pub user_sigil: char,

    /// Sigil that opens an instrument mention
    pub instrument_sigil: char,

    /// Maximum number of distinct suggestions per lookup
    pub suggestion_limit: usize,
}

impl CompletionConfig {
    /// The sigils recognised when extracting a token.
    pub fn sigils(&self) -> [char; 2] {
        [self.user_sigil, self.instrument_sigil]
    }

    /// Replaces the suggestion limit, rejecting values validation would.
    pub fn with_suggestion_limit(self, suggestion_limit: usize) -> ConfigResult<Self> {
        let config = Self {
            suggestion_limit,
            ..self
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            user_sigil: '@',
            instrument_sigil: '#',
            suggestion_limit: 10,
        }
    }
}

impl Validate for CompletionConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (key, sigil) in [
            ("user_sigil", self.user_sigil),
            ("instrument_sigil", self.instrument_sigil),
        ] {
            if sigil.is_whitespace() || sigil.is_alphanumeric() {
                return Err(ConfigError::InvalidSigil { key, sigil });
            }
        }

        if self.user_sigil == self.instrument_sigil {
            return Err(ConfigError::DuplicateSigil(self.user_sigil));
        }

        if self.suggestion_limit == 0 {
            return Err(ConfigError::ZeroSuggestionLimit);
        }

        Ok(())
    }
}
