// Copyright (c) 2025 Portal Mentions Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Comment composer state for mention completion.
//!
//! [`MentionComposer`] owns one matcher per sigil. Each matcher is built
//! once from its candidate list and queried on every keystroke; replacing
//! the candidate list rebuilds it from scratch.

use std::fmt::{self, Display, Formatter};

use tracing::trace;

use super::candidates::{
    index_instruments, index_users, Instrument, InstrumentPayload, User, UserPayload,
};
use super::token::{extract_token, splice, MentionToken};
use crate::config::CompletionConfig;
use crate::data_structures::prefix_matcher::{Matches, PrefixMatcher};

/// One entry of the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion<V> {
    /// Sigil the suggestion completes
    pub sigil: char,

    /// Identity spliced into the text when chosen
    pub identity: String,

    /// Display payload
    pub payload: V,
}

impl<V: Display> Display for Suggestion<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sigil, self.identity)?;
        let detail = self.payload.to_string();
        if !detail.is_empty() {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Suggestions produced for the token at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComposerSuggestions {
    /// No mention token is active, or nothing matched
    #[default]
    Empty,

    /// Users matching an `@` token
    Users(Vec<Suggestion<UserPayload>>),

    /// Instruments matching a `#` token
    Instruments(Vec<Suggestion<InstrumentPayload>>),
}

impl ComposerSuggestions {
    /// Number of suggestions.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Users(users) => users.len(),
            Self::Instruments(instruments) => instruments.len(),
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identities in display order.
    pub fn identities(&self) -> Vec<&str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Users(users) => users.iter().map(|s| s.identity.as_str()).collect(),
            Self::Instruments(instruments) => {
                instruments.iter().map(|s| s.identity.as_str()).collect()
            }
        }
    }

    /// Rendered dropdown lines, e.g. `@alice (Alice Smith)`.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Empty => Vec::new(),
            Self::Users(users) => users.iter().map(ToString::to_string).collect(),
            Self::Instruments(instruments) => instruments.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Mention completion state for a single comment box.
#[derive(Debug, Clone)]
pub struct MentionComposer {
    config: CompletionConfig,
    users: PrefixMatcher<UserPayload>,
    instruments: PrefixMatcher<InstrumentPayload>,
}

impl MentionComposer {
    /// Creates a composer with no candidates.
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            config,
            users: PrefixMatcher::new(),
            instruments: PrefixMatcher::new(),
        }
    }

    /// Returns the completion configuration in use.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Replaces the user candidates, rebuilding the user index.
    pub fn set_users(&mut self, users: &[User]) {
        self.users = index_users(users);
    }

    /// Replaces the instrument candidates, rebuilding the instrument index.
    pub fn set_instruments(&mut self, instruments: &[Instrument]) {
        self.instruments = index_instruments(instruments);
    }

    /// Returns the mention token ending at `cursor`, if one is active.
    pub fn active_token(&self, text: &str, cursor: usize) -> Option<MentionToken> {
        extract_token(text, cursor, &self.config.sigils())
    }

    /// Suggestions for the token at `cursor`, sorted by identity.
    ///
    /// Nothing is suggested until at least one character follows the sigil.
    pub fn suggest(&self, text: &str, cursor: usize) -> ComposerSuggestions {
        let token = match self.active_token(text, cursor) {
            Some(token) if !token.query.is_empty() => token,
            _ => return ComposerSuggestions::Empty,
        };

        let limit = Some(self.config.suggestion_limit);
        let suggestions = if token.sigil == self.config.user_sigil {
            let matches = self.users.find_all_starting_with(&token.query, limit);
            ComposerSuggestions::Users(sorted(token.sigil, matches))
        } else {
            let matches = self.instruments.find_all_starting_with(&token.query, limit);
            ComposerSuggestions::Instruments(sorted(token.sigil, matches))
        };

        trace!(
            sigil = %token.sigil,
            query = %token.query,
            count = suggestions.len(),
            "Computed mention suggestions"
        );

        if suggestions.is_empty() {
            ComposerSuggestions::Empty
        } else {
            suggestions
        }
    }

    /// Splices `identity` over the token at `cursor`.
    ///
    /// # Returns
    ///
    /// The new text and cursor, or `None` when no token is active.
    pub fn accept(&self, text: &str, cursor: usize, identity: &str) -> Option<(String, usize)> {
        let token = self.active_token(text, cursor)?;
        Some(splice(text, &token, identity))
    }
}

impl Default for MentionComposer {
    fn default() -> Self {
        Self::new(CompletionConfig::default())
    }
}

fn sorted<V>(sigil: char, matches: Matches<V>) -> Vec<Suggestion<V>> {
    let mut suggestions: Vec<_> = matches
        .into_iter()
        .map(|(identity, payload)| Suggestion {
            sigil,
            identity,
            payload,
        })
        .collect();
    suggestions.sort_by(|a, b| a.identity.cmp(&b.identity));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentions::candidates::Telescope;

    fn users() -> Vec<User> {
        vec![
            User {
                username: "alice".to_string(),
                first_name: Some("Alice".to_string()),
                last_name: Some("Smith".to_string()),
                is_bot: false,
            },
            User {
                username: "albert".to_string(),
                first_name: Some("Al".to_string()),
                last_name: Some("Jones".to_string()),
                is_bot: false,
            },
            User {
                username: "alert-bot".to_string(),
                first_name: None,
                last_name: None,
                is_bot: true,
            },
        ]
    }

    fn instruments() -> Vec<Instrument> {
        vec![Instrument {
            name: "ZTF".to_string(),
            telescope: Some(Telescope {
                nickname: "P48".to_string(),
            }),
        }]
    }

    fn composer() -> MentionComposer {
        let mut composer = MentionComposer::default();
        composer.set_users(&users());
        composer.set_instruments(&instruments());
        composer
    }

    #[test]
    fn test_user_suggestions_sorted() {
        let composer = composer();
        let suggestions = composer.suggest("hi @al", 6);
        assert_eq!(suggestions.identities(), vec!["albert", "alice"]);
        assert_eq!(
            suggestions.lines(),
            vec!["@albert (Al Jones)", "@alice (Alice Smith)"]
        );
    }

    #[test]
    fn test_instrument_suggestions() {
        let composer = composer();
        let suggestions = composer.suggest("observed with #p4", 17);
        assert_eq!(suggestions.lines(), vec!["#ZTF (P48)"]);
    }

    #[test]
    fn test_no_suggestions_without_query() {
        let composer = composer();
        assert!(composer.suggest("hi @", 4).is_empty());
        assert!(composer.suggest("hi al", 5).is_empty());
        assert_eq!(composer.suggest("@zz", 3), ComposerSuggestions::Empty);
    }

    #[test]
    fn test_limit_from_config() {
        let mut composer = MentionComposer::new(CompletionConfig {
            suggestion_limit: 1,
            ..CompletionConfig::default()
        });
        composer.set_users(&users());
        assert_eq!(composer.suggest("@al", 3).len(), 1);
    }

    #[test]
    fn test_set_users_replaces_candidates() {
        let mut composer = composer();
        composer.set_users(&[User {
            username: "bob".to_string(),
            first_name: None,
            last_name: None,
            is_bot: false,
        }]);
        assert!(composer.suggest("@al", 3).is_empty());
        assert_eq!(composer.suggest("@b", 2).identities(), vec!["bob"]);
    }

    #[test]
    fn test_custom_sigils() {
        let mut composer = MentionComposer::new(CompletionConfig {
            user_sigil: '+',
            instrument_sigil: '!',
            ..CompletionConfig::default()
        });
        composer.set_users(&users());
        composer.set_instruments(&instruments());

        assert!(composer.suggest("@al", 3).is_empty());
        assert_eq!(composer.suggest("+ali", 4).identities(), vec!["alice"]);
        assert_eq!(composer.suggest("!zt", 3).identities(), vec!["ZTF"]);
    }

    #[test]
    fn test_accept_splices_identity() {
        let composer = composer();
        let (text, cursor) = composer.accept("thanks @ali for", 11, "alice").unwrap();
        assert_eq!(text, "thanks @alice for");
        assert_eq!(cursor, 14);
        assert!(composer.accept("no token", 8, "alice").is_none());
    }
}
