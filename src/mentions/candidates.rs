// Copyright (c) 2025 Portal Mentions Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Candidate records and their mapping onto search keys.
//!
//! Users are discoverable by username, first name and last name; instruments
//! by their name and their telescope's nickname. Bot accounts never appear
//! in user suggestions.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data_structures::prefix_matcher::{IndexedRecord, PrefixMatcher};
use crate::error::{MentionsError, MentionsResult};

/// A portal user as delivered by the user listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, also the user's identity in suggestions
    pub username: String,

    /// Given name, if the user filled it in
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name, if the user filled it in
    #[serde(default)]
    pub last_name: Option<String>,

    /// Whether the account is a service bot
    #[serde(default)]
    pub is_bot: bool,
}

/// Display attributes carried alongside a matched username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Given name, empty when unknown
    pub first_name: String,

    /// Family name, empty when unknown
    pub last_name: String,
}

impl Display for UserPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => write!(f, "{} {}", self.first_name, self.last_name),
            (false, true) => f.write_str(&self.first_name),
            (true, false) => f.write_str(&self.last_name),
            (true, true) => Ok(()),
        }
    }
}

/// The telescope an instrument is mounted on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telescope {
    /// Short name, e.g. `P48`
    #[serde(default)]
    pub nickname: String,
}

/// An instrument as delivered by the instrument listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument name, also its identity in suggestions
    pub name: String,

    /// Hosting telescope, when known
    #[serde(default)]
    pub telescope: Option<Telescope>,
}

/// Display attributes carried alongside a matched instrument name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentPayload {
    /// Telescope nickname, empty when unknown
    pub telescope: String,
}

impl Display for InstrumentPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.telescope)
    }
}

/// Maps a user onto its search keys.
///
/// Returns `None` for bots and for users without a username.
pub fn user_record(user: &User) -> Option<IndexedRecord<UserPayload>> {
    if user.is_bot || user.username.is_empty() {
        return None;
    }

    let first_name = user.first_name.clone().unwrap_or_default();
    let last_name = user.last_name.clone().unwrap_or_default();

    let keys = [user.username.as_str(), first_name.as_str(), last_name.as_str()]
        .into_iter()
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    Some(
        IndexedRecord::new(
            user.username.clone(),
            UserPayload {
                first_name,
                last_name,
            },
        )
        .with_keys(keys),
    )
}

/// Maps an instrument onto its search keys.
///
/// Returns `None` for instruments without a name.
pub fn instrument_record(instrument: &Instrument) -> Option<IndexedRecord<InstrumentPayload>> {
    if instrument.name.is_empty() {
        return None;
    }

    let telescope = instrument
        .telescope
        .as_ref()
        .map(|telescope| telescope.nickname.clone())
        .unwrap_or_default();

    let mut record = IndexedRecord::new(
        instrument.name.clone(),
        InstrumentPayload {
            telescope: telescope.clone(),
        },
    )
    .with_key(instrument.name.clone());

    if !telescope.is_empty() {
        record = record.with_key(telescope);
    }

    Some(record)
}

/// Builds a fresh matcher over the given users, bots excluded.
pub fn index_users(users: &[User]) -> PrefixMatcher<UserPayload> {
    let matcher = PrefixMatcher::from_candidates(users, user_record);
    debug!(
        candidates = users.len(),
        keys = matcher.key_count(),
        "Indexed users for mention completion"
    );
    matcher
}

/// Builds a fresh matcher over the given instruments.
pub fn index_instruments(instruments: &[Instrument]) -> PrefixMatcher<InstrumentPayload> {
    let matcher = PrefixMatcher::from_candidates(instruments, instrument_record);
    debug!(
        candidates = instruments.len(),
        keys = matcher.key_count(),
        "Indexed instruments for mention completion"
    );
    matcher
}

/// Reads a JSON array of candidates from `path`.
///
/// # Arguments
///
/// * `path` - File containing a JSON array of users or instruments
///
/// # Returns
///
/// * `Ok(Vec<T>)` with the decoded candidates
/// * `Err(MentionsError::CandidateRead)` if the file cannot be read
/// * `Err(MentionsError::CandidateFormat)` if it is not a JSON array of `T`
pub fn load_candidates<T, P>(path: P) -> MentionsResult<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|source| MentionsError::CandidateRead {
            path: path.to_path_buf(),
            source,
        })?;
    let candidates: Vec<T> =
        serde_json::from_str(&contents).map_err(|source| MentionsError::CandidateFormat {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), count = candidates.len(), "Loaded candidates");
    Ok(candidates)
}
