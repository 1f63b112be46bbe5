//! Mention completion for comment composers.
//!
//! Glue between free text and the prefix matcher: candidate adapters turn
//! users and instruments into indexed records, the token helpers find the
//! mention being typed, and [`MentionComposer`] ties both together.

pub mod candidates;
pub mod composer;
pub mod token;

pub use candidates::{Instrument, InstrumentPayload, Telescope, User, UserPayload};
pub use composer::{ComposerSuggestions, MentionComposer, Suggestion};
pub use token::{extract_token, splice, MentionToken};
