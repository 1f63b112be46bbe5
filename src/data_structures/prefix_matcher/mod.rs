//! Prefix Matcher Implementation
//!
//! This module provides a trie indexing arbitrary records under one or more
//! search keys, answering "every record with a key starting with this prefix"
//! queries. It backs `@user` and `#instrument` mention completion, where the
//! same record (a user, say) is discoverable by username, first name and
//! last name but must be suggested only once.
//!
//! Matching is case-insensitive: keys and prefixes are lower-cased one char
//! at a time, so a prefix always folds exactly like the start of its key.
//! Payloads keep their original casing.
//!
//! # Example
//!
//! ```
//! use portal_mentions_lib::data_structures::prefix_matcher::{IndexedRecord, PrefixMatcher};
//!
//! let mut matcher = PrefixMatcher::new();
//! matcher.insert(IndexedRecord::new("alice", "Alice Smith").with_keys(["alice", "Alice", "Smith"]));
//! matcher.insert(IndexedRecord::new("albert", "Al Jones").with_keys(["albert", "Al", "Jones"]));
//!
//! assert_eq!(matcher.find_all_starting_with("AL", None).len(), 2);
//! assert_eq!(matcher.find_all_starting_with("smi", None)["alice"], "Alice Smith");
//! assert!(matcher.find_all_starting_with("zz", None).is_empty());
//! assert_eq!(matcher.find_all_starting_with("al", Some(1)).len(), 1);
//! ```

mod node;
mod record;

use fnv::FnvHashMap;
use tracing::trace;

use node::TrieNode;
pub use record::IndexedRecord;

/// Identity → payload map returned by prefix queries.
pub type Matches<V> = FnvHashMap<String, V>;

/// A case-insensitive prefix trie over [`IndexedRecord`]s.
///
/// The matcher is built once from a candidate list and then queried many
/// times; it is never re-indexed incrementally. Owners replace it wholesale
/// when their candidate list changes.
///
/// Queries take `&self`, so a finished matcher can be shared behind an `Arc`
/// and read from several threads. Mutation needs `&mut self`.
#[derive(Debug, Clone)]
pub struct PrefixMatcher<V> {
    /// The root node of the trie
    root: TrieNode<V>,
}

impl<V: Clone> PrefixMatcher<V> {
    /// Creates a new empty `PrefixMatcher`.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Builds a matcher from ready-made records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IndexedRecord<V>>,
    {
        let mut matcher = Self::new();
        matcher.extend(records);
        matcher
    }

    /// Builds a matcher from arbitrary candidates and a mapping function.
    ///
    /// `to_record` decides which fields of a candidate become search keys.
    /// Returning `None` leaves the candidate out of the index entirely.
    ///
    /// # Arguments
    ///
    /// * `candidates` - The candidate list to index.
    /// * `to_record` - Maps one candidate to its record, or `None` to skip it.
    pub fn from_candidates<I, F>(candidates: I, to_record: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Option<IndexedRecord<V>>,
    {
        Self::from_records(candidates.into_iter().filter_map(to_record))
    }

    /// Indexes a record under each of its non-empty keys.
    ///
    /// Keys are lower-cased char by char before insertion. If the record's
    /// identity is already present at a key's terminal node, its payload is
    /// replaced.
    ///
    /// Callers must supply a non-empty identity.
    pub fn insert(&mut self, record: IndexedRecord<V>) {
        let IndexedRecord {
            identity,
            keys,
            payload,
        } = record;
        debug_assert!(
            !identity.is_empty(),
            "indexed records require a non-empty identity"
        );

        for key in keys.iter().filter(|key| !key.is_empty()) {
            let node = fold_case(key).fold(&mut self.root, |node, c| node.child_or_insert(c));

            node.is_terminal = true;
            node.payloads.insert(identity.clone(), payload.clone());
        }
    }

    /// Finds every record with a key starting with `prefix`.
    ///
    /// The prefix is matched case-insensitively. An empty prefix matches
    /// every indexed record. `limit` caps the number of distinct identities
    /// returned; `None` means unbounded. When a record is reachable through
    /// several keys below the prefix, the first one found supplies its
    /// payload.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The prefix to search for.
    /// * `limit` - Maximum number of identities to return.
    ///
    /// # Returns
    ///
    /// A map of identity to payload, empty when nothing matches.
    pub fn find_all_starting_with<Q>(&self, prefix: Q, limit: Option<usize>) -> Matches<V>
    where
        Q: AsRef<str>,
    {
        let prefix = prefix.as_ref();
        let matches = match self.descend(prefix) {
            Some(start) => Self::collect(start, limit),
            None => Matches::default(),
        };

        trace!(prefix, ?limit, found = matches.len(), "prefix lookup");
        matches
    }

    /// Returns true if at least one indexed key starts with `prefix`.
    pub fn has_prefix<Q>(&self, prefix: Q) -> bool
    where
        Q: AsRef<str>,
    {
        self.descend(prefix.as_ref())
            .map_or(false, TrieNode::leads_to_key)
    }

    /// Returns the number of distinct indexed keys.
    ///
    /// Keys differing only in case count once. This walks the whole trie.
    pub fn key_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            if node.is_terminal {
                count += 1;
            }
            stack.extend(node.children.values());
        }

        count
    }

    /// Returns true if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        !self.root.leads_to_key()
    }

    /// Follows the folded `prefix` from the root.
    fn descend(&self, prefix: &str) -> Option<&TrieNode<V>> {
        fold_case(prefix).try_fold(&self.root, |node, c| node.children.get(&c))
    }

    /// Depth-first collection of the subtree below `start`.
    ///
    /// Uses an explicit stack so key length never bounds the call depth.
    fn collect(start: &TrieNode<V>, limit: Option<usize>) -> Matches<V> {
        let mut matches = Matches::default();
        let full = |matches: &Matches<V>| limit.map_or(false, |max| matches.len() >= max);

        if full(&matches) {
            return matches;
        }

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if node.is_terminal {
                for (identity, payload) in &node.payloads {
                    if matches.contains_key(identity) {
                        continue;
                    }
                    matches.insert(identity.clone(), payload.clone());
                    if full(&matches) {
                        return matches;
                    }
                }
            }
            stack.extend(node.children.values());
        }

        matches
    }
}

/// Lower-cases `text` char by char.
///
/// `str::to_lowercase` applies context rules such as the word-final sigma,
/// which would fold a prefix differently from the same chars inside a longer
/// key.
fn fold_case(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

impl<V: Clone> Default for PrefixMatcher<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Extend<IndexedRecord<V>> for PrefixMatcher<V> {
    fn extend<I: IntoIterator<Item = IndexedRecord<V>>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl<V: Clone> FromIterator<IndexedRecord<V>> for PrefixMatcher<V> {
    fn from_iter<I: IntoIterator<Item = IndexedRecord<V>>>(records: I) -> Self {
        Self::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Name {
        first: &'static str,
        last: &'static str,
    }

    fn user(username: &str, first: &'static str, last: &'static str) -> IndexedRecord<Name> {
        IndexedRecord::new(username, Name { first, last }).with_keys([username, first, last])
    }

    fn example_matcher() -> PrefixMatcher<Name> {
        [user("alice", "Alice", "Smith"), user("albert", "Al", "Jones")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_matcher_basic_operations() {
        let mut matcher = PrefixMatcher::new();
        assert!(matcher.is_empty());
        assert_eq!(matcher.key_count(), 0);

        matcher.insert(IndexedRecord::new("hello", 1).with_key("hello"));
        assert!(!matcher.is_empty());
        assert_eq!(matcher.key_count(), 1);
        assert!(matcher.has_prefix("HEL"));
        assert!(!matcher.has_prefix("help"));

        let results = matcher.find_all_starting_with("he", None);
        assert_eq!(results.get("hello"), Some(&1));
    }

    #[test]
    fn test_example_scenario() {
        let matcher = example_matcher();

        let results = matcher.find_all_starting_with("al", None);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results["alice"],
            Name {
                first: "Alice",
                last: "Smith"
            }
        );
        assert_eq!(
            results["albert"],
            Name {
                first: "Al",
                last: "Jones"
            }
        );

        let results = matcher.find_all_starting_with("ali", None);
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("alice"));

        assert!(matcher.find_all_starting_with("zz", None).is_empty());

        let results = matcher.find_all_starting_with("al", Some(1));
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("alice") || results.contains_key("albert"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let matcher = example_matcher();
        let upper = matcher.find_all_starting_with("AL", None);
        let lower = matcher.find_all_starting_with("al", None);
        assert_eq!(upper, lower);

        // Payload keeps the casing it was inserted with
        assert_eq!(matcher.find_all_starting_with("JON", None)["albert"].last, "Jones");
    }

    #[test]
    fn test_deduplicates_identity_across_keys() {
        let mut matcher = PrefixMatcher::new();
        matcher.insert(IndexedRecord::new("alice", ()).with_keys(["alice", "Al", "Alison"]));

        let results = matcher.find_all_starting_with("al", None);
        assert_eq!(results.len(), 1);
        assert_eq!(matcher.key_count(), 3);
    }

    #[test]
    fn test_empty_keys_are_skipped() {
        let mut matcher = PrefixMatcher::new();
        matcher.insert(IndexedRecord::new("ghost", ()).with_keys(["", ""]));
        assert!(matcher.is_empty());
        assert!(matcher.find_all_starting_with("", None).is_empty());
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let matcher = example_matcher();
        assert_eq!(matcher.find_all_starting_with("", None).len(), 2);
    }

    #[test]
    fn test_zero_limit_returns_nothing() {
        let matcher = example_matcher();
        assert!(matcher.find_all_starting_with("al", Some(0)).is_empty());
    }

    #[test]
    fn test_reinsert_overwrites_payload() {
        let mut matcher = PrefixMatcher::new();
        matcher.insert(IndexedRecord::new("ztf", "P48").with_key("ztf"));
        matcher.insert(IndexedRecord::new("ztf", "P60").with_key("ZTF"));

        let results = matcher.find_all_starting_with("z", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results["ztf"], "P60");
        assert_eq!(matcher.key_count(), 1);
    }

    #[test]
    fn test_shared_terminal_accumulates_identities() {
        let mut matcher = PrefixMatcher::new();
        matcher.insert(IndexedRecord::new("sedm", "P60").with_key("p60"));
        matcher.insert(IndexedRecord::new("rc", "P60").with_key("p60"));

        let results = matcher.find_all_starting_with("p60", None);
        assert_eq!(results.len(), 2);
        assert_eq!(matcher.key_count(), 1);
    }

    #[test]
    fn test_greek_prefix_of_longer_key() {
        let mut matcher = PrefixMatcher::new();
        matcher.insert(IndexedRecord::new("x", ()).with_key("ΣΑΣΑ"));

        for prefix in ["Σ", "ΣΑΣ", "σασ", "ΣΑΣΑ", "σασα"] {
            assert!(
                matcher.find_all_starting_with(prefix, None).contains_key("x"),
                "{prefix} should match"
            );
        }
        assert!(matcher.has_prefix("ΣΑΣ"));
    }

    #[test]
    fn test_from_candidates_filters() {
        let candidates = [("alice", false), ("bot", true)];
        let matcher = PrefixMatcher::from_candidates(candidates.iter(), |(name, is_bot)| {
            (!is_bot).then(|| IndexedRecord::new(*name, ()).with_key(*name))
        });

        assert!(matcher.has_prefix("ali"));
        assert!(!matcher.has_prefix("bo"));
    }
}
