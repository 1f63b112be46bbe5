//! Records accepted by the prefix matcher.

/// A value to index, together with the strings it should be discoverable by.
///
/// `identity` deduplicates the record in query results: a record reachable
/// through several keys below the same prefix is reported once. `payload` is
/// returned verbatim (original casing) alongside the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRecord<V> {
    /// Identity key, unique per record.
    pub identity: String,

    /// Strings the record is indexed under. Empty strings are ignored.
    pub keys: Vec<String>,

    /// Display payload returned with matches.
    pub payload: V,
}

impl<V> IndexedRecord<V> {
    /// Creates a record with no keys yet.
    ///
    /// The identity itself is not indexed implicitly; add it with
    /// [`with_key`](Self::with_key) when it should be searchable.
    pub fn new<S: Into<String>>(identity: S, payload: V) -> Self {
        Self {
            identity: identity.into(),
            keys: Vec::new(),
            payload,
        }
    }

    /// Adds a single search key.
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Adds several search keys at once.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }
}
