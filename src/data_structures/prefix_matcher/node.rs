//! Node implementation for the prefix matcher.
//!
//! Nodes are the building blocks of the trie. Each one owns its children
//! directly and, when some indexed key ends on it, the payloads of every
//! record that key belongs to.

use fnv::FnvHashMap;

/// A node in the prefix matcher trie.
///
/// Each node represents one lower-cased character of a key path. Terminal
/// nodes carry the identity → payload entries for keys ending here.
#[derive(Debug, Clone)]
pub(crate) struct TrieNode<V> {
    /// Map of characters to child nodes
    pub children: FnvHashMap<char, TrieNode<V>>,

    /// Whether some indexed key ends at this node
    pub is_terminal: bool,

    /// Payloads keyed by record identity, for keys terminating here
    pub payloads: FnvHashMap<String, V>,
}

impl<V> TrieNode<V> {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            children: FnvHashMap::default(),
            is_terminal: false,
            payloads: FnvHashMap::default(),
        }
    }

    /// Returns the child for `c`, creating an empty one if absent.
    pub fn child_or_insert(&mut self, c: char) -> &mut TrieNode<V> {
        self.children.entry(c).or_default()
    }

    /// Whether any key terminates at or below this node.
    pub fn leads_to_key(&self) -> bool {
        self.is_terminal || !self.children.is_empty()
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}
