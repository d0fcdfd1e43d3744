//! Segment trie used by [`Router`](super::Router) for route matching
//!
//! Every registered pattern is split into `/`-delimited segments and stored one
//! segment per tree level:
//! - Static segments (e.g. `users`) match exactly
//! - Named captures (e.g. `:id`) match any single segment
//! - Catch-all captures (e.g. `*filepath`) match the remainder of the path
//!
//! Only nodes that terminate a registration carry a non-empty pattern, so an
//! intermediate node reached exactly by a lookup is never a match.
//!
//! ## Ambiguity
//!
//! Insertion reuses the first child that either equals the segment or is a
//! wildcard. Once a wildcard child exists at a depth, literal segments
//! registered later at that depth are absorbed into it instead of getting a
//! sibling of their own. Lookups try every candidate child in insertion order
//! and keep the first subtree that produces a match.

use std::fmt;

/// Node in the segment trie
///
/// Parents exclusively own their children; lookups only walk downwards so no
/// back-references are needed.
#[derive(Clone, Default)]
pub struct TrieNode {
    /// Full registered pattern, e.g. `/p/:lang`. Empty unless a registration ends here.
    pattern: String,
    /// The segment this node represents, e.g. `:lang`
    part: String,
    /// Children in insertion order
    children: Vec<TrieNode>,
    /// `part` starts with `:` or `*`
    is_wild: bool,
}

impl TrieNode {
    fn new(part: &str) -> Self {
        Self {
            pattern: String::new(),
            part: part.to_string(),
            children: Vec::new(),
            is_wild: part.starts_with(':') || part.starts_with('*'),
        }
    }

    /// The full pattern registered at this node (empty for intermediate nodes)
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The segment this node stands for
    #[must_use]
    pub fn part(&self) -> &str {
        &self.part
    }

    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.is_wild
    }

    /// Insert `pattern`, whose segments are `parts`, below this node.
    ///
    /// `height` is the index of the segment handled by the next level.
    pub fn insert(&mut self, pattern: &str, parts: &[&str], height: usize) {
        if parts.len() == height {
            self.pattern = pattern.to_string();
            return;
        }

        let part = parts[height];
        let idx = match self.match_child(part) {
            Some(idx) => idx,
            None => {
                self.children.push(TrieNode::new(part));
                self.children.len() - 1
            }
        };

        self.children[idx].insert(pattern, parts, height + 1);
    }

    /// Find the terminal node matching the path `parts`, starting at `height`.
    #[must_use]
    pub fn search(&self, parts: &[&str], height: usize) -> Option<&TrieNode> {
        if parts.len() == height || self.part.starts_with('*') {
            if self.pattern.is_empty() {
                return None;
            }
            return Some(self);
        }

        let part = parts[height];
        self.children
            .iter()
            .filter(|child| child.accepts(part))
            .find_map(|child| child.search(parts, height + 1))
    }

    /// Collect every node with a registered pattern, depth first.
    pub fn travel<'a>(&'a self, list: &mut Vec<&'a TrieNode>) {
        if !self.pattern.is_empty() {
            list.push(self);
        }

        for child in &self.children {
            child.travel(list);
        }
    }

    /// First child accepting `part`, used for insertion
    fn match_child(&self, part: &str) -> Option<usize> {
        self.children.iter().position(|child| child.accepts(part))
    }

    fn accepts(&self, part: &str) -> bool {
        self.part == part || self.is_wild
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node{{pattern={}, part={}, is_wild={}}}",
            self.pattern, self.part, self.is_wild
        )
    }
}
