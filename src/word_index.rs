//! An ordered word index with duplicate counting.

use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::dot;
use crate::mode::Mode;
use crate::raw::{Node, RawIndex};

/// An ordered index over text tokens with per-word duplicate counting.
///
/// Words are kept in byte-lexicographic order. Each distinct word owns
/// exactly one node; inserting it again increments the node's frequency
/// counter in place. The index is backed by a red-black tree by default,
/// guaranteeing O(log n) insertion, search and removal; [`Mode::Bst`]
/// disables rebalancing for callers who want the plain BST shape.
///
/// Empty words are rejected at this boundary with [`EmptyKeyError`]; the
/// tree below never holds a sentinel or empty key.
///
/// # Examples
///
/// ```
/// use lexitree::WordIndex;
///
/// let mut index = WordIndex::new();
/// for word in "the quick brown fox jumps over the lazy dog".split_whitespace() {
///     index.insert(word)?;
/// }
///
/// assert_eq!(index.len(), 8); // "the" appears twice
/// assert_eq!(index.frequency("the"), Some(2));
/// assert!(index.contains("fox"));
/// assert!(!index.contains("cat"));
///
/// let first = index.iter().next();
/// assert_eq!(first, Some((1, "brown")));
/// # Ok::<(), lexitree::EmptyKeyError>(())
/// ```
pub struct WordIndex {
    raw: RawIndex,
}

/// Error returned by [`WordIndex::insert`] for an empty key.
///
/// The empty token is not a word and has no defined position in the index;
/// rejecting it here keeps the tree free of sentinel states.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EmptyKeyError;

impl fmt::Display for EmptyKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty keys cannot be indexed")
    }
}

impl core::error::Error for EmptyKeyError {}

/// Stack of pending ancestors for the traversal iterators.
type TraversalStack<'a> = SmallVec<[&'a Node; 16]>;

impl WordIndex {
    /// Creates an empty red-black index.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::{Mode, WordIndex};
    ///
    /// let index = WordIndex::new();
    /// assert!(index.is_empty());
    /// assert_eq!(index.mode(), Mode::Rbt);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_mode(Mode::Rbt)
    }

    /// Creates an empty index with the given balancing mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::{Mode, WordIndex};
    ///
    /// let index = WordIndex::with_mode(Mode::Bst);
    /// assert_eq!(index.mode(), Mode::Bst);
    /// ```
    #[must_use]
    pub const fn with_mode(mode: Mode) -> Self {
        Self {
            raw: RawIndex::new(mode),
        }
    }

    /// Returns the index's balancing mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.raw.mode()
    }

    /// Returns the number of distinct words in the index.
    ///
    /// Duplicate insertions do not add to the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// index.insert("a")?;
    /// index.insert("a")?;
    /// assert_eq!(index.len(), 1);
    /// # Ok::<(), lexitree::EmptyKeyError>(())
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the index contains no words.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Inserts `key`, returning its new frequency.
    ///
    /// The first insertion of a word creates its node; later insertions
    /// increment the counter without touching the tree's shape.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyKeyError`] if `key` is empty; the index is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// assert_eq!(index.insert("word"), Ok(1));
    /// assert_eq!(index.insert("word"), Ok(2));
    /// assert!(index.insert("").is_err());
    /// ```
    pub fn insert(&mut self, key: &str) -> Result<u32, EmptyKeyError> {
        if key.is_empty() {
            return Err(EmptyKeyError);
        }
        Ok(self.raw.insert(key))
    }

    /// Returns true if `key` has been inserted (and not removed).
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// index.insert("word")?;
    /// assert!(index.contains("word"));
    /// assert!(!index.contains("other"));
    /// # Ok::<(), lexitree::EmptyKeyError>(())
    /// ```
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.raw.frequency(key).is_some()
    }

    /// Returns how many times `key` has been inserted, if it is present.
    #[must_use]
    pub fn frequency(&self, key: &str) -> Option<u32> {
        self.raw.frequency(key)
    }

    /// Removes `key`'s node entirely, returning its frequency.
    ///
    /// Returns `None` (and leaves the index unchanged) if `key` is absent.
    /// In red-black mode the tree is rebalanced before this returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// index.insert("word")?;
    /// index.insert("word")?;
    /// assert_eq!(index.remove("word"), Some(2));
    /// assert_eq!(index.remove("word"), None);
    /// # Ok::<(), lexitree::EmptyKeyError>(())
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<u32> {
        self.raw.remove(key)
    }

    /// Returns the height of the tree; 0 for an empty index.
    ///
    /// In red-black mode this is at most `2 * log2(n + 1)`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.raw.depth()
    }

    /// Removes every word. Safe to call on an already-empty index.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a lazy inorder iterator over `(frequency, word)` pairs,
    /// i.e. in ascending word order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// for word in ["b", "a", "b"] {
    ///     index.insert(word)?;
    /// }
    /// let pairs: Vec<_> = index.iter().collect();
    /// assert_eq!(pairs, [(1, "a"), (2, "b")]);
    /// # Ok::<(), lexitree::EmptyKeyError>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.raw.root())
    }

    /// Returns a lazy preorder iterator over `(frequency, word)` pairs.
    ///
    /// The first item is always the tree's root, which makes the shape of
    /// the index observable without a structural export.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self.raw.root())
    }

    /// Writes a DOT (Graphviz) description of the tree to `out`.
    ///
    /// Each node becomes a record labelled `word:frequency` with ports for
    /// its children; node colors follow the tree's coloring in red-black
    /// mode and are uniformly black in BST mode. Purely descriptive: no
    /// invariant checking is performed.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexitree::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// index.insert("word")?;
    ///
    /// let mut dot = String::new();
    /// index.write_dot(&mut dot).unwrap();
    /// assert!(dot.starts_with("digraph tree {"));
    /// # Ok::<(), lexitree::EmptyKeyError>(())
    /// ```
    pub fn write_dot<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        dot::write_dot(&self.raw, out)
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(frequency, word)| (word, frequency))).finish()
    }
}

impl<'a> IntoIterator for &'a WordIndex {
    type Item = (u32, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An inorder iterator over the words of a [`WordIndex`].
///
/// Created by [`WordIndex::iter`]. Yields `(frequency, word)` pairs in
/// ascending word order. The iterator keeps its pending ancestors on an
/// explicit stack, so it needs no parent pointers in the tree.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    stack: TraversalStack<'a>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self {
            stack: SmallVec::new(),
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some((node.frequency, &node.key))
    }
}

impl FusedIterator for Iter<'_> {}

/// A preorder iterator over the words of a [`WordIndex`].
///
/// Created by [`WordIndex::preorder`]. Yields each node before either of
/// its subtrees, left subtree first.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Preorder<'a> {
    stack: TraversalStack<'a>,
}

impl<'a> Preorder<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut stack = SmallVec::new();
        stack.extend(root);
        Self { stack }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (u32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right below left so the left subtree pops first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some((node.frequency, &node.key))
    }
}

impl FusedIterator for Preorder<'_> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_key_is_rejected_without_side_effects() {
        let mut index = WordIndex::new();
        assert_eq!(index.insert(""), Err(EmptyKeyError));
        assert!(index.is_empty());
        assert_eq!(format!("{EmptyKeyError}"), "empty keys cannot be indexed");
    }

    #[test]
    fn preorder_starts_at_the_root() {
        let mut index = WordIndex::new();
        for word in ["d", "b", "a", "c"] {
            index.insert(word).unwrap();
        }
        let pairs: Vec<_> = index.preorder().collect();
        assert_eq!(pairs, [(1, "b"), (1, "a"), (1, "d"), (1, "c")]);
    }

    #[test]
    fn debug_formats_as_a_map() {
        let mut index = WordIndex::new();
        index.insert("b").unwrap();
        index.insert("a").unwrap();
        index.insert("a").unwrap();
        assert_eq!(format!("{index:?}"), "{\"a\": 2, \"b\": 1}");
    }

    #[test]
    fn iterators_are_fused() {
        let index = WordIndex::default();
        let mut iter = index.iter();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
