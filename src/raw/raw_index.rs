use alloc::boxed::Box;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::balance::{Removal, fix_insert, fix_left_deficit, fix_right_deficit};
use super::node::{Color, Link, Node};
use crate::mode::Mode;

/// Stack for the iterative teardown walk.
type FreeStack = SmallVec<[Box<Node>; 16]>;

/// The core tree backing `WordIndex`.
///
/// Carries its root and balancing mode explicitly; independently constructed
/// indexes never interact. `len` counts distinct keys, not insertions.
pub(crate) struct RawIndex {
    root: Link,
    mode: Mode,
    len: usize,
}

impl RawIndex {
    pub(crate) const fn new(mode: Mode) -> Self {
        Self {
            root: None,
            mode,
            len: 0,
        }
    }

    pub(crate) const fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Inserts `key`, creating a red node on first sight or bumping the
    /// frequency of an existing one. Returns the key's new frequency.
    ///
    /// The root is re-blackened exactly once here, after the recursive
    /// insert and its unwind fixups have run.
    pub(crate) fn insert(&mut self, key: &str) -> u32 {
        debug_assert!(!key.is_empty(), "empty keys are rejected at the public boundary");
        let (mut root, frequency, created) = insert_rec(self.root.take(), key, self.mode);
        root.color = Color::Black;
        self.root = Some(root);
        if created {
            self.len += 1;
        }
        frequency
    }

    /// Returns the stored frequency for `key`, descending iteratively.
    pub(crate) fn frequency(&self, key: &str) -> Option<u32> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(node.frequency),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Removes `key`'s node entirely, returning its frequency.
    ///
    /// In red-black mode the removal threads a black-height deficit flag up
    /// the recursion; whatever deficit survives to the root is absorbed
    /// there, and the root is re-blackened.
    pub(crate) fn remove(&mut self, key: &str) -> Option<u32> {
        let (removal, removed) = remove_rec(self.root.take(), key, self.mode);
        self.root = removal.link;
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Height of the tree; 0 for an empty index.
    pub(crate) fn depth(&self) -> usize {
        depth_rec(&self.root)
    }

    /// Releases every node with an explicit stack, so deeply skewed BST-mode
    /// trees cannot exhaust the call stack through nested drops. Idempotent.
    pub(crate) fn clear(&mut self) {
        let mut stack: FreeStack = SmallVec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl Drop for RawIndex {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Recursive top-down insert. Returns the subtree root, the inserted key's
/// frequency and whether a node was created.
///
/// In red-black mode every frame on the way back up runs [`fix_insert`] on
/// its node; the frame that allocated returns directly, and an
/// equal-key frame has nothing structural to repair below it but still gets
/// fixed up by its ancestors like any other frame.
fn insert_rec(link: Link, key: &str, mode: Mode) -> (Box<Node>, u32, bool) {
    let Some(mut node) = link else {
        return (Box::new(Node::new(key)), 1, true);
    };
    match key.cmp(&node.key) {
        Ordering::Equal => {
            node.frequency += 1;
            let frequency = node.frequency;
            (node, frequency, false)
        }
        Ordering::Less => {
            let (child, frequency, created) = insert_rec(node.left.take(), key, mode);
            node.left = Some(child);
            if mode == Mode::Rbt {
                node = fix_insert(node);
            }
            (node, frequency, created)
        }
        Ordering::Greater => {
            let (child, frequency, created) = insert_rec(node.right.take(), key, mode);
            node.right = Some(child);
            if mode == Mode::Rbt {
                node = fix_insert(node);
            }
            (node, frequency, created)
        }
    }
}

fn remove_rec(link: Link, key: &str, mode: Mode) -> (Removal, Option<u32>) {
    let Some(mut node) = link else {
        return (Removal::balanced(None), None);
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove_rec(node.left.take(), key, mode);
            node.left = child.link;
            if child.balanced {
                (Removal::balanced(Some(node)), removed)
            } else {
                (fix_left_deficit(node), removed)
            }
        }
        Ordering::Greater => {
            let (child, removed) = remove_rec(node.right.take(), key, mode);
            node.right = child.link;
            if child.balanced {
                (Removal::balanced(Some(node)), removed)
            } else {
                (fix_right_deficit(node), removed)
            }
        }
        Ordering::Equal => {
            let frequency = node.frequency;
            (unlink(node, mode), Some(frequency))
        }
    }
}

/// Detaches `node` from the tree, returning its replacement subtree.
fn unlink(mut node: Box<Node>, mode: Mode) -> Removal {
    match (node.left.take(), node.right.take()) {
        (None, None) => Removal {
            link: None,
            // Removing a black leaf costs its path one black node.
            balanced: mode == Mode::Bst || node.color == Color::Red,
        },
        (Some(child), None) | (None, Some(child)) => promote_lone_child(child, mode),
        (Some(left), Some(right)) => {
            // Adopt the successor's payload in place, then delete the
            // successor from the right subtree.
            let ((key, frequency), child) = take_min(right, mode);
            node.key = key;
            node.frequency = frequency;
            node.left = Some(left);
            node.right = child.link;
            if child.balanced {
                Removal::balanced(Some(node))
            } else {
                fix_right_deficit(node)
            }
        }
    }
}

/// A lone child replaces its parent. In red-black mode the child is
/// necessarily red under a black parent; blackening it restores the path.
fn promote_lone_child(mut child: Box<Node>, mode: Mode) -> Removal {
    if mode == Mode::Rbt {
        child.color = Color::Black;
    }
    Removal::balanced(Some(child))
}

/// Unlinks the leftmost node of a subtree, handing back its payload.
fn take_min(mut node: Box<Node>, mode: Mode) -> ((Box<str>, u32), Removal) {
    match node.left.take() {
        Some(left) => {
            let (payload, child) = take_min(left, mode);
            node.left = child.link;
            let removal = if child.balanced {
                Removal::balanced(Some(node))
            } else {
                fix_left_deficit(node)
            };
            (payload, removal)
        }
        None => {
            let Node {
                key,
                frequency,
                color,
                right,
                left: _,
            } = *node;
            let removal = match right {
                Some(child) => promote_lone_child(child, mode),
                None => Removal {
                    link: None,
                    balanced: mode == Mode::Bst || color == Color::Red,
                },
            };
            ((key, frequency), removal)
        }
    }
}

fn depth_rec(link: &Link) -> usize {
    link.as_deref().map_or(0, |node| {
        1 + depth_rec(&node.left).max(depth_rec(&node.right))
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::raw::node::{is_red, render};

    /// Asserts the red-black invariants below `node` and returns the black
    /// height (empty links count as one black).
    fn check_black_height(node: Option<&Node>) -> usize {
        let Some(node) = node else { return 1 };
        if node.color == Color::Red {
            assert!(
                !is_red(&node.left) && !is_red(&node.right),
                "red node {:?} has a red child",
                node.key
            );
        }
        let left = check_black_height(node.left.as_deref());
        let right = check_black_height(node.right.as_deref());
        assert_eq!(left, right, "black-height mismatch under {:?}", node.key);
        left + usize::from(node.color == Color::Black)
    }

    fn assert_invariants(index: &RawIndex) {
        if let Some(root) = index.root() {
            assert_eq!(root.color, Color::Black, "root must be black");
        }
        check_black_height(index.root());
    }

    fn inorder(index: &RawIndex) -> Vec<(u32, String)> {
        fn walk(node: Option<&Node>, out: &mut Vec<(u32, String)>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push((node.frequency, String::from(&*node.key)));
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(index.root(), &mut out);
        out
    }

    #[test]
    fn insert_d_b_a_c_settles_into_the_expected_shape() {
        let mut index = RawIndex::new(Mode::Rbt);
        for key in ["d", "b", "a", "c"] {
            index.insert(key);
        }
        assert_eq!(render(&index.root), "b:B(a:B,d:B(c:R,-))");
        assert_eq!(
            inorder(&index).into_iter().map(|(_, k)| k).collect::<Vec<_>>(),
            ["a", "b", "c", "d"]
        );
    }

    #[test]
    fn duplicate_inserts_share_one_node() {
        let mut index = RawIndex::new(Mode::Rbt);
        assert_eq!(index.insert("a"), 1);
        assert_eq!(index.insert("a"), 2);
        assert_eq!(index.insert("a"), 3);
        assert_eq!(index.len(), 1);
        assert_eq!(index.frequency("a"), Some(3));
        assert_eq!(index.depth(), 1);
    }

    #[test]
    fn search_on_an_empty_index_finds_nothing() {
        let index = RawIndex::new(Mode::Rbt);
        assert_eq!(index.frequency("x"), None);
        assert_eq!(index.depth(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn bst_mode_never_rebalances() {
        let mut index = RawIndex::new(Mode::Bst);
        for key in ["a", "b", "c", "d", "e"] {
            index.insert(key);
        }
        // Sorted input degenerates into a right chain.
        assert_eq!(index.depth(), 5);
        assert_eq!(
            inorder(&index).into_iter().map(|(_, k)| k).collect::<Vec<_>>(),
            ["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn remove_returns_the_frequency_and_forgets_the_key() {
        let mut index = RawIndex::new(Mode::Rbt);
        for key in ["d", "b", "a", "c", "b"] {
            index.insert(key);
        }
        assert_eq!(index.remove("b"), Some(2));
        assert_eq!(index.remove("b"), None);
        assert_eq!(index.frequency("b"), None);
        assert_eq!(index.len(), 3);
        assert_invariants(&index);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut index = RawIndex::new(Mode::Rbt);
        index.insert("a");
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.depth(), 0);
        index.clear();
        assert!(index.is_empty());
    }

    fn word() -> impl Strategy<Value = String> {
        (0u32..60).prop_map(|n| format!("w{n:02}"))
    }

    proptest! {
        /// Invariants and ordering hold after every insertion.
        #[test]
        fn insert_preserves_the_red_black_invariants(keys in proptest::collection::vec(word(), 1..200)) {
            let mut index = RawIndex::new(Mode::Rbt);
            let mut model: BTreeMap<String, u32> = BTreeMap::new();

            for key in &keys {
                let frequency = index.insert(key);
                *model.entry(key.clone()).or_insert(0) += 1;
                prop_assert_eq!(frequency, model[key]);

                assert_invariants(&index);
                prop_assert_eq!(index.len(), model.len());

                let listing = inorder(&index);
                let expected: Vec<_> = model.iter().map(|(k, &f)| (f, k.clone())).collect();
                prop_assert_eq!(listing, expected);
            }
        }

        /// Invariants hold after every removal, and membership tracks a
        /// `BTreeMap` model throughout.
        #[test]
        fn remove_preserves_the_red_black_invariants(
            inserts in proptest::collection::vec(word(), 1..150),
            removals in proptest::collection::vec(word(), 1..150),
        ) {
            let mut index = RawIndex::new(Mode::Rbt);
            let mut model: BTreeMap<String, u32> = BTreeMap::new();
            for key in &inserts {
                index.insert(key);
                *model.entry(key.clone()).or_insert(0) += 1;
            }

            for key in &removals {
                let removed = index.remove(key);
                let expected = model.remove(key);
                prop_assert_eq!(removed, expected);

                assert_invariants(&index);
                prop_assert_eq!(index.len(), model.len());
                prop_assert_eq!(index.frequency(key), None);
            }
        }

        /// The BST property is mode-independent.
        #[test]
        fn inorder_is_sorted_in_bst_mode(keys in proptest::collection::vec(word(), 1..200)) {
            let mut index = RawIndex::new(Mode::Bst);
            for key in &keys {
                index.insert(key);
            }
            let listing = inorder(&index);
            let mut sorted = listing.clone();
            sorted.sort_by(|a, b| a.1.cmp(&b.1));
            prop_assert_eq!(listing, sorted);
        }
    }
}
