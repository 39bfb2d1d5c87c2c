/// The balancing discipline of a [`WordIndex`](crate::WordIndex).
///
/// The mode is fixed when the index is created and applies to every
/// subsequent operation on that index; two indexes with different modes are
/// fully independent.
///
/// # Examples
///
/// ```
/// use lexitree::{Mode, WordIndex};
///
/// let mut index = WordIndex::with_mode(Mode::Bst);
/// for word in ["a", "b", "c", "d"] {
///     index.insert(word)?;
/// }
///
/// // Sorted input degenerates to a chain without rebalancing.
/// assert_eq!(index.depth(), 4);
/// # Ok::<(), lexitree::EmptyKeyError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Plain binary search tree; insertions never rebalance, so the depth is
    /// O(n) for adversarial input.
    Bst,
    /// Red-black tree; every operation leaves the tree within twice the
    /// optimal depth.
    #[default]
    Rbt,
}
