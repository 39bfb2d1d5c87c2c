//! Rotation primitives and the red-black fixup procedures.
//!
//! Insertion repair (`fix_insert`) runs on every ancestor frame as the
//! recursive insert unwinds; each call resolves the red violations visible
//! from one node, possibly leaving the node red for its parent's frame to
//! deal with. Deletion repair (`fix_left_deficit` / `fix_right_deficit`)
//! works differently: it absorbs or propagates a one-black-node deficit left
//! behind by unlinking a black node.

use alloc::boxed::Box;

use super::node::{Color, Link, Node, is_red};

/// Replacement subtree after a structural removal.
pub(crate) struct Removal {
    pub(crate) link: Link,
    /// False if the subtree is one black node short of its pre-removal
    /// black height; the caller must repair or keep propagating.
    pub(crate) balanced: bool,
}

impl Removal {
    pub(crate) fn balanced(link: Link) -> Self {
        Self { link, balanced: true }
    }
}

/// Promotes `t`'s right child to the subtree root. O(1), no allocation.
pub(crate) fn rotate_left(mut t: Box<Node>) -> Box<Node> {
    let mut pivot = t.right.take().expect("`rotate_left()` - right child must be non-empty!");
    t.right = pivot.left.take();
    pivot.left = Some(t);
    pivot
}

/// Promotes `t`'s left child to the subtree root. O(1), no allocation.
pub(crate) fn rotate_right(mut t: Box<Node>) -> Box<Node> {
    let mut pivot = t.left.take().expect("`rotate_right()` - left child must be non-empty!");
    t.left = pivot.right.take();
    pivot.right = Some(t);
    pivot
}

/// Restores the red-black invariants below `t` after an insertion into one of
/// its subtrees.
///
/// Left-side cases run before right-side cases, and the right-side block sees
/// the (possibly recolored or rotated) result of the left-side block. `t` may
/// be returned red; the caller's own `fix_insert` frame then resolves it.
/// Blackening the root is the insert entry point's job, not ours.
pub(crate) fn fix_insert(mut t: Box<Node>) -> Box<Node> {
    if is_red(&t.left) {
        let left_left_red = is_red(&t.left.as_ref().unwrap().left);
        let left_right_red = is_red(&t.left.as_ref().unwrap().right);
        if left_left_red {
            if is_red(&t.right) {
                flip_colors(&mut t);
            } else {
                t = rotate_right(t);
                t.color = Color::Black;
                t.right.as_mut().unwrap().color = Color::Red;
            }
        } else if left_right_red {
            if is_red(&t.right) {
                flip_colors(&mut t);
            } else {
                // Straighten the zigzag into a left-left chain first.
                let left = t.left.take().unwrap();
                t.left = Some(rotate_left(left));
                t = rotate_right(t);
                t.color = Color::Black;
                t.right.as_mut().unwrap().color = Color::Red;
            }
        }
    }
    if is_red(&t.right) {
        let right_left_red = is_red(&t.right.as_ref().unwrap().left);
        let right_right_red = is_red(&t.right.as_ref().unwrap().right);
        if right_left_red {
            if is_red(&t.left) {
                flip_colors(&mut t);
            } else {
                let right = t.right.take().unwrap();
                t.right = Some(rotate_right(right));
                t = rotate_left(t);
                t.color = Color::Black;
                t.left.as_mut().unwrap().color = Color::Red;
            }
        } else if right_right_red {
            if is_red(&t.left) {
                flip_colors(&mut t);
            } else {
                t = rotate_left(t);
                t.color = Color::Black;
                t.left.as_mut().unwrap().color = Color::Red;
            }
        }
    }
    t
}

/// 4-node case: both children go black and the redness moves up to `t`.
/// Black height is unaffected.
fn flip_colors(t: &mut Node) {
    t.color = Color::Red;
    t.left.as_mut().unwrap().color = Color::Black;
    t.right.as_mut().unwrap().color = Color::Black;
}

/// Repairs a one-black deficit in `t`'s left subtree.
///
/// The right sibling must be non-empty: the deficient side had black height
/// at least one before the removal, so the sibling still does.
pub(crate) fn fix_left_deficit(mut t: Box<Node>) -> Removal {
    if is_red(&t.right) {
        // Red sibling: rotate it above `t` so the deficit faces a black
        // sibling under a red parent, which the local cases always resolve.
        t.color = Color::Red;
        let mut top = rotate_left(t);
        top.color = Color::Black;
        let repaired = fix_left_black_sibling(top.left.take().unwrap());
        debug_assert!(repaired.balanced);
        top.left = repaired.link;
        Removal::balanced(Some(top))
    } else {
        fix_left_black_sibling(t)
    }
}

/// Mirror image of [`fix_left_deficit`] for a deficit in the right subtree.
pub(crate) fn fix_right_deficit(mut t: Box<Node>) -> Removal {
    if is_red(&t.left) {
        t.color = Color::Red;
        let mut top = rotate_right(t);
        top.color = Color::Black;
        let repaired = fix_right_black_sibling(top.right.take().unwrap());
        debug_assert!(repaired.balanced);
        top.right = repaired.link;
        Removal::balanced(Some(top))
    } else {
        fix_right_black_sibling(t)
    }
}

/// Left-deficit cases with a black, non-empty sibling at `t.right`.
fn fix_left_black_sibling(mut t: Box<Node>) -> Removal {
    let sibling = t.right.as_mut().unwrap();
    if !is_red(&sibling.left) && !is_red(&sibling.right) {
        // Recolor the sibling red, equalizing the two subtrees one black
        // lower. A red `t` absorbs the deficit; a black `t` propagates it.
        sibling.color = Color::Red;
        if t.color == Color::Red {
            t.color = Color::Black;
            Removal::balanced(Some(t))
        } else {
            Removal { link: Some(t), balanced: false }
        }
    } else {
        if !is_red(&sibling.right) {
            // Near nephew red, far nephew black: rotate the sibling so the
            // red nephew moves to the far side.
            let mut sibling = t.right.take().unwrap();
            sibling.color = Color::Red;
            sibling.left.as_mut().unwrap().color = Color::Black;
            t.right = Some(rotate_right(sibling));
        }
        // Far nephew red: one rotation rebuilds both black heights.
        let color = t.color;
        t.color = Color::Black;
        let mut top = rotate_left(t);
        top.color = color;
        top.right.as_mut().unwrap().color = Color::Black;
        Removal::balanced(Some(top))
    }
}

/// Right-deficit cases with a black, non-empty sibling at `t.left`.
fn fix_right_black_sibling(mut t: Box<Node>) -> Removal {
    let sibling = t.left.as_mut().unwrap();
    if !is_red(&sibling.left) && !is_red(&sibling.right) {
        sibling.color = Color::Red;
        if t.color == Color::Red {
            t.color = Color::Black;
            Removal::balanced(Some(t))
        } else {
            Removal { link: Some(t), balanced: false }
        }
    } else {
        if !is_red(&sibling.left) {
            let mut sibling = t.left.take().unwrap();
            sibling.color = Color::Red;
            sibling.right.as_mut().unwrap().color = Color::Black;
            t.left = Some(rotate_left(sibling));
        }
        let color = t.color;
        t.color = Color::Black;
        let mut top = rotate_right(t);
        top.color = color;
        top.left.as_mut().unwrap().color = Color::Black;
        Removal::balanced(Some(top))
    }
}
