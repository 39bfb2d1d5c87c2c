use alloc::boxed::Box;

/// Node color tag; absent children count as [`Color::Black`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// An owned edge to a child subtree; `None` is the empty tree.
pub(crate) type Link = Option<Box<Node>>;

pub(crate) struct Node {
    /// The indexed word. Immutable once set, except when a removal replaces a
    /// node's payload with its successor's.
    pub(crate) key: Box<str>,
    pub(crate) color: Color,
    /// Count of duplicate insertions of `key`; always at least 1.
    pub(crate) frequency: u32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    /// Creates a freshly inserted node: red, frequency 1, no children.
    pub(crate) fn new(key: &str) -> Self {
        Self {
            key: key.into(),
            color: Color::Red,
            frequency: 1,
            left: None,
            right: None,
        }
    }
}

/// Returns true if the link holds a red node. Empty links are black.
#[inline]
pub(crate) fn is_red(link: &Link) -> bool {
    link.as_ref().is_some_and(|node| node.color == Color::Red)
}

/// Renders a subtree as `key:color(left,right)` text for shape assertions.
/// Leaves render without the child list; empty links render as `-`.
#[cfg(test)]
pub(crate) fn render(link: &Link) -> alloc::string::String {
    use alloc::format;
    match link.as_deref() {
        None => alloc::string::String::from("-"),
        Some(node) => {
            let tag = match node.color {
                Color::Red => 'R',
                Color::Black => 'B',
            };
            if node.left.is_none() && node.right.is_none() {
                format!("{}:{}", node.key, tag)
            } else {
                format!("{}:{}({},{})", node.key, tag, render(&node.left), render(&node.right))
            }
        }
    }
}
