//! An ordered word-frequency index for Rust.
//!
//! This crate provides [`WordIndex`], an ordered index over text tokens backed
//! by a red-black tree. Inserting the same word twice does not create a second
//! node; it increments a per-word frequency counter. A fallback plain-BST
//! [`Mode`] is available for comparing the balanced and unbalanced shapes.
//!
//! # Example
//!
//! ```
//! use lexitree::WordIndex;
//!
//! let mut index = WordIndex::new();
//! index.insert("pear")?;
//! index.insert("apple")?;
//! index.insert("apple")?;
//!
//! assert!(index.contains("apple"));
//! assert_eq!(index.frequency("apple"), Some(2));
//!
//! // Inorder traversal yields (frequency, word) pairs in word order.
//! let words: Vec<_> = index.iter().collect();
//! assert_eq!(words, [(2, "apple"), (1, "pear")]);
//! # Ok::<(), lexitree::EmptyKeyError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) insert/search/remove** - Guaranteed by the red-black invariants
//! - **Frequency counting** - One node per distinct word, duplicates counted in place
//! - **DOT export** - [`WordIndex::write_dot`] emits a Graphviz description of the tree
//!
//! # Implementation
//!
//! Nodes own their children (`Option<Box<Node>>`); no parent pointers are
//! stored. Rebalancing after insertion runs bottom-up on the unwind of the
//! recursive insert, and deletion restores the invariants by propagating a
//! black-height deficit toward the root.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod dot;
mod mode;
mod raw;

pub mod word_index;

pub use mode::Mode;
pub use word_index::{EmptyKeyError, WordIndex};
