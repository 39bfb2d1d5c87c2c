//! DOT (Graphviz) structural export.
//!
//! A read-only walk producing one `Mrecord` per node, labelled
//! `word:frequency` with `f1`/`f2` ports for the child edges. Keys are
//! whitespace-delimited tokens by construction, so no DOT escaping is
//! attempted. Render the output with e.g. `dot -Tpdf < tree.dot > tree.pdf`.

use core::fmt::{self, Write};

use crate::mode::Mode;
use crate::raw::{Color, Node, RawIndex};

pub(crate) fn write_dot<W: Write>(index: &RawIndex, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph tree {{")?;
    writeln!(out, "node [shape = Mrecord, penwidth = 2];")?;
    if let Some(root) = index.root() {
        write_node(root, index.mode(), out)?;
    }
    writeln!(out, "}}")
}

fn write_node<W: Write>(node: &Node, mode: Mode, out: &mut W) -> fmt::Result {
    // Red is only ever reported in red-black mode; BST-mode trees render
    // uniformly black even though unused color tags remain on the nodes.
    let color = if mode == Mode::Rbt && node.color == Color::Red { "red" } else { "black" };
    writeln!(
        out,
        "\"{key}\"[label=\"{{<f0>{key}:{frequency}|{{<f1>|<f2>}}}}\"color={color}];",
        key = node.key,
        frequency = node.frequency,
    )?;
    if let Some(left) = node.left.as_deref() {
        write_node(left, mode, out)?;
        writeln!(out, "\"{}\":f1 -> \"{}\":f0;", node.key, left.key)?;
    }
    if let Some(right) = node.right.as_deref() {
        write_node(right, mode, out)?;
        writeln!(out, "\"{}\":f2 -> \"{}\":f0;", node.key, right.key)?;
    }
    Ok(())
}
