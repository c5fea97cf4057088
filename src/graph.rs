//! Graphviz rendering of a Huffman tree.
//!
//! An aid for inspecting what the coder built, not part of the
//! compressed format. Pipe the output through `dot -Tsvg` to see the
//! tree; edge labels give each symbol's code word along the path from
//! the root.

use std::fmt::Write as _;
use std::io::{Read, Write};

use crate::error::Result;
use crate::symbol::{read_symbols, SymbolSize};
use crate::tree::{build_tree, Node};

/// Scan `input`, build its Huffman tree, and write a `digraph` rendering
/// of it to `output`.
///
/// Leaves are named by the hex of their symbol bytes and labeled with
/// the escaped symbol text and its weight; internal nodes get synthetic
/// ids and show only the weight. Edges carry the bit they stand for. A
/// non-empty tail appears as an unattached `extra` node. When the input
/// holds no full symbol there is no tree and nothing is written.
pub fn graph<R: Read, W: Write>(mut input: R, mut output: W, size: SymbolSize) -> Result<()> {
    let symbols = read_symbols(&mut input, size)?;
    let Some(tree) = build_tree(&symbols.freqs) else {
        return Ok(());
    };
    render(&mut output, &tree, &symbols.extra)
}

fn render<W: Write>(out: &mut W, root: &Node, extra: &[u8]) -> Result<()> {
    writeln!(out, "digraph {{")?;

    if !extra.is_empty() {
        // unattached node for any trailing data
        writeln!(out, "  extra [label=\"\\\"{}\\\" (extra)\"];", dubscaped(extra))?;
    }

    let mut next_id: u64 = 1;
    let root_id = allocate_id(&mut next_id, root);
    let mut stack: Vec<(&Node, u64)> = vec![(root, root_id)];
    while let Some((node, id)) = stack.pop() {
        match node {
            Node::Leaf { weight, symbol } => {
                writeln!(
                    out,
                    "  {} [label=\"\\\"{}\\\" ({})\"];",
                    leaf_name(symbol.as_bytes()),
                    dubscaped(symbol.as_bytes()),
                    weight
                )?;
            }
            Node::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(out, "  internal_{id} [label=\"({weight})\"];")?;
                let left_id = allocate_id(&mut next_id, left);
                let right_id = allocate_id(&mut next_id, right);
                writeln!(
                    out,
                    "  internal_{id} -> {} [label=\"0\"];",
                    node_name(left, left_id)
                )?;
                writeln!(
                    out,
                    "  internal_{id} -> {} [label=\"1\"];",
                    node_name(right, right_id)
                )?;
                stack.push((&**left, left_id));
                stack.push((&**right, right_id));
            }
        }
    }

    writeln!(out, "}}")?;
    Ok(())
}

// Leaves are named by content, so only internal nodes consume ids.
fn allocate_id(next_id: &mut u64, node: &Node) -> u64 {
    match node {
        Node::Leaf { .. } => 0,
        Node::Internal { .. } => {
            let id = *next_id;
            *next_id += 1;
            id
        }
    }
}

fn node_name(node: &Node, id: u64) -> String {
    match node {
        Node::Leaf { symbol, .. } => leaf_name(symbol.as_bytes()),
        Node::Internal { .. } => format!("internal_{id}"),
    }
}

fn leaf_name(bytes: &[u8]) -> String {
    let mut name = String::from("leaf_0x");
    for &byte in bytes {
        let _ = write!(name, "{byte:02x}");
    }
    name
}

/// Escape symbol text for embedding inside an already-quoted dot label.
///
/// The label value itself contains escaped quotes, so control characters
/// need a doubled backslash to survive dot's own unescaping.
fn dubscaped(bytes: &[u8]) -> String {
    let mut escaped = String::new();
    for &byte in bytes {
        match byte {
            0x07 => escaped.push_str("\\\\a"),
            0x08 => escaped.push_str("\\\\b"),
            0x0c => escaped.push_str("\\\\f"),
            b'\n' => escaped.push_str("\\\\n"),
            b'\r' => escaped.push_str("\\\\r"),
            b'\t' => escaped.push_str("\\\\t"),
            0x0b => escaped.push_str("\\\\v"),
            b'\\' => escaped.push_str("\\\\'"),
            b'\'' => escaped.push('\''),
            b'"' => escaped.push_str("\\\""),
            0x20..=0x7e => escaped.push(byte as char),
            _ => {
                let _ = write!(escaped, "\\\\x{byte:02x}");
            }
        }
    }
    escaped
}
