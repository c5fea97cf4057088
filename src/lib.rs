//! # huffer
//!
//! *Huffman-coding based compression over fixed-size multi-byte symbols.*
//!
//! ## Intuition First
//!
//! Imagine writing a telegram where common words cost one stroke and
//! rare words cost several. As long as no abbreviation is the beginning
//! of another, the receiver can cut the stroke stream back into words
//! without any separators.
//!
//! Huffman coding builds exactly that dictionary from observed
//! frequencies: a binary tree whose leaves are the input symbols, where
//! the path from the root (0 for left, 1 for right) is the symbol's code
//! word. Frequent symbols end up near the root with short codes; the
//! prefix property falls out of the tree structure for free.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon   Entropy as the fundamental limit
//! 1952  Huffman   Optimal prefix codes from a bottom-up merge
//! 1952+           The workhorse of DEFLATE, JPEG, MP3, ...
//! ```
//!
//! David Huffman's insight was to build the tree bottom-up from the two
//! least frequent symbols, rather than top-down as his advisor Fano had;
//! bottom-up is provably optimal among prefix codes.
//!
//! ## What this crate does
//!
//! The coder treats the input as a stream of fixed-size **symbols** of 1
//! to 8 bytes (`--symbol-size`), so correlations between adjacent bytes
//! can be captured by widening the symbol. Input whose length is not a
//! multiple of the symbol size ends in a short tail that is stored
//! verbatim.
//!
//! The compressed stream is self-describing: an 8-byte magic, then a
//! single LSB-first bit stream holding the input length (64 bits), the
//! symbol size minus one (3 bits), the serialized tree, the concatenated
//! code words, the verbatim tail, and zero padding to the last byte
//! boundary.
//!
//! ## Complexity Analysis
//!
//! - **Time**: O(k log k) to build the tree over k distinct symbols,
//!   then O(1) amortized per input symbol to encode, O(code length) per
//!   symbol to decode.
//! - **Space**: O(k) nodes and code words; encoding reads the input
//!   twice rather than buffering it.
//!
//! ## Failure Modes
//!
//! 1. **Non-canonical trees**: equal weights are combined in heap order,
//!    so two encoders may emit different (equally optimal) bit streams
//!    for the same input. Compare decoded output, not compressed bytes.
//! 2. **Corrupt input**: decoding detects a wrong magic, a truncated
//!    header, a malformed tree, and a truncated body as distinct
//!    [`Error`] variants; there is no recovery or resynchronization.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use huffer::{decode, encode, SymbolSize};
//!
//! let input = b"abracadabra";
//! let mut compressed = Vec::new();
//! encode(Cursor::new(input), &mut compressed, SymbolSize::new(1)?)?;
//!
//! let mut restored = Vec::new();
//! decode(compressed.as_slice(), &mut restored)?;
//! assert_eq!(restored, input);
//! # Ok::<(), huffer::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. (1952). "A Method for the Construction of
//!   Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codec;
pub mod error;
pub mod graph;
pub mod symbol;
pub mod tree;

pub use codec::{decode, encode, MAGIC};
pub use error::{Error, Result};
pub use graph::graph;
pub use symbol::{Symbol, SymbolSize};
