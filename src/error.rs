//! Error types for the huffer codec.

use thiserror::Error;

/// Error variants for encoding, decoding, and graphing.
#[derive(Debug, Error)]
pub enum Error {
    /// The first 8 bytes of a compressed stream were not the huffer magic.
    #[error("bad magic in header")]
    BadMagic,

    /// The stream ended inside the 67-bit size/symbol-size header.
    #[error("truncated header")]
    TruncatedHeader,

    /// The serialized Huffman tree could not be reconstructed.
    #[error("malformed tree")]
    MalformedTree,

    /// The stream ended in the middle of a code word.
    #[error("truncated body")]
    TruncatedBody,

    /// A body bit contradicted the tree. Only possible for the
    /// single-symbol alphabet, whose lone code word is a `0` bit.
    #[error("corrupt body")]
    CorruptBody,

    /// Symbol size outside the supported 1..=8 byte range.
    #[error("invalid symbol size: {0}")]
    InvalidSymbolSize(u8),

    /// The byte source ran out before the requested bits were read.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffer operations.
pub type Result<T> = std::result::Result<T, Error>;
