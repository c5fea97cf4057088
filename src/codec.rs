//! Encoder and decoder drivers for the huffer stream format.
//!
//! A compressed stream is the 8-byte magic, then one LSB-first bit
//! stream: 64 bits of input length, 3 bits of symbol size minus one, the
//! serialized tree (present only when at least one full symbol was
//! coded), the concatenated code words in input order, the verbatim tail,
//! and 0 to 7 zero pad bits. The header fields share the bit stream with
//! the tree; nothing is byte-aligned after the magic.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::symbol::{read_chunk, read_symbols, Symbol, SymbolSize};
use crate::tree::{assign_codes, build_tree, read_tree, write_tree, Node};

/// Fixed 8-byte prefix identifying the compressed format.
pub const MAGIC: [u8; 8] = *b"huffer1\0";

/// Compress `input` into `output`.
///
/// Two passes over the input: the first builds the frequency model and
/// the tree, the second emits code words, which is why the source must
/// seek. Trailing bytes short of a full symbol are carried verbatim.
///
/// # Errors
/// `Error::Io` on any read or write failure.
pub fn encode<R, W>(mut input: R, mut output: W, size: SymbolSize) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    let symbols = read_symbols(&mut input, size)?;
    let tree = build_tree(&symbols.freqs);
    let codes = tree.as_ref().map(assign_codes).unwrap_or_default();
    debug!(
        total_size = symbols.total_size,
        distinct = codes.len(),
        "scanned input"
    );

    output.write_all(&MAGIC)?;
    let mut bits = BitWriter::new(output);
    bits.write_bits(symbols.total_size, 64)?;
    bits.write_bits(size.get() as u64 - 1, 3)?;
    if let Some(root) = &tree {
        write_tree(&mut bits, root)?;
    }

    // Second pass: emit a code word per full symbol, then the tail bytes
    // unencoded (still packed LSB-first into the same bit stream).
    input.seek(SeekFrom::Start(0))?;
    let mut buf = [0u8; 8];
    let chunk = &mut buf[..size.get()];
    loop {
        let count = read_chunk(&mut input, chunk)?;
        if count < chunk.len() {
            for &byte in &chunk[..count] {
                bits.write_byte(byte)?;
            }
            break;
        }
        let symbol = Symbol::from_bytes(chunk);
        let code = codes.get(&symbol).ok_or_else(|| {
            Error::Io(io::Error::new(
                ErrorKind::InvalidData,
                "input changed between passes",
            ))
        })?;
        for &bit in code {
            bits.write_bit(bit)?;
        }
    }

    bits.finish()
}

/// Decompress `input` into `output`.
///
/// The symbol size and input length come from the stream header; the
/// coded body is decoded by descending the tree one bit at a time, and
/// the verbatim tail is copied through afterwards.
///
/// # Errors
/// One of `Error::BadMagic`, `Error::TruncatedHeader`,
/// `Error::MalformedTree`, `Error::TruncatedBody`, `Error::CorruptBody`,
/// `Error::InvalidSymbolSize`, or `Error::Io`.
pub fn decode<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut magic = [0u8; 8];
    if read_chunk(&mut input, &mut magic)? < magic.len() {
        return Err(Error::TruncatedHeader);
    }
    if magic != MAGIC {
        return Err(Error::BadMagic);
    }

    let mut bits = BitReader::new(input);
    let total_size = header_field(bits.read_bits(64))?;
    let raw_size = header_field(bits.read_bits(3))?;
    let size = SymbolSize::new(raw_size as u8 + 1)?;
    debug!(total_size, symbol_size = size.get(), "parsed header");

    if total_size == 0 {
        return Ok(());
    }

    // Bytes that were Huffman-coded; the rest is the verbatim tail. No
    // tree was written unless at least one full symbol existed.
    let expanded_size = total_size - total_size % size.get() as u64;
    if expanded_size > 0 {
        let tree = read_tree(&mut bits, size).map_err(|e| match e {
            Error::UnexpectedEof => Error::MalformedTree,
            other => other,
        })?;

        let mut written = 0u64;
        while written < expanded_size {
            let symbol = decode_symbol(&mut bits, &tree)?;
            output.write_all(symbol.as_bytes())?;
            written += size.get() as u64;
        }
    }

    // Verbatim tail. The encoder's final zero padding is shorter than a
    // byte, so it dies in the read that reports end of input.
    loop {
        match bits.read_byte() {
            Ok(byte) => output.write_all(&[byte])?,
            Err(Error::UnexpectedEof) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Walk from the root to a leaf, one bit per step.
///
/// A root that is itself a leaf still costs one bit per occurrence, and
/// that bit must be the `0` assigned to the lone symbol; anything else
/// means the stream does not match its own tree.
fn decode_symbol<'t, R: Read>(bits: &mut BitReader<R>, tree: &'t Node) -> Result<&'t Symbol> {
    let mut node = tree;
    loop {
        let bit = body_bit(bits.read_bit())?;
        match node {
            Node::Leaf { symbol, .. } => {
                if bit {
                    return Err(Error::CorruptBody);
                }
                return Ok(symbol);
            }
            Node::Internal { left, right, .. } => {
                node = if bit { right } else { left };
                if let Node::Leaf { symbol, .. } = node {
                    return Ok(symbol);
                }
            }
        }
    }
}

fn header_field(read: Result<u64>) -> Result<u64> {
    read.map_err(|e| match e {
        Error::UnexpectedEof => Error::TruncatedHeader,
        other => other,
    })
}

fn body_bit(read: Result<bool>) -> Result<bool> {
    read.map_err(|e| match e {
        Error::UnexpectedEof => Error::TruncatedBody,
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn size(n: u8) -> SymbolSize {
        SymbolSize::new(n).unwrap()
    }

    fn roundtrip(data: &[u8], n: u8) -> Vec<u8> {
        let mut compressed = Vec::new();
        encode(Cursor::new(data), &mut compressed, size(n)).unwrap();
        assert_eq!(&compressed[..8], &MAGIC);

        let mut restored = Vec::new();
        decode(compressed.as_slice(), &mut restored).unwrap();
        restored
    }

    #[test]
    fn test_hello_world_roundtrip() {
        let data = b"hello, world!";
        assert_eq!(roundtrip(data, 1), data);
    }

    #[test]
    fn test_roundtrip_all_symbol_sizes() {
        let data = b"the quick brown fox jumps over the lazy dog";
        for n in 1..=8 {
            assert_eq!(roundtrip(data, n), data, "symbol size {n}");
        }
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let mut compressed = Vec::new();
        encode(Cursor::new(b""), &mut compressed, size(1)).unwrap();
        // Magic plus 67 header bits padded up to 9 bytes.
        assert_eq!(compressed.len(), 17);
        assert_eq!(&compressed[..8], &MAGIC);
        assert!(compressed[8..].iter().all(|&b| b == 0));

        let mut restored = Vec::new();
        decode(compressed.as_slice(), &mut restored).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_single_symbol_alphabet_exact_stream() {
        // "aaaa" has no weight ties, so the whole stream is deterministic:
        // total_size 4, symbol size 1, a lone-leaf tree, four 0-bit codes.
        let mut compressed = Vec::new();
        encode(Cursor::new(b"aaaa"), &mut compressed, size(1)).unwrap();

        let mut expected = MAGIC.to_vec();
        expected.extend_from_slice(&[0x04, 0, 0, 0, 0, 0, 0, 0, 0x18, 0x06]);
        assert_eq!(compressed, expected);

        let mut restored = Vec::new();
        decode(compressed.as_slice(), &mut restored).unwrap();
        assert_eq!(restored, b"aaaa");
    }

    #[test]
    fn test_partial_tail_preserved() {
        // Two full "aa" symbols plus the tail "a".
        assert_eq!(roundtrip(b"aaaaa", 2), b"aaaaa");
    }

    #[test]
    fn test_input_shorter_than_symbol_is_all_tail() {
        assert_eq!(roundtrip(b"a", 4), b"a");
        assert_eq!(roundtrip(b"abc", 8), b"abc");
    }

    #[test]
    fn test_all_256_bytes_code_to_8_bits_each() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(roundtrip(&data, 1), data);

        // 256 equal weights build a perfectly balanced tree.
        let symbols = read_symbols(&mut data.as_slice(), size(1)).unwrap();
        let tree = build_tree(&symbols.freqs).unwrap();
        let codes = assign_codes(&tree);
        assert!(codes.values().all(|code| code.len() == 8));
    }

    #[test]
    fn test_binary_data_roundtrip() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * i % 257) as u8).collect();
        for n in [1, 3, 8] {
            assert_eq!(roundtrip(&data, n), data, "symbol size {n}");
        }
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        let mut stream = b"huffer2\0".to_vec();
        stream.extend_from_slice(&[0u8; 9]);

        let mut out = Vec::new();
        assert!(matches!(
            decode(stream.as_slice(), &mut out),
            Err(Error::BadMagic)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncated_magic_is_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            decode(&b"huff"[..], &mut out),
            Err(Error::TruncatedHeader)
        ));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let mut stream = MAGIC.to_vec();
        stream.extend_from_slice(&[0u8; 4]);

        let mut out = Vec::new();
        assert!(matches!(
            decode(stream.as_slice(), &mut out),
            Err(Error::TruncatedHeader)
        ));
    }

    #[test]
    fn test_truncated_tree_is_rejected() {
        let mut compressed = Vec::new();
        encode(Cursor::new(b"hello, world!"), &mut compressed, size(1)).unwrap();
        // Cut inside the serialized tree, just past the header bits.
        compressed.truncate(18);

        let mut out = Vec::new();
        assert!(matches!(
            decode(compressed.as_slice(), &mut out),
            Err(Error::MalformedTree)
        ));
    }

    #[test]
    fn test_truncated_body_is_rejected() {
        let mut compressed = Vec::new();
        encode(Cursor::new(b"hello, world!"), &mut compressed, size(1)).unwrap();
        compressed.truncate(compressed.len() - 1);

        let mut out = Vec::new();
        assert!(matches!(
            decode(compressed.as_slice(), &mut out),
            Err(Error::TruncatedBody)
        ));
    }

    #[test]
    fn test_nonzero_bit_for_lone_symbol_is_rejected() {
        let mut compressed = Vec::new();
        encode(Cursor::new(b"aaaa"), &mut compressed, size(1)).unwrap();
        // The four body bits live in the high nibble of the last byte;
        // flip the first of them.
        let last = compressed.len() - 1;
        compressed[last] |= 0x10;

        let mut out = Vec::new();
        assert!(matches!(
            decode(compressed.as_slice(), &mut out),
            Err(Error::CorruptBody)
        ));
    }
}
