//! Fixed-size input symbols and the frequency scanner.
//!
//! Huffman coding here operates on *symbols*: chunks of 1 to 8 bytes cut
//! from the uncompressed input. Wider symbols can capture multi-byte
//! patterns at the price of a larger alphabet and a bigger serialized
//! tree. Input whose length is not a multiple of the symbol size ends in
//! a short tail that is carried verbatim instead of being coded.

use std::collections::HashMap;
use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// Byte width of a symbol, validated to the supported 1..=8 range.
///
/// This value is established once per invocation: from a flag when
/// encoding or graphing, from the stream header when decoding. It is
/// passed explicitly wherever symbols are cut or rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSize(u8);

impl SymbolSize {
    /// Validate a width in bytes.
    ///
    /// # Errors
    /// `Error::InvalidSymbolSize` unless `1 <= size <= 8`.
    pub fn new(size: u8) -> Result<Self> {
        if (1..=8).contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::InvalidSymbolSize(size))
        }
    }

    /// The width in bytes.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

/// A fixed-size chunk of the uncompressed input.
///
/// Storage is always 8 bytes; only the first [`SymbolSize`] of them are
/// active. Inactive bytes are kept zero so the derived equality and hash
/// agree with byte-sequence equality of the active prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Symbol {
    bytes: [u8; 8],
    len: u8,
}

impl Symbol {
    /// Build a symbol from up to 8 bytes.
    pub(crate) fn from_bytes(chunk: &[u8]) -> Self {
        debug_assert!(chunk.len() <= 8);
        let mut bytes = [0u8; 8];
        bytes[..chunk.len()].copy_from_slice(chunk);
        Self {
            bytes,
            len: chunk.len() as u8,
        }
    }

    /// The active bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

/// Everything one scan of the input produces.
#[derive(Debug, Default)]
pub struct Symbols {
    /// How often each distinct symbol appears in the input.
    pub freqs: HashMap<Symbol, u64>,
    /// Trailing bytes left over when the input length is not a multiple
    /// of the symbol size; strictly shorter than one symbol.
    pub extra: Vec<u8>,
    /// Length of the entire input in bytes, tail included.
    pub total_size: u64,
}

/// Read `buf.len()` bytes unless the source ends first.
///
/// Returns how many bytes were placed in `buf`; anything short of
/// `buf.len()` means end of input. Retries on `Interrupted`.
pub(crate) fn read_chunk<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(filled)
}

/// Scan a byte source in symbol-size chunks.
///
/// Each full chunk increments its symbol's frequency; a final short chunk
/// becomes `extra`. `total_size` counts every byte consumed.
pub fn read_symbols<R: Read>(input: &mut R, size: SymbolSize) -> Result<Symbols> {
    let mut symbols = Symbols::default();
    let mut buf = [0u8; 8];
    let chunk = &mut buf[..size.get()];

    loop {
        let count = read_chunk(input, chunk)?;
        symbols.total_size += count as u64;
        if count < size.get() {
            symbols.extra = chunk[..count].to_vec();
            break;
        }
        *symbols.freqs.entry(Symbol::from_bytes(chunk)).or_insert(0) += 1;
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u8) -> SymbolSize {
        SymbolSize::new(n).unwrap()
    }

    #[test]
    fn test_symbol_size_bounds() {
        assert!(SymbolSize::new(0).is_err());
        assert!(SymbolSize::new(9).is_err());
        for n in 1..=8 {
            assert_eq!(SymbolSize::new(n).unwrap().get(), n as usize);
        }
    }

    #[test]
    fn test_scan_counts_and_tail() {
        let mut input = &b"aaaaa"[..];
        let symbols = read_symbols(&mut input, size(2)).unwrap();

        assert_eq!(symbols.total_size, 5);
        assert_eq!(symbols.extra, b"a");
        assert_eq!(symbols.freqs.len(), 1);
        assert_eq!(symbols.freqs[&Symbol::from_bytes(b"aa")], 2);
    }

    #[test]
    fn test_scan_exact_multiple_has_no_tail() {
        let mut input = &b"abab"[..];
        let symbols = read_symbols(&mut input, size(2)).unwrap();

        assert_eq!(symbols.total_size, 4);
        assert!(symbols.extra.is_empty());
        assert_eq!(symbols.freqs[&Symbol::from_bytes(b"ab")], 2);
    }

    #[test]
    fn test_scan_empty_input() {
        let mut input = &b""[..];
        let symbols = read_symbols(&mut input, size(3)).unwrap();

        assert_eq!(symbols.total_size, 0);
        assert!(symbols.extra.is_empty());
        assert!(symbols.freqs.is_empty());
    }

    #[test]
    fn test_scan_input_shorter_than_one_symbol() {
        let mut input = &b"ab"[..];
        let symbols = read_symbols(&mut input, size(4)).unwrap();

        assert_eq!(symbols.total_size, 2);
        assert_eq!(symbols.extra, b"ab");
        assert!(symbols.freqs.is_empty());
    }

    #[test]
    fn test_symbol_equality_ignores_storage_past_len() {
        let a = Symbol::from_bytes(b"ab");
        let b = Symbol::from_bytes(b"ab");
        let c = Symbol::from_bytes(b"ac");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_bytes(), b"ab");
    }
}
