//! Bit-granular I/O over byte streams.
//!
//! Both directions use the same ordering: within each byte, bit 0
//! (value 1) travels first and bit 7 (value 128) travels last. Reading
//! back what was written therefore reproduces the exact bit sequence,
//! and the on-disk format stays compatible across implementations.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Error, Result};

/// Presents a byte source as a sequence of bits, LSB-first.
pub struct BitReader<R> {
    inner: R,
    current: u8,
    // Selects the next bit of `current` to return. Zero means the buffer
    // is spent and another byte must be pulled from the source.
    mask: u8,
}

impl<R: Read> BitReader<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            mask: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `Error::UnexpectedEof` if the source is exhausted,
    /// `Error::Io` if the source fails.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.mask == 0 {
            let mut byte = [0u8; 1];
            loop {
                match self.inner.read(&mut byte) {
                    Ok(0) => return Err(Error::UnexpectedEof),
                    Ok(_) => break,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(Error::Io(e)),
                }
            }
            self.current = byte[0];
            self.mask = 1;
        }

        let bit = self.current & self.mask != 0;
        self.mask = self.mask.wrapping_shl(1);
        Ok(bit)
    }

    /// Read 8 bits and reassemble them LSB-first into a byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Read `count` bits (at most 64). Bit `i` of the returned value is
    /// the `i`-th bit read.
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count <= 64);
        let mut value = 0u64;
        for i in 0..count {
            if self.read_bit()? {
                value |= 1 << i;
            }
        }
        Ok(value)
    }
}

/// Accepts a sequence of bits and emits bytes to a sink, LSB-first.
///
/// Dropping the writer pads any partial byte with zero high-order bits
/// and emits it, swallowing errors; call [`BitWriter::finish`] to observe
/// the final write. The sink itself is never flushed.
pub struct BitWriter<W: Write> {
    inner: W,
    current: u8,
    // The bit position the next `write_bit` lands on.
    mask: u8,
}

impl<W: Write> BitWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            current: 0,
            mask: 1,
        }
    }

    /// Buffer a single bit, emitting a byte once eight have accumulated.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current |= self.mask;
        }
        self.mask = self.mask.wrapping_shl(1);
        if self.mask == 0 {
            self.flush_byte()?;
        }
        Ok(())
    }

    /// Write a byte as 8 bits, LSB-first.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value` (at most 64), bit 0 first.
    pub fn write_bits(&mut self, value: u64, count: u32) -> Result<()> {
        debug_assert!(count <= 64);
        for i in 0..count {
            self.write_bit(value & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Emit any partial byte, padded with zero high-order bits.
    ///
    /// The writer remains usable; finishing with nothing buffered is a
    /// no-op, so this is idempotent.
    pub fn finish(mut self) -> Result<()> {
        self.flush_byte()
    }

    fn flush_byte(&mut self) -> Result<()> {
        if self.mask == 1 {
            return Ok(());
        }
        // Reset before writing so a failed write is not retried from
        // `Drop` after `finish` already reported it.
        let byte = self.current;
        self.current = 0;
        self.mask = 1;
        self.inner.write_all(&[byte])?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush_byte();
    }
}
