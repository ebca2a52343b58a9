//! Bounded byte streams for header encoding and decoding
//!
//! Every codec reads and writes its header through these cursors instead of
//! indexing buffers by hand. A stream is created over a fixed region and
//! refuses any access past it, so out-of-bounds handling lives here and
//! nowhere else.

use wirestack_core::{Error, Result};

/// Cursor-based reader over a fixed byte region.
///
/// Reads are big-endian unless the method name says otherwise. A failed
/// read consumes nothing.
#[derive(Debug)]
pub struct InputStream<'a> {
    data: &'a [u8],
}

impl<'a> InputStream<'a> {
    /// Create a stream over the given region
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Whether any unread bytes remain
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// The unread region, for delegating to an inner layer's decoder
    pub fn rest(&self) -> &'a [u8] {
        self.data
    }

    /// Consume and return the next `count` bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.data.len() {
            return Err(Error::StreamUnderrun {
                needed: count,
                remaining: self.data.len(),
            });
        }
        let (head, tail) = self.data.split_at(count);
        self.data = tail;
        Ok(head)
    }

    /// Consume the next `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Skip `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a big-endian u16
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Read a little-endian u16
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Read a big-endian 24-bit value into the low bits of a u32
    pub fn read_u24(&mut self) -> Result<u32> {
        let b = self.read_array::<3>()?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }

    /// Read a big-endian u32
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }
}

/// Cursor-based writer over a fixed byte region.
///
/// Writes are big-endian unless the method name says otherwise. A failed
/// write produces nothing.
#[derive(Debug)]
pub struct OutputStream<'a> {
    data: &'a mut [u8],
}

impl<'a> OutputStream<'a> {
    /// Create a stream over the given region
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    /// Number of bytes of capacity left
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Write a byte slice
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.data.len() {
            return Err(Error::StreamOverrun {
                needed: bytes.len(),
                remaining: self.data.len(),
            });
        }
        let region = std::mem::take(&mut self.data);
        let (head, tail) = region.split_at_mut(bytes.len());
        head.copy_from_slice(bytes);
        self.data = tail;
        Ok(())
    }

    /// Skip `count` bytes, leaving them untouched
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.data.len() {
            return Err(Error::StreamOverrun {
                needed: count,
                remaining: self.data.len(),
            });
        }
        let region = std::mem::take(&mut self.data);
        let (_, tail) = region.split_at_mut(count);
        self.data = tail;
        Ok(())
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Write a big-endian u16
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a little-endian u16
    pub fn write_u16_le(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write the low 24 bits of a u32, big-endian
    pub fn write_u24(&mut self, value: u32) -> Result<()> {
        let b = value.to_be_bytes();
        self.write_bytes(&b[1..])
    }

    /// Write a big-endian u32
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }
}
