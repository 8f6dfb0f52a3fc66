//! Forward-only little-endian cursor over a byte source

use std::io::{ErrorKind, Read};
use std::mem::size_of;

use bytemuck::Pod;

use crate::error::{DecodeError, DecodeResult};

/// Upper bound on the up-front allocation for a single array read.
///
/// Counts come from an untrusted size table, so buffers grow with the data
/// actually read rather than with the declared length.
const MAX_PREALLOC: usize = 1 << 20;

/// Sequential reader over any [`Read`] source.
///
/// Every read either completes in full or fails with
/// [`DecodeError::UnexpectedEndOfData`]; the cursor only advances on success.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fill `buf` completely or report how much was available
    fn fill(&mut self, buf: &mut [u8]) -> DecodeResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(DecodeError::UnexpectedEndOfData {
                        offset: self.position,
                        requested: buf.len() as u64,
                        available: filled as u64,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += buf.len() as u64;
        Ok(())
    }

    fn read_bytes<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read a u16 in little-endian format
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.read_bytes().map(u16::from_le_bytes)
    }

    /// Read a u32 in little-endian format
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_bytes().map(u32::from_le_bytes)
    }

    /// Read an i32 in little-endian format
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.read_bytes().map(i32::from_le_bytes)
    }

    /// Read a u64 in little-endian format
    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.read_bytes().map(u64::from_le_bytes)
    }

    /// Read `count` contiguous records of a plain-data type.
    ///
    /// `T` must have no padding (enforced by [`Pod`]). A zero count returns an
    /// empty vector without touching the source.
    pub fn read_fixed_array<T: Pod>(&mut self, count: usize) -> DecodeResult<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let offset = self.position;
        let Some(byte_len) = (count as u64).checked_mul(size_of::<T>() as u64) else {
            return Err(DecodeError::UnexpectedEndOfData {
                offset,
                requested: u64::MAX,
                available: 0,
            });
        };

        let capacity = usize::try_from(byte_len).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC));
        let mut buf = Vec::with_capacity(capacity);
        (&mut self.inner).take(byte_len).read_to_end(&mut buf)?;

        if (buf.len() as u64) < byte_len {
            return Err(DecodeError::UnexpectedEndOfData {
                offset,
                requested: byte_len,
                available: buf.len() as u64,
            });
        }

        self.position += byte_len;
        tracing::trace!(offset, byte_len, count, "read fixed array");

        // `buf` is only byte-aligned; collect copies into a correctly aligned Vec<T>
        Ok(bytemuck::pod_collect_to_vec(&buf))
    }
}
