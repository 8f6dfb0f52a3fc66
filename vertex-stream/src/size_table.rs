//! Size table (26 × u64 byte counts)
//!
//! Purely mechanical: which slot feeds which attribute lives in
//! [`crate::layout`].

use std::io::Read;

use crate::error::DecodeResult;
use crate::reader::StreamReader;

/// Number of entries in the size table
pub const SIZE_TABLE_LEN: usize = 26;

/// Serialized size of the table in bytes
pub const SIZE_TABLE_BYTES: usize = SIZE_TABLE_LEN * 8;

/// Raw byte sizes, indexed by slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeTable([u64; SIZE_TABLE_LEN]);

impl SizeTable {
    pub const fn new(entries: [u64; SIZE_TABLE_LEN]) -> Self {
        Self(entries)
    }

    /// Read all 26 entries in order
    pub fn read<R: Read>(reader: &mut StreamReader<R>) -> DecodeResult<Self> {
        let mut entries = [0u64; SIZE_TABLE_LEN];
        for entry in &mut entries {
            *entry = reader.read_u64()?;
        }
        Ok(Self(entries))
    }

    /// Byte size stored in `slot`, or `None` past the end of the table
    pub fn get(&self, slot: usize) -> Option<u64> {
        self.0.get(slot).copied()
    }

    pub fn entries(&self) -> &[u64; SIZE_TABLE_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; SIZE_TABLE_BYTES] {
        let mut bytes = [0u8; SIZE_TABLE_BYTES];
        for (chunk, entry) in bytes.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&entry.to_le_bytes());
        }
        bytes
    }
}
