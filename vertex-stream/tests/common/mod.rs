//! Byte-level fixture builder for vertex stream records

#![allow(dead_code)]

use vertex_stream::{IndexWidth, SIZE_TABLE_LEN, SizeTable};

/// Builds a vertex stream record the way a producer lays it out
#[derive(Debug, Default)]
pub struct StreamBuilder {
    indices: Vec<u32>,
    width: IndexWidth,
    sizes: [u64; SIZE_TABLE_LEN],
    /// (slot, payload) in the order they are written
    arrays: Vec<(usize, Vec<u8>)>,
}

impl StreamBuilder {
    pub fn new(width: IndexWidth) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn indices(mut self, indices: &[u32]) -> Self {
        self.indices = indices.to_vec();
        self
    }

    /// Append an attribute payload and record its byte size in `slot`
    pub fn array(mut self, slot: usize, payload: Vec<u8>) -> Self {
        self.sizes[slot] = payload.len() as u64;
        self.arrays.push((slot, payload));
        self
    }

    /// Override a size table entry without touching the payload
    pub fn size(mut self, slot: usize, size: u64) -> Self {
        self.sizes[slot] = size;
        self
    }

    /// Bytes a complete decode should consume
    pub fn expected_len(&self) -> usize {
        4 + self.indices.len() * self.width.byte_size()
            + SIZE_TABLE_LEN * 8
            + self.arrays.iter().map(|(_, p)| p.len()).sum::<usize>()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = (self.indices.len() as u32).to_le_bytes().to_vec();
        for &index in &self.indices {
            match self.width {
                IndexWidth::Narrow => bytes.extend_from_slice(&(index as u16).to_le_bytes()),
                IndexWidth::Wide => bytes.extend_from_slice(&index.to_le_bytes()),
            }
        }
        bytes.extend_from_slice(&SizeTable::new(self.sizes).to_bytes());
        for (_, payload) in &self.arrays {
            bytes.extend_from_slice(payload);
        }
        bytes
    }
}

pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u32_bytes(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
