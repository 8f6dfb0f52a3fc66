//! Skinning tuples (4 × u8)

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use super::write_tuple;

/// Four bone palette indices, stored verbatim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize)]
#[repr(transparent)]
pub struct BoneIndices(pub [u8; 4]);

impl BoneIndices {
    #[inline]
    pub const fn new(indices: [u8; 4]) -> Self {
        Self(indices)
    }

    #[inline]
    pub const fn pack(indices: [u8; 4]) -> Self {
        Self(indices)
    }

    #[inline]
    pub const fn unpack(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for BoneIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.0)
    }
}

/// Four bone weights as unorm8 (`raw / 255`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize)]
#[repr(transparent)]
pub struct BoneWeights(pub [u8; 4]);

impl BoneWeights {
    #[inline]
    pub const fn from_raw(raw: [u8; 4]) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> [u8; 4] {
        self.0
    }

    /// Pack weights in [0.0, 1.0]; out-of-range values are clamped
    #[inline]
    pub fn pack(weights: [f32; 4]) -> Self {
        Self(weights.map(|w| (w.clamp(0.0, 1.0) * 255.0).round() as u8))
    }

    #[inline]
    pub fn unpack(self) -> [f32; 4] {
        self.0.map(|w| w as f32 / 255.0)
    }

    #[inline]
    pub fn to_vec4(self) -> glam::Vec4 {
        glam::Vec4::from_array(self.unpack())
    }

    /// Sum of the normalized weights, nominally 1.0 for skinned vertices
    pub fn total(self) -> f32 {
        self.unpack().iter().sum()
    }
}

impl fmt::Display for BoneWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.unpack())
    }
}
