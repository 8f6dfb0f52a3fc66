//! 11-11-10 packed normal (no sign bit)

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Serializer};

use super::{MAX_10, MAX_11, snorm_to_unorm, unorm_to_snorm, write_tuple};

const X_SHIFT: u32 = 21;
const Y_SHIFT: u32 = 10;

/// Normal packed into one u32 word.
///
/// Bit layout, MSB to LSB: `[x:11][y:11][z:10]`. Every field is unsigned
/// fixed point mapped symmetrically onto [-1.0, 1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct PackedNormal(u32);

impl PackedNormal {
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Assemble from raw field values; excess high bits are masked off
    #[inline]
    pub const fn from_raw(x: u32, y: u32, z: u32) -> Self {
        Self(((x & MAX_11) << X_SHIFT) | ((y & MAX_11) << Y_SHIFT) | (z & MAX_10))
    }

    #[inline]
    pub const fn raw_x(self) -> u32 {
        (self.0 >> X_SHIFT) & MAX_11
    }

    #[inline]
    pub const fn raw_y(self) -> u32 {
        (self.0 >> Y_SHIFT) & MAX_11
    }

    #[inline]
    pub const fn raw_z(self) -> u32 {
        self.0 & MAX_10
    }

    #[inline]
    pub fn x(self) -> f32 {
        unorm_to_snorm(self.raw_x(), MAX_11)
    }

    #[inline]
    pub fn y(self) -> f32 {
        unorm_to_snorm(self.raw_y(), MAX_11)
    }

    #[inline]
    pub fn z(self) -> f32 {
        unorm_to_snorm(self.raw_z(), MAX_10)
    }

    /// Quantize components in [-1.0, 1.0] (clamped)
    pub fn pack(x: f32, y: f32, z: f32) -> Self {
        Self::from_raw(
            snorm_to_unorm(x, MAX_11),
            snorm_to_unorm(y, MAX_11),
            snorm_to_unorm(z, MAX_10),
        )
    }

    #[inline]
    pub fn unpack(self) -> [f32; 3] {
        [self.x(), self.y(), self.z()]
    }

    #[inline]
    pub fn to_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(self.x(), self.y(), self.z())
    }
}

impl From<glam::Vec3> for PackedNormal {
    fn from(v: glam::Vec3) -> Self {
        Self::pack(v.x, v.y, v.z)
    }
}

impl fmt::Display for PackedNormal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.unpack())
    }
}

impl Serialize for PackedNormal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.unpack().serialize(serializer)
    }
}
