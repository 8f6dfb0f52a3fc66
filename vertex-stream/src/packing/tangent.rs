//! 10-11-10-1 packed tangent with handedness bit

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{MAX_10, MAX_11, snorm_to_unorm, unorm_to_snorm};

const SIGN_BIT: u32 = 1 << 31;
const X_SHIFT: u32 = 21;
const Y_SHIFT: u32 = 10;

/// Tangent packed into one u32 word.
///
/// Bit layout, MSB to LSB: `[sign:1][x:10][y:11][z:10]`. A set sign bit
/// means the bitangent is flipped (`sign() == -1`); it never affects the
/// x/y/z magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct PackedTangent(u32);

impl PackedTangent {
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
    pub const fn from_raw(x: u32, y: u32, z: u32, negative: bool) -> Self {
        let sign = if negative { SIGN_BIT } else { 0 };
        Self(sign | ((x & MAX_10) << X_SHIFT) | ((y & MAX_11) << Y_SHIFT) | (z & MAX_10))
    }

    #[inline]
    pub const fn raw_x(self) -> u32 {
        (self.0 >> X_SHIFT) & MAX_10
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
    pub const fn is_negative(self) -> bool {
        self.0 & SIGN_BIT != 0
    }

    /// Handedness: `1` when the sign bit is clear, `-1` when set
    #[inline]
    pub const fn sign(self) -> i8 {
        if self.is_negative() { -1 } else { 1 }
    }

    #[inline]
    pub fn x(self) -> f32 {
        unorm_to_snorm(self.raw_x(), MAX_10)
    }

    #[inline]
    pub fn y(self) -> f32 {
        unorm_to_snorm(self.raw_y(), MAX_11)
    }

    #[inline]
    pub fn z(self) -> f32 {
        unorm_to_snorm(self.raw_z(), MAX_10)
    }

    /// Quantize components in [-1.0, 1.0] (clamped); any negative `sign`
    /// sets the handedness bit
    pub fn pack(x: f32, y: f32, z: f32, sign: i8) -> Self {
        Self::from_raw(
            snorm_to_unorm(x, MAX_10),
            snorm_to_unorm(y, MAX_11),
            snorm_to_unorm(z, MAX_10),
            sign < 0,
        )
    }

    /// Components and sign as `([x, y, z], sign)`
    #[inline]
    pub fn unpack(self) -> ([f32; 3], i8) {
        ([self.x(), self.y(), self.z()], self.sign())
    }

    #[inline]
    pub fn to_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(self.x(), self.y(), self.z())
    }

    /// Tangent with handedness in `w`, the layout shaders expect
    #[inline]
    pub fn to_vec4(self) -> glam::Vec4 {
        self.to_vec3().extend(f32::from(self.sign()))
    }
}

impl From<glam::Vec4> for PackedTangent {
    fn from(v: glam::Vec4) -> Self {
        Self::pack(v.x, v.y, v.z, if v.w < 0.0 { -1 } else { 1 })
    }
}

impl fmt::Display for PackedTangent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ([x, y, z], sign) = self.unpack();
        match f.precision() {
            Some(p) => write!(f, "<{:.*}, {:.*}, {:.*}, {}>", p, x, p, y, p, z, sign),
            None => write!(f, "<{}, {}, {}, {}>", x, y, z, sign),
        }
    }
}

impl Serialize for PackedTangent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PackedTangent", 2)?;
        state.serialize_field("xyz", &[self.x(), self.y(), self.z()])?;
        state.serialize_field("sign", &self.sign())?;
        state.end()
    }
}
