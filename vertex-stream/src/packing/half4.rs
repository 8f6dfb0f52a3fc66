//! Half-precision 4-component vector (Float16x4)

use std::fmt;

use bytemuck::{Pod, Zeroable};
use half::f16;
use serde::{Serialize, Serializer};

use super::write_tuple;

/// Four IEEE 754 half floats, 8 bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Half4 {
    pub x: f16,
    pub y: f16,
    pub z: f16,
    pub w: f16,
}

impl Half4 {
    #[inline]
    pub const fn new(x: f16, y: f16, z: f16, w: f16) -> Self {
        Self { x, y, z, w }
    }

    /// Build from raw half-float bit patterns
    #[inline]
    pub const fn from_bits(bits: [u16; 4]) -> Self {
        Self {
            x: f16::from_bits(bits[0]),
            y: f16::from_bits(bits[1]),
            z: f16::from_bits(bits[2]),
            w: f16::from_bits(bits[3]),
        }
    }

    #[inline]
    pub const fn to_bits(self) -> [u16; 4] {
        [
            self.x.to_bits(),
            self.y.to_bits(),
            self.z.to_bits(),
            self.w.to_bits(),
        ]
    }

    /// Narrow f32 components with round-to-nearest-even (lossy)
    #[inline]
    pub fn pack(values: [f32; 4]) -> Self {
        let [x, y, z, w] = values.map(f16::from_f32);
        Self { x, y, z, w }
    }

    /// Widen to f32 (exact)
    #[inline]
    pub fn unpack(self) -> [f32; 4] {
        [
            self.x.to_f32(),
            self.y.to_f32(),
            self.z.to_f32(),
            self.w.to_f32(),
        ]
    }

    #[inline]
    pub fn to_vec4(self) -> glam::Vec4 {
        glam::Vec4::from_array(self.unpack())
    }

    /// Position part, dropping `w`
    #[inline]
    pub fn to_vec3(self) -> glam::Vec3 {
        self.to_vec4().truncate()
    }
}

impl From<glam::Vec4> for Half4 {
    fn from(v: glam::Vec4) -> Self {
        Self::pack(v.to_array())
    }
}

impl fmt::Display for Half4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &[self.x, self.y, self.z, self.w])
    }
}

impl Serialize for Half4 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.unpack().serialize(serializer)
    }
}
