//! RGBA8 vertex color

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use super::write_tuple;

/// One byte per channel, stored R, G, B, A
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels normalized to [0.0, 1.0]
    #[inline]
    pub fn to_vec4(self) -> glam::Vec4 {
        glam::Vec4::new(
            self.r as f32,
            self.g as f32,
            self.b as f32,
            self.a as f32,
        ) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &[self.r, self.g, self.b, self.a])
    }
}
