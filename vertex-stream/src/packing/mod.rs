//! Packed GPU vertex formats
//!
//! Plain value types matching the on-disk records of the compressed
//! attribute arrays:
//! - [`Color`]: RGBA8 vertex color
//! - [`BoneIndices`] / [`BoneWeights`]: 4 × u8 skinning tuples
//! - [`Half4`]: 4 × IEEE 754 half-float
//! - [`PackedNormal`]: 11-11-10 unsigned normalized fixed point
//! - [`PackedTangent`]: 10-11-10 normalized fixed point plus a sign bit
//!
//! Each type decodes to f32 (or `glam` vectors) and packs back with the
//! inverse quantization, which is lossy.

use std::fmt;

mod bone;
mod color;
mod half4;
mod normal;
mod tangent;

pub use bone::{BoneIndices, BoneWeights};
pub use color::Color;
pub use half4::Half4;
pub use normal::PackedNormal;
pub use tangent::PackedTangent;

// ============================================================================
// Fixed-Point Helpers
// ============================================================================

/// Largest raw value of a 10-bit field
pub const MAX_10: u32 = 0x3FF;
/// Largest raw value of an 11-bit field
pub const MAX_11: u32 = 0x7FF;

/// Dequantize a raw field to [-1.0, 1.0]
///
/// `(raw / max) * 2 - 1`, evaluated in f32 like the producer.
#[inline]
pub fn unorm_to_snorm(raw: u32, max: u32) -> f32 {
    (raw as f32 / max as f32) * 2.0 - 1.0
}

/// Quantize a value in [-1.0, 1.0] to a raw field of the given max
///
/// Input is clamped first so out-of-range values never wrap into
/// neighbouring bit fields. Computes `floor((v + 1) * max / 2)`.
#[inline]
pub fn snorm_to_unorm(value: f32, max: u32) -> u32 {
    // NaN survives the clamp and saturates to 0 in the cast
    let scaled = ((value.clamp(-1.0, 1.0) + 1.0) * max as f32) as u32;
    (scaled / 2).min(max)
}

/// Write components as `<a, b, c>`, forwarding the formatter's precision
pub(crate) fn write_tuple<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    parts: &[T],
) -> fmt::Result {
    f.write_str("<")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, part)?,
            None => write!(f, "{}", part)?,
        }
    }
    f.write_str(">")
}
