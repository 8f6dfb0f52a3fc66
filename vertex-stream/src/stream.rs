//! Vertex stream record assembly
//!
//! # Layout
//! ```text
//! u32                      index_count
//! u16/u32 * index_count    indices (width from DecodeOptions)
//! u64 * 26                 size table
//! attribute arrays         see `layout`, each count * stride bytes
//! ```
//!
//! All integers are little-endian and nothing is padded.

use std::fmt;
use std::io::Read;

use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;

use crate::error::DecodeResult;
use crate::indices::read_indices;
use crate::layout::{self, Attribute, AttributeLayout};
use crate::options::DecodeOptions;
use crate::packing::{
    BoneIndices, BoneWeights, Color, Half4, PackedNormal, PackedTangent, write_tuple,
};
use crate::reader::StreamReader;
use crate::size_table::SizeTable;

/// Decoded vertex stream: the index buffer plus every attribute array.
///
/// Absent attributes are empty vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VertexStream {
    pub indices: Vec<u32>,
    pub colors1: Vec<Color>,
    pub colors2: Vec<Color>,
    pub uv1: Vec<Vec2>,
    pub uv2: Vec<Vec2>,
    pub positions: Vec<Vec3>,
    pub unknown_alternate_positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    pub bone_indices: Vec<BoneIndices>,
    pub bone_weights: Vec<BoneWeights>,
    pub compressed_normals: Vec<PackedNormal>,
    pub compressed_positions: Vec<Half4>,
    pub compressed_tangents: Vec<PackedTangent>,
}

/// Formatted elements of one attribute
pub type Elements<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// `<x, y, z>` formatting for plain float vectors
struct Components<'a>(&'a [f32]);

impl fmt::Display for Components<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, self.0)
    }
}

/// Per-attribute entry of [`VertexStream::attributes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSummary {
    pub attribute: Attribute,
    pub slot: usize,
    pub stride: usize,
    pub len: usize,
}

impl AttributeSummary {
    pub fn byte_size(&self) -> usize {
        self.len * self.stride
    }
}

/// Decode a complete vertex stream from a byte slice.
///
/// Trailing bytes after the last attribute array are left unread.
pub fn decode_vertex_stream(
    bytes: &[u8],
    options: &DecodeOptions,
) -> DecodeResult<VertexStream> {
    let mut reader = StreamReader::new(bytes);
    let stream = VertexStream::read_from(&mut reader, options)?;

    let trailing = bytes.len() as u64 - reader.position();
    if trailing > 0 {
        tracing::debug!(trailing, "bytes left after vertex stream");
    }
    Ok(stream)
}

impl VertexStream {
    /// Decode from the reader's current position.
    ///
    /// Either the whole record decodes or an error is returned; the reader
    /// position afterwards is only meaningful on success.
    pub fn read_from<R: Read>(
        reader: &mut StreamReader<R>,
        options: &DecodeOptions,
    ) -> DecodeResult<Self> {
        let start = reader.position();

        let indices = read_indices(reader, options.index_width)?;
        let sizes = SizeTable::read(reader)?;

        let mut stream = Self {
            indices,
            ..Self::default()
        };

        for attribute in layout::wire_order(options.skin_order) {
            let count = attribute.layout().element_count(&sizes, options.size_check)?;
            tracing::debug!(%attribute, count, "reading attribute array");

            match attribute {
                Attribute::Colors1 => stream.colors1 = reader.read_fixed_array(count)?,
                Attribute::Colors2 => stream.colors2 = reader.read_fixed_array(count)?,
                Attribute::Uv1 => stream.uv1 = reader.read_fixed_array(count)?,
                Attribute::Uv2 => stream.uv2 = reader.read_fixed_array(count)?,
                Attribute::Positions => stream.positions = reader.read_fixed_array(count)?,
                Attribute::UnknownAlternatePositions => {
                    stream.unknown_alternate_positions = reader.read_fixed_array(count)?
                }
                Attribute::Normals => stream.normals = reader.read_fixed_array(count)?,
                Attribute::Tangents => stream.tangents = reader.read_fixed_array(count)?,
                Attribute::BoneIndices => stream.bone_indices = reader.read_fixed_array(count)?,
                Attribute::BoneWeights => stream.bone_weights = reader.read_fixed_array(count)?,
                Attribute::CompressedNormals => {
                    stream.compressed_normals = reader.read_fixed_array(count)?
                }
                Attribute::CompressedPositions => {
                    stream.compressed_positions = reader.read_fixed_array(count)?
                }
                Attribute::CompressedTangents => {
                    stream.compressed_tangents = reader.read_fixed_array(count)?
                }
            }
        }

        let consumed = reader.position() - start;
        if let Some(expected) = options.expected_size.filter(|&e| e != consumed) {
            tracing::warn!(expected, consumed, "vertex stream size differs from container");
        }

        Ok(stream)
    }

    /// Number of elements in one attribute array
    pub fn len_of(&self, attribute: Attribute) -> usize {
        match attribute {
            Attribute::Colors1 => self.colors1.len(),
            Attribute::Colors2 => self.colors2.len(),
            Attribute::Uv1 => self.uv1.len(),
            Attribute::Uv2 => self.uv2.len(),
            Attribute::Positions => self.positions.len(),
            Attribute::UnknownAlternatePositions => self.unknown_alternate_positions.len(),
            Attribute::Normals => self.normals.len(),
            Attribute::Tangents => self.tangents.len(),
            Attribute::BoneIndices => self.bone_indices.len(),
            Attribute::BoneWeights => self.bone_weights.len(),
            Attribute::CompressedNormals => self.compressed_normals.len(),
            Attribute::CompressedPositions => self.compressed_positions.len(),
            Attribute::CompressedTangents => self.compressed_tangents.len(),
        }
    }

    /// Element counts for every attribute, in slot order
    pub fn attributes(&self) -> Vec<AttributeSummary> {
        layout::ATTRIBUTE_LAYOUT
            .iter()
            .map(|&AttributeLayout { attribute, slot, stride }| AttributeSummary {
                attribute,
                slot,
                stride,
                len: self.len_of(attribute),
            })
            .collect()
    }

    /// Vertex count from full-precision positions, falling back to the
    /// half-float ones
    pub fn vertex_count(&self) -> usize {
        if self.positions.is_empty() {
            self.compressed_positions.len()
        } else {
            self.positions.len()
        }
    }

    /// Number of whole triangles described by the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bytes the attribute arrays occupied on the wire
    pub fn attribute_bytes(&self) -> usize {
        self.attributes().iter().map(AttributeSummary::byte_size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && Attribute::ALL.iter().all(|&a| self.len_of(a) == 0)
    }

    /// Iterate the `Display` form of one attribute's elements
    pub fn display_elements(&self, attribute: Attribute) -> Elements<'_> {
        fn strings<'a, T: fmt::Display>(items: &'a [T]) -> Elements<'a> {
            Box::new(items.iter().map(ToString::to_string))
        }
        fn vectors<'a, T, const N: usize>(
            items: &'a [T],
            to_array: fn(&T) -> [f32; N],
        ) -> Elements<'a> {
            Box::new(items.iter().map(move |v| Components(&to_array(v)).to_string()))
        }

        match attribute {
            Attribute::Colors1 => strings(&self.colors1),
            Attribute::Colors2 => strings(&self.colors2),
            Attribute::Uv1 => vectors(&self.uv1, Vec2::to_array),
            Attribute::Uv2 => vectors(&self.uv2, Vec2::to_array),
            Attribute::Positions => vectors(&self.positions, Vec3::to_array),
            Attribute::UnknownAlternatePositions => {
                vectors(&self.unknown_alternate_positions, Vec3::to_array)
            }
            Attribute::Normals => vectors(&self.normals, Vec3::to_array),
            Attribute::Tangents => vectors(&self.tangents, Vec4::to_array),
            Attribute::BoneIndices => strings(&self.bone_indices),
            Attribute::BoneWeights => strings(&self.bone_weights),
            Attribute::CompressedNormals => strings(&self.compressed_normals),
            Attribute::CompressedPositions => strings(&self.compressed_positions),
            Attribute::CompressedTangents => strings(&self.compressed_tangents),
        }
    }
}
