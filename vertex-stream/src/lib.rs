//! Vertex stream decoder for packed mesh chunks
//!
//! A vertex stream chunk carries one mesh's index buffer followed by up to
//! thirteen attribute arrays. A fixed table of 26 byte sizes says how many
//! elements each array holds; several arrays use quantized GPU formats.
//!
//! # Modules
//!
//! - [`reader`] - Little-endian cursor with fixed-record array reads
//! - [`size_table`] - The 26-entry byte size table
//! - [`indices`] - Count-prefixed u16/u32 index buffer
//! - [`packing`] - Packed formats (11-11-10 normals, 10-11-10-1 tangents,
//!   half4 positions, bone tuples, colors)
//! - [`layout`] - Slot/stride mapping for each attribute
//! - [`stream`] - [`VertexStream`] and the decode entry points
//!
//! # Usage
//!
//! ```no_run
//! use vertex_stream::{DecodeOptions, IndexWidth, decode_vertex_stream};
//!
//! let bytes = std::fs::read("mesh.vstream").unwrap();
//! let options = DecodeOptions::default().with_index_width(IndexWidth::Wide);
//! let stream = decode_vertex_stream(&bytes, &options).unwrap();
//!
//! println!("{} vertices, {} triangles", stream.vertex_count(), stream.triangle_count());
//! for normal in &stream.compressed_normals {
//!     println!("{normal:.3}");
//! }
//! ```
//!
//! Decoding is synchronous and keeps no state between calls, so independent
//! buffers can be decoded on as many threads as the caller likes.

#[cfg(not(target_endian = "little"))]
compile_error!("vertex-stream reinterprets little-endian records in place");

mod error;

pub mod indices;
pub mod layout;
pub mod options;
pub mod packing;
pub mod reader;
pub mod size_table;
pub mod stream;

pub use error::{DecodeError, DecodeResult};
pub use indices::read_indices;
pub use layout::{ATTRIBUTE_LAYOUT, Attribute, AttributeLayout};
pub use options::{DecodeOptions, IndexWidth, SizeCheck, SkinOrder};
pub use packing::{BoneIndices, BoneWeights, Color, Half4, PackedNormal, PackedTangent};
pub use reader::StreamReader;
pub use size_table::{SIZE_TABLE_LEN, SizeTable};
pub use stream::{AttributeSummary, VertexStream, decode_vertex_stream};

/// Chunk type id the container uses for vertex stream data
pub const VERTEX_STREAM_TYPE_GUID: &str = "bb1df897-584f-4770-abf2-663fe449f247";

/// Container flag selecting 32-bit indices, see [`IndexWidth::from_is32bit`]
pub const KEY_IS_32BIT_INDEX: &str = "is32bit";
