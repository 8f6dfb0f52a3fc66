//! Index buffer decoding

use std::io::Read;

use crate::error::DecodeResult;
use crate::options::IndexWidth;
use crate::reader::StreamReader;

/// Read a count-prefixed index buffer.
///
/// The leading u32 holds the number of indices. Narrow indices are
/// zero-extended so callers always see u32 values. No range check against
/// the vertex count happens here.
pub fn read_indices<R: Read>(
    reader: &mut StreamReader<R>,
    width: IndexWidth,
) -> DecodeResult<Vec<u32>> {
    let count = reader.read_u32()? as usize;
    tracing::debug!(count, ?width, "reading index buffer");

    match width {
        IndexWidth::Wide => reader.read_fixed_array::<u32>(count),
        IndexWidth::Narrow => {
            let narrow = reader.read_fixed_array::<u16>(count)?;
            Ok(narrow.into_iter().map(u32::from).collect())
        }
    }
}
