//! End-to-end decoding of vertex stream records.

mod common;

use common::{StreamBuilder, f32_bytes, u32_bytes};
use glam::{Vec3, Vec4};
use proptest::prelude::*;
use vertex_stream::{
    Attribute, BoneIndices, BoneWeights, DecodeError, DecodeOptions, Half4, IndexWidth,
    PackedNormal, PackedTangent, SizeCheck, SkinOrder, StreamReader, VertexStream,
    decode_vertex_stream,
};

fn narrow() -> DecodeOptions {
    DecodeOptions::default()
}

fn wide() -> DecodeOptions {
    DecodeOptions::default().with_index_width(IndexWidth::Wide)
}

#[test]
fn test_triangle_with_positions_only() {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .indices(&[0, 1, 2])
        .array(9, f32_bytes(&positions));
    let bytes = builder.build();
    assert_eq!(bytes.len(), 4 + 6 + 208 + 36);

    let stream = decode_vertex_stream(&bytes, &narrow()).unwrap();
    assert_eq!(stream.indices, vec![0, 1, 2]);
    assert_eq!(stream.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    for attribute in Attribute::ALL {
        if attribute != Attribute::Positions {
            assert_eq!(stream.len_of(attribute), 0, "{attribute} should be empty");
        }
    }
}

#[test]
fn test_all_attributes_in_slot_order() {
    let normal = PackedNormal::pack(0.0, 1.0, 0.0);
    let tangent = PackedTangent::pack(1.0, 0.0, 0.0, -1);
    let half = Half4::pack([1.0, 2.0, 3.0, 1.0]);

    let builder = StreamBuilder::new(IndexWidth::Wide)
        .indices(&[0, 1, 2, 70_000])
        .array(1, vec![1, 2, 3, 4])
        .array(3, vec![5, 6, 7, 8])
        .array(5, f32_bytes(&[0.25, 0.5]))
        .array(7, f32_bytes(&[0.75, 1.0]))
        .array(9, f32_bytes(&[1.0, 2.0, 3.0]))
        .array(11, f32_bytes(&[4.0, 5.0, 6.0]))
        .array(13, f32_bytes(&[0.0, 0.0, 1.0]))
        .array(15, f32_bytes(&[1.0, 0.0, 0.0, -1.0]))
        .array(17, vec![0, 1, 2, 3])
        .array(19, vec![255, 0, 0, 0])
        .array(21, u32_bytes(&[normal.to_bits()]))
        .array(23, bytemuck::bytes_of(&half).to_vec())
        .array(25, u32_bytes(&[tangent.to_bits()]));
    let bytes = builder.build();

    let mut reader = StreamReader::new(bytes.as_slice());
    let stream = VertexStream::read_from(&mut reader, &wide()).unwrap();
    assert_eq!(reader.position() as usize, builder.expected_len());
    assert_eq!(reader.position() as usize, bytes.len());

    assert_eq!(stream.indices, vec![0, 1, 2, 70_000]);
    assert_eq!(stream.colors1[0].r, 1);
    assert_eq!(stream.colors2[0].a, 8);
    assert_eq!(stream.uv1[0].to_array(), [0.25, 0.5]);
    assert_eq!(stream.uv2[0].to_array(), [0.75, 1.0]);
    assert_eq!(stream.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
    assert_eq!(stream.unknown_alternate_positions, vec![Vec3::new(4.0, 5.0, 6.0)]);
    assert_eq!(stream.normals, vec![Vec3::Z]);
    assert_eq!(stream.tangents, vec![Vec4::new(1.0, 0.0, 0.0, -1.0)]);
    assert_eq!(stream.bone_indices, vec![BoneIndices::new([0, 1, 2, 3])]);
    assert_eq!(stream.bone_weights, vec![BoneWeights::from_raw([255, 0, 0, 0])]);
    assert_eq!(stream.compressed_normals, vec![normal]);
    assert_eq!(stream.compressed_positions, vec![half]);
    assert_eq!(stream.compressed_tangents, vec![tangent]);
    assert_eq!(stream.compressed_tangents[0].sign(), -1);
}

#[test]
fn test_empty_arrays_do_not_shift_offsets() {
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .array(1, vec![9, 9, 9, 9])
        .array(13, f32_bytes(&[0.0, 1.0, 0.0]))
        .array(25, u32_bytes(&[0xFFFF_FFFF]));
    let bytes = builder.build();

    let stream = decode_vertex_stream(&bytes, &narrow()).unwrap();
    assert_eq!(stream.colors1.len(), 1);
    assert!(stream.colors2.is_empty());
    assert!(stream.positions.is_empty());
    assert_eq!(stream.normals, vec![Vec3::Y]);
    assert_eq!(stream.compressed_tangents[0].unpack(), ([1.0, 1.0, 1.0], -1));
}

#[test]
fn test_skin_order() {
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .array(17, vec![10, 11, 12, 13])
        .array(19, vec![20, 21, 22, 23]);
    let bytes = builder.build();

    let stream = decode_vertex_stream(&bytes, &narrow()).unwrap();
    assert_eq!(stream.bone_indices, vec![BoneIndices::new([10, 11, 12, 13])]);
    assert_eq!(stream.bone_weights, vec![BoneWeights::from_raw([20, 21, 22, 23])]);

    let options = narrow().with_skin_order(SkinOrder::WeightsFirst);
    let stream = decode_vertex_stream(&bytes, &options).unwrap();
    assert_eq!(stream.bone_weights, vec![BoneWeights::from_raw([10, 11, 12, 13])]);
    assert_eq!(stream.bone_indices, vec![BoneIndices::new([20, 21, 22, 23])]);
}

#[test]
fn test_skin_order_with_different_counts() {
    // Two weight tuples written first, then one index tuple
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .array(19, vec![1, 2, 3, 4, 5, 6, 7, 8])
        .array(17, vec![9, 9, 9, 9]);
    let bytes = builder.build();

    let stream = decode_vertex_stream(&bytes, &DecodeOptions::legacy()).unwrap();
    assert_eq!(stream.bone_weights.len(), 2);
    assert_eq!(stream.bone_indices, vec![BoneIndices::new([9, 9, 9, 9])]);
}

#[test]
fn test_truncated_size_table_fails() {
    let builder = StreamBuilder::new(IndexWidth::Narrow).indices(&[0, 1, 2]);
    let bytes = builder.build();
    let short = &bytes[..bytes.len() - 1];

    let err = decode_vertex_stream(short, &narrow()).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEndOfData { .. }));
}

#[test]
fn test_truncated_attribute_array_fails() {
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .array(9, f32_bytes(&[1.0; 9]))
        .array(21, u32_bytes(&[1, 2]));
    let mut bytes = builder.build();
    bytes.truncate(bytes.len() - 2);

    let err = decode_vertex_stream(&bytes, &narrow()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedEndOfData {
            requested: 8,
            available: 6,
            ..
        }
    ));
}

#[test]
fn test_inconsistent_size_table_strict_and_truncate() {
    // 37 bytes declared for positions, 3 whole vectors plus one stray byte
    let mut payload = f32_bytes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    payload.push(0xAB);
    let builder = StreamBuilder::new(IndexWidth::Narrow).array(9, payload);
    let bytes = builder.build();

    let err = decode_vertex_stream(&bytes, &narrow()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InconsistentSizeTable {
            slot: 9,
            size: 37,
            stride: 12,
            ..
        }
    ));

    let options = narrow().with_size_check(SizeCheck::Truncate);
    let mut reader = StreamReader::new(bytes.as_slice());
    let stream = VertexStream::read_from(&mut reader, &options).unwrap();
    assert_eq!(stream.positions.len(), 3);
    // The remainder byte stays unread
    assert_eq!(reader.position() as usize, bytes.len() - 1);
}

#[test]
fn test_huge_size_entry_fails_cleanly() {
    let builder = StreamBuilder::new(IndexWidth::Narrow).size(15, u64::MAX - 15);
    let bytes = builder.build();

    let err = decode_vertex_stream(&bytes, &narrow()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedEndOfData { available: 0, .. } | DecodeError::CountOverflow { .. }
    ));
}

#[test]
fn test_expected_size_mismatch_is_not_an_error() {
    let builder = StreamBuilder::new(IndexWidth::Narrow).indices(&[4, 5, 6]);
    let bytes = builder.build();

    let options = narrow().with_expected_size(9999);
    let stream = decode_vertex_stream(&bytes, &options).unwrap();
    assert_eq!(stream.indices, vec![4, 5, 6]);
}

#[test]
fn test_stream_serializes_to_json() {
    let builder = StreamBuilder::new(IndexWidth::Narrow)
        .indices(&[0])
        .array(21, u32_bytes(&[0xFFFF_FFFF]));
    let stream = decode_vertex_stream(&builder.build(), &narrow()).unwrap();

    let json = serde_json::to_value(&stream).unwrap();
    assert_eq!(json["indices"], serde_json::json!([0]));
    assert_eq!(json["compressed_normals"], serde_json::json!([[1.0, 1.0, 1.0]]));
    assert_eq!(json["positions"], serde_json::json!([]));
}

proptest! {
    #[test]
    fn prop_index_width_equivalence(indices in prop::collection::vec(0u32..=65535, 0..64)) {
        let narrow_bytes = StreamBuilder::new(IndexWidth::Narrow).indices(&indices).build();
        let wide_bytes = StreamBuilder::new(IndexWidth::Wide).indices(&indices).build();

        let from_narrow = decode_vertex_stream(&narrow_bytes, &narrow()).unwrap();
        let from_wide = decode_vertex_stream(&wide_bytes, &wide()).unwrap();
        prop_assert_eq!(&from_narrow.indices, &indices);
        prop_assert_eq!(from_narrow, from_wide);
    }

    #[test]
    fn prop_consumes_exactly_declared_bytes(
        indices in prop::collection::vec(any::<u32>(), 0..16),
        counts in prop::collection::vec(0usize..6, 13),
        wide_indices in any::<bool>(),
    ) {
        let width = IndexWidth::from_is32bit(wide_indices);
        let indices: Vec<u32> = match width {
            IndexWidth::Narrow => indices.iter().map(|&i| i & 0xFFFF).collect(),
            IndexWidth::Wide => indices,
        };

        let mut builder = StreamBuilder::new(width).indices(&indices);
        for (layout, &count) in vertex_stream::ATTRIBUTE_LAYOUT.iter().zip(&counts) {
            builder = builder.array(layout.slot, vec![0x11; count * layout.stride]);
        }
        let mut bytes = builder.build();
        // Trailing garbage must not be consumed
        bytes.extend_from_slice(&[0xEE; 7]);

        let options = DecodeOptions::default().with_index_width(width);
        let mut reader = StreamReader::new(bytes.as_slice());
        let stream = VertexStream::read_from(&mut reader, &options).unwrap();

        prop_assert_eq!(reader.position() as usize, builder.expected_len());
        for (layout, &count) in vertex_stream::ATTRIBUTE_LAYOUT.iter().zip(&counts) {
            prop_assert_eq!(stream.len_of(layout.attribute), count);
        }
    }
}
