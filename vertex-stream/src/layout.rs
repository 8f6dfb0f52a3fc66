//! Size table slot to attribute mapping
//!
//! Odd slots 1..=25 each describe one attribute array; slot 0 and the
//! remaining even slots are reserved and ignored. Element counts are always
//! `size_table[slot] / stride`.
//!
//! | slot | attribute                     | stride |
//! |------|-------------------------------|--------|
//! | 1    | colors1                       | 4      |
//! | 3    | colors2                       | 4      |
//! | 5    | uv1                           | 8      |
//! | 7    | uv2                           | 8      |
//! | 9    | positions                     | 12     |
//! | 11   | unknown_alternate_positions   | 12     |
//! | 13   | normals                       | 12     |
//! | 15   | tangents                      | 16     |
//! | 17   | bone_indices                  | 4      |
//! | 19   | bone_weights                  | 4      |
//! | 21   | compressed_normals            | 4      |
//! | 23   | compressed_positions          | 8      |
//! | 25   | compressed_tangents           | 4      |

use std::fmt;

use serde::Serialize;

use crate::error::{DecodeError, DecodeResult};
use crate::options::{SizeCheck, SkinOrder};
use crate::size_table::SizeTable;

/// One attribute array of a vertex stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Colors1,
    Colors2,
    Uv1,
    Uv2,
    Positions,
    UnknownAlternatePositions,
    Normals,
    Tangents,
    BoneIndices,
    BoneWeights,
    CompressedNormals,
    CompressedPositions,
    CompressedTangents,
}

/// Static description of where an attribute's size lives and how big one
/// element is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub attribute: Attribute,
    pub slot: usize,
    pub stride: usize,
}

/// All attributes in ascending slot order
pub static ATTRIBUTE_LAYOUT: [AttributeLayout; 13] = [
    AttributeLayout::new(Attribute::Colors1, 1, 4),
    AttributeLayout::new(Attribute::Colors2, 3, 4),
    AttributeLayout::new(Attribute::Uv1, 5, 8),
    AttributeLayout::new(Attribute::Uv2, 7, 8),
    AttributeLayout::new(Attribute::Positions, 9, 12),
    AttributeLayout::new(Attribute::UnknownAlternatePositions, 11, 12),
    AttributeLayout::new(Attribute::Normals, 13, 12),
    AttributeLayout::new(Attribute::Tangents, 15, 16),
    AttributeLayout::new(Attribute::BoneIndices, 17, 4),
    AttributeLayout::new(Attribute::BoneWeights, 19, 4),
    AttributeLayout::new(Attribute::CompressedNormals, 21, 4),
    AttributeLayout::new(Attribute::CompressedPositions, 23, 8),
    AttributeLayout::new(Attribute::CompressedTangents, 25, 4),
];

impl Attribute {
    pub const ALL: [Attribute; 13] = [
        Self::Colors1,
        Self::Colors2,
        Self::Uv1,
        Self::Uv2,
        Self::Positions,
        Self::UnknownAlternatePositions,
        Self::Normals,
        Self::Tangents,
        Self::BoneIndices,
        Self::BoneWeights,
        Self::CompressedNormals,
        Self::CompressedPositions,
        Self::CompressedTangents,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Colors1 => "colors1",
            Self::Colors2 => "colors2",
            Self::Uv1 => "uv1",
            Self::Uv2 => "uv2",
            Self::Positions => "positions",
            Self::UnknownAlternatePositions => "unknown_alternate_positions",
            Self::Normals => "normals",
            Self::Tangents => "tangents",
            Self::BoneIndices => "bone_indices",
            Self::BoneWeights => "bone_weights",
            Self::CompressedNormals => "compressed_normals",
            Self::CompressedPositions => "compressed_positions",
            Self::CompressedTangents => "compressed_tangents",
        }
    }

    /// Parse a snake_case attribute name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn layout(self) -> &'static AttributeLayout {
        // ALL and ATTRIBUTE_LAYOUT share the same order
        &ATTRIBUTE_LAYOUT[self as usize]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AttributeLayout {
    const fn new(attribute: Attribute, slot: usize, stride: usize) -> Self {
        Self {
            attribute,
            slot,
            stride,
        }
    }

    /// Element count for this attribute according to `sizes`
    pub fn element_count(&self, sizes: &SizeTable, check: SizeCheck) -> DecodeResult<usize> {
        // Slots are compile-time constants below SIZE_TABLE_LEN
        let size = sizes.get(self.slot).unwrap_or(0);
        let stride = self.stride as u64;
        let remainder = size % stride;

        if remainder != 0 {
            match check {
                SizeCheck::Strict => {
                    return Err(DecodeError::InconsistentSizeTable {
                        slot: self.slot,
                        attribute: self.attribute.name(),
                        size,
                        stride: self.stride,
                    });
                }
                SizeCheck::Truncate => {
                    tracing::warn!(
                        attribute = self.attribute.name(),
                        slot = self.slot,
                        size,
                        remainder,
                        "size table entry is not a multiple of the stride, truncating"
                    );
                }
            }
        }

        let count = size / stride;
        usize::try_from(count).map_err(|_| DecodeError::CountOverflow {
            slot: self.slot,
            count,
        })
    }
}

/// Attributes in the order their arrays appear on the wire
pub fn wire_order(skin_order: SkinOrder) -> [Attribute; 13] {
    let mut order = Attribute::ALL;
    if skin_order == SkinOrder::WeightsFirst {
        let indices = Attribute::BoneIndices as usize;
        let weights = Attribute::BoneWeights as usize;
        order.swap(indices, weights);
    }
    order
}
