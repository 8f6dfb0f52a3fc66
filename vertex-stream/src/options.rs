//! Decode configuration
//!
//! Replaces the loose per-chunk flag dictionary of the container with a
//! typed options struct. All fields have defaults, so a partial TOML/JSON
//! document deserializes cleanly.

use serde::{Deserialize, Serialize};

/// On-disk width of the index buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexWidth {
    /// u16 indices, widened to u32 on read
    #[default]
    Narrow,
    /// u32 indices
    Wide,
}

impl IndexWidth {
    /// Map the container's `is32bit` flag (absent means `false`)
    pub fn from_is32bit(is_32bit: bool) -> Self {
        if is_32bit { Self::Wide } else { Self::Narrow }
    }

    /// Bytes per index on disk
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Narrow => 2,
            Self::Wide => 4,
        }
    }
}

/// Handling of size table entries that are not a multiple of their stride
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCheck {
    /// Reject with `DecodeError::InconsistentSizeTable`
    #[default]
    Strict,
    /// Integer-divide and ignore the remainder, as legacy readers do
    Truncate,
}

/// Wire order of the two skinning arrays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinOrder {
    /// Bone indices (slot 17) precede bone weights (slot 19)
    #[default]
    IndicesFirst,
    /// Bone weights (slot 19) precede bone indices (slot 17)
    WeightsFirst,
}

/// Options for a single decode call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub index_width: IndexWidth,
    pub size_check: SizeCheck,
    pub skin_order: SkinOrder,
    /// Payload size announced by the container, checked against bytes
    /// consumed. A mismatch is logged, not rejected.
    pub expected_size: Option<u64>,
}

impl DecodeOptions {
    /// Options reproducing the legacy reader byte for byte
    pub fn legacy() -> Self {
        Self {
            size_check: SizeCheck::Truncate,
            skin_order: SkinOrder::WeightsFirst,
            ..Self::default()
        }
    }

    pub fn with_index_width(mut self, index_width: IndexWidth) -> Self {
        self.index_width = index_width;
        self
    }

    pub fn with_size_check(mut self, size_check: SizeCheck) -> Self {
        self.size_check = size_check;
        self
    }

    pub fn with_skin_order(mut self, skin_order: SkinOrder) -> Self {
        self.skin_order = skin_order;
        self
    }

    pub fn with_expected_size(mut self, expected_size: u64) -> Self {
        self.expected_size = Some(expected_size);
        self
    }
}
