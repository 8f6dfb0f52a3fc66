//! Library half of the `vstream` tool
//!
//! Option handling and report rendering live here so they can be tested
//! without spawning the binary.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use vertex_stream::{
    Attribute, DecodeOptions, IndexWidth, SizeCheck, SkinOrder, VertexStream,
    decode_vertex_stream,
};

/// Decode flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// JSON file with default decode options (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Indices are 32-bit (the container's `is32bit` flag)
    #[arg(long)]
    pub wide_indices: bool,

    /// Behave exactly like the legacy reader (implies --truncate --weights-first)
    #[arg(long)]
    pub legacy: bool,

    /// Drop partial trailing elements instead of rejecting the size table
    #[arg(long)]
    pub truncate: bool,

    /// Bone weights precede bone indices on disk
    #[arg(long)]
    pub weights_first: bool,

    /// Payload size announced by the container
    #[arg(long, value_name = "BYTES")]
    pub expected_size: Option<u64>,
}

impl DecodeArgs {
    pub fn to_options(&self) -> Result<DecodeOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => DecodeOptions::default(),
        };

        if self.legacy {
            let legacy = DecodeOptions::legacy();
            options.size_check = legacy.size_check;
            options.skin_order = legacy.skin_order;
        }
        if self.wide_indices {
            options.index_width = IndexWidth::Wide;
        }
        if self.truncate {
            options.size_check = SizeCheck::Truncate;
        }
        if self.weights_first {
            options.skin_order = SkinOrder::WeightsFirst;
        }
        if let Some(size) = self.expected_size {
            options.expected_size = Some(size);
        }

        Ok(options)
    }
}

/// What `vstream dump` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpTarget {
    Indices,
    Attribute(Attribute),
}

/// clap value parser for `--attribute`
pub fn parse_dump_target(name: &str) -> Result<DumpTarget, String> {
    if name == "indices" {
        return Ok(DumpTarget::Indices);
    }
    Attribute::from_name(name)
        .map(DumpTarget::Attribute)
        .ok_or_else(|| {
            let known: Vec<&str> = Attribute::ALL.iter().map(|a| a.name()).collect();
            format!("unknown attribute '{}' (expected indices, {})", name, known.join(", "))
        })
}

/// Read and decode a vertex stream file
pub fn load_stream(path: &Path, args: &DecodeArgs) -> Result<VertexStream> {
    let options = args.to_options()?;
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Decoding vertex stream");

    decode_vertex_stream(&bytes, &options)
        .with_context(|| format!("Failed to decode {}", path.display()))
}

/// Summary table of every attribute
pub fn render_info(stream: &VertexStream) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "indices: {}", stream.indices.len());
    let _ = writeln!(out, "vertices: {}", stream.vertex_count());
    let _ = writeln!(out, "triangles: {}", stream.triangle_count());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<4} {:<28} {:>6} {:>8} {:>10}",
        "slot", "attribute", "stride", "count", "bytes"
    );
    for summary in stream.attributes() {
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:>6} {:>8} {:>10}",
            summary.slot,
            summary.attribute.name(),
            summary.stride,
            summary.len,
            summary.byte_size()
        );
    }
    out
}

/// Formatted elements, one per line, at most `limit` of them
pub fn render_dump(stream: &VertexStream, target: DumpTarget, limit: usize) -> String {
    let (name, total, lines): (&str, usize, Vec<String>) = match target {
        DumpTarget::Indices => (
            "indices",
            stream.indices.len(),
            stream.indices.iter().take(limit).map(u32::to_string).collect(),
        ),
        DumpTarget::Attribute(attribute) => (
            attribute.name(),
            stream.len_of(attribute),
            stream.display_elements(attribute).take(limit).collect(),
        ),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({} elements)", name, total);
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "{:>6}: {}", i, line);
    }
    if total > lines.len() {
        let _ = writeln!(out, "  ... {} more", total - lines.len());
    }
    out
}

pub fn to_json(stream: &VertexStream, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(stream)
    } else {
        serde_json::to_string(stream)
    };
    json.context("Failed to serialize vertex stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertex_stream::{BoneWeights, PackedNormal};

    #[test]
    fn test_flags_override_defaults() {
        let args = DecodeArgs {
            wide_indices: true,
            weights_first: true,
            expected_size: Some(512),
            ..DecodeArgs::default()
        };
        let options = args.to_options().unwrap();
        assert_eq!(options.index_width, IndexWidth::Wide);
        assert_eq!(options.size_check, SizeCheck::Strict);
        assert_eq!(options.skin_order, SkinOrder::WeightsFirst);
        assert_eq!(options.expected_size, Some(512));
    }

    #[test]
    fn test_legacy_flag() {
        let args = DecodeArgs {
            legacy: true,
            ..DecodeArgs::default()
        };
        assert_eq!(args.to_options().unwrap(), DecodeOptions::legacy());
    }

    #[test]
    fn test_parse_dump_target() {
        assert_eq!(parse_dump_target("indices"), Ok(DumpTarget::Indices));
        assert_eq!(
            parse_dump_target("compressed_normals"),
            Ok(DumpTarget::Attribute(Attribute::CompressedNormals))
        );
        let err = parse_dump_target("bogus").unwrap_err();
        assert!(err.contains("unknown attribute 'bogus'"));
        assert!(err.contains("bone_weights"));
    }

    #[test]
    fn test_render_dump_limit() {
        let stream = VertexStream {
            bone_weights: vec![BoneWeights::from_raw([255, 0, 0, 0]); 3],
            ..VertexStream::default()
        };
        let out = render_dump(&stream, DumpTarget::Attribute(Attribute::BoneWeights), 2);
        assert_eq!(
            out,
            "bone_weights (3 elements)\n     0: <1, 0, 0, 0>\n     1: <1, 0, 0, 0>\n  ... 1 more\n"
        );
    }

    #[test]
    fn test_render_info() {
        let stream = VertexStream {
            indices: vec![0, 1, 2],
            compressed_normals: vec![PackedNormal::default(); 3],
            ..VertexStream::default()
        };
        let out = render_info(&stream);
        assert!(out.starts_with("indices: 3\nvertices: 0\ntriangles: 1\n"));
        assert!(out.contains("21   compressed_normals"));
        assert_eq!(out.lines().count(), 4 + 1 + 13);
    }
}
