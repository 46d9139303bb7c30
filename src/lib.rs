//! ymvdec — extractor for the proprietary YMV media container
//!
//! A YMV file is either a raw WMV/ASF stream or a concatenation of
//! XOR-obfuscated JPEG segments behind a fixed magic delimiter. This crate
//! sniffs which of the two it is, decodes the segments, and writes one
//! output file per recovered unit.

pub mod api;
pub mod formats;
pub mod testlib;

pub use api::{extract_file, ExtractReport, OutputEntry};
pub use formats::{
    decode_container, decode_segment, split_segments, ContainerKind, Decoded, FormatError,
    SEGMENT_MAGIC, WMV_MAGIC,
};

/// Returns the crate semantic version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
