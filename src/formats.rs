//! Container format module
//!
//! This module handles the two container layouts a YMV file can carry: a raw
//! WMV/ASF stream passed through untouched, and a concatenation of
//! XOR-obfuscated JPEG segments delimited by a fixed magic marker. It owns
//! the sniffing, the marker split, and the positional XOR decode.

use thiserror::Error;

/// 10-byte delimiter in front of every encrypted JPEG segment.
/// Extracted from the binary; the decode scheme guarantees it never appears
/// in decoded output.
pub const SEGMENT_MAGIC: [u8; 10] = [
    0xEF, 0xC9, 0xED, 0xF3, 0x14, 0x05, 0x5C, 0x51, 0x51, 0x5F,
];

/// ASF/WMV container header prefix (first 4 bytes of the ASF header GUID).
pub const WMV_MAGIC: [u8; 4] = [0x30, 0x26, 0xB2, 0x75];

/// Errors that can occur while extracting a container
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no valid segment found in container")]
    NoSegments,
}

/// Detected container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Unencrypted ASF/WMV stream, copied through as-is
    Wmv,
    /// Marker-delimited XOR-obfuscated JPEG segments
    JpegSegmented,
}

impl ContainerKind {
    /// Classify a raw buffer by its leading bytes.
    ///
    /// WMV if and only if the buffer starts with [`WMV_MAGIC`]; everything
    /// else (including an empty buffer) is treated as segmented, which then
    /// yields zero segments downstream.
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(&WMV_MAGIC) {
            ContainerKind::Wmv
        } else {
            ContainerKind::JpegSegmented
        }
    }
}

/// Result of decoding a whole container buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Single passthrough unit, byte-identical to the input
    Wmv(Vec<u8>),
    /// One decoded buffer per marker-delimited segment, in file order
    Segments(Vec<Vec<u8>>),
}

/// XOR key for the byte at local offset `n` within its segment.
///
/// Cycles through 0x10..=0x1F as `n mod 16` advances, so `key(n) == key(n + 16)`.
#[inline]
fn xor_key(n: usize) -> u8 {
    (((n & 0xF) + 0x10) & 0xFF) as u8
}

/// Decode one segment with the positional XOR scheme.
///
/// The offset is local to the segment and starts at 0, so segments decode
/// independently of their position in the file. XOR is involutive, which
/// makes this function its own inverse for a fixed offset.
pub fn decode_segment(segment: &[u8]) -> Vec<u8> {
    segment
        .iter()
        .enumerate()
        .map(|(n, &b)| b ^ xor_key(n))
        .collect()
}

/// Split a buffer on every occurrence of [`SEGMENT_MAGIC`].
///
/// Explicit left-to-right non-overlapping scan; returns the parts around the
/// markers, including the (possibly empty) part before the first marker and
/// after the last. A buffer with `k` marker occurrences yields `k + 1` parts.
pub fn split_segments(data: &[u8]) -> Vec<&[u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + SEGMENT_MAGIC.len() <= data.len() {
        if data[pos..pos + SEGMENT_MAGIC.len()] == SEGMENT_MAGIC {
            parts.push(&data[start..pos]);
            pos += SEGMENT_MAGIC.len();
            start = pos;
        } else {
            pos += 1;
        }
    }
    parts.push(&data[start..]);
    parts
}

/// Decode a full container buffer.
///
/// WMV buffers short-circuit to a single passthrough unit, even if marker
/// bytes happen to occur later in the stream. Segmented buffers are split on
/// the marker; the bytes before the first marker carry no recoverable
/// content and are discarded, and each remaining part is decoded with the
/// marker prepended back (the marker is part of the encrypted payload).
pub fn decode_container(data: &[u8]) -> Result<Decoded, FormatError> {
    if ContainerKind::sniff(data) == ContainerKind::Wmv {
        return Ok(Decoded::Wmv(data.to_vec()));
    }

    let parts = split_segments(data);
    if parts.len() <= 1 {
        return Err(FormatError::NoSegments);
    }

    let segments = parts[1..]
        .iter()
        .map(|part| {
            let mut raw = Vec::with_capacity(SEGMENT_MAGIC.len() + part.len());
            raw.extend_from_slice(&SEGMENT_MAGIC);
            raw.extend_from_slice(part);
            decode_segment(&raw)
        })
        .collect();

    Ok(Decoded::Segments(segments))
}
