//! Test utilities for ymvdec
// Provides helpers that build synthetic container files for tests

use std::io::Write;

use tempfile::NamedTempFile;

use crate::formats::{decode_segment, SEGMENT_MAGIC, WMV_MAGIC};

/// Build a segmented container from raw on-disk segment bodies.
///
/// `leading` goes in front of the first marker and is what the extractor
/// discards; each body is stored after its own marker exactly as given.
/// Bodies must not themselves contain the marker.
pub fn build_container(leading: &[u8], bodies: &[&[u8]]) -> Vec<u8> {
    let mut data = leading.to_vec();
    for body in bodies {
        debug_assert!(!body.windows(SEGMENT_MAGIC.len()).any(|w| w == SEGMENT_MAGIC));
        data.extend_from_slice(&SEGMENT_MAGIC);
        data.extend_from_slice(body);
    }
    data
}

/// Decoded bytes the extractor should produce for a body stored with
/// [`build_container`]: the XOR transform of magic + body.
///
/// The first bytes always come out as FF D8 FF, the JPEG SOI marker; the
/// segment magic is just the start-of-image header in its encrypted form.
pub fn expected_segment(body: &[u8]) -> Vec<u8> {
    let mut raw = SEGMENT_MAGIC.to_vec();
    raw.extend_from_slice(body);
    decode_segment(&raw)
}

/// Write a segmented container to a temp file
pub fn create_test_container(leading: &[u8], bodies: &[&[u8]]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&build_container(leading, bodies)).unwrap();
    file.flush().unwrap();
    file
}

/// Write a WMV stream (magic + body) to a temp file
pub fn create_test_wmv(body: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&WMV_MAGIC).unwrap();
    file.write_all(body).unwrap();
    file.flush().unwrap();
    file
}
