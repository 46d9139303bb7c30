//! API facade module
//!
//! High-level entry point: read a container file, decode it, and persist the
//! results into an output directory. Write failures are collected per output
//! instead of aborting the run, so a single bad file does not lose the
//! remaining segments.

use std::fs;
use std::path::{Path, PathBuf};

use crate::formats::{decode_container, ContainerKind, Decoded, FormatError};

/// Outcome of one attempted output file
#[derive(Debug)]
pub struct OutputEntry {
    /// Destination path of this output
    pub path: PathBuf,
    /// Decoded length in bytes
    pub len: usize,
    /// `None` on success, the write error otherwise
    pub error: Option<std::io::Error>,
}

impl OutputEntry {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Report of a whole extraction run
#[derive(Debug)]
pub struct ExtractReport {
    /// Detected container layout
    pub kind: ContainerKind,
    /// One entry per attempted output, in file order
    pub outputs: Vec<OutputEntry>,
}

impl ExtractReport {
    /// Outputs that were written successfully
    pub fn written(&self) -> impl Iterator<Item = &OutputEntry> {
        self.outputs.iter().filter(|o| o.is_ok())
    }

    /// Outputs whose write failed
    pub fn failed(&self) -> impl Iterator<Item = &OutputEntry> {
        self.outputs.iter().filter(|o| !o.is_ok())
    }
}

/// Output name for the WMV passthrough path: input basename with the final
/// extension replaced by `.wmv`.
fn wmv_output_name(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    // push, not set_extension: only the input's final extension is dropped
    name.push(".wmv");
    PathBuf::from(name)
}

/// Extract a container file into `output_dir`.
///
/// Reads the whole input into memory, decodes it, and writes one file per
/// decoded unit: `<basename>.wmv` for a passthrough stream, or
/// `output_001.jpg`, `output_002.jpg`, ... for segmented content. The output
/// directory is created if absent.
///
/// Fatal errors (unreadable input, no decodable content, directory creation
/// failure) return `Err`; individual write failures do not, and show up as
/// failed entries in the report.
pub fn extract_file(input: &Path, output_dir: &Path) -> Result<ExtractReport, FormatError> {
    let data = fs::read(input)?;
    let decoded = decode_container(&data)?;
    fs::create_dir_all(output_dir)?;

    let (kind, named) = match decoded {
        Decoded::Wmv(buf) => (
            ContainerKind::Wmv,
            vec![(output_dir.join(wmv_output_name(input)), buf)],
        ),
        Decoded::Segments(segments) => (
            ContainerKind::JpegSegmented,
            segments
                .into_iter()
                .enumerate()
                .map(|(i, buf)| (output_dir.join(format!("output_{:03}.jpg", i + 1)), buf))
                .collect(),
        ),
    };

    let outputs = named
        .into_iter()
        .map(|(path, buf)| {
            let error = fs::write(&path, &buf).err();
            OutputEntry {
                path,
                len: buf.len(),
                error,
            }
        })
        .collect();

    Ok(ExtractReport { kind, outputs })
}
