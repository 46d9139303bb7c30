use std::fs;
use std::path::Path;

use tempfile::tempdir;

use ymvdec::testlib::{build_container, create_test_container, create_test_wmv, expected_segment};
use ymvdec::{extract_file, ContainerKind, FormatError, WMV_MAGIC};

#[test]
fn test_segmented_extraction_end_to_end() {
    let bodies: Vec<&[u8]> = vec![b"first body", b"second", &[0x00, 0x01, 0xFE]];
    let input = create_test_container(b"leading garbage", &bodies);
    let out = tempdir().unwrap();

    let report = extract_file(input.path(), out.path()).unwrap();

    assert_eq!(report.kind, ContainerKind::JpegSegmented);
    assert_eq!(report.outputs.len(), 3);
    assert_eq!(report.failed().count(), 0);

    for (i, body) in bodies.iter().enumerate() {
        let path = out.path().join(format!("output_{:03}.jpg", i + 1));
        let written = fs::read(&path).unwrap();
        assert_eq!(written, expected_segment(body), "segment {} mismatch", i + 1);
        // Decoded segments open with the JPEG SOI bytes
        assert_eq!(&written[..2], &[0xFF, 0xD8]);
    }
}

#[test]
fn test_output_names_are_zero_padded_from_one() {
    let bodies: Vec<&[u8]> = (0..12).map(|_| &b"x"[..]).collect();
    let input = create_test_container(&[], &bodies);
    let out = tempdir().unwrap();

    let report = extract_file(input.path(), out.path()).unwrap();

    let names: Vec<String> = report
        .outputs
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names[0], "output_001.jpg");
    assert_eq!(names[9], "output_010.jpg");
    assert_eq!(names[11], "output_012.jpg");
}

#[test]
fn test_wmv_extraction_end_to_end() {
    let input = create_test_wmv(&[0x00, 0x11, 0x22]);
    let out = tempdir().unwrap();

    let report = extract_file(input.path(), out.path()).unwrap();

    assert_eq!(report.kind, ContainerKind::Wmv);
    assert_eq!(report.outputs.len(), 1);
    let entry = &report.outputs[0];
    assert!(entry.is_ok());
    assert_eq!(entry.path.extension().unwrap(), "wmv");
    let stem = input.path().file_stem().unwrap().to_owned();
    assert_eq!(entry.path.file_stem().unwrap(), stem);

    let mut expected = WMV_MAGIC.to_vec();
    expected.extend_from_slice(&[0x00, 0x11, 0x22]);
    assert_eq!(fs::read(&entry.path).unwrap(), expected);
}

#[test]
fn test_missing_input_is_io_error() {
    let out = tempdir().unwrap();
    let err = extract_file(Path::new("does_not_exist.ymv"), out.path()).unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
    // A fatal error produces no output files
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_markerless_input_is_no_segments() {
    let input = create_test_container(b"only leading bytes, no marker", &[]);
    let out = tempdir().unwrap();
    let err = extract_file(input.path(), out.path()).unwrap_err();
    assert!(matches!(err, FormatError::NoSegments));
}

#[test]
fn test_output_dir_is_created() {
    let input = create_test_container(&[], &[b"payload"]);
    let out = tempdir().unwrap();
    let nested = out.path().join("a").join("b");

    let report = extract_file(input.path(), &nested).unwrap();
    assert!(nested.is_dir());
    assert!(report.outputs[0].path.starts_with(&nested));
}

#[test]
fn test_trailing_marker_yields_empty_final_segment() {
    // A marker at the very end of the file still produces a segment; its
    // decoded content is just the decoded magic (the JFIF header).
    let mut data = build_container(&[], &[b"body"]);
    data.extend_from_slice(&ymvdec::SEGMENT_MAGIC);
    let dir = tempdir().unwrap();
    let input = dir.path().join("trailing.ymv");
    fs::write(&input, &data).unwrap();

    let out = tempdir().unwrap();
    let report = extract_file(&input, out.path()).unwrap();
    assert_eq!(report.outputs.len(), 2);
    let last = fs::read(&report.outputs[1].path).unwrap();
    assert_eq!(last, expected_segment(&[]));
}

#[cfg(unix)]
#[test]
fn test_write_failure_is_partial() {
    use std::os::unix::fs::PermissionsExt;

    let input = create_test_container(&[], &[b"one", b"two"]);
    let out = tempdir().unwrap();

    // First decode normally, then make the first output path unwritable by
    // turning it into a directory; the second segment must still be written.
    let blocker = out.path().join("output_001.jpg");
    fs::create_dir(&blocker).unwrap();
    fs::set_permissions(&blocker, fs::Permissions::from_mode(0o555)).unwrap();

    let report = extract_file(input.path(), out.path()).unwrap();
    assert_eq!(report.failed().count(), 1);
    assert_eq!(report.written().count(), 1);
    let ok = report.written().next().unwrap();
    assert_eq!(ok.path.file_name().unwrap(), "output_002.jpg");
    assert_eq!(fs::read(&ok.path).unwrap(), expected_segment(b"two"));
}
