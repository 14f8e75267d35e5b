mod common;

use common::{write_file, write_photo};
use picsort_core::metadata::{ExifReader, MetadataReader};
use picsort_core::timestamp::resolve;
use picsort_core::{CaptureDate, SkipReason};
use tempfile::tempdir;

#[test]
fn test_reads_both_dates() {
    let dir = tempdir().unwrap();
    let path = write_photo(
        dir.path(),
        "IMG_0001.jpg",
        Some("2024:03:07 10:00:00"),
        Some("2024:03:07 09:59:58"),
    );

    let fields = ExifReader.read_capture_fields(&path).unwrap();
    assert_eq!(fields.modified.as_deref(), Some("2024:03:07 10:00:00"));
    assert_eq!(fields.original.as_deref(), Some("2024:03:07 09:59:58"));
}

#[test]
fn test_reads_single_dates() {
    let dir = tempdir().unwrap();
    let modified_only = write_photo(dir.path(), "a.jpg", Some("2024:03:07 10:00:00"), None);
    let original_only = write_photo(dir.path(), "b.jpg", None, Some("2024:03:07 11:00:00"));

    let fields = ExifReader.read_capture_fields(&modified_only).unwrap();
    assert_eq!(fields.modified.as_deref(), Some("2024:03:07 10:00:00"));
    assert_eq!(fields.original, None);

    let fields = ExifReader.read_capture_fields(&original_only).unwrap();
    assert_eq!(fields.modified, None);
    assert_eq!(fields.original.as_deref(), Some("2024:03:07 11:00:00"));
}

#[test]
fn test_non_image_has_no_metadata() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "fake.jpg", b"DUMMY IMAGE DATA");

    assert!(ExifReader.read_capture_fields(&path).is_none());
    assert!(ExifReader
        .read_capture_fields(&dir.path().join("missing.jpg"))
        .is_none());
}

#[test]
fn test_resolve_from_real_exif() {
    let dir = tempdir().unwrap();
    let path = write_photo(
        dir.path(),
        "IMG_0001.jpg",
        Some("2024:03:07 10:00:00"),
        Some("2024:03:07 09:59:58"),
    );

    assert_eq!(
        resolve(&path, &ExifReader, true),
        Ok(CaptureDate::new(2024, 3, 7, 9, 59, 58).unwrap())
    );
}

#[test]
fn test_resolve_policy_for_single_date() {
    let dir = tempdir().unwrap();
    let path = write_photo(dir.path(), "IMG_0002.jpg", Some("2024:03:07 10:00:00"), None);

    assert_eq!(
        resolve(&path, &ExifReader, true),
        Err(SkipReason::MissingDateFields)
    );
    assert_eq!(
        resolve(&path, &ExifReader, false),
        Ok(CaptureDate::new(2024, 3, 7, 10, 0, 0).unwrap())
    );
}

#[test]
fn test_resolve_without_exif() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "scan.jpg", b"DUMMY IMAGE DATA");

    assert_eq!(resolve(&path, &ExifReader, true), Err(SkipReason::NoMetadata));
}
