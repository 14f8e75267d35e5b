//! Reading capture dates out of image files.

use exif::{In, Tag, Value};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The two date-like EXIF fields a capture date can come from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureFields {
    /// `DateTime`: when the file was last changed, usually by the camera
    pub modified: Option<String>,

    /// `DateTimeOriginal`: when the shutter fired
    pub original: Option<String>,
}

/// Source of capture-date metadata for a file
pub trait MetadataReader {
    /// `None` when the file has no readable metadata at all
    fn read_capture_fields(&self, path: &Path) -> Option<CaptureFields>;
}

/// Reads EXIF from JPEG, TIFF, HEIF, PNG and WebP containers
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn read_capture_fields(&self, path: &Path) -> Option<CaptureFields> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!("Cannot open {} for EXIF: {}", path.display(), e);
                return None;
            }
        };

        let exif = match exif::Reader::new().read_from_container(&mut BufReader::new(file)) {
            Ok(exif) => exif,
            Err(e) => {
                debug!("No EXIF in {}: {}", path.display(), e);
                return None;
            }
        };

        let ascii = |tag: Tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|field| match &field.value {
                    Value::Ascii(values) => values.first(),
                    _ => None,
                })
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        };

        Some(CaptureFields {
            modified: ascii(Tag::DateTime),
            original: ascii(Tag::DateTimeOriginal),
        })
    }
}
