use std::path::Path;

use crate::error::SkipReason;
use crate::metadata::MetadataReader;
use crate::types::CaptureDate;

/// Work out when the picture at `path` was taken.
///
/// With `require_all` both EXIF dates must be present and non-blank. Either
/// way `DateTimeOriginal` wins over `DateTime` when both are there.
pub fn resolve(
    path: &Path,
    reader: &dyn MetadataReader,
    require_all: bool,
) -> Result<CaptureDate, SkipReason> {
    if !path.is_file() {
        return Err(SkipReason::NotAFile);
    }

    let fields = reader
        .read_capture_fields(path)
        .ok_or(SkipReason::NoMetadata)?;

    let modified = non_blank(fields.modified.as_deref());
    let original = non_blank(fields.original.as_deref());

    let present = modified.is_some() as u8 + original.is_some() as u8;
    if present == 0 || (require_all && present < 2) {
        return Err(SkipReason::MissingDateFields);
    }

    let value = original.or(modified).ok_or(SkipReason::MissingDateFields)?;
    CaptureDate::parse(value).ok_or_else(|| SkipReason::UnparseableDate(value.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value
        .map(|v| v.trim().trim_end_matches('\0'))
        .filter(|v| !v.trim().is_empty())
}
