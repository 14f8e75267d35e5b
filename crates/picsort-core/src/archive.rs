//! Where a picture goes in the archive, and getting it there.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logging::{log_file_error, log_fs_modification};
use crate::safety::SafetyManager;
use crate::types::{ArchiveTemplate, CaptureDate};

/// Render the dated part of an archive path, e.g. `2024/03` for year/month.
///
/// Values up to 9 get a leading zero; anything larger is written as is.
pub fn build_path(capture: &CaptureDate, template: &ArchiveTemplate) -> String {
    template
        .fields()
        .iter()
        .map(|field| pad(capture.field(*field)))
        .collect::<Vec<_>>()
        .join("/")
}

fn pad(value: u32) -> String {
    if value <= 9 {
        format!("0{}", value)
    } else {
        value.to_string()
    }
}

/// `archive_root/date_path/event_name`; an empty event name is left out
pub fn destination_dir(archive_root: &Path, date_path: &str, event_name: &str) -> PathBuf {
    let dir = archive_root.join(date_path);
    if event_name.is_empty() {
        dir
    } else {
        dir.join(event_name)
    }
}

/// Moves pictures into the archive
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    safety: SafetyManager,
}

impl ArchiveWriter {
    pub fn new(safety: SafetyManager) -> Self {
        Self { safety }
    }

    /// Move `file` into `archive_root/date_path/event_name`, keeping its name.
    ///
    /// Returns the new path. In a dry run nothing is touched and the path the
    /// file would have been moved to is returned.
    pub fn place(
        &self,
        file: &Path,
        archive_root: &Path,
        date_path: &str,
        event_name: &str,
    ) -> Result<PathBuf> {
        let dir = destination_dir(archive_root, date_path, event_name);
        let file_name = file
            .file_name()
            .ok_or_else(|| Error::FileNotFound(file.to_path_buf()))?;
        let destination = dir.join(file_name);

        self.safety.check_destination(&destination)?;

        if self.safety.is_dry_run() {
            return Ok(destination);
        }

        fs::create_dir_all(&dir).map_err(|source| {
            log_file_error(&dir, "create_dir_all", &source);
            Error::DirectoryCreate {
                path: dir.clone(),
                source,
            }
        })?;

        move_file(file, &destination)?;
        log_fs_modification(
            "move",
            file,
            Some(&format!("to {}", destination.display())),
        );

        Ok(destination)
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_then_remove(from, to),
        Err(source) => {
            log_file_error(from, "rename", &source);
            Err(Error::Move {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
        }
    }
}

/// Move across filesystems: copy, check the length, then drop the source.
///
/// On any failure the copy is removed again so the source stays the only
/// version of the file.
pub(crate) fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    let move_error = |source: io::Error| {
        log_file_error(from, "copy_then_remove", &source);
        Error::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    };

    let expected = fs::metadata(from).map_err(move_error)?.len();
    let copied = fs::copy(from, to).map_err(|e| {
        let _ = fs::remove_file(to);
        move_error(e)
    })?;

    if copied != expected {
        let _ = fs::remove_file(to);
        return Err(move_error(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("copied {} of {} bytes", copied, expected),
        )));
    }

    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(move_error(e));
    }

    Ok(())
}

fn is_cross_device(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::CrossesDevices
}
