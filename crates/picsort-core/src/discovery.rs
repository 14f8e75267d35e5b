use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::MediaKind;

/// A sortable file found under the unsorted directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Path as reached from the unsorted root
    pub path: PathBuf,

    /// Whether the date comes from EXIF or from the previous picture
    pub kind: MediaKind,
}

/// Lazily walk `root`, yielding sortable files in name order.
///
/// Entries of each directory are sorted by file name and subdirectories are
/// descended where they fall in that order, so `a.jpg`, `b/`, `c.jpg` visits
/// `a.jpg`, the contents of `b`, then `c.jpg`.
pub fn discover_media<'a>(
    root: &Path,
    config: &'a Config,
) -> Result<impl Iterator<Item = MediaFile> + 'a> {
    if !root.is_dir() {
        return Err(Error::FileNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                // Log error but continue with other files
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter_map(move |entry| {
            let kind = config.media_kind(entry.path())?;
            Some(MediaFile {
                path: entry.into_path(),
                kind,
            })
        });

    Ok(walker)
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let file_path = dir.join(name);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"DUMMY IMAGE DATA").unwrap();
        file_path
    }

    fn names(root: &Path, files: &[MediaFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_lexicographic_order() {
        let dir = tempdir().unwrap();
        create_test_file(dir.path(), "b.jpg");
        create_test_file(dir.path(), "a.jpg");
        create_test_file(dir.path(), "c.jpg");

        let config = Config::default();
        let found: Vec<_> = discover_media(dir.path(), &config).unwrap().collect();

        assert_eq!(names(dir.path(), &found), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_subdirectories_visited_in_place() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("b");
        fs::create_dir(&sub).unwrap();
        create_test_file(dir.path(), "c.jpg");
        create_test_file(&sub, "z.jpg");
        create_test_file(&sub, "y.gif");
        create_test_file(dir.path(), "a.jpg");

        let config = Config::default();
        let found: Vec<_> = discover_media(dir.path(), &config).unwrap().collect();

        assert_eq!(
            names(dir.path(), &found),
            vec!["a.jpg", "b/y.gif", "b/z.jpg", "c.jpg"]
        );
    }

    #[test]
    fn test_order_is_case_sensitive() {
        let dir = tempdir().unwrap();
        create_test_file(dir.path(), "b.jpg");
        create_test_file(dir.path(), "B.jpg");
        create_test_file(dir.path(), "a.jpg");

        let config = Config::default();
        let found: Vec<_> = discover_media(dir.path(), &config).unwrap().collect();

        // Uppercase sorts before lowercase by codepoint
        assert_eq!(names(dir.path(), &found), vec!["B.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_filters_extensions_and_classifies() {
        let dir = tempdir().unwrap();
        create_test_file(dir.path(), "IMG_0001.JPG");
        create_test_file(dir.path(), "MVI_0002.MOV");
        create_test_file(dir.path(), "notes.txt");
        create_test_file(dir.path(), "Thumbs.db");

        let config = Config::default();
        let found: Vec<_> = discover_media(dir.path(), &config).unwrap().collect();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, MediaKind::Image);
        assert_eq!(found[1].kind, MediaKind::Video);
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let config = Config::default();
        assert_eq!(discover_media(dir.path(), &config).unwrap().count(), 0);
    }

    #[test]
    fn test_nonexistent_directory() {
        let config = Config::default();
        let result = discover_media(Path::new("/path/that/does/not/exist"), &config);

        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
