use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ArchiveTemplate, MediaKind};

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for a sorting run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the unsorted pictures
    pub unsorted_dir: PathBuf,

    /// Root of the dated archive
    pub archive_dir: PathBuf,

    /// Date fields nesting the archive, e.g. year then month
    pub archive_structure: ArchiveTemplate,

    /// Gap between two pictures that hints at a new event, in seconds
    pub event_length_secs: u64,

    /// Slack around a stored event's range when matching a picture to it, in seconds
    pub event_range_secs: u64,

    /// Extensions read for EXIF dates (lowercase, no dot)
    pub image_extensions: Vec<String>,

    /// Extensions that borrow the previous picture's date
    pub video_extensions: Vec<String>,

    /// Whether both EXIF dates must be present before a picture is sorted
    pub require_all_date_fields: bool,

    /// Whether to run without making changes
    pub dry_run: bool,

    /// Whether to remember events across runs
    pub use_event_store: bool,

    /// Path to the event store
    pub event_store_path: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unsorted_dir: PathBuf::from("."),
            archive_dir: PathBuf::from("../archive"),
            archive_structure: ArchiveTemplate::default(),
            event_length_secs: 60 * 60 * 2,
            event_range_secs: 60 * 60 * 8,
            image_extensions: vec!["jpg".into(), "jpeg".into(), "gif".into()],
            video_extensions: vec![
                "mov".into(),
                "mpg".into(),
                "3g2".into(),
                "mp4".into(),
                "3gp".into(),
                "mts".into(),
            ],
            require_all_date_fields: true,
            dry_run: false,
            use_event_store: false,
            event_store_path: default_event_store_path(),
            log_level: LogLevel::Info,
        }
    }
}

/// Per-user data location for the event store
pub fn default_event_store_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "picsort").map(|dirs| dirs.data_dir().join("events"))
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let mut config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;
        config.normalize_extensions();

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Lowercase extensions and strip any leading dot
    pub fn normalize_extensions(&mut self) {
        for list in [&mut self.image_extensions, &mut self.video_extensions] {
            for ext in list.iter_mut() {
                *ext = ext.trim().trim_start_matches('.').to_lowercase();
            }
            list.retain(|ext| !ext.is_empty());
        }
    }

    /// Classify a path by its extension, `None` if it is not sortable
    pub fn media_kind(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();

        if self.image_extensions.contains(&ext) {
            Some(MediaKind::Image)
        } else if self.video_extensions.contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.archive_structure.is_empty() {
            return Err(Error::Configuration(
                "Archive structure needs at least one date field".to_string(),
            ));
        }

        if self.event_length_secs == 0 {
            return Err(Error::Configuration(
                "Event length must be greater than zero".to_string(),
            ));
        }

        if self.image_extensions.is_empty() && self.video_extensions.is_empty() {
            return Err(Error::Configuration(
                "At least one file extension must be configured".to_string(),
            ));
        }

        if let Some(ext) = self
            .image_extensions
            .iter()
            .find(|ext| self.video_extensions.contains(ext))
        {
            return Err(Error::Configuration(format!(
                "Extension '{}' is listed as both image and video",
                ext
            )));
        }

        // A nested archive would be scanned again on the next run
        if lexical_absolute(&self.archive_dir).starts_with(lexical_absolute(&self.unsorted_dir)) {
            return Err(Error::Configuration(format!(
                "Archive directory {} must not be inside the unsorted directory {}",
                self.archive_dir.display(),
                self.unsorted_dir.display()
            )));
        }

        if self.use_event_store && self.event_store_path.is_none() {
            return Err(Error::Configuration(
                "Event store path must be specified if the event store is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// Absolute form of a path without touching the filesystem
fn lexical_absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
