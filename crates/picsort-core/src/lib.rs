//! Core functionality for sorting photos into a dated event archive.
//!
//! This library provides the building blocks of a sorting run:
//! - File discovery in name order
//! - Capture date extraction from EXIF
//! - Event inference across consecutive pictures
//! - Archive path layout and safe file moves

// -- External Dependencies --
use colored::Colorize;
use log::{debug, info};

// -- Standard Library --
use std::io::Write;
use std::path::{Path, PathBuf};

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result, SkipReason};
pub use types::*;

// -- Public Modules --
pub mod archive;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod metadata;
pub mod persistence;
pub mod prompt;
pub mod safety;
pub mod timestamp;
pub mod tracker;
pub mod types;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

use discovery::MediaFile;
use metadata::{ExifReader, MetadataReader};
use persistence::{EventStore, RocksEventStore};
use prompt::Confirmer;
use tracker::{BoundaryWarning, EventTracker};

/// What happened to a single file
#[derive(Debug)]
pub enum FileOutcome {
    /// Moved into the archive (or would have been, in a dry run)
    Placed(PathBuf),

    /// Left in place for lack of a usable date
    Skipped(SkipReason),

    /// The move failed; the file is still where it was
    Failed(Error),
}

/// Main entry point for sorting a directory into the archive
pub struct PicSorter {
    config: Config,
    reader: Box<dyn MetadataReader>,
    tracker: EventTracker,
    writer: archive::ArchiveWriter,
    summary: RunSummary,
}

impl PicSorter {
    /// Create a new PicSorter with the provided configuration.
    ///
    /// Opens the event store when the configuration asks for one.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut tracker = EventTracker::new(config.event_length_secs);
        if config.use_event_store {
            if let Some(path) = &config.event_store_path {
                let store = RocksEventStore::open(path)?;
                tracker = tracker.with_store(Box::new(store), config.event_range_secs);
            }
        }

        let writer = archive::ArchiveWriter::new(safety::SafetyManager::new(&config));

        Ok(Self {
            config,
            reader: Box::new(ExifReader),
            tracker,
            writer,
            summary: RunSummary::default(),
        })
    }

    /// Read capture dates with `reader` instead of EXIF
    pub fn with_reader(mut self, reader: Box<dyn MetadataReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Remember events in `store` instead of the configured one
    pub fn with_event_store(mut self, store: Box<dyn EventStore>) -> Self {
        self.tracker = EventTracker::new(self.config.event_length_secs)
            .with_store(store, self.config.event_range_secs);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tracker(&self) -> &EventTracker {
        &self.tracker
    }

    /// Sort every file under the unsorted directory, one at a time.
    ///
    /// Stops at the first fatal error; per-file problems are reported on
    /// `out` and counted in the summary.
    pub fn run(&mut self, confirmer: &mut dyn Confirmer, out: &mut dyn Write) -> Result<RunSummary> {
        self.summary = RunSummary::default();

        info!(
            "Sorting {} into {}",
            self.config.unsorted_dir.display(),
            self.config.archive_dir.display()
        );

        let config = self.config.clone();
        for file in discovery::discover_media(&config.unsorted_dir, &config)? {
            self.sort_file(&file, confirmer, out)?;
        }

        info!(
            "Finished: {} placed, {} skipped, {} failed",
            self.summary.placed, self.summary.skipped, self.summary.failed
        );

        Ok(self.summary)
    }

    /// Resolve, name and place a single file
    pub fn sort_file(
        &mut self,
        file: &MediaFile,
        confirmer: &mut dyn Confirmer,
        out: &mut dyn Write,
    ) -> Result<FileOutcome> {
        let path = file.path.as_path();

        let capture = match self.capture_date(file) {
            Ok(capture) => capture,
            Err(reason) => {
                self.report_skip(path, &reason, out)?;
                self.summary.skipped += 1;
                return Ok(FileOutcome::Skipped(reason));
            }
        };

        let location = path.parent().unwrap_or_else(|| Path::new(""));
        let signal = self.tracker.observe(&capture, location);
        debug!(
            "Suggesting '{}' for {} ({:?})",
            signal.suggestion,
            path.display(),
            signal.source
        );

        if let Some(boundary) = signal.boundary {
            self.summary.boundaries += 1;
            writeln!(out, "{}", boundary_line(&boundary).red().bold())?;
        }

        let date_path = archive::build_path(&capture, &self.config.archive_structure);

        writeln!(out, "\n---- {} {}", capture, path.display())?;
        let event_name = confirmer.confirm(&signal.suggestion)?;

        let destination = archive::destination_dir(&self.config.archive_dir, &date_path, &event_name);
        writeln!(out, " -> {}", destination.display())?;

        match self
            .writer
            .place(path, &self.config.archive_dir, &date_path, &event_name)
        {
            Ok(placed) => {
                // Videos borrow the last photo's date and never move it forward
                if file.kind == MediaKind::Image {
                    self.tracker.confirm(capture, location, &event_name);
                }
                self.summary.placed += 1;
                Ok(FileOutcome::Placed(placed))
            }
            Err(e) if e.is_fatal() => {
                writeln!(out, "{}", format!("FAIL: {}", e).red().bold())?;
                Err(e)
            }
            Err(e) => {
                writeln!(out, "{}", format!("!!! {}", e).red().bold())?;
                self.summary.failed += 1;
                Ok(FileOutcome::Failed(e))
            }
        }
    }

    fn capture_date(&self, file: &MediaFile) -> std::result::Result<CaptureDate, SkipReason> {
        match file.kind {
            MediaKind::Image => timestamp::resolve(
                &file.path,
                self.reader.as_ref(),
                self.config.require_all_date_fields,
            ),
            MediaKind::Video => {
                if !file.path.is_file() {
                    return Err(SkipReason::NotAFile);
                }
                self.tracker
                    .state()
                    .last_capture()
                    .ok_or(SkipReason::NoReferenceCapture)
            }
        }
    }

    fn report_skip(&self, path: &Path, reason: &SkipReason, out: &mut dyn Write) -> Result<()> {
        logging::log_skip(path, reason);
        let line = match reason {
            SkipReason::NotAFile => format!("!!! {} not a file.", path.display()),
            other => format!("!!! {}: {}", capitalize(&other.to_string()), path.display()),
        };
        writeln!(out, "{}", line.red().bold())?;
        Ok(())
    }
}

fn boundary_line(boundary: &BoundaryWarning) -> String {
    let minutes = boundary.gap_secs / 60;
    format!(
        "!!! NEW EVENT: {}h{:02}m SINCE LAST PICTURE!",
        minutes / 60,
        minutes % 60
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
