//! Event inference across consecutive pictures.
//!
//! Pictures arrive in name order, which for camera dumps is also capture
//! order. The tracker remembers the last sorted picture and uses it to warn
//! about long gaps and to suggest an event name for the next one.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::persistence::EventStore;
use crate::types::CaptureDate;

/// What the tracker remembers from the last sorted picture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventState {
    last_capture: Option<CaptureDate>,
    last_location: Option<PathBuf>,
    last_event_name: Option<String>,
}

impl EventState {
    pub fn is_empty(&self) -> bool {
        self.last_capture.is_none()
    }

    pub fn last_capture(&self) -> Option<CaptureDate> {
        self.last_capture
    }

    pub fn last_instant(&self) -> Option<i64> {
        self.last_capture.map(|c| c.timestamp())
    }

    pub fn last_location(&self) -> Option<&Path> {
        self.last_location.as_deref()
    }

    pub fn last_event_name(&self) -> Option<&str> {
        self.last_event_name.as_deref()
    }
}

/// Too much time passed since the previous picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryWarning {
    pub gap_secs: i64,
}

/// Where a suggested event name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// Name of the directory holding the picture
    Directory,

    /// Carried over from the previous picture in the same directory
    Previous,

    /// An event remembered from an earlier run
    Store,
}

/// Result of observing one picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSignal {
    pub boundary: Option<BoundaryWarning>,
    pub suggestion: String,
    pub source: SuggestionSource,
}

pub struct EventTracker {
    state: EventState,
    threshold_secs: i64,
    range_secs: i64,
    store: Option<Box<dyn EventStore>>,
}

impl EventTracker {
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            state: EventState::default(),
            threshold_secs: i64::try_from(threshold_secs).unwrap_or(i64::MAX),
            range_secs: 0,
            store: None,
        }
    }

    /// Consult `store` for events from earlier runs, matching within `range_secs`
    pub fn with_store(mut self, store: Box<dyn EventStore>, range_secs: u64) -> Self {
        self.store = Some(store);
        self.range_secs = i64::try_from(range_secs).unwrap_or(i64::MAX);
        self
    }

    pub fn state(&self) -> &EventState {
        &self.state
    }

    /// Gap check and name suggestion for a picture in directory `location`.
    ///
    /// Nothing is remembered until [`EventTracker::confirm`].
    pub fn observe(&self, capture: &CaptureDate, location: &Path) -> EventSignal {
        let instant = capture.timestamp();

        let boundary = self.state.last_instant().and_then(|last| {
            let gap_secs = instant - last;
            (gap_secs >= self.threshold_secs).then_some(BoundaryWarning { gap_secs })
        });

        let default_name = directory_name(location);

        if self.state.last_location() == Some(location) {
            if let Some(previous) = self.state.last_event_name() {
                if previous != default_name {
                    return EventSignal {
                        boundary,
                        suggestion: previous.to_string(),
                        source: SuggestionSource::Previous,
                    };
                }
            }
        }

        if let Some(stored) = self.stored_event_name(instant) {
            return EventSignal {
                boundary,
                suggestion: stored,
                source: SuggestionSource::Store,
            };
        }

        EventSignal {
            boundary,
            suggestion: default_name,
            source: SuggestionSource::Directory,
        }
    }

    /// Remember a picture once it is safely in the archive
    pub fn confirm(&mut self, capture: CaptureDate, location: &Path, event_name: &str) {
        self.state = EventState {
            last_capture: Some(capture),
            last_location: Some(location.to_path_buf()),
            last_event_name: Some(event_name.to_string()),
        };

        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.widen(event_name, capture.timestamp()) {
                warn!("Could not record event '{}': {}", event_name, e);
            }
        }
    }

    fn stored_event_name(&self, instant: i64) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.find_enclosing(instant, self.range_secs) {
            Ok(Some(event)) => {
                debug!("Picture at {} falls in stored event '{}'", instant, event.name);
                Some(event.name)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Event store lookup failed: {}", e);
                None
            }
        }
    }
}

/// Last component of a directory path, empty when there is none
pub fn directory_name(location: &Path) -> String {
    location
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
