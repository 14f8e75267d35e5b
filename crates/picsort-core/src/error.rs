use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the picsort library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source directory or file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Could not create an archive directory
    #[error("Could not create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not move a file into the archive
    #[error("Could not move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Safety check failure: the destination would be overwritten
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    /// Reading the operator's answer failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Event store failure
    #[error("Event store error: {0}")]
    Store(String),
}

impl Error {
    /// Whether this error must abort the whole run rather than a single file.
    ///
    /// Directory creation failures stop everything: carrying on would leave
    /// the archive half-sorted with no record of where things went.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Move { .. } | Error::DestinationExists(_) | Error::Store(_)
        )
    }
}

/// Reasons a file is left where it is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("not a file")]
    NotAFile,

    #[error("no readable metadata")]
    NoMetadata,

    #[error("could not find dates in EXIF data")]
    MissingDateFields,

    #[error("unparseable capture date '{0}'")]
    UnparseableDate(String),

    #[error("no earlier photo to take a date from")]
    NoReferenceCapture,
}
