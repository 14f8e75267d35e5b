/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence-specific errors
#[derive(Debug)]
pub enum PersistenceError {
    /// RocksDB errors
    Database(rocksdb::Error),

    /// Could not prepare the store directory
    Io(std::io::Error),

    /// A stored record could not be encoded or decoded
    Encoding(serde_json::Error),

    /// Event names must not be empty
    InvalidName(String),
}

impl From<rocksdb::Error> for PersistenceError {
    fn from(err: rocksdb::Error) -> Self {
        PersistenceError::Database(err)
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Encoding(err)
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(err) => write!(f, "Database error: {}", err),
            Self::Io(err) => write!(f, "Store I/O error: {}", err),
            Self::Encoding(err) => write!(f, "Record encoding error: {}", err),
            Self::InvalidName(name) => write!(f, "Invalid event name: '{}'", name),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::InvalidName(_) => None,
        }
    }
}

// Implement conversion from PersistenceError to the main Error type
impl From<PersistenceError> for crate::Error {
    fn from(err: PersistenceError) -> Self {
        crate::Error::Store(err.to_string())
    }
}
