use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};

/// Guards the archive against destructive moves
#[derive(Debug, Clone)]
pub struct SafetyManager {
    dry_run: bool,
}

impl SafetyManager {
    /// Create a new SafetyManager with the provided configuration
    pub fn new(config: &Config) -> Self {
        Self {
            dry_run: config.dry_run,
        }
    }

    /// Whether changes to the filesystem are allowed
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Refuse to replace a file that is already in the archive
    pub fn check_destination(&self, destination: &Path) -> Result<()> {
        if destination.symlink_metadata().is_ok() {
            return Err(Error::DestinationExists(destination.to_path_buf()));
        }
        Ok(())
    }
}
