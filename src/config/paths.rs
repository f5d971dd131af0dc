//! Path management for sharetab
//!
//! ## Path Resolution Order
//!
//! 1. `SHARETAB_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/sharetab` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SharetabError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SHARETAB_DATA_DIR";

/// Manages all paths used by sharetab
#[derive(Debug, Clone)]
pub struct SharetabPaths {
    base_dir: PathBuf,
}

impl SharetabPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SharetabError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "sharetab")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SharetabError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use a fixed base directory (tests, alternate profiles)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn trips_file(&self) -> PathBuf {
        self.data_dir().join("trips.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("payments.json")
    }

    /// Create the base and data directories if missing
    pub fn ensure_directories(&self) -> Result<(), SharetabError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SharetabError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SharetabError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if `sharetab init` has been run (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
