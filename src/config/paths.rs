//! Path management for Lajan
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `LAJAN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/lajan` or `~/.config/lajan`
//! 3. Windows: `%APPDATA%\lajan`

use std::path::PathBuf;

use crate::error::LajanError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV_VAR: &str = "LAJAN_DATA_DIR";

/// Manages all paths used by Lajan
#[derive(Debug, Clone)]
pub struct LajanPaths {
    /// Base directory for all Lajan data
    base_dir: PathBuf,
}

impl LajanPaths {
    /// Create a new LajanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LajanError> {
        let base_dir = match std::env::var(DATA_DIR_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LajanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/lajan/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/lajan/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LajanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LajanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LajanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Lajan has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LajanError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                LajanError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("lajan"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LajanError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LajanError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("lajan"))
}
