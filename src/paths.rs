//! Centralized path resolution for solgate
//!
//! All file and directory paths are resolved through this module so behavior
//! stays consistent across platforms:
//! - **macOS**: `~/Library/Application Support/Solgate/`
//! - **Windows**: `%LOCALAPPDATA%\Solgate\`
//! - **Linux**: `$XDG_DATA_HOME/Solgate/` (fallback `~/.local/share/Solgate/`)
//!
//! ```text
//! Solgate/
//! ├── data/
//! │   └── config.json
//! └── logs/
//!     └── solgate_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

// =============================================================================
// BASE DIRECTORY RESOLUTION
// =============================================================================

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    const APP_DIR: &str = "Solgate";

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

// =============================================================================
// DIRECTORY ACCESSORS
// =============================================================================

/// Returns the base directory for all solgate data
pub fn get_base_directory() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Returns the data directory path
///
/// Contains the config file.
pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
///
/// Contains daily log files.
pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Returns the main configuration file path
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.json")
}

// =============================================================================
// DIRECTORY CREATION
// =============================================================================

/// Ensures all required directories exist
///
/// Creates the base directory and both subdirectories. Call this early in
/// startup, before the logger opens its log file.
pub fn ensure_all_directories() -> Result<(), String> {
    let dirs_to_create = vec![
        ("base", get_base_directory()),
        ("data", get_data_directory()),
        ("logs", get_logs_directory()),
    ];

    for (name, path) in dirs_to_create {
        std::fs::create_dir_all(&path).map_err(|e| {
            format!(
                "Failed to create {} directory at {}: {}",
                name,
                path.display(),
                e
            )
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_layout() {
        let base = get_base_directory();
        assert!(get_data_directory().starts_with(&base));
        assert!(get_logs_directory().starts_with(&base));
        assert_eq!(get_config_path().file_name().unwrap(), "config.json");
    }
}
