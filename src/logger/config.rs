/// Logger configuration assembled from command-line arguments
///
/// Debug and verbose gating is per-module: `--debug-api` turns on Debug
/// level lines tagged Api, `--verbose` turns on Verbose everywhere, and
/// `--verbose-rpc` turns it on for a single tag.

use super::levels::LogLevel;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level threshold (errors bypass this)
    pub min_level: LogLevel,
    /// Tags with --debug-<key> present
    pub debug_tags: HashSet<String>,
    /// Tags with --verbose-<key> present
    pub verbose_tags: HashSet<String>,
    /// When non-empty, only these tags are logged (--log-tags a,b,c)
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Build the logger configuration by scanning CMD_ARGS
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    for arg in arguments::get_cmd_args() {
        if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_string());
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(key.to_string());
        }
    }

    if arguments::patterns::is_verbose_mode() {
        config.min_level = LogLevel::Verbose;
    } else if arguments::patterns::is_quiet_mode() {
        config.min_level = LogLevel::Error;
    }

    if let Some(tags) = arguments::get_arg_value("--log-tags") {
        config.enabled_tags = tags
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    set_logger_config(config);
}

/// Get a snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(_) => LoggerConfig::default(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::tags::LogTag;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
        assert!(config.enabled_tags.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut config = LoggerConfig::default();
        config.debug_tags.insert("api".to_string());
        set_logger_config(config);

        let snapshot = get_logger_config();
        assert!(snapshot.debug_tags.contains(&LogTag::Api.to_debug_key()));
        assert!(!snapshot.debug_tags.contains(&LogTag::Rpc.to_debug_key()));

        // Restore defaults for other tests
        set_logger_config(LoggerConfig::default());
    }
}
