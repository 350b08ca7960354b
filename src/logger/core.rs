/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level above the threshold requires --debug-<module> for that tag
/// 4. Verbose level above the threshold requires --verbose-<module> for that tag
/// 5. If enabled_tags is non-empty, tag must be in the set

use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    should_log_with(&get_logger_config(), tag, level)
}

fn should_log_with(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    // Rule 1: Errors always log (critical)
    if level == LogLevel::Error {
        return true;
    }

    // Rule 2: Check minimum level threshold, with per-tag opt-ins above it
    if level > config.min_level {
        let opted_in = match level {
            LogLevel::Debug => config.debug_tags.contains(&tag.to_debug_key()),
            LogLevel::Verbose => config.verbose_tags.contains(&tag.to_debug_key()),
            _ => false,
        };
        if !opted_in {
            return false;
        }
    }

    // Rule 5: Check if tag is enabled (empty set = all enabled)
    config.enabled_tags.is_empty() || config.enabled_tags.contains(&tag.to_debug_key())
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_log() {
        let config = LoggerConfig {
            min_level: LogLevel::Error,
            ..Default::default()
        };

        assert!(should_log_with(&config, &LogTag::Api, LogLevel::Error));
        assert!(!should_log_with(&config, &LogTag::Api, LogLevel::Info));
    }

    #[test]
    fn test_debug_requires_flag() {
        let mut config = LoggerConfig::default();
        config.debug_tags.insert("rpc".to_string());

        assert!(should_log_with(&config, &LogTag::Rpc, LogLevel::Debug));
        assert!(!should_log_with(&config, &LogTag::Api, LogLevel::Debug));
    }

    #[test]
    fn test_verbose_threshold_shows_everything() {
        let config = LoggerConfig {
            min_level: LogLevel::Verbose,
            ..Default::default()
        };

        assert!(should_log_with(&config, &LogTag::Tokens, LogLevel::Debug));
        assert!(should_log_with(&config, &LogTag::Tokens, LogLevel::Verbose));
    }

    #[test]
    fn test_enabled_tags_filter() {
        let mut config = LoggerConfig::default();
        config.enabled_tags.insert("server".to_string());

        assert!(should_log_with(&config, &LogTag::Server, LogLevel::Info));
        assert!(!should_log_with(&config, &LogTag::Api, LogLevel::Info));
        // Errors bypass the tag filter
        assert!(should_log_with(&config, &LogTag::Api, LogLevel::Error));
    }
}
