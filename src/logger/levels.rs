/// Severity levels, ordered so that `<=` comparisons against a minimum
/// threshold do the filtering (Error is most severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Critical failures, never filtered
    Error,
    /// Problems worth attention
    Warning,
    /// Standard operational messages (the default threshold)
    Info,
    /// Diagnostics, gated by --debug-<module>
    Debug,
    /// Trace detail, gated by --verbose
    Verbose,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
