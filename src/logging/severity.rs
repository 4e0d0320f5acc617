//! Log severities
//!
//! Five fixed levels ordered by increasing criticality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// All severities, least critical first
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Get the lowercase name of this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Threshold used when nothing is configured: verbose in debug builds
    pub fn default_threshold() -> Self {
        if cfg!(debug_assertions) {
            Severity::Trace
        } else {
            Severity::Info
        }
    }

    /// The tracing level an event of this severity is emitted at
    ///
    /// tracing has no level above ERROR, so Fatal shares it.
    pub fn level(&self) -> Level {
        match self {
            Severity::Trace => Level::TRACE,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error | Severity::Fatal => Level::ERROR,
        }
    }

    /// Filter that lets through this severity and everything above it
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.level())
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::TRACE | Level::DEBUG => Severity::Trace,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warning,
            Level::ERROR => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}'")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" | "critical" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" fatal ".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_round_trips_through_name() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
    }

    #[test]
    fn test_fatal_shares_error_level() {
        assert_eq!(Severity::Fatal.level(), Level::ERROR);
        assert_eq!(Severity::Error.level(), Level::ERROR);
        assert_eq!(Severity::from(Level::DEBUG), Severity::Trace);
    }

    #[test]
    fn test_level_filter_admits_more_critical_levels() {
        let filter = Severity::Info.level_filter();
        assert!(Level::ERROR <= filter);
        assert!(Level::INFO <= filter);
        assert!(Level::TRACE > filter);
    }
}
