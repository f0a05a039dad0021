//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// Lower rank means more severe. A call is emitted when its rank is less than
/// or equal to the configured threshold's rank, so a `Debug` threshold lets
/// `Error` and `Debug` through but not `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Error = 0,
    #[default]
    Debug = 1,
    Info = 2,
}

impl LogLevel {
    pub const ALL: [LogLevel; 3] = [LogLevel::Error, LogLevel::Debug, LogLevel::Info];

    /// Numeric rank used for threshold comparisons
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(LogLevel::Error),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            _ => None,
        }
    }

    /// Whether a call at this level passes the given threshold
    #[inline]
    pub const fn passes(self, threshold: LogLevel) -> bool {
        self.rank() <= threshold.rank()
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" | "0" => Ok(LogLevel::Error),
            "DEBUG" | "1" => Ok(LogLevel::Debug),
            "INFO" | "2" => Ok(LogLevel::Info),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        assert_eq!(LogLevel::Error.rank(), 0);
        assert_eq!(LogLevel::Debug.rank(), 1);
        assert_eq!(LogLevel::Info.rank(), 2);
        assert_eq!(LogLevel::from_rank(3), None);
    }

    #[test]
    fn test_debug_threshold_blocks_info() {
        assert!(LogLevel::Error.passes(LogLevel::Debug));
        assert!(LogLevel::Debug.passes(LogLevel::Debug));
        assert!(!LogLevel::Info.passes(LogLevel::Debug));
    }

    #[test]
    fn test_error_threshold_only_error() {
        assert!(LogLevel::Error.passes(LogLevel::Error));
        assert!(!LogLevel::Debug.passes(LogLevel::Error));
        assert!(!LogLevel::Info.passes(LogLevel::Error));
    }

    #[test]
    fn test_parse() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!(" Error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("1".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!(matches!(
            "warn".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_default_is_debug() {
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&LogLevel::Error).unwrap(), "\"ERROR\"");
        let level: LogLevel = serde_json::from_str("\"INFO\"").unwrap();
        assert_eq!(level, LogLevel::Info);
    }
}
