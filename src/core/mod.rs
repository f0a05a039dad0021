//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod log_value;
pub mod logger;
pub mod metrics;
pub mod subject;
pub mod timestamp;

#[cfg(test)]
pub(crate) mod testing;

pub use appender::{Appender, Stream};
pub use config::{ConfigBuilder, LoggerConfig};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use log_value::{ErrorRecord, Json, LogValue, ParamValue, Structured};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use subject::{LogCallback, LogSubject, Subscription};
pub use timestamp::{
    format_prefix, format_time_of_day, format_time_of_day_in, Clock, FixedClock, SystemClock,
};
