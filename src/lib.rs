//! # App Logger
//!
//! A lightweight application logger for named modules.
//!
//! ## Features
//!
//! - **Level and module filtering**: one process-wide threshold and allow-list
//! - **Console output**: `[HH:mm:ss.SSS app.module]` prefix, errors on stderr
//! - **Log events**: every accepted call is republished on a replay-latest stream
//! - **Never fails**: parameters that cannot be serialized are logged as error text
//!
//! ```
//! use app_logger::prelude::*;
//! use app_logger::{debug, error};
//!
//! Logger::set_app_name("shop");
//! let logger = Logger::new("checkout");
//!
//! let _events = Logger::on_log().subscribe(|entry| {
//!     if let Some(entry) = entry {
//!         assert_eq!(entry.module_name, "checkout");
//!     }
//! });
//!
//! debug!(logger, "cart", 3, "items");
//! error!(logger, ErrorRecord::new("payment declined", "at charge()"));
//! # Logger::reset_defaults();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        Appender, Clock, ConfigBuilder, ErrorRecord, FixedClock, LogEntry, LogLevel, LogSubject,
        LogValue, Logger, LoggerConfig, LoggerError, LoggerMetrics, ParamValue, Result, Stream,
        Structured, Subscription, SystemClock,
    };
}

pub use appenders::{CapturedLine, ConsoleAppender, MemoryAppender};
pub use core::{
    format_prefix, format_time_of_day, format_time_of_day_in, Appender, Clock, ConfigBuilder,
    ErrorRecord, FixedClock, Json, LogCallback, LogEntry, LogLevel, LogSubject, LogValue, Logger,
    LoggerConfig, LoggerError, LoggerMetrics, ParamValue, Result, Stream, Structured,
    Subscription, SystemClock,
};
