//! Logging macros for heterogeneous parameter lists.
//!
//! Each argument is converted with `LogValue::from`, so strings, numbers,
//! booleans, `Option`s, `serde_json::Value`s and `ErrorRecord`s can be mixed
//! freely, much like passing several values to a console.
//!
//! # Examples
//!
//! ```
//! use app_logger::prelude::*;
//! use app_logger::{debug, info};
//!
//! let logger = Logger::new("server");
//! Logger::set_level(LogLevel::Info);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "listening on port", port);
//!
//! debug!(logger, "request", serde_json::json!({ "path": "/health" }), true);
//! # Logger::reset_defaults();
//! ```

/// Log an info-level call.
///
/// # Examples
///
/// ```
/// # use app_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use app_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing", 100, "items");
/// # Logger::reset_defaults();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {{
        let params: ::std::vec::Vec<$crate::LogValue> =
            ::std::vec![$($crate::LogValue::from($arg)),*];
        $logger.info(params)
    }};
}

/// Log a debug-level call.
///
/// # Examples
///
/// ```
/// # use app_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use app_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value:", 10);
/// # Logger::reset_defaults();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {{
        let params: ::std::vec::Vec<$crate::LogValue> =
            ::std::vec![$($crate::LogValue::from($arg)),*];
        $logger.debug(params)
    }};
}

/// Log an error-level call.
///
/// # Examples
///
/// ```
/// # use app_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use app_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, ErrorRecord::new("timeout", "at connect()"), 500);
/// # Logger::reset_defaults();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {{
        let params: ::std::vec::Vec<$crate::LogValue> =
            ::std::vec![$($crate::LogValue::from($arg)),*];
        $logger.error(params)
    }};
}
