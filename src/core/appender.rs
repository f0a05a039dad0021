//! Appender trait for console-like output sinks

use super::{error::Result, log_level::LogLevel, log_value::ParamValue};
use serde::{Deserialize, Serialize};

/// Output stream of a console-like sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Errors go to stderr, everything else to stdout
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Stream::Stderr,
            LogLevel::Debug | LogLevel::Info => Stream::Stdout,
        }
    }
}

/// A sink receiving one logical line as a list of discrete values.
///
/// The first value is the `[time app.module]` prefix, the rest are the
/// normalized parameters of the call.
///
/// `append` runs while the logger holds its appender lock. Log calls made
/// from inside `append` are dropped and counted as write failures. Calling
/// `Logger::set_appender` or `Logger::flush` from it blocks forever.
pub trait Appender: Send + Sync {
    fn append(&mut self, stream: Stream, args: &[ParamValue]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
