//! Main logger implementation
//!
//! Every `Logger` is a named handle onto one process-wide state: the
//! configuration, the console appender, the clock, the `on_log` subject and
//! the metrics. Calls are synchronous; nothing is buffered.

use super::{
    appender::{Appender, Stream},
    config::{ConfigBuilder, LoggerConfig},
    error::Result,
    log_entry::LogEntry,
    log_level::LogLevel,
    log_value::{LogValue, ParamValue},
    metrics::LoggerMetrics,
    subject::LogSubject,
    timestamp::{format_prefix, Clock, SystemClock},
};
use crate::appenders::ConsoleAppender;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::cell::Cell;
use std::sync::Arc;

struct SharedState {
    config: RwLock<LoggerConfig>,
    appender: Mutex<Box<dyn Appender>>,
    clock: RwLock<Arc<dyn Clock>>,
    on_log: LogSubject,
    metrics: LoggerMetrics,
}

static SHARED: Lazy<SharedState> = Lazy::new(|| SharedState {
    config: RwLock::new(LoggerConfig::new()),
    appender: Mutex::new(Box::new(ConsoleAppender::new())),
    clock: RwLock::new(Arc::new(SystemClock)),
    on_log: LogSubject::new(),
    metrics: LoggerMetrics::new(),
});

thread_local! {
    // Set while this thread is inside `Appender::append`
    static IN_APPEND: Cell<bool> = const { Cell::new(false) };
}

/// Named logger for one module.
///
/// The handle holds nothing but its module name; level threshold, app name,
/// app version and module allow-list live in the process-wide configuration.
///
/// # Examples
///
/// ```
/// use app_logger::{LogLevel, Logger};
///
/// let logger = Logger::new("checkout");
/// Logger::set_app_name("shop");
///
/// logger.debug(["cart loaded"]);
/// logger.info(["hidden: the default threshold is DEBUG"]);
/// # Logger::reset_defaults();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Logger {
    name: String,
}

impl Logger {
    /// Create a logger bound to `name`.
    ///
    /// This also resets the process-wide level to `LogLevel::Debug`, undoing
    /// any threshold set before the logger was created.
    pub fn new(name: impl Into<String>) -> Self {
        SHARED.config.write().level = LogLevel::Debug;
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info<I>(&self, params: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.filter_log(LogLevel::Info, params);
    }

    pub fn debug<I>(&self, params: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.filter_log(LogLevel::Debug, params);
    }

    pub fn error<I>(&self, params: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.filter_log(LogLevel::Error, params);
    }

    fn filter_log<I>(&self, level: LogLevel, params: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        let stamp = {
            let config = SHARED.config.read();
            config
                .allows(level, &self.name)
                .then(|| (config.app_name.clone(), config.app_version.clone()))
        };

        match stamp {
            Some((app_name, app_version)) => {
                self.log(&app_name, &app_version, &self.name, level, params)
            }
            None => {
                SHARED.metrics.record_suppressed();
            }
        }
    }

    /// Write and publish one log line without consulting the filter.
    ///
    /// The line goes to stderr for `LogLevel::Error` and to stdout otherwise,
    /// as the `[HH:mm:ss.SSS app_name.module_name]` prefix followed by the
    /// normalized parameters. A `LogEntry` carrying the same values is then
    /// published on `on_log`. Parameters that fail to serialize are replaced by
    /// the error text; nothing is returned to the caller.
    ///
    /// A call made from inside `Appender::append` on the same thread is
    /// dropped: it is reported on stderr, counted as a write failure and not
    /// published.
    pub fn log<I>(
        &self,
        app_name: &str,
        app_version: &str,
        module_name: &str,
        level: LogLevel,
        params: I,
    ) where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        if IN_APPEND.with(Cell::get) {
            eprintln!("[LOGGER ERROR] Log call from inside an appender dropped");
            SHARED.metrics.record_write_failure();
            return;
        }

        let params: Vec<ParamValue> = params
            .into_iter()
            .map(|param| Self::normalize(param.into()))
            .collect();

        let date = SHARED.clock.read().now_millis();

        let mut line = Vec::with_capacity(params.len() + 1);
        line.push(ParamValue::String(format_prefix(date, app_name, module_name)));
        line.extend(params.iter().cloned());
        Self::write_line(Stream::for_level(level), &line);

        SHARED.metrics.record_emitted();
        SHARED.on_log.publish(LogEntry::new(
            date,
            level,
            app_name,
            app_version,
            module_name,
            params,
        ));
    }

    fn normalize(value: LogValue) -> ParamValue {
        match value.try_normalize() {
            Ok(param) => param,
            Err(err) => {
                SHARED.metrics.record_serialization_fallback();
                ParamValue::String(err.to_string())
            }
        }
    }

    /// Hand one line to the appender, isolating its errors and panics
    fn write_line(stream: Stream, line: &[ParamValue]) {
        let mut appender = SHARED.appender.lock();

        IN_APPEND.with(|flag| flag.set(true));
        let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(stream, line)
        }));
        IN_APPEND.with(|flag| flag.set(false));

        match append_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                SHARED.metrics.record_write_failure();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_msg
                );
                SHARED.metrics.record_write_failure();
            }
        }
    }

    /// Current level threshold
    pub fn level() -> LogLevel {
        SHARED.config.read().level
    }

    pub fn set_level(level: LogLevel) {
        SHARED.config.write().level = level;
    }

    pub fn app_name() -> String {
        SHARED.config.read().app_name.clone()
    }

    pub fn set_app_name(app_name: impl Into<String>) {
        SHARED.config.write().app_name = app_name.into();
    }

    pub fn app_version() -> String {
        SHARED.config.read().app_version.clone()
    }

    pub fn set_app_version(app_version: impl Into<String>) {
        SHARED.config.write().app_version = app_version.into();
    }

    /// Module allow-list; empty means every module is allowed
    pub fn module_names() -> Vec<String> {
        SHARED.config.read().module_names.clone()
    }

    pub fn set_module_names<I, S>(names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        SHARED.config.write().module_names = names;
    }

    /// Snapshot of the process-wide configuration
    pub fn config() -> LoggerConfig {
        SHARED.config.read().clone()
    }

    pub fn set_config(config: LoggerConfig) {
        *SHARED.config.write() = config;
    }

    /// Start a builder from the current configuration
    pub fn configure() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Replace the console appender, flushing the previous one
    pub fn set_appender(appender: Box<dyn Appender>) {
        let mut previous = std::mem::replace(&mut *SHARED.appender.lock(), appender);
        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", previous.name(), e);
        }
    }

    pub fn set_clock(clock: Arc<dyn Clock>) {
        *SHARED.clock.write() = clock;
    }

    /// Replay-latest stream of published log entries
    pub fn on_log() -> &'static LogSubject {
        &SHARED.on_log
    }

    pub fn metrics() -> &'static LoggerMetrics {
        &SHARED.metrics
    }

    pub fn flush() -> Result<()> {
        SHARED.appender.lock().flush()
    }

    /// Restore the initial process-wide state.
    ///
    /// Default configuration, console appender, system clock, no latest entry,
    /// no subscribers and zeroed metrics.
    pub fn reset_defaults() {
        Self::set_config(LoggerConfig::default());
        Self::set_appender(Box::new(ConsoleAppender::new()));
        Self::set_clock(Arc::new(SystemClock));
        SHARED.on_log.clear();
        SHARED.metrics.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::testing::isolated;
    use serde_json::json;

    #[test]
    fn test_new_resets_level() {
        let (_guard, _appender) = isolated();
        Logger::set_level(LogLevel::Error);

        let logger = Logger::new("test");

        assert_eq!(logger.name(), "test");
        assert_eq!(Logger::level(), LogLevel::Debug);
    }

    #[test]
    fn test_new_keeps_other_settings() {
        let (_guard, _appender) = isolated();
        Logger::set_app_name("app name");
        Logger::set_module_names(["test"]);

        let _logger = Logger::new("test");

        assert_eq!(Logger::app_name(), "app name");
        assert_eq!(Logger::module_names(), vec!["test"]);
    }

    #[test]
    fn test_filter_passes_global_stamp() {
        let (_guard, appender) = isolated();
        let logger = Logger::new("test");
        Logger::set_app_name("app name");
        Logger::set_app_version("app version");

        logger.debug(["message"]);

        let entry = Logger::on_log().latest().unwrap();
        assert_eq!(entry.app_name, "app name");
        assert_eq!(entry.app_version, "app version");
        assert_eq!(entry.module_name, "test");
        assert_eq!(entry.level, LogLevel::Debug);
        assert_eq!(entry.params, vec![ParamValue::from("message")]);
        assert_eq!(appender.len(), 1);
    }

    #[test]
    fn test_suppressed_call_is_counted() {
        let (_guard, appender) = isolated();
        let logger = Logger::new("test");

        logger.info(["hidden"]);

        assert!(appender.is_empty());
        assert_eq!(Logger::on_log().latest(), None);
        assert_eq!(Logger::metrics().suppressed(), 1);
        assert_eq!(Logger::metrics().emitted(), 0);
    }

    #[test]
    fn test_log_bypasses_filter() {
        let (_guard, appender) = isolated();
        let logger = Logger::new("test");
        Logger::set_level(LogLevel::Error);
        Logger::set_module_names(["someone-else"]);

        logger.log("app", "1.0", "other", LogLevel::Info, ["direct"]);

        let lines = appender.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].stream, Stream::Stdout);
        assert_eq!(Logger::on_log().latest().unwrap().module_name, "other");
    }

    #[test]
    fn test_serialization_fallback_is_counted() {
        let (_guard, _appender) = isolated();
        let logger = Logger::new("test");
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "point");

        logger.debug([LogValue::json(map), LogValue::from(json!({ "ok": true }))]);

        let entry = Logger::on_log().latest().unwrap();
        assert_eq!(
            entry.params,
            vec![
                ParamValue::from("key must be a string"),
                ParamValue::from(r#"{"ok":true}"#)
            ]
        );
        assert_eq!(Logger::metrics().serialization_fallbacks(), 1);
    }

    #[test]
    fn test_failing_appender_does_not_stop_publish() {
        struct FailingAppender;

        impl Appender for FailingAppender {
            fn append(&mut self, _stream: Stream, _args: &[ParamValue]) -> Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Simulated failure").into())
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let (_guard, _appender) = isolated();
        Logger::set_appender(Box::new(FailingAppender));
        let logger = Logger::new("test");

        logger.error(["still published"]);

        assert!(Logger::on_log().latest().is_some());
        assert_eq!(Logger::metrics().write_failures(), 1);
        assert_eq!(Logger::metrics().emitted(), 1);
    }

    #[test]
    fn test_panicking_appender_is_isolated() {
        struct PanickingAppender;

        impl Appender for PanickingAppender {
            fn append(&mut self, _stream: Stream, _args: &[ParamValue]) -> Result<()> {
                panic!("appender exploded");
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "panicking"
            }
        }

        let (_guard, _appender) = isolated();
        Logger::set_appender(Box::new(PanickingAppender));
        let logger = Logger::new("test");

        logger.debug(["survives"]);

        assert!(Logger::on_log().latest().is_some());
        assert_eq!(Logger::metrics().write_failures(), 1);
    }

    #[test]
    fn test_appender_logging_from_append_does_not_deadlock() {
        struct ReentrantAppender {
            inner: MemoryAppender,
        }

        impl Appender for ReentrantAppender {
            fn append(&mut self, stream: Stream, args: &[ParamValue]) -> Result<()> {
                self.inner.append(stream, args)?;
                Logger::new("inner").debug(["inner"]);
                Ok(())
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "reentrant"
            }
        }

        let (_guard, appender) = isolated();
        Logger::set_appender(Box::new(ReentrantAppender {
            inner: appender.clone(),
        }));

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        std::thread::spawn(move || {
            let logger = Logger::new("outer");
            logger.debug(["first"]);
            logger.debug(["second"]);
            let _ = done_tx.send(());
        });

        done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("logging from inside an appender deadlocked");

        // Outer lines are written and published, nested calls dropped
        let lines = appender.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].params(), &[ParamValue::from("first")]);
        assert_eq!(lines[1].params(), &[ParamValue::from("second")]);
        assert_eq!(Logger::metrics().write_failures(), 2);
        assert_eq!(Logger::metrics().emitted(), 2);
        assert_eq!(Logger::on_log().latest().unwrap().module_name, "outer");
    }

    #[test]
    fn test_configure_applies_at_once() {
        let (_guard, _appender) = isolated();

        Logger::configure()
            .level(LogLevel::Info)
            .app_name("shop")
            .app_version("2.0")
            .module("cart")
            .apply();

        let config = Logger::config();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.app_name, "shop");
        assert_eq!(config.app_version, "2.0");
        assert_eq!(config.module_names, vec!["cart"]);
    }

    #[test]
    fn test_reset_defaults() {
        let (_guard, _appender) = isolated();
        let logger = Logger::new("test");
        logger.debug(["x"]);
        Logger::set_app_name("app");

        Logger::reset_defaults();

        assert_eq!(Logger::config(), LoggerConfig::default());
        assert_eq!(Logger::on_log().latest(), None);
        assert_eq!(Logger::metrics().emitted(), 0);
    }
}
