//! Process-wide logger configuration
//!
//! This module provides:
//! - `LoggerConfig`: the threshold, app stamp and module allow-list shared by
//!   every `Logger`
//! - `ConfigBuilder`: fluent configuration applied in one step

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::Logger,
    timestamp::Clock,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Configuration shared by all loggers in the process.
///
/// A call passes when its level rank is at most `level`'s rank and either
/// `module_names` is empty or it contains the logger's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    #[serde(deserialize_with = "deserialize_level")]
    pub level: LogLevel,
    #[serde(alias = "appName")]
    pub app_name: String,
    #[serde(alias = "appVersion")]
    pub app_version: String,
    #[serde(alias = "moduleNames")]
    pub module_names: Vec<String>,
}

impl LoggerConfig {
    pub const fn new() -> Self {
        Self {
            level: LogLevel::Debug,
            app_name: String::new(),
            app_version: String::new(),
            module_names: Vec::new(),
        }
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their defaults; `level` accepts a name in any case
    /// or a numeric rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use app_logger::{LogLevel, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_json(r#"{"level": "info", "appName": "shop"}"#).unwrap();
    /// assert_eq!(config.level, LogLevel::Info);
    /// assert_eq!(config.app_name, "shop");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_names.iter().any(|name| name.trim().is_empty()) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "module names must not be blank",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn allows_level(&self, level: LogLevel) -> bool {
        level.passes(self.level)
    }

    #[inline]
    pub fn allows_module(&self, module_name: &str) -> bool {
        self.module_names.is_empty() || self.module_names.iter().any(|m| m == module_name)
    }

    /// The filter gate: both the level and the module check must pass
    #[inline]
    pub fn allows(&self, level: LogLevel, module_name: &str) -> bool {
        self.allows_level(level) && self.allows_module(module_name)
    }

    /// Replace the process-wide configuration with this one
    pub fn apply(self) {
        Logger::set_config(self);
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLevel {
        Rank(u8),
        Name(String),
    }

    match RawLevel::deserialize(deserializer)? {
        RawLevel::Rank(rank) => LogLevel::from_rank(rank)
            .ok_or_else(|| serde::de::Error::custom(LoggerError::invalid_level(rank.to_string()))),
        RawLevel::Name(name) => name.parse().map_err(serde::de::Error::custom),
    }
}

/// Builder for the process-wide configuration
///
/// Starts from the current configuration; `apply` swaps the result in with a
/// single write so other threads never see a half-applied change.
///
/// # Examples
///
/// ```
/// use app_logger::{LogLevel, Logger, MemoryAppender};
///
/// Logger::configure()
///     .level(LogLevel::Info)
///     .app_name("shop")
///     .app_version("1.4.2")
///     .module("checkout")
///     .appender(MemoryAppender::new())
///     .apply();
///
/// assert_eq!(Logger::app_name(), "shop");
/// # Logger::reset_defaults();
/// ```
#[must_use]
pub struct ConfigBuilder {
    config: LoggerConfig,
    appender: Option<Box<dyn Appender>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::from_config(Logger::config())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            appender: None,
            clock: None,
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.config.app_name = app_name.into();
        self
    }

    pub fn app_version(mut self, app_version: impl Into<String>) -> Self {
        self.config.app_version = app_version.into();
        self
    }

    /// Replace the module allow-list; an empty list allows every module
    pub fn module_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.module_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add one module to the allow-list
    pub fn module(mut self, name: impl Into<String>) -> Self {
        self.config.module_names.push(name.into());
        self
    }

    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Configuration this builder would apply
    pub fn build(&self) -> LoggerConfig {
        self.config.clone()
    }

    pub fn apply(self) {
        if let Some(appender) = self.appender {
            Logger::set_appender(appender);
        }
        if let Some(clock) = self.clock {
            Logger::set_clock(clock);
        }
        Logger::set_config(self.config);
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::from_config(LoggerConfig::default())
    }
}
