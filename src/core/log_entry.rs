//! Log entry structure

use super::error::Result;
use super::log_level::LogLevel;
use super::log_value::ParamValue;
use serde::{Deserialize, Serialize};

/// One accepted log call, as published to `on_log` subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch
    pub date: i64,
    pub level: LogLevel,
    pub app_name: String,
    pub app_version: String,
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub params: Vec<ParamValue>,
}

impl LogEntry {
    pub fn new(
        date: i64,
        level: LogLevel,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
        module_name: impl Into<String>,
        params: Vec<ParamValue>,
    ) -> Self {
        Self {
            date,
            level,
            app_name: app_name.into(),
            app_version: app_version.into(),
            module_name: module_name.into(),
            id: None,
            params,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
