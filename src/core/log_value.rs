//! Log call parameters
//!
//! This module provides:
//! - `LogValue`: an argument as handed to a log call
//! - `ParamValue`: the normalized form carried by console lines and log entries
//! - `Structured`: the capability a non-primitive argument exposes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized parameter value.
///
/// Primitives pass through normalization unchanged; everything structured has
/// already been rendered into a `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{}", s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(fl) => write!(f, "{}", fl),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Null => write!(f, "null"),
        }
    }
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_json_number(number: &serde_json::Number) -> Self {
        match number.as_i64() {
            Some(i) => ParamValue::Int(i),
            None => number
                .as_f64()
                .map(ParamValue::Float)
                .unwrap_or(ParamValue::Null),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl PartialEq<&str> for ParamValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// A non-primitive log argument.
///
/// Anything that can describe itself as JSON can be logged. Implementors that
/// look like errors report their message and stack through `error_parts`; the
/// JSON form is also checked for `message`/`stack` fields, so any value with
/// that shape is rendered as an error regardless of its concrete type.
pub trait Structured: Send + Sync {
    /// Message and stack, when this value is error-like
    fn error_parts(&self) -> Option<(String, String)> {
        None
    }

    /// JSON form of this value, which may fail
    fn to_json_value(&self) -> serde_json::Result<serde_json::Value>;
}

impl Structured for serde_json::Value {
    fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        Ok(self.clone())
    }
}

/// Wraps any `Serialize` value as a structured log argument
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize + Send + Sync> Structured for Json<T> {
    fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.0)
    }
}

/// Error-shaped argument: a message plus an optional stack description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// Capture an error's message, using its source chain as the stack.
    ///
    /// Errors without sources fall back to a captured backtrace, which is only
    /// present when backtraces are enabled (`RUST_BACKTRACE`), and otherwise to
    /// the error's type name. The record is always error-shaped.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let chain: Vec<String> = std::iter::successors(err.source(), |e| e.source())
            .map(|e| format!("caused by: {}", e))
            .collect();

        let stack = if chain.is_empty() {
            let backtrace = std::backtrace::Backtrace::capture();
            match backtrace.status() {
                std::backtrace::BacktraceStatus::Captured => backtrace.to_string(),
                _ => format!("at {}", std::any::type_name::<E>()),
            }
        } else {
            chain.join("\n")
        };

        Self {
            message: err.to_string(),
            stack: Some(stack),
        }
    }
}

impl Structured for ErrorRecord {
    fn error_parts(&self) -> Option<(String, String)> {
        match self.stack {
            Some(ref stack) if !self.message.is_empty() && !stack.is_empty() => {
                Some((self.message.clone(), stack.clone()))
            }
            _ => None,
        }
    }

    fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// A single argument of a log call
pub enum LogValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Structured(Box<dyn Structured>),
}

impl LogValue {
    /// Log any serializable value
    pub fn json<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        LogValue::Structured(Box::new(Json(value)))
    }

    pub fn structured<S: Structured + 'static>(value: S) -> Self {
        LogValue::Structured(Box::new(value))
    }

    /// Log an error by its message and source chain
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        LogValue::structured(ErrorRecord::from_error(err))
    }

    pub fn error_parts(message: impl Into<String>, stack: impl Into<String>) -> Self {
        LogValue::structured(ErrorRecord::new(message, stack))
    }

    /// Normalize this argument, reporting serialization failures
    pub fn try_normalize(&self) -> serde_json::Result<ParamValue> {
        Ok(match self {
            LogValue::String(s) => ParamValue::String(s.clone()),
            LogValue::Int(i) => ParamValue::Int(*i),
            LogValue::Float(f) => ParamValue::Float(*f),
            LogValue::Bool(b) => ParamValue::Bool(*b),
            LogValue::Null => ParamValue::Null,
            LogValue::Structured(value) => {
                if let Some((message, stack)) = value.error_parts() {
                    return Ok(ParamValue::String(format!("{}, stack: {}", message, stack)));
                }
                render_json(value.to_json_value()?)?
            }
        })
    }

    /// Normalize this argument; a serialization failure becomes the error text
    #[must_use]
    pub fn normalize(&self) -> ParamValue {
        self.try_normalize()
            .unwrap_or_else(|err| ParamValue::String(err.to_string()))
    }
}

fn render_json(value: serde_json::Value) -> serde_json::Result<ParamValue> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => ParamValue::Null,
        Value::Bool(b) => ParamValue::Bool(b),
        Value::Number(ref n) => ParamValue::from_json_number(n),
        Value::String(s) => ParamValue::String(s),
        Value::Object(ref fields) => match (fields.get("message"), fields.get("stack")) {
            (Some(message), Some(stack)) if is_truthy(message) && is_truthy(stack) => {
                ParamValue::String(format!("{}, stack: {}", as_text(message), as_text(stack)))
            }
            _ => ParamValue::String(serde_json::to_string(&value)?),
        },
        Value::Array(_) => ParamValue::String(serde_json::to_string(&value)?),
    })
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Debug for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::String(s) => f.debug_tuple("String").field(s).finish(),
            LogValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            LogValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            LogValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            LogValue::Null => write!(f, "Null"),
            LogValue::Structured(value) => match value.to_json_value() {
                Ok(json) => f.debug_tuple("Structured").field(&json).finish(),
                Err(_) => write!(f, "Structured(<unserializable>)"),
            },
        }
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::String(s.clone())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<f32> for LogValue {
    fn from(f: f32) -> Self {
        LogValue::Float(f as f64)
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogValue {
                fn from(i: $ty) -> Self {
                    LogValue::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for LogValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(LogValue::Int)
            .unwrap_or(LogValue::Float(i as f64))
    }
}

impl From<usize> for LogValue {
    fn from(i: usize) -> Self {
        LogValue::from(i as u64)
    }
}

impl From<()> for LogValue {
    fn from(_: ()) -> Self {
        LogValue::Null
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(LogValue::Null)
    }
}

impl From<ParamValue> for LogValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::String(s) => LogValue::String(s),
            ParamValue::Int(i) => LogValue::Int(i),
            ParamValue::Float(f) => LogValue::Float(f),
            ParamValue::Bool(b) => LogValue::Bool(b),
            ParamValue::Null => LogValue::Null,
        }
    }
}

impl From<ErrorRecord> for LogValue {
    fn from(record: ErrorRecord) -> Self {
        LogValue::structured(record)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => LogValue::Null,
            Value::Bool(b) => LogValue::Bool(b),
            Value::Number(ref n) => ParamValue::from_json_number(n).into(),
            Value::String(s) => LogValue::String(s),
            structured @ (Value::Array(_) | Value::Object(_)) => LogValue::structured(structured),
        }
    }
}
