//! In-memory appender that records every line

use crate::core::{Appender, ParamValue, Result, Stream};
use parking_lot::Mutex;
use std::sync::Arc;

/// One line as received by an appender
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedLine {
    pub stream: Stream,
    pub args: Vec<ParamValue>,
}

impl CapturedLine {
    /// The `[time app.module]` prefix
    pub fn prefix(&self) -> Option<&str> {
        self.args.first().and_then(ParamValue::as_str)
    }

    /// Values after the prefix
    pub fn params(&self) -> &[ParamValue] {
        self.args.get(1..).unwrap_or(&[])
    }
}

/// Captures lines for later inspection.
///
/// Clones share the same buffer, so a clone can be installed with
/// `Logger::set_appender` while the original is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    pub fn lines_on(&self, stream: Stream) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .iter()
            .filter(|line| line.stream == stream)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, stream: Stream, args: &[ParamValue]) -> Result<()> {
        self.lines.lock().push(CapturedLine {
            stream,
            args: args.to_vec(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
