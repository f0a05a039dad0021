//! Console appender implementation

use crate::core::{Appender, ParamValue, Result, Stream};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes each line to stdout or stderr, values separated by single spaces
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
        }
    }

    /// Colors only take effect with the `console` feature
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render a line the way it is printed, without colors
    ///
    /// # Example
    ///
    /// ```
    /// use app_logger::appenders::ConsoleAppender;
    /// use app_logger::ParamValue;
    ///
    /// let line = ConsoleAppender::render(&[
    ///     ParamValue::from("[10:00:00.000 shop.cart]"),
    ///     ParamValue::from("items"),
    ///     ParamValue::Int(3),
    /// ]);
    /// assert_eq!(line, "[10:00:00.000 shop.cart] items 3");
    /// ```
    pub fn render(args: &[ParamValue]) -> String {
        args.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_line(&self, stream: Stream, args: &[ParamValue]) -> String {
        match args.split_first() {
            Some((prefix, rest)) if self.use_colors => {
                let prefix = Self::paint(stream, &prefix.to_string());
                if rest.is_empty() {
                    prefix
                } else {
                    format!("{} {}", prefix, Self::render(rest))
                }
            }
            _ => Self::render(args),
        }
    }

    #[cfg(feature = "console")]
    fn paint(stream: Stream, text: &str) -> String {
        match stream {
            Stream::Stderr => text.red().to_string(),
            Stream::Stdout => text.bright_black().to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(_stream: Stream, text: &str) -> String {
        text.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, stream: Stream, args: &[ParamValue]) -> Result<()> {
        let output = self.format_line(stream, args);

        match stream {
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", output)?,
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
