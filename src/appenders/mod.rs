//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::{CapturedLine, MemoryAppender};

// Re-export the trait next to its implementations
pub use crate::core::{Appender, Stream};
