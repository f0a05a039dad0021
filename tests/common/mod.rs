//! Shared setup for tests that touch the process-wide logger state

#![allow(dead_code)]

use app_logger::prelude::*;
use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::sync::Arc;

static GLOBAL_STATE: Mutex<()> = const_mutex(());

pub const NOW: i64 = 1537838479252;

pub struct Harness {
    pub appender: MemoryAppender,
    _guard: MutexGuard<'static, ()>,
}

/// Serialize access to the logger and start from a clean state with the
/// clock frozen at `NOW` and output captured in memory
pub fn harness() -> Harness {
    let guard = GLOBAL_STATE.lock();
    Logger::reset_defaults();

    let appender = MemoryAppender::new();
    Logger::set_appender(Box::new(appender.clone()));
    Logger::set_clock(Arc::new(FixedClock::new(NOW)));

    Harness {
        appender,
        _guard: guard,
    }
}

/// Collect every entry published while the returned subscription is alive
pub fn record_entries() -> (Arc<Mutex<Vec<LogEntry>>>, Subscription) {
    let entries = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&entries);
    let subscription = Logger::on_log().subscribe(move |entry| {
        if let Some(entry) = entry {
            sink.lock().push(entry.clone());
        }
    });
    (entries, subscription)
}
