//! Serialized access to the process-wide logger state for unit tests

use super::{FixedClock, Logger};
use crate::appenders::MemoryAppender;
use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::sync::Arc;

static TEST_LOCK: Mutex<()> = const_mutex(());

pub(crate) const NOW: i64 = 1537838479252;

/// Lock the shared state and reset it with a memory appender and a fixed clock
pub(crate) fn isolated() -> (MutexGuard<'static, ()>, MemoryAppender) {
    let guard = TEST_LOCK.lock();
    Logger::reset_defaults();
    let appender = MemoryAppender::new();
    Logger::set_appender(Box::new(appender.clone()));
    Logger::set_clock(Arc::new(FixedClock::new(NOW)));
    (guard, appender)
}
