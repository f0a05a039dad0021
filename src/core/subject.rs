//! Replay-latest broadcast of log entries
//!
//! `LogSubject` keeps the most recently published `LogEntry` and hands it to
//! every new subscriber straight away (`None` until the first publish).
//! Delivery is synchronous: callbacks run on the publishing thread before
//! `publish` returns. Callback panics are not caught.
//!
//! Deliveries from different threads are serialized, so a subscriber always
//! sees its replay before any newer entry. A callback may publish or
//! subscribe again on its own thread.

use super::log_entry::LogEntry;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::{Arc, Weak};

/// Callback invoked with the latest entry
pub type LogCallback = Arc<dyn Fn(Option<&LogEntry>) + Send + Sync>;

#[derive(Default)]
struct SubjectState {
    latest: Option<LogEntry>,
    next_id: u64,
    callbacks: Vec<(u64, LogCallback)>,
    channels: Vec<Sender<Option<LogEntry>>>,
}

/// Single-slot cached-value broadcaster
pub struct LogSubject {
    state: Arc<Mutex<SubjectState>>,
    // Held while callbacks run; the state lock is not
    delivery: ReentrantMutex<()>,
}

impl LogSubject {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState::default())),
            delivery: ReentrantMutex::new(()),
        }
    }

    /// Register a callback; it is called immediately with the latest entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use app_logger::LogSubject;
    ///
    /// let subject = LogSubject::new();
    /// let _subscription = subject.subscribe(|entry| assert!(entry.is_none()));
    /// ```
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&LogEntry>) + Send + Sync + 'static,
    {
        let callback: LogCallback = Arc::new(callback);
        let _delivery = self.delivery.lock();

        let (id, latest) = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.callbacks.push((id, Arc::clone(&callback)));
            (id, state.latest.clone())
        };

        // Lock released so the callback may log or subscribe again
        callback(latest.as_ref());

        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Subscribe through a channel primed with the latest entry.
    ///
    /// The receiver is dropped from the subject on the first publish after it
    /// disconnects.
    pub fn subscribe_channel(&self) -> Receiver<Option<LogEntry>> {
        let (sender, receiver) = unbounded();
        let mut state = self.state.lock();
        // Receiver is alive, so the send cannot fail
        let _ = sender.send(state.latest.clone());
        state.channels.push(sender);
        receiver
    }

    /// Make `entry` the latest value and deliver it to every subscriber
    pub fn publish(&self, entry: LogEntry) {
        let _delivery = self.delivery.lock();

        let callbacks: Vec<LogCallback> = {
            let mut state = self.state.lock();
            state
                .channels
                .retain(|sender| sender.send(Some(entry.clone())).is_ok());
            state.latest = Some(entry.clone());
            state.callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };

        for callback in callbacks {
            callback(Some(&entry));
        }
    }

    /// The most recently published entry
    pub fn latest(&self) -> Option<LogEntry> {
        self.state.lock().latest.clone()
    }

    /// Number of registered callbacks and channels
    ///
    /// Disconnected channels are counted until the next publish.
    pub fn subscriber_count(&self) -> usize {
        let state = self.state.lock();
        state.callbacks.len() + state.channels.len()
    }

    /// Forget the latest entry and every subscriber
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.latest = None;
        state.callbacks.clear();
        state.channels.clear();
    }
}

impl Default for LogSubject {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a callback subscription; unsubscribes when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<SubjectState>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keep the callback registered for the lifetime of the subject
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.lock().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}
