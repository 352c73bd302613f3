//! View Surfaces
//!
//! Seams toward the hosting UI: one-line user notifications and
//! collection-change events the host's views subscribe to. The core never
//! knows how either is rendered.

#[cfg(test)]
use std::sync::Mutex;

/// Which collection changed. Views refetch on notification; the core holds
/// no durable copy of server-owned collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ProfilesChanged,
    WorkspacesChanged,
}

/// Observer notified after a collection mutation has been persisted.
pub trait ViewObserver: Send + Sync {
    fn collection_changed(&self, event: ViewEvent);
}

/// User-visible one-line notifications. Emission is a side effect and is
/// independent of error propagation; callers still get the `Err`.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default notifier: errors to stderr for the user, everything through
/// tracing for the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
        println!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
        eprintln!("{message}");
    }
}

/// Observer that records collection changes in the log. The CLI has no
/// long-lived views to refresh; the event trail still shows under a debug
/// filter.
pub struct LoggingObserver;

impl ViewObserver for LoggingObserver {
    fn collection_changed(&self, event: ViewEvent) {
        tracing::debug!(?event, "collection changed");
    }
}

/// Test observer that records every event it sees.
#[cfg(test)]
pub struct RecordingObserver {
    events: Mutex<Vec<ViewEvent>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl ViewObserver for RecordingObserver {
    fn collection_changed(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}
