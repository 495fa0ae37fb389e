/// Side-channel notifications emitted during a build.
///
/// These are observations about the run, not part of the resolved model:
/// recoverable anomalies are absorbed locally and surfaced here so a front
/// end can report them without the model losing consistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A recoverable anomaly, e.g. a skipped duplicate declaration.
    Warning(String),
    /// An input file that could not be read or parsed at all.
    BadInput(String),
}

/// Receiver for side-channel notifications.
pub trait EventSink {
    fn notify(&mut self, event: Notification);
}

/// Sink that forwards notifications to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: Notification) {
        match event {
            Notification::Warning(message) => tracing::warn!("{message}"),
            Notification::BadInput(path) => {
                tracing::warn!(path = %path, "unreadable input, skipping")
            }
        }
    }
}

/// Sink that records notifications for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<Notification>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages of all collected warnings.
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Notification::Warning(m) => Some(m.as_str()),
                Notification::BadInput(_) => None,
            })
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn notify(&mut self, event: Notification) {
        self.events.push(event);
    }
}
