//! The platform log sink the bridge writes to.

#[cfg(feature = "tracing")]
mod tracing;

use std::{
    error::Error,
    sync::{Mutex, PoisonError},
};

use rustc_hash::FxHashMap;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingSink;
use crate::Level;

/// A platform logging facility with short tags and its own level filtering.
pub trait PlatformSink: Send + Sync {
    /// Writes `message` under `tag` at `level`, along with an attached error if any.
    fn emit(&self, tag: &str, level: Level, message: &str, error: Option<&(dyn Error + 'static)>);

    /// Whether the platform would keep a message logged under `tag` at `level`.
    fn is_loggable(&self, tag: &str, level: Level) -> bool;
}

/// A single emission captured by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Tag the message was emitted under.
    pub tag: String,

    /// Level the message was emitted at.
    pub level: Level,

    /// The emitted message.
    pub message: String,

    /// The attached error, rendered with its [`Display`](std::fmt::Display) implementation.
    pub error: Option<String>,
}

/// A [`PlatformSink`] that keeps every emission in memory.
///
/// Messages are loggable at or above a threshold, which defaults to [`Level::Trace`] and can
/// be set per tag.
#[derive(Debug)]
pub struct MemorySink {
    threshold: Level,
    tag_thresholds: FxHashMap<String, Level>,
    records: Mutex<Vec<Record>>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// Creates a sink for which every message is loggable.
    pub fn new() -> Self {
        Self::with_threshold(Level::Trace)
    }

    /// Creates a sink for which messages below `threshold` are not loggable.
    pub fn with_threshold(threshold: Level) -> Self {
        Self {
            threshold,
            tag_thresholds: FxHashMap::default(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Sets a separate threshold for messages logged under `tag`.
    pub fn tag_threshold(mut self, tag: impl Into<String>, threshold: Level) -> Self {
        self.tag_thresholds.insert(tag.into(), threshold);
        self
    }

    /// Returns a copy of the captured emissions, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the captured emissions, oldest first.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(
            &mut *self
                .records
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl PlatformSink for MemorySink {
    fn emit(&self, tag: &str, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) {
        let record = Record {
            tag: tag.to_owned(),
            level,
            message: message.to_owned(),
            error: error.map(ToString::to_string),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn is_loggable(&self, tag: &str, level: Level) -> bool {
        let threshold = self
            .tag_thresholds
            .get(tag)
            .copied()
            .unwrap_or(self.threshold);
        level != Level::Disabled && level >= threshold
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn records_emissions_in_order() {
        let sink = MemorySink::new();
        let error = io::Error::other("boom");

        sink.emit("a", Level::Info, "first", None);
        sink.emit("b", Level::Error, "second", Some(&error));

        let records = sink.take();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].tag, "b");
        assert_eq!(records[1].error.as_deref(), Some("boom"));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn thresholds_apply_per_tag() {
        let sink = MemorySink::with_threshold(Level::Info).tag_threshold("chatty", Level::Error);

        assert!(!sink.is_loggable("other", Level::Debug));
        assert!(sink.is_loggable("other", Level::Info));
        assert!(!sink.is_loggable("chatty", Level::Warn));
        assert!(sink.is_loggable("chatty", Level::Error));
        assert!(!sink.is_loggable("other", Level::Disabled));
    }
}
