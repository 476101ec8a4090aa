//! Reporting of the bridge's own progress and problems.

use std::fmt;

use crate::{BRIDGE_TAG, Level, sink::PlatformSink};

/// Routes diagnostics to the platform sink under [`BRIDGE_TAG`], or to `tracing` when no sink
/// was provided.
#[derive(Clone, Copy)]
pub(crate) struct Diagnostics<'a> {
    sink: Option<&'a dyn PlatformSink>,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(sink: Option<&'a dyn PlatformSink>) -> Self {
        Self { sink }
    }

    pub(crate) fn debug(&self, message: fmt::Arguments<'_>) {
        self.report(Level::Debug, message);
    }

    pub(crate) fn info(&self, message: fmt::Arguments<'_>) {
        self.report(Level::Info, message);
    }

    pub(crate) fn warn(&self, message: fmt::Arguments<'_>) {
        self.report(Level::Warn, message);
    }

    pub(crate) fn error(&self, message: fmt::Arguments<'_>) {
        self.report(Level::Error, message);
    }

    fn report(&self, level: Level, message: fmt::Arguments<'_>) {
        if let Some(sink) = self.sink {
            sink.emit(BRIDGE_TAG, level, &message.to_string(), None);
            return;
        }

        #[cfg(feature = "tracing")]
        match level {
            Level::Disabled => (),
            Level::Trace => tracing::trace!(target: BRIDGE_TAG, "{message}"),
            Level::Debug => tracing::debug!(target: BRIDGE_TAG, "{message}"),
            Level::Info => tracing::info!(target: BRIDGE_TAG, "{message}"),
            Level::Warn => tracing::warn!(target: BRIDGE_TAG, "{message}"),
            Level::Error => tracing::error!(target: BRIDGE_TAG, "{message}"),
        }
        #[cfg(not(feature = "tracing"))]
        let _ = (level, message);
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
