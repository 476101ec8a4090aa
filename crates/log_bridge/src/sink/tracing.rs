//! A [`PlatformSink`] backed by the [`tracing`](::tracing) ecosystem.

use std::error::Error;

use super::PlatformSink;
use crate::Level;

/// Target of the events produced by [`TracingSink`].
const TARGET: &str = "log_bridge::sink";

/// Forwards emissions as `tracing` events, carrying the tag as a `tag` field and the attached
/// error, if any, as an `error` field.
///
/// A message is loggable when the current subscriber is interested in events at its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! emit_at {
    ($level:expr, $tag:expr, $message:expr, $error:expr) => {
        ::tracing::event!(
            target: TARGET,
            $level,
            tag = $tag,
            error = $error.map(::tracing::field::display),
            "{}",
            $message
        )
    };
}

impl PlatformSink for TracingSink {
    fn emit(&self, tag: &str, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) {
        match level {
            Level::Disabled => (),
            Level::Trace => emit_at!(::tracing::Level::TRACE, tag, message, error),
            Level::Debug => emit_at!(::tracing::Level::DEBUG, tag, message, error),
            Level::Info => emit_at!(::tracing::Level::INFO, tag, message, error),
            Level::Warn => emit_at!(::tracing::Level::WARN, tag, message, error),
            Level::Error => emit_at!(::tracing::Level::ERROR, tag, message, error),
        }
    }

    fn is_loggable(&self, _tag: &str, level: Level) -> bool {
        match level {
            Level::Disabled => false,
            Level::Trace => ::tracing::enabled!(target: TARGET, ::tracing::Level::TRACE),
            Level::Debug => ::tracing::enabled!(target: TARGET, ::tracing::Level::DEBUG),
            Level::Info => ::tracing::enabled!(target: TARGET, ::tracing::Level::INFO),
            Level::Warn => ::tracing::enabled!(target: TARGET, ::tracing::Level::WARN),
            Level::Error => ::tracing::enabled!(target: TARGET, ::tracing::Level::ERROR),
        }
    }
}
