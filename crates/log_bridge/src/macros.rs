//! `format!`-style logging macros.
//!
//! Each macro takes a [`Logger`](crate::Logger) (or a reference or smart pointer to one)
//! followed by [`format!`] arguments. The arguments are neither evaluated nor formatted when
//! the logger is not enabled at the requested level.

/// Logs at the given [`Level`](crate::Level).
///
/// ```
/// use std::sync::Arc;
///
/// use log_bridge::{ConfigStore, Level, LoggerRegistry, MemorySink};
///
/// let sink = Arc::new(MemorySink::new());
/// let config = ConfigStore::builder().default_level(Level::Warn).build();
/// let registry = LoggerRegistry::new(config, sink.clone());
/// let logger = registry.get_logger("a.B");
///
/// fn expensive_summary() -> String {
///     panic!("only evaluated when info is enabled")
/// }
///
/// log_bridge::log!(logger, Level::Error, "failed after {} attempts", 3);
/// log_bridge::log!(logger, Level::Info, "summary: {}", expensive_summary());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled(level) {
            logger.emit_fmt(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Logs at trace level.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Logs at debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Logs at info level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Logs a warning.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Logs an error.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use std::{
        error::Error,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use crate::{ConfigStore, Level, LoggerRegistry, MemorySink, PlatformSink};

    #[test]
    fn macros_emit_through_the_logger() {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::new(
            ConfigStore::builder()
                .default_level(Level::Trace)
                .force_tag("APP")
                .build(),
            sink.clone(),
        );
        let logger = registry.get_logger("a.B");
        sink.take();

        crate::trace!(logger, "t{}", 1);
        crate::debug!(logger, "d{}", 2);
        crate::info!(logger, "i{}", 3);
        crate::warn!(logger, "w{}", 4);
        crate::error!(logger, "e{}", 5);

        let records = sink.take();
        let messages: Vec<_> = records.iter().map(|record| record.message.as_str()).collect();
        assert_eq!(messages, ["t1", "d2", "i3", "w4", "e5"]);
        assert!(records.iter().all(|record| record.tag == "APP"));
        assert_eq!(records[4].level, Level::Error);
    }

    #[test]
    fn platform_is_asked_once_per_message() {
        #[derive(Default)]
        struct Counting {
            queries: AtomicUsize,
            emitted: AtomicUsize,
        }

        impl PlatformSink for Counting {
            fn emit(
                &self,
                _tag: &str,
                _level: Level,
                _message: &str,
                _error: Option<&(dyn Error + 'static)>,
            ) {
                self.emitted.fetch_add(1, Ordering::SeqCst);
            }

            fn is_loggable(&self, _tag: &str, _level: Level) -> bool {
                self.queries.fetch_add(1, Ordering::SeqCst);
                true
            }
        }

        let sink = Arc::new(Counting::default());
        let registry = LoggerRegistry::new(
            ConfigStore::builder()
                .default_level(Level::Info)
                .check_platform_level(true)
                .build(),
            sink.clone(),
        );
        let logger = registry.get_logger("a.B");
        let emitted_before = sink.emitted.load(Ordering::SeqCst);

        crate::info!(logger, "ready");

        assert_eq!(sink.queries.load(Ordering::SeqCst), 1);
        assert_eq!(sink.emitted.load(Ordering::SeqCst), emitted_before + 1);
    }
}
