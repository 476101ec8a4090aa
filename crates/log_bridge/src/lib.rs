//! `log_bridge` adapts a hierarchical, named-logger API onto a constrained platform log sink:
//! one that only accepts short tags and filters levels on its own.
//!
//! It offers:
//! - A [`ConfigLoader`] reading per-logger levels and global options from a properties
//!   resource into an immutable [`ConfigStore`].
//! - [`tag::shorten()`] to compress dotted logger names into bounded-length platform tags.
//! - [`resolve_level()`] to compute the effective level of a logger from the configuration.
//! - A [`LoggerRegistry`] handing out exactly one [`Logger`] per name, even under concurrent
//!   access.
//! - The [`PlatformSink`] and [`MessageFormatter`] seams, with [`TracingSink`] (behind the
//!   `tracing` feature), [`MemorySink`] and [`AnchorFormatter`] implementations.
//!
//! Legacy code tends to log unconditionally. Every [`Logger`] call therefore checks whether it
//! is enabled before formatting anything.
//!
//! # Configuration
//!
//! The configuration resource, `log_bridge.properties`, contains lines such as:
//!
//! ```text
//! # Everything not listed below logs warnings and errors only.
//! default.log.level=warn
//! com.example.network.Connection=debug
//! com.example.storage.Cache=disabled
//!
//! # Route every emission to one tag, prefixed with the logger's own tag.
//! force.tag=MyApp
//! force.tag.prepend=true
//!
//! # Also honour the platform's own level filtering.
//! check.android.level=true
//! ```
//!
//! Level names are `disabled`, `trace`, `debug`, `info`, `warn` and `error`. A logger listed
//! under several levels gets the lowest one; for `default.log.level` the last line wins.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use log_bridge::{ConfigLoader, Level, LoggerRegistry, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let properties = "default.log.level=info\nforce.tag=APP\n";
//! let config = ConfigLoader::new()
//!     .parse_reader(properties.as_bytes(), "inline".as_ref())
//!     .store;
//!
//! let registry = LoggerRegistry::new(config, sink.clone());
//! let logger = registry.get_logger("com.example.Service");
//!
//! logger.debug("not emitted", &[]);
//! log_bridge::info!(logger, "ready after {} ms", 42);
//!
//! let records = sink.take();
//! let last = records.last().unwrap();
//! assert_eq!((last.tag.as_str(), last.level), ("APP", Level::Info));
//! assert_eq!(last.message, "ready after 42 ms");
//! ```

mod config;
mod diagnostics;
mod format;
mod level;
mod logger;
mod macros;
mod registry;
mod resolver;
mod sink;
pub mod tag;

use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

pub use self::{
    config::{ConfigBuilder, ConfigLoader, ConfigStore, ParseOutcome},
    format::{AnchorFormatter, MessageFormatter},
    level::{Level, ParseLevelError},
    logger::Logger,
    registry::LoggerRegistry,
    resolver::resolve as resolve_level,
    sink::{MemorySink, PlatformSink, Record},
};
#[cfg(feature = "tracing")]
pub use self::sink::TracingSink;

/// Tag the bridge reports its own diagnostics under.
pub const BRIDGE_TAG: &str = "log_bridge";

/// Errors that can occur while configuring the bridge.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration resource failed.
    #[error("Failed to read configuration from `{}`: {source}", origin.display())]
    Io {
        /// The resource being read.
        origin: PathBuf,

        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A logger was assigned a value that is not a level name.
    #[error("Unknown level for `{key}`: `{value}`")]
    UnknownLevel {
        /// The configuration key.
        key: String,

        /// The rejected value.
        value: String,
    },

    /// A process-wide registry was already installed.
    #[error("A process-wide logger registry is already installed")]
    AlreadyInitialized,
}

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// Installs `registry` as the process-wide registry used by [`get_logger()`].
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInitialized`] if a registry was already installed, either by
/// an earlier call or lazily by [`get_logger()`].
pub fn init(registry: LoggerRegistry) -> Result<(), ConfigError> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Returns the logger called `name` from the process-wide registry, if one is installed.
pub fn try_get_logger(name: &str) -> Option<Arc<Logger>> {
    GLOBAL_REGISTRY
        .get()
        .map(|registry| registry.get_logger(name))
}

/// Returns the logger called `name` from the process-wide registry.
///
/// Unless [`init()`] was called first, the registry is created on first use: its
/// configuration is loaded by [`ConfigLoader::from_env()`] from the current directory and its
/// loggers write to a [`TracingSink`].
#[cfg(feature = "tracing")]
pub fn get_logger(name: &str) -> Arc<Logger> {
    GLOBAL_REGISTRY
        .get_or_init(|| {
            let sink: Arc<dyn PlatformSink> = Arc::new(TracingSink);
            let config = ConfigLoader::from_env()
                .diagnostics_sink(Arc::clone(&sink))
                .load();
            LoggerRegistry::new(config, sink)
        })
        .get_logger(name)
}
