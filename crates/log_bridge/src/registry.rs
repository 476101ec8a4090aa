//! The get-or-create cache of loggers.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use rustc_hash::FxHashMap;

use crate::{
    ConfigStore, Logger,
    diagnostics::Diagnostics,
    format::{AnchorFormatter, MessageFormatter},
    sink::PlatformSink,
};

/// Hands out exactly one [`Logger`] per name.
///
/// Loggers are created on first request and kept for the lifetime of the registry. Requests
/// for the same name from any number of threads always return the same instance.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use log_bridge::{ConfigStore, Level, LoggerRegistry, MemorySink};
///
/// let sink = Arc::new(MemorySink::new());
/// let config = ConfigStore::builder().default_level(Level::Info).build();
/// let registry = LoggerRegistry::new(config, sink.clone());
///
/// let logger = registry.get_logger("com.example.Service");
/// logger.info("started in {} ms", &[&12]);
///
/// assert!(Arc::ptr_eq(&logger, &registry.get_logger("com.example.Service")));
/// assert!(sink.records().iter().any(|record| record.message == "started in 12 ms"));
/// ```
pub struct LoggerRegistry {
    config: Arc<ConfigStore>,
    sink: Arc<dyn PlatformSink>,
    formatter: Arc<dyn MessageFormatter>,
    loggers: Mutex<FxHashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    /// Creates an empty registry whose loggers use `config` and write to `sink`, formatting
    /// templates with an [`AnchorFormatter`].
    pub fn new(config: impl Into<Arc<ConfigStore>>, sink: Arc<dyn PlatformSink>) -> Self {
        Self {
            config: config.into(),
            sink,
            formatter: Arc::new(AnchorFormatter),
            loggers: Mutex::new(FxHashMap::default()),
        }
    }

    /// Replaces the formatter used by loggers created afterwards.
    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// The configuration loggers are resolved against.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the logger called `name`, creating it on first request.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let (logger, created) = {
            let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
            match loggers.get(name) {
                Some(logger) => (Arc::clone(logger), false),
                None => {
                    let logger = Arc::new(Logger::new(
                        name,
                        Arc::clone(&self.config),
                        Arc::clone(&self.sink),
                        Arc::clone(&self.formatter),
                    ));
                    loggers.insert(name.to_owned(), Arc::clone(&logger));
                    (logger, true)
                }
            }
        };

        // Reported outside the lock, the sink may be slow.
        if created && !self.config.disabled_all() {
            let diagnostics = Diagnostics::new(Some(self.sink.as_ref()));
            if logger.tag() != name {
                diagnostics.debug(format_args!(
                    "Tag: {name} shortened to: {}",
                    logger.tag()
                ));
            }
            if !logger.prefix().is_empty() {
                diagnostics.debug(format_args!("Prepend Tag: {}", logger.prefix()));
            }
            diagnostics.debug(format_args!(
                "Level for: {} set to: {}",
                logger.tag(),
                logger.level()
            ));
        }

        logger
    }

    /// Number of loggers created so far.
    pub fn len(&self) -> usize {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no logger has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.config)
            .field("loggers", &self.len())
            .finish_non_exhaustive()
    }
}
