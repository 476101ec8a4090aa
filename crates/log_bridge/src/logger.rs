//! The per-name logging facade.

use std::{error::Error, fmt, sync::Arc};

use crate::{
    ConfigStore, Level,
    format::MessageFormatter,
    resolver,
    sink::PlatformSink,
    tag,
};

/// A named logger bound to a platform tag and a resolved level.
///
/// Loggers are obtained from a [`LoggerRegistry`](crate::LoggerRegistry). Every logging call
/// checks enablement first and only formats the message when it will actually be emitted, so
/// unconditional logging calls stay cheap when the logger is disabled.
pub struct Logger {
    name: String,
    tag: String,
    level: Level,
    prefix: String,
    config: Arc<ConfigStore>,
    sink: Arc<dyn PlatformSink>,
    formatter: Arc<dyn MessageFormatter>,
}

impl Logger {
    pub(crate) fn new(
        name: &str,
        config: Arc<ConfigStore>,
        sink: Arc<dyn PlatformSink>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        let tag = tag::shorten(name, config.max_tag_len()).into_owned();
        let level = resolver::resolve(name, &tag, &config);
        let prefix = if config.force_prepend_tag() {
            tag::prepend_prefix(&tag, config.max_tag_len())
        } else {
            String::new()
        };

        Self {
            name: name.to_owned(),
            tag,
            level,
            prefix,
            config,
            sink,
            formatter,
        }
    }

    /// The name this logger was requested with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The logger's own platform tag, derived from its name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The tag messages are emitted under: the forced tag if one is configured, the logger's
    /// own tag otherwise.
    pub fn emit_tag(&self) -> &str {
        self.config.force_tag().unwrap_or(self.tag.as_str())
    }

    /// The minimum level this logger emits.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The prefix written in front of every message; empty unless tag prepending is on.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether a message at `level` would be emitted.
    ///
    /// The logger's level must allow it and, unless the platform check is ignored, the sink
    /// must consider the logger's own tag loggable at that level.
    pub fn is_enabled(&self, level: Level) -> bool {
        if self.config.disabled_all() || self.level == Level::Disabled || level == Level::Disabled
        {
            return false;
        }

        self.level <= level
            && (self.config.ignore_platform_level_check()
                || self.sink.is_loggable(&self.tag, level))
    }

    /// Whether trace messages would be emitted.
    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    /// Whether debug messages would be emitted.
    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    /// Whether info messages would be emitted.
    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    /// Whether warnings would be emitted.
    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    /// Whether errors would be emitted.
    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    /// Logs `template` at `level`, substituting `args` with the registry's formatter.
    pub fn log(&self, level: Level, template: &str, args: &[&dyn fmt::Display]) {
        if self.is_enabled(level) {
            let message = if args.is_empty() {
                template.to_owned()
            } else {
                self.formatter.format(template, args)
            };
            self.emit(level, &message, None);
        }
    }

    /// Logs preformatted arguments at `level`, as produced by [`format_args!`].
    ///
    /// The arguments are only rendered when the message is emitted. Prefer the
    /// [`log!`](crate::log!) family of macros, which also skip evaluating the arguments.
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.is_enabled(level) {
            self.emit(level, &args.to_string(), None);
        }
    }

    /// Emits preformatted arguments without checking enablement again.
    ///
    /// Used by the [`log!`](crate::log!) family of macros after their own check.
    #[doc(hidden)]
    pub fn emit_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        self.emit(level, &args.to_string(), None);
    }

    /// Logs `message` at `level` along with `error`.
    pub fn log_with_error(&self, level: Level, message: &str, error: &(dyn Error + 'static)) {
        if self.is_enabled(level) {
            self.emit(level, message, Some(error));
        }
    }

    /// Logs at trace level.
    pub fn trace(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Trace, template, args);
    }

    /// Logs at trace level with an attached error.
    pub fn trace_with_error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log_with_error(Level::Trace, message, error);
    }

    /// Logs at debug level.
    pub fn debug(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Debug, template, args);
    }

    /// Logs at debug level with an attached error.
    pub fn debug_with_error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log_with_error(Level::Debug, message, error);
    }

    /// Logs at info level.
    pub fn info(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Info, template, args);
    }

    /// Logs at info level with an attached error.
    pub fn info_with_error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log_with_error(Level::Info, message, error);
    }

    /// Logs a warning.
    pub fn warn(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Warn, template, args);
    }

    /// Logs a warning with an attached error.
    pub fn warn_with_error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log_with_error(Level::Warn, message, error);
    }

    /// Logs an error.
    pub fn error(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log(Level::Error, template, args);
    }

    /// Logs an error message with an attached error.
    pub fn error_with_error(&self, message: &str, error: &(dyn Error + 'static)) {
        self.log_with_error(Level::Error, message, error);
    }

    fn emit(&self, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) {
        if self.prefix.is_empty() {
            self.sink.emit(self.emit_tag(), level, message, error);
        } else {
            let message = format!("{}{message}", self.prefix);
            self.sink.emit(self.emit_tag(), level, &message, error);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("level", &self.level)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
