//! The ordered set of log levels understood by the bridge.

use std::{fmt, str::FromStr};

/// Log severity, ordered from [`Level::Disabled`] (lowest) to [`Level::Error`] (highest).
///
/// A logger configured at some level emits every message at that level or above.
/// [`Level::Disabled`] is special: a logger resolved to it never emits anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Logging is turned off.
    Disabled,

    /// Very fine-grained diagnostics.
    Trace,

    /// Debugging diagnostics.
    Debug,

    /// Informational messages.
    Info,

    /// Suspicious conditions.
    Warn,

    /// Failures.
    Error,
}

impl Level {
    /// All levels, in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Disabled,
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// The configuration name of this level, as accepted by [`Level::from_str`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the level names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{value}`")]
pub struct ParseLevelError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Level names are matched exactly; `"INFO"` is not a level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        assert!(Level::Disabled < Level::Trace);
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("disabled".parse::<Level>(), Ok(Level::Disabled));
        assert!("DEBUG".parse::<Level>().is_err());
        assert!(" info".parse::<Level>().is_err());
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }
}
