//! Immutable, process-wide logging configuration.
//!
//! A [`ConfigStore`] is either built in code through [`ConfigStore::builder()`] or read from a
//! properties resource by a [`ConfigLoader`]. Once built it is never modified; share it
//! behind an [`Arc`](std::sync::Arc).

mod loader;
mod properties;

use rustc_hash::{FxHashMap, FxHashSet};

pub use self::loader::{ConfigLoader, ParseOutcome};
use crate::{Level, tag::MAX_TAG_LEN};

/// Reserved configuration keys.
pub(crate) mod keys {
    pub(crate) const DEFAULT_LEVEL: &str = "default.log.level";
    pub(crate) const FORCE_TAG: &str = "force.tag";
    pub(crate) const FORCE_PREPEND_TAG: &str = "force.tag.prepend";
    pub(crate) const CHECK_PLATFORM_LEVEL: &str = "check.android.level";
}

/// The resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    default_level: Level,
    level_assignments: FxHashMap<Level, FxHashSet<String>>,
    force_tag: Option<String>,
    force_prepend_tag: bool,
    ignore_platform_level_check: bool,
    disabled_all: bool,
    max_tag_len: usize,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            default_level: Level::Disabled,
            level_assignments: FxHashMap::default(),
            force_tag: None,
            force_prepend_tag: false,
            ignore_platform_level_check: true,
            disabled_all: false,
            max_tag_len: MAX_TAG_LEN,
        }
    }
}

impl ConfigStore {
    /// Starts building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// A configuration with all logging switched off.
    pub fn disabled() -> Self {
        Self {
            disabled_all: true,
            ..Self::default()
        }
    }

    /// Level used for loggers that have no level assigned.
    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Names explicitly assigned to `level`, if any.
    pub fn assigned_names(&self, level: Level) -> Option<&FxHashSet<String>> {
        self.level_assignments.get(&level)
    }

    /// The single tag every logger emits under, if one is forced.
    pub fn force_tag(&self) -> Option<&str> {
        self.force_tag.as_deref()
    }

    /// Whether messages are prefixed with the logger's own tag.
    pub fn force_prepend_tag(&self) -> bool {
        self.force_prepend_tag
    }

    /// Whether the local level alone decides enablement, without asking the platform.
    pub fn ignore_platform_level_check(&self) -> bool {
        self.ignore_platform_level_check
    }

    /// Whether the kill switch turned off all logging.
    pub fn disabled_all(&self) -> bool {
        self.disabled_all
    }

    /// Maximum length of the tags handed to the platform.
    pub fn max_tag_len(&self) -> usize {
        self.max_tag_len
    }
}

/// Builder for a [`ConfigStore`].
///
/// # Example
///
/// ```
/// use log_bridge::{ConfigStore, Level};
///
/// let config = ConfigStore::builder()
///     .default_level(Level::Info)
///     .assign("com.example.Noisy", Level::Warn)
///     .force_tag("APP")
///     .build();
///
/// assert_eq!(config.default_level(), Level::Info);
/// assert_eq!(config.force_tag(), Some("APP"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    store: ConfigStore,
}

impl ConfigBuilder {
    /// Sets the level for loggers without an assignment. Later calls replace earlier ones.
    pub fn default_level(mut self, level: Level) -> Self {
        self.set_default_level(level);
        self
    }

    /// Assigns `level` to the logger called `name`.
    ///
    /// A name may be assigned several levels; the lowest one takes effect.
    pub fn assign(mut self, name: impl Into<String>, level: Level) -> Self {
        self.add_assignment(name.into(), level);
        self
    }

    /// Routes every emission to `tag`.
    pub fn force_tag(mut self, tag: impl Into<String>) -> Self {
        self.store.force_tag = Some(tag.into());
        self
    }

    /// Prefixes every message with the logger's own tag.
    pub fn force_prepend_tag(mut self, prepend: bool) -> Self {
        self.store.force_prepend_tag = prepend;
        self
    }

    /// Also asks the platform sink whether a message is loggable before emitting it.
    pub fn check_platform_level(mut self, check: bool) -> Self {
        self.store.ignore_platform_level_check = !check;
        self
    }

    /// Overrides the maximum tag length.
    pub fn max_tag_len(mut self, max_tag_len: usize) -> Self {
        self.store.max_tag_len = max_tag_len;
        self
    }

    /// Turns off all logging, regardless of any other setting.
    pub fn disabled_all(mut self, disabled: bool) -> Self {
        self.store.disabled_all = disabled;
        if disabled {
            self.store.default_level = Level::Disabled;
        }
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> ConfigStore {
        self.store
    }

    pub(crate) fn set_default_level(&mut self, level: Level) {
        self.store.default_level = level;
    }

    pub(crate) fn add_assignment(&mut self, name: String, level: Level) {
        self.store
            .level_assignments
            .entry(level)
            .or_default()
            .insert(name);
    }

    pub(crate) fn set_force_tag(&mut self, tag: String) {
        self.store.force_tag = Some(tag);
    }

    pub(crate) fn set_force_prepend_tag(&mut self, prepend: bool) {
        self.store.force_prepend_tag = prepend;
    }

    pub(crate) fn set_check_platform_level(&mut self, check: bool) {
        self.store.ignore_platform_level_check = !check;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_logging_and_skip_the_platform_check() {
        let config = ConfigStore::default();
        assert_eq!(config.default_level(), Level::Disabled);
        assert!(config.ignore_platform_level_check());
        assert!(!config.force_prepend_tag());
        assert!(!config.disabled_all());
        assert_eq!(config.force_tag(), None);
        assert_eq!(config.max_tag_len(), MAX_TAG_LEN);
    }

    #[test]
    fn a_name_can_be_assigned_several_levels() {
        let config = ConfigStore::builder()
            .assign("a.B", Level::Warn)
            .assign("a.B", Level::Trace)
            .build();

        assert!(config
            .assigned_names(Level::Warn)
            .is_some_and(|names| names.contains("a.B")));
        assert!(config
            .assigned_names(Level::Trace)
            .is_some_and(|names| names.contains("a.B")));
        assert!(config.assigned_names(Level::Info).is_none());
    }

    #[test]
    fn last_default_level_wins() {
        let config = ConfigStore::builder()
            .default_level(Level::Warn)
            .default_level(Level::Error)
            .build();
        assert_eq!(config.default_level(), Level::Error);
    }

    #[test]
    fn disabled_store_overrides_default_level() {
        let config = ConfigStore::builder()
            .default_level(Level::Trace)
            .disabled_all(true)
            .build();
        assert!(config.disabled_all());
        assert_eq!(config.default_level(), Level::Disabled);
        assert!(ConfigStore::disabled().disabled_all());
    }

    #[test]
    fn platform_check_is_inverted_into_ignore_flag() {
        let config = ConfigStore::builder().check_platform_level(true).build();
        assert!(!config.ignore_platform_level_check());
    }
}
