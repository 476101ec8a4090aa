//! Resolution of the effective level of a logger.

use crate::{ConfigStore, Level};

/// Computes the minimum enabled level for the logger requested as `raw_name`, whose platform
/// tag is `tag`.
///
/// Levels are searched from lowest to highest, starting with [`Level::Disabled`]; the first
/// level that lists either name wins. A name assigned several levels therefore gets the most
/// verbose one, unless it is also explicitly disabled. Names without any assignment get the
/// configured default, and the kill switch forces [`Level::Disabled`].
pub fn resolve(raw_name: &str, tag: &str, config: &ConfigStore) -> Level {
    if config.disabled_all() {
        return Level::Disabled;
    }

    Level::ALL
        .into_iter()
        .find(|level| {
            config
                .assigned_names(*level)
                .is_some_and(|names| names.contains(tag) || names.contains(raw_name))
        })
        .unwrap_or_else(|| config.default_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_assigned_level_wins() {
        let config = ConfigStore::builder()
            .assign("a.B", Level::Warn)
            .assign("a.B", Level::Trace)
            .build();
        assert_eq!(resolve("a.B", "a.B", &config), Level::Trace);
    }

    #[test]
    fn unassigned_names_get_the_default() {
        let config = ConfigStore::builder()
            .default_level(Level::Info)
            .assign("a.B", Level::Error)
            .build();
        assert_eq!(resolve("x.Y", "x.Y", &config), Level::Info);
    }

    #[test]
    fn shortened_tag_matches_too() {
        let config = ConfigStore::builder()
            .assign("c.e.s.Handler", Level::Debug)
            .build();
        assert_eq!(
            resolve("com.example.service.Handler", "c.e.s.Handler", &config),
            Level::Debug
        );
    }

    #[test]
    fn raw_and_shortened_names_compete_by_level() {
        let config = ConfigStore::builder()
            .assign("com.example.service.Handler", Level::Error)
            .assign("c.e.s.Handler", Level::Info)
            .build();
        assert_eq!(
            resolve("com.example.service.Handler", "c.e.s.Handler", &config),
            Level::Info
        );
    }

    #[test]
    fn explicit_disable_beats_other_assignments() {
        let config = ConfigStore::builder()
            .assign("a.B", Level::Trace)
            .assign("a.B", Level::Disabled)
            .build();
        assert_eq!(resolve("a.B", "a.B", &config), Level::Disabled);
    }

    #[test]
    fn kill_switch_bypasses_assignments() {
        let config = ConfigStore::builder()
            .assign("a.B", Level::Error)
            .disabled_all(true)
            .build();
        assert_eq!(resolve("a.B", "a.B", &config), Level::Disabled);
    }
}
