//! The kill switch environment variable.

use log_bridge::{ConfigLoader, Level};
use serial_test::serial;

#[test]
#[serial]
fn environment_variable_engages_the_kill_switch() {
    let dir = tempfile::tempdir().expect("failed to create temporary directory");
    std::fs::write(
        dir.path().join(ConfigLoader::CONFIG_FILE_NAME),
        "default.log.level=trace\n",
    )
    .expect("failed to write configuration");

    std::env::set_var(ConfigLoader::KILL_SWITCH_ENV, "1");
    let config = ConfigLoader::from_env().base_dir(dir.path()).load();
    std::env::remove_var(ConfigLoader::KILL_SWITCH_ENV);

    assert!(config.disabled_all());
    assert_eq!(config.default_level(), Level::Disabled);
}

#[cfg(not(feature = "disable-all"))]
#[test]
#[serial]
fn configuration_is_read_without_the_environment_variable() {
    let dir = tempfile::tempdir().expect("failed to create temporary directory");
    std::fs::write(
        dir.path().join(ConfigLoader::CONFIG_FILE_NAME),
        "default.log.level=trace\n",
    )
    .expect("failed to write configuration");

    std::env::remove_var(ConfigLoader::KILL_SWITCH_ENV);
    let config = ConfigLoader::from_env().base_dir(dir.path()).load();

    assert!(!config.disabled_all());
    assert_eq!(config.default_level(), Level::Trace);
}
