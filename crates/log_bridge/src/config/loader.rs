//! Locating and parsing the configuration resource.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

use super::{ConfigBuilder, ConfigStore, keys, properties};
use crate::{ConfigError, Level, diagnostics::Diagnostics, sink::PlatformSink};

/// Builds a [`ConfigStore`] from the first configuration resource found.
///
/// Loading never fails: a missing resource yields the defaults, and unknown levels or read
/// errors are reported through the diagnostics sink while keeping whatever was parsed.
///
/// # Example
///
/// ```no_run
/// use log_bridge::ConfigLoader;
///
/// let config = ConfigLoader::from_env().base_dir("/opt/my_app").load();
/// println!("default level: {}", config.default_level());
/// ```
#[derive(Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    kill_switch: bool,
    max_tag_len: Option<usize>,
    diagnostics_sink: Option<Arc<dyn PlatformSink>>,
}

/// The result of parsing a single configuration resource.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Configuration built from every entry read before parsing stopped.
    pub store: ConfigStore,

    /// Entries that were skipped, in resource order.
    pub warnings: Vec<ConfigError>,

    /// The read error that stopped parsing early, if any.
    pub error: Option<ConfigError>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// File name of the configuration resource.
    pub const CONFIG_FILE_NAME: &'static str = "log_bridge.properties";

    /// Directories searched for [`Self::CONFIG_FILE_NAME`], relative to the base directory and
    /// in order.
    pub const SEARCH_DIRS: [&'static str; 4] = [".", "config", "assets", "resources"];

    /// Environment variable whose presence turns off all logging.
    pub const KILL_SWITCH_ENV: &'static str = "LOG_BRIDGE_DISABLED";

    /// Creates a loader searching the current directory.
    ///
    /// The kill switch is engaged when the crate is built with the `disable-all` feature.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            kill_switch: cfg!(feature = "disable-all"),
            max_tag_len: None,
            diagnostics_sink: None,
        }
    }

    /// Like [`ConfigLoader::new()`], additionally engaging the kill switch when the
    /// [`Self::KILL_SWITCH_ENV`] environment variable is set.
    pub fn from_env() -> Self {
        let mut loader = Self::new();
        loader.kill_switch |= std::env::var_os(Self::KILL_SWITCH_ENV).is_some();
        loader
    }

    /// Sets the directory the search locations are relative to.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Engages or releases the kill switch.
    pub fn kill_switch(mut self, engaged: bool) -> Self {
        self.kill_switch = engaged;
        self
    }

    /// Overrides the maximum tag length of the loaded configuration.
    pub fn max_tag_len(mut self, max_tag_len: usize) -> Self {
        self.max_tag_len = Some(max_tag_len);
        self
    }

    /// Reports loading progress and problems to `sink`.
    pub fn diagnostics_sink(mut self, sink: Arc<dyn PlatformSink>) -> Self {
        self.diagnostics_sink = Some(sink);
        self
    }

    /// Returns the first existing configuration resource, if any.
    pub fn locate(&self) -> Option<PathBuf> {
        Self::SEARCH_DIRS
            .iter()
            .map(|dir| self.base_dir.join(dir).join(Self::CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Builds the configuration.
    ///
    /// With the kill switch engaged, no resource is searched and the result has
    /// [`ConfigStore::disabled_all()`] set.
    pub fn load(&self) -> ConfigStore {
        let diagnostics = self.diagnostics();

        if self.kill_switch {
            diagnostics.debug(format_args!("Kill switch engaged, all logging is disabled"));
            return self.finish(ConfigStore::builder().disabled_all(true));
        }

        let Some(path) = self.locate() else {
            diagnostics.info(format_args!(
                "No configuration file `{}` found under `{}`, using defaults",
                Self::CONFIG_FILE_NAME,
                self.base_dir.display()
            ));
            return self.finish(ConfigStore::builder());
        };

        diagnostics.debug(format_args!(
            "Loading configuration from `{}`",
            path.display()
        ));

        match File::open(&path) {
            Ok(file) => self.parse_reader(BufReader::new(file), &path).store,
            Err(source) => {
                let error = ConfigError::Io {
                    origin: path.clone(),
                    source,
                };
                diagnostics.error(format_args!("Error while loading configuration: {error}"));
                self.finish(ConfigStore::builder())
            }
        }
    }

    /// Parses a properties resource read from `reader`; `origin` names it in diagnostics.
    ///
    /// A read error stops parsing; entries read before it are kept. The kill switch is not
    /// consulted.
    pub fn parse_reader<R: BufRead>(&self, reader: R, origin: &Path) -> ParseOutcome {
        let diagnostics = self.diagnostics();
        let mut builder = ConfigStore::builder();
        let mut warnings = Vec::new();
        let mut error = None;

        for entry in properties::Entries::new(reader) {
            let (key, value) = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let failure = ConfigError::Io {
                        origin: origin.to_path_buf(),
                        source,
                    };
                    diagnostics.error(format_args!("Error while loading configuration: {failure}"));
                    error = Some(failure);
                    break;
                }
            };

            if let Err(warning) = Self::apply(&mut builder, key, value, diagnostics) {
                diagnostics.warn(format_args!("{warning}, ignoring it"));
                warnings.push(warning);
            }
        }

        ParseOutcome {
            store: self.finish(builder),
            warnings,
            error,
        }
    }

    /// Applies a single configuration entry.
    fn apply(
        builder: &mut ConfigBuilder,
        key: String,
        value: String,
        diagnostics: Diagnostics<'_>,
    ) -> Result<(), ConfigError> {
        match key.as_str() {
            keys::FORCE_TAG => {
                diagnostics.debug(format_args!("Set force tag to: {value}"));
                builder.set_force_tag(value);
            }
            keys::FORCE_PREPEND_TAG => {
                let prepend = properties::parse_bool(&value);
                diagnostics.debug(format_args!("Set force prepend tag to: {prepend}"));
                builder.set_force_prepend_tag(prepend);
            }
            keys::CHECK_PLATFORM_LEVEL => {
                let check = properties::parse_bool(&value);
                diagnostics.debug(format_args!("Set check platform level to: {check}"));
                builder.set_check_platform_level(check);
            }
            _ => {
                let level = value
                    .parse::<Level>()
                    .map_err(|_| ConfigError::UnknownLevel {
                        key: key.clone(),
                        value,
                    })?;

                if key == keys::DEFAULT_LEVEL {
                    diagnostics.debug(format_args!("Setting default level to: {level}"));
                    builder.set_default_level(level);
                } else {
                    diagnostics.debug(format_args!("Setting level for: {key} to: {level}"));
                    builder.add_assignment(key, level);
                }
            }
        }

        Ok(())
    }

    fn finish(&self, builder: ConfigBuilder) -> ConfigStore {
        match self.max_tag_len {
            Some(max_tag_len) => builder.max_tag_len(max_tag_len).build(),
            None => builder.build(),
        }
    }

    fn diagnostics(&self) -> Diagnostics<'_> {
        Diagnostics::new(self.diagnostics_sink.as_deref())
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("base_dir", &self.base_dir)
            .field("kill_switch", &self.kill_switch)
            .field("max_tag_len", &self.max_tag_len)
            .field("has_diagnostics_sink", &self.diagnostics_sink.is_some())
            .finish()
    }
}
