//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site)
//! 2. Environment variables, `NSGEN__<SECTION>__<KEY>`
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nsgen_core::domain::{DEFAULT_NS_EXTENSION, DEFAULT_WEB_EXTENSION};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "NSGEN";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Option defaults for `nsgen add`.
    pub defaults: Defaults,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub ns_extension: String,
    pub web_extension: String,
    pub sample: bool,
    pub skip_auto_generated_component: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ns_extension: DEFAULT_NS_EXTENSION.into(),
            web_extension: DEFAULT_WEB_EXTENSION.into(),
            sample: false,
            skip_auto_generated_component: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.nsgen.toml` in the
    /// current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "nsgen", "nsgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".nsgen.toml"))
    }

    /// The file `load` reads: the `--config` path or the default location.
    pub fn resolve_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Look up a dotted key such as `defaults.sample`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = match key {
            "defaults.ns_extension" => self.defaults.ns_extension.clone(),
            "defaults.web_extension" => self.defaults.web_extension.clone(),
            "defaults.sample" => self.defaults.sample.to_string(),
            "defaults.skip_auto_generated_component" => {
                self.defaults.skip_auto_generated_component.to_string()
            }
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => {
                return Err(CliError::ConfigError {
                    message: format!("Unknown config key: '{key}'"),
                    source: None,
                });
            }
        };
        Ok(value)
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
