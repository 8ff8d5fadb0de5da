//! Config loading: defaults, then the TOML file, then `WALRUS_*` environment variables.

use super::{walrus_home, WalrusConfig};
use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and persists `WalrusConfig`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config file location: `~/.walrus/config.toml`
    pub fn default_path() -> PathBuf {
        walrus_home().join("config.toml")
    }

    /// Load configuration. `path` overrides the default file location; a missing
    /// file at either location falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<WalrusConfig, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        Self::build(&path, false, Some(Self::environment()))
    }

    /// Load configuration from a file that must exist
    pub fn load_from_file(path: &Path) -> Result<WalrusConfig, ConfigError> {
        Self::build(path, true, Some(Self::environment()))
    }

    /// Load only what the file itself says, for read-modify-write edits
    ///
    /// `WALRUS_*` variables are not applied, so saving the result never copies
    /// them into the file. A missing file yields defaults.
    pub fn load_for_edit(path: &Path) -> Result<WalrusConfig, ConfigError> {
        Self::build(path, false, None)
    }

    /// Write configuration as TOML, creating the parent directory
    pub fn save(config: &WalrusConfig, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn environment() -> Environment {
        Environment::with_prefix("WALRUS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub(crate) fn build(
        path: &Path,
        required: bool,
        environment: Option<Environment>,
    ) -> Result<WalrusConfig, ConfigError> {
        let mut builder = builder_with_defaults()?;

        if path.exists() || required {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            );
        } else {
            debug!(
                config_path = %path.display(),
                "Configuration file not found, using defaults"
            );
        }

        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }

        let config: WalrusConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Config builder with merge defaults applied
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder().set_default("env", "testnet")?)
}
