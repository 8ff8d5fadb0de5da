//! Configuration System
//!
//! A single explicit `WalrusConfig` value, built by `ConfigLoader` from defaults,
//! an optional TOML file, and `WALRUS_*` environment variables, then handed to
//! the components that need it. Nothing reads configuration from global state.

use crate::error::ConfigError;
use crate::keystore::DEFAULT_KDF_ITERATIONS;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

mod loader;

pub use loader::ConfigLoader;

/// Keys accepted by `WalrusConfig::get` and `WalrusConfig::set`
pub const SETTABLE_KEYS: &[&str] = &[
    "env",
    "walrus_binary_path",
    "sui_rpc_url",
    "walrus_aggregator_url",
    "walrus_publisher_url",
    "keystore.path",
    "keystore.kdf_iterations",
];

/// Target network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    #[default]
    Testnet,
    Mainnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(ConfigError::InvalidValue {
                key: "env".to_string(),
                message: format!("'{}' is not one of devnet, testnet, mainnet", other),
            }),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalrusConfig {
    /// Target network
    #[serde(default)]
    pub env: Network,

    /// Path to the `walrus` binary (default: resolved from PATH)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walrus_binary_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sui_rpc_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walrus_aggregator_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walrus_publisher_url: Option<String>,

    #[serde(default)]
    pub keystore: KeystoreConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keystore location and key-derivation cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystoreConfig {
    #[serde(default = "default_keystore_path")]
    pub path: PathBuf,

    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

/// Site scanning options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Path component names excluded from scans (e.g. ".git")
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// `~/.walrus`, or `.walrus` relative to the working directory when no home is known
pub fn walrus_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".walrus"))
        .unwrap_or_else(|| PathBuf::from(".walrus"))
}

fn default_keystore_path() -> PathBuf {
    walrus_home().join("walrus.keystore")
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_KDF_ITERATIONS
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            path: default_keystore_path(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Default for WalrusConfig {
    fn default() -> Self {
        Self {
            env: Network::default(),
            walrus_binary_path: None,
            sui_rpc_url: None,
            walrus_aggregator_url: None,
            walrus_publisher_url: None,
            keystore: KeystoreConfig::default(),
            site: SiteConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WalrusConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keystore.kdf_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                key: "keystore.kdf_iterations".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.keystore.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "keystore.path".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Binary used for blob operations
    pub fn walrus_binary(&self) -> PathBuf {
        self.walrus_binary_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("walrus"))
    }

    /// Read a scalar setting as display text. `None` when the key is unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "env" => Some(self.env.to_string()),
            "walrus_binary_path" => self
                .walrus_binary_path
                .as_ref()
                .map(|p| p.display().to_string()),
            "sui_rpc_url" => self.sui_rpc_url.clone(),
            "walrus_aggregator_url" => self.walrus_aggregator_url.clone(),
            "walrus_publisher_url" => self.walrus_publisher_url.clone(),
            "keystore.path" => Some(self.keystore.path.display().to_string()),
            "keystore.kdf_iterations" => Some(self.keystore.kdf_iterations.to_string()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Update a scalar setting from text
    ///
    /// The change is only applied when the resulting configuration validates.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match key {
            "env" => next.env = value.parse()?,
            "walrus_binary_path" => next.walrus_binary_path = Some(PathBuf::from(value)),
            "sui_rpc_url" => next.sui_rpc_url = Some(value.to_string()),
            "walrus_aggregator_url" => next.walrus_aggregator_url = Some(value.to_string()),
            "walrus_publisher_url" => next.walrus_publisher_url = Some(value.to_string()),
            "keystore.path" => next.keystore.path = PathBuf::from(value),
            "keystore.kdf_iterations" => {
                next.keystore.kdf_iterations =
                    value.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("{}", e),
                    })?
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}
