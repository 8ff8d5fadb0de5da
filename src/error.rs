//! Error types for the keystore, site differ, external tool, and configuration layers.
//!
//! Display strings never carry secret material or key bytes.

use std::path::PathBuf;
use thiserror::Error;

/// Keystore-related errors
#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("Keystore I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keystore is encrypted. Password required.")]
    PasswordRequired,

    #[error("Incorrect password or corrupted keystore")]
    DecryptionFailed,

    #[error("Unsupported keystore schema: {0}")]
    UnsupportedSchema(String),

    #[error("Malformed keystore record: {0}")]
    Malformed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

/// Site scanning and manifest errors
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("Distinct files map to the same site path {0:?}")]
    DuplicatePath(String),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}

/// External tool invocation errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to spawn {binary:?}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {exit_code}: {stderr}")]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Could not parse blob ID from output: {0}")]
    UnparseableOutput(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to write config {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// CLI-level errors: the union of every domain error a command can surface
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
