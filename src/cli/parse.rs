//! CLI parse: clap types for walrus-deploy. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// walrus-deploy - publish static sites to Walrus
#[derive(Parser)]
#[command(name = "walrus-deploy")]
#[command(about = "Keystore and manifest tooling for publishing static sites to Walrus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: ~/.walrus/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import or generate a signing key and store it in the keystore
    Login {
        /// Private key to import (hex, optional 0x prefix)
        #[arg(long, conflicts_with = "generate")]
        key: Option<String>,
        /// Generate a new random key instead of importing one
        #[arg(long)]
        generate: bool,
        /// Store the key unencrypted without asking
        #[arg(long)]
        no_password: bool,
    },
    /// Show the currently stored key
    Whoami,
    /// Keystore commands
    Keystore {
        #[command(subcommand)]
        command: KeystoreCommands,
    },
    /// List the files of a site directory with their hashes
    Scan {
        /// Site root directory
        dir: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compare a site directory against a deployed manifest
    Diff {
        /// Site root directory
        dir: PathBuf,
        /// JSON manifest of the deployed site ({"path": "hash", ...})
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Read and update configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Blob operations through the walrus binary
    Blob {
        #[command(subcommand)]
        command: BlobCommands,
    },
}

#[derive(Subcommand)]
pub enum KeystoreCommands {
    /// Print the resolved keystore file path
    Path,
    /// Show whether a keystore exists and whether it is encrypted
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a setting
    Get { key: String },
    /// Change a setting and save the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
}

#[derive(Subcommand)]
pub enum BlobCommands {
    /// Store a file as a blob
    Store { file: PathBuf },
    /// Read a blob into a file
    Read {
        blob_id: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Delete a blob
    Delete { blob_id: String },
}
