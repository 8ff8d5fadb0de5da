//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{BlobCommands, Commands, ConfigCommands, KeystoreCommands};
use crate::cli::presentation::{format_diff, format_scan};
use crate::cli::prompt::{Prompter, TerminalPrompter};
use crate::config::{ConfigLoader, WalrusConfig};
use crate::error::{ApiError, KeystoreError, SiteError};
use crate::keystore::{Keystore, KeystoreState, SecretMaterial};
use crate::site::{self, Manifest, ScanConfig, SiteScanner};
use crate::tool::{BlobClient, ProcessRunner};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved config plus the prompt backend.
pub struct RunContext {
    config: WalrusConfig,
    config_path: PathBuf,
    prompter: Box<dyn Prompter>,
    color: bool,
}

impl RunContext {
    /// Load configuration from `config_path` (or the default location) and use terminal prompts.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        let config_path = config_path.unwrap_or_else(ConfigLoader::default_path);
        Ok(Self {
            config,
            config_path,
            prompter: Box::new(TerminalPrompter),
            color: std::io::stdout().is_terminal(),
        })
    }

    /// Build from an already-resolved configuration with a custom prompt backend.
    pub fn with_config(
        config: WalrusConfig,
        config_path: PathBuf,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            config,
            config_path,
            prompter,
            color: false,
        }
    }

    pub fn config(&self) -> &WalrusConfig {
        &self.config
    }

    fn keystore(&self) -> Keystore {
        Keystore::from_config(&self.config.keystore)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Login {
                key,
                generate,
                no_password,
            } => self.handle_login(key.as_deref(), *generate, *no_password),
            Commands::Whoami => self.handle_whoami(),
            Commands::Keystore { command } => self.handle_keystore(command),
            Commands::Scan { dir, format } => self.handle_scan(dir, format),
            Commands::Diff {
                dir,
                manifest,
                format,
            } => self.handle_diff(dir, manifest.as_deref(), format),
            Commands::Config { command } => self.handle_config(command),
            Commands::Blob { command } => self.handle_blob(command),
        };
        debug!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_login(
        &self,
        key: Option<&str>,
        generate: bool,
        no_password: bool,
    ) -> Result<String, ApiError> {
        let mut notes = Vec::new();

        let secret = match (key, generate) {
            (Some(hex_key), _) => parse_secret(hex_key)?,
            (None, true) => {
                notes.push("Generated a new key. Fund its address before deploying.".to_string());
                SecretMaterial::generate()
            }
            (None, false) => {
                let choice = self.prompter.select(
                    "How would you like to login?",
                    &["Import private key", "Generate new key"],
                )?;
                if choice == 0 {
                    let entered = self.prompter.password("Private key (hex)", false)?;
                    parse_secret(&entered)?
                } else {
                    notes.push(
                        "Generated a new key. Fund its address before deploying.".to_string(),
                    );
                    SecretMaterial::generate()
                }
            }
        };

        let password = if no_password {
            None
        } else if self
            .prompter
            .confirm("Encrypt the keystore with a password?", true)?
        {
            Some(self.prompter.password("Password", true)?)
        } else {
            None
        };

        let keystore = self.keystore();
        keystore.save(&secret, password.as_deref())?;
        info!(encrypted = password.is_some(), "Login stored key");

        if password.is_none() {
            notes.push("Warning: keystore is stored unencrypted.".to_string());
        }
        notes.insert(
            0,
            format!(
                "Login successful. Credentials saved to {}",
                keystore.path().display()
            ),
        );
        notes.push(format!("Key fingerprint: {}", secret.fingerprint()));
        Ok(notes.join("\n"))
    }

    fn handle_whoami(&self) -> Result<String, ApiError> {
        let keystore = self.keystore();
        let (secret, encrypted) = match keystore.load(None) {
            Ok(secret) => (secret, false),
            Err(KeystoreError::PasswordRequired) => {
                let password = self
                    .prompter
                    .password("Keystore is encrypted. Enter password", false)?;
                (keystore.load(Some(&password))?, true)
            }
            Err(e) => return Err(e.into()),
        };

        let Some(secret) = secret else {
            return Ok("Not logged in.".to_string());
        };

        Ok(format!(
            "Logged in\n  Keystore: {}\n  Encrypted: {}\n  Key fingerprint: {}",
            keystore.path().display(),
            if encrypted { "yes" } else { "no" },
            secret.fingerprint()
        ))
    }

    fn handle_keystore(&self, command: &KeystoreCommands) -> Result<String, ApiError> {
        let keystore = self.keystore();
        match command {
            KeystoreCommands::Path => Ok(keystore.path().display().to_string()),
            KeystoreCommands::Status => {
                let state = match keystore.state()? {
                    KeystoreState::Absent => "absent",
                    KeystoreState::Plain => "plain (unencrypted)",
                    KeystoreState::Encrypted => "encrypted",
                };
                Ok(format!("{}: {}", keystore.path().display(), state))
            }
        }
    }

    fn scanner(&self, dir: &Path) -> SiteScanner {
        SiteScanner::with_config(dir, ScanConfig::from(&self.config.site))
    }

    fn handle_scan(&self, dir: &Path, format: &str) -> Result<String, ApiError> {
        let entries = self.scanner(dir).scan()?;
        format_scan(&entries, format)
    }

    fn handle_diff(
        &self,
        dir: &Path,
        manifest_path: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        let remote = match manifest_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
                site::parse_manifest(&json)?
            }
            None => Manifest::new(),
        };

        let local = self.scanner(dir).scan()?;
        let diff = site::compare(&local, &remote);
        info!(
            added = diff.added.len(),
            modified = diff.modified.len(),
            deleted = diff.deleted.len(),
            "Computed site diff"
        );
        format_diff(&diff, format, self.color)
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Get { key } => Ok(self
                .config
                .get(key)?
                .unwrap_or_else(|| "(unset)".to_string())),
            ConfigCommands::Set { key, value } => {
                let mut stored = ConfigLoader::load_for_edit(&self.config_path)?;
                stored.set(key, value)?;
                ConfigLoader::save(&stored, &self.config_path)?;
                Ok(format!("{} = {}", key, value))
            }
            ConfigCommands::Path => Ok(self.config_path.display().to_string()),
        }
    }

    fn handle_blob(&self, command: &BlobCommands) -> Result<String, ApiError> {
        let client = BlobClient::new(ProcessRunner::new(self.config.walrus_binary()));
        match command {
            BlobCommands::Store { file } => {
                let result = client.store_blob(file)?;
                Ok(format!("Blob ID: {}", result.blob_id))
            }
            BlobCommands::Read { blob_id, out } => {
                client.read_blob(blob_id, out)?;
                Ok(format!("Blob {} written to {}", blob_id, out.display()))
            }
            BlobCommands::Delete { blob_id } => {
                client.delete_blob(blob_id)?;
                Ok(format!("Blob {} deleted", blob_id))
            }
        }
    }
}

fn parse_secret(input: &str) -> Result<SecretMaterial, ApiError> {
    let secret = SecretMaterial::from_hex(input)
        .map_err(|_| ApiError::InvalidInput("private key must be hex-encoded".to_string()))?;
    if secret.is_empty() {
        return Err(ApiError::InvalidInput("private key is empty".to_string()));
    }
    Ok(secret)
}
