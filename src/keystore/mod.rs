//! Local keystore
//!
//! Persists a single signing key's secret material at a configurable path,
//! optionally encrypted with a password. A keystore file is in one of three
//! states (absent, plain record, encrypted record); `save` always overwrites,
//! `load` never mutates.

pub mod cipher;
pub mod record;
pub mod secret;

pub use record::{KeystoreRecord, SALT_LEN, SCHEMA_V1};
pub use secret::SecretMaterial;

use crate::config::KeystoreConfig;
use crate::error::KeystoreError;
use crate::hashing;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Default PBKDF2 iteration count for new encrypted records
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Key derivation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

/// What is currently stored at the keystore path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystoreState {
    Absent,
    Plain,
    Encrypted,
}

/// File-backed keystore
#[derive(Debug, Clone)]
pub struct Keystore {
    path: PathBuf,
    kdf: KdfParams,
}

impl Keystore {
    /// Create a keystore at the given file path with default KDF parameters
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kdf: KdfParams::default(),
        }
    }

    /// Create a keystore with custom KDF parameters
    pub fn with_kdf(path: impl Into<PathBuf>, kdf: KdfParams) -> Self {
        Self {
            path: path.into(),
            kdf,
        }
    }

    /// Build from resolved configuration
    pub fn from_config(config: &KeystoreConfig) -> Self {
        Self::with_kdf(
            config.path.clone(),
            KdfParams {
                iterations: config.kdf_iterations,
            },
        )
    }

    /// Resolved keystore file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save secret material, replacing whatever record was there before
    ///
    /// With a password the secret is encrypted under a PBKDF2-derived key with a
    /// fresh salt and IV; without one it is stored as a plain record. Either way
    /// the file is readable and writable by the owner only.
    pub fn save(&self, secret: &SecretMaterial, password: Option<&str>) -> Result<(), KeystoreError> {
        let record = match password {
            Some(password) => self.seal(secret, password)?,
            None => KeystoreRecord::Plain {
                secret: secret.clone(),
            },
        };

        let document = record.to_json()?;
        write_owner_only(&self.path, &document)?;

        info!(
            path = %self.path.display(),
            encrypted = record.is_encrypted(),
            "Keystore saved"
        );
        Ok(())
    }

    /// Load secret material
    ///
    /// Returns `Ok(None)` when no keystore file exists. A plain record ignores the
    /// password. An encrypted record requires one; a wrong password surfaces as
    /// `DecryptionFailed` when the padding check catches it.
    pub fn load(&self, password: Option<&str>) -> Result<Option<SecretMaterial>, KeystoreError> {
        let record = match self.read_record()? {
            Some(record) => record,
            None => {
                debug!(path = %self.path.display(), "No keystore found");
                return Ok(None);
            }
        };

        match record {
            KeystoreRecord::Plain { secret } => Ok(Some(secret)),
            KeystoreRecord::Encrypted {
                ciphertext,
                iv,
                salt,
                iterations,
            } => {
                let password = password.ok_or(KeystoreError::PasswordRequired)?;
                // The record's own count, not the configured one
                let key = Zeroizing::new(hashing::derive_key(
                    password.as_bytes(),
                    &salt,
                    iterations,
                    cipher::KEY_LEN,
                )?);
                let plaintext = cipher::decrypt(&key, &iv, &ciphertext)?;
                debug!(path = %self.path.display(), "Keystore decrypted");
                Ok(Some(SecretMaterial::new(plaintext)))
            }
        }
    }

    /// Report the stored record kind without decrypting anything
    pub fn state(&self) -> Result<KeystoreState, KeystoreError> {
        Ok(match self.read_record()? {
            None => KeystoreState::Absent,
            Some(record) if record.is_encrypted() => KeystoreState::Encrypted,
            Some(_) => KeystoreState::Plain,
        })
    }

    fn seal(&self, secret: &SecretMaterial, password: &str) -> Result<KeystoreRecord, KeystoreError> {
        let salt: [u8; SALT_LEN] = hashing::random_bytes();
        let iv: [u8; cipher::IV_LEN] = hashing::random_bytes();
        let key = Zeroizing::new(hashing::derive_key(
            password.as_bytes(),
            &salt,
            self.kdf.iterations,
            cipher::KEY_LEN,
        )?);
        let ciphertext = cipher::encrypt(&key, &iv, secret.as_bytes())?;
        Ok(KeystoreRecord::Encrypted {
            ciphertext,
            iv,
            salt,
            iterations: self.kdf.iterations,
        })
    }

    fn read_record(&self) -> Result<Option<KeystoreRecord>, KeystoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KeystoreError::Io(e)),
        };
        KeystoreRecord::from_json(&bytes).map(Some)
    }
}

/// Write `contents` to `path` with mode 0o600, creating parent directories
fn write_owner_only(path: &Path, contents: &[u8]) -> Result<(), KeystoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // The open mode only applies on creation; tighten a pre-existing file too
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}
