//! On-disk keystore record format (JSON)

use crate::error::KeystoreError;
use crate::keystore::cipher::IV_LEN;
use crate::keystore::secret::SecretMaterial;
use crate::keystore::DEFAULT_KDF_ITERATIONS;
use serde::{Deserialize, Serialize};

/// Schema tag written into every record
pub const SCHEMA_V1: &str = "walrus-keystore-v1";

pub const SALT_LEN: usize = 16;

/// A decoded keystore record
#[derive(Debug, Clone)]
pub enum KeystoreRecord {
    Plain {
        secret: SecretMaterial,
    },
    Encrypted {
        ciphertext: Vec<u8>,
        iv: [u8; IV_LEN],
        salt: [u8; SALT_LEN],
        /// PBKDF2 iteration count the key was derived with
        iterations: u32,
    },
}

/// Wire form of a record. Every byte field is hex-encoded.
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    schema: String,
    encrypted: bool,
    #[serde(
        rename = "privateKey",
        alias = "secret",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iterations: Option<u32>,
}

/// Just the schema tag, read before anything else is interpreted
#[derive(Deserialize)]
struct SchemaTag {
    schema: Option<String>,
}

impl KeystoreRecord {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, KeystoreRecord::Encrypted { .. })
    }

    /// Serialize to the JSON document stored on disk
    pub fn to_json(&self) -> Result<Vec<u8>, KeystoreError> {
        let file = match self {
            KeystoreRecord::Plain { secret } => RecordFile {
                schema: SCHEMA_V1.to_string(),
                encrypted: false,
                private_key: Some(secret.to_hex()),
                data: None,
                iv: None,
                salt: None,
                iterations: None,
            },
            KeystoreRecord::Encrypted {
                ciphertext,
                iv,
                salt,
                iterations,
            } => RecordFile {
                schema: SCHEMA_V1.to_string(),
                encrypted: true,
                private_key: None,
                data: Some(hex::encode(ciphertext)),
                iv: Some(hex::encode(iv)),
                salt: Some(hex::encode(salt)),
                iterations: Some(*iterations),
            },
        };
        serde_json::to_vec_pretty(&file).map_err(|e| KeystoreError::Malformed(e.to_string()))
    }

    /// Parse a stored JSON document
    ///
    /// The schema tag is checked first; fields are only interpreted for a known schema.
    pub fn from_json(bytes: &[u8]) -> Result<Self, KeystoreError> {
        let tag: SchemaTag =
            serde_json::from_slice(bytes).map_err(|e| KeystoreError::Malformed(e.to_string()))?;
        match tag.schema.as_deref() {
            Some(SCHEMA_V1) => {}
            Some(other) => return Err(KeystoreError::UnsupportedSchema(other.to_string())),
            None => return Err(KeystoreError::Malformed("missing schema field".to_string())),
        }

        let file: RecordFile =
            serde_json::from_slice(bytes).map_err(|e| KeystoreError::Malformed(e.to_string()))?;

        if !file.encrypted {
            let encoded = required(file.private_key, "privateKey")?;
            let secret = SecretMaterial::from_hex(&encoded)
                .map_err(|e| KeystoreError::Malformed(format!("privateKey: {}", e)))?;
            return Ok(KeystoreRecord::Plain { secret });
        }

        let ciphertext = decode_hex(required(file.data, "data")?, "data")?;
        let iv = decode_fixed::<IV_LEN>(required(file.iv, "iv")?, "iv")?;
        let salt = decode_fixed::<SALT_LEN>(required(file.salt, "salt")?, "salt")?;
        // Records written before the count was stored used the default
        let iterations = file.iterations.unwrap_or(DEFAULT_KDF_ITERATIONS);
        if iterations == 0 {
            return Err(KeystoreError::Malformed(
                "iterations: must be greater than zero".to_string(),
            ));
        }

        Ok(KeystoreRecord::Encrypted {
            ciphertext,
            iv,
            salt,
            iterations,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, KeystoreError> {
    value.ok_or_else(|| KeystoreError::Malformed(format!("missing field `{}`", field)))
}

fn decode_hex(value: String, field: &str) -> Result<Vec<u8>, KeystoreError> {
    hex::decode(value.trim()).map_err(|e| KeystoreError::Malformed(format!("{}: {}", field, e)))
}

fn decode_fixed<const N: usize>(value: String, field: &str) -> Result<[u8; N], KeystoreError> {
    let bytes = decode_hex(value, field)?;
    bytes.as_slice().try_into().map_err(|_| {
        KeystoreError::Malformed(format!(
            "{}: expected {} bytes, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}
