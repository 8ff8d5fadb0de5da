//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, KeystoreError};

/// Map domain/service errors to a string for CLI output.
///
/// Decryption failures collapse into one generic message with no cryptographic detail.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Keystore(KeystoreError::DecryptionFailed) => {
            "Incorrect password or corrupted keystore.".to_string()
        }
        ApiError::Keystore(KeystoreError::PasswordRequired) => {
            "Keystore is encrypted. Password required.".to_string()
        }
        ApiError::Keystore(KeystoreError::UnsupportedSchema(schema)) => format!(
            "Keystore format '{}' is not supported by this version of walrus-deploy.",
            schema
        ),
        other => other.to_string(),
    }
}
