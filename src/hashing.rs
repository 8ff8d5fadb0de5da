//! Content digests and password-based key derivation

use crate::error::KeystoreError;
use hmac::Hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Compute the content hash for file bytes
///
/// Lowercase hex SHA-256 over the exact byte sequence.
pub fn digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Derive `output_len` bytes from a password and salt using PBKDF2-HMAC-SHA256.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Vec<u8>, KeystoreError> {
    if iterations == 0 {
        return Err(KeystoreError::KeyDerivation(
            "iteration count must be non-zero".to_string(),
        ));
    }

    let mut output = vec![0u8; output_len];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut output)
        .map_err(|e| KeystoreError::KeyDerivation(e.to_string()))?;

    Ok(output)
}

/// Fill a fixed-size buffer from the OS random number generator.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
