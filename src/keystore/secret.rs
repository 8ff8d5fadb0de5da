//! Secret material wrapper that is zeroized when dropped.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw private signing key bytes.
///
/// `Debug` is redacted so the bytes cannot end up in logs or error output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretMaterial(Vec<u8>);

impl SecretMaterial {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse hex, tolerating a leading `0x`.
    pub fn from_hex(input: &str) -> Result<Self, hex::FromHexError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        hex::decode(digits).map(Self)
    }

    /// Fresh random 32-byte secret.
    pub fn generate() -> Self {
        let bytes: [u8; 32] = crate::hashing::random_bytes();
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short identifier for display: first 16 hex chars of the SHA-256 of the secret.
    pub fn fingerprint(&self) -> String {
        let mut digest = crate::hashing::digest(&self.0);
        digest.truncate(16);
        digest
    }

    pub(crate) fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for SecretMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretMaterial([REDACTED; {} bytes])", self.0.len())
    }
}
