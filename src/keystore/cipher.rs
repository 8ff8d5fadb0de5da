//! AES-256-CBC with PKCS#7 padding.
//!
//! CBC carries no authentication tag: a wrong key is only detected when the
//! padding of the last block fails to validate, which is not guaranteed.

use crate::error::KeystoreError;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

pub fn encrypt(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>, KeystoreError> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv).map_err(|_| {
        KeystoreError::KeyDerivation(format!(
            "invalid key length: expected {}, got {}",
            KEY_LEN,
            key.len()
        ))
    })?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

pub fn decrypt(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, KeystoreError> {
    let cipher = Aes256CbcDec::new_from_slices(key, iv).map_err(|_| {
        KeystoreError::KeyDerivation(format!(
            "invalid key length: expected {}, got {}",
            KEY_LEN,
            key.len()
        ))
    })?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| KeystoreError::DecryptionFailed)
}
