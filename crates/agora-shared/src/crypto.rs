use base64::{engine::general_purpose, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::constants::{KDF_CONTEXT_DB_KEY, NONCE_SIZE, SYMMETRIC_KEY_SIZE};
use crate::error::{CryptoError, KeyError};

pub type SymmetricKey = [u8; SYMMETRIC_KEY_SIZE];

pub fn generate_symmetric_key() -> SymmetricKey {
    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut key);
    key
}

pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    nonce
}

// Returns nonce || ciphertext (24 bytes nonce prepended)
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.into());
    let nonce_bytes = generate_nonce();
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

pub fn decrypt(key: &SymmetricKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < NONCE_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(key.into());
    let nonce = XNonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

// BLAKE3 KDF with domain separation
pub fn derive_key_from_passphrase(passphrase: &[u8]) -> SymmetricKey {
    let mut hasher = blake3::Hasher::new_derive_key(KDF_CONTEXT_DB_KEY);
    hasher.update(passphrase);
    let hash = hasher.finalize();
    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    key.copy_from_slice(&hash.as_bytes()[..SYMMETRIC_KEY_SIZE]);
    key
}

/// Parse a pre-shared key given either as 64 hex chars or as base64
/// (standard or URL-safe alphabet, padded or not).
pub fn parse_symmetric_key(encoded: &str) -> Result<SymmetricKey, KeyError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(KeyError::Empty);
    }

    let bytes = if encoded.len() == SYMMETRIC_KEY_SIZE * 2
        && encoded.bytes().all(|b| b.is_ascii_hexdigit())
    {
        hex::decode(encoded).map_err(|_| KeyError::InvalidEncoding)?
    } else {
        general_purpose::STANDARD
            .decode(encoded)
            .or_else(|_| general_purpose::URL_SAFE.decode(encoded))
            .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(encoded))
            .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(encoded))
            .map_err(|_| KeyError::InvalidEncoding)?
    };

    let bytes = Zeroizing::new(bytes);
    if bytes.len() != SYMMETRIC_KEY_SIZE {
        return Err(KeyError::InvalidLength(bytes.len()));
    }
    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Text codec used for whole collection documents.
///
/// Every call to [`Codec::encrypt`] draws a fresh nonce, so encrypting the
/// same document twice yields different blobs.  [`Codec::decrypt`] fails
/// closed: a blob that does not authenticate, or whose plaintext is not
/// UTF-8, is rejected with [`CryptoError::DecryptionFailed`].
#[derive(Clone)]
pub struct Codec {
    key: Zeroizing<SymmetricKey>,
}

impl Codec {
    pub fn new(key: SymmetricKey) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    pub fn from_encoded_key(encoded: &str) -> Result<Self, KeyError> {
        parse_symmetric_key(encoded).map(Self::new)
    }

    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::new(derive_key_from_passphrase(passphrase.as_bytes()))
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>, CryptoError> {
        encrypt(&self.key, plaintext.as_bytes())
    }

    pub fn decrypt(&self, blob: &[u8]) -> Result<String, CryptoError> {
        let bytes = decrypt(&self.key, blob)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::DecryptionFailed)
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("key", &"<redacted>").finish()
    }
}
