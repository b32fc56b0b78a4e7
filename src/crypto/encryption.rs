//! AES-GCM encryption/decryption bound to a keyset primary key
//!
//! Provides authenticated encryption for CSV values. Each encryption
//! operation generates a unique nonce. Ciphertexts carry a one-byte
//! format version and the id of the key that produced them, so a
//! decryptor holding the same keyset can verify it is using the right
//! key before authenticating.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes128Gcm, Aes256Gcm, Nonce,
};
use aes_gcm::aead::rand_core::RngCore;

use crate::error::{EncryptCsvError, EncryptCsvResult};
use crate::keyset::{Key, KeyAlgorithm, KeyStatus, Keyset};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Ciphertext format version
const FORMAT_VERSION: u8 = 1;

/// Fixed bytes prepended to every ciphertext: version + key id + nonce
pub const CIPHERTEXT_OVERHEAD: usize = 1 + 4 + NONCE_SIZE;

enum CipherKind {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl CipherKind {
    fn seal(&self, nonce: &[u8], payload: Payload<'_, '_>) -> EncryptCsvResult<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, payload),
            Self::Aes256(c) => c.encrypt(nonce, payload),
        }
        .map_err(|e| EncryptCsvError::Encryption(format!("Encryption failed: {}", e)))
    }

    fn open(&self, nonce: &[u8], payload: Payload<'_, '_>) -> EncryptCsvResult<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.decrypt(nonce, payload),
            Self::Aes256(c) => c.decrypt(nonce, payload),
        }
        .map_err(|_| {
            EncryptCsvError::Encryption(
                "Decryption failed: invalid key or corrupted data".to_string(),
            )
        })
    }
}

/// AEAD encryption capability derived from a keyset's primary key
///
/// Loaded once during initialization and passed by reference into the
/// row transformation loop.
pub struct Encryptor {
    cipher: CipherKind,
    key_id: u32,
}

// Manual impl: the wrapped cipher types expose no Debug, and key
// material must not leak into diagnostics anyway.
impl std::fmt::Debug for Encryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let algorithm = match self.cipher {
            CipherKind::Aes128(_) => "Aes128Gcm",
            CipherKind::Aes256(_) => "Aes256Gcm",
        };
        f.debug_struct("Encryptor")
            .field("key_id", &self.key_id)
            .field("algorithm", &algorithm)
            .finish()
    }
}

impl Encryptor {
    /// Build an encryptor from a keyset's primary key
    ///
    /// Fails if the primary key is missing, disabled, or its material
    /// length does not match its declared algorithm.
    pub fn new(keyset: &Keyset) -> EncryptCsvResult<Self> {
        let primary = keyset.primary()?;
        Self::from_key(primary)
    }

    fn from_key(key: &Key) -> EncryptCsvResult<Self> {
        if key.status != KeyStatus::Enabled {
            return Err(EncryptCsvError::Encryption(format!(
                "primary key {} is disabled",
                key.key_id
            )));
        }

        if key.material.len() != key.algorithm.key_len() {
            return Err(EncryptCsvError::Encryption(format!(
                "key {} has {} bytes of material, algorithm requires {}",
                key.key_id,
                key.material.len(),
                key.algorithm.key_len()
            )));
        }

        let cipher = match key.algorithm {
            KeyAlgorithm::Aes128Gcm => {
                CipherKind::Aes128(Aes128Gcm::new_from_slice(&key.material).map_err(|e| {
                    EncryptCsvError::Encryption(format!("Failed to create cipher: {}", e))
                })?)
            }
            KeyAlgorithm::Aes256Gcm => {
                CipherKind::Aes256(Aes256Gcm::new_from_slice(&key.material).map_err(|e| {
                    EncryptCsvError::Encryption(format!("Failed to create cipher: {}", e))
                })?)
            }
        };

        Ok(Self {
            cipher,
            key_id: key.key_id,
        })
    }

    /// Id of the key this capability encrypts with
    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    /// Encrypt plaintext, binding the associated data into the tag
    ///
    /// Output layout: `[version][key id BE][nonce][ciphertext || tag]`.
    pub fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> EncryptCsvResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);

        let sealed = self.cipher.seal(
            &nonce_bytes,
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )?;

        let mut out = Vec::with_capacity(CIPHERTEXT_OVERHEAD + sealed.len());
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&self.key_id.to_be_bytes());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Decrypt a ciphertext produced by [`Encryptor::encrypt`]
    pub fn decrypt(&self, data: &[u8], associated_data: &[u8]) -> EncryptCsvResult<Vec<u8>> {
        if data.len() < CIPHERTEXT_OVERHEAD {
            return Err(EncryptCsvError::Encryption(
                "ciphertext too short".to_string(),
            ));
        }

        let version = data[0];
        if version != FORMAT_VERSION {
            return Err(EncryptCsvError::Encryption(format!(
                "Unsupported ciphertext version: {}",
                version
            )));
        }

        let mut id_bytes = [0u8; 4];
        id_bytes.copy_from_slice(&data[1..5]);
        let key_id = u32::from_be_bytes(id_bytes);
        if key_id != self.key_id {
            return Err(EncryptCsvError::Encryption(format!(
                "ciphertext was produced with key {}, this capability holds key {}",
                key_id, self.key_id
            )));
        }

        let nonce = &data[5..CIPHERTEXT_OVERHEAD];
        let sealed = &data[CIPHERTEXT_OVERHEAD..];

        self.cipher.open(
            nonce,
            Payload {
                msg: sealed,
                aad: associated_data,
            },
        )
    }
}
