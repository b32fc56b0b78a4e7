//! Cleartext binary keyset format
//!
//! A keyset is a bundle of one or more AEAD keys plus metadata naming
//! their algorithm and which key is currently primary. On disk it is a
//! 4-byte magic followed by a bincode-encoded [`Keyset`], stored without
//! any wrapping encryption (the key material is read as cleartext).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{EncryptCsvError, EncryptCsvResult};

/// File magic identifying a cleartext keyset
pub const KEYSET_MAGIC: &[u8; 4] = b"CKS1";

/// AEAD algorithm of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// AES-128-GCM (16-byte key)
    Aes128Gcm,
    /// AES-256-GCM (32-byte key)
    Aes256Gcm,
}

impl KeyAlgorithm {
    /// Required key material length in bytes
    pub fn key_len(&self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes256Gcm => 32,
        }
    }
}

/// Lifecycle status of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Key may be used for encryption and decryption
    Enabled,
    /// Key is retained but must not be used
    Disabled,
}

/// A single key inside a keyset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    /// Identifier embedded in every ciphertext produced with this key
    pub key_id: u32,
    /// AEAD algorithm this material belongs to
    pub algorithm: KeyAlgorithm,
    /// Lifecycle status
    pub status: KeyStatus,
    /// Raw key material
    pub material: Vec<u8>,
}

impl Drop for Key {
    fn drop(&mut self) {
        self.material.zeroize();
    }
}

/// A serialized bundle of keys with a designated primary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyset {
    /// Key id of the currently active key
    pub primary_key_id: u32,
    /// All keys in the set
    pub keys: Vec<Key>,
}

impl Keyset {
    /// Generate a fresh single-key keyset for the given algorithm
    pub fn generate(algorithm: KeyAlgorithm) -> Self {
        let mut material = vec![0u8; algorithm.key_len()];
        OsRng.fill_bytes(&mut material);

        // Key ids are embedded in ciphertexts; zero is reserved.
        let mut key_id = OsRng.next_u32();
        while key_id == 0 {
            key_id = OsRng.next_u32();
        }

        Self {
            primary_key_id: key_id,
            keys: vec![Key {
                key_id,
                algorithm,
                status: KeyStatus::Enabled,
                material,
            }],
        }
    }

    /// Look up the primary key
    pub fn primary(&self) -> EncryptCsvResult<&Key> {
        self.keys
            .iter()
            .find(|k| k.key_id == self.primary_key_id)
            .ok_or_else(|| {
                EncryptCsvError::Keyset(format!(
                    "primary key id {} not present in keyset",
                    self.primary_key_id
                ))
            })
    }

    /// Decode a keyset from its cleartext binary representation
    pub fn from_cleartext_bytes(bytes: &[u8]) -> EncryptCsvResult<Self> {
        let payload = bytes.strip_prefix(KEYSET_MAGIC.as_slice()).ok_or_else(|| {
            EncryptCsvError::Keyset("not a keyset file (bad magic)".to_string())
        })?;

        let (keyset, consumed): (Keyset, usize) =
            bincode::serde::decode_from_slice(payload, bincode::config::standard())
                .map_err(|e| EncryptCsvError::Keyset(format!("malformed keyset: {}", e)))?;

        if consumed != payload.len() {
            return Err(EncryptCsvError::Keyset(
                "trailing bytes after keyset payload".to_string(),
            ));
        }

        Ok(keyset)
    }

    /// Encode this keyset to its cleartext binary representation
    pub fn to_cleartext_bytes(&self) -> EncryptCsvResult<Vec<u8>> {
        let payload = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| EncryptCsvError::Keyset(format!("failed to encode keyset: {}", e)))?;

        let mut bytes = Vec::with_capacity(KEYSET_MAGIC.len() + payload.len());
        bytes.extend_from_slice(KEYSET_MAGIC);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Read a cleartext keyset from a file
    pub fn read_cleartext<P: AsRef<Path>>(path: P) -> EncryptCsvResult<Self> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| {
            EncryptCsvError::Io(format!("Failed to open keyset {}: {}", path.display(), e))
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            EncryptCsvError::Io(format!("Failed to read keyset {}: {}", path.display(), e))
        })?;

        Self::from_cleartext_bytes(&bytes)
    }

    /// Write this keyset to a file as cleartext
    pub fn write_cleartext<P: AsRef<Path>>(&self, path: P) -> EncryptCsvResult<()> {
        let path = path.as_ref();
        let bytes = self.to_cleartext_bytes()?;

        let mut file = File::create(path).map_err(|e| {
            EncryptCsvError::Io(format!("Failed to create keyset {}: {}", path.display(), e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            EncryptCsvError::Io(format!("Failed to write keyset {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_single_enabled_key() {
        let keyset = Keyset::generate(KeyAlgorithm::Aes256Gcm);
        assert_eq!(keyset.keys.len(), 1);

        let primary = keyset.primary().unwrap();
        assert_eq!(primary.status, KeyStatus::Enabled);
        assert_eq!(primary.material.len(), 32);
        assert_ne!(primary.key_id, 0);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key");

        let keyset = Keyset::generate(KeyAlgorithm::Aes128Gcm);
        keyset.write_cleartext(&path).unwrap();

        let loaded = Keyset::read_cleartext(&path).unwrap();
        assert_eq!(loaded.primary_key_id, keyset.primary_key_id);
        assert_eq!(loaded.keys[0].material, keyset.keys[0].material);
        assert_eq!(loaded.keys[0].algorithm, KeyAlgorithm::Aes128Gcm);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Keyset::read_cleartext(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EncryptCsvError::Io(_)));
        assert!(err.to_string().contains("Failed to open keyset"));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let err = Keyset::from_cleartext_bytes(b"XXXXwhatever").unwrap_err();
        assert!(err.is_keyset());
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let bytes = Keyset::generate(KeyAlgorithm::Aes256Gcm)
            .to_cleartext_bytes()
            .unwrap();
        let err = Keyset::from_cleartext_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(err.is_keyset());
    }

    #[test]
    fn test_missing_primary_rejected() {
        let mut keyset = Keyset::generate(KeyAlgorithm::Aes256Gcm);
        keyset.primary_key_id = keyset.primary_key_id.wrapping_add(1);
        assert!(keyset.primary().is_err());
    }
}
