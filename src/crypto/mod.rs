//! Cryptographic functions for encrypt-csv
//!
//! Provides the AEAD encryption capability built from a loaded keyset.
//! AES-GCM is the only supported primitive family.

pub mod encryption;

pub use encryption::{Encryptor, CIPHERTEXT_OVERHEAD};
