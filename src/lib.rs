//! encrypt-csv - Batch CSV column encryption utility
//!
//! This library provides the core functionality for the encrypt-csv tool.
//! It reads a CSV file, encrypts the values in a configurable subset of
//! columns using an AEAD keyset loaded from disk, and writes a new CSV
//! with those columns replaced by base64-encoded ciphertext.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Flag resolution and defaults
//! - `error`: Custom error types
//! - `keyset`: Cleartext binary keyset format (load/generate)
//! - `crypto`: AEAD encryption capability built from a keyset
//! - `pipeline`: Header resolution and the row transformation loop
//!
//! # Example
//!
//! ```rust,ignore
//! use encrypt_csv::crypto::Encryptor;
//! use encrypt_csv::keyset::Keyset;
//! use encrypt_csv::pipeline;
//!
//! let keyset = Keyset::read_cleartext("key")?;
//! let encryptor = Encryptor::new(&keyset)?;
//! let summary = pipeline::encrypt_csv(input, output, &encryptor, "Issuing Bank")?;
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod keyset;
pub mod pipeline;

pub use error::{EncryptCsvError, EncryptCsvResult};
