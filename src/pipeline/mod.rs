//! Row transformation pipeline
//!
//! Reads the input CSV, resolves which columns to encrypt from the
//! header row, then streams the remaining rows through the encryptor:
//! targeted values are replaced with base64-encoded ciphertext, all
//! other values pass through unchanged. The first parse, encryption,
//! or write failure aborts the run, leaving the output partially
//! written.

pub mod header;

use std::fs::File;
use std::io::{Read, Write};

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::config::Config;
use crate::crypto::Encryptor;
use crate::error::{EncryptCsvError, EncryptCsvResult};

pub use header::TargetColumns;

/// Associated data bound into every ciphertext (empty, matching the
/// reference behavior)
pub const ENCRYPTION_CONTEXT: &[u8] = b"";

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptSummary {
    /// Data rows written (header excluded)
    pub rows: usize,
    /// Column positions that were encrypted
    pub target_columns: usize,
}

/// Encrypt the configured input file into the configured output file
///
/// Opens both files and delegates to [`encrypt_csv`]. The output file
/// is created (or truncated) before the first row is written.
pub fn encrypt_file(config: &Config, encryptor: &Encryptor) -> EncryptCsvResult<EncryptSummary> {
    let input = File::open(&config.input).map_err(|e| {
        EncryptCsvError::Io(format!(
            "Failed to open input {}: {}",
            config.input.display(),
            e
        ))
    })?;

    let output = File::create(&config.output).map_err(|e| {
        EncryptCsvError::Io(format!(
            "Failed to create output {}: {}",
            config.output.display(),
            e
        ))
    })?;

    encrypt_csv(input, output, encryptor, &config.fields)
}

/// Encrypt targeted columns of a CSV stream
///
/// The header row is written verbatim, never encrypted. Every value in
/// a targeted column is independently encrypted with empty associated
/// data and replaced by the standard base64 encoding of the ciphertext.
/// The writer is flushed once, after the last row.
pub fn encrypt_csv<R: Read, W: Write>(
    input: R,
    output: W,
    encryptor: &Encryptor,
    fields: &str,
) -> EncryptCsvResult<EncryptSummary> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(EncryptCsvError::Csv(
            "input is empty: missing header row".to_string(),
        ));
    }

    let targets = TargetColumns::resolve(&headers, fields);

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(&headers)?;

    let mut rows = 0usize;
    for result in reader.records() {
        let record = result?;

        let mut row: Vec<String> = Vec::with_capacity(record.len());
        for (i, value) in record.iter().enumerate() {
            if targets.contains(i) {
                let ciphertext = encryptor.encrypt(value.as_bytes(), ENCRYPTION_CONTEXT)?;
                row.push(STANDARD.encode(ciphertext));
            } else {
                row.push(value.to_string());
            }
        }

        writer.write_record(&row)?;
        rows += 1;
    }

    writer.flush()?;

    Ok(EncryptSummary {
        rows,
        target_columns: targets.len(),
    })
}
