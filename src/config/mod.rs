//! Configuration resolution for encrypt-csv
//!
//! Turns raw CLI flag values into a resolved [`Config`], applying the
//! default filenames when paths are absent. The fields flag is the only
//! mandatory input; its absence is a configuration error. No existence
//! checks happen here - a missing input or key file surfaces later when
//! the file is opened.

use std::path::PathBuf;

use crate::error::{EncryptCsvError, EncryptCsvResult};

/// Row count baked into the default filenames (`data-100.csv`)
pub const DEFAULT_ROW_COUNT: u32 = 100;

/// Default keyset filename
pub const DEFAULT_KEY_FILE: &str = "key";

/// Resolved operation parameters
///
/// Constructed once at startup, read-only afterward.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file to read
    pub input: PathBuf,
    /// CSV file to write
    pub output: PathBuf,
    /// Keyset file used to encrypt the data
    pub key: PathBuf,
    /// Comma-separated list of CSV header names to encrypt
    pub fields: String,
}

impl Config {
    /// Resolve flag values into a configuration
    ///
    /// `fields` must be present and non-empty. Input defaults to
    /// `data-<count>.csv`, output to `data-enc-<count>.csv`, key to
    /// `key`.
    pub fn resolve(
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        key: Option<PathBuf>,
        fields: Option<String>,
    ) -> EncryptCsvResult<Self> {
        let fields = match fields {
            Some(f) if !f.is_empty() => f,
            _ => {
                return Err(EncryptCsvError::Config(
                    "fields flag is missing. Please set the fields flag to a \
                     comma-separated list of CSV header names that need to be \
                     encrypted, i.e. --fields \"Card Type Full Name,Issuing Bank\""
                        .to_string(),
                ))
            }
        };

        let count = DEFAULT_ROW_COUNT;
        let input = input.unwrap_or_else(|| PathBuf::from(format!("data-{}.csv", count)));
        let output = output.unwrap_or_else(|| PathBuf::from(format!("data-enc-{}.csv", count)));
        let key = key.unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE));

        Ok(Self {
            input,
            output,
            key,
            fields,
        })
    }
}
