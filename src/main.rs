use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use encrypt_csv::config::Config;
use encrypt_csv::crypto::Encryptor;
use encrypt_csv::keyset::Keyset;
use encrypt_csv::pipeline;

#[derive(Parser)]
#[command(
    name = "encrypt-csv",
    version,
    about = "Encrypt selected CSV columns with an AEAD keyset",
    long_about = "encrypt-csv reads a CSV file, encrypts the values in the \
                  columns named by --fields using an AEAD keyset loaded from \
                  disk, and writes a new CSV with those columns replaced by \
                  base64-encoded ciphertext. Column matching against the \
                  header row is case-insensitive."
)]
struct Cli {
    /// CSV file to read [default: data-100.csv]
    #[arg(short, long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// CSV file to write [default: data-enc-100.csv]
    #[arg(short, long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Comma-separated list of CSV header names to encrypt,
    /// i.e. "Card Type Full Name,Issuing Bank"
    #[arg(short, long, value_name = "NAMES")]
    fields: Option<String>,

    /// Keyset file used to encrypt the data [default: key]
    #[arg(short, long, value_name = "PATH")]
    key: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve flags into a configuration; missing --fields fails here,
    // before any file is opened.
    let config = Config::resolve(cli.input, cli.output, cli.key, cli.fields)?;

    // Load the cleartext keyset and build the encryption capability.
    let keyset = Keyset::read_cleartext(&config.key)?;
    let encryptor = Encryptor::new(&keyset)?;

    // Transform the rows.
    let summary = pipeline::encrypt_file(&config, &encryptor)?;

    println!(
        "Encrypted {} column(s) across {} row(s): {} -> {}",
        summary.target_columns,
        summary.rows,
        config.input.display(),
        config.output.display()
    );

    Ok(())
}
