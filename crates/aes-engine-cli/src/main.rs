//! Command-line interface for `aes-engine`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use aes_engine::{
    create_encryptor, create_encryptor_with_config, is_hardware_acceleration_supported,
    BackendPreference, BlockEncryptor, EncryptorConfig, BLOCK_SIZE,
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::EnvFilter;

/// AES block encryption CLI.
#[derive(Parser)]
#[command(
    name = "aes-engine",
    version,
    author,
    about = "AES-128/192/256 block encryption (software or AES-NI)"
)]
struct Cli {
    /// Log engine selection and capability probing to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report hardware acceleration and the backend chosen by default.
    Info,
    /// Encrypt a file block by block (length must be a positive multiple of 16 bytes).
    Enc {
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input plaintext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Engine selection.
        #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
        backend: BackendArg,
    },
    /// Verify the software and hardware engines agree on random blocks.
    Check {
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Number of random blocks to compare.
        #[arg(long, default_value_t = 1024)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a random block under a random key of every size.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Auto,
    Software,
    Hardware,
}

impl From<BackendArg> for BackendPreference {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Auto => Self::Auto,
            BackendArg::Software => Self::Software,
            BackendArg::Hardware => Self::Hardware,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Info => cmd_info(),
        Commands::Enc {
            key_hex,
            input,
            output,
            backend,
        } => cmd_enc(&key_hex, &input, &output, backend.into()),
        Commands::Check {
            key_hex,
            samples,
            seed,
        } => cmd_check(&key_hex, samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info() -> Result<()> {
    let encryptor = create_encryptor(&[0u8; 16]).context("build probe encryptor")?;
    println!(
        "hardware acceleration: {}",
        if is_hardware_acceleration_supported() {
            "available"
        } else {
            "unavailable"
        }
    );
    println!("default backend: {}", encryptor.backend());
    Ok(())
}

fn cmd_enc(
    key_hex: &str,
    input_path: &PathBuf,
    output_path: &PathBuf,
    backend: BackendPreference,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let encryptor = create_encryptor_with_config(&key, &EncryptorConfig { backend })
        .context("build encryptor")?;
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    encryptor
        .encrypt_chunk(&mut data)
        .with_context(|| format!("encrypt {}", input_path.display()))?;
    tracing::debug!(
        bytes = data.len(),
        backend = %encryptor.backend(),
        "encrypted input"
    );
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_check(key_hex: &str, samples: usize, seed: Option<u64>) -> Result<()> {
    if !is_hardware_acceleration_supported() {
        bail!("hardware acceleration is unavailable; nothing to compare against");
    }
    let key = parse_key_hex(key_hex)?;
    let software = create_encryptor_with_config(
        &key,
        &EncryptorConfig {
            backend: BackendPreference::Software,
        },
    )?;
    let hardware = create_encryptor_with_config(
        &key,
        &EncryptorConfig {
            backend: BackendPreference::Hardware,
        },
    )?;
    let mut rng = seeded_rng(seed);

    for _ in 0..samples {
        let mut expected = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut expected);
        let mut actual = expected;
        software.encrypt_block(&mut expected);
        hardware.encrypt_block(&mut actual);
        if actual != expected {
            bail!("mismatch between software and hardware outputs");
        }
    }
    println!("{samples} blocks agree");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    println!("plaintext: {}", hex::encode(block));

    for len in [16usize, 24, 32] {
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        let encryptor = create_encryptor(&key)?;
        let mut ciphertext = block;
        encryptor.encrypt_block(&mut ciphertext);
        println!(
            "aes-{} ({}) key: {} ciphertext: {}",
            encryptor.key_size().bits(),
            encryptor.backend(),
            hex::encode(&key),
            hex::encode(ciphertext)
        );
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if !matches!(bytes.len(), 16 | 24 | 32) {
        bail!("AES key must be 16, 24 or 32 bytes (32, 48 or 64 hex characters)");
    }
    Ok(bytes)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_key_hex_checks_length() {
        assert_eq!(parse_key_hex("000102030405060708090a0b0c0d0e0f").unwrap().len(), 16);
        assert!(parse_key_hex("0001").is_err());
        assert!(parse_key_hex("zz").is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(5));
        let mut b = seeded_rng(Some(5));
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn enc_round_trips_through_files() {
        let dir = std::env::temp_dir().join(format!("aes-engine-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("plain.bin");
        let output = dir.join("cipher.bin");
        fs::write(&input, hex::decode("00112233445566778899aabbccddeeff").unwrap()).unwrap();

        cmd_enc(
            "000102030405060708090a0b0c0d0e0f",
            &input,
            &output,
            BackendPreference::Software,
        )
        .unwrap();
        assert_eq!(
            hex::encode(fs::read(&output).unwrap()),
            "69c4e0d86a7b0430d8cdb78070b4c55a"
        );

        fs::write(&input, [0u8; 17]).unwrap();
        assert!(cmd_enc(
            "000102030405060708090a0b0c0d0e0f",
            &input,
            &output,
            BackendPreference::Auto
        )
        .is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
