// Console front-end
// Subcommands for generating keys and encoding/decoding messages with them

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::rsa::config::{KeyGenConfig, Variant, DEFAULT_KEY_PATH};
use crate::rsa::keygen::{create_keys, InverseStrategy, KeyContext};
use crate::rsa::prime::DEFAULT_MAX_DRAWS;
use crate::util::file_ops::load_keys;

#[derive(Parser, Debug)]
#[command(name = "textbook-rsa")]
#[command(version, about = "Textbook RSA over sieve-sampled primes, one character at a time", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new key pair
    Keygen {
        /// Lower bound of the prime search range
        #[arg(long, default_value_t = 100)]
        lower: u64,

        /// Upper bound of the prime search range
        #[arg(long, default_value_t = 1000)]
        upper: u64,

        /// Character encoding the keys are generated for
        #[arg(long, value_enum, default_value_t = Variant::Charmap)]
        variant: Variant,

        /// Find d by linear search instead of the extended Euclidean algorithm
        #[arg(long, action = ArgAction::SetTrue)]
        brute_force: bool,

        /// Give up after this many random draws
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DRAWS)]
        max_draws: u64,

        /// Do not write the keys to disk
        #[arg(long, action = ArgAction::SetTrue)]
        no_save: bool,

        /// Narrate each step
        #[arg(long, short, action = ArgAction::SetTrue)]
        verbose: bool,

        /// Key file to write
        #[arg(long, value_name = "FILE", default_value = DEFAULT_KEY_PATH)]
        keys: PathBuf,
    },

    /// Encrypt a message with a saved key file
    Encode {
        /// Key file to read
        #[arg(long, value_name = "FILE", default_value = DEFAULT_KEY_PATH)]
        keys: PathBuf,

        /// Message to encrypt
        text: String,
    },

    /// Decrypt colon-delimited ciphertext with a saved key file
    Decode {
        /// Key file to read
        #[arg(long, value_name = "FILE", default_value = DEFAULT_KEY_PATH)]
        keys: PathBuf,

        /// Ciphertext to decrypt
        ciphertext: String,
    },

    /// Generate keys in [100, 1000], then encrypt and decrypt "Hello World!"
    Demo {
        /// Character encoding to demonstrate
        #[arg(long, value_enum, default_value_t = Variant::Charmap)]
        variant: Variant,

        /// Key file to write
        #[arg(long, value_name = "FILE", default_value = DEFAULT_KEY_PATH)]
        keys: PathBuf,
    },
}

fn load(path: &Path) -> Result<KeyContext> {
    load_keys(path).with_context(|| format!("load keys: {}", path.display()))
}

pub fn run_app(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Keygen {
            lower,
            upper,
            variant,
            brute_force,
            max_draws,
            no_save,
            verbose,
            keys,
        } => {
            let inverse = if brute_force {
                InverseStrategy::BruteForce
            } else {
                InverseStrategy::ExtendedEuclid
            };
            let config = KeyGenConfig::default()
                .with_bounds(lower, upper)
                .with_variant(variant)
                .with_inverse(inverse)
                .with_max_draws(max_draws)
                .with_save_new(!no_save)
                .with_verbose(verbose)
                .with_key_path(keys);

            let context = create_keys(&config).context("generate keys")?;
            println!("public key: n = {}, e = {}", context.public_key().n, context.public_key().e);
            println!("private key: d = {}", context.private_key().d);
            if config.save_new {
                println!("saved to {}", config.key_path.display());
            }
        }
        Command::Encode { keys, text } => {
            let context = load(&keys)?;
            println!("{}", context.encode(&text).context("encode message")?);
        }
        Command::Decode { keys, ciphertext } => {
            let context = load(&keys)?;
            println!("{}", context.decode(&ciphertext).context("decode message")?);
        }
        Command::Demo { variant, keys } => {
            let config = KeyGenConfig::default()
                .with_variant(variant)
                .with_verbose(true)
                .with_key_path(keys.clone());
            create_keys(&config).context("generate keys")?;

            let context = load(&keys)?;
            let message = "Hello World!";
            let ciphertext = context.encode(message)?;
            println!("Original message: '{}'", message);
            println!("Encrypted message: '{}'", ciphertext);
            println!("Decrypted message: '{}'", context.decode(&ciphertext)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keygen() {
        let cli = Cli::try_parse_from([
            "textbook-rsa",
            "keygen",
            "--lower",
            "200",
            "--upper",
            "900",
            "--variant",
            "ordinal",
            "--brute-force",
            "--no-save",
        ])
        .unwrap();

        match cli.command {
            Command::Keygen {
                lower,
                upper,
                variant,
                brute_force,
                no_save,
                verbose,
                keys,
                ..
            } => {
                assert_eq!((lower, upper), (200, 900));
                assert_eq!(variant, Variant::Ordinal);
                assert!(brute_force && no_save && !verbose);
                assert_eq!(keys, PathBuf::from(DEFAULT_KEY_PATH));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_encode_then_decode_through_key_file() {
        let path = std::env::temp_dir().join(format!("textbook_rsa_cli_{}.json", std::process::id()));
        let keys = path.to_string_lossy().to_string();

        let keygen = Cli::try_parse_from(["textbook-rsa", "keygen", "--variant", "ordinal", "--keys", keys.as_str()]).unwrap();
        run_app(keygen).unwrap();

        let context = load(&path).unwrap();
        let ciphertext = context.encode("Hello World!").unwrap();
        assert_eq!(context.decode(&ciphertext).unwrap(), "Hello World!");
        std::fs::remove_file(&path).ok();
    }
}
