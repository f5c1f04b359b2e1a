// src/main.rs
//! Shamir wallet command-line entry point.
//! Results go to stdout; logs go to stderr.
use anyhow::{Context, Result};
use clap::Parser;
use shamir_wallet::cli::{Cli, Commands};
use shamir_wallet::core::config::AppConfig;
use shamir_wallet::core::mnemonic::{self, MnemonicStrength};
use shamir_wallet::core::wallet::{parse_shares, recover_wallet, split_mnemonic, generate_mnemonic};
use shamir_wallet::core::key_manager::derive_ethereum_account;
use shamir_wallet::security::SecretString;
use std::io::{self, IsTerminal, Read};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zeroize::Zeroizing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging.filter)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Generate { words } => {
            let strength = match words {
                Some(n) => MnemonicStrength::from_word_count(n)
                    .with_context(|| format!("unsupported word count {}", n))?,
                None => config.mnemonic.strength()?,
            };
            let phrase = generate_mnemonic(strength)?;
            println!("{}", phrase.as_str());
        }
        Commands::Validate { phrase } => {
            let phrase = phrase_or_stdin(phrase)?;
            let entropy = mnemonic::validate_phrase(&phrase).context("phrase is not valid")?;
            println!(
                "valid: {} words, {} bits of entropy",
                phrase.split_whitespace().count(),
                entropy.len() * 8
            );
        }
        Commands::Split { phrase, shares, threshold } => {
            let phrase = phrase_or_stdin(phrase)?;
            let total_shares = shares.unwrap_or(config.sharing.total_shares);
            let threshold = threshold.unwrap_or(config.sharing.threshold);
            let backup = split_mnemonic(&phrase, total_shares, threshold)
                .context("failed to split phrase")?;
            info!(total_shares, threshold, "phrase split");
            for share in backup.share_hexes() {
                println!("{}", share.as_str());
            }
        }
        Commands::Combine { shares, passphrase } => {
            let shares = parse_shares(&shares)?;
            let wallet = recover_wallet(&shares, &passphrase).context("failed to recover wallet")?;
            println!("phrase: {}", wallet.phrase.as_str());
            println!("private_key: {}", wallet.account.private_key_hex()?.as_str());
            println!("address: {}", wallet.account.address());
        }
        Commands::Derive { phrase, passphrase } => {
            let phrase = phrase_or_stdin(phrase)?;
            let account = derive_ethereum_account(&phrase, &passphrase)
                .context("failed to derive account")?;
            println!("path: {}", account.path());
            println!("private_key: {}", account.private_key_hex()?.as_str());
            println!("address: {}", account.address());
        }
    }

    Ok(())
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid logging.filter")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Use the `--phrase` value or read the phrase from stdin.
fn phrase_or_stdin(phrase: Option<String>) -> Result<SecretString> {
    if let Some(p) = phrase {
        return Ok(Zeroizing::new(p));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter phrase, then EOF (Ctrl-D):");
    }
    let mut buf = Zeroizing::new(String::new());
    stdin.lock().read_to_string(&mut buf).context("failed to read phrase from stdin")?;
    Ok(buf)
}
