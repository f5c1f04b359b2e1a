use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shamir wallet CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(
    name = "shamir-wallet",
    about = "Split a wallet phrase into Shamir shares and recover the wallet from them",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// TOML config file (falls back to $SHAMIR_WALLET_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a freshly generated phrase
    Generate {
        /// 12, 15, 18, 21 or 24 (defaults to mnemonic.word_count)
        #[arg(long)]
        words: Option<usize>,
    },
    /// Check a phrase against the wordlist and checksum
    Validate {
        /// Read from stdin when omitted
        #[arg(long)]
        phrase: Option<String>,
    },
    /// Split a phrase into hex shares, one per line
    Split {
        /// Read from stdin when omitted
        #[arg(long)]
        phrase: Option<String>,
        /// Defaults to sharing.total_shares
        #[arg(long)]
        shares: Option<u8>,
        /// Defaults to sharing.threshold
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Recover the phrase, private key and address from shares
    Combine {
        /// Hex share; repeat for every share
        #[arg(long = "share", required = true, num_args = 1)]
        shares: Vec<String>,
        #[arg(long, default_value = "")]
        passphrase: String,
    },
    /// Print the key and address at m/44'/60'/0'/0/0
    Derive {
        /// Read from stdin when omitted
        #[arg(long)]
        phrase: Option<String>,
        #[arg(long, default_value = "")]
        passphrase: String,
    },
}
