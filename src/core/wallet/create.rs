use tracing::info;

use crate::core::errors::WalletError;
use crate::core::mnemonic::{self, MnemonicStrength};
use crate::security::{redact_phrase, SecretString};
use crate::shamir::{self, Share};

/// Shares of one split plus the parameters they were produced with.
#[derive(Debug, Clone)]
pub struct MnemonicBackup {
    pub total_shares: u8,
    pub threshold: u8,
    pub shares: Vec<Share>,
}

impl MnemonicBackup {
    /// Hex form of every share, in index order.
    pub fn share_hexes(&self) -> Vec<SecretString> {
        self.shares.iter().map(Share::to_hex).collect()
    }
}

/// Generate a fresh phrase from the OS CSPRNG.
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<SecretString, WalletError> {
    let phrase = mnemonic::generate(strength)?;
    info!(words = strength.word_count(), "generated new mnemonic");
    Ok(phrase)
}

/// Validate `phrase` and split its normalized UTF-8 bytes into shares.
///
/// The phrase is checked before anything is split, so a typo never ends up
/// inside a set of shares.
pub fn split_mnemonic(
    phrase: &str,
    total_shares: u8,
    threshold: u8,
) -> Result<MnemonicBackup, WalletError> {
    mnemonic::parse_phrase(phrase)?;
    let normalized = mnemonic::normalize_phrase(phrase);

    info!(
        phrase = %redact_phrase(&normalized),
        total_shares, threshold, "splitting mnemonic"
    );

    let shares = shamir::split_secret(normalized.as_bytes(), total_shares, threshold)?;
    Ok(MnemonicBackup { total_shares, threshold, shares })
}
