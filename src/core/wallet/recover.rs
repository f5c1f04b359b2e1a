use std::fmt;

use tracing::{info, warn};

use crate::core::errors::WalletError;
use crate::core::key_manager::{derive_ethereum_account, DerivedAccount};
use crate::core::mnemonic;
use crate::security::SecretString;
use crate::shamir::{self, Share};

/// Phrase and account rebuilt from a set of shares.
pub struct RecoveredWallet {
    pub phrase: SecretString,
    pub account: DerivedAccount,
}

impl fmt::Debug for RecoveredWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveredWallet")
            .field("phrase", &"<redacted>")
            .field("account", &self.account)
            .finish()
    }
}

/// Parse hex share strings. Nothing is combined here.
///
/// Errors name the 1-based position of the offending input.
pub fn parse_shares<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Share>, WalletError> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            Share::from_hex(input.as_ref()).map_err(|e| {
                WalletError::InvalidShares(format!("share #{}: {}", i + 1, e))
            })
        })
        .collect()
}

/// Combine shares and check that the result is a valid phrase.
///
/// A reconstruction from too few shares (or from shares of different
/// splits) almost never decodes to a phrase with a valid checksum, so it
/// surfaces as `ChecksumError` instead of a silently wrong phrase.
pub fn recover_mnemonic(shares: &[Share]) -> Result<SecretString, WalletError> {
    let secret = shamir::combine_shares(shares)?;

    let parsed = mnemonic::validate_phrase_bytes(&secret).map_err(|e| {
        warn!(shares = shares.len(), "reconstructed secret is not a valid mnemonic");
        e
    })?;

    info!(shares = shares.len(), words = parsed.word_count(), "recovered mnemonic");
    Ok(mnemonic::phrase_string(&parsed))
}

/// Recover the phrase and derive the account at `m/44'/60'/0'/0/0`.
pub fn recover_wallet(shares: &[Share], passphrase: &str) -> Result<RecoveredWallet, WalletError> {
    let phrase = recover_mnemonic(shares)?;
    let account = derive_ethereum_account(&phrase, passphrase)?;
    Ok(RecoveredWallet { phrase, account })
}
