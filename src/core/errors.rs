use thiserror::Error;

use crate::core::mnemonic::MnemonicError;
use crate::crypto::gf256::FieldError;
use crate::shamir::ShamirError;

/// Error type for every wallet-core operation.
///
/// All variants are permanent for the given input: the operations are pure,
/// so retrying without changing the input yields the same error.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Bad share count, threshold, or an empty secret.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// Duplicate indices, unequal lengths, or malformed share encoding.
    #[error("Invalid shares: {0}")]
    InvalidShares(String),
    /// Mnemonic failed the wordlist lookup or the checksum.
    #[error("Checksum error: {0}")]
    ChecksumError(#[from] MnemonicError),
    /// Field division by zero; corrupted or incompatible shares.
    #[error("Domain error: {0}")]
    DomainError(#[from] FieldError),
    /// Seed, path or child key derivation failed.
    #[error("Key derivation error: {0}")]
    KeyDerivationError(String),
    /// Configuration file or environment override is unusable.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl WalletError {
    /// Whether the error was caused by caller-supplied shares or phrase
    /// rather than by configuration or parameters.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidShares(_)
                | WalletError::ChecksumError(_)
                | WalletError::DomainError(_)
        )
    }
}

impl From<ShamirError> for WalletError {
    fn from(err: ShamirError) -> Self {
        match err {
            ShamirError::InvalidParameters(msg) => WalletError::InvalidParameters(msg),
            ShamirError::InvalidShares(msg) => WalletError::InvalidShares(msg),
            ShamirError::Domain(e) => WalletError::DomainError(e),
        }
    }
}

impl From<secp256k1::Error> for WalletError {
    fn from(err: secp256k1::Error) -> Self {
        WalletError::KeyDerivationError(err.to_string())
    }
}
