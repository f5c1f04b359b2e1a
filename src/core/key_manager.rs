//! Seed and key derivation
//!
//! mnemonic --PBKDF2 (BIP-39)--> seed --HMAC-SHA512 (BIP-32)--> master key
//! --CKD along the path--> leaf key --Keccak256--> address

use std::fmt;

use bip39::Mnemonic;
use secp256k1::{PublicKey, Secp256k1};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::address::ethereum_address;
use crate::core::bip44::{DerivationPath, ExtendedPrivateKey};
use crate::core::errors::WalletError;
use crate::core::mnemonic::parse_phrase;
use crate::security::SecretString;

/// 512-bit BIP-39 seed.
pub type Seed = Zeroizing<[u8; 64]>;

/// Key material for one derived account. Recomputed on demand; never cached.
#[derive(Clone)]
pub struct DerivedAccount {
    path: DerivationPath,
    private_key: Zeroizing<[u8; 32]>,
    public_key: PublicKey,
    address: String,
}

impl DerivedAccount {
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    /// `0x` followed by 64 lowercase hex digits.
    pub fn private_key_hex(&self) -> Result<SecretString, WalletError> {
        let mut digits = Zeroizing::new([0u8; 64]);
        hex::encode_to_slice(self.private_key.as_slice(), digits.as_mut_slice())
            .map_err(|e| WalletError::KeyDerivationError(format!("hex encoding failed: {}", e)))?;

        let mut out = Zeroizing::new(String::with_capacity(2 + digits.len()));
        out.push_str("0x");
        out.extend(digits.iter().map(|&d| char::from(d)));
        Ok(out)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// EIP-55 checksummed address.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("path", &self.path.to_string())
            .field("private_key", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

/// Stretch a parsed mnemonic into its 64-byte seed.
///
/// PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" || passphrase`; the
/// passphrase is NFKD-normalized by `bip39`.
pub fn seed_from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Zeroizing::new(mnemonic.to_seed(passphrase))
}

/// Derive the account at `path` from a seed.
pub fn derive_from_seed(seed: &[u8], path: &DerivationPath) -> Result<DerivedAccount, WalletError> {
    let secp = Secp256k1::signing_only();
    let master = ExtendedPrivateKey::from_seed(seed)?;
    let leaf = master.derive_path(&secp, path)?;

    let public_key = leaf.public_key(&secp)?;
    let address = ethereum_address(&public_key);
    debug!(path = %path, address = %address, "derived account");

    Ok(DerivedAccount {
        path: path.clone(),
        private_key: Zeroizing::new(*leaf.private_key()),
        public_key,
        address,
    })
}

/// Validate `phrase` and derive the account at `path`.
pub fn derive_account(
    phrase: &str,
    passphrase: &str,
    path: &DerivationPath,
) -> Result<DerivedAccount, WalletError> {
    let mnemonic = parse_phrase(phrase)?;
    let seed = seed_from_mnemonic(&mnemonic, passphrase);
    derive_from_seed(seed.as_slice(), path)
}

/// Account at the fixed path `m/44'/60'/0'/0/0`.
pub fn derive_ethereum_account(
    phrase: &str,
    passphrase: &str,
) -> Result<DerivedAccount, WalletError> {
    derive_account(phrase, passphrase, &DerivationPath::ethereum_default())
}
