//! BIP-32 / BIP-44 hierarchical key derivation
//!
//! Path format: m/44'/coin_type'/account'/change/address_index
//!
//! The application uses a single fixed path, [`ETHEREUM_PATH`]
//! (`m/44'/60'/0'/0/0`). Arbitrary paths are still parsed so the derivation
//! engine can be checked against the published BIP-32 vectors.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey, Signing};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::core::errors::WalletError;

type HmacSha512 = Hmac<Sha512>;

/// First hardened child index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Fixed derivation path of the application.
pub const ETHEREUM_PATH: &str = "m/44'/60'/0'/0/0";

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// One step of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex(u32);

impl ChildIndex {
    pub fn normal(index: u32) -> Result<Self, WalletError> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::KeyDerivationError(format!(
                "child index {} out of range",
                index
            )));
        }
        Ok(Self(index))
    }

    pub fn hardened(index: u32) -> Result<Self, WalletError> {
        Self::normal(index).map(|c| Self(c.0 | HARDENED_OFFSET))
    }

    pub fn is_hardened(self) -> bool {
        self.0 >= HARDENED_OFFSET
    }

    /// Raw 32-bit value (hardened indices include the offset).
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.0 - HARDENED_OFFSET)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Ordered list of child indices below the master key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// `m/44'/60'/0'/0/0`
    pub fn ethereum_default() -> Self {
        Self::bip44(60, 0, 0, 0)
    }

    /// `m/44'/coin_type'/account'/change/address_index`
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Self {
        Self(vec![
            ChildIndex(44 | HARDENED_OFFSET),
            ChildIndex(coin_type | HARDENED_OFFSET),
            ChildIndex(account | HARDENED_OFFSET),
            ChildIndex(change & !HARDENED_OFFSET),
            ChildIndex(address_index & !HARDENED_OFFSET),
        ])
    }

    pub fn indices(&self) -> &[ChildIndex] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        if parts.next() != Some("m") {
            return Err(WalletError::KeyDerivationError(format!(
                "derivation path must start with 'm': {:?}",
                s
            )));
        }

        let indices = parts
            .map(|part| {
                let (digits, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                    Some(d) => (d, true),
                    None => (part, false),
                };
                let index: u32 = digits.parse().map_err(|_| {
                    WalletError::KeyDerivationError(format!("invalid path segment {:?}", part))
                })?;
                if hardened {
                    ChildIndex::hardened(index)
                } else {
                    ChildIndex::normal(index)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// Extended private key: secp256k1 scalar plus chain code.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
}

impl ExtendedPrivateKey {
    /// Master key from a BIP-39 seed: HMAC-SHA512("Bitcoin seed", seed).
    pub fn from_seed(seed: &[u8]) -> Result<Self, WalletError> {
        if !(16..=64).contains(&seed.len()) {
            return Err(WalletError::KeyDerivationError(format!(
                "seed length must be 16..=64 bytes, got {}",
                seed.len()
            )));
        }

        let (key, chain_code) = hmac_sha512_split(MASTER_HMAC_KEY, &[seed])?;
        // IL must be a valid scalar: non-zero and below the curve order
        let mut check = SecretKey::from_slice(key.as_slice())?;
        check.non_secure_erase();

        Ok(Self { key, chain_code, depth: 0 })
    }

    /// CKDpriv for a single child index.
    pub fn derive_child<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        index: ChildIndex,
    ) -> Result<Self, WalletError> {
        let mut parent = self.secret_key()?;
        let child = self.child_key(secp, &parent, index);
        parent.non_secure_erase();
        let (key, chain_code) = child?;

        Ok(Self {
            key,
            chain_code,
            depth: self.depth.saturating_add(1),
        })
    }

    fn child_key<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        parent: &SecretKey,
        index: ChildIndex,
    ) -> Result<KeyHalves, WalletError> {
        let index_bytes = index.raw().to_be_bytes();

        let (il, chain_code) = if index.is_hardened() {
            // 0x00 || ser256(k_par) || ser32(i)
            hmac_sha512_split(
                self.chain_code.as_slice(),
                &[&[0u8][..], self.key.as_slice(), &index_bytes[..]],
            )?
        } else {
            // serP(point(k_par)) || ser32(i)
            let public = PublicKey::from_secret_key(secp, parent).serialize();
            hmac_sha512_split(self.chain_code.as_slice(), &[&public[..], &index_bytes[..]])?
        };

        let tweak = Scalar::from_be_bytes(*il).map_err(|_| {
            WalletError::KeyDerivationError(format!("child {} yields an invalid key", index))
        })?;
        let mut child = parent.add_tweak(&tweak).map_err(|_| {
            WalletError::KeyDerivationError(format!("child {} yields an invalid key", index))
        })?;
        let key = Zeroizing::new(child.secret_bytes());
        child.non_secure_erase();

        Ok((key, chain_code))
    }

    /// Walk every index of `path` starting from this key.
    pub fn derive_path<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        path: &DerivationPath,
    ) -> Result<Self, WalletError> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(secp, index))
    }

    pub fn secret_key(&self) -> Result<SecretKey, WalletError> {
        Ok(SecretKey::from_slice(self.key.as_slice())?)
    }

    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> Result<PublicKey, WalletError> {
        let mut secret = self.secret_key()?;
        let public = PublicKey::from_secret_key(secp, &secret);
        secret.non_secure_erase();
        Ok(public)
    }

    /// Private key bytes
    pub fn private_key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("key", &"<redacted>")
            .finish()
    }
}

type KeyHalves = (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>);

fn hmac_sha512_split(key: &[u8], parts: &[&[u8]]) -> Result<KeyHalves, WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::KeyDerivationError(format!("HMAC initialization failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let digest = Zeroizing::new(mac.finalize().into_bytes().to_vec());

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&digest[..32]);
    right.copy_from_slice(&digest[32..]);
    Ok((left, right))
}
