//! Ethereum address derivation and EIP-55 checksum casing.
//!
//! https://eips.ethereum.org/EIPS/eip-55

use secp256k1::PublicKey;
use sha3::{Digest, Keccak256};

use crate::core::errors::WalletError;

/// Checksummed address of a secp256k1 public key: last 20 bytes of
/// Keccak256 over the uncompressed point without its `0x04` tag.
pub fn ethereum_address(public_key: &PublicKey) -> String {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = Keccak256::digest(&uncompressed[1..]);
    let lower = hex::encode(&hash[12..]);
    checksum_lower_hex(&lower)
}

/// Re-case a 40-hex-digit address (with or without `0x`) into EIP-55 form.
pub fn to_checksum_address(address: &str) -> Result<String, WalletError> {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WalletError::InvalidParameters(format!(
            "not a 20-byte hex address: {:?}",
            address
        )));
    }
    Ok(checksum_lower_hex(&digits.to_ascii_lowercase()))
}

/// Whether `address` already carries a correct EIP-55 casing.
pub fn is_checksum_address(address: &str) -> bool {
    to_checksum_address(address).map_or(false, |c| c == address)
}

fn checksum_lower_hex(lower: &str) -> String {
    let hash = Keccak256::digest(lower.as_bytes());

    let cased: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            // nibble i of the hash decides the case of hex letter i
            let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    format!("0x{}", cased)
}
