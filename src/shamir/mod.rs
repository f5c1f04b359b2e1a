//! # Shamir secret sharing over GF(2^8)
//!
//! Splits an arbitrary byte secret into `n` shares so that any `k` of them
//! reconstruct it and any `k - 1` are independent of it.
//!
//! ## API
//!
//! - `split_secret(secret, total_shares, threshold) -> Result<Vec<Share>, ShamirError>`
//! - `split_secret_with_rng(rng, secret, total_shares, threshold)`
//! - `combine_shares(shares) -> Result<SecretVec, ShamirError>`
//!
//! ## How it works
//!
//! - Every byte position `i` gets its own polynomial of degree `k - 1` with
//!   constant term `secret[i]` and `k - 1` coefficients drawn from a CSPRNG.
//!   Polynomials are never shared between byte positions.
//! - Share `x` (for `x = 1..=n`) holds `P_i(x)` for every `i`.
//! - Combining evaluates the Lagrange interpolation of the supplied points at
//!   `x = 0`. The basis values only depend on the share indices, so they are
//!   computed once per call.
//!
//! Field representation: see [`crate::crypto::gf256`].
//!
//! ## Limitation
//!
//! The combiner cannot know the threshold. Given fewer than `k` shares it
//! returns bytes that look like any other secret but are wrong. Callers need
//! an external integrity check; the wallet pipeline uses the mnemonic
//! checksum for this.
//!
//! ```rust
//! # use shamir_wallet::shamir::{split_secret, combine_shares};
//! let secret = b"hello";
//! let shares = split_secret(secret, 5, 3).unwrap();
//! let subset = vec![shares[0].clone(), shares[2].clone(), shares[4].clone()];
//! let recovered = combine_shares(&subset).unwrap();
//! assert_eq!(recovered.as_slice(), secret.as_slice());
//! ```

mod share;

pub use share::Share;

use std::collections::HashSet;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::gf256::{self, FieldError};
use crate::security::{redact_bytes, SecretVec};

#[derive(Debug, Error)]
pub enum ShamirError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("invalid shares: {0}")]
    InvalidShares(String),
    #[error("field arithmetic failed: {0}")]
    Domain(#[from] FieldError),
}

/// Split `secret` into `total_shares` shares, any `threshold` of which
/// reconstruct it. Coefficients come from the operating system CSPRNG.
pub fn split_secret(
    secret: &[u8],
    total_shares: u8,
    threshold: u8,
) -> Result<Vec<Share>, ShamirError> {
    split_secret_with_rng(&mut OsRng, secret, total_shares, threshold)
}

/// Same as [`split_secret`] with a caller-supplied CSPRNG.
pub fn split_secret_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret: &[u8],
    total_shares: u8,
    threshold: u8,
) -> Result<Vec<Share>, ShamirError> {
    if secret.is_empty() {
        return Err(ShamirError::InvalidParameters("secret cannot be empty".to_string()));
    }
    if total_shares == 0 {
        return Err(ShamirError::InvalidParameters("total shares cannot be zero".to_string()));
    }
    if threshold == 0 {
        return Err(ShamirError::InvalidParameters("threshold cannot be zero".to_string()));
    }
    if threshold > total_shares {
        return Err(ShamirError::InvalidParameters(format!(
            "threshold {} exceeds total shares {}",
            threshold, total_shares
        )));
    }

    debug!(secret = %redact_bytes(secret), total_shares, threshold, "splitting secret");

    let n = total_shares as usize;
    let mut values: Vec<Vec<u8>> = (0..n).map(|_| Vec::with_capacity(secret.len())).collect();
    let mut coeffs = Zeroizing::new(vec![0u8; threshold as usize]);

    for &byte in secret {
        coeffs[0] = byte;
        rng.fill_bytes(&mut coeffs[1..]);
        for (x, value) in (1..=total_shares).zip(values.iter_mut()) {
            value.push(gf256::eval_poly(&coeffs, x));
        }
    }

    (1..=total_shares)
        .zip(values)
        .map(|(index, value)| Share::new(index, value))
        .collect()
}

/// Reconstruct the secret from a set of shares.
///
/// All validation happens before any arithmetic: the set must be non-empty,
/// indices distinct and non-zero, values of equal non-zero length. The
/// result is only correct if at least the original threshold of shares is
/// supplied; see the module docs.
pub fn combine_shares(shares: &[Share]) -> Result<SecretVec, ShamirError> {
    let first = shares
        .first()
        .ok_or_else(|| ShamirError::InvalidShares("no shares supplied".to_string()))?;
    let secret_len = first.value().len();

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if share.index() == 0 {
            return Err(ShamirError::InvalidShares("share index cannot be zero".to_string()));
        }
        if !seen.insert(share.index()) {
            return Err(ShamirError::InvalidShares(format!(
                "duplicate share index: {}",
                share.index()
            )));
        }
        if share.value().len() != secret_len {
            return Err(ShamirError::InvalidShares(format!(
                "share {} has length {}, expected {}",
                share.index(),
                share.value().len(),
                secret_len
            )));
        }
    }
    if secret_len == 0 {
        return Err(ShamirError::InvalidShares("share values are empty".to_string()));
    }

    debug!(shares = shares.len(), secret_len, "combining shares");

    let xs: Vec<u8> = shares.iter().map(Share::index).collect();
    let basis = gf256::lagrange_basis_at_zero(&xs)?;

    let mut secret = SecretVec::new(vec![0u8; secret_len]);
    for (i, out) in secret.iter_mut().enumerate() {
        *out = shares
            .iter()
            .zip(basis.iter())
            .fold(0u8, |acc, (share, &l)| gf256::add(acc, gf256::mul(share.value()[i], l)));
    }

    Ok(secret)
}
