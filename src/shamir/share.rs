//! Share type and its hex encoding.
//!
//! Binary layout: `[index][value...]`. The hex form is lowercase with a
//! `0x` prefix on output; parsing also accepts uppercase digits, a missing
//! prefix and surrounding whitespace.

use std::fmt;
use std::str::FromStr;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::ShamirError;
use crate::security::secret::vec_to_secret;
use crate::security::SecretVec;

/// One evaluation point `(index, polynomial_i(index))` for every byte of the secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Share {
    index: u8,
    value: Vec<u8>,
}

impl Share {
    /// Build a share from its parts. Index 0 is the secret's own evaluation
    /// point and is rejected.
    pub fn new(index: u8, value: Vec<u8>) -> Result<Self, ShamirError> {
        if index == 0 {
            let mut value = value;
            value.zeroize();
            return Err(ShamirError::InvalidShares("share index cannot be zero".to_string()));
        }
        if value.is_empty() {
            return Err(ShamirError::InvalidShares("share value is empty".to_string()));
        }
        Ok(Self { index, value })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the encoded share (value plus the index byte).
    pub fn encoded_len(&self) -> usize {
        self.value.len() + 1
    }

    /// Encode as `[index][value...]`.
    pub fn to_bytes(&self) -> SecretVec {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(self.index);
        out.extend_from_slice(&self.value);
        vec_to_secret(out)
    }

    /// Decode from `[index][value...]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ShamirError> {
        match bytes.split_first() {
            Some((&index, value)) if !value.is_empty() => Self::new(index, value.to_vec()),
            _ => Err(ShamirError::InvalidShares(format!(
                "share too short: {} bytes, need at least 2",
                bytes.len()
            ))),
        }
    }

    /// Lowercase `0x`-prefixed hex of the encoded share.
    pub fn to_hex(&self) -> Zeroizing<String> {
        let bytes = self.to_bytes();
        Zeroizing::new(format!("0x{}", hex::encode(bytes.as_slice())))
    }

    pub fn from_hex(input: &str) -> Result<Self, ShamirError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ShamirError::InvalidShares("share is empty".to_string()));
        }
        let bytes = hex::decode(digits)
            .map(Zeroizing::new)
            .map_err(|e| ShamirError::InvalidShares(format!("malformed hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

impl ConstantTimeEq for Share {
    fn ct_eq(&self, other: &Self) -> Choice {
        // slices of different length compare unequal without touching the bytes
        self.index.ct_eq(&other.index) & self.value.as_slice().ct_eq(other.value.as_slice())
    }
}

impl PartialEq for Share {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Share {}

impl FromStr for Share {
    type Err = ShamirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_hex().as_str())
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index)
            .field("value", &format_args!("<redacted len={}>", self.value.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_layout_is_index_then_value() {
        let share = Share::new(3, vec![0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert_eq!(share.to_hex().as_str(), "0x03deadbeef");
        assert_eq!(share.encoded_len(), 5);
    }

    #[test]
    fn test_parse_accepts_prefix_variants() {
        let expected = Share::new(0x0a, vec![0x01, 0xff]).unwrap();
        for input in ["0x0a01ff", "0a01ff", "0X0A01FF", "  0x0a01ff\n"] {
            assert_eq!(input.parse::<Share>().unwrap(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "0x", "0x0", "0x01", "zz11", "0x0g01", "0x00ab"] {
            let err = Share::from_hex(input).unwrap_err();
            assert!(matches!(err, ShamirError::InvalidShares(_)), "input {input:?} gave {err:?}");
        }
    }

    #[test]
    fn test_equality_is_constant_time_comparison() {
        let share = Share::new(2, vec![0x10, 0x20, 0x30]).unwrap();
        let same = Share::new(2, vec![0x10, 0x20, 0x30]).unwrap();
        assert!(bool::from(share.ct_eq(&same)));
        assert_eq!(share, same);

        let other_index = Share::new(3, vec![0x10, 0x20, 0x30]).unwrap();
        let other_value = Share::new(2, vec![0x10, 0x20, 0x31]).unwrap();
        let shorter = Share::new(2, vec![0x10, 0x20]).unwrap();
        for different in [&other_index, &other_value, &shorter] {
            assert!(!bool::from(share.ct_eq(different)));
            assert_ne!(&share, different);
        }
    }

    #[test]
    fn test_debug_redacts_value() {
        let share = Share::new(1, vec![0x41; 8]).unwrap();
        let dbg = format!("{:?}", share);
        assert!(dbg.contains("redacted len=8"));
        assert!(!dbg.contains("65"));
    }

    #[test]
    fn test_display_matches_hex() {
        let share = Share::new(255, vec![0]).unwrap();
        assert_eq!(share.to_string(), "0xff00");
    }
}
