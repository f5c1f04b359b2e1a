//! BIP-39 mnemonic codec.
//!
//! Phrase <-> entropy conversion and checksum validation on the English
//! wordlist, backed by the `bip39` crate. Every function normalizes its input
//! (trim, single spaces, lowercase) before touching the wordlist.

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::security::{SecretString, SecretVec};

/// Word counts a phrase may have.
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Longest English phrase: 24 words of up to 8 letters plus separators.
const MAX_PHRASE_LEN: usize = 24 * 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("phrase has {0} words, expected 12, 15, 18, 21 or 24")]
    WordCount(usize),
    #[error("word {position} ({word:?}) is not in the wordlist")]
    UnknownWord { position: usize, word: String },
    #[error("mnemonic checksum mismatch")]
    InvalidChecksum,
    #[error("secret is not valid UTF-8 text")]
    NotUtf8,
    #[error("entropy of {0} bytes is invalid, expected 16..=32 in steps of 4")]
    InvalidEntropy(usize),
    #[error("unsupported strength of {0} bits")]
    InvalidStrength(usize),
    #[error("malformed mnemonic: {0}")]
    Malformed(String),
}

/// Entropy size of a generated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MnemonicStrength {
    #[default]
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl MnemonicStrength {
    pub fn from_word_count(words: usize) -> Result<Self, MnemonicError> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            other => Err(MnemonicError::WordCount(other)),
        }
    }

    pub fn from_bits(bits: usize) -> Result<Self, MnemonicError> {
        match bits {
            128 => Ok(Self::Words12),
            160 => Ok(Self::Words15),
            192 => Ok(Self::Words18),
            224 => Ok(Self::Words21),
            256 => Ok(Self::Words24),
            other => Err(MnemonicError::InvalidStrength(other)),
        }
    }

    pub fn entropy_bits(self) -> usize {
        match self {
            Self::Words12 => 128,
            Self::Words15 => 160,
            Self::Words18 => 192,
            Self::Words21 => 224,
            Self::Words24 => 256,
        }
    }

    pub fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    pub fn word_count(self) -> usize {
        // one word per 11 bits of entropy + checksum (entropy / 32)
        (self.entropy_bits() + self.entropy_bits() / 32) / 11
    }
}

/// Canonical form: single spaces, lowercase, no surrounding whitespace.
pub fn normalize_phrase(phrase: &str) -> SecretString {
    let mut out = Zeroizing::new(String::with_capacity(phrase.len().max(MAX_PHRASE_LEN)));
    for word in phrase.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Render a parsed mnemonic into a zeroizing buffer sized up front.
pub fn phrase_string(mnemonic: &Mnemonic) -> SecretString {
    let mut out = Zeroizing::new(String::with_capacity(MAX_PHRASE_LEN));
    for (i, word) in mnemonic.words().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Parse and fully validate a phrase.
pub fn parse_phrase(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    let normalized = normalize_phrase(phrase);
    let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
    if !VALID_WORD_COUNTS.contains(&word_count) {
        return Err(MnemonicError::WordCount(word_count));
    }

    Mnemonic::parse_in_normalized(Language::English, normalized.as_str())
        .map_err(|e| map_bip39_error(e, normalized.as_str()))
}

/// Validate a phrase and return its raw entropy.
pub fn validate_phrase(phrase: &str) -> Result<SecretVec, MnemonicError> {
    let mnemonic = parse_phrase(phrase)?;
    let entropy = Zeroizing::new(mnemonic.to_entropy());
    debug!(words = mnemonic.word_count(), entropy_bits = entropy.len() * 8, "mnemonic validated");
    Ok(entropy)
}

/// Validate UTF-8 bytes (such as a reconstructed secret) as a phrase.
pub fn validate_phrase_bytes(bytes: &[u8]) -> Result<Mnemonic, MnemonicError> {
    let phrase = std::str::from_utf8(bytes).map_err(|_| MnemonicError::NotUtf8)?;
    parse_phrase(phrase)
}

/// Encode raw entropy as a phrase.
pub fn phrase_from_entropy(entropy: &[u8]) -> Result<SecretString, MnemonicError> {
    if !(16..=32).contains(&entropy.len()) || entropy.len() % 4 != 0 {
        return Err(MnemonicError::InvalidEntropy(entropy.len()));
    }
    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| map_bip39_error(e, ""))?;
    Ok(phrase_string(&mnemonic))
}

/// Generate a new phrase from the operating system CSPRNG.
pub fn generate(strength: MnemonicStrength) -> Result<SecretString, MnemonicError> {
    generate_with_rng(&mut OsRng, strength)
}

/// Generate a new phrase from a caller-supplied CSPRNG.
pub fn generate_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    strength: MnemonicStrength,
) -> Result<SecretString, MnemonicError> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    rng.fill_bytes(&mut entropy);
    debug!(words = strength.word_count(), "generating mnemonic");
    phrase_from_entropy(&entropy)
}

fn map_bip39_error(err: bip39::Error, normalized: &str) -> MnemonicError {
    match err {
        bip39::Error::BadWordCount(n) => MnemonicError::WordCount(n),
        bip39::Error::UnknownWord(i) => MnemonicError::UnknownWord {
            position: i + 1,
            word: normalized.split(' ').nth(i).unwrap_or_default().to_string(),
        },
        bip39::Error::BadEntropyBitCount(bits) => MnemonicError::InvalidEntropy(bits / 8),
        bip39::Error::InvalidChecksum => MnemonicError::InvalidChecksum,
        other => MnemonicError::Malformed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_validate_known_phrase_entropy() {
        let entropy = validate_phrase(ABANDON_ABOUT).unwrap();
        assert_eq!(entropy.as_slice(), &[0u8; 16]);
    }

    #[test]
    fn test_normalization_before_lookup() {
        let messy = "  Abandon abandon\tabandon abandon abandon abandon abandon abandon abandon abandon abandon   ABOUT \n";
        assert_eq!(normalize_phrase(messy).as_str(), ABANDON_ABOUT);
        assert!(validate_phrase(messy).is_ok());
    }

    #[test]
    fn test_bad_checksum() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert_eq!(validate_phrase(phrase).unwrap_err(), MnemonicError::InvalidChecksum);
    }

    #[test]
    fn test_unknown_word_reports_position() {
        let phrase = "abandon abandon abandonn abandon abandon abandon abandon abandon abandon abandon abandon about";
        match validate_phrase(phrase).unwrap_err() {
            MnemonicError::UnknownWord { position, word } => {
                assert_eq!(position, 3);
                assert_eq!(word, "abandonn");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_word_count_rejected() {
        assert_eq!(validate_phrase("abandon about").unwrap_err(), MnemonicError::WordCount(2));
        assert_eq!(validate_phrase("").unwrap_err(), MnemonicError::WordCount(0));
    }

    #[test]
    fn test_strength_table() {
        for (words, bits) in [(12, 128), (15, 160), (18, 192), (21, 224), (24, 256)] {
            let s = MnemonicStrength::from_word_count(words).unwrap();
            assert_eq!(s.entropy_bits(), bits);
            assert_eq!(s.word_count(), words);
            assert_eq!(MnemonicStrength::from_bits(bits).unwrap(), s);
        }
        assert_eq!(MnemonicStrength::from_bits(100), Err(MnemonicError::InvalidStrength(100)));
    }

    #[test]
    fn test_generate_roundtrips_through_validation() {
        let mut rng = StdRng::seed_from_u64(42);
        for strength in [MnemonicStrength::Words12, MnemonicStrength::Words24] {
            let phrase = generate_with_rng(&mut rng, strength).unwrap();
            assert_eq!(phrase.split(' ').count(), strength.word_count());
            let entropy = validate_phrase(&phrase).unwrap();
            assert_eq!(entropy.len(), strength.entropy_bytes());
            assert_eq!(phrase_from_entropy(&entropy).unwrap(), phrase);
        }
    }

    #[test]
    fn test_phrase_from_entropy_vectors() {
        assert_eq!(phrase_from_entropy(&[0u8; 16]).unwrap().as_str(), ABANDON_ABOUT);
        assert_eq!(
            phrase_from_entropy(&[0xffu8; 16]).unwrap().as_str(),
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"
        );
        assert_eq!(phrase_from_entropy(&[0u8; 15]).unwrap_err(), MnemonicError::InvalidEntropy(15));
    }

    #[test]
    fn test_parsed_mnemonic_is_wiped_on_drop() {
        fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<Mnemonic>();
    }

    #[test]
    fn test_phrase_buffers_do_not_reallocate() {
        let normalized = normalize_phrase("  ZOO zoo\tzoo zoo zoo zoo zoo zoo zoo zoo zoo WRONG ");
        assert_eq!(normalized.capacity(), MAX_PHRASE_LEN);

        let mnemonic = parse_phrase(ABANDON_ABOUT).unwrap();
        let rendered = phrase_string(&mnemonic);
        assert_eq!(rendered.as_str(), ABANDON_ABOUT);
        assert_eq!(rendered.capacity(), MAX_PHRASE_LEN);
    }

    #[test]
    fn test_non_utf8_bytes() {
        assert_eq!(validate_phrase_bytes(&[0xff, 0xfe]).unwrap_err(), MnemonicError::NotUtf8);
    }
}
