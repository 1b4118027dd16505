//! Mnemonic phrase generation and handling

use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    #[default]
    Words12,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Map an entropy size in bits (128 or 256) to a strength
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(Self::Words12),
            256 => Ok(Self::Words24),
            other => Err(Error::InvalidInput(format!(
                "mnemonic strength must be 128 or 256 bits, got {}",
                other
            ))),
        }
    }

    /// Map a word count (12 or 24) to a strength
    pub fn from_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            24 => Ok(Self::Words24),
            other => Err(Error::InvalidInput(format!(
                "mnemonic must have 12 or 24 words, got {}",
                other
            ))),
        }
    }

    /// Entropy size in bits
    pub fn bits(&self) -> u32 {
        match self {
            Self::Words12 => 128,
            Self::Words24 => 256,
        }
    }

    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16, // 128 bits = 16 bytes
            Self::Words24 => 32, // 256 bits = 32 bytes
        }
    }
}

/// Source of mnemonic phrases and seeds used by the wallet factory
pub trait MnemonicProvider: Send + Sync {
    /// Generate a fresh phrase of the given strength
    fn generate(&self, strength: MnemonicStrength) -> Result<String>;

    /// Whether the phrase is a valid mnemonic
    fn validate(&self, phrase: &str) -> bool;

    /// Stretch the phrase (and optional passphrase) into a seed
    fn to_seed(&self, phrase: &str, passphrase: Option<&str>) -> Result<Zeroizing<Vec<u8>>>;
}

/// BIP-39 English mnemonic provider backed by the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39Provider;

impl MnemonicProvider for Bip39Provider {
    fn generate(&self, strength: MnemonicStrength) -> Result<String> {
        generate_mnemonic(strength)
    }

    fn validate(&self, phrase: &str) -> bool {
        validate_mnemonic(phrase)
    }

    fn to_seed(&self, phrase: &str, passphrase: Option<&str>) -> Result<Zeroizing<Vec<u8>>> {
        mnemonic_to_seed(phrase, passphrase)
    }
}

/// Generate a new random mnemonic phrase with the specified strength
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<String> {
    let mut entropy = [0u8; 32];
    let entropy = &mut entropy[..strength.entropy_bytes()];
    OsRng.fill_bytes(entropy);

    let mnemonic = Mnemonic::from_entropy(entropy).map_err(|e| Error::Mnemonic(e.to_string()));
    entropy.zeroize();

    Ok(mnemonic?.to_string())
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase).is_ok()
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<Zeroizing<Vec<u8>>> {
    let mnemonic =
        Mnemonic::parse_normalized(phrase).map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

    let mut seed = mnemonic.to_seed(passphrase.unwrap_or(""));
    let out = Zeroizing::new(seed.to_vec());
    seed.zeroize();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        assert!(validate_mnemonic(&mnemonic));

        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 12);

        let mnemonic = generate_mnemonic(MnemonicStrength::Words24).unwrap();
        assert_eq!(mnemonic.split_whitespace().count(), 24);
    }

    #[test]
    fn test_validate_mnemonic() {
        let invalid = "invalid mnemonic phrase test test test test test test test test test";

        assert!(validate_mnemonic(ABANDON));
        assert!(!validate_mnemonic(invalid));
        // Checksum word swapped
        assert!(!validate_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon"
        ));
    }

    #[test]
    fn test_mnemonic_to_seed() {
        let seed = mnemonic_to_seed(ABANDON, None).unwrap();

        assert_eq!(seed.len(), 64);
        assert_eq!(
            hex::encode(&*seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let plain = mnemonic_to_seed(ABANDON, None).unwrap();
        let salted = mnemonic_to_seed(ABANDON, Some("TREZOR")).unwrap();
        assert_ne!(&*plain, &*salted);
    }

    #[test]
    fn test_invalid_mnemonic_to_seed() {
        let err = mnemonic_to_seed("not a mnemonic", None).unwrap_err();
        assert!(matches!(err, Error::InvalidMnemonic(_)));
    }

    #[test]
    fn test_strength_conversions() {
        assert_eq!(MnemonicStrength::from_bits(128).unwrap(), MnemonicStrength::Words12);
        assert_eq!(MnemonicStrength::from_bits(256).unwrap(), MnemonicStrength::Words24);
        assert!(MnemonicStrength::from_bits(192).is_err());
        assert_eq!(MnemonicStrength::from_word_count(24).unwrap().bits(), 256);
        assert_eq!(MnemonicStrength::default(), MnemonicStrength::Words12);
    }
}
