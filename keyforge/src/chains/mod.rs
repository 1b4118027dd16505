//! Chain support
//!
//! Each supported chain has one [`ChainAddressFormatter`] that turns a raw
//! 32-byte private key into the chain's public key, address and private key
//! text, and parses that text back into raw bytes.

pub mod aptos;
pub mod bitcoin;
pub mod evm;
pub mod filecoin;
pub mod profile;
pub mod solana;
pub mod sui;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::keys::ed25519;
use crate::error::{Error, Result};

pub use aptos::AptosFormatter;
pub use bitcoin::{BitcoinAddressType, BitcoinFormatter};
pub use evm::EvmFormatter;
pub use filecoin::FilecoinFormatter;
pub use profile::{
    AddressHash, ChainProfile, ChainProfiles, CurveFamily, FormatRules, PrivateKeyEncoding,
    ProfileOverride, SignatureScheme,
};
pub use solana::SolanaFormatter;
pub use sui::SuiFormatter;

/// Length of every raw private key handled by the formatters
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Supported chains
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Aptos,
    Sui,
    Filecoin,
    Solana,
    Bitcoin,
    /// Ethereum and EVM-compatible chains
    Evm,
}

impl Chain {
    /// Every supported chain
    pub const ALL: [Chain; 6] = [
        Chain::Aptos,
        Chain::Sui,
        Chain::Filecoin,
        Chain::Solana,
        Chain::Bitcoin,
        Chain::Evm,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Aptos => "aptos",
            Chain::Sui => "sui",
            Chain::Filecoin => "filecoin",
            Chain::Solana => "solana",
            Chain::Bitcoin => "bitcoin",
            Chain::Evm => "evm",
        }
    }

    /// The formatter for this chain under its compiled-in profile
    ///
    /// Only Bitcoin has more than one address form; passing an address type
    /// for any other chain fails with [`Error::UnsupportedAddressType`].
    pub fn formatter(
        &self,
        address_type: Option<BitcoinAddressType>,
    ) -> Result<Box<dyn ChainAddressFormatter>> {
        ChainProfile::default_for(*self).formatter(address_type)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aptos" | "apt" => Ok(Chain::Aptos),
            "sui" => Ok(Chain::Sui),
            "filecoin" | "fil" => Ok(Chain::Filecoin),
            "solana" | "sol" => Ok(Chain::Solana),
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "evm" | "ethereum" | "eth" => Ok(Chain::Evm),
            _ => Err(Error::UnsupportedChain(s.to_string())),
        }
    }
}

/// Chain-specific rendering of one private key
#[derive(Clone, PartialEq, Eq)]
pub struct FormattedKey {
    pub public_key: String,
    pub address: String,
    pub private_key: Zeroizing<String>,
}

impl fmt::Debug for FormattedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedKey")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Converts raw private keys into a chain's public key, address and key text
pub trait ChainAddressFormatter: Send + Sync {
    /// Chain served by this formatter
    fn chain(&self) -> Chain;

    /// Curve, address hash, address length and key encoding implemented here
    fn rules(&self) -> FormatRules;

    /// Render a raw 32-byte private key
    fn format(&self, private_key: &[u8]) -> Result<FormattedKey>;

    /// Parse the chain's private key text back into raw bytes
    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>>;

    /// Address for a private key given in the chain's text form
    fn address_from_private_key(&self, encoded: &str) -> Result<String> {
        let private_key = self.decode_private_key(encoded)?;
        Ok(self.format(&private_key[..])?.address)
    }
}

/// Borrow `private_key` as a 32-byte array
pub(crate) fn expect_key_length(private_key: &[u8]) -> Result<&[u8; PRIVATE_KEY_LENGTH]> {
    private_key.try_into().map_err(|_| {
        Error::InvalidKeyLength(format!(
            "expected {} bytes, got {}",
            PRIVATE_KEY_LENGTH,
            private_key.len()
        ))
    })
}

/// Ed25519 public key of a raw private key, after the length check
pub(crate) fn ed25519_public_key(private_key: &[u8]) -> Result<[u8; 32]> {
    let private_key = expect_key_length(private_key)?;
    Ok(ed25519::public_key(private_key))
}

/// Decode 64 hex characters, with or without a `0x` prefix
pub(crate) fn decode_hex_private_key(encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
    let encoded = encoded.trim();
    let digits = encoded
        .strip_prefix("0x")
        .or_else(|| encoded.strip_prefix("0X"))
        .unwrap_or(encoded);

    if digits.len() != PRIVATE_KEY_LENGTH * 2 {
        return Err(Error::InvalidKeyLength(format!(
            "expected {} hex characters, got {}",
            PRIVATE_KEY_LENGTH * 2,
            digits.len()
        )));
    }

    let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
    hex::decode_to_slice(digits, &mut private_key[..])
        .map_err(|e| Error::InvalidKeyEncoding(format!("Invalid hex private key: {}", e)))?;

    Ok(private_key)
}
