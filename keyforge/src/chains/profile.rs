//! Per-chain profiles
//!
//! [`ChainProfiles`] is built once (compiled-in defaults plus optional JSON
//! overrides) and shared read-only by every wallet factory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::crypto::keys::{Bip32Path, DerivationPath};
use crate::error::{Error, Result};

use super::bitcoin::{BitcoinAddressType, BitcoinFormatter};
use super::{
    AptosFormatter, Chain, ChainAddressFormatter, EvmFormatter, FilecoinFormatter,
    SolanaFormatter, SuiFormatter,
};

/// Default Aptos derivation path
pub const APTOS_DERIVATION_PATH: &str = "m/44'/637'/0'/0'/0'";
/// Default Sui derivation path
pub const SUI_DERIVATION_PATH: &str = "m/44'/784'/0'/0'/0'";
/// Default Solana derivation path
pub const SOLANA_DERIVATION_PATH: &str = "m/44'/501'/0'/0'";
/// Default Bitcoin derivation path
pub const BITCOIN_DERIVATION_PATH: &str = "m/44'/0'/0'/0/0";
/// Default EVM derivation path
pub const EVM_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Key derivation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveFamily {
    /// SLIP-0010 Ed25519, hardened segments only
    Ed25519Hardened,
    /// BIP-32 secp256k1
    Secp256k1Bip32,
}

/// Signature scheme flags used by Aptos and Sui
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureScheme {
    Ed25519 = 0,
    MultiEd25519 = 1,
    SingleKey = 2,
    MultiKey = 3,
}

impl SignatureScheme {
    /// The flag byte
    pub const fn flag(self) -> u8 {
        self as u8
    }
}

/// Hash applied to the public key to form the address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressHash {
    Sha3_256,
    Blake2b256,
    /// The public key is the address
    Identity,
    /// RIPEMD-160(SHA-256)
    Hash160,
    Keccak256,
}

/// Text form of the serialized private key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivateKeyEncoding {
    Hex,
    /// Bech32 with the `suiprivkey` prefix
    SuiBech32,
    /// Base58 of the 64-byte secret ∥ public key pair
    Base58Keypair,
}

/// Encoding rules a formatter implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRules {
    pub curve: CurveFamily,
    pub address_hash: AddressHash,
    /// Address payload length in bytes
    pub address_length: usize,
    pub private_key_encoding: PrivateKeyEncoding,
}

/// Static configuration for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainProfile {
    pub chain: Chain,
    pub curve: CurveFamily,
    pub default_path: String,
    pub address_hash: AddressHash,
    /// Address payload length in bytes
    pub address_length: usize,
    pub private_key_encoding: PrivateKeyEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_flag: Option<SignatureScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_address_type: Option<BitcoinAddressType>,
}

impl ChainProfile {
    /// Compiled-in profile for `chain`
    pub fn default_for(chain: Chain) -> Self {
        let ed25519 = |default_path: &str, address_hash, private_key_encoding, scheme_flag| Self {
            chain,
            curve: CurveFamily::Ed25519Hardened,
            default_path: default_path.to_string(),
            address_hash,
            address_length: 32,
            private_key_encoding,
            scheme_flag,
            default_address_type: None,
        };

        match chain {
            Chain::Aptos => ed25519(
                APTOS_DERIVATION_PATH,
                AddressHash::Sha3_256,
                PrivateKeyEncoding::Hex,
                Some(SignatureScheme::Ed25519),
            ),
            Chain::Sui => ed25519(
                SUI_DERIVATION_PATH,
                AddressHash::Blake2b256,
                PrivateKeyEncoding::SuiBech32,
                Some(SignatureScheme::Ed25519),
            ),
            // Filecoin keys come from the Aptos path family
            Chain::Filecoin => ed25519(
                APTOS_DERIVATION_PATH,
                AddressHash::Sha3_256,
                PrivateKeyEncoding::Hex,
                Some(SignatureScheme::Ed25519),
            ),
            Chain::Solana => ed25519(
                SOLANA_DERIVATION_PATH,
                AddressHash::Identity,
                PrivateKeyEncoding::Base58Keypair,
                None,
            ),
            Chain::Bitcoin => Self {
                chain,
                curve: CurveFamily::Secp256k1Bip32,
                default_path: BITCOIN_DERIVATION_PATH.to_string(),
                address_hash: AddressHash::Hash160,
                address_length: 20,
                private_key_encoding: PrivateKeyEncoding::Hex,
                scheme_flag: None,
                default_address_type: Some(BitcoinAddressType::Bech32),
            },
            Chain::Evm => Self {
                chain,
                curve: CurveFamily::Secp256k1Bip32,
                default_path: EVM_DERIVATION_PATH.to_string(),
                address_hash: AddressHash::Keccak256,
                address_length: 20,
                private_key_encoding: PrivateKeyEncoding::Hex,
                scheme_flag: None,
                default_address_type: None,
            },
        }
    }

    /// The encoding rules this profile describes
    pub fn rules(&self) -> FormatRules {
        FormatRules {
            curve: self.curve,
            address_hash: self.address_hash,
            address_length: self.address_length,
            private_key_encoding: self.private_key_encoding,
        }
    }

    /// Build the formatter for this profile
    ///
    /// The scheme flag and Bitcoin address type come from the profile. The
    /// formatter's own rules must match the profile's, otherwise this fails
    /// with [`Error::Config`].
    pub fn formatter(
        &self,
        address_type: Option<BitcoinAddressType>,
    ) -> Result<Box<dyn ChainAddressFormatter>> {
        if let Some(address_type) = address_type {
            if self.chain != Chain::Bitcoin {
                return Err(Error::UnsupportedAddressType(format!(
                    "{} has a single address form, got '{}'",
                    self.chain, address_type
                )));
            }
        }

        let formatter: Box<dyn ChainAddressFormatter> = match self.chain {
            Chain::Aptos => Box::new(AptosFormatter::new(self.ed25519_scheme()?)),
            Chain::Sui => Box::new(SuiFormatter::new(self.ed25519_scheme()?)),
            Chain::Filecoin => Box::new(FilecoinFormatter::new(self.ed25519_scheme()?)),
            Chain::Solana => Box::new(SolanaFormatter),
            Chain::Bitcoin => Box::new(BitcoinFormatter::new(
                address_type
                    .or(self.default_address_type)
                    .unwrap_or_default(),
            )),
            Chain::Evm => Box::new(EvmFormatter),
        };

        if formatter.rules() != self.rules() {
            return Err(Error::Config(format!(
                "{}: profile rules {:?} do not match the formatter's {:?}",
                self.chain,
                self.rules(),
                formatter.rules()
            )));
        }

        Ok(formatter)
    }

    /// Scheme flag for chains that prefix a flag byte to single Ed25519 keys
    fn ed25519_scheme(&self) -> Result<SignatureScheme> {
        match self.scheme_flag {
            Some(SignatureScheme::Ed25519) => Ok(SignatureScheme::Ed25519),
            other => Err(Error::Config(format!(
                "{}: schemeFlag must be Ed25519 for single Ed25519 keys, got {:?}",
                self.chain, other
            ))),
        }
    }

    /// Check that `path` is usable with this profile's curve family
    pub fn validate_path(&self, path: &str) -> Result<()> {
        match self.curve {
            CurveFamily::Ed25519Hardened => DerivationPath::parse(path).map(|_| ()),
            CurveFamily::Secp256k1Bip32 => Bip32Path::parse(path).map(|_| ()),
        }
    }
}

/// Override for one chain's profile, as read from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileOverride {
    #[serde(default)]
    pub default_path: Option<String>,
    #[serde(default)]
    pub default_address_type: Option<BitcoinAddressType>,
}

/// Immutable table of chain profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainProfiles {
    profiles: BTreeMap<Chain, ChainProfile>,
}

impl Default for ChainProfiles {
    fn default() -> Self {
        Self {
            profiles: Chain::ALL
                .iter()
                .map(|&chain| (chain, ChainProfile::default_for(chain)))
                .collect(),
        }
    }
}

impl ChainProfiles {
    /// The compiled-in table
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `overrides` applied
    pub fn with_overrides(overrides: &BTreeMap<Chain, ProfileOverride>) -> Result<Self> {
        let mut table = Self::default();

        for (chain, update) in overrides {
            let profile = table
                .profiles
                .get_mut(chain)
                .ok_or_else(|| Error::UnsupportedChain(chain.to_string()))?;

            if let Some(path) = &update.default_path {
                profile.validate_path(path).map_err(|e| {
                    Error::Config(format!("{}: defaultPath '{}': {}", chain, path, e))
                })?;
                profile.default_path = path.clone();
            }

            if let Some(address_type) = update.default_address_type {
                if *chain != Chain::Bitcoin {
                    return Err(Error::Config(format!(
                        "{}: defaultAddressType is only valid for bitcoin",
                        chain
                    )));
                }
                profile.default_address_type = Some(address_type);
            }
        }

        Ok(table)
    }

    /// Parse a JSON override document keyed by chain name and apply it
    ///
    /// ```json
    /// { "sui": { "defaultPath": "m/44'/784'/1'/0'/0'" },
    ///   "bitcoin": { "defaultAddressType": "p2pkh" } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: BTreeMap<Chain, ProfileOverride> =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        Self::with_overrides(&overrides)
    }

    /// Profile for `chain`
    pub fn get(&self, chain: Chain) -> &ChainProfile {
        // Every chain is inserted by `default()` and never removed
        &self.profiles[&chain]
    }

    /// All profiles in chain order
    pub fn iter(&self) -> impl Iterator<Item = &ChainProfile> {
        self.profiles.values()
    }
}
