//! Bitcoin mainnet addresses
//!
//! Three address forms are supported: legacy P2PKH, P2SH-wrapped P2WPKH and
//! native segwit v0 (`bc1q...`). Legacy P2PKH commits to HASH160 of the
//! uncompressed public key unless the formatter is told to use the
//! compressed one. Both segwit forms always commit to the compressed key.

use std::fmt;
use std::str::FromStr;

use bech32::{hrp, segwit};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::hash::hash160;
use crate::crypto::keys::secp256k1;
use crate::error::{Error, Result};

use super::profile::{AddressHash, CurveFamily, FormatRules, PrivateKeyEncoding};
use super::{decode_hex_private_key, expect_key_length, Chain, ChainAddressFormatter, FormattedKey};

/// Base58check version byte for P2PKH addresses
const P2PKH_VERSION: u8 = 0x00;
/// Base58check version byte for P2SH addresses
const P2SH_VERSION: u8 = 0x05;

/// Bitcoin address form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinAddressType {
    /// Legacy pay-to-public-key-hash (`1...`)
    P2pkh,
    /// P2WPKH nested in pay-to-script-hash (`3...`)
    P2sh,
    /// Native segwit v0 (`bc1q...`)
    #[default]
    Bech32,
}

impl BitcoinAddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P2pkh => "p2pkh",
            Self::P2sh => "p2sh",
            Self::Bech32 => "bech32",
        }
    }
}

impl fmt::Display for BitcoinAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitcoinAddressType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p2pkh" | "legacy" => Ok(Self::P2pkh),
            "p2sh" | "p2sh-p2wpkh" => Ok(Self::P2sh),
            "bech32" | "p2wpkh" | "segwit" => Ok(Self::Bech32),
            _ => Err(Error::UnsupportedAddressType(s.to_string())),
        }
    }
}

/// Bitcoin address formatter for one address form
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinFormatter {
    address_type: BitcoinAddressType,
    compressed_p2pkh: bool,
}

impl BitcoinFormatter {
    pub fn new(address_type: BitcoinAddressType) -> Self {
        Self {
            address_type,
            compressed_p2pkh: false,
        }
    }

    /// Make P2PKH addresses commit to the compressed public key
    pub fn with_compressed_p2pkh(mut self, compressed: bool) -> Self {
        self.compressed_p2pkh = compressed;
        self
    }

    pub fn address_type(&self) -> BitcoinAddressType {
        self.address_type
    }

    /// Serialized public key the address commits to
    pub fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>> {
        match self.address_type {
            BitcoinAddressType::P2pkh if !self.compressed_p2pkh => {
                Ok(secp256k1::uncompressed_public_key(private_key)?.to_vec())
            }
            _ => Ok(secp256k1::compressed_public_key(private_key)?.to_vec()),
        }
    }
}

/// Base58check of a version byte and 20-byte hash
fn base58check(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = [0u8; 21];
    payload[0] = version;
    payload[1..].copy_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}

/// Address of the given form for a serialized public key
///
/// Segwit forms require the 33-byte compressed key.
pub fn address_from_public_key(
    public_key: &[u8],
    address_type: BitcoinAddressType,
) -> Result<String> {
    if address_type != BitcoinAddressType::P2pkh && public_key.len() != 33 {
        return Err(Error::InvalidKeyEncoding(format!(
            "{} addresses need a 33-byte compressed public key, got {} bytes",
            address_type,
            public_key.len()
        )));
    }

    let pubkey_hash = hash160(public_key);

    match address_type {
        BitcoinAddressType::P2pkh => Ok(base58check(P2PKH_VERSION, &pubkey_hash)),
        BitcoinAddressType::P2sh => {
            // redeemScript = OP_0 PUSH20 <pubkey_hash>
            let mut redeem_script = [0u8; 22];
            redeem_script[0] = 0x00;
            redeem_script[1] = 0x14;
            redeem_script[2..].copy_from_slice(&pubkey_hash);
            Ok(base58check(P2SH_VERSION, &hash160(&redeem_script)))
        }
        BitcoinAddressType::Bech32 => segwit::encode_v0(hrp::BC, &pubkey_hash)
            .map_err(|e| Error::InvalidKeyEncoding(format!("Segwit encoding failed: {}", e))),
    }
}

impl ChainAddressFormatter for BitcoinFormatter {
    fn chain(&self) -> Chain {
        Chain::Bitcoin
    }

    fn rules(&self) -> FormatRules {
        FormatRules {
            curve: CurveFamily::Secp256k1Bip32,
            address_hash: AddressHash::Hash160,
            address_length: 20,
            private_key_encoding: PrivateKeyEncoding::Hex,
        }
    }

    fn format(&self, private_key: &[u8]) -> Result<FormattedKey> {
        let private_key = expect_key_length(private_key)?;
        let public_key = self.public_key(private_key)?;

        Ok(FormattedKey {
            address: address_from_public_key(&public_key, self.address_type)?,
            public_key: hex::encode(&public_key),
            private_key: Zeroizing::new(hex::encode(private_key)),
        })
    }

    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
        decode_hex_private_key(encoded)
    }
}
