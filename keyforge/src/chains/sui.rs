//! Sui addresses and `suiprivkey` private key strings

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use zeroize::Zeroizing;

use crate::crypto::hash::blake2b_256;
use crate::error::{Error, Result};

use super::profile::{AddressHash, CurveFamily, FormatRules, PrivateKeyEncoding, SignatureScheme};
use super::{ed25519_public_key, expect_key_length, Chain, ChainAddressFormatter, FormattedKey};

/// Human-readable part of a bech32 Sui private key
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// Sui address formatter
#[derive(Debug, Clone, Copy)]
pub struct SuiFormatter {
    scheme: SignatureScheme,
}

impl SuiFormatter {
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }
}

impl Default for SuiFormatter {
    fn default() -> Self {
        Self::new(SignatureScheme::Ed25519)
    }
}

/// `0x` followed by the BLAKE2b-256 of the scheme flag and public key
pub fn address_from_public_key(public_key: &[u8; 32], scheme: SignatureScheme) -> String {
    let mut preimage = [0u8; 33];
    preimage[0] = scheme.flag();
    preimage[1..].copy_from_slice(public_key);

    format!("0x{}", hex::encode(blake2b_256(&preimage)))
}

/// Encode a raw private key as `suiprivkey1...`
pub fn encode_private_key(
    private_key: &[u8; 32],
    scheme: SignatureScheme,
) -> Result<Zeroizing<String>> {
    let hrp = Hrp::parse(SUI_PRIVATE_KEY_PREFIX)
        .map_err(|e| Error::InvalidKeyEncoding(format!("Invalid bech32 prefix: {}", e)))?;

    let mut payload = Zeroizing::new([0u8; 33]);
    payload[0] = scheme.flag();
    payload[1..].copy_from_slice(private_key);

    bech32::encode::<Bech32>(hrp, &payload[..])
        .map(Zeroizing::new)
        .map_err(|e| Error::InvalidKeyEncoding(format!("Bech32 encoding failed: {}", e)))
}

/// Decode a `suiprivkey1...` string into the raw private key
///
/// Only the original bech32 checksum is accepted, and the flag byte must be
/// `scheme`.
pub fn decode_private_key(encoded: &str, scheme: SignatureScheme) -> Result<Zeroizing<[u8; 32]>> {
    let checked = CheckedHrpstring::new::<Bech32>(encoded.trim())
        .map_err(|e| Error::InvalidKeyEncoding(format!("Invalid bech32 private key: {}", e)))?;

    let prefix = checked.hrp().to_lowercase();
    if prefix != SUI_PRIVATE_KEY_PREFIX {
        return Err(Error::InvalidPrivateKeyPrefix {
            expected: SUI_PRIVATE_KEY_PREFIX.to_string(),
            actual: prefix,
        });
    }

    let payload = Zeroizing::new(checked.byte_iter().collect::<Vec<u8>>());
    if payload.len() != 33 {
        return Err(Error::InvalidKeyLength(format!(
            "expected 33-byte payload, got {}",
            payload.len()
        )));
    }

    if payload[0] != scheme.flag() {
        return Err(Error::UnsupportedKeyScheme(payload[0]));
    }

    let mut private_key = Zeroizing::new([0u8; 32]);
    private_key.copy_from_slice(&payload[1..]);
    Ok(private_key)
}

impl ChainAddressFormatter for SuiFormatter {
    fn chain(&self) -> Chain {
        Chain::Sui
    }

    fn rules(&self) -> FormatRules {
        FormatRules {
            curve: CurveFamily::Ed25519Hardened,
            address_hash: AddressHash::Blake2b256,
            address_length: 32,
            private_key_encoding: PrivateKeyEncoding::SuiBech32,
        }
    }

    fn format(&self, private_key: &[u8]) -> Result<FormattedKey> {
        let public_key = ed25519_public_key(private_key)?;

        Ok(FormattedKey {
            public_key: hex::encode(public_key),
            address: address_from_public_key(&public_key, self.scheme),
            private_key: encode_private_key(expect_key_length(private_key)?, self.scheme)?,
        })
    }

    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
        decode_private_key(encoded, self.scheme)
    }
}
