//! Aptos addresses
//!
//! The account address is the SHA3-256 authentication key of the public key
//! followed by the Ed25519 scheme flag.

use zeroize::Zeroizing;

use crate::crypto::hash::sha3_256;
use crate::error::Result;

use super::profile::{AddressHash, CurveFamily, FormatRules, PrivateKeyEncoding, SignatureScheme};
use super::{decode_hex_private_key, ed25519_public_key, Chain, ChainAddressFormatter, FormattedKey};

/// Rules shared by the Aptos and Filecoin renderings
pub(crate) const RULES: FormatRules = FormatRules {
    curve: CurveFamily::Ed25519Hardened,
    address_hash: AddressHash::Sha3_256,
    address_length: 32,
    private_key_encoding: PrivateKeyEncoding::Hex,
};

/// Aptos address formatter
#[derive(Debug, Clone, Copy)]
pub struct AptosFormatter {
    scheme: SignatureScheme,
}

impl AptosFormatter {
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }
}

impl Default for AptosFormatter {
    fn default() -> Self {
        Self::new(SignatureScheme::Ed25519)
    }
}

/// Authentication key for a public key and scheme flag, as 64 hex characters
pub fn address_from_public_key(public_key: &[u8; 32], scheme: SignatureScheme) -> String {
    let mut preimage = [0u8; 33];
    preimage[..32].copy_from_slice(public_key);
    preimage[32] = scheme.flag();

    hex::encode(sha3_256(&preimage))
}

impl ChainAddressFormatter for AptosFormatter {
    fn chain(&self) -> Chain {
        Chain::Aptos
    }

    fn rules(&self) -> FormatRules {
        RULES
    }

    fn format(&self, private_key: &[u8]) -> Result<FormattedKey> {
        let public_key = ed25519_public_key(private_key)?;

        Ok(FormattedKey {
            public_key: hex::encode(public_key),
            address: address_from_public_key(&public_key, self.scheme),
            private_key: Zeroizing::new(hex::encode(private_key)),
        })
    }

    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
        decode_hex_private_key(encoded)
    }
}
