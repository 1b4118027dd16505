//! Filecoin addresses, rendered in the Aptos authentication-key form

use zeroize::Zeroizing;

use crate::error::Result;

use super::aptos::{address_from_public_key, RULES};
use super::profile::{FormatRules, SignatureScheme};
use super::{decode_hex_private_key, ed25519_public_key, Chain, ChainAddressFormatter, FormattedKey};

/// Filecoin address formatter
#[derive(Debug, Clone, Copy)]
pub struct FilecoinFormatter {
    scheme: SignatureScheme,
}

impl FilecoinFormatter {
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }
}

impl Default for FilecoinFormatter {
    fn default() -> Self {
        Self::new(SignatureScheme::Ed25519)
    }
}

impl ChainAddressFormatter for FilecoinFormatter {
    fn chain(&self) -> Chain {
        Chain::Filecoin
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
