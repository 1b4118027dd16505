//! Solana addresses
//!
//! The address is the base58 public key; the private key text is the base58
//! 64-byte keypair (secret followed by public key) used by Solana wallets.

use zeroize::Zeroizing;

use crate::crypto::keys::ed25519;
use crate::error::{Error, Result};

use super::profile::{AddressHash, CurveFamily, FormatRules, PrivateKeyEncoding};
use super::{ed25519_public_key, Chain, ChainAddressFormatter, FormattedKey};

/// Solana address formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaFormatter;

impl ChainAddressFormatter for SolanaFormatter {
    fn chain(&self) -> Chain {
        Chain::Solana
    }

    fn rules(&self) -> FormatRules {
        FormatRules {
            curve: CurveFamily::Ed25519Hardened,
            address_hash: AddressHash::Identity,
            address_length: 32,
            private_key_encoding: PrivateKeyEncoding::Base58Keypair,
        }
    }

    fn format(&self, private_key: &[u8]) -> Result<FormattedKey> {
        let public_key = ed25519_public_key(private_key)?;

        let mut keypair = Zeroizing::new([0u8; 64]);
        keypair[..32].copy_from_slice(private_key);
        keypair[32..].copy_from_slice(&public_key);

        let address = bs58::encode(public_key).into_string();

        Ok(FormattedKey {
            public_key: address.clone(),
            address,
            private_key: Zeroizing::new(bs58::encode(&keypair[..]).into_string()),
        })
    }

    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
        let decoded = Zeroizing::new(
            bs58::decode(encoded.trim())
                .into_vec()
                .map_err(|e| Error::InvalidKeyEncoding(format!("Invalid base58 private key: {}", e)))?,
        );

        match decoded.len() {
            32 => {
                let mut private_key = Zeroizing::new([0u8; 32]);
                private_key.copy_from_slice(&decoded);
                Ok(private_key)
            }
            64 => {
                let mut private_key = Zeroizing::new([0u8; 32]);
                private_key.copy_from_slice(&decoded[..32]);

                let public_key = ed25519::public_key(&private_key);
                if public_key[..] != decoded[32..] {
                    return Err(Error::InvalidKeyEncoding(
                        "Keypair public key does not match its secret key".to_string(),
                    ));
                }
                Ok(private_key)
            }
            other => Err(Error::InvalidKeyLength(format!(
                "expected a 32-byte secret or 64-byte keypair, got {} bytes",
                other
            ))),
        }
    }
}
