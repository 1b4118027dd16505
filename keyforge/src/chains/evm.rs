//! Ethereum and EVM-compatible addresses

use zeroize::Zeroizing;

use crate::crypto::hash::keccak256;
use crate::crypto::keys::secp256k1;
use crate::error::Result;

use super::profile::{AddressHash, CurveFamily, FormatRules, PrivateKeyEncoding};
use super::{decode_hex_private_key, expect_key_length, Chain, ChainAddressFormatter, FormattedKey};

/// Address length in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// EVM address formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmFormatter;

/// Lowercase `0x` address for a 65-byte uncompressed public key
pub fn address_from_public_key(uncompressed: &[u8; 65]) -> String {
    // Skip the 0x04 prefix
    let hash = keccak256(&uncompressed[1..]);
    format!("0x{}", hex::encode(&hash[hash.len() - ADDRESS_LENGTH..]))
}

impl ChainAddressFormatter for EvmFormatter {
    fn chain(&self) -> Chain {
        Chain::Evm
    }

    fn rules(&self) -> FormatRules {
        FormatRules {
            curve: CurveFamily::Secp256k1Bip32,
            address_hash: AddressHash::Keccak256,
            address_length: ADDRESS_LENGTH,
            private_key_encoding: PrivateKeyEncoding::Hex,
        }
    }

    fn format(&self, private_key: &[u8]) -> Result<FormattedKey> {
        let private_key = expect_key_length(private_key)?;
        let uncompressed = secp256k1::uncompressed_public_key(private_key)?;
        let compressed = secp256k1::compressed_public_key(private_key)?;

        Ok(FormattedKey {
            public_key: hex::encode(compressed),
            address: address_from_public_key(&uncompressed),
            private_key: Zeroizing::new(hex::encode(private_key)),
        })
    }

    fn decode_private_key(&self, encoded: &str) -> Result<Zeroizing<[u8; 32]>> {
        decode_hex_private_key(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_format() {
        let key = hex::decode("1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727")
            .unwrap();
        let formatted = EvmFormatter.format(&key).unwrap();

        assert_eq!(formatted.address, "0x9858effd232b4033e47d90003d41ec34ecaeda94");
        assert_eq!(
            formatted.public_key,
            "0237b0bb7a8288d38ed49a524b5dc98cff3eb5ca824c9f9dc0dfdb3d9cd600f299"
        );
        assert_eq!(
            formatted.private_key.as_str(),
            "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
        );
    }

    #[test]
    fn test_address_from_public_key() {
        let key = [0x11u8; 32];
        let uncompressed = secp256k1::uncompressed_public_key(&key).unwrap();

        let address = address_from_public_key(&uncompressed);
        assert_eq!(address.len(), 2 + ADDRESS_LENGTH * 2);
        assert_eq!(address, EvmFormatter.format(&key).unwrap().address);
    }

    #[test]
    fn test_known_addresses() {
        // First development account of the common local test nodes
        assert_eq!(
            EvmFormatter
                .address_from_private_key(
                    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                )
                .unwrap(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(
            EvmFormatter
                .address_from_private_key(&format!("{:0>64}", "1"))
                .unwrap(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_hex_key_length() {
        let key = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

        let address = EvmFormatter.address_from_private_key(key).unwrap();
        assert_eq!(address.len(), 42);
        assert_eq!(address, EvmFormatter.address_from_private_key(key).unwrap());

        assert!(matches!(
            EvmFormatter.address_from_private_key(&key[1..]),
            Err(Error::InvalidKeyLength(_))
        ));
    }

    #[test]
    fn test_rejects_zero_key() {
        assert!(matches!(
            EvmFormatter.format(&[0u8; 32]),
            Err(Error::InvalidKeyEncoding(_))
        ));
    }
}
