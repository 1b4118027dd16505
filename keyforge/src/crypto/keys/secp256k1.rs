//! secp256k1 BIP-32 derivation for Bitcoin and EVM paths

use bitcoin::bip32::{ChildNumber, Xpriv};
use bitcoin::Network;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

use super::path::Bip32Path;

/// Derive the private key at `path` from a BIP-39 seed
pub fn derive_private_key(seed: &[u8], path: &Bip32Path) -> Result<Zeroizing<[u8; 32]>> {
    let secp = bitcoin::secp256k1::Secp256k1::signing_only();

    let master = Xpriv::new_master(Network::Bitcoin, seed)
        .map_err(|e| Error::KeyDerivation(format!("Invalid master key: {}", e)))?;

    // Indices already carry the hardened bit
    let children: Vec<ChildNumber> = path
        .child_numbers()
        .iter()
        .map(|&index| ChildNumber::from(index))
        .collect();

    let child = master
        .derive_priv(&secp, &children)
        .map_err(|e| Error::KeyDerivation(format!("Child derivation failed at {}: {}", path, e)))?;

    Ok(Zeroizing::new(child.private_key.secret_bytes()))
}

/// 33-byte SEC1 compressed public key for a 32-byte private key
pub fn compressed_public_key(private_key: &[u8]) -> Result<[u8; 33]> {
    Ok(to_public_key(private_key)?.serialize())
}

/// 65-byte SEC1 uncompressed public key (`0x04 ∥ x ∥ y`) for a 32-byte private key
pub fn uncompressed_public_key(private_key: &[u8]) -> Result<[u8; 65]> {
    Ok(to_public_key(private_key)?.serialize_uncompressed())
}

fn to_public_key(private_key: &[u8]) -> Result<PublicKey> {
    let secp = Secp256k1::signing_only();
    Ok(PublicKey::from_secret_key(&secp, &parse_secret_key(private_key)?))
}

/// Parse a scalar, rejecting zero and values above the curve order
fn parse_secret_key(private_key: &[u8]) -> Result<SecretKey> {
    SecretKey::from_slice(private_key)
        .map_err(|e| Error::InvalidKeyEncoding(format!("Invalid secp256k1 private key: {}", e)))
}
