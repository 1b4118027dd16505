//! Ed25519 hierarchical deterministic derivation (SLIP-0010)
//!
//! Only hardened children exist in this scheme. Every index handed to
//! [`derive_child`] is hardened with [`harden`]; callers pass bare indices.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::hash::hmac_sha512;
use crate::error::Result;

use super::path::DerivationPath;

/// Offset marking a hardened child index
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for the master node
const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// Set the hardened bit on `index`. Indices that already carry it are unchanged.
#[inline]
pub const fn harden(index: u32) -> u32 {
    index | HARDENED_OFFSET
}

/// A node in the derivation tree: private key seed plus chain code
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl KeyMaterial {
    fn from_hmac_output(mut output: [u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        output.zeroize();

        Self { key, chain_code }
    }

    /// The 32-byte Ed25519 private key seed
    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    /// The 32-byte chain code
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}

/// Derive the master node from a seed of any length
pub fn derive_master(seed: &[u8]) -> Result<KeyMaterial> {
    let output = hmac_sha512(ED25519_CURVE, &[seed])?;
    Ok(KeyMaterial::from_hmac_output(output))
}

/// Derive the hardened child `index` of `parent`
pub fn derive_child(parent: &KeyMaterial, index: u32) -> Result<KeyMaterial> {
    let index = harden(index).to_be_bytes();
    let output = hmac_sha512(&parent.chain_code, &[&[0x00], &parent.key, &index])?;
    Ok(KeyMaterial::from_hmac_output(output))
}

/// Derive the node at `path`, root to leaf
pub fn derive(seed: &[u8], path: &DerivationPath) -> Result<KeyMaterial> {
    let master = derive_master(seed)?;

    path.indices()
        .iter()
        .try_fold(master, |parent, &index| derive_child(&parent, index))
}

/// Validate `path` and derive the node it names
///
/// Path errors are returned before any HMAC work is done.
pub fn derive_from_path_str(seed: &[u8], path: &str) -> Result<KeyMaterial> {
    let path = DerivationPath::parse(path)?;
    derive(seed, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // SLIP-0010 test vector 1 for ed25519
    const VECTOR1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn seed() -> Vec<u8> {
        hex::decode(VECTOR1_SEED).unwrap()
    }

    #[test]
    fn test_slip0010_master() {
        let master = derive_master(&seed()).unwrap();
        assert_eq!(
            hex::encode(master.key()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip0010_first_child() {
        let node = derive_from_path_str(&seed(), "m/0'").unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }

    #[test]
    fn test_slip0010_deep_chain() {
        let node = derive_from_path_str(&seed(), "m/0'/1'/2'/2'/1000000000'").unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "8f94d394a8e8fd6b1bc2f3f49f5c47e385281d5c17e65324b0f62483e37e8793"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "68789923a0cac2cd5a29172a475fe9e0fb14cd6adb5ad98a3fa70333e7afa230"
        );
    }

    #[test]
    fn test_zero_seed_vector() {
        let node = derive_from_path_str(&[0u8; 64], "m/0'").unwrap();
        assert_eq!(
            hex::encode(node.key()),
            "54d12b1cda4884cba85468e9c1189ee9d67865c97b93f214f1d9d65f38f15a99"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "8d7a30d050b31146ce9ffa737d04d438e27f7e984ec3ec11f0619b25ae7f9143"
        );
    }

    #[test]
    fn test_hardened_index_is_idempotent() {
        let master = derive_master(&seed()).unwrap();
        let bare = derive_child(&master, 0).unwrap();
        let hardened = derive_child(&master, HARDENED_OFFSET).unwrap();
        assert_eq!(bare.key(), hardened.key());
        assert_eq!(bare.chain_code(), hardened.chain_code());

        assert_eq!(harden(5), HARDENED_OFFSET + 5);
        assert_eq!(harden(harden(5)), harden(5));
    }

    #[test]
    fn test_fold_matches_stepwise() {
        let path = DerivationPath::parse("m/44'/784'/0'/0'/0'").unwrap();
        let folded = derive(&seed(), &path).unwrap();

        let mut node = derive_master(&seed()).unwrap();
        for &index in path.indices() {
            node = derive_child(&node, index).unwrap();
        }
        assert_eq!(folded.key(), node.key());
        assert_eq!(folded.chain_code(), node.chain_code());
    }

    #[test]
    fn test_deterministic() {
        let first = derive_from_path_str(&seed(), "m/44'/637'/0'/0'/0'").unwrap();
        let second = derive_from_path_str(&seed(), "m/44'/637'/0'/0'/0'").unwrap();
        assert_eq!(first.key(), second.key());
        assert_eq!(first.chain_code(), second.chain_code());
    }

    #[test]
    fn test_invalid_path_fails_fast() {
        let err = derive_from_path_str(&seed(), "m/44'/637'/0'/0/0").unwrap_err();
        assert!(matches!(err, Error::InvalidPathFormat(_)));

        let err = derive_from_path_str(&seed(), "").unwrap_err();
        assert!(matches!(err, Error::InvalidPathFormat(_)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let master = derive_master(&seed()).unwrap();
        let debug = format!("{:?}", master);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("2b4be7"));
    }
}
