//! Key derivation and management
//!
//! This module provides the Ed25519 hardened-only HD engine, the secp256k1
//! BIP-32 node used for Bitcoin and EVM paths, and the path types both consume.

pub mod derivation;
pub mod ed25519;
pub mod path;
pub mod secp256k1;

pub use derivation::{
    derive, derive_child, derive_from_path_str, derive_master, harden, KeyMaterial,
    HARDENED_OFFSET,
};
pub use path::{is_valid_path, Bip32Path, DerivationPath};
