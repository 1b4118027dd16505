//! Error types for the keyforge library

use thiserror::Error;

/// Custom error type for keyforge operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The mnemonic phrase failed BIP-39 validation
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Mnemonic generation failed
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    /// The derivation path does not match the path grammar
    #[error("Invalid derivation path format: {0}")]
    InvalidPathFormat(String),

    /// A path segment is not a usable child index
    #[error("Invalid derivation path segment: {0}")]
    InvalidPathSegment(String),

    /// A private key has the wrong length
    #[error("Invalid key length: {0}")]
    InvalidKeyLength(String),

    /// A private key could not be decoded or is not a valid scalar
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// A serialized private key carries the wrong human-readable prefix
    #[error("Invalid private key prefix: expected '{expected}', got '{actual}'")]
    InvalidPrivateKeyPrefix { expected: String, actual: String },

    /// A serialized private key names a signature scheme we do not handle
    #[error("Unsupported key scheme flag: 0x{0:02x}")]
    UnsupportedKeyScheme(u8),

    /// Unknown address type tag, or a tag given to a chain with a single address form
    #[error("Unsupported address type: {0}")]
    UnsupportedAddressType(String),

    /// Unknown chain name
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// Key derivation failed
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Profile configuration could not be applied
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for keyforge operations
pub type Result<T> = std::result::Result<T, Error>;
