//! Keyforge - Multi-chain HD key derivation
//!
//! This library derives wallets for Aptos, Sui, Filecoin, Solana, Bitcoin and
//! EVM chains from BIP-39 mnemonics. Ed25519 chains go through a SLIP-0010
//! hardened-only derivation engine; Bitcoin and EVM use BIP-32 secp256k1.
//!
//! ```no_run
//! use keyforge::{Chain, CreateWalletOptions, WalletFactory};
//!
//! let factory = WalletFactory::with_defaults(Chain::Sui);
//! let wallet = factory.create_wallet(&CreateWalletOptions::default())?;
//! println!("{}", wallet.address());
//! # Ok::<(), keyforge::Error>(())
//! ```

pub mod account;
pub mod chains;
pub mod crypto;
pub mod error;

// Re-export commonly used types for convenience
pub use account::{CreateWalletOptions, WalletFactory, WalletRecord};
pub use chains::{BitcoinAddressType, Chain, ChainAddressFormatter, ChainProfiles, FormattedKey};
pub use crypto::{Bip39Provider, MnemonicProvider, MnemonicStrength};
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
