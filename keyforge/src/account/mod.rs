//! Account management functionality
//!
//! This module turns mnemonics into per-chain wallet records through the
//! [`WalletFactory`].

mod wallet;

pub use wallet::*;
