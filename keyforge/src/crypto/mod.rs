//! Cryptographic primitives and operations
//!
//! This module provides mnemonic handling, hash primitives and key
//! derivation required for wallet generation.

pub mod hash;
pub mod keys;
pub mod mnemonic;

pub use keys::*;
pub use mnemonic::*;
