//! Wallet creation and recovery

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::chains::{
    BitcoinAddressType, Chain, ChainAddressFormatter, ChainProfiles, CurveFamily, FormattedKey,
};
use crate::crypto::keys::{self, secp256k1, Bip32Path, DerivationPath};
use crate::crypto::mnemonic::{Bip39Provider, MnemonicProvider, MnemonicStrength};
use crate::error::{Error, Result};

/// A freshly generated or recovered wallet
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    mnemonic: String,
    private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    address: String,
}

impl WalletRecord {
    fn new(mnemonic: &str, formatted: FormattedKey) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            private_key: formatted.private_key.to_string(),
            public_key: Some(formatted.public_key),
            address: formatted.address,
        }
    }

    /// Get the mnemonic phrase
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Get the private key in the chain's text form
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Get the public key in the chain's text form
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// Get the address
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("mnemonic", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

/// Options for creating or recovering a wallet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWalletOptions {
    /// Mnemonic length for newly generated wallets
    pub strength: MnemonicStrength,
    /// Derivation path; the chain profile's default when absent
    pub path: Option<String>,
    /// Bitcoin address form; the chain profile's default when absent
    pub address_type: Option<BitcoinAddressType>,
    /// BIP-39 passphrase
    pub passphrase: Option<String>,
}

impl CreateWalletOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strength(mut self, strength: MnemonicStrength) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_address_type(mut self, address_type: BitcoinAddressType) -> Self {
        self.address_type = Some(address_type);
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

/// A path checked against the chain's curve family
enum ResolvedPath {
    Ed25519(DerivationPath),
    Secp256k1(Bip32Path),
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519(path) => fmt::Display::fmt(path, f),
            Self::Secp256k1(path) => fmt::Display::fmt(path, f),
        }
    }
}

/// Builds wallets for one chain
///
/// The factory holds no mutable state; it can be shared across threads when
/// its mnemonic provider can.
pub struct WalletFactory<P: MnemonicProvider = Bip39Provider> {
    chain: Chain,
    profiles: Arc<ChainProfiles>,
    provider: P,
}

impl WalletFactory<Bip39Provider> {
    /// Factory using the compiled-in profiles and the BIP-39 provider
    pub fn with_defaults(chain: Chain) -> Self {
        Self::new(chain, Arc::new(ChainProfiles::default()), Bip39Provider)
    }
}

impl<P: MnemonicProvider> WalletFactory<P> {
    pub fn new(chain: Chain, profiles: Arc<ChainProfiles>, provider: P) -> Self {
        Self {
            chain,
            profiles,
            provider,
        }
    }

    /// Chain served by this factory
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Generate a new mnemonic and derive the wallet at the requested path
    pub fn create_wallet(&self, options: &CreateWalletOptions) -> Result<WalletRecord> {
        let path = self.resolve_path(options.path.as_deref())?;
        let formatter = self.formatter(options.address_type)?;

        debug!("Creating {} wallet at {}", self.chain, path);

        let mnemonic = Zeroizing::new(self.provider.generate(options.strength)?);
        self.build_record(&mnemonic, &path, formatter.as_ref(), options.passphrase.as_deref())
    }

    /// Recover the wallet for an existing mnemonic
    pub fn wallet_from_mnemonic(
        &self,
        mnemonic: &str,
        options: &CreateWalletOptions,
    ) -> Result<WalletRecord> {
        let path = self.resolve_path(options.path.as_deref())?;
        let formatter = self.formatter(options.address_type)?;

        debug!("Recovering {} wallet at {}", self.chain, path);

        self.build_record(mnemonic, &path, formatter.as_ref(), options.passphrase.as_deref())
    }

    /// Private key text for `mnemonic` at `path` (or the profile default)
    pub fn private_key_by_mnemonic(
        &self,
        mnemonic: &str,
        path: Option<&str>,
    ) -> Result<Zeroizing<String>> {
        let path = self.resolve_path(path)?;
        let formatter = self.formatter(None)?;

        debug!("Deriving {} private key at {}", self.chain, path);

        let private_key = self.derive_private_key(mnemonic, &path, None)?;
        Ok(formatter.format(&private_key[..])?.private_key)
    }

    /// Address for a private key given in the chain's text form
    ///
    /// `address_type` selects the Bitcoin address form (`p2pkh`, `p2sh` or
    /// `bech32`) and must be absent for every other chain.
    pub fn address_by_private_key(
        &self,
        private_key: &str,
        address_type: Option<&str>,
    ) -> Result<String> {
        let address_type = address_type
            .map(str::parse::<BitcoinAddressType>)
            .transpose()?;
        let formatter = self.formatter(address_type)?;

        debug!(
            "Computing {} address{}",
            self.chain,
            address_type.map(|t| format!(" ({})", t)).unwrap_or_default()
        );

        formatter.address_from_private_key(private_key)
    }

    fn resolve_path(&self, path: Option<&str>) -> Result<ResolvedPath> {
        let profile = self.profiles.get(self.chain);
        let path = path.unwrap_or(&profile.default_path);

        match profile.curve {
            CurveFamily::Ed25519Hardened => DerivationPath::parse(path).map(ResolvedPath::Ed25519),
            CurveFamily::Secp256k1Bip32 => Bip32Path::parse(path).map(ResolvedPath::Secp256k1),
        }
    }

    fn formatter(
        &self,
        address_type: Option<BitcoinAddressType>,
    ) -> Result<Box<dyn ChainAddressFormatter>> {
        self.profiles.get(self.chain).formatter(address_type)
    }

    fn derive_private_key(
        &self,
        mnemonic: &str,
        path: &ResolvedPath,
        passphrase: Option<&str>,
    ) -> Result<Zeroizing<[u8; 32]>> {
        if !self.provider.validate(mnemonic) {
            return Err(Error::InvalidMnemonic(
                "mnemonic failed BIP-39 validation".to_string(),
            ));
        }

        let seed = self.provider.to_seed(mnemonic, passphrase)?;

        match path {
            ResolvedPath::Ed25519(path) => {
                let material = keys::derive(&seed, path)?;
                Ok(Zeroizing::new(*material.key()))
            }
            ResolvedPath::Secp256k1(path) => secp256k1::derive_private_key(&seed, path),
        }
    }

    fn build_record(
        &self,
        mnemonic: &str,
        path: &ResolvedPath,
        formatter: &dyn ChainAddressFormatter,
        passphrase: Option<&str>,
    ) -> Result<WalletRecord> {
        let private_key = self.derive_private_key(mnemonic, path, passphrase)?;
        let formatted = formatter.format(&private_key[..])?;

        debug!("Derived {} address {}", self.chain, formatted.address);

        Ok(WalletRecord::new(mnemonic, formatted))
    }
}
