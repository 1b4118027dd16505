//! Keyforge CLI
//!
//! Creates and recovers wallets from the command line. Results are written to
//! stdout as JSON; logs go to stderr.

mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyforge::{
    Bip39Provider, BitcoinAddressType, Chain, CreateWalletOptions, MnemonicStrength, WalletFactory,
};

#[derive(Parser)]
#[command(name = "keyforge")]
#[command(about = "Derive wallets for Aptos, Sui, Filecoin, Solana, Bitcoin and EVM chains")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with chain profile overrides
    #[arg(short, long, global = true, env = "KEYFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new wallet with a fresh mnemonic
    Create {
        #[arg(long)]
        chain: Chain,
        /// Mnemonic length (12 or 24 words)
        #[arg(long, default_value_t = 12)]
        words: usize,
        #[arg(long)]
        path: Option<String>,
        /// Bitcoin address type: p2pkh, p2sh or bech32
        #[arg(long)]
        address_type: Option<BitcoinAddressType>,
    },
    /// Recover a wallet from an existing mnemonic
    Restore {
        #[arg(long)]
        chain: Chain,
        #[arg(long, env = "KEYFORGE_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        address_type: Option<BitcoinAddressType>,
    },
    /// Print the private key for a mnemonic
    PrivateKey {
        #[arg(long)]
        chain: Chain,
        #[arg(long, env = "KEYFORGE_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Print the address for a private key
    Address {
        #[arg(long)]
        chain: Chain,
        #[arg(long)]
        private_key: String,
        #[arg(long)]
        address_type: Option<String>,
    },
    /// Print the effective chain profiles
    Profiles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let profiles = Arc::new(config::load_profiles(cli.config.as_deref())?);
    let factory = |chain| WalletFactory::new(chain, Arc::clone(&profiles), Bip39Provider);

    let output = match cli.command {
        Commands::Create {
            chain,
            words,
            path,
            address_type,
        } => {
            debug!("Running create for {}", chain);
            let options = CreateWalletOptions {
                strength: MnemonicStrength::from_word_count(words)?,
                path,
                address_type,
                passphrase: None,
            };
            serde_json::to_value(factory(chain).create_wallet(&options)?)?
        }
        Commands::Restore {
            chain,
            mnemonic,
            path,
            address_type,
        } => {
            debug!("Running restore for {}", chain);
            let options = CreateWalletOptions {
                path,
                address_type,
                ..CreateWalletOptions::default()
            };
            serde_json::to_value(factory(chain).wallet_from_mnemonic(&mnemonic, &options)?)?
        }
        Commands::PrivateKey {
            chain,
            mnemonic,
            path,
        } => {
            let private_key = factory(chain).private_key_by_mnemonic(&mnemonic, path.as_deref())?;
            json!({ "privateKey": private_key.as_str() })
        }
        Commands::Address {
            chain,
            private_key,
            address_type,
        } => {
            let address =
                factory(chain).address_by_private_key(&private_key, address_type.as_deref())?;
            json!({ "address": address })
        }
        Commands::Profiles => serde_json::to_value(profiles.iter().collect::<Vec<_>>())?,
    };

    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}
