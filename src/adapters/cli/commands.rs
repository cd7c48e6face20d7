//! CLI Commands
//!
//! Argument definitions for the `chainscope` binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ChainScope - Multi-chain wallet and token explorer over The Graph Token API
#[derive(Parser, Debug)]
#[command(
    name = "chainscope",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Multi-chain wallet and token explorer over The Graph Token API",
    long_about = "ChainScope scans a wallet across every supported EVM chain in parallel, \
                  researches a token's holders, pools, price history and swaps, and can run \
                  the credential relay gateway in front of the Token API."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (optional; defaults apply without one)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Use a running gateway at this URL instead of the in-process relay
    #[arg(long, value_name = "URL", global = true)]
    pub gateway: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the credential relay gateway
    Serve(ServeCmd),

    /// Scan a wallet's native balances on every chain
    Wallet(WalletCmd),

    /// Research a token's holders, pools, price and swaps
    Token(TokenCmd),

    /// List supported chains
    Chains(ChainsCmd),
}

/// Run the gateway HTTP server
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Listen address (overrides gateway.listen_addr)
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,
}

/// Scan a wallet
#[derive(Parser, Debug)]
pub struct WalletCmd {
    /// Wallet address (0x...)
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Chain for ERC-20 holdings (defaults to scan.default_chain)
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Research a token
#[derive(Parser, Debug)]
pub struct TokenCmd {
    /// Token contract address (0x...)
    #[arg(value_name = "CONTRACT")]
    pub contract: String,

    /// Chain the contract lives on
    #[arg(long, value_name = "CHAIN", default_value = "mainnet")]
    pub chain: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// List the Chain Registry
#[derive(Parser, Debug)]
pub struct ChainsCmd {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
