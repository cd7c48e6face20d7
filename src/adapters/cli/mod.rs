//! CLI Adapter
//!
//! Command-line interface for ChainScope.
//! Uses clap derive macros for argument parsing.

mod commands;
pub mod output;

pub use commands::{ChainsCmd, CliApp, Command, OutputFormat, ServeCmd, TokenCmd, WalletCmd};
