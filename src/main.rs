//! ChainScope - Multi-chain wallet and token explorer
//!
//! Command-line entry point: runs the credential relay gateway, or scans
//! wallets and researches tokens through it.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use chainscope::adapters::cli::{
    output, ChainsCmd, CliApp, Command, OutputFormat, ServeCmd, TokenCmd, WalletCmd,
};
use chainscope::adapters::gateway::{self, Gateway, ReqwestUpstream, UpstreamConfig};
use chainscope::adapters::token_api::{HttpGatewayClient, HttpGatewayConfig, TokenApiClient};
use chainscope::application::{ResearchOptions, ScanOptions, TokenResearcher, WalletScanner};
use chainscope::config::{load_config, Config, JWT_ENV};
use chainscope::ports::{Credential, GatewayPort};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (the JWT goes here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config = load(&app)?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Serve(cmd) => serve_command(cmd, &config).await,
        Command::Wallet(cmd) => wallet_command(cmd, &config, app.gateway).await,
        Command::Token(cmd) => token_command(cmd, &config, app.gateway).await,
        Command::Chains(cmd) => chains_command(cmd),
    }
}

fn load(app: &CliApp) -> Result<Config> {
    match &app.config {
        Some(path) => {
            // Expand config path (handles ~ for home directory)
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => Ok(Config::default()),
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

fn credential(config: &Config) -> Result<Credential> {
    let Some(jwt) = config.credentials.get_jwt() else {
        bail!(
            "No Token API credential found.\n\n\
             Set {} in your environment or .env file, or add\n  \
             [credentials]\n  jwt = \"...\"\n\
             to your config file.",
            JWT_ENV
        );
    };
    Credential::new(jwt).context("Invalid Token API credential")
}

/// In-process relay, or a remote gateway when one is configured
fn gateway_client(config: &Config, remote: Option<String>) -> Result<Arc<dyn GatewayPort>> {
    let remote = remote
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .or_else(|| config.client.get_gateway_url());

    match remote {
        Some(base_url) => {
            tracing::info!("Using remote gateway at {}", base_url);
            let client = HttpGatewayClient::with_config(HttpGatewayConfig {
                base_url,
                ..HttpGatewayConfig::from(config)
            })
            .context("Failed to create gateway client")?;
            Ok(Arc::new(client))
        }
        None => {
            let upstream = ReqwestUpstream::with_config(UpstreamConfig::from(config))
                .context("Failed to create Token API client")?;
            Ok(Arc::new(Gateway::new(upstream)))
        }
    }
}

async fn serve_command(cmd: ServeCmd, config: &Config) -> Result<()> {
    let mut section = config.gateway.clone();
    if let Some(listen) = cmd.listen {
        section.listen_addr = listen;
    }
    let addr = section
        .socket_addr()
        .context("Invalid listen address")?;

    let upstream_config = UpstreamConfig::from(config);
    tracing::info!("Relaying to {}", upstream_config.base_url);
    let upstream = ReqwestUpstream::with_config(upstream_config)
        .context("Failed to create Token API client")?;

    gateway::serve(addr, Arc::new(Gateway::new(upstream)))
        .await
        .context("Gateway server failed")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn wallet_command(cmd: WalletCmd, config: &Config, remote: Option<String>) -> Result<()> {
    let credential = credential(config)?;
    let client = TokenApiClient::new(gateway_client(config, remote)?);
    let scanner = WalletScanner::new(client).with_options(ScanOptions::from(config));

    let chain = cmd.chain.unwrap_or_else(|| config.scan.default_chain.clone());
    let scan = scanner
        .scan(&credential, &cmd.address, &chain)
        .await
        .context("Wallet scan failed")?;

    match cmd.format {
        OutputFormat::Text => print!("{}", output::wallet_text(&scan)),
        OutputFormat::Json => println!("{}", output::wallet_json(&scan)?),
    }
    Ok(())
}

async fn token_command(cmd: TokenCmd, config: &Config, remote: Option<String>) -> Result<()> {
    let credential = credential(config)?;
    let client = TokenApiClient::new(gateway_client(config, remote)?);
    let researcher = TokenResearcher::new(client).with_options(ResearchOptions::from(config));

    let research = researcher
        .research(&credential, &cmd.chain, &cmd.contract)
        .await
        .context("Token research failed")?;

    match cmd.format {
        OutputFormat::Text => print!("{}", output::research_text(&research, Utc::now())),
        OutputFormat::Json => println!("{}", output::research_json(&research)?),
    }
    Ok(())
}

fn chains_command(cmd: ChainsCmd) -> Result<()> {
    match cmd.format {
        OutputFormat::Text => print!("{}", output::chains_text()),
        OutputFormat::Json => println!("{}", output::chains_json()?),
    }
    Ok(())
}
