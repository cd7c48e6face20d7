//! Application Layer - Data pipelines
//!
//! - `wallet_scan`: native balances across every registered chain plus
//!   ERC-20 holdings on the selected one
//! - `token_research`: holders and pools, then price history and swaps for the
//!   primary pool

pub mod token_research;
pub mod wallet_scan;

use thiserror::Error;

pub use token_research::{ResearchBranch, ResearchOptions, TokenResearch, TokenResearcher};
pub use wallet_scan::{ScanOptions, WalletScan, WalletScanner};

/// Precondition failures. Raised before any upstream call is issued.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),
}

/// Trim caller input, rejecting blank values
pub(crate) fn require_input(value: &str, what: &str) -> Result<String, PipelineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::BadRequest(format!("{} is required", what)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_chain(
    id: &str,
) -> Result<&'static crate::domain::ChainDescriptor, PipelineError> {
    crate::domain::find_chain(id.trim())
        .ok_or_else(|| PipelineError::UnsupportedChain(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_input_trims() {
        assert_eq!(require_input("  0xabc ", "address"), Ok("0xabc".to_string()));
        assert_eq!(
            require_input("   ", "address"),
            Err(PipelineError::BadRequest("address is required".into()))
        );
    }

    #[test]
    fn test_require_chain() {
        assert_eq!(require_chain("base").unwrap().id, "base");
        assert_eq!(
            require_chain("solana").unwrap_err(),
            PipelineError::UnsupportedChain("solana".into())
        );
    }
}
