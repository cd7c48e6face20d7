//! Chain Registry
//!
//! Static table of the EVM networks served by the Token API. The registry order
//! is the fan-out order of a wallet scan and the display order of its results.

use serde::Serialize;

/// Explorer used when a network id is not in the registry
pub const FALLBACK_EXPLORER: &str = "https://etherscan.io";

/// A supported network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainDescriptor {
    /// Token API network id (e.g. "arbitrum-one")
    pub id: &'static str,
    /// Human readable name
    pub display_name: &'static str,
    /// Native gas token symbol
    pub native_symbol: &'static str,
    /// Block explorer base URL, no trailing slash
    pub explorer_base_url: &'static str,
    /// Accent color used by front-ends
    pub accent_color: &'static str,
}

impl ChainDescriptor {
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base_url, address)
    }

    pub fn token_url(&self, contract: &str) -> String {
        format!("{}/token/{}", self.explorer_base_url, contract)
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base_url, tx_hash)
    }
}

/// All supported networks
pub static CHAINS: &[ChainDescriptor] = &[
    ChainDescriptor {
        id: "mainnet",
        display_name: "Ethereum",
        native_symbol: "ETH",
        explorer_base_url: "https://etherscan.io",
        accent_color: "#627eea",
    },
    ChainDescriptor {
        id: "base",
        display_name: "Base",
        native_symbol: "ETH",
        explorer_base_url: "https://basescan.org",
        accent_color: "#0052ff",
    },
    ChainDescriptor {
        id: "arbitrum-one",
        display_name: "Arbitrum",
        native_symbol: "ETH",
        explorer_base_url: "https://arbiscan.io",
        accent_color: "#28a0f0",
    },
    ChainDescriptor {
        id: "optimism",
        display_name: "Optimism",
        native_symbol: "ETH",
        explorer_base_url: "https://optimistic.etherscan.io",
        accent_color: "#ff0420",
    },
    ChainDescriptor {
        id: "polygon",
        display_name: "Polygon",
        native_symbol: "MATIC",
        explorer_base_url: "https://polygonscan.com",
        accent_color: "#8247e5",
    },
    ChainDescriptor {
        id: "bsc",
        display_name: "BNB Chain",
        native_symbol: "BNB",
        explorer_base_url: "https://bscscan.com",
        accent_color: "#f0b90b",
    },
    ChainDescriptor {
        id: "avalanche",
        display_name: "Avalanche",
        native_symbol: "AVAX",
        explorer_base_url: "https://snowscan.xyz",
        accent_color: "#e84142",
    },
    ChainDescriptor {
        id: "unichain",
        display_name: "Unichain",
        native_symbol: "ETH",
        explorer_base_url: "https://uniscan.xyz",
        accent_color: "#ff007a",
    },
];

/// Look up a network by id
pub fn find_chain(id: &str) -> Option<&'static ChainDescriptor> {
    CHAINS.iter().find(|c| c.id == id)
}

/// Check whether a network id is registered
pub fn is_supported(id: &str) -> bool {
    find_chain(id).is_some()
}

/// Explorer base URL for a network, falling back to Etherscan
pub fn explorer_for(id: &str) -> &'static str {
    find_chain(id)
        .map(|c| c.explorer_base_url)
        .unwrap_or(FALLBACK_EXPLORER)
}
