//! DEX Protocol Resolver
//!
//! Pool rows from the Token API carry a free-text `protocol` field whose
//! formatting is not stable ("uniswap_v3", "Uniswap V3", "uniswap-v3").
//! Identifiers are normalized and matched by substring against an ordered
//! registry. The first entry whose match token is contained in the normalized
//! string wins, so more specific tokens must come before less specific ones.

use serde::Serialize;

/// Color used for protocols the registry does not know
pub const FALLBACK_COLOR: &str = "#52525b";

/// Label used when upstream sends no protocol text at all
pub const FALLBACK_LABEL: &str = "Unknown DEX";

/// Canonical identity of a known DEX protocol
#[derive(Debug, Clone, Copy)]
pub struct DexIdentity {
    /// Normalized token searched for in the protocol string
    pub match_token: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    link: fn(&str, &str) -> String,
}

impl DexIdentity {
    /// Deep link to the pool on the DEX's own front-end
    pub fn pool_url(&self, network: &str, pool_address: &str) -> String {
        (self.link)(network, pool_address)
    }
}

impl PartialEq for DexIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.match_token == other.match_token
    }
}

impl Eq for DexIdentity {}

fn uniswap_chain_slug(network: &str) -> &'static str {
    match network {
        "mainnet" => "ethereum",
        "arbitrum-one" => "arbitrum",
        "polygon" => "polygon",
        "optimism" => "optimism",
        "base" => "base",
        "bsc" => "bnb",
        "avalanche" => "avalanche",
        _ => "ethereum",
    }
}

fn uniswap_v3_link(network: &str, pool: &str) -> String {
    format!(
        "https://app.uniswap.org/explore/pools/{}/{}",
        uniswap_chain_slug(network),
        pool
    )
}

fn uniswap_v2_link(_network: &str, pool: &str) -> String {
    format!("https://app.uniswap.org/explore/pools/ethereum/{}", pool)
}

fn sushiswap_link(_network: &str, pool: &str) -> String {
    format!("https://www.sushi.com/ethereum/pool/v2/{}", pool)
}

fn pancakeswap_v3_link(_network: &str, pool: &str) -> String {
    format!("https://pancakeswap.finance/info/v3/pairs/{}", pool)
}

fn pancakeswap_v2_link(_network: &str, pool: &str) -> String {
    format!("https://pancakeswap.finance/info/pairs/{}", pool)
}

fn curve_link(_network: &str, pool: &str) -> String {
    format!("https://curve.fi/#/ethereum/pools?search={}", pool)
}

fn balancer_link(_network: &str, pool: &str) -> String {
    format!("https://app.balancer.fi/#/ethereum/pool/{}", pool)
}

/// Known protocols, most specific first. Order is the tie-break.
pub static DEX_REGISTRY: &[DexIdentity] = &[
    DexIdentity {
        match_token: "uniswapv3",
        label: "Uniswap V3",
        color: "#ff007a",
        link: uniswap_v3_link,
    },
    DexIdentity {
        match_token: "uniswapv2",
        label: "Uniswap V2",
        color: "#ff007a",
        link: uniswap_v2_link,
    },
    DexIdentity {
        match_token: "sushiswap",
        label: "SushiSwap",
        color: "#e05baa",
        link: sushiswap_link,
    },
    DexIdentity {
        match_token: "pancakeswapv3",
        label: "PancakeSwap V3",
        color: "#1fc7d4",
        link: pancakeswap_v3_link,
    },
    DexIdentity {
        match_token: "pancakeswapv2",
        label: "PancakeSwap V2",
        color: "#1fc7d4",
        link: pancakeswap_v2_link,
    },
    DexIdentity {
        match_token: "curve",
        label: "Curve",
        color: "#a5a4ce",
        link: curve_link,
    },
    DexIdentity {
        match_token: "balancer",
        label: "Balancer",
        color: "#1e1e1e",
        link: balancer_link,
    },
];

/// Lowercase and drop every whitespace, hyphen and underscore
pub fn normalize_protocol(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a raw protocol identifier to its registry entry
pub fn resolve_protocol(raw: &str) -> Option<&'static DexIdentity> {
    let normalized = normalize_protocol(raw);
    if normalized.is_empty() {
        return None;
    }
    DEX_REGISTRY
        .iter()
        .find(|dex| normalized.contains(dex.match_token))
}

/// What a consumer needs to render a pool's protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DexBadge {
    pub label: String,
    pub color: &'static str,
    /// Deep link, only for known protocols
    pub url: Option<String>,
    pub known: bool,
}

/// Resolve a pool's protocol, degrading to a neutral badge for unknown ones
pub fn describe_pool(raw_protocol: &str, network: &str, pool_address: &str) -> DexBadge {
    match resolve_protocol(raw_protocol) {
        Some(dex) => DexBadge {
            label: dex.label.to_string(),
            color: dex.color,
            url: Some(dex.pool_url(network, pool_address)),
            known: true,
        },
        None => {
            let trimmed = raw_protocol.trim();
            DexBadge {
                label: if trimmed.is_empty() {
                    FALLBACK_LABEL.to_string()
                } else {
                    trimmed.to_string()
                },
                color: FALLBACK_COLOR,
                url: None,
                known: false,
            }
        }
    }
}
