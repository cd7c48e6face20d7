//! CLI Output
//!
//! Plain-text and JSON views of pipeline results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::application::{TokenResearch, WalletScan};
use crate::domain::format::{
    format_balance, format_value, holder_share_pct, time_ago, truncate_address,
};
use crate::domain::{describe_pool, BalanceState, ChainDescriptor, DexBadge, PoolInfo, CHAINS};

/// Pool with its resolved DEX badge
#[derive(Debug, Serialize)]
struct PoolView<'a> {
    #[serde(flatten)]
    pool: &'a PoolInfo,
    pair: String,
    dex: DexBadge,
}

#[derive(Debug, Serialize)]
struct ResearchView<'a> {
    #[serde(flatten)]
    research: &'a TokenResearch,
    explorer_url: String,
    dex_pools: Vec<PoolView<'a>>,
}

#[derive(Debug, Serialize)]
struct WalletView<'a> {
    #[serde(flatten)]
    scan: &'a WalletScan,
    explorer_url: String,
}

pub fn wallet_json(scan: &WalletScan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WalletView {
        scan,
        explorer_url: scan.selected_chain.address_url(&scan.address),
    })
}

pub fn research_json(research: &TokenResearch) -> serde_json::Result<String> {
    let dex_pools = research
        .pools
        .iter()
        .map(|pool| PoolView {
            pool,
            pair: pool.pair_label(),
            dex: describe_pool(&pool.protocol_raw, research.chain.id, &pool.pool_address),
        })
        .collect();

    serde_json::to_string_pretty(&ResearchView {
        research,
        explorer_url: research.chain.token_url(&research.contract),
        dex_pools,
    })
}

pub fn chains_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(CHAINS)
}

pub fn wallet_text(scan: &WalletScan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Wallet {}", scan.address);
    let _ = writeln!(out);

    for balance in &scan.balances {
        let chain = balance.chain;
        let amount = match balance.state {
            BalanceState::Ready => format!("{} {}", format_balance(balance.amount), chain.native_symbol),
            BalanceState::Failed => "failed".to_string(),
            BalanceState::Pending => "...".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<10} {:>18}  {}",
            chain.display_name,
            amount,
            chain.address_url(&scan.address)
        );
    }

    let _ = writeln!(
        out,
        "\n{} chains: {} ready, {} failed",
        scan.balances.len(),
        scan.ready_count(),
        scan.failed_count()
    );

    let _ = writeln!(
        out,
        "\nTokens on {} ({})",
        scan.selected_chain.display_name,
        scan.holdings.len()
    );
    if scan.holdings.is_empty() {
        let _ = writeln!(out, "  none found");
    }
    for holding in &scan.holdings {
        let _ = writeln!(
            out,
            "  {:<8} {:<24} {:>12}  {}",
            holding.symbol,
            holding.name,
            format_balance(holding.amount),
            truncate_address(&holding.contract_address)
        );
    }

    out
}

pub fn research_text(research: &TokenResearch, now: DateTime<Utc>) -> String {
    let chain = research.chain;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Token {} on {}",
        truncate_address(&research.contract),
        chain.display_name
    );
    let _ = writeln!(out, "{}", chain.token_url(&research.contract));

    if let Some(ticker) = &research.ticker {
        let _ = writeln!(out, "Pair: {}", ticker);
    }

    let _ = writeln!(out, "\nTop holders ({})", research.holders.len());
    let top = research.holders.first().map(|h| h.usd_value).unwrap_or(0.0);
    for (rank, holder) in research.holders.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<14} ${:>10} {:>5.1}%",
            rank + 1,
            truncate_address(&holder.address),
            format_value(holder.usd_value),
            holder_share_pct(holder.usd_value, top)
        );
    }

    let _ = writeln!(out, "\nPools ({})", research.pools.len());
    for pool in &research.pools {
        let badge = describe_pool(&pool.protocol_raw, chain.id, &pool.pool_address);
        let _ = writeln!(
            out,
            "  {:<16} {:<14} {:<14} {}",
            badge.label,
            pool.pair_label(),
            truncate_address(&pool.pool_address),
            badge.url.unwrap_or_default()
        );
    }

    if let Some(window) = &research.window {
        let _ = writeln!(
            out,
            "\nPrice history {} to {} ({} bars)",
            window.start_param(),
            window.end_param(),
            research.price_history.len()
        );
        if let (Some(first), Some(last)) =
            (research.price_history.first(), research.price_history.last())
        {
            let change = if first.open > 0.0 {
                (last.close - first.open) / first.open * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "  open {:.6}  close {:.6}  change {:+.2}%",
                first.open, last.close, change
            );
        }

        let _ = writeln!(out, "\nRecent swaps ({})", research.swaps.len());
        for swap in &research.swaps {
            let age = swap
                .timestamp
                .map(|ts| time_ago(ts, now))
                .unwrap_or_else(|| "-".to_string());
            let tx = swap
                .tx_hash
                .as_deref()
                .map(|hash| chain.tx_url(hash))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<9} {} {} -> {} {}  {}",
                age,
                format_balance(swap.input_amount),
                swap.input_token,
                format_balance(swap.output_amount),
                swap.output_token,
                tx
            );
        }
    } else {
        let _ = writeln!(out, "\nNo pools found; price history and swaps skipped");
    }

    if !research.degraded.is_empty() {
        let branches: Vec<&str> = research.degraded.iter().map(|b| b.label()).collect();
        let _ = writeln!(out, "\nUnavailable: {}", branches.join(", "));
    }

    out
}

pub fn chains_text() -> String {
    let mut out = String::new();
    for chain in CHAINS {
        let _ = writeln!(out, "{}", chain_line(chain));
    }
    out
}

fn chain_line(chain: &ChainDescriptor) -> String {
    format!(
        "{:<14} {:<10} {:<6} {}",
        chain.id, chain.display_name, chain.native_symbol, chain.explorer_base_url
    )
}
