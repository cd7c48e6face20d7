//! Display helpers shared by the CLI output

use chrono::{DateTime, Utc};

/// Compact native/ERC-20 balance
pub fn format_balance(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0001 {
        return "<0.0001".to_string();
    }
    if value < 1.0 {
        return format!("{:.4}", value);
    }
    if value >= 1e6 {
        return format!("{:.2}M", value / 1e6);
    }
    if value >= 1e3 {
        return format!("{:.2}K", value / 1e3);
    }
    format!("{:.4}", value)
}

/// Compact holder value with B/M/K suffixes
pub fn format_value(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}

/// Shorten an address to `0x1234…abcd`
pub fn truncate_address(address: &str) -> String {
    if address.is_empty() {
        return "?".to_string();
    }
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}\u{2026}{}", head, tail)
}

/// Relative age of a timestamp
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - timestamp).num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// Holder value as a percentage of the top holder, floored at 2%
pub fn holder_share_pct(value: f64, top_value: f64) -> f64 {
    let top = if top_value > 0.0 { top_value } else { 1.0 };
    ((value / top) * 100.0).max(2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(0.0), "0");
        assert_eq!(format_balance(0.00001), "<0.0001");
        assert_eq!(format_balance(0.5), "0.5000");
        assert_eq!(format_balance(12.3456789), "12.3457");
        assert_eq!(format_balance(4_500.0), "4.50K");
        assert_eq!(format_balance(2_750_000.0), "2.75M");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12.00");
        assert_eq!(format_value(1_234.0), "1.23K");
        assert_eq!(format_value(5_600_000.0), "5.60M");
        assert_eq!(format_value(7_100_000_000.0), "7.10B");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"),
            "0xd8da\u{2026}6045"
        );
        assert_eq!(truncate_address(""), "?");
        assert_eq!(truncate_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(20), now), "just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_holder_share_pct() {
        assert_relative_eq!(holder_share_pct(50.0, 200.0), 25.0);
        assert_relative_eq!(holder_share_pct(1.0, 1_000.0), 2.0);
        assert_relative_eq!(holder_share_pct(3.0, 0.0), 300.0);
    }
}
