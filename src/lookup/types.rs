//! Data model shared by the orchestrator, the runtime bridge, and the UI

use alloy::primitives::U256;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One line in the session log. Entries are append-only and rendered
/// newest-first; only a full UI reset discards them.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub text: String,
}

impl LogEntry {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level: LogLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level: LogLevel::Error,
            text: text.into(),
        }
    }
}

/// Profile accumulator for one lookup. Fields fill in independently as
/// queries resolve; any subset may be present. The next lookup replaces
/// the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub resolver: Option<String>,
    pub reverse: Option<String>,
    pub balance: Option<String>,
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        *self == Profile::default()
    }
}

/// One row of the recent-transaction list, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    /// Value in ETH as a decimal string
    pub value: String,
    pub block_number: u64,
    pub timestamp: Option<u64>,
}

/// Incremental output of one lookup run, in emission order.
#[derive(Debug, Clone)]
pub enum LookupUpdate {
    Log(LogEntry),
    /// Full profile snapshot after a field merge
    Profile(Profile),
    ProfileCleared,
    /// Wholesale replacement of the transaction list
    Transactions(Vec<Transaction>),
    /// Always the last update of a run
    Finished,
}

/// Format a wei amount as a decimal ETH string, trimming trailing zeros.
pub fn format_ether(wei: U256) -> String {
    let eth_in_wei = U256::from(1_000_000_000_000_000_000u64);
    let whole = wei / eth_in_wei;
    let frac = wei % eth_in_wei;

    if frac.is_zero() {
        return whole.to_string();
    }
    let frac_str = format!("{:0>18}", frac);
    let trimmed = frac_str.trim_end_matches('0');
    format!("{}.{}", whole, trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(
            format_ether(U256::from(1_000_000_000_000_000_000u64)),
            "1"
        );
        assert_eq!(format_ether(U256::from(1_500_000_000_000_000_000u64)), "1.5");
        // 1 wei
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
        // 12.25 ETH
        assert_eq!(
            format_ether(U256::from(12_250_000_000_000_000_000u128)),
            "12.25"
        );
    }
}
