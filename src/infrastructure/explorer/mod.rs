//! Block-explorer transaction-history client
//!
//! One GET against an etherscan-style endpoint. The envelope is
//! `{status, message, result}`; `status != "1"` or a non-array `result`
//! means "no transactions", not an error. Only transport-level problems
//! surface as `ExplorerError`.

use serde::Deserialize;
use thiserror::Error;

use crate::lookup::{format_ether, Transaction};

/// Recent transactions per request, newest first
const PAGE_SIZE: u32 = 10;
const END_BLOCK: u64 = 99_999_999;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("transaction history request failed: {0}")]
    Transport(reqwest::Error),
}

/// Outcome of a well-delivered history request
#[derive(Debug, Clone)]
pub enum TxHistory {
    Records(Vec<Transaction>),
    /// The endpoint answered but had nothing usable; `note` explains why
    Empty { note: String },
}

/// Source of recent transactions for an address. Abstracted so the lookup
/// pipeline can run against a mock in tests. An `Err` is a transport-level
/// failure; everything the endpoint actually answered maps to `TxHistory`.
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    async fn recent_transactions(&self, address: &str) -> anyhow::Result<TxHistory>;
}

#[derive(Debug, Deserialize)]
struct TxListEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawTxRecord {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    /// Wei as a decimal string
    value: String,
    #[serde(rename = "blockNumber")]
    block_number: String,
    #[serde(rename = "timeStamp", default)]
    time_stamp: Option<String>,
}

/// Etherscan-style HTTP client
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl TransactionSource for EtherscanClient {
    async fn recent_transactions(&self, address: &str) -> anyhow::Result<TxHistory> {
        Ok(self.fetch(address).await?)
    }
}

impl EtherscanClient {
    async fn fetch(&self, address: &str) -> Result<TxHistory, ExplorerError> {
        let end_block = END_BLOCK.to_string();
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", end_block.as_str()),
                ("page", "1"),
                ("offset", page_size.as_str()),
                ("sort", "desc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(ExplorerError::Transport)?;

        let envelope: TxListEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(err) if err.is_decode() => {
                return Ok(TxHistory::Empty {
                    note: "malformed response body".to_string(),
                })
            }
            Err(err) => return Err(ExplorerError::Transport(err)),
        };

        Ok(interpret_envelope(envelope))
    }
}

fn interpret_envelope(envelope: TxListEnvelope) -> TxHistory {
    if envelope.status != "1" {
        let note = envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "no transactions found".to_string());
        return TxHistory::Empty { note };
    }

    let records: Vec<RawTxRecord> = match serde_json::from_value(envelope.result) {
        Ok(records) => records,
        Err(_) => {
            return TxHistory::Empty {
                note: "malformed result array".to_string(),
            }
        }
    };

    let transactions = records.into_iter().map(map_record).collect();
    TxHistory::Records(transactions)
}

fn map_record(raw: RawTxRecord) -> Transaction {
    let wei = raw.value.parse().unwrap_or_default();
    Transaction {
        hash: raw.hash,
        from: raw.from,
        to: raw.to.filter(|to| !to.is_empty()),
        value: format_ether(wei),
        block_number: raw.block_number.parse().unwrap_or_default(),
        timestamp: raw.time_stamp.and_then(|ts| ts.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(body: &str) -> TxListEnvelope {
        serde_json::from_str(body).expect("valid envelope json")
    }

    #[test]
    fn test_status_zero_is_empty_not_error() {
        let history = interpret_envelope(envelope(
            r#"{"status":"0","message":"No transactions found","result":[]}"#,
        ));
        match history {
            TxHistory::Empty { note } => assert_eq!(note, "No transactions found"),
            TxHistory::Records(_) => panic!("status 0 must map to Empty"),
        }
    }

    #[test]
    fn test_non_array_result_is_empty() {
        let history = interpret_envelope(envelope(
            r#"{"status":"1","message":"NOTOK","result":"Max rate limit reached"}"#,
        ));
        assert!(matches!(history, TxHistory::Empty { .. }));
    }

    #[test]
    fn test_records_map_values_and_blocks() {
        let history = interpret_envelope(envelope(
            r#"{"status":"1","message":"OK","result":[
                {"hash":"0xabc","from":"0x1","to":"0x2",
                 "value":"1500000000000000000","blockNumber":"19000000",
                 "timeStamp":"1700000000"},
                {"hash":"0xdef","from":"0x3","to":"",
                 "value":"0","blockNumber":"18999999"}
            ]}"#,
        ));
        let TxHistory::Records(txs) = history else {
            panic!("expected records");
        };
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].value, "1.5");
        assert_eq!(txs[0].block_number, 19_000_000);
        assert_eq!(txs[0].timestamp, Some(1_700_000_000));
        // contract creation: empty `to` becomes None
        assert_eq!(txs[1].to, None);
        assert_eq!(txs[1].timestamp, None);
    }
}
