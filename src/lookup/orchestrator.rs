//! Lookup orchestration
//!
//! One lookup is an ordered chain of steps, each with its own error
//! boundary: a failed step logs (or stays silent, for the optional text
//! records) and the chain moves on. The only short-circuit is "no address
//! could be resolved". All observable output flows through [`LookupSink`]
//! as [`LookupUpdate`] values; the final update of every non-empty run is
//! `Finished`.

use alloy::primitives::{Address, B256};
use anyhow::Result;

use crate::infrastructure::ethereum::{ens, EnsProvider};
use crate::infrastructure::explorer::{TransactionSource, TxHistory};
use crate::lookup::types::{format_ether, LogEntry, LookupUpdate, Profile};

const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Coin types probed against the resolver: ETH and Ethereum Classic
const COIN_TYPES: [u64; 2] = [60, 61];

/// Receiver for the incremental updates of a lookup run
pub trait LookupSink {
    fn push(&mut self, update: LookupUpdate);
}

/// Whether the input already has the shape of an address: `0x` followed by
/// exactly 40 hex digits.
pub fn is_address_like(input: &str) -> bool {
    let Some(payload) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) else {
        return false;
    };
    payload.len() == 40 && payload.chars().all(|c| c.is_ascii_hexdigit())
}

/// Rewrite an `ipfs://` avatar URI to a public HTTPS gateway; any other
/// scheme passes through unchanged.
pub fn normalize_avatar(uri: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(path) => format!("{IPFS_GATEWAY}{path}"),
        None => uri.to_string(),
    }
}

/// Run one lookup for a name or address.
///
/// Empty input is a no-op: no update is pushed, not even `Finished`.
pub async fn run_lookup(
    input: &str,
    provider: &dyn EnsProvider,
    history: &dyn TransactionSource,
    sink: &mut dyn LookupSink,
) {
    if input.is_empty() {
        return;
    }

    let mut run = LookupRun {
        input,
        provider,
        history,
        sink,
        profile: Profile::default(),
    };
    if let Err(err) = run.execute().await {
        run.log_error(format!("Lookup failed: {err:#}"));
    }
    run.sink.push(LookupUpdate::Finished);
}

struct LookupRun<'a> {
    input: &'a str,
    provider: &'a dyn EnsProvider,
    history: &'a dyn TransactionSource,
    sink: &'a mut dyn LookupSink,
    profile: Profile,
}

impl LookupRun<'_> {
    async fn execute(&mut self) -> Result<()> {
        self.log_info(format!("Resolving ENS name: {}", self.input));

        let resolved = self.resolve_input().await;
        self.log_namehash();

        let Some(address) = resolved else {
            self.log_error(format!("No address available for {}", self.input));
            self.profile = Profile::default();
            self.sink.push(LookupUpdate::ProfileCleared);
            return Ok(());
        };

        self.fetch_balance(address).await;
        self.fetch_code_size(address).await;
        self.fetch_transaction_count(address).await;
        self.fetch_reverse_record(address).await;

        if let Some(resolver) = self.fetch_resolver().await {
            let node = ens::namehash(self.input);
            self.fetch_contenthash(resolver, node).await;
            self.fetch_text_records(resolver, node).await;
            self.fetch_resolver_address(resolver, node).await;
            self.fetch_coin_addresses(resolver, node).await;
        }

        self.fetch_history(address).await;
        Ok(())
    }

    /// Classify the input. Address-shaped input is taken as resolved
    /// directly and never hits the resolution RPC; anything else goes
    /// through name resolution, whose failure leaves the address unset.
    async fn resolve_input(&mut self) -> Option<Address> {
        if is_address_like(self.input) {
            let address = self
                .input
                .parse::<Address>()
                .expect("address-shaped input parses");
            self.log_info(format!("Input is an address: {address}"));
            return Some(address);
        }

        match self.provider.resolve_name(self.input).await {
            Ok(Some(address)) => {
                self.log_info(format!("Resolved address: {address}"));
                Some(address)
            }
            Ok(None) => None,
            Err(err) => {
                self.log_error(format!("Name resolution failed: {err:#}"));
                None
            }
        }
    }

    /// Namehash is logged for name-shaped input only; an address does not
    /// hash meaningfully, so the step is skipped without a word.
    fn log_namehash(&mut self) {
        if is_address_like(self.input) {
            return;
        }
        let node = ens::namehash(self.input);
        self.log_info(format!("Namehash: {node:?}"));
    }

    async fn fetch_balance(&mut self, address: Address) {
        match self.provider.get_balance(address).await {
            Ok(wei) => {
                let balance = format_ether(wei);
                self.log_info(format!("Balance: {balance} ETH"));
                self.profile.address = Some(address.to_string());
                self.profile.balance = Some(balance);
                self.push_profile();
            }
            Err(err) => self.log_error(format!("Balance fetch failed: {err:#}")),
        }
    }

    async fn fetch_code_size(&mut self, address: Address) {
        match self.provider.get_code(address).await {
            Ok(code) if code.is_empty() => self.log_info("No contract code at address"),
            Ok(code) => self.log_info(format!("Contract code: {} bytes", code.len())),
            Err(err) => self.log_error(format!("Code fetch failed: {err:#}")),
        }
    }

    async fn fetch_transaction_count(&mut self, address: Address) {
        match self.provider.transaction_count(address).await {
            Ok(count) => self.log_info(format!("Outgoing transaction count: {count}")),
            Err(err) => self.log_error(format!("Transaction count fetch failed: {err:#}")),
        }
    }

    async fn fetch_reverse_record(&mut self, address: Address) {
        match self.provider.lookup_address(address).await {
            Ok(Some(name)) if !name.is_empty() => {
                self.log_info(format!("Reverse record: {name}"));
                self.profile.reverse = Some(name);
                self.push_profile();
            }
            Ok(_) => self.log_info("No reverse record"),
            Err(err) => self.log_error(format!("Reverse lookup failed: {err:#}")),
        }
    }

    /// A missing resolver is informational and skips every resolver-backed
    /// step that follows.
    async fn fetch_resolver(&mut self) -> Option<Address> {
        match self.provider.resolver_for(self.input).await {
            Ok(Some(resolver)) => {
                self.log_info(format!("Resolver: {resolver}"));
                self.profile.resolver = Some(resolver.to_string());
                self.push_profile();
                Some(resolver)
            }
            Ok(None) => {
                self.log_info(format!("No resolver found for {}", self.input));
                None
            }
            Err(err) => {
                self.log_error(format!("Resolver lookup failed: {err:#}"));
                None
            }
        }
    }

    async fn fetch_contenthash(&mut self, resolver: Address, node: B256) {
        match self.provider.resolver_contenthash(resolver, node).await {
            Ok(Some(bytes)) => self.log_info(format!("Content hash: 0x{}", hex::encode(bytes))),
            Ok(None) => self.log_info("No content hash record"),
            Err(err) => self.log_error(format!("Content hash fetch failed: {err:#}")),
        }
    }

    /// The four profile text records are each best-effort: a failure or an
    /// empty record leaves the field unset and writes nothing to the log.
    async fn fetch_text_records(&mut self, resolver: Address, node: B256) {
        if let Ok(Some(name)) = self.provider.resolver_text(resolver, node, "name").await {
            self.profile.name = Some(name);
            self.push_profile();
        }
        if let Ok(Some(url)) = self.provider.resolver_text(resolver, node, "url").await {
            self.profile.url = Some(url);
            self.push_profile();
        }
        if let Ok(Some(avatar)) = self.provider.resolver_text(resolver, node, "avatar").await {
            self.profile.avatar = Some(normalize_avatar(&avatar));
            self.push_profile();
        }
        if let Ok(Some(description)) = self
            .provider
            .resolver_text(resolver, node, "description")
            .await
        {
            self.profile.description = Some(description);
            self.push_profile();
        }
    }

    /// Zero-argument address record, falling back to the explicit
    /// coin-type form when the former yields nothing.
    async fn fetch_resolver_address(&mut self, resolver: Address, node: B256) {
        match self.provider.resolver_addr(resolver, node).await {
            Ok(Some(address)) => {
                self.log_info(format!("Resolver address record: {address}"));
                return;
            }
            Ok(None) => {}
            Err(err) => {
                self.log_error(format!("Address record fetch failed: {err:#}"));
                return;
            }
        }
        match self.provider.resolver_addr_coin(resolver, node, 60).await {
            Ok(Some(bytes)) => {
                self.log_info(format!("Resolver address record (coin 60): 0x{}", hex::encode(bytes)))
            }
            Ok(None) => self.log_info("Resolver has no address record"),
            Err(err) => self.log_error(format!("Address record fetch failed: {err:#}")),
        }
    }

    /// Probe each coin type independently; one failure does not stop the
    /// next probe.
    async fn fetch_coin_addresses(&mut self, resolver: Address, node: B256) {
        for coin_type in COIN_TYPES {
            match self.provider.resolver_addr_coin(resolver, node, coin_type).await {
                Ok(Some(bytes)) => self.log_info(format!(
                    "Coin type {coin_type} address: 0x{}",
                    hex::encode(bytes)
                )),
                Ok(None) => self.log_info(format!("No address for coin type {coin_type}")),
                Err(err) => self.log_error(format!(
                    "Coin type {coin_type} address fetch failed: {err:#}"
                )),
            }
        }
    }

    /// Recent transactions run last; on any kind of failure the list is
    /// forced empty so stale rows never survive a failed refresh.
    async fn fetch_history(&mut self, address: Address) {
        match self.history.recent_transactions(&address.to_string()).await {
            Ok(TxHistory::Records(transactions)) => {
                self.log_info(format!("Fetched {} transactions", transactions.len()));
                self.sink.push(LookupUpdate::Transactions(transactions));
            }
            Ok(TxHistory::Empty { note }) => {
                self.log_info(format!("Transaction history: {note}"));
                self.sink.push(LookupUpdate::Transactions(Vec::new()));
            }
            Err(err) => {
                self.log_error(format!("Transaction history fetch failed: {err}"));
                self.sink.push(LookupUpdate::Transactions(Vec::new()));
            }
        }
    }

    fn push_profile(&mut self) {
        self.sink.push(LookupUpdate::Profile(self.profile.clone()));
    }

    fn log_info(&mut self, text: impl Into<String>) {
        self.sink.push(LookupUpdate::Log(LogEntry::info(text)));
    }

    fn log_error(&mut self, text: impl Into<String>) {
        self.sink.push(LookupUpdate::Log(LogEntry::error(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_address_like() {
        assert!(is_address_like(&format!("0x{}", "a".repeat(40))));
        assert!(!is_address_like("vitalik.eth"));
        assert!(!is_address_like(&format!("0x{}", "a".repeat(39))));
        assert!(!is_address_like(&format!("0x{}", "g".repeat(40))));
        assert!(!is_address_like(""));
    }

    #[test]
    fn test_normalize_avatar() {
        assert_eq!(
            normalize_avatar("ipfs://Qm123"),
            "https://ipfs.io/ipfs/Qm123"
        );
        assert_eq!(
            normalize_avatar("https://example.com/pic.png"),
            "https://example.com/pic.png"
        );
        assert_eq!(normalize_avatar("data:image/png;base64,xyz"), "data:image/png;base64,xyz");
    }
}
