//! ENS provider abstraction and the Alloy HTTP implementation
//!
//! The trait covers exactly the JSON-RPC surface the lookup pipeline
//! consumes: name resolution, reverse lookup, account diagnostics, and the
//! resolver record views. Registry and resolver reads go through `eth_call`
//! with hand-encoded calldata.

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::TransactionRequest;
use anyhow::{Context, Result};

use crate::infrastructure::ethereum::ens;

/// Abstract ENS-aware provider.
///
/// Each method is independently failable; absence of a record is `Ok(None)`
/// while transport errors and reverts surface as `Err`.
#[async_trait::async_trait]
pub trait EnsProvider: Send + Sync + 'static {
    /// Chain id, used as a connection handshake
    async fn chain_id(&self) -> Result<u64>;

    /// Resolve a name to an address via the registry and its resolver
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>>;

    /// Reverse-resolve an address to its registered name
    async fn lookup_address(&self, address: Address) -> Result<Option<String>>;

    /// Get account balance in wei
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Get contract bytecode
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// Get outgoing transaction count
    async fn transaction_count(&self, address: Address) -> Result<u64>;

    /// Look up the resolver registered for a name, if any
    async fn resolver_for(&self, name: &str) -> Result<Option<Address>>;

    /// Resolver text record for a key
    async fn resolver_text(
        &self,
        resolver: Address,
        node: B256,
        key: &str,
    ) -> Result<Option<String>>;

    /// Resolver zero-argument address record
    async fn resolver_addr(&self, resolver: Address, node: B256) -> Result<Option<Address>>;

    /// Resolver multicoin address record for a coin type
    async fn resolver_addr_coin(
        &self,
        resolver: Address,
        node: B256,
        coin_type: u64,
    ) -> Result<Option<Vec<u8>>>;

    /// Resolver content-hash record
    async fn resolver_contenthash(
        &self,
        resolver: Address,
        node: B256,
    ) -> Result<Option<Vec<u8>>>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

// Type alias for the filled HTTP provider
type HttpFillProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// Alloy-backed provider over an HTTP JSON-RPC endpoint
pub struct AlloyEnsProvider {
    provider: HttpFillProvider,
    endpoint: String,
}

/// Create a provider from an HTTP endpoint URL
pub fn create_provider(url: &str) -> Result<Box<dyn EnsProvider>> {
    let rpc_url = url.parse().context("Invalid HTTP URL")?;
    let provider = ProviderBuilder::new().connect_http(rpc_url);
    Ok(Box::new(AlloyEnsProvider {
        provider,
        endpoint: url.to_string(),
    }))
}

impl AlloyEnsProvider {
    async fn call_view(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes> {
        let request = TransactionRequest::default().to(to).input(calldata.into());
        Ok(self.provider.call(request).await?)
    }

    /// Registry lookup: resolver address for a node, zero meaning none
    async fn registry_resolver(&self, node: B256) -> Result<Option<Address>> {
        let data = self
            .call_view(ens::ENS_REGISTRY, ens::encode_resolver(node))
            .await
            .context("Registry resolver lookup failed")?;
        Ok(ens::decode_address(&data))
    }
}

#[async_trait::async_trait]
impl EnsProvider for AlloyEnsProvider {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn resolve_name(&self, name: &str) -> Result<Option<Address>> {
        let node = ens::namehash(name);
        let Some(resolver) = self.registry_resolver(node).await? else {
            return Ok(None);
        };
        self.resolver_addr(resolver, node).await
    }

    async fn lookup_address(&self, address: Address) -> Result<Option<String>> {
        let node = ens::reverse_node(address);
        let Some(resolver) = self.registry_resolver(node).await? else {
            return Ok(None);
        };
        let data = self
            .call_view(resolver, ens::encode_name(node))
            .await
            .context("Reverse name lookup failed")?;
        Ok(ens::decode_string(&data))
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        Ok(self.provider.get_code_at(address).await?)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        Ok(self.provider.get_transaction_count(address).await?)
    }

    async fn resolver_for(&self, name: &str) -> Result<Option<Address>> {
        self.registry_resolver(ens::namehash(name)).await
    }

    async fn resolver_text(
        &self,
        resolver: Address,
        node: B256,
        key: &str,
    ) -> Result<Option<String>> {
        let data = self
            .call_view(resolver, ens::encode_text(node, key))
            .await
            .with_context(|| format!("Text record '{key}' lookup failed"))?;
        Ok(ens::decode_string(&data))
    }

    async fn resolver_addr(&self, resolver: Address, node: B256) -> Result<Option<Address>> {
        let data = self
            .call_view(resolver, ens::encode_addr(node))
            .await
            .context("Address record lookup failed")?;
        Ok(ens::decode_address(&data))
    }

    async fn resolver_addr_coin(
        &self,
        resolver: Address,
        node: B256,
        coin_type: u64,
    ) -> Result<Option<Vec<u8>>> {
        let data = self
            .call_view(resolver, ens::encode_addr_coin(node, coin_type))
            .await
            .with_context(|| format!("Coin type {coin_type} address lookup failed"))?;
        Ok(ens::decode_bytes(&data))
    }

    async fn resolver_contenthash(
        &self,
        resolver: Address,
        node: B256,
    ) -> Result<Option<Vec<u8>>> {
        let data = self
            .call_view(resolver, ens::encode_contenthash(node))
            .await
            .context("Content hash lookup failed")?;
        Ok(ens::decode_bytes(&data))
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}
