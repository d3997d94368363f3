use crate::Result;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use tracing::info;

pub use alloy::transports::http::reqwest::Url;

/// Opens an HTTP provider and probes the node with `eth_chainId`.
/// An unreachable node fails here, before any key is touched; the returned
/// chain id is stamped onto every transaction for the rest of the run.
pub async fn connect(rpc_url: &Url) -> Result<(DynProvider, u64)> {
    info!("connecting to {rpc_url}");
    let provider = DynProvider::new(ProviderBuilder::new().connect_http(rpc_url.to_owned()));
    let chain_id = provider.get_chain_id().await?;
    info!("connected (chain id {chain_id})");
    Ok((provider, chain_id))
}
