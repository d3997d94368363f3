//! Per-key driver: deploys a fresh token, then pokes it with a zero-value
//! transaction, repeated per signer with bounded retry. Everything runs
//! strictly sequentially over one shared provider.

use crate::{
    compiler::CompiledContract,
    contracts,
    token::TokenMetadata,
    Result,
};
use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use std::{future::Future, time::Duration};
use tracing::{info, warn};

/// Pacing and retry knobs for a run.
#[derive(Clone, Debug)]
pub struct SpamOpts {
    /// Deploy+poke rounds per signer.
    pub repetitions: u64,
    /// Attempts per poke tx before it is abandoned.
    pub max_retries: u64,
    /// Delay between failed poke attempts.
    pub retry_delay: Duration,
    /// Delay between rounds.
    pub pacing_delay: Duration,
    /// Fixed gas limit for deployment txs.
    pub deploy_gas_limit: u64,
}

impl Default for SpamOpts {
    fn default() -> Self {
        Self {
            repetitions: 1,
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
            pacing_delay: Duration::from_secs(5),
            deploy_gas_limit: 5_000_000,
        }
    }
}

/// Tallies for a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tokens_deployed: u64,
    pub pokes_sent: u64,
    pub failures: u64,
}

pub struct Spammer {
    provider: DynProvider,
    chain_id: u64,
    contract: CompiledContract,
    opts: SpamOpts,
}

impl Spammer {
    pub fn new(
        provider: DynProvider,
        chain_id: u64,
        contract: CompiledContract,
        opts: SpamOpts,
    ) -> Self {
        Self {
            provider,
            chain_id,
            contract,
            opts,
        }
    }

    /// Processes every signer in order. Per-round failures are logged and
    /// counted but never abort the run.
    pub async fn run(&self, signers: &[PrivateKeySigner]) -> RunSummary {
        let mut summary = RunSummary::default();
        for (idx, signer) in signers.iter().enumerate() {
            info!(
                "processing account {}/{} ({})",
                idx + 1,
                signers.len(),
                signer.address()
            );
            self.run_signer(signer, &mut summary).await;
        }
        summary
    }

    async fn run_signer(&self, signer: &PrivateKeySigner, summary: &mut RunSummary) {
        for round in 0..self.opts.repetitions {
            let meta = TokenMetadata::random();
            let token_address = match self.deploy_token(signer, &meta).await {
                Ok(address) => {
                    summary.tokens_deployed += 1;
                    address
                }
                Err(e) => {
                    warn!("deployment from {} failed: {e}", signer.address());
                    summary.failures += 1;
                    tokio::time::sleep(self.opts.pacing_delay).await;
                    continue;
                }
            };

            let sent = with_retries(self.opts.max_retries, self.opts.retry_delay, || {
                self.poke(signer, token_address)
            })
            .await;
            match sent {
                Ok(tx_hash) => {
                    summary.pokes_sent += 1;
                    info!(
                        "transaction {}/{} sent to {token_address}. tx hash: {tx_hash}",
                        round + 1,
                        self.opts.repetitions
                    );
                }
                Err(e) => {
                    warn!(
                        "transaction abandoned after {} attempt(s): {e}",
                        self.opts.max_retries
                    );
                    summary.failures += 1;
                }
            }

            tokio::time::sleep(self.opts.pacing_delay).await;
        }
        info!("finished for address {}", signer.address());
    }

    /// Deploys one token instance and waits for its receipt.
    async fn deploy_token(&self, signer: &PrivateKeySigner, meta: &TokenMetadata) -> Result<Address> {
        let nonce = self
            .provider
            .get_transaction_count(signer.address())
            .await?;
        let gas_price = self.provider.get_gas_price().await?;

        let tx_req = TransactionRequest::default()
            .with_from(signer.address())
            .with_deploy_code(Bytes::from(contracts::deploy_code(
                &self.contract.bytecode,
                meta,
            )))
            .with_nonce(nonce)
            .with_chain_id(self.chain_id)
            .with_gas_limit(self.opts.deploy_gas_limit)
            .with_gas_price(gas_price);

        let wallet = EthereumWallet::from(signer.to_owned());
        let tx = tx_req.build(&wallet).await?;
        let receipt = self
            .provider
            .send_tx_envelope(tx)
            .await?
            .get_receipt()
            .await?;
        let address = receipt
            .contract_address
            .ok_or(crate::error::Error::ContractAddressMissing(signer.address()))?;
        info!("deployed {} ({}) at {address}", meta.name, meta.symbol);
        Ok(address)
    }

    /// Sends one zero-value transaction to the deployed contract. Nonce,
    /// gas price (+10%), and gas limit (estimate +20%) are re-read on every
    /// attempt so retries pick up fresh chain state.
    async fn poke(&self, signer: &PrivateKeySigner, to: Address) -> Result<TxHash> {
        let nonce = self
            .provider
            .get_transaction_count(signer.address())
            .await?;
        let gas_price = self.provider.get_gas_price().await?;
        let gas_price = gas_price + gas_price / 10;
        let gas_estimate = self
            .provider
            .estimate_gas(
                TransactionRequest::default()
                    .with_from(signer.address())
                    .with_to(to)
                    .with_value(U256::ZERO),
            )
            .await?;
        let gas_limit = gas_estimate + gas_estimate / 5;

        let tx_req = TransactionRequest::default()
            .with_from(signer.address())
            .with_to(to)
            .with_value(U256::ZERO)
            .with_nonce(nonce)
            .with_chain_id(self.chain_id)
            .with_gas_limit(gas_limit)
            .with_gas_price(gas_price);

        let wallet = EthereumWallet::from(signer.to_owned());
        let tx = tx_req.build(&wallet).await?;
        let pending = self.provider.send_tx_envelope(tx).await?;
        Ok(*pending.tx_hash())
    }
}

/// Runs `op` up to `max_retries` times (minimum 1), sleeping `delay`
/// between failed attempts. Returns the last error once attempts are
/// exhausted.
pub async fn with_retries<T, F, Fut>(max_retries: u64, delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_retries = max_retries.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= max_retries {
                    return Err(e);
                }
                warn!("attempt {attempt}/{max_retries} failed: {e}");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, KeyErrorKind};
    use std::{
        path::PathBuf,
        sync::atomic::{AtomicU64, Ordering},
    };

    fn test_error() -> Error {
        KeyErrorKind::NoKeys(PathBuf::from("test")).into()
    }

    #[tokio::test]
    async fn retries_stop_after_max() {
        let attempts = AtomicU64::new(0);
        let res: Result<()> = with_retries(3, Duration::ZERO, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(test_error()) }
        })
        .await;
        assert!(res.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn success_ends_retries_early() {
        let attempts = AtomicU64::new(0);
        let res = with_retries(5, Duration::ZERO, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 2 {
                    Err(test_error())
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(res.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_max_retries_still_attempts_once() {
        let attempts = AtomicU64::new(0);
        let res: Result<()> = with_retries(0, Duration::ZERO, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(test_error()) }
        })
        .await;
        assert!(res.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    mod live {
        use super::super::*;
        use alloy::{
            json_abi::JsonAbi,
            node_bindings::Anvil,
            providers::ProviderBuilder,
        };
        use std::str::FromStr;

        // solc v0.8.26; solc Counter.sol --via-ir --optimize --bin
        const COUNTER_BYTECODE: &str = "6080806040523460135760df908160198239f35b600080fdfe6080806040526004361015601257600080fd5b60003560e01c9081633fb5c1cb1460925781638381f58a146079575063d09de08a14603c57600080fd5b3460745760003660031901126074576000546000198114605e57600101600055005b634e487b7160e01b600052601160045260246000fd5b600080fd5b3460745760003660031901126074576020906000548152f35b34607457602036600319011260745760043560005500fea2646970667358221220e978270883b7baed10810c4079c941512e93a7ba1cd1108c781d4bc738d9090564736f6c634300081a0033";

        #[tokio::test]
        #[ignore = "requires anvil on PATH"]
        async fn run_terminates_and_counts_deployments() {
            let anvil = Anvil::new().block_time(1).spawn();
            let provider =
                DynProvider::new(ProviderBuilder::new().connect_http(anvil.endpoint_url()));
            let contract = CompiledContract {
                name: "Counter".to_owned(),
                abi: JsonAbi::default(),
                bytecode: COUNTER_BYTECODE.parse().unwrap(),
            };
            let signer = PrivateKeySigner::from_str(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            )
            .unwrap();
            let opts = SpamOpts {
                repetitions: 2,
                retry_delay: Duration::ZERO,
                pacing_delay: Duration::from_millis(100),
                ..Default::default()
            };

            let spammer = Spammer::new(provider, anvil.chain_id(), contract, opts);
            let summary = spammer.run(&[signer]).await;
            assert_eq!(summary.tokens_deployed, 2);
            // Counter has no receive/fallback, so zero-value pokes may be
            // rejected at gas estimation; the run must still terminate with
            // every round accounted for.
            assert_eq!(summary.pokes_sent + summary.failures, 2);
        }
    }
}
