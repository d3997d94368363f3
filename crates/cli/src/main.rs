mod args;
mod util;

use args::TokenspamCli;
use clap::Parser;
use tokenspam_core::{compiler, provider, signers, spammer::Spammer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = TokenspamCli::parse();

    let (rpc_client, chain_id) = provider::connect(&args.rpc_url).await?;
    let contract = compiler::compile_erc20(&args.solc)?;
    info!(
        "compiled {} ({} bytes of creation code)",
        contract.name,
        contract.bytecode.len()
    );
    let signers = signers::load_signers(&args.keys_file)?;

    let repetitions = args
        .repetitions
        .unwrap_or_else(util::prompt_repetitions);

    let spammer = Spammer::new(rpc_client, chain_id, contract, args.spam_opts(repetitions));
    let summary = spammer.run(&signers).await;
    info!(
        "done. deployed {} token(s), sent {} poke tx(s), {} failure(s)",
        summary.tokens_deployed, summary.pokes_sent, summary.failures
    );
    Ok(())
}
