//! This file contains type definitions for CLI arguments.

use std::{path::PathBuf, time::Duration};
use tokenspam_core::{provider::Url, spammer::SpamOpts};

#[derive(Debug, clap::Parser)]
#[command(
    name = "tokenspam",
    about = "Deploys randomized ERC-20 tokens and pokes them with zero-value txs, once per key in a key file.",
    version
)]
pub struct TokenspamCli {
    /// RPC URL to send requests.
    #[arg(
        env = "RPC_URL",
        short,
        long,
        long_help = "HTTP JSON-RPC URL of the target node. Probed once at startup; the run aborts if it is unreachable.",
        default_value = "https://testnet.dplabs-internal.com"
    )]
    pub rpc_url: Url,

    /// Path to the private key file.
    #[arg(
        env = "TOKENSPAM_KEYS_FILE",
        short,
        long,
        long_help = "Plaintext file with one private key per line. Blank lines are skipped; keys are processed strictly in file order.",
        default_value = "privatekeys.txt"
    )]
    pub keys_file: PathBuf,

    /// Deploy+poke rounds per key.
    #[arg(
        short = 'n',
        long,
        long_help = "Number of deploy+poke rounds to run for each private key. Prompts interactively when not set."
    )]
    pub repetitions: Option<u64>,

    /// Attempts per poke tx before it is abandoned.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u64,

    /// Seconds to wait between failed poke attempts.
    #[arg(long, default_value_t = 5)]
    pub retry_delay: u64,

    /// Seconds to wait between rounds.
    #[arg(long, default_value_t = 5, visible_aliases = ["delay"])]
    pub pacing_delay: u64,

    /// Gas limit for deployment txs.
    #[arg(long, default_value_t = 5_000_000)]
    pub deploy_gas_limit: u64,

    /// Path to the solc binary.
    #[arg(env = "SOLC_PATH", long, default_value = "solc")]
    pub solc: String,
}

impl TokenspamCli {
    pub fn spam_opts(&self, repetitions: u64) -> SpamOpts {
        SpamOpts {
            repetitions,
            max_retries: self.max_retries,
            retry_delay: Duration::from_secs(self.retry_delay),
            pacing_delay: Duration::from_secs(self.pacing_delay),
            deploy_gas_limit: self.deploy_gas_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_original_tuning() {
        let args = TokenspamCli::parse_from(["tokenspam"]);
        assert_eq!(args.keys_file, PathBuf::from("privatekeys.txt"));
        assert_eq!(args.repetitions, None);
        assert_eq!(args.max_retries, 3);
        assert_eq!(args.retry_delay, 5);
        assert_eq!(args.pacing_delay, 5);
        assert_eq!(args.deploy_gas_limit, 5_000_000);

        let opts = args.spam_opts(7);
        assert_eq!(opts.repetitions, 7);
        assert_eq!(opts.retry_delay, Duration::from_secs(5));
        assert_eq!(opts.pacing_delay, Duration::from_secs(5));
    }

    #[test]
    fn repetitions_flag_skips_the_prompt() {
        let args = TokenspamCli::parse_from(["tokenspam", "-n", "4"]);
        assert_eq!(args.repetitions, Some(4));
    }
}
