use alloy::{
    hex::FromHexError,
    network::{Ethereum, TransactionBuilderError},
    primitives::Address,
    providers::PendingTransactionError,
    signers,
    transports::{RpcError, TransportErrorKind},
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("compiler error")]
    Compiler(#[from] CompilerErrorKind),

    #[error("deployment receipt for deployer {0} has no contract address")]
    ContractAddressMissing(Address),

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("key file error")]
    Keys(#[from] KeyErrorKind),

    #[error("failed to parse hex value")]
    ParseHex(#[from] FromHexError),

    #[error("failed to find pending tx")]
    PendingTx(#[from] PendingTransactionError),

    #[error("rpc error")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("failed to build eth transaction")]
    TransactionBuilderEth(#[from] TransactionBuilderError<Ethereum>),
}

#[derive(Debug, Error)]
pub enum CompilerErrorKind {
    #[error("solc binary '{0}' not found. Install solc or pass a path with --solc.")]
    SolcMissing(String),

    #[error("solc exited with a failure status: {0}")]
    SolcFailed(String),

    #[error("solc reported errors:\n{0}")]
    Compile(String),

    #[error("contract '{0}' missing from solc output")]
    ArtifactMissing(String),

    #[error("failed to parse solc output")]
    OutputInvalid(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum KeyErrorKind {
    #[error("key file '{0}' not found")]
    FileMissing(PathBuf),

    #[error("no private keys found in '{0}'")]
    NoKeys(PathBuf),

    #[error("invalid private key on line {line}")]
    InvalidKey {
        line: usize,
        source: signers::local::LocalSignerError,
    },
}
