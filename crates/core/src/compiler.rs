//! Compiles the embedded Solidity source by shelling out to `solc`.
//!
//! Ideally we'd drive the compiler in-process, but pulling a full solc
//! toolchain into the dependency tree is not worth it for one fixed
//! contract, so we speak the standard-JSON protocol over a subprocess.

use crate::{
    contracts::{ERC20_CONTRACT_NAME, ERC20_SOURCE, ERC20_SOURCE_NAME},
    error::CompilerErrorKind,
    Result,
};
use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use serde_json::json;
use std::{
    collections::HashMap,
    io::Write,
    process::{Command, Stdio},
};
use tracing::{debug, warn};

/// A compiled contract artifact, held for the duration of the run.
#[derive(Clone, Debug)]
pub struct CompiledContract {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

/// Compiles the embedded ERC-20 source. Called once at startup; any
/// compiler failure is fatal.
pub fn compile_erc20(solc_path: &str) -> Result<CompiledContract> {
    compile_source(solc_path, ERC20_SOURCE_NAME, ERC20_SOURCE, ERC20_CONTRACT_NAME)
}

/// Runs `solc --standard-json` on a single source and extracts one
/// contract's ABI and creation bytecode.
pub fn compile_source(
    solc_path: &str,
    source_name: &str,
    source: &str,
    contract_name: &str,
) -> Result<CompiledContract> {
    let input = standard_json_input(source_name, source);
    debug!("compiling {source_name} with {solc_path}");

    let mut child = Command::new(solc_path)
        .arg("--standard-json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CompilerErrorKind::SolcMissing(solc_path.to_owned()).into()
            } else {
                crate::error::Error::Io(e)
            }
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(input.to_string().as_bytes())?;
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(CompilerErrorKind::SolcFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        )
        .into());
    }

    parse_artifact(
        &String::from_utf8_lossy(&output.stdout),
        source_name,
        contract_name,
    )
}

/// The standard-JSON request body, selecting only the outputs we use.
pub fn standard_json_input(source_name: &str, source: &str) -> serde_json::Value {
    json!({
        "language": "Solidity",
        "sources": { source_name: { "content": source } },
        "settings": {
            "outputSelection": { "*": { "*": ["abi", "evm.bytecode"] } }
        },
    })
}

#[derive(Debug, Deserialize)]
struct SolcOutput {
    #[serde(default)]
    errors: Vec<SolcDiagnostic>,
    #[serde(default)]
    contracts: HashMap<String, HashMap<String, SolcContract>>,
}

#[derive(Debug, Deserialize)]
struct SolcDiagnostic {
    severity: String,
    message: String,
    #[serde(rename = "formattedMessage")]
    formatted_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SolcContract {
    abi: JsonAbi,
    evm: SolcEvm,
}

#[derive(Debug, Deserialize)]
struct SolcEvm {
    bytecode: SolcBytecode,
}

#[derive(Debug, Deserialize)]
struct SolcBytecode {
    object: String,
}

/// Parses raw standard-JSON output. Diagnostics with severity `error` are
/// fatal; anything else is logged and ignored.
pub fn parse_artifact(raw: &str, source_name: &str, contract_name: &str) -> Result<CompiledContract> {
    let out: SolcOutput = serde_json::from_str(raw).map_err(CompilerErrorKind::OutputInvalid)?;

    let mut fatal = vec![];
    for diag in &out.errors {
        let msg = diag
            .formatted_message
            .as_deref()
            .unwrap_or(&diag.message)
            .trim_end()
            .to_owned();
        if diag.severity == "error" {
            fatal.push(msg);
        } else {
            warn!("solc: {msg}");
        }
    }
    if !fatal.is_empty() {
        return Err(CompilerErrorKind::Compile(fatal.join("\n")).into());
    }

    let contract = out
        .contracts
        .get(source_name)
        .and_then(|contracts| contracts.get(contract_name))
        .ok_or_else(|| CompilerErrorKind::ArtifactMissing(contract_name.to_owned()))?;
    let bytecode: Bytes = contract.evm.bytecode.object.parse()?;

    Ok(CompiledContract {
        name: contract_name.to_owned(),
        abi: contract.abi.to_owned(),
        bytecode,
    })
}
