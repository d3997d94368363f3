use crate::token::TokenMetadata;
use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Bytes, U256},
};

/// The fixed ERC-20 source deployed by every run. Compiled once at startup
/// by [`compile_erc20`](crate::compiler::compile_erc20).
pub const ERC20_SOURCE: &str = include_str!("./ERC20Token.sol");

pub const ERC20_SOURCE_NAME: &str = "ERC20Token.sol";
pub const ERC20_CONTRACT_NAME: &str = "ERC20Token";

/// Builds deployable creation code for one token instance by ABI-encoding
/// the constructor args `(name, symbol, decimals, totalSupply)` and
/// appending them to the compiled bytecode.
///
/// The raw supply is passed as-is; the contract scales it by `10^decimals`.
pub fn deploy_code(bytecode: &Bytes, meta: &TokenMetadata) -> Vec<u8> {
    let args = DynSolValue::Tuple(vec![
        DynSolValue::String(meta.name.to_owned()),
        DynSolValue::String(meta.symbol.to_owned()),
        DynSolValue::Uint(U256::from(meta.decimals), 8),
        DynSolValue::Uint(U256::from(meta.total_supply), 256),
    ]);
    let mut code = bytecode.to_vec();
    code.extend(args.abi_encode_params());
    code
}
